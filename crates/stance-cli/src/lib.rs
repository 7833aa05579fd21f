//! stance-cli: interactive terminal front end for the annotation and
//! verification workflows.

use std::io::{BufRead, Write};
use std::sync::OnceLock;

use stance_core::config::Config;
use stance_core::log_io::{LogLevel, SessionEvent, SessionLogger};

pub mod annotate;
pub mod args;
pub mod completion;
pub mod prompt;
pub mod verify;

/// Stable crate label used by bootstrap smoke tests.
pub fn crate_label() -> &'static str {
    "stance-cli"
}

static VERSION: OnceLock<String> = OnceLock::new();

/// Set the version string for `--version` output.
pub fn set_version(version: &str) {
    let _ = VERSION.set(version.to_string());
}

fn get_version() -> &'static str {
    VERSION.get().map(|s| s.as_str()).unwrap_or("dev")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

type Runner = fn(&[String], &Config, &mut dyn BufRead, &mut dyn Write, &mut dyn Write) -> i32;

/// Run a command against the process stdio with config from the environment.
fn run_from_env(runner: Runner) -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("Error: invalid configuration: {err}");
            return 1;
        }
    };
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    runner(&args, &config, &mut input, &mut stdout, &mut stderr)
}

pub fn run_annotate_from_env() -> i32 {
    run_from_env(annotate::run_annotate)
}

pub fn run_verify_from_env() -> i32 {
    run_from_env(verify::run_verify)
}

/// Run a command with scripted stdin, capturing both output streams.
fn run_for_test(runner: Runner, args: &[&str], stdin: &str, config: &Config) -> CommandOutput {
    let owned: Vec<String> = args.iter().map(|a| (*a).to_string()).collect();
    let mut input = std::io::Cursor::new(stdin.as_bytes().to_vec());
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let exit_code = runner(&owned, config, &mut input, &mut stdout, &mut stderr);
    CommandOutput {
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
        exit_code,
    }
}

pub fn run_annotate_for_test(args: &[&str], stdin: &str, config: &Config) -> CommandOutput {
    run_for_test(annotate::run_annotate, args, stdin, config)
}

pub fn run_verify_for_test(args: &[&str], stdin: &str, config: &Config) -> CommandOutput {
    run_for_test(verify::run_verify, args, stdin, config)
}

/// Session log plus the stderr stream its failures are reported on.
pub(crate) struct Journal<'a> {
    logger: SessionLogger,
    mode: &'static str,
    stderr: &'a mut dyn Write,
}

impl<'a> Journal<'a> {
    pub(crate) fn open(config: &Config, mode: &'static str, stderr: &'a mut dyn Write) -> Self {
        let logger = match (&config.logging.file, config.log_level()) {
            (Some(path), Ok(level)) => match SessionLogger::open(path, level) {
                Ok(logger) => logger,
                Err(err) => {
                    let _ = writeln!(stderr, "warning: session log disabled: {err}");
                    SessionLogger::disabled()
                }
            },
            _ => SessionLogger::disabled(),
        };
        Self {
            logger,
            mode,
            stderr,
        }
    }

    pub(crate) fn event(&self, event_type: &str) -> SessionEvent {
        SessionEvent::new(event_type, self.mode)
    }

    pub(crate) fn record(&mut self, level: LogLevel, event: SessionEvent) {
        if let Err(err) = self.logger.log(level, &event) {
            let _ = writeln!(self.stderr, "warning: session log: {err}");
        }
    }

    pub(crate) fn info(&mut self, event: SessionEvent) {
        self.record(LogLevel::Info, event);
    }

    pub(crate) fn error(&mut self, message: &str) {
        let _ = writeln!(self.stderr, "Error: {message}");
    }

    pub(crate) fn notice(&mut self, message: &str) {
        let _ = writeln!(self.stderr, "{message}");
    }
}

fn version_line(command: &str) -> String {
    format!("{command} version {}\n", get_version())
}
