#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use stance_cli::run_annotate_for_test;
use stance_core::config::{Config, LoggingConfig};
use stance_core::loader::load_table;

const INPUT: &str = "target,comment,label,transformation\n\
Is coffee healthy?,Coffee is great for you,FAVOR,Coffee is bad for you\n\
Should cities ban cars?,Cars ruin cities,FAVOR,Cars make cities work\n";

struct Fixture {
    _dir: tempfile::TempDir,
    root: PathBuf,
    input: String,
    output: String,
    config: Config,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().to_path_buf();
        let input = root.join("sample.csv");
        std::fs::write(&input, INPUT).expect("seed input");
        let config = Config {
            upload_dir: root.join("uploads"),
            logging: LoggingConfig::default(),
        };
        Self {
            input: input.to_string_lossy().into_owned(),
            output: root.join("out/annotated.csv").to_string_lossy().into_owned(),
            _dir: dir,
            root,
            config,
        }
    }

    fn run(&self, stdin: &str) -> stance_cli::CommandOutput {
        run_annotate_for_test(
            &[
                "--input_file",
                &self.input,
                "--output_file",
                &self.output,
            ],
            stdin,
            &self.config,
        )
    }

    fn output_text(&self) -> String {
        std::fs::read_to_string(&self.output).expect("read output")
    }
}

#[test]
fn full_pass_writes_expected_csv() {
    let fx = Fixture::new();
    // row 0: Yes, submit. row 1: No, suggestion, easy=No, submit. Then skip upload.
    let out = fx.run("1\n\n2\nflipped statement\n2\ny\n\n");
    assert_eq!(out.exit_code, 0, "stderr: {}", out.stderr);
    assert!(out.stderr.is_empty(), "stderr: {}", out.stderr);

    assert_eq!(
        fx.output_text(),
        "target,comment,label,transformation,acceptable,suggestion,easy\n\
         Is coffee healthy?,Coffee is great for you,FAVOR,Coffee is bad for you,Yes,,\n\
         Should cities ban cars?,Cars ruin cities,FAVOR,Cars make cities work,No,flipped statement,No\n"
    );
    assert!(out.stdout.contains("== Sentence 1 =="));
    assert!(out.stdout.contains("== Sentence 2 =="));
    assert!(out.stdout.contains("Annotation complete!"));
    assert!(out.stdout.contains("Was the transformation easy to produce?"));
}

#[test]
fn yes_answer_never_asks_for_suggestion() {
    let fx = Fixture::new();
    let out = fx.run("yes\n\nyes\n\n\n");
    assert_eq!(out.exit_code, 0, "stderr: {}", out.stderr);
    assert!(!out.stdout.contains("Suggest a better transformation:"));
    let table = load_table(&fx.output).expect("reload");
    assert!((0..2).all(|row| table.get(row, "suggestion").is_none()));
}

#[test]
fn empty_suggestion_skips_ease_question() {
    let fx = Fixture::new();
    let out = fx.run("no\n\n\n1\n\n\n");
    assert_eq!(out.exit_code, 0, "stderr: {}", out.stderr);
    assert!(!out.stdout.contains("Was the transformation easy to produce?"));
    let table = load_table(&fx.output).expect("reload");
    assert_eq!(table.get(0, "acceptable"), Some("No"));
    assert_eq!(table.get(0, "easy"), None);
}

#[test]
fn declining_submit_shows_same_record_again() {
    let fx = Fixture::new();
    let out = fx.run("2\ndraft\n1\nn\n1\n\n1\n\n\n");
    assert_eq!(out.exit_code, 0, "stderr: {}", out.stderr);
    assert_eq!(out.stdout.matches("== Sentence 1 ==").count(), 2);
    let table = load_table(&fx.output).expect("reload");
    assert_eq!(table.get(0, "acceptable"), Some("Yes"));
    assert_eq!(table.get(0, "suggestion"), None);
}

#[test]
fn output_is_rewritten_after_each_submit() {
    let fx = Fixture::new();
    let out = fx.run("1\n\n");
    assert_eq!(out.exit_code, 0);
    assert!(out.stderr.contains("Session closed at record 2 of 2"));
    let table = load_table(&fx.output).expect("reload");
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(0, "acceptable"), Some("Yes"));
    assert_eq!(table.get(1, "acceptable"), None);
}

#[test]
fn completion_upload_copies_file_verbatim() {
    let fx = Fixture::new();
    let stdin = format!("1\n\n1\n\n{}\n\n", fx.output);
    let out = fx.run(&stdin);
    assert_eq!(out.exit_code, 0, "stderr: {}", out.stderr);

    let uploaded = fx.root.join("uploads/annotated.csv");
    assert!(out.stdout.contains("File saved to"), "stdout: {}", out.stdout);
    assert_eq!(
        std::fs::read(&uploaded).expect("read upload"),
        std::fs::read(&fx.output).expect("read output")
    );
}

#[test]
fn failed_upload_reports_and_asks_again() {
    let fx = Fixture::new();
    let missing = fx.root.join("nowhere.csv");
    let stdin = format!("1\n\n1\n\n{}\n", missing.display());
    let out = fx.run(&stdin);
    assert_eq!(out.exit_code, 0);
    assert!(out.stderr.contains("Error: read upload"), "stderr: {}", out.stderr);
    assert_eq!(
        out.stdout
            .matches("Upload the annotated file (path, leave empty to finish):")
            .count(),
        2
    );
}

#[test]
fn non_csv_input_fails_before_existence_check() {
    let fx = Fixture::new();
    let out = run_annotate_for_test(
        &["--input_file", "notes.txt", "--output_file", &fx.output],
        "",
        &fx.config,
    );
    assert_eq!(out.exit_code, 1);
    assert_eq!(out.stderr, "Error: input file must be a CSV file: notes.txt\n");
    assert!(!Path::new(&fx.output).exists());
}

#[test]
fn missing_input_is_not_found() {
    let fx = Fixture::new();
    let missing = fx.root.join("missing.csv");
    let out = run_annotate_for_test(
        &[
            "--input_file",
            &missing.to_string_lossy(),
            "--output_file",
            &fx.output,
        ],
        "",
        &fx.config,
    );
    assert_eq!(out.exit_code, 1);
    assert!(out.stderr.contains("does not exist"), "stderr: {}", out.stderr);
}

#[test]
fn missing_flag_prints_usage() {
    let fx = Fixture::new();
    let out = run_annotate_for_test(&["--input_file", &fx.input], "", &fx.config);
    assert_eq!(out.exit_code, 1);
    assert!(out
        .stderr
        .starts_with("Error: required flag --output_file not set\n"));
    assert!(out.stderr.contains("Usage:"));
}

#[test]
fn help_exits_zero() {
    let fx = Fixture::new();
    let out = run_annotate_for_test(&["--help"], "", &fx.config);
    assert_eq!(out.exit_code, 0);
    assert!(out
        .stdout
        .contains("stance-annotate --input_file <path> --output_file <path>"));
}

#[test]
fn session_log_records_decisions() {
    let mut fx = Fixture::new();
    let log_path = fx.root.join("logs/annotate.log");
    fx.config.logging.file = Some(log_path.clone());
    let out = fx.run("1\n\n2\nbetter\n1\n\n\n");
    assert_eq!(out.exit_code, 0, "stderr: {}", out.stderr);

    let log = std::fs::read_to_string(&log_path).expect("read log");
    assert_eq!(log.matches("\"type\":\"decision_committed\"").count(), 2);
    assert!(log.contains("\"type\":\"session_started\""));
    assert!(log.contains("\"type\":\"session_completed\""));
    assert!(!log.contains("table_written"), "debug events filtered at info");
}
