//! `stance-verify`: choose the final transformation for each annotated
//! record, or discard it.

use std::io::{self, BufRead, Write};

use serde_json::json;
use stance_core::config::Config;
use stance_core::loader::load_table;
use stance_core::log_io::{
    LogLevel, EVENT_DECISION_COMMITTED, EVENT_SESSION_CLOSED, EVENT_SESSION_COMPLETED,
    EVENT_SESSION_STARTED, EVENT_TABLE_WRITTEN,
};
use stance_core::store::OutputStore;
use stance_core::verification::{
    Keep, TransformationChoice, TransformationSource, VerificationDecision, VerificationForm,
    VerificationSession, MODE,
};

use crate::args::{parse_session_args, ParsedArgs, SessionArgs};
use crate::completion::verification_screen;
use crate::prompt::Prompter;
use crate::{version_line, Journal};

const COMMAND: &str = "stance-verify";

const KEEP_QUESTION: &str = "Do you want to keep this example?";
const SOURCE_QUESTION: &str = "Which transformation do you want to keep?";
const CUSTOM_QUESTION: &str = "Suggest a better transformation:";

pub fn run_verify(
    args: &[String],
    config: &Config,
    stdin: &mut dyn BufRead,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> i32 {
    let session_args = match parse_session_args(args) {
        Ok(ParsedArgs::Run(parsed)) => parsed,
        Ok(ParsedArgs::Help) => {
            let _ = stdout.write_all(HELP_TEXT.as_bytes());
            return 0;
        }
        Ok(ParsedArgs::Version) => {
            let _ = stdout.write_all(version_line(COMMAND).as_bytes());
            return 0;
        }
        Err(err) => {
            let _ = write!(stderr, "Error: {err}\n\n{HELP_TEXT}");
            return 1;
        }
    };

    let mut journal = Journal::open(config, MODE, stderr);
    let mut prompter = Prompter::new(stdin, stdout);
    match execute(&session_args, &mut prompter, &mut journal) {
        Ok(()) => 0,
        Err(message) => {
            journal.error(&message);
            1
        }
    }
}

fn execute(
    args: &SessionArgs,
    prompter: &mut Prompter<'_>,
    journal: &mut Journal<'_>,
) -> Result<(), String> {
    let table = load_table(&args.input_file).map_err(|e| e.to_string())?;
    let mut session = VerificationSession::open(table, OutputStore::new(&args.output_file))
        .map_err(|e| e.to_string())?;

    let started = journal.event(EVENT_SESSION_STARTED).with_data(json!({
        "input_file": args.input_file,
        "output_file": args.output_file,
        "records": session.len(),
    }));
    journal.info(started);

    if session.is_empty() {
        session.flush().map_err(|e| e.to_string())?;
    }

    while let Some(view) = session.current_view() {
        prompter.say(&view.render()).map_err(io_error)?;

        let Some(decision) = fill_form(prompter).map_err(io_error)? else {
            close(&session, journal);
            return Ok(());
        };
        prompter
            .say(&format!("\nDecision: {}\n", describe(&decision)))
            .map_err(io_error)?;
        match prompter.confirm("Submit response?", true).map_err(io_error)? {
            None => {
                close(&session, journal);
                return Ok(());
            }
            Some(false) => {
                prompter
                    .say("Response discarded; showing the record again.\n\n")
                    .map_err(io_error)?;
                continue;
            }
            Some(true) => {}
        }

        let cursor = session.cursor();
        let transformation = match &decision {
            VerificationDecision::Keep(choice) => session.resolve(choice),
            VerificationDecision::Discard => None,
        };
        session = session.submit(&decision).map_err(|e| e.to_string())?;

        let committed = journal.event(EVENT_DECISION_COMMITTED).at(cursor).with_data(json!({
            "keep": matches!(decision, VerificationDecision::Keep(_)),
            "source": source_name(&decision),
            "transformation": transformation,
        }));
        journal.info(committed);
        let written = journal
            .event(EVENT_TABLE_WRITTEN)
            .at(cursor)
            .with_data(json!({ "rows": session.output().len() }));
        journal.record(LogLevel::Debug, written);
    }

    let screen =
        verification_screen(&session.summary(), session.store().path()).map_err(io_error)?;
    prompter.say(&screen).map_err(io_error)?;
    let summary = session.summary();
    let completed = journal.event(EVENT_SESSION_COMPLETED).with_data(json!({
        "kept": summary.kept,
        "discarded": summary.discarded,
    }));
    journal.info(completed);
    Ok(())
}

/// Walk the per-record form. `None` means input ended mid-form.
fn fill_form(prompter: &mut Prompter<'_>) -> io::Result<Option<VerificationDecision>> {
    let Some(keep) = prompter.choose(KEEP_QUESTION, &Keep::OPTIONS)? else {
        return Ok(None);
    };
    let mut form = VerificationForm::new().choose_keep(keep);
    if form.shows_sources() {
        let Some(source) = prompter.choose(SOURCE_QUESTION, &TransformationSource::OPTIONS)?
        else {
            return Ok(None);
        };
        form = form.choose_source(source);
    }
    if form.shows_custom() {
        let Some(text) = prompter.text(CUSTOM_QUESTION)? else {
            return Ok(None);
        };
        form = form.write_custom(&text);
    }
    Ok(form.decision())
}

fn source_name(decision: &VerificationDecision) -> Option<&'static str> {
    match decision {
        VerificationDecision::Discard => None,
        VerificationDecision::Keep(TransformationChoice::Model) => {
            Some(TransformationSource::Model.as_str())
        }
        VerificationDecision::Keep(TransformationChoice::Annotator) => {
            Some(TransformationSource::Annotator.as_str())
        }
        VerificationDecision::Keep(TransformationChoice::Custom(_)) => {
            Some(TransformationSource::Neither.as_str())
        }
    }
}

fn describe(decision: &VerificationDecision) -> String {
    match source_name(decision) {
        None => "discard this example".to_string(),
        Some(source) => format!("keep with the {source} transformation"),
    }
}

fn close(session: &VerificationSession, journal: &mut Journal<'_>) {
    journal.notice(&format!(
        "Session closed at record {} of {}; submitted decisions are saved in {}",
        session.cursor() + 1,
        session.len(),
        session.store().path().display()
    ));
    let event = journal.event(EVENT_SESSION_CLOSED).at(session.cursor());
    journal.info(event);
}

fn io_error(err: io::Error) -> String {
    format!("terminal io: {err}")
}

const HELP_TEXT: &str = "\
Verify annotated stance transformations and build the final dataset.

Usage:
  stance-verify --input_file <path> --output_file <path>

Flags:
      --input_file string    Path to the annotated CSV file
      --output_file string   Path to save the final verified transformations
  -h, --help                 help for stance-verify
      --version              version for stance-verify

The output file is rewritten after every submitted decision. Discarded
examples are left out of it.
";
