//! `stance-annotate`: review each transformation and optionally suggest a
//! better one.

use std::io::{self, BufRead, Write};

use serde_json::json;
use stance_core::annotation::{
    Acceptability, AnnotationDecision, AnnotationForm, AnnotationSession, Ease, MODE,
};
use stance_core::config::Config;
use stance_core::loader::load_table;
use stance_core::log_io::{
    LogLevel, EVENT_DECISION_COMMITTED, EVENT_SESSION_CLOSED, EVENT_SESSION_COMPLETED,
    EVENT_SESSION_STARTED, EVENT_TABLE_WRITTEN,
};
use stance_core::store::{OutputStore, UploadSink};

use crate::args::{parse_session_args, ParsedArgs, SessionArgs};
use crate::completion::{annotation_screen, collect_uploads};
use crate::prompt::Prompter;
use crate::{version_line, Journal};

const COMMAND: &str = "stance-annotate";

const ACCEPTABLE_QUESTION: &str = "Does the transformation reflect the opposite stance?";
const SUGGESTION_QUESTION: &str = "Suggest a better transformation:";
const EASE_QUESTION: &str = "Was the transformation easy to produce?";

pub fn run_annotate(
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
    match execute(&session_args, config, &mut prompter, &mut journal) {
        Ok(()) => 0,
        Err(message) => {
            journal.error(&message);
            1
        }
    }
}

fn execute(
    args: &SessionArgs,
    config: &Config,
    prompter: &mut Prompter<'_>,
    journal: &mut Journal<'_>,
) -> Result<(), String> {
    let table = load_table(&args.input_file).map_err(|e| e.to_string())?;
    let mut session = AnnotationSession::open(table, OutputStore::new(&args.output_file))
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
        session = session.submit(&decision).map_err(|e| e.to_string())?;

        let committed = journal
            .event(EVENT_DECISION_COMMITTED)
            .at(cursor)
            .with_data(decision_payload(&decision));
        journal.info(committed);
        let written = journal
            .event(EVENT_TABLE_WRITTEN)
            .at(cursor)
            .with_data(json!({ "rows": session.len() }));
        journal.record(LogLevel::Debug, written);
    }

    let screen = annotation_screen(&session.summary(), session.store().path()).map_err(io_error)?;
    prompter.say(&screen).map_err(io_error)?;
    let completed = journal
        .event(EVENT_SESSION_COMPLETED)
        .with_data(json!({ "records": session.len() }));
    journal.info(completed);

    collect_uploads(prompter, &UploadSink::new(&config.upload_dir), journal).map_err(io_error)?;
    Ok(())
}

/// Walk the per-record form. `None` means input ended mid-form.
fn fill_form(prompter: &mut Prompter<'_>) -> io::Result<Option<AnnotationDecision>> {
    let Some(choice) = prompter.choose(ACCEPTABLE_QUESTION, &Acceptability::OPTIONS)? else {
        return Ok(None);
    };
    let mut form = AnnotationForm::new().choose(choice);
    if form.shows_suggestion() {
        let Some(text) = prompter.text(SUGGESTION_QUESTION)? else {
            return Ok(None);
        };
        form = form.suggest(&text);
    }
    if form.shows_ease() {
        let Some(ease) = prompter.choose(EASE_QUESTION, &Ease::OPTIONS)? else {
            return Ok(None);
        };
        form = form.rate_ease(ease);
    }
    Ok(form.decision())
}

fn decision_payload(decision: &AnnotationDecision) -> serde_json::Value {
    match decision {
        AnnotationDecision::Accept => json!({ "acceptable": "Yes" }),
        AnnotationDecision::Reject { suggestion, easy } => json!({
            "acceptable": "No",
            "suggestion": suggestion,
            "easy": easy.map(Ease::as_str),
        }),
    }
}

fn close(session: &AnnotationSession, journal: &mut Journal<'_>) {
    journal.notice(&format!(
        "Session closed at record {} of {}; submitted responses are saved in {}",
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
Review machine-generated stance transformations one record at a time.

Usage:
  stance-annotate --input_file <path> --output_file <path>

Flags:
      --input_file string    Path to the CSV file containing sentences for annotation
      --output_file string   Path to save the annotated sentences
  -h, --help                 help for stance-annotate
      --version              version for stance-annotate

The output file is rewritten after every submitted response.
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_for_rejection_includes_text_and_ease() {
        let payload = decision_payload(&AnnotationDecision::Reject {
            suggestion: "s".into(),
            easy: Some(Ease::Yes),
        });
        assert_eq!(payload["acceptable"], "No");
        assert_eq!(payload["suggestion"], "s");
        assert_eq!(payload["easy"], "Yes");
    }

    #[test]
    fn payload_for_acceptance_is_minimal() {
        let payload = decision_payload(&AnnotationDecision::Accept);
        assert_eq!(payload, json!({ "acceptable": "Yes" }));
    }
}
