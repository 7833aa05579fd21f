//! Terminal screens shown once every record has been submitted.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::json;
use stance_core::annotation::AnnotationSummary;
use stance_core::log_io::EVENT_UPLOAD_SAVED;
use stance_core::store::UploadSink;
use stance_core::verification::VerificationSummary;
use tabwriter::TabWriter;

use crate::prompt::Prompter;
use crate::Journal;

fn render_counts(rows: &[(&str, usize)]) -> io::Result<String> {
    let mut tw = TabWriter::new(Vec::new()).padding(2);
    writeln!(tw, "DECISION\tRECORDS")?;
    for (name, count) in rows {
        writeln!(tw, "{name}\t{count}")?;
    }
    tw.flush()?;
    let bytes = tw
        .into_inner()
        .map_err(|_| io::Error::other("failed to render table"))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn annotation_screen(summary: &AnnotationSummary, output: &Path) -> io::Result<String> {
    let mut out = String::from("\nAnnotation complete!\n\n");
    out.push_str(&render_counts(&[
        ("Acceptable", summary.accepted),
        ("Not acceptable", summary.rejected),
    ])?);
    out.push_str(&format!("\nResponses saved to {}\n", output.display()));
    Ok(out)
}

pub fn verification_screen(summary: &VerificationSummary, output: &Path) -> io::Result<String> {
    let mut out = String::from("\nVerification complete!\n\n");
    out.push_str(&render_counts(&[
        ("Kept", summary.kept),
        ("Discarded", summary.discarded),
    ])?);
    out.push_str(&format!(
        "\nVerified transformations saved to {}\n",
        output.display()
    ));
    Ok(out)
}

/// Offer uploads until the user enters an empty path or input ends.
/// Returns the saved destinations.
pub(crate) fn collect_uploads(
    prompter: &mut Prompter<'_>,
    sink: &UploadSink,
    journal: &mut Journal<'_>,
) -> io::Result<Vec<PathBuf>> {
    let mut saved = Vec::new();
    loop {
        let Some(answer) =
            prompter.text("Upload the annotated file (path, leave empty to finish):")?
        else {
            return Ok(saved);
        };
        let path = answer.trim();
        if path.is_empty() {
            return Ok(saved);
        }
        match sink.save_file(Path::new(path)) {
            Ok(dest) => {
                prompter.say(&format!("File saved to {}\n", dest.display()))?;
                let event = journal
                    .event(EVENT_UPLOAD_SAVED)
                    .with_data(json!({ "path": dest.display().to_string() }));
                journal.info(event);
                saved.push(dest);
            }
            Err(err) => journal.error(&err.to_string()),
        }
    }
}
