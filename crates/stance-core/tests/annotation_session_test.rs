#![allow(clippy::expect_used, clippy::unwrap_used)]

use stance_core::annotation::{AnnotationDecision, AnnotationSession, Ease};
use stance_core::error::SessionError;
use stance_core::loader::load_table;
use stance_core::store::OutputStore;
use stance_core::table::Table;

const INPUT: &str = "target,comment,label,transformation,language\n\
Is coffee healthy?,Coffee is great for you,FAVOR,Coffee is bad for you,en\n\
Should cities ban cars?,Cars ruin cities,FAVOR,Cars make cities work,en\n";

fn open(dir: &std::path::Path) -> AnnotationSession {
    let input = dir.join("in.csv");
    std::fs::write(&input, INPUT).expect("seed input");
    let table = load_table(&input.to_string_lossy()).expect("load");
    AnnotationSession::open(table, OutputStore::new(dir.join("out/annotated.csv")))
        .expect("open session")
}

fn reload(dir: &std::path::Path) -> Table {
    load_table(&dir.join("out/annotated.csv").to_string_lossy()).expect("reload output")
}

#[test]
fn open_appends_annotation_columns_and_prepares_output_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let session = open(dir.path());
    assert_eq!(
        session.table().columns(),
        [
            "target",
            "comment",
            "label",
            "transformation",
            "language",
            "acceptable",
            "suggestion",
            "easy"
        ]
    );
    assert!(dir.path().join("out").is_dir());
    assert_eq!(session.cursor(), 0);
    assert!(!session.is_complete());
}

#[test]
fn two_row_scenario_writes_expected_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let session = open(dir.path());

    let session = session
        .submit(&AnnotationDecision::Accept)
        .expect("submit row 0");
    assert_eq!(session.cursor(), 1);
    assert_eq!(reload(dir.path()).len(), 2);

    let session = session
        .submit(&AnnotationDecision::Reject {
            suggestion: "flipped statement".into(),
            easy: Some(Ease::No),
        })
        .expect("submit row 1");
    assert!(session.is_complete());

    let out = reload(dir.path());
    assert_eq!(out.len(), 2);
    assert_eq!(out.get(0, "acceptable"), Some("Yes"));
    assert_eq!(out.get(0, "suggestion"), None);
    assert_eq!(out.get(0, "easy"), None);
    assert_eq!(out.get(1, "acceptable"), Some("No"));
    assert_eq!(out.get(1, "suggestion"), Some("flipped statement"));
    assert_eq!(out.get(1, "easy"), Some("No"));

    let summary = session.summary();
    assert_eq!((summary.accepted, summary.rejected, summary.pending), (1, 1, 0));
}

#[test]
fn rejected_rows_always_hold_a_suggestion_string() {
    let dir = tempfile::tempdir().expect("tempdir");
    let session = open(dir.path())
        .submit(&AnnotationDecision::Reject {
            suggestion: String::new(),
            easy: Some(Ease::Yes),
        })
        .expect("submit")
        .submit(&AnnotationDecision::Accept)
        .expect("submit");

    let table = session.table();
    assert_eq!(table.get(0, "acceptable"), Some("No"));
    assert_eq!(table.row(0).expect("row")[6], Some(String::new()));
    assert_eq!(table.get(0, "easy"), None);
    assert_eq!(table.row(1).expect("row")[6], None);
}

#[test]
fn every_row_ends_with_yes_or_no() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = open(dir.path());
    let mut flip = false;
    while !session.is_complete() {
        let decision = if flip {
            AnnotationDecision::Reject {
                suggestion: "x".into(),
                easy: None,
            }
        } else {
            AnnotationDecision::Accept
        };
        session = session.submit(&decision).expect("submit");
        flip = !flip;
    }
    let out = reload(dir.path());
    assert_eq!(out.len(), session.len());
    for row in 0..out.len() {
        assert!(matches!(out.get(row, "acceptable"), Some("Yes") | Some("No")));
    }
}

#[test]
fn resubmitting_same_decision_is_byte_identical() {
    let dir = tempfile::tempdir().expect("tempdir");
    let session = open(dir.path());
    let decision = AnnotationDecision::Reject {
        suggestion: "flipped, with a comma".into(),
        easy: Some(Ease::Yes),
    };
    let out_path = dir.path().join("out/annotated.csv");

    session.clone().submit(&decision).expect("first");
    let first = std::fs::read(&out_path).expect("read first");
    session.submit(&decision).expect("second");
    let second = std::fs::read(&out_path).expect("read second");
    assert_eq!(first, second);
}

#[test]
fn submit_leaves_retained_clone_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let before = open(dir.path());
    let after = before
        .clone()
        .submit(&AnnotationDecision::Accept)
        .expect("submit");
    assert_eq!(before.cursor(), 0);
    assert_eq!(before.table().get(0, "acceptable"), None);
    assert_eq!(after.table().get(0, "acceptable"), Some("Yes"));
}

#[test]
fn submit_past_end_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let done = open(dir.path())
        .submit(&AnnotationDecision::Accept)
        .and_then(|s| s.submit(&AnnotationDecision::Accept))
        .expect("finish");
    let err = done
        .submit(&AnnotationDecision::Accept)
        .expect_err("should fail");
    assert!(matches!(err, SessionError::Complete(2)));
}

#[test]
fn missing_required_column_fails_at_open() {
    let table = Table::from_reader("target,comment,label\nq,c,FAVOR\n".as_bytes()).expect("parse");
    let err = AnnotationSession::open(table, OutputStore::new("unused.csv")).expect_err("fail");
    assert!(matches!(err, SessionError::MissingColumn(ref c) if c == "transformation"));
}

#[test]
fn existing_annotation_columns_are_reused() {
    let csv = "target,comment,label,transformation,acceptable,suggestion\nq,c,FAVOR,t,Yes,\n";
    let table = Table::from_reader(csv.as_bytes()).expect("parse");
    let dir = tempfile::tempdir().expect("tempdir");
    let session =
        AnnotationSession::open(table, OutputStore::new(dir.path().join("o.csv"))).expect("open");
    assert_eq!(session.table().columns().len(), 7);
    assert_eq!(session.table().get(0, "acceptable"), Some("Yes"));
}
