#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;

use stance_cli::run_verify_for_test;
use stance_core::config::{Config, LoggingConfig};
use stance_core::loader::load_table;

const INPUT: &str = "id,target,comment,label,transformation,language,dataset,acceptable,suggestion,easy\n\
101,Is coffee healthy?,Coffee is great,FAVOR,Coffee is bad,en,stance-en,Yes,,\n\
102,Ban cars?,Cars ruin cities,FAVOR,Cars are fine,en,stance-en,No,Cities need cars,Yes\n\
103,Tax sugar?,Sugar tax works,FAVOR,Sugar tax helps,fr,stance-fr,No,Sugar tax fails,No\n";

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
        let input = root.join("uploads/0_annotated.csv");
        std::fs::create_dir_all(input.parent().expect("parent")).expect("mkdir");
        std::fs::write(&input, INPUT).expect("seed input");
        let config = Config {
            upload_dir: root.join("uploads"),
            logging: LoggingConfig::default(),
        };
        Self {
            input: input.to_string_lossy().into_owned(),
            output: root
                .join("verified_annotations/0_verified.csv")
                .to_string_lossy()
                .into_owned(),
            _dir: dir,
            root,
            config,
        }
    }

    fn run(&self, stdin: &str) -> stance_cli::CommandOutput {
        run_verify_for_test(
            &[
                "--",
                "--input_file",
                &self.input,
                "--output_file",
                &self.output,
            ],
            stdin,
            &self.config,
        )
    }
}

#[test]
fn full_pass_keeps_chosen_transformations_and_drops_discards() {
    let fx = Fixture::new();
    // 101: default keep=No. 102: keep, Annotator. 103: keep, Neither + text.
    let out = fx.run("\n\n2\n2\n\nyes\nneither\nSugar taxes backfire\n\n");
    assert_eq!(out.exit_code, 0, "stderr: {}", out.stderr);
    assert!(out.stderr.is_empty(), "stderr: {}", out.stderr);

    let text = std::fs::read_to_string(&fx.output).expect("read output");
    assert_eq!(
        text,
        "id,target,comment,label,language,dataset,transformation\n\
         102,Ban cars?,Cars ruin cities,FAVOR,en,stance-en,Cities need cars\n\
         103,Tax sugar?,Sugar tax works,FAVOR,fr,stance-fr,Sugar taxes backfire\n"
    );
    assert!(out.stdout.contains("Verification complete!"));
    assert!(out.stdout.contains("Decision: discard this example"));
    assert!(out
        .stdout
        .contains("Decision: keep with the Annotator transformation"));
}

#[test]
fn record_page_shows_progress_and_difficulty() {
    let fx = Fixture::new();
    let out = fx.run("\n\n2\n1\n\n");
    assert_eq!(out.exit_code, 0);
    assert!(out.stdout.contains("== 1 / 3 =="));
    assert!(out.stdout.contains("== 2 / 3 =="));
    assert!(out.stdout.contains("Annotator Suggestion"));
    assert!(out.stdout.contains("| Not specified"));
    assert!(out.stdout.contains("| Low"));
}

#[test]
fn discard_then_model_lands_on_matching_id() {
    let fx = Fixture::new();
    let out = fx.run("1\n\n2\nmodel\n\n");
    assert_eq!(out.exit_code, 0);
    assert!(out.stderr.contains("Session closed at record 3 of 3"));

    let table = load_table(&fx.output).expect("reload");
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(0, "id"), Some("102"));
    assert_eq!(table.get(0, "transformation"), Some("Cars are fine"));
    assert_eq!(table.get(1, "id"), Some("103"));
    assert_eq!(table.get(1, "transformation"), None);
}

#[test]
fn output_directory_is_created_up_front() {
    let fx = Fixture::new();
    let out = fx.run("");
    assert_eq!(out.exit_code, 0);
    assert!(fx.root.join("verified_annotations").is_dir());
}

#[test]
fn missing_columns_fail_at_startup() {
    let fx = Fixture::new();
    let bad = fx.root.join("plain.csv");
    std::fs::write(&bad, "target,comment,label,transformation\nq,c,l,t\n").expect("seed");
    let out = run_verify_for_test(
        &[
            "--input_file",
            &bad.to_string_lossy(),
            "--output_file",
            &fx.output,
        ],
        "",
        &fx.config,
    );
    assert_eq!(out.exit_code, 1);
    assert_eq!(
        out.stderr,
        "Error: input table is missing required column \"id\"\n"
    );
}

#[test]
fn version_flag_names_command() {
    let fx = Fixture::new();
    let out = run_verify_for_test(&["--version"], "", &fx.config);
    assert_eq!(out.exit_code, 0);
    assert!(out.stdout.starts_with("stance-verify version "));
}
