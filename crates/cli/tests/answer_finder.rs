use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const CORPUS: &str = "\
id,text
1,Court fees are paid online. Say hi to the registry clerk.
2,Bail applications are heard on Monday.
3,
";

#[allow(deprecated)]
fn cli() -> Command {
    let mut cmd = Command::cargo_bin("answer-finder").expect("binary");
    cmd.env_remove("ANSWER_FINDER_CONFIG")
        .env_remove("ANSWER_FINDER_MODE")
        .env("RUST_LOG", "warn");
    cmd
}

fn write_corpus(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("qa.csv");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

fn ask_json(path: &Path, extra: &[&str], query: &str) -> Value {
    let output = cli()
        .args(extra)
        .arg("ask")
        .arg("--corpus")
        .arg(path)
        .arg("--json")
        .arg(query)
        .output()
        .expect("command run");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn ask_prints_matching_sentence() {
    let (_dir, path) = write_corpus(CORPUS);
    cli()
        .arg("ask")
        .arg("--corpus")
        .arg(&path)
        .args(["court", "fee"])
        .assert()
        .success()
        .stdout("Court fees are paid online.\n");
}

#[test]
fn ask_greeting_uses_canned_reply() {
    let (_dir, path) = write_corpus(CORPUS);
    cli()
        .arg("ask")
        .arg("--corpus")
        .arg(&path)
        .arg("  Hi ")
        .assert()
        .success()
        .stdout("Hello! How can I assist you today?\n");
}

#[test]
fn ask_without_text_column_reports_schema_error() {
    let (_dir, path) = write_corpus("id,body\n1,Court fees are paid online.\n");
    cli()
        .arg("ask")
        .arg("--corpus")
        .arg(&path)
        .arg("court fee")
        .assert()
        .success()
        .stdout("The CSV file must contain a 'text' column.\n");
}

#[test]
fn ask_missing_file_reports_not_found() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.csv");
    cli()
        .arg("ask")
        .arg("--corpus")
        .arg(&path)
        .arg("court fee")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("File not found:"));
}

#[test]
fn ask_no_match_message() {
    let (_dir, path) = write_corpus(CORPUS);
    cli()
        .arg("ask")
        .arg("--corpus")
        .arg(&path)
        .arg("xylophone quartet")
        .assert()
        .success()
        .stdout("No relevant results found.\n");
}

#[test]
fn ask_json_reports_tier_per_mode() {
    let (_dir, path) = write_corpus(CORPUS);

    let body = ask_json(&path, &["--mode", "lexical"], "court fees online");
    assert_eq!(body["kind"], "no_match");

    let body = ask_json(&path, &["--mode", "fuzzy_vector"], "court fees online");
    assert_eq!(body["kind"], "found");
    assert_eq!(body["tier"], "vector");
    assert_eq!(body["matches"][0]["text"], "Court fees are paid online.");
    assert_eq!(body["matches"][0]["document_id"], 0);

    let body = ask_json(&path, &["--mode", "tiered"], "court fee");
    assert_eq!(body["tier"], "exact");
}

#[test]
fn mode_env_is_overridden_by_flag() {
    let (_dir, path) = write_corpus(CORPUS);

    let output = cli()
        .env("ANSWER_FINDER_MODE", "lexical")
        .args(["ask", "--json", "--corpus"])
        .arg(&path)
        .arg("court fees online")
        .output()
        .unwrap();
    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["kind"], "no_match");

    let output = cli()
        .env("ANSWER_FINDER_MODE", "lexical")
        .args(["--mode", "tiered", "ask", "--json", "--corpus"])
        .arg(&path)
        .arg("court fees online")
        .output()
        .unwrap();
    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["kind"], "found");
}

#[test]
fn config_file_sets_text_column() {
    let (dir, path) = write_corpus("id,body\n1,Bail applications are heard on Monday.\n");
    let config = dir.path().join("answer.toml");
    fs::write(&config, "text_column = \"body\"\nmode = \"tiered\"\n").unwrap();

    cli()
        .arg("--config")
        .arg(&config)
        .args(["ask", "--corpus"])
        .arg(&path)
        .arg("bail applications")
        .assert()
        .success()
        .stdout("Bail applications are heard on Monday.\n");
}

#[test]
fn invalid_mode_fails() {
    let (_dir, path) = write_corpus(CORPUS);
    cli()
        .args(["--mode", "magic", "ask", "--corpus"])
        .arg(&path)
        .arg("court")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --mode"));
}

#[test]
fn sentences_lists_corpus_in_order() {
    let (_dir, path) = write_corpus(CORPUS);
    cli()
        .arg("sentences")
        .arg("--corpus")
        .arg(&path)
        .assert()
        .success()
        .stdout(
            "Court fees are paid online.\nSay hi to the registry clerk.\nBail applications are heard on Monday.\n",
        );
}

#[test]
fn sentences_json_carries_normalized_text() {
    let (_dir, path) = write_corpus(CORPUS);
    let output = cli()
        .args(["sentences", "--json", "--corpus"])
        .arg(&path)
        .output()
        .unwrap();
    let body: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(body.as_array().map(Vec::len), Some(3));
    assert_eq!(body[2]["document_id"], 1);
    assert_eq!(body[2]["raw"], "Bail applications are heard on Monday.");
}

#[test]
fn correct_keeps_token_count() {
    cli()
        .args(["correct", "the", "cuort", "2024"])
        .assert()
        .success()
        .stdout("the court 2024\n");
}

#[test]
fn chat_session_over_stdin() {
    let (_dir, path) = write_corpus(CORPUS);
    cli()
        .arg("chat")
        .arg("--corpus")
        .arg(&path)
        .write_stdin("hello\n\ncourt fee\n/history\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hi there! How can I help you?"))
        .stdout(predicate::str::contains(
            "You: court fee\nBot: Court fees are paid online.",
        ));
}
