//! End-to-end tests running the quizctl binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("quizctl-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        path
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

fn quizctl(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_quizctl"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run quizctl")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

const QUIZ: &str = r#"{
  "title": "Entra",
  "writeup": "",
  "source": "entra.tsv",
  "anki": [
    {"level": "Intermediate", "front": "What is the Graph UserInfo endpoint scope?", "back": "openid", "tags": []},
    {"level": "Intermediate", "front": "What is MSAL?", "back": "A library", "tags": ["msal"]}
  ],
  "cloze": [
    {"level": "Beginner", "question": "What is the Graph UserInfo endpoint scope?"}
  ]
}"#;

#[test]
fn convert_example_export() {
    let ws = Workspace::new();
    let input = ws.write("anki-entra.tsv", "Front\tBack\tTags\nQ1\tA1\ttag1 tag2\nQ2\tA2\t\n");
    let output = ws.path("quizzes/entra.json");

    let out = quizctl(&["convert", "-i", arg(&input), "-o", arg(&output), "--title", "Entra ID"]);

    assert!(out.status.success());
    assert!(stdout(&out).starts_with("Wrote "));
    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        doc,
        serde_json::json!({
            "title": "Entra ID",
            "writeup": "",
            "source": "anki-entra.tsv",
            "anki": [
                {"level": "Intermediate", "front": "Q1", "back": "A1", "tags": ["tag1", "tag2"]},
                {"level": "Intermediate", "front": "Q2", "back": "A2", "tags": []}
            ]
        })
    );
}

#[test]
fn convert_missing_input_fails() {
    let ws = Workspace::new();
    let output = ws.path("out.json");

    let out = quizctl(&["convert", "-i", arg(&ws.path("absent.tsv")), "-o", arg(&output)]);

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("file not found"));
    assert!(!output.exists());
}

#[test]
fn convert_empty_input_fails() {
    let ws = Workspace::new();
    let input = ws.write("empty.tsv", "");
    let output = ws.path("out.json");

    let out = quizctl(&["convert", "-i", arg(&input), "-o", arg(&output)]);

    assert!(!out.status.success());
    assert!(!output.exists());
}

#[test]
fn remove_reports_combined_count() {
    let ws = Workspace::new();
    let file = ws.write("entra.json", QUIZ);

    let out = quizctl(&[
        "remove",
        "-f",
        arg(&file),
        "--front",
        "What is the Graph UserInfo endpoint scope?",
    ]);

    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "Removed 2 card(s) matching front: What is the Graph UserInfo endpoint scope?\n"
    );
    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(doc["anki"].as_array().unwrap().len(), 1);
    assert_eq!(doc["cloze"], serde_json::json!([]));
}

#[test]
fn remove_without_match_leaves_file() {
    let ws = Workspace::new();
    let file = ws.write("entra.json", QUIZ);

    let out = quizctl(&["remove", "-f", arg(&file), "--front", "Nope", "--backup"]);

    assert!(out.status.success());
    assert_eq!(stdout(&out), "No matching card found for front: Nope\n");
    assert_eq!(fs::read_to_string(&file).unwrap(), QUIZ);
    assert!(!ws.path("entra.json.bak").exists());
}

#[test]
fn remove_missing_file_fails() {
    let ws = Workspace::new();
    let out = quizctl(&["remove", "-f", arg(&ws.path("absent.json")), "--front", "Q"]);
    assert!(!out.status.success());
}

#[test]
fn set_field_resets_levels_with_backup() {
    let ws = Workspace::new();
    let file = ws.write("entra.json", QUIZ);

    let out = quizctl(&["set-field", "-f", arg(&file), "--backup", "--backup-suffix", ".bak2"]);

    assert!(out.status.success());
    assert!(stdout(&out).contains("Updated level to None on 3 record(s)"));
    assert_eq!(fs::read_to_string(ws.path("entra.json.bak2")).unwrap(), QUIZ);
    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(doc["anki"][1]["level"], "None");
    assert_eq!(doc["cloze"][0]["level"], "None");

    let again = quizctl(&["set-field", "-f", arg(&file)]);
    assert!(again.status.success());
    assert!(stdout(&again).starts_with("No changes"));
}

#[test]
fn set_field_limited_to_named_array() {
    let ws = Workspace::new();
    let file = ws.write("entra.json", QUIZ);

    let out = quizctl(&["set-field", "-f", arg(&file), "--array", "cloze", "--value", "Advanced"]);

    assert!(out.status.success());
    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(doc["cloze"][0]["level"], "Advanced");
    assert_eq!(doc["anki"][0]["level"], "Intermediate");
}

#[test]
fn stats_lists_levels() {
    let ws = Workspace::new();
    let file = ws.write("entra.json", QUIZ);

    let out = quizctl(&["stats", "-f", arg(&file)]);

    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "anki: 2 record(s) [Intermediate=2]\ncloze: 1 record(s) [Beginner=1]\n"
    );
}

#[test]
fn convert_header_only_writes_empty_deck() {
    let ws = Workspace::new();
    let input = ws.write("header.tsv", "Front\tBack\tTags\n");
    let output = ws.path("out.json");

    let out = quizctl(&["convert", "-i", arg(&input), "-o", arg(&output)]);

    assert!(out.status.success());
    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(doc["anki"], serde_json::json!([]));
}

#[test]
fn repeated_array_flag_counts_records_once() {
    let ws = Workspace::new();
    let file = ws.write("entra.json", QUIZ);

    let out = quizctl(&[
        "set-field", "-f", arg(&file), "--array", "anki", "--array", "anki", "--value", "Intermediate",
    ]);

    assert!(out.status.success());
    assert!(stdout(&out).starts_with("No changes: level already Intermediate on all 2 record(s)"));
}
