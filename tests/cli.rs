use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn jsdecls() -> Command {
    Command::new(env!("CARGO_BIN_EXE_jsdecls"))
}

fn sample(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_samples")
        .join(name)
}

fn run(args: &[&str], file: &Path) -> Output {
    jsdecls()
        .args(args)
        .arg(file)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn prints_json_array_on_one_line() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("two.js");
    fs::write(&file, "function foo(){} function bar(){}").unwrap();

    let output = run(&[], &file);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "[\"foo\",\"bar\"]\n");
    assert!(output.stderr.is_empty(), "stderr: {:?}", output.stderr);
}

#[test]
fn empty_file_prints_empty_array() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("empty.js");
    fs::write(&file, "const x = 1;\n").unwrap();

    let output = run(&[], &file);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "[]\n");
}

#[test]
fn jsx_file() {
    let output = run(&[], &sample("components.jsx"));
    assert!(output.status.success());
    assert_eq!(stdout(&output), "[\"Header\",\"App\",\"handleClick\"]\n");
}

#[test]
fn missing_file_exits_with_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(&[], &temp_dir.path().join("nope.js"));

    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"), "stderr: {}", stderr);
}

#[test]
fn syntax_error_exits_with_parse_error() {
    let output = run(&[], &sample("invalid.js"));

    assert_eq!(output.status.code(), Some(4));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("syntax error"), "stderr: {}", stderr);
}

#[test]
fn anonymous_default_exits_with_extraction_error() {
    let output = run(&[], &sample("anonymous_default.js"));

    assert_eq!(output.status.code(), Some(5));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("3:16"), "stderr: {}", stderr);
}

#[test]
fn no_jsx_flag_rejects_jsx() {
    let output = run(&["--no-jsx"], &sample("components.jsx"));
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn typescript_detected_from_extension() {
    let output = run(&[], &sample("overloads.ts"));
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout(&output), "[\"parse\",\"helper\"]\n");
}

#[test]
fn language_flag_overrides_extension() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("typed.js");
    fs::write(&file, "function typed(a: number) { return a; }").unwrap();

    assert_eq!(run(&[], &file).status.code(), Some(4));

    let output = run(&["--language", "typescript"], &file);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "[\"typed\"]\n");
}

#[test]
fn unknown_extension_warns_once() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("widget.es");
    fs::write(&file, "function widget() {}").unwrap();

    let output = run(&[], &file);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "[\"widget\"]\n");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("parsing as JavaScript").count(), 1, "stderr: {}", stderr);

    let output = run(&["--language", "javascript"], &file);
    assert!(output.stderr.is_empty(), "stderr: {:?}", output.stderr);
}

#[test]
fn summary_format() {
    let output = run(&["--format", "summary"], &sample("nested.js"));
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "This file defines the following components: outer, inner, ids, load\n"
    );
}

#[test]
fn reads_standard_input() {
    let mut child = jsdecls()
        .arg("-")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"function fromStdin() {}")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output), "[\"fromStdin\"]\n");
}

#[test]
fn missing_argument_is_usage_error() {
    let output = jsdecls().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn unknown_language_is_usage_error() {
    let output = run(&["--language", "cobol"], &sample("nested.js"));
    assert_eq!(output.status.code(), Some(2));
}
