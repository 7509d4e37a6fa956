use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.parent().unwrap().parent().unwrap().to_path_buf()
}

fn mint() -> Command {
    let mut cmd = Command::cargo_bin("mint").unwrap();
    cmd.env_remove("MINT_DUMP_DIR");
    cmd
}

fn run_demo(name: &str, expected: &str) {
    let root = workspace_root();
    mint()
        .arg(root.join("demos").join(name))
        .assert()
        .success()
        .stdout(predicate::eq(expected));
}

fn write_program(dir: &Path, name: &str, src: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, src).unwrap();
    path
}

#[test]
fn runs_hello_demo() {
    run_demo("hello.mt", "Hello, Mint\n3.5\n9\n5\n6\nababab\nbig\n");
}

#[test]
fn runs_scoping_demo() {
    run_demo("scoping.mt", "3\nnull\n10\n");
}

#[test]
fn runs_switch_demo() {
    run_demo("switch.mt", "default\nB\n");
}

#[test]
fn runs_loops_demo() {
    run_demo("loops.mt", "0\n1\n2\n2\n0\n6\n100\n");
}

#[test]
fn runs_fizzbuzz_demo() {
    run_demo(
        "fizzbuzz.mt",
        "1\n2\nFizz\n4\nBuzz\nFizz\n7\n8\nFizz\nBuzz\n11\nFizz\n13\n14\nFizzBuzz\n",
    );
}

#[test]
fn parse_error_is_nonzero() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let bad = write_program(tmp_dir.path(), "bad.mt", "print();\n");

    mint()
        .arg(bad)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("bad.mt:1:"))
        .stderr(predicate::str::contains("Unexpected token found"));
}

#[test]
fn lex_error_is_nonzero() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let bad = write_program(tmp_dir.path(), "lex.mt", "int x = 1 $ 2;\n");

    mint()
        .arg(bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unexpected character found: '$'"));
}

#[test]
fn semantic_error_stops_before_running() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let bad = write_program(tmp_dir.path(), "twice.mt", "print(1);\nint x = 1;\nint x = 2;\n");

    mint()
        .arg(bad)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Variable `x` is already defined"));
}

#[test]
fn runtime_error_keeps_earlier_output() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let bad = write_program(tmp_dir.path(), "div.mt", "int z = 0;\nprint(\"before\");\nprint(1 / z);\n");

    mint()
        .arg(bad)
        .assert()
        .failure()
        .stdout(predicate::eq("before\n"))
        .stderr(predicate::str::contains("Division by zero"));
}

#[test]
fn missing_file_is_reported() {
    let tmp_dir = tempfile::tempdir().unwrap();
    mint()
        .arg(tmp_dir.path().join("nope.mt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn missing_argument_is_usage_error() {
    mint().assert().failure().code(1).stderr(predicate::str::contains("Usage"));
}

#[test]
fn dump_dir_receives_stage_artifacts() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let src = write_program(tmp_dir.path(), "dump.mt", "int a = 2;\na = a * 3;\nprint(a);\n");
    let dump_dir = tmp_dir.path().join("out");

    mint()
        .env("MINT_DUMP_DIR", &dump_dir)
        .arg(src)
        .assert()
        .success()
        .stdout(predicate::eq("6\n"));

    let read = |name: &str| -> serde_json::Value {
        let text = std::fs::read_to_string(dump_dir.join(name)).unwrap();
        serde_json::from_str(&text).unwrap()
    };
    assert!(read("tokens.json").as_array().unwrap().len() > 10);
    assert_eq!(read("asts.json").as_array().unwrap().len(), 3);
    assert_eq!(read("semantic.json")["a"], "int");
    let snapshot = read("interpreter.json");
    assert_eq!(snapshot["symbols"]["a"], "int");
    assert_eq!(snapshot["values"]["a"], 6);
}

#[test]
fn stale_artifacts_are_cleared_on_failure() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let dump_dir = tmp_dir.path().join("out");
    std::fs::create_dir_all(&dump_dir).unwrap();
    std::fs::write(dump_dir.join("interpreter.json"), "{}").unwrap();
    let bad = write_program(tmp_dir.path(), "undef.mt", "print(ghost);\n");

    mint()
        .env("MINT_DUMP_DIR", &dump_dir)
        .arg(bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));

    assert!(dump_dir.join("tokens.json").exists());
    assert!(dump_dir.join("asts.json").exists());
    assert!(!dump_dir.join("semantic.json").exists());
    assert!(!dump_dir.join("interpreter.json").exists());
}
