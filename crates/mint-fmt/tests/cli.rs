use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const MESSY: &str = "int x=1;if(x==1){print( x );}\n";
const CANONICAL: &str = "int x = 1;\nif (x == 1) {\n    print(x);\n}\n";

#[test]
fn prints_canonical_form() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("messy.mt");
    std::fs::write(&path, MESSY).unwrap();

    Command::cargo_bin("mint-fmt")
        .unwrap()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::eq(CANONICAL));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), MESSY);
}

#[test]
fn check_fails_on_unformatted_file() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("messy.mt");
    std::fs::write(&path, MESSY).unwrap();

    Command::cargo_bin("mint-fmt")
        .unwrap()
        .arg("--check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not formatted"));
}

#[test]
fn write_then_check_succeeds() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("messy.mt");
    std::fs::write(&path, MESSY).unwrap();

    Command::cargo_bin("mint-fmt").unwrap().arg("--write").arg(&path).assert().success();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), CANONICAL);

    Command::cargo_bin("mint-fmt")
        .unwrap()
        .arg("--check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));
}

#[test]
fn syntax_error_is_reported() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("bad.mt");
    std::fs::write(&path, "int x = ;\n").unwrap();

    Command::cargo_bin("mint-fmt")
        .unwrap()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.mt:1:9"));
}
