use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[allow(deprecated)]
fn codeunit() -> Command {
    let mut cmd = Command::cargo_bin("codeunit").expect("binary");
    cmd.arg("--quiet");
    cmd
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn single_file_prints_units_as_json() {
    let temp = tempdir().unwrap();
    write(
        temp.path(),
        "app.js",
        "import fs from 'fs';\n\nfunction foo() {\n  return 1;\n}\n\nfoo();\n",
    );

    let output = codeunit().arg(temp.path().join("app.js")).output().unwrap();
    assert!(output.status.success());

    let units: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let units = units.as_array().unwrap();
    assert_eq!(units.len(), 3);

    assert_eq!(units[0]["type"], "module");
    assert_eq!(units[1]["type"], "function");
    assert_eq!(units[1]["name"], "foo");
    assert_eq!(units[1]["start_line"], 3);
    assert_eq!(units[1]["end_line"], 5);
    assert_eq!(units[1]["code"], "function foo() {\n  return 1;\n}");
    assert_eq!(units[2]["type"], "script");

    let expected_path = temp.path().join("app.js").canonicalize().unwrap();
    assert_eq!(
        units[1]["file_path"].as_str().unwrap(),
        expected_path.to_string_lossy()
    );
}

#[test]
fn compact_flag_prints_one_line() {
    let temp = tempdir().unwrap();
    write(temp.path(), "a.ts", "interface A {\n  x: number;\n}\n");

    codeunit()
        .arg("--compact")
        .arg(temp.path().join("a.ts"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\":\"interface\""))
        .stdout(predicate::str::contains("\"name\":\"A\""));
}

#[test]
fn empty_file_prints_empty_array() {
    let temp = tempdir().unwrap();
    write(temp.path(), "empty.js", "   \n\n");

    codeunit()
        .arg(temp.path().join("empty.js"))
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn missing_file_fails() {
    let temp = tempdir().unwrap();

    codeunit()
        .arg(temp.path().join("nope.js"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.js"));
}

#[test]
fn syntax_error_fails_in_single_mode() {
    let temp = tempdir().unwrap();
    write(temp.path(), "broken.js", "function oops( {\n");

    codeunit()
        .arg(temp.path().join("broken.js"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.js"));
}

#[test]
#[allow(deprecated)]
fn no_arguments_is_a_usage_error() {
    Command::cargo_bin("codeunit")
        .expect("binary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn batch_mode_mirrors_tree_and_reports_failures() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write(input.path(), "index.js", "main();\n");
    write(input.path(), "lib/util.ts", "export function util() {}\n");
    write(input.path(), "lib/broken.js", "class {\n");
    write(input.path(), "notes.txt", "not code\n");

    codeunit()
        .arg(input.path())
        .arg(output.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK]"))
        .stdout(predicate::str::contains("index.json"))
        .stdout(predicate::str::contains("util.json"))
        .stdout(predicate::str::contains(
            "Segmentation complete for directory:",
        ))
        .stderr(predicate::str::contains("[FAIL]"))
        .stderr(predicate::str::contains("broken.js"));

    let util: Value =
        serde_json::from_str(&fs::read_to_string(output.path().join("lib/util.json")).unwrap())
            .unwrap();
    assert_eq!(util[0]["type"], "function");
    assert_eq!(util[0]["name"], "util");
    assert!(output.path().join("index.json").exists());
    assert!(!output.path().join("lib/broken.json").exists());
    assert!(!output.path().join("notes.json").exists());
}

#[test]
fn batch_summary_and_jobs() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write(input.path(), "a.js", "a();\n");
    write(input.path(), "b.js", "b();\n");

    codeunit()
        .args(["--jobs", "2", "--summary"])
        .arg(input.path())
        .arg(output.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Files: 2 | Written: 2"));
}

#[test]
fn batch_mode_rejects_missing_input_directory() {
    let temp = tempdir().unwrap();

    codeunit()
        .arg(temp.path().join("missing"))
        .arg(temp.path().join("out"))
        .assert()
        .failure();
}

#[test]
fn config_file_restricts_extensions() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write(input.path(), "a.js", "a();\n");
    write(input.path(), "b.ts", "b();\n");
    let config = input.path().join("codeunit.toml");
    fs::write(&config, "extensions = [\"ts\"]\n").unwrap();

    codeunit()
        .arg("--config")
        .arg(&config)
        .arg(input.path())
        .arg(output.path())
        .assert()
        .success();

    assert!(output.path().join("b.json").exists());
    assert!(!output.path().join("a.json").exists());
}
