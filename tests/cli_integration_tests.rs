//! CLI Integration Tests
//!
//! Tests the CLI binary directly using assert_cmd to exercise main.rs code paths.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const MENU_XLIFF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="1.2" xmlns="urn:oasis:names:tc:xliff:document:1.2">
  <file original="menu" source-language="en" target-language="de" datatype="html">
    <body>
      <trans-unit id="menu.open">
        <source xml:lang="en">Open</source>
        <target xml:lang="de"><mrk>Öff</mrk>nen</target>
      </trans-unit>
      <trans-unit id="menu.close">
        <source xml:lang="en">Close</source>
        <target xml:lang="de">Schließen</target>
      </trans-unit>
    </body>
  </file>
</xliff>
"#;

fn xliffer() -> Command {
    Command::cargo_bin("xliffer").unwrap()
}

fn fixture(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("de.xliff");
    fs::write(&path, MENU_XLIFF).unwrap();
    path
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    xliffer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("xliffer"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    xliffer()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_command_fails() {
    xliffer().arg("frobnicate").assert().failure();
}

// ═══════════════════════════════════════════════════════════════════════════
// XLIFF → XLIFF COMMANDS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_dump_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir);
    xliffer()
        .args(["dump", "--in"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("unit menu.open"))
        .stdout(predicate::str::contains(" target: Öffnen"));
}

#[test]
fn test_dump_json() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir);
    xliffer()
        .args(["dump", "--json", "--in"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"source_lang\": \"en\""));
}

#[test]
fn test_copy_to_output_file() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir);
    let output = dir.path().join("copy.xliff");

    xliffer()
        .arg("-o")
        .arg(&output)
        .args(["copy", "--in"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains(r#"<target lang="en">Open</target>"#));
    assert!(xml.contains(r#"target-language="en""#));
}

#[test]
fn test_swap_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir);
    xliffer()
        .args(["swap-source-target", "--in"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<source lang="en">Öffnen</source>"#));
}

#[test]
fn test_set_lang() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir);
    xliffer()
        .args(["set-lang", "--target", "fr", "--in"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"source-language="en" target-language="fr""#));
}

#[test]
fn test_merge_two_documents() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir);
    let output = xliffer()
        .arg("merge")
        .arg("-a")
        .arg(&input)
        .arg("-b")
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());
    let xml = String::from_utf8(output.stdout).unwrap();
    assert_eq!(xml.matches("<file ").count(), 2);
}

#[test]
fn test_missing_input_fails() {
    xliffer()
        .args(["blank-target", "--in", "no/such/file.xliff"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("no/such/file.xliff"));
}

#[test]
fn test_malformed_input_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.xliff");
    fs::write(&input, "<xliff><file>").unwrap();
    let output = dir.path().join("out.xliff");

    xliffer()
        .arg("-o")
        .arg(&output)
        .args(["blank-target", "--in"])
        .arg(&input)
        .assert()
        .failure();
    assert!(!output.exists());
}

// ═══════════════════════════════════════════════════════════════════════════
// JSON AND SPREADSHEET COMMANDS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_to_json_pretty() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir);
    xliffer()
        .args(["to-json", "--pretty", "--key-match", "^menu\\.", "--key-to", "", "--in"])
        .arg(&input)
        .assert()
        .success()
        .stdout("{\n\t\"close\": \"Schließen\",\n\t\"open\": \"Öffnen\"\n}\n");
}

#[test]
fn test_to_json_bad_pattern() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir);
    xliffer()
        .args(["to-json", "--key-match", "(", "--in"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid key pattern"));
}

#[test]
fn test_xlsx_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir);
    let xlsx = dir.path().join("texts.xlsx");
    let out_dir = dir.path().join("l10n");

    xliffer()
        .arg("-o")
        .arg(&xlsx)
        .args(["to-xlsx", "--in"])
        .arg(&input)
        .assert()
        .success();

    xliffer()
        .args(["from-xlsx", "--format", "json", "--target-col", "3", "--in"])
        .arg(&xlsx)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success();

    let json = fs::read_to_string(out_dir.join("de.xliff.json")).unwrap();
    assert_eq!(json, "{\"menu.close\":\"Schließen\",\"menu.open\":\"Öffnen\"}\n");
}

#[test]
fn test_to_xlsx_append_unknown_sheet() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir);
    let xlsx = dir.path().join("texts.xlsx");

    xliffer()
        .arg("-o")
        .arg(&xlsx)
        .args(["to-xlsx", "--in"])
        .arg(&input)
        .assert()
        .success();

    xliffer()
        .arg("-o")
        .arg(&xlsx)
        .args(["to-xlsx", "--sheet", "Nope", "--in"])
        .arg(&input)
        .arg("--append")
        .arg(&xlsx)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sheet Nope not found"));
}

#[test]
fn test_from_xlsx_env_source_lang() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir);
    let xlsx = dir.path().join("texts.xlsx");
    let out_dir = dir.path().join("out");

    xliffer()
        .arg("-o")
        .arg(&xlsx)
        .args(["to-xlsx", "--in"])
        .arg(&input)
        .assert()
        .success();

    xliffer()
        .env("XLIFFER_SOURCE_LANG", "en-GB")
        .env("XLIFFER_TARGET_LANG", "de")
        .args(["from-xlsx", "--pretty", "--target-col", "3", "--in"])
        .arg(&xlsx)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success();

    let xml = fs::read_to_string(out_dir.join("de.xliff.xliff")).unwrap();
    assert!(xml.contains(r#"source-language="en-GB" target-language="de""#));
}
