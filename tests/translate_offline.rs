#![allow(clippy::unwrap_used)]
//! End-to-end translation runs that stay off the network.
//!
//! A dictionary covering every distinct value means the engine resolves
//! everything from its seeded cache, so these tests exercise the full
//! pipeline (parse, dedup, rewrite, atomic write) without reaching any
//! endpoint.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn xlate(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("xlate").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

#[test]
fn test_csv_translated_from_dictionary_only() {
    let config_home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    let input = dir.path().join("cities.csv");
    fs::write(&input, "city,population\nhanoi,8000000\nparis,2100000\nhanoi,8000000\n").unwrap();

    let dict = dir.path().join("dict.json");
    fs::write(&dict, r#"{"hanoi": "Hà Nội", "paris": "Paris"}"#).unwrap();

    xlate(&config_home)
        .args(["-s", "en", "-t", "vi", "--column", "city"])
        .arg("-d")
        .arg(&dict)
        .arg(&input)
        .assert()
        .success();

    let output = dir.path().join("cities_en_vi.csv");
    let contents = fs::read_to_string(&output).unwrap();
    assert_eq!(
        contents,
        "city,population\nHà Nội,8000000\nParis,2100000\nHà Nội,8000000\n"
    );

    // The input file is untouched.
    let original = fs::read_to_string(&input).unwrap();
    assert!(original.contains("hanoi"));
}

#[test]
fn test_null_markers_become_empty_fields() {
    let config_home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    let input = dir.path().join("notes.csv");
    fs::write(&input, "id,note\n1,null\n2,NaN\n").unwrap();

    xlate(&config_home)
        .args(["-s", "en", "-t", "vi", "--column", "note"])
        .arg(&input)
        .assert()
        .success();

    let contents = fs::read_to_string(dir.path().join("notes_en_vi.csv")).unwrap();
    assert_eq!(contents, "id,note\n1,\n2,\n");
}

#[test]
fn test_whitespace_only_fields_survive() {
    let config_home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    let input = dir.path().join("spaced.csv");
    fs::write(&input, "note\n \nhello\n").unwrap();

    let dict = dir.path().join("dict.json");
    fs::write(&dict, r#"{"hello": "bonjour"}"#).unwrap();

    xlate(&config_home)
        .args(["-s", "en", "-t", "fr"])
        .arg("-d")
        .arg(&dict)
        .arg(&input)
        .assert()
        .success();

    let contents = fs::read_to_string(dir.path().join("spaced_en_fr.csv")).unwrap();
    assert_eq!(contents, "note\n \nbonjour\n");
}

#[test]
fn test_over_wide_rows_keep_extra_fields() {
    let config_home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    let input = dir.path().join("ragged.csv");
    fs::write(&input, "a,b\none,two,three\n").unwrap();

    let dict = dir.path().join("dict.json");
    fs::write(&dict, r#"{"one": "un", "two": "deux"}"#).unwrap();

    xlate(&config_home)
        .args(["-s", "en", "-t", "fr"])
        .arg("-d")
        .arg(&dict)
        .arg(&input)
        .assert()
        .success();

    // Fields beyond the header width belong to no column and are carried
    // through untouched.
    let contents = fs::read_to_string(dir.path().join("ragged_en_fr.csv")).unwrap();
    assert_eq!(contents, "a,b\nun,deux,three\n");
}

#[test]
fn test_text_file_without_trailing_newline() {
    let config_home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    let input = dir.path().join("word.txt");
    fs::write(&input, "hello").unwrap();

    let dict = dir.path().join("dict.json");
    fs::write(&dict, r#"{"hello": "bonjour"}"#).unwrap();

    xlate(&config_home)
        .args(["-s", "en", "-t", "fr"])
        .arg("-d")
        .arg(&dict)
        .arg(&input)
        .assert()
        .success();

    let contents = fs::read_to_string(dir.path().join("word_en_fr.txt")).unwrap();
    assert_eq!(contents, "bonjour");
}

#[test]
fn test_status_lines_print_intact_alongside_progress() {
    let config_home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    let input = dir.path().join("w.csv");
    fs::write(&input, "word\nhello\n").unwrap();

    let dict = dir.path().join("dict.json");
    fs::write(&dict, r#"{"hello": "bonjour"}"#).unwrap();

    xlate(&config_home)
        .args(["-s", "en", "-t", "fr", "--no-color"])
        .arg("-d")
        .arg(&dict)
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Translating column: word"))
        .stderr(predicate::str::contains("Translated file written"));
}

#[test]
fn test_text_file_roundtrip_with_custom_output() {
    let config_home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    let input = dir.path().join("notes.txt");
    fs::write(&input, "hello\n\nworld\n").unwrap();

    let dict = dir.path().join("dict.json");
    fs::write(&dict, r#"{"hello": "bonjour", "world": "monde"}"#).unwrap();

    let output = dir.path().join("translated.txt");
    xlate(&config_home)
        .args(["-s", "en", "-t", "fr"])
        .arg("-d")
        .arg(&dict)
        .arg("-o")
        .arg(&output)
        .arg(&input)
        .assert()
        .success();

    let contents = fs::read_to_string(&output).unwrap();
    assert_eq!(contents, "bonjour\n\nmonde\n");
}

#[test]
fn test_tsv_uses_tab_delimiter_by_default() {
    let config_home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    let input = dir.path().join("data.tsv");
    fs::write(&input, "word\tcount\nhello\t2\n").unwrap();

    let dict = dir.path().join("dict.json");
    fs::write(&dict, r#"{"hello": "xin chào", "2": "2"}"#).unwrap();

    xlate(&config_home)
        .args(["-s", "en", "-t", "vi"])
        .arg("-d")
        .arg(&dict)
        .arg(&input)
        .assert()
        .success();

    let contents = fs::read_to_string(dir.path().join("data_en_vi.tsv")).unwrap();
    assert_eq!(contents, "word\tcount\nxin chào\t2\n");
}

#[test]
fn test_malformed_dictionary_aborts_before_output() {
    let config_home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    let input = dir.path().join("cities.csv");
    fs::write(&input, "city\nhanoi\n").unwrap();

    let dict = dir.path().join("dict.json");
    fs::write(&dict, "[1, 2, 3]").unwrap();

    xlate(&config_home)
        .args(["-s", "en", "-t", "vi"])
        .arg("-d")
        .arg(&dict)
        .arg(&input)
        .assert()
        .failure()
        .code(exitcode::SOFTWARE)
        .stderr(predicate::str::contains("Malformed dictionary file"));

    assert!(!dir.path().join("cities_en_vi.csv").exists());
}

#[test]
fn test_quiet_mode_suppresses_status_output() {
    let config_home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    let input = dir.path().join("w.csv");
    fs::write(&input, "word\nhello\n").unwrap();

    let dict = dir.path().join("dict.json");
    fs::write(&dict, r#"{"hello": "bonjour"}"#).unwrap();

    xlate(&config_home)
        .args(["-q", "-s", "en", "-t", "fr"])
        .arg("-d")
        .arg(&dict)
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_skip_column_left_untranslated() {
    let config_home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    let input = dir.path().join("pair.csv");
    fs::write(&input, "a,b\nhello,hello\n").unwrap();

    let dict = dir.path().join("dict.json");
    fs::write(&dict, r#"{"hello": "bonjour"}"#).unwrap();

    xlate(&config_home)
        .args(["-s", "en", "-t", "fr", "--skip", "b"])
        .arg("-d")
        .arg(&dict)
        .arg(&input)
        .assert()
        .success();

    let contents = fs::read_to_string(dir.path().join("pair_en_fr.csv")).unwrap();
    assert_eq!(contents, "a,b\nbonjour,hello\n");
}

#[test]
fn test_config_file_defaults_are_used() {
    let config_home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    let dict = dir.path().join("dict.json");
    fs::write(&dict, r#"{"hello": "bonjour"}"#).unwrap();

    // Store source/target/dictionary once, then translate without flags.
    xlate(&config_home)
        .args(["configure", "--source", "en", "--target", "fr"])
        .arg("--dictionary")
        .arg(&dict)
        .assert()
        .success();

    let input = dir.path().join("w.csv");
    fs::write(&input, "word\nhello\n").unwrap();

    xlate(&config_home).arg(&input).assert().success();

    let contents = fs::read_to_string(dir.path().join("w_en_fr.csv")).unwrap();
    assert_eq!(contents, "word\nbonjour\n");
}
