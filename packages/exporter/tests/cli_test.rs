use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn parse_writes_json_document() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("law.json");

    let mut cmd = cargo_bin_cmd!("qanun");
    cmd.arg("parse")
        .arg(fixture_path("associations_law.txt"))
        .arg("--output")
        .arg(&output);

    cmd.assert().success().stdout(
        predicate::str::contains("Chapters: 2")
            .and(predicate::str::contains("Articles: 3"))
            .and(predicate::str::contains("Saved to:")),
    );

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["sections"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["metadata"]["الرقم"], "24");
}

#[test]
fn parse_writes_yaml_document() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("law.yaml");

    let mut cmd = cargo_bin_cmd!("qanun");
    cmd.arg("parse")
        .arg(fixture_path("associations_law.txt"))
        .arg("--format")
        .arg("yaml")
        .arg("-o")
        .arg(&output);

    cmd.assert().success();

    let yaml = fs::read_to_string(&output).unwrap();
    assert!(yaml.starts_with("---\n"));
    assert!(yaml.contains("topLevelArticles:"));
}

#[test]
fn parse_missing_input_fails() {
    let mut cmd = cargo_bin_cmd!("qanun");
    cmd.arg("parse").arg("/nonexistent/output1.txt");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error: Input file does not exist"));
}

#[test]
fn parse_with_grammar_file() {
    let dir = tempdir().unwrap();
    let grammar = dir.path().join("grammar.yaml");
    // A continuation limit of 1 keeps section subtitles out of the title
    fs::write(&grammar, "continuation_max_chars: 1\n").unwrap();
    let output = dir.path().join("law.json");

    let mut cmd = cargo_bin_cmd!("qanun");
    cmd.arg("parse")
        .arg(fixture_path("associations_law.txt"))
        .arg("--grammar")
        .arg(&grammar)
        .arg("--output")
        .arg(&output);

    cmd.assert().success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["sections"][0]["title"], "الفصل الأول");
}

#[test]
fn parse_rejects_invalid_grammar() {
    let dir = tempdir().unwrap();
    let grammar = dir.path().join("grammar.yaml");
    fs::write(&grammar, "section_keywords: []\n").unwrap();

    let mut cmd = cargo_bin_cmd!("qanun");
    cmd.arg("parse")
        .arg(fixture_path("associations_law.txt"))
        .arg("--grammar")
        .arg(&grammar);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error: Invalid grammar"));
}

#[test]
fn export_writes_all_files() {
    let dir = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("qanun");
    cmd.arg("export")
        .arg(fixture_path("associations_law.txt"))
        .arg("--out-dir")
        .arg(dir.path());

    cmd.assert().success().stdout(
        predicate::str::contains("law_24_2022")
            .and(predicate::str::contains("Articles: 3"))
            .and(predicate::str::contains("3 article records")),
    );

    for name in [
        "enhanced_associations_law.json",
        "graph_associations_law.json",
        "cypher_associations_law.jsonl",
        "articles_for_embedding.jsonl",
        "cypher_all.jsonl",
    ] {
        assert!(dir.path().join(name).exists(), "missing {name}");
    }
}

#[test]
fn export_requires_existing_out_dir() {
    let dir = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("qanun");
    cmd.arg("export")
        .arg(fixture_path("associations_law.txt"))
        .arg("--out-dir")
        .arg(dir.path().join("missing"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Output directory does not exist"));
}
