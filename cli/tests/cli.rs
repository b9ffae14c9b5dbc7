#[path = "../../tests/common/mod.rs"]
mod common;

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

use common::Encoder;
use lua_tlv::{Table, Value};

fn write_file(path: &Path, contents: &[u8]) {
    fs::write(path, contents).expect("write test file");
}

fn sample_database() -> Vec<u8> {
    let cuno: Table = [
        ("Name", Value::from("\u{1}Cuno")),
        ("IsNPC", Value::Boolean(true)),
    ]
    .into_iter()
    .collect();
    Encoder::new()
        .table(&[
            ("TASK.find_gun", Value::Boolean(false)),
            ("money", Value::Integer(12)),
        ])
        .padding()
        .table(&[("cuno", Value::Table(cuno))])
        .finish()
}

#[test]
fn prints_raw_mapping_as_json() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("save.lua");
    write_file(&input, &Encoder::new().table(&[("hp", Value::Integer(3))]).finish());

    cargo_bin_cmd!("luatlv")
        .arg(&input)
        .assert()
        .success()
        .stdout("{\n  \"hp\": 3\n}");
}

#[test]
fn compact_output_with_zero_indent() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("save.lua");
    write_file(&input, &sample_database());

    cargo_bin_cmd!("luatlv")
        .arg(&input)
        .args(["--indent", "0"])
        .assert()
        .success()
        .stdout(contains(r#""TASK.find_gun":false,"money":12,"cuno":{"#));
}

#[test]
fn classify_prints_cleaned_entities() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("save.lua");
    write_file(&input, &sample_database());

    cargo_bin_cmd!("luatlv")
        .arg(&input)
        .arg("--classify")
        .args(["--indent", "0"])
        .assert()
        .success()
        .stdout(
            contains(r#""npcs":{"cuno":{"Name":"Cuno","IsNPC":true}}"#)
                .and(contains(r#""task_variables":{"TASK.find_gun":false}"#)),
        );
}

#[test]
fn directory_input_picks_first_save_database() {
    let dir = TempDir::new().expect("tempdir");
    write_file(
        &dir.path().join("b.ntwtf.lua"),
        &Encoder::new().table(&[("from", Value::from("b"))]).finish(),
    );
    write_file(
        &dir.path().join("a.ntwtf.lua"),
        &Encoder::new().table(&[("from", Value::from("a"))]).finish(),
    );
    write_file(&dir.path().join("notes.txt"), b"ignored");

    cargo_bin_cmd!("luatlv")
        .arg(dir.path())
        .args(["--indent", "0"])
        .assert()
        .success()
        .stdout(r#"{"from":"a"}"#);
}

#[test]
fn directory_without_database_fails() {
    let dir = TempDir::new().expect("tempdir");
    write_file(&dir.path().join("save.lua"), &Encoder::new().table(&[]).finish());

    cargo_bin_cmd!("luatlv")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("ERROR").and(contains("no .ntwtf.lua file found")));
}

#[test]
fn rejects_non_lua_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("save.bin");
    write_file(&input, &Encoder::new().table(&[]).finish());

    cargo_bin_cmd!("luatlv")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("expected a .lua file"));
}

#[test]
fn invalid_data_reports_decode_error() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("broken.lua");
    write_file(&input, b"X\x00\x00");

    cargo_bin_cmd!("luatlv")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("ERROR").and(contains("offset 0")));
}

#[test]
fn strict_rejects_trailing_noise() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("save.lua");
    let bytes = Encoder::new()
        .table(&[("k", Value::Boolean(true))])
        .raw(b"XYZ")
        .finish();
    write_file(&input, &bytes);

    cargo_bin_cmd!("luatlv")
        .arg(&input)
        .args(["--indent", "0"])
        .assert()
        .success()
        .stdout(r#"{"k":true}"#);

    cargo_bin_cmd!("luatlv")
        .arg(&input)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("ERROR"));
}

#[test]
fn no_skip_padding_stops_at_first_zero_byte() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("save.lua");
    write_file(&input, &sample_database());

    cargo_bin_cmd!("luatlv")
        .arg(&input)
        .arg("--no-skip-padding")
        .args(["--indent", "0"])
        .assert()
        .success()
        .stdout(r#"{"TASK.find_gun":false,"money":12}"#);
}

#[test]
fn max_depth_limits_nesting() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("save.lua");
    write_file(&input, &sample_database());

    cargo_bin_cmd!("luatlv")
        .arg(&input)
        .args(["--max-depth", "0"])
        .assert()
        .failure()
        .stderr(contains("more than 0 nested tables"));
}

#[test]
fn writes_extraction_directory() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("save.lua");
    let out_dir = dir.path().join("out");
    write_file(&input, &sample_database());

    cargo_bin_cmd!("luatlv")
        .arg(&input)
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(
            contains("npcs.json")
                .and(contains("_manifest.json"))
                .and(contains("✔ Extracted")),
        );

    let npcs: serde_json::Value =
        serde_json::from_slice(&fs::read(out_dir.join("npcs.json")).expect("read npcs"))
            .expect("parse npcs");
    assert_eq!(npcs["cuno"]["Name"], "Cuno");

    let raw: serde_json::Value = serde_json::from_slice(
        &fs::read(out_dir.join("_raw_full_database.json")).expect("read raw"),
    )
    .expect("parse raw");
    assert_eq!(raw["cuno"]["Name"], "\u{1}Cuno");

    let manifest: serde_json::Value =
        serde_json::from_slice(&fs::read(out_dir.join("_manifest.json")).expect("read manifest"))
            .expect("parse manifest");
    assert_eq!(manifest["total_top_level"], 3);
    assert_eq!(manifest["npcs"], 1);
    assert_eq!(manifest["task_variables"], 1);
    assert_eq!(manifest["all_variables"], 2);
    assert_eq!(manifest["stream"]["tables_merged"], 2);
    assert_eq!(manifest["stream"]["padding_skipped"], 1);

    for name in [
        "items.json",
        "thoughts.json",
        "skills.json",
        "world_objects.json",
        "substance_variables.json",
        "game_variables.json",
        "all_variables.json",
        "unclassified.json",
    ] {
        assert!(out_dir.join(name).exists(), "missing {name}");
    }
}

#[test]
fn flatten_prints_dotted_keys() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("save.lua");
    write_file(&input, &sample_database());

    cargo_bin_cmd!("luatlv")
        .arg(&input)
        .arg("--flatten")
        .args(["--indent", "0"])
        .assert()
        .success()
        .stdout(
            r#"{"TASK.find_gun":false,"money":12,"cuno.Name":"\u0001Cuno","cuno.IsNPC":true}"#,
        );
}

#[test]
fn flatten_conflicts_with_classify() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("save.lua");
    write_file(&input, &sample_database());

    cargo_bin_cmd!("luatlv")
        .arg(&input)
        .args(["--flatten", "--classify"])
        .assert()
        .failure();
}

#[test]
fn flatten_adds_flat_database_to_extraction() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("save.lua");
    let out_dir = dir.path().join("out");
    write_file(&input, &sample_database());

    cargo_bin_cmd!("luatlv")
        .arg(&input)
        .arg("--flatten")
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(contains("_flat_database.json"));

    let flat: serde_json::Value = serde_json::from_slice(
        &fs::read(out_dir.join("_flat_database.json")).expect("read flat"),
    )
    .expect("parse flat");
    assert_eq!(flat["cuno.IsNPC"], true);
    assert_eq!(flat["money"], 12);
}
