use pretty_assertions::assert_eq;
use predicates::prelude::*;
use serde_json::Value;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_doxjson")));
    cmd.env_remove("DOXJSON_INPUT").env_remove("RUST_LOG");
    cmd
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn stdout_of(assert: assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

// -- single mode --

#[test]
fn single_file_matches_expected_document() {
    let expected = std::fs::read_to_string(fixture_path("class_world.expected.json")).unwrap();

    let output = stdout_of(cmd().arg(fixture_path("class_world.xml")).assert().success());
    assert_eq!(output, expected);
}

#[test]
fn output_is_deterministic() {
    let first = stdout_of(cmd().arg(fixture_path("class_world.xml")).assert().success());
    let second = stdout_of(cmd().arg(fixture_path("class_world.xml")).assert().success());
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn no_argument_reads_default_location() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("docs/xml")).unwrap();
    std::fs::copy(
        fixture_path("struct_vertex.xml"),
        dir.path().join("docs/xml/compound.xml"),
    )
    .unwrap();

    let output = stdout_of(cmd().current_dir(dir.path()).assert().success());
    let doc: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(doc["name"], "Vertex");
}

#[test]
fn env_overrides_default_location() {
    let output = stdout_of(
        cmd()
            .env("DOXJSON_INPUT", fixture_path("struct_vertex.xml"))
            .assert()
            .success(),
    );
    let doc: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(doc["kind"], "struct");
}

#[test]
fn missing_default_input_fails() {
    let dir = TempDir::new().unwrap();
    cmd()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to read docs/xml/compound.xml"));
}

#[test]
fn member_order_follows_source() {
    let output = stdout_of(cmd().arg(fixture_path("struct_vertex.xml")).assert().success());
    let doc: Value = serde_json::from_str(&output).unwrap();
    let names: Vec<_> = doc["sections"][0]["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["z", "x", "y"]);
}

#[test]
fn optional_fields_are_omitted_not_null() {
    let output = stdout_of(cmd().arg(fixture_path("struct_vertex.xml")).assert().success());
    assert!(!output.contains("null"));
    assert!(!output.contains("\"\""));

    let doc: Value = serde_json::from_str(&output).unwrap();
    let member = doc["sections"][0]["members"][0].as_object().unwrap();
    let keys: Vec<_> = member.keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 2);
    assert!(member.contains_key("name"));
    assert!(member.contains_key("type"));
    assert!(doc.get("language").is_some());
    assert!(doc.get("formatVersion").is_some());
}

#[test]
fn enum_values_present_only_for_enum_sections() {
    let output = stdout_of(cmd().arg(fixture_path("class_world.xml")).assert().success());
    let doc: Value = serde_json::from_str(&output).unwrap();
    let sections = doc["sections"].as_array().unwrap();

    let typedef = &sections[0]["members"][1];
    assert_eq!(typedef["values"], Value::Array(vec![]));

    for member in sections[1]["members"].as_array().unwrap() {
        assert!(member.get("values").is_none());
    }
}

#[test]
fn undeclared_parameter_descriptions_are_dropped() {
    let output = stdout_of(cmd().arg(fixture_path("class_world.xml")).assert().success());
    let doc: Value = serde_json::from_str(&output).unwrap();
    let params = doc["sections"][1]["members"][1]["params"].as_array().unwrap();

    assert_eq!(params.len(), 3);
    assert!(params[0].get("description").is_none());
    assert_eq!(params[1]["description"], "where to place it");
    assert!(params[2].get("description").is_none());
    assert!(!output.contains("no longer exists"));
}

#[test]
fn compact_format_is_single_line() {
    let output = stdout_of(
        cmd()
            .args(["-f", "json-compact"])
            .arg(fixture_path("class_world.xml"))
            .assert()
            .success(),
    );
    assert_eq!(output.lines().count(), 1);

    let pretty = std::fs::read_to_string(fixture_path("class_world.expected.json")).unwrap();
    let compact: Value = serde_json::from_str(&output).unwrap();
    let pretty: Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(compact, pretty);
}

// -- failures --

#[test]
fn missing_member_name_aborts_without_output() {
    cmd()
        .arg(fixture_path("missing_member_name.xml"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("missing required field `name`"))
        .stderr(predicate::str::contains(
            "/doxygen[1]/compounddef[1]/sectiondef[1]/memberdef[10]",
        ));
}

#[test]
fn malformed_xml_fails() {
    cmd()
        .arg(fixture_path("malformed.xml"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("malformed XML"));
}

#[test]
fn non_utf8_input_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("latin1.xml");
    std::fs::write(
        &path,
        b"<doxygen><compounddef kind=\"struct\"><compoundname>Gr\xf6\xdfe</compoundname></compounddef></doxygen>",
    )
    .unwrap();

    cmd()
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("malformed XML"))
        .stderr(predicate::str::contains("not valid UTF-8"));
}

#[test]
fn invalid_format_fails() {
    cmd()
        .args(["-f", "yaml"])
        .arg(fixture_path("class_world.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn multiple_inputs_require_output() {
    cmd()
        .arg(fixture_path("class_world.xml"))
        .arg(fixture_path("struct_vertex.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output is required"));
}

// -- batch mode --

#[test]
fn batch_mode_writes_one_file_per_input() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("class_world.xml"))
        .arg(fixture_path("struct_vertex.xml"))
        .assert()
        .success();

    let world = std::fs::read_to_string(dir.path().join("class_world.json")).unwrap();
    let expected = std::fs::read_to_string(fixture_path("class_world.expected.json")).unwrap();
    assert_eq!(world, expected);
    assert!(dir.path().join("struct_vertex.json").exists());
}

#[test]
fn batch_mode_creates_output_directory() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("nested/json");

    cmd()
        .args(["-o", out.to_str().unwrap()])
        .arg(fixture_path("struct_vertex.xml"))
        .assert()
        .success();

    assert!(out.join("struct_vertex.json").exists());
}

#[test]
fn batch_mode_writes_nothing_when_any_input_fails() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("json");

    cmd()
        .args(["-o", out.to_str().unwrap()])
        .arg(fixture_path("class_world.xml"))
        .arg(fixture_path("missing_member_name.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing_member_name.xml"));

    assert!(!out.join("class_world.json").exists());
}

#[test]
fn batch_mode_scans_directories() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    std::fs::copy(fixture_path("struct_vertex.xml"), src.path().join("struct_vertex.xml")).unwrap();
    std::fs::write(
        src.path().join("index.xml"),
        "<doxygenindex version=\"1.9.8\"></doxygenindex>",
    )
    .unwrap();

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(src.path().to_str().unwrap())
        .assert()
        .success();

    assert!(out.path().join("struct_vertex.json").exists());
    assert!(!out.path().join("index.json").exists());
}

#[test]
fn batch_mode_rejects_inputs_sharing_a_stem() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    std::fs::copy(fixture_path("struct_vertex.xml"), first.path().join("x.xml")).unwrap();
    std::fs::copy(fixture_path("class_world.xml"), second.path().join("x.xml")).unwrap();

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(first.path().join("x.xml"))
        .arg(second.path().join("x.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("would both be written to"));

    assert!(!out.path().join("x.json").exists());
}
