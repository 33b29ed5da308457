use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const USER: &str = r#"{
    "model": "User",
    "id": 7,
    "attributes": {
        "name": "Ann",
        "active": true,
        "tags": ["ruby", "rust"],
        "born_on": {"date": "1990-04-01"}
    }
}"#;

fn write_record(dir: &Path) -> PathBuf {
    let path = dir.join("user.json");
    fs::write(&path, USER).unwrap();
    path
}

fn editable(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("editable").unwrap();
    cmd.arg("--config").arg(config_dir);
    cmd
}

#[test]
fn test_render_text_attribute() {
    let temp_dir = tempfile::tempdir().unwrap();
    let record = write_record(temp_dir.path());

    editable(temp_dir.path())
        .arg("render")
        .arg(&record)
        .arg("name")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<span class="editable" title="Name""#))
        .stdout(predicate::str::contains(r#"data-type="text""#))
        .stdout(predicate::str::contains(r#"data-url="/users/7""#))
        .stdout(predicate::str::contains(">Ann</span>"));
}

#[test]
fn test_render_boolean_as_select() {
    let temp_dir = tempfile::tempdir().unwrap();
    let record = write_record(temp_dir.path());

    editable(temp_dir.path())
        .args(["render", record.to_str().unwrap(), "active"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"data-type="select""#))
        .stdout(predicate::str::contains(r#"data-value="1""#))
        .stdout(predicate::str::contains(
            r#"data-source="{&quot;1&quot;:&quot;Yes&quot;,&quot;0&quot;:&quot;No&quot;}""#,
        ))
        .stdout(predicate::str::contains("></span>"));
}

#[test]
fn test_render_with_options_and_url() {
    let temp_dir = tempfile::tempdir().unwrap();
    let record = write_record(temp_dir.path());

    editable(temp_dir.path())
        .args(["render", record.to_str().unwrap(), "name"])
        .args(["--options", r#"{"tag": "div", "type": "textarea", "mode": "inline"}"#])
        .args(["--url", "/api/people/7"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<div "))
        .stdout(predicate::str::contains(r#"data-type="textarea""#))
        .stdout(predicate::str::contains(r#"data-url="/api/people/7""#))
        .stdout(predicate::str::contains(r#"data-mode="inline""#))
        .stdout(predicate::str::contains("></div>"));
}

#[test]
fn test_render_readonly_prints_labels() {
    let temp_dir = tempfile::tempdir().unwrap();
    let record = write_record(temp_dir.path());

    editable(temp_dir.path())
        .args(["render", record.to_str().unwrap(), "active", "--readonly"])
        .assert()
        .success()
        .stdout("Yes\n");

    editable(temp_dir.path())
        .args(["render", record.to_str().unwrap(), "tags", "--readonly"])
        .assert()
        .success()
        .stdout("ruby<br />rust\n");
}

#[test]
fn test_render_uses_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let record = write_record(temp_dir.path());
    fs::write(
        temp_dir.path().join("editable.json"),
        r#"{"models": {"User": {"active": {"source": ["On", "Off"]}}}}"#,
    )
    .unwrap();

    editable(temp_dir.path())
        .args(["render", record.to_str().unwrap(), "active", "--readonly"])
        .assert()
        .success()
        .stdout("On\n");
}

#[test]
fn test_resolve_prints_json() {
    let temp_dir = tempfile::tempdir().unwrap();
    let record = write_record(temp_dir.path());

    editable(temp_dir.path())
        .args(["resolve", record.to_str().unwrap(), "tags"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type": "checklist""#))
        .stdout(predicate::str::contains(r#""text": "ruby,rust""#));

    editable(temp_dir.path())
        .args(["resolve", record.to_str().unwrap(), "born_on"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type": "date""#))
        .stdout(predicate::str::contains(r#""text": "1990-04-01""#));
}

#[test]
fn test_unknown_attribute_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let record = write_record(temp_dir.path());

    editable(temp_dir.path())
        .args(["render", record.to_str().unwrap(), "nickname"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Unknown attribute `nickname` on User"));
}

#[test]
fn test_invalid_options_fail() {
    let temp_dir = tempfile::tempdir().unwrap();
    let record = write_record(temp_dir.path());

    editable(temp_dir.path())
        .args(["render", record.to_str().unwrap(), "name", "--options", "{ nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Serialization error"));
}

#[test]
fn test_missing_record_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    editable(temp_dir.path())
        .args(["render", "does-not-exist.json", "name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error").and(predicate::str::contains("Error:")));
}
