use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("console-search"));
    cmd.env_remove("CONSOLE_SEARCH_INVENTORY").env_remove("RUST_LOG");
    cmd
}

#[test]
fn search_web_example() {
    let temp = tempdir().unwrap();
    let inventory = temp.path().join("inventory.json");
    write_file(
        &inventory,
        r#"{"searchableLinodes": [{"entityType": "linode", "label": "web-1", "value": 1}],
            "buckets": [{"label": "db-bucket", "cluster": "us-east-1"}]}"#,
    );

    let assert = cmd()
        .arg("--inventory")
        .arg(&inventory)
        .arg("--format")
        .arg("json")
        .arg("search")
        .arg("web")
        .assert()
        .success();

    let results: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let combined = results["combinedResults"].as_array().unwrap();
    assert_eq!(combined.len(), 1);
    assert_eq!(combined[0]["label"], "web-1");

    let by_entity = results["searchResultsByEntity"].as_object().unwrap();
    assert_eq!(by_entity.len(), 7);
    assert_eq!(by_entity["linodes"].as_array().unwrap().len(), 1);
    for key in ["buckets", "domains", "images", "kubernetesClusters", "nodebalancers", "volumes"] {
        assert!(by_entity[key].as_array().unwrap().is_empty(), "{} should be empty", key);
    }
}

#[test]
fn blank_query_prints_nothing() {
    let temp = tempdir().unwrap();
    let inventory = temp.path().join("inventory.json");
    write_file(&inventory, r#"{"volumes": [{"id": 1, "label": "data"}]}"#);

    let assert = cmd()
        .arg("--inventory")
        .arg(&inventory)
        .arg("search")
        .arg("   ")
        .assert()
        .success();

    assert!(parse_jsonl(&assert.get_output().stdout).is_empty());
}

#[test]
fn inventory_read_from_stdin() {
    let assert = cmd()
        .arg("--inventory")
        .arg("-")
        .arg("search")
        .arg("data")
        .write_stdin(r#"{"volumes": [{"id": 7, "label": "data", "size": 20}]}"#)
        .assert()
        .success();

    let items = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["kind"], "entity");
    assert_eq!(items[0]["entityType"], "volume");
    assert_eq!(items[0]["data"]["description"], "20 GB");
}

#[test]
fn inventory_from_env_var() {
    let temp = tempdir().unwrap();
    let inventory = temp.path().join("acct.json");
    write_file(&inventory, r#"{"domains": [{"id": 3, "domain": "example.org"}]}"#);

    let assert = cmd()
        .env("CONSOLE_SEARCH_INVENTORY", &inventory)
        .arg("--format")
        .arg("raw")
        .arg("search")
        .arg("example")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout.trim(), "example.org");
}

#[test]
fn missing_inventory_fails() {
    let temp = tempdir().unwrap();

    cmd()
        .arg("--inventory")
        .arg(temp.path().join("absent.json"))
        .arg("search")
        .arg("web")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load inventory"));
}

#[test]
fn malformed_inventory_fails() {
    let temp = tempdir().unwrap();
    let inventory = temp.path().join("inventory.json");
    write_file(&inventory, "{ not json");

    cmd()
        .arg("--inventory")
        .arg(&inventory)
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid inventory JSON"));
}

#[test]
fn unknown_format_fails() {
    cmd()
        .arg("--format")
        .arg("yaml")
        .arg("products")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format"));
}

#[test]
fn products_lists_shortcuts() {
    let assert = cmd().arg("products").assert().success();
    let items = parse_jsonl(&assert.get_output().stdout);

    let labels: Vec<_> = items.iter().map(|v| v["label"].as_str().unwrap()).collect();
    assert_eq!(labels, vec!["Linodes", "Volumes"]);
    assert!(items.iter().all(|v| v["kind"] == "product"));
}

#[test]
fn skipped_linode_logged_when_verbose() {
    let temp = tempdir().unwrap();
    let inventory = temp.path().join("inventory.json");
    write_file(
        &inventory,
        r#"{"searchableLinodes": [{"entityType": "firewall", "label": "fw", "value": 1}]}"#,
    );

    cmd()
        .arg("--inventory")
        .arg(&inventory)
        .arg("--verbose")
        .arg("stats")
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping searchable linode"));
}

#[test]
fn malformed_raw_record_is_skipped() {
    let temp = tempdir().unwrap();
    let inventory = temp.path().join("inventory.json");
    write_file(
        &inventory,
        r#"{"volumes": [
            {"id": 1, "label": "data", "tags": null, "created": "2024-01-01T12:00:00Z"},
            {"id": "x", "label": "data-bad"}
        ]}"#,
    );

    let assert = cmd()
        .arg("--inventory")
        .arg(&inventory)
        .arg("--format")
        .arg("raw")
        .arg("search")
        .arg("data")
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping volume"));

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout.trim(), "data");
}
