use clap::Parser;
use flatgraph_cli::{run, Args, Command};
use flatgraph_types::{EntityId, EntityType};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::io::Write;

fn args(argv: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("flatgraph").chain(argv.iter().copied())).unwrap()
}

fn run_json(argv: &[&str], stdin: &str) -> Value {
    let out = run(&args(argv), stdin.as_bytes()).unwrap();
    serde_json::from_str(&out).unwrap()
}

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// ── Argument parsing ─────────────────────────────────────────────

#[test]
fn parses_denormalize_arguments() {
    let a = args(&["denormalize", "--type", "folder", "--id", "7", "--store", "s.json", "-v"]);
    assert!(a.verbose);
    match a.command {
        Command::Denormalize { entity_type, id, .. } => {
            assert_eq!(entity_type, EntityType::Folder);
            assert_eq!(id, EntityId::Num(7));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn rejects_unknown_type() {
    assert!(Args::try_parse_from(["flatgraph", "normalize", "--type", "widget"]).is_err());
}

// ── normalize ────────────────────────────────────────────────────

#[test]
fn normalize_from_stdin() {
    let out = run_json(
        &["normalize", "--type", "folder"],
        r#"{"id": 1, "creator": {"id": 10}, "subfolders": []}"#,
    );
    assert_eq!(
        out,
        json!({
            "entities": {
                "folder": {"1": {"id": 1, "creator": 10, "subfolders": []}},
                "user": {"10": {"id": 10}}
            },
            "resultId": 1,
            "result": {"id": 1, "creator": 10, "subfolders": []}
        })
    );
}

#[test]
fn normalize_array_from_file() {
    let file = write_temp(r#"[{"id": 1}, {"id": 2}]"#);
    let path = file.path().to_str().unwrap();
    let out = run_json(&["normalize", "-t", "user", "--input", path], "");
    assert_eq!(out, json!({"entities": {"user": {"1": {"id": 1}, "2": {"id": 2}}}}));
}

#[test]
fn normalize_reports_invalid_json() {
    let err = run(&args(&["normalize", "-t", "user"]), "{not json".as_bytes()).unwrap_err();
    assert!(err.to_string().contains("stdin is not valid JSON"));
}

#[test]
fn normalize_reports_engine_errors() {
    let err = run(&args(&["normalize", "-t", "user"]), r#"{"name": "x"}"#.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("failed to normalize user"));
}

// ── denormalize ──────────────────────────────────────────────────

fn store_file() -> tempfile::NamedTempFile {
    write_temp(
        &json!({
            "folder": {
                "1": {"id": 1, "creator": 10, "subfolders": [2]},
                "2": {"id": 2, "creator": 10, "subfolders": []}
            },
            "user": {"10": {"id": 10, "login": "ann"}}
        })
        .to_string(),
    )
}

#[test]
fn denormalize_from_store_file() {
    let store = store_file();
    let path = store.path().to_str().unwrap();
    let out = run_json(&["denormalize", "-t", "folder", "--id", "1", "--store", path], "");
    assert_eq!(
        out,
        json!({
            "id": 1,
            "creator": {"id": 10, "login": "ann"},
            "subfolders": [{"id": 2, "creator": {"id": 10, "login": "ann"}}]
        })
    );
}

#[test]
fn denormalize_missing_root_prints_null() {
    let store = store_file();
    let path = store.path().to_str().unwrap();
    let out = run_json(&["denormalize", "-t", "folder", "--id", "9", "--store", path], "");
    assert_eq!(out, Value::Null);
}

#[test]
fn denormalize_honors_config_file() {
    let store = write_temp(r#"{"folder": {"1": {"id": 1, "creator": 99}}}"#);
    let config = write_temp("[engine]\nmissing-reference = \"fail\"\n");
    let argv = [
        "denormalize",
        "-t",
        "folder",
        "--id",
        "1",
        "--store",
        store.path().to_str().unwrap(),
        "--config",
        config.path().to_str().unwrap(),
    ];
    let err = run(&args(&argv), "".as_bytes()).unwrap_err();
    assert!(err.to_string().contains("failed to denormalize folder 1"));
}

// ── schema ───────────────────────────────────────────────────────

#[test]
fn schema_for_one_type() {
    let out = run_json(&["schema", "--type", "message"], "");
    assert_eq!(
        out,
        json!([{
            "entity_type": "message",
            "id_attribute": "id",
            "references": [{"field": "sender", "kind": "single", "target": "user"}]
        }])
    );
}

#[test]
fn schema_lists_every_type() {
    let out = run_json(&["schema", "--pretty"], "");
    assert_eq!(out.as_array().unwrap().len(), EntityType::ALL.len());
}
