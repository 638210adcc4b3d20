use std::fs;
use std::path::Path;

use hymnal_csv::timestamp::format_epoch_seconds;
use hymnal_csv::{Config, ExportError, run};
use serde_json::{Value, json};
use tempfile::tempdir;

fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn mongo_export(data: Value) -> Value {
    json!({
        "_id": "66b0c0ffee",
        "_hostname": "chapel-pc",
        "PACKAGE": {
            "hymnal": {
                "DATA": data,
                "__CHECKSUM__": "0f9e",
                "__DATECREATED": {"$numberDouble": "1704067200"},
                "__FILETYPE__": "HYMNAL_DATA"
            }
        },
        "presnLaunchCount": {"$numberInt": "4"}
    })
}

fn rows(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn converts_mongo_export_sorted() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data.json");
    let output = dir.path().join("data.csv");
    write_json(
        &input,
        &mongo_export(json!({
            "b": [{"$numberInt": "5"}, {"$numberInt": "0"}, {"$numberDouble": "1700000000"}],
            "a": [{"$numberInt": "-1"}, {"$numberInt": "2"}, {}],
            "c": [{}, {}, {}]
        })),
    );

    let mut config = Config::new(&input);
    config.output = output.clone();
    let summary = run(&config).unwrap();

    assert_eq!(summary.records, 3);
    assert_eq!(summary.output, output);
    assert_eq!(
        rows(&output),
        [
            "id,queries,launches,lastAccessed".to_string(),
            "a,,2,".to_string(),
            format!("b,5,,{}", format_epoch_seconds(1_700_000_000.0)),
            "c,,,".to_string(),
        ]
    );
}

#[test]
fn converts_raw_dump_without_blanking_zeroes() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("raw.json");
    let output = dir.path().join("raw.csv");
    write_json(
        &input,
        &json!({
            "DATA": {"h2": [0, 0, 0], "h1": [3, -7, 1700000000]},
            "__FILETYPE__": "HYMNAL_DATA"
        }),
    );

    let config = Config {
        input,
        output: output.clone(),
        sort: true,
        raw: true,
    };
    run(&config).unwrap();

    assert_eq!(
        rows(&output),
        [
            "id,queries,launches,lastAccessed".to_string(),
            format!("h1,3,-7,{}", format_epoch_seconds(1_700_000_000.0)),
            "h2,0,0,".to_string(),
        ]
    );
    assert!(fs::read_to_string(&output).unwrap().ends_with("\nh2,0,0,"));
}

#[test]
fn unsorted_run_keeps_document_order() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("raw.json");
    let output = dir.path().join("raw.csv");
    write_json(
        &input,
        &json!({"DATA": {"b": [1, 1, 0], "a": [2, 2, 0], "c": [3, 3, 0]}}),
    );

    let config = Config {
        input,
        output: output.clone(),
        sort: false,
        raw: true,
    };
    run(&config).unwrap();

    assert_eq!(rows(&output)[1..], ["b,1,1,", "a,2,2,", "c,3,3,"]);
}

#[test]
fn mixed_shapes_convert_per_hymn() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("mixed.json");
    let output = dir.path().join("mixed.csv");
    write_json(
        &input,
        &mongo_export(json!({
            "x": [{"$numberInt": "9"}, {"$numberInt": "0"}, {}],
            "y": [0, 0, 0]
        })),
    );

    let mut config = Config::new(&input);
    config.output = output.clone();
    run(&config).unwrap();

    assert_eq!(rows(&output)[1..], ["x,9,,", "y,0,0,"]);
}

#[test]
fn missing_input_writes_nothing() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.csv");

    let mut config = Config::new(dir.path().join("absent.json"));
    config.output = output.clone();
    let err = run(&config).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ExportError>(),
        Some(ExportError::MissingInput(_))
    ));
    assert!(err.to_string().contains("does not exist"));
    assert!(!output.exists());
}

#[test]
fn missing_package_leaves_existing_output_alone() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("raw.json");
    let output = dir.path().join("out.csv");
    write_json(&input, &json!({"DATA": {"a": [1, 1, 0]}}));
    fs::write(&output, "previous").unwrap();

    let mut config = Config::new(&input);
    config.output = output.clone();
    let err = run(&config).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ExportError>(),
        Some(ExportError::MissingPackage)
    ));
    assert!(err.to_string().contains("--raw"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
}

#[test]
fn raw_mode_requires_data_key() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("export.json");
    let output = dir.path().join("out.csv");
    write_json(&input, &mongo_export(json!({})));

    let config = Config {
        input,
        output: output.clone(),
        sort: true,
        raw: true,
    };
    let err = run(&config).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ExportError>(),
        Some(ExportError::MissingData)
    ));
    assert!(!output.exists());
}

#[test]
fn malformed_json_is_an_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.json");
    let output = dir.path().join("out.csv");
    fs::write(&input, "{\"PACKAGE\": ").unwrap();

    let mut config = Config::new(&input);
    config.output = output.clone();
    let err = run(&config).unwrap_err();

    assert!(err.to_string().contains("JSON parse error"));
    assert!(!output.exists());
}

#[test]
fn malformed_entry_aborts_before_writing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("short.json");
    let output = dir.path().join("out.csv");
    write_json(&input, &json!({"DATA": {"ok": [1, 1, 0], "bad": [1, 1]}}));

    let config = Config {
        input,
        output: output.clone(),
        sort: true,
        raw: true,
    };
    let err = run(&config).unwrap_err();

    assert!(err.to_string().contains("'bad'"));
    assert!(!output.exists());
}
