#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use serde_json::{Value, json};
use std::env;
use std::fs;
use std::path::PathBuf;

/// CLI command isolated from the user's real config directory.
pub fn wd() -> Command {
    let mut home: PathBuf = env::temp_dir();
    home.push("wastedesk_test_home");
    fs::create_dir_all(&home).ok();

    let mut cmd = cargo_bin_cmd!("wastedesk");
    cmd.env("WASTEDESK_HOME", home).env("RUST_LOG", "off");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_wastedesk.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    for suffix in ["", "-wal", "-shm"] {
        fs::remove_file(format!("{db_path}{suffix}")).ok();
    }
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Detection documents in the shapes the pipeline is known to write.
pub fn sample_detections() -> Value {
    json!([
        {
            "id": "det-nested",
            "location": {
                "latitude": 22.6981,
                "longitude": 88.3812,
                "address": "14, Nilgunj Road, Sodepur, West Bengal, 700114, India",
                "accuracy": 12.5
            },
            "confidence_scores": [0.2, 0.4, 0.6],
            "createdAt": "2025-05-02T08:30:00Z",
            "model_version": "yolov8-1.2"
        },
        {
            "id": "det-flat",
            "latitude": 22.5726,
            "longitude": 88.3639,
            "address": "BT Road, Kolkata",
            "confidence_score": 0.9,
            "timestamp": "2025-05-03T10:00:00Z"
        },
        {
            "id": "det-bare",
            "address": "700114, India"
        }
    ])
}

/// Write the sample detections as an import file.
pub fn write_sample_file(name: &str) -> String {
    let path = temp_out(name, "json");
    fs::write(&path, serde_json::to_string_pretty(&sample_detections()).unwrap()).unwrap();
    path
}

/// Initialize a DB and import the sample detections.
pub fn init_db_with_detections(name: &str) -> String {
    let db_path = setup_test_db(name);

    wd().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let file = write_sample_file(name);
    wd().args(["--db", &db_path, "import", "--file", &file])
        .assert()
        .success();

    db_path
}

/// Add a staff member through the CLI and return its generated id.
pub fn add_staff(db_path: &str, name: &str) -> String {
    let out = wd()
        .args(["--db", db_path, "staff", "add", "--name", name, "--area", "Sodepur"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    String::from_utf8_lossy(&out)
        .lines()
        .map(str::trim)
        .rfind(|l| !l.is_empty())
        .unwrap_or_default()
        .to_string()
}
