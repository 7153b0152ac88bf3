mod common;
use common::{init_db_with_data, rga, setup_test_db, temp_out};
use predicates::str::contains;
use std::fs;

fn seed_sessions(db_path: &str) {
    init_db_with_data(db_path);

    for (inn, out) in [
        ("2025-09-01T09:00:00Z", "2025-09-01T17:00:00Z"),
        ("2025-10-02T09:00:00Z", "2025-10-02T13:30:00Z"),
    ] {
        rga()
            .args([
                "--db", db_path, "-e", "1", "--now", inn, "checkin", "--lat", "12.9720", "--lon",
                "77.5950",
            ])
            .assert()
            .success();
        rga()
            .args([
                "--db", db_path, "-e", "1", "--now", out, "checkout", "--lat", "12.9716",
                "--lon", "77.5946",
            ])
            .assert()
            .success();
    }
}

#[test]
fn test_export_csv_all() {
    let db_path = setup_test_db("export_csv_all");
    seed_sessions(&db_path);
    let out = temp_out("export_csv_all", "csv");

    rga()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("id,employee_id,employee_name,check_in"));
    assert!(content.contains("2025-09-01 09:00:00"));
    assert!(content.contains("2025-10-02 13:30:00"));
    assert!(content.contains("HQ"));
}

#[test]
fn test_export_json_range_and_timezone() {
    let db_path = setup_test_db("export_json_range");
    seed_sessions(&db_path);
    let out = temp_out("export_json_range", "json");

    rga()
        .args([
            "--db",
            &db_path,
            "--tz",
            "Asia/Kolkata",
            "export",
            "--format",
            "json",
            "--file",
            &out,
            "--range",
            "2025-10",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("json array");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["check_in"], "2025-10-02 14:30:00");
    assert_eq!(rows[0]["worked_hours"], 4.5);
    assert_eq!(rows[0]["status"], "closed");
    assert_eq!(rows[0]["within_geofence"], true);
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative");
    seed_sessions(&db_path);

    rga()
        .args([
            "--db",
            &db_path,
            "export",
            "--format",
            "csv",
            "--file",
            "relative.csv",
        ])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_refuses_overwrite_without_force() {
    let db_path = setup_test_db("export_force");
    seed_sessions(&db_path);
    let out = temp_out("export_force", "csv");
    fs::write(&out, "old").unwrap();

    rga()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    rga()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--force",
        ])
        .assert()
        .success();

    assert!(fs::read_to_string(&out).unwrap().contains("HQ"));
}
