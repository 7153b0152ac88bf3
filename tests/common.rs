#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rgeoattend::core::employee::EmployeeLogic;
use rgeoattend::core::location::{LocationInput, LocationLogic};
use rgeoattend::db::initialize::init_db;
use rgeoattend::db::pool::DbPool;
use rgeoattend::models::coords::Coordinates;
use rgeoattend::models::location::AttendanceLocation;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Bangalore office center used across the tests.
pub const OFFICE: (f64, f64) = (12.9716, 77.5946);
/// A point ~60 m from the office.
pub const NEAR_OFFICE: (f64, f64) = (12.9720, 77.5950);
/// Chennai, ~290 km from the office.
pub const CHENNAI: (f64, f64) = (13.0827, 80.2707);

pub fn rga() -> Command {
    cargo_bin_cmd!("rgeoattend")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rgeoattend.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
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

/// Initialize a DB through the CLI with one employee (#1) and one office (#1).
pub fn init_db_with_data(db_path: &str) {
    rga()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rga()
        .args(["--db", db_path, "employee", "add", "--name", "Asha"])
        .assert()
        .success();

    rga()
        .args([
            "--db",
            db_path,
            "location",
            "add",
            "--name",
            "HQ",
            "--lat",
            "12.9716",
            "--lon",
            "77.5946",
            "--radius",
            "0.5",
            "--end",
            "18",
        ])
        .assert()
        .success();
}

/// Fresh in-memory database with the full schema.
pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn add_employee(pool: &mut DbPool, name: &str, tz: Option<&str>) -> i64 {
    EmployeeLogic::add(pool, name, tz, 1)
        .expect("add employee")
        .id
}

pub fn add_location(
    pool: &mut DbPool,
    name: &str,
    center: (f64, f64),
    radius_km: f64,
    office_end: Option<f64>,
) -> AttendanceLocation {
    LocationLogic::add(
        pool,
        LocationInput {
            name: name.to_string(),
            latitude: center.0,
            longitude: center.1,
            radius_km,
            address: None,
            company_id: 1,
            office_start: None,
            office_end,
        },
    )
    .expect("add location")
}

pub fn at(p: (f64, f64)) -> Coordinates {
    Coordinates::new(p.0, p.1)
}

/// Location value for pure geofence tests (never stored).
pub fn loc(id: i64, name: &str, center: (f64, f64), radius_km: f64) -> AttendanceLocation {
    AttendanceLocation {
        id,
        name: name.to_string(),
        latitude: center.0,
        longitude: center.1,
        radius_km,
        address: None,
        company_id: 1,
        active: true,
        office_start: None,
        office_end: None,
        employee_ids: Vec::new(),
    }
}
