use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_data, rga, setup_test_db, temp_out};

fn checkin(db_path: &str, now: &str, lat: &str, lon: &str) -> assert_cmd::assert::Assert {
    rga()
        .args([
            "--db", db_path, "-e", "1", "--now", now, "checkin", "--lat", lat, "--lon", lon,
        ])
        .assert()
}

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("init_creates_schema");

    rga()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    rga()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"))
        .stdout(contains("pending migration").not());
}

#[test]
fn test_employee_and_location_listing() {
    let db_path = setup_test_db("employee_location_listing");
    init_db_with_data(&db_path);

    rga()
        .args(["--db", &db_path, "employee", "list"])
        .assert()
        .success()
        .stdout(contains("Asha"));

    rga()
        .args(["--db", &db_path, "location", "list"])
        .assert()
        .success()
        .stdout(contains("HQ"))
        .stdout(contains("18:00"));
}

#[test]
fn test_location_add_rejects_zero_radius() {
    let db_path = setup_test_db("location_zero_radius");
    init_db_with_data(&db_path);

    rga()
        .args([
            "--db", &db_path, "location", "add", "--name", "Bad", "--lat", "1", "--lon", "1",
            "--radius", "0",
        ])
        .assert()
        .failure()
        .stderr(contains("Radius must be greater than 0."));
}

#[test]
fn test_location_edit_clear_office_hours() {
    let db_path = setup_test_db("location_clear_hours");
    init_db_with_data(&db_path);

    rga()
        .args(["--db", &db_path, "location", "edit", "1", "--clear-office-hours"])
        .assert()
        .success()
        .stdout(contains("updated"));

    rga()
        .args(["--db", &db_path, "location", "list"])
        .assert()
        .success()
        .stdout(contains("18:00").not())
        .stdout(contains("--:-- - --:--"));
}

#[test]
fn test_checkin_checkout_flow() {
    let db_path = setup_test_db("checkin_checkout_flow");
    init_db_with_data(&db_path);

    checkin(&db_path, "2025-03-10T09:00:00Z", "12.9720", "77.5950")
        .success()
        .stdout(contains("Checked in at 2025-03-10 09:00:00"))
        .stdout(contains("HQ"));

    rga()
        .args(["--db", &db_path, "-e", "1", "status", "--json"])
        .assert()
        .success()
        .stdout(contains("\"is_checked_in\": true"))
        .stdout(contains("\"employee_name\": \"Asha\""));

    rga()
        .args([
            "--db",
            &db_path,
            "-e",
            "1",
            "--now",
            "2025-03-10T17:15:00Z",
            "checkout",
            "--lat",
            "12.9716",
            "--lon",
            "77.5946",
        ])
        .assert()
        .success()
        .stdout(contains("Checked out at 2025-03-10 17:15:00"))
        .stdout(contains("08h 15m"));

    rga()
        .args(["--db", &db_path, "-e", "1", "status"])
        .assert()
        .success()
        .stdout(contains("Not checked in"));
}

#[test]
fn test_checkin_twice_fails() {
    let db_path = setup_test_db("checkin_twice");
    init_db_with_data(&db_path);

    checkin(&db_path, "2025-03-10T09:00:00Z", "12.9720", "77.5950").success();
    checkin(&db_path, "2025-03-10T09:05:00Z", "12.9720", "77.5950")
        .failure()
        .stderr(contains("already checked in"));
}

#[test]
fn test_checkin_outside_geofence_fails() {
    let db_path = setup_test_db("checkin_outside");
    init_db_with_data(&db_path);

    checkin(&db_path, "2025-03-10T09:00:00Z", "13.0827", "80.2707")
        .failure()
        .stderr(contains("away from HQ"))
        .stderr(contains("within 0.50 km radius"));
}

#[test]
fn test_checkin_without_coordinates_fails() {
    let db_path = setup_test_db("checkin_no_coords");
    init_db_with_data(&db_path);

    rga()
        .args(["--db", &db_path, "-e", "1", "checkin"])
        .assert()
        .failure()
        .stderr(contains("Location is required for check-in"));
}

#[test]
fn test_admin_checkin_without_coordinates() {
    let db_path = setup_test_db("admin_checkin");
    init_db_with_data(&db_path);

    rga()
        .args([
            "--db",
            &db_path,
            "-e",
            "1",
            "--admin",
            "--now",
            "2025-03-10T09:00:00Z",
            "checkin",
        ])
        .assert()
        .success()
        .stdout(contains("Checked in at 2025-03-10 09:00:00"));
}

#[test]
fn test_checkout_without_checkin_fails() {
    let db_path = setup_test_db("checkout_without_checkin");
    init_db_with_data(&db_path);

    rga()
        .args([
            "--db", &db_path, "-e", "1", "checkout", "--lat", "12.9716", "--lon", "77.5946",
        ])
        .assert()
        .failure()
        .stderr(contains("not checked in"));
}

#[test]
fn test_status_json_without_employee() {
    let db_path = setup_test_db("status_no_employee");
    init_db_with_data(&db_path);

    rga()
        .args(["--db", &db_path, "status", "--json"])
        .assert()
        .success()
        .stdout(contains("\"error\": \"No employee linked to this user\""));
}

#[test]
fn test_sweep_auto_checkout() {
    let db_path = setup_test_db("sweep_auto_checkout");
    init_db_with_data(&db_path);

    checkin(&db_path, "2025-03-10T09:00:00Z", "12.9720", "77.5950").success();

    rga()
        .args(["--db", &db_path, "--now", "2025-03-10T17:00:00Z", "sweep"])
        .assert()
        .success()
        .stdout(contains("No open session past office end"));

    rga()
        .args(["--db", &db_path, "--now", "2025-03-10T18:00:00Z", "sweep"])
        .assert()
        .success()
        .stdout(contains("1 session(s) closed"));

    rga()
        .args(["--db", &db_path, "list", "--all"])
        .assert()
        .success()
        .stdout(contains("2025-03-10 18:00:00"))
        .stdout(contains("auto"))
        .stdout(contains("09h 00m"));

    rga()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("auto_checkout"))
        .stdout(contains("check_in"));
}

#[test]
fn test_list_period_filter() {
    let db_path = setup_test_db("list_period_filter");
    init_db_with_data(&db_path);

    checkin(&db_path, "2025-03-10T09:00:00Z", "12.9720", "77.5950").success();

    rga()
        .args(["--db", &db_path, "-e", "1", "list", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(contains("2025-03-10 09:00:00"))
        .stdout(contains("open"));

    rga()
        .args(["--db", &db_path, "-e", "1", "list", "--period", "2025-04"])
        .assert()
        .success()
        .stdout(contains("No attendance records found"));

    rga()
        .args(["--db", &db_path, "list", "--period", "2025-13"])
        .assert()
        .failure()
        .stderr(contains("Invalid range"));
}

#[test]
fn test_backup_refuses_overwrite() {
    let db_path = setup_test_db("backup_overwrite");
    init_db_with_data(&db_path);
    let out = temp_out("backup_overwrite", "sqlite");

    rga()
        .args(["--db", &db_path, "backup", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    rga()
        .args(["--db", &db_path, "backup", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    rga()
        .args(["--db", &db_path, "backup", "--file", &out, "--force"])
        .assert()
        .success();
}

#[test]
fn test_db_info() {
    let db_path = setup_test_db("db_info");
    init_db_with_data(&db_path);

    rga()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Employees:"))
        .stdout(contains("Active locations:"));
}
