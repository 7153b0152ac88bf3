use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// A schema step, applied once and remembered in the `log` table.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_employees",
        description: "Created employees table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS employees (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            company_id  INTEGER NOT NULL DEFAULT 1,
            timezone    TEXT,
            created_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250301_0002_create_locations",
        description: "Created locations and location_employees tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS locations (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            name          TEXT NOT NULL,
            latitude      REAL NOT NULL,
            longitude     REAL NOT NULL,
            radius_km     REAL NOT NULL DEFAULT 0.5 CHECK(radius_km > 0),
            address       TEXT,
            company_id    INTEGER NOT NULL DEFAULT 1,
            active        INTEGER NOT NULL DEFAULT 1,
            office_start  REAL,
            office_end    REAL,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS location_employees (
            location_id  INTEGER NOT NULL REFERENCES locations(id) ON DELETE CASCADE,
            employee_id  INTEGER NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
            PRIMARY KEY (location_id, employee_id)
        );

        CREATE INDEX IF NOT EXISTS idx_locations_company ON locations(company_id, active);
        CREATE INDEX IF NOT EXISTS idx_location_employees_emp ON location_employees(employee_id);
        "#,
    },
    Migration {
        version: "20250301_0003_create_attendance",
        description: "Created attendance table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id                    INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id           INTEGER NOT NULL REFERENCES employees(id),
            check_in              TEXT NOT NULL,
            check_out             TEXT,
            check_in_latitude     REAL NOT NULL DEFAULT 0,
            check_in_longitude    REAL NOT NULL DEFAULT 0,
            check_out_latitude    REAL,
            check_out_longitude   REAL,
            is_within_geofence    INTEGER NOT NULL DEFAULT 0,
            distance_from_office  REAL NOT NULL DEFAULT 0,
            location_id           INTEGER REFERENCES locations(id) ON DELETE SET NULL,
            auto_checkout         INTEGER NOT NULL DEFAULT 0,
            check_in_location     TEXT GENERATED ALWAYS AS (
                CASE WHEN check_in_latitude != 0 AND check_in_longitude != 0
                     THEN printf('%s, %s', check_in_latitude, check_in_longitude)
                END) VIRTUAL,
            check_out_location    TEXT GENERATED ALWAYS AS (
                CASE WHEN check_out_latitude != 0 AND check_out_longitude != 0
                     THEN printf('%s, %s', check_out_latitude, check_out_longitude)
                END) VIRTUAL,
            worked_hours          REAL GENERATED ALWAYS AS (
                CASE WHEN check_out IS NULL THEN 0.0
                     ELSE (julianday(check_out) - julianday(check_in)) * 24.0
                END) VIRTUAL
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_check_in ON attendance(check_in);
        "#,
    },
    Migration {
        version: "20250315_0004_one_open_session",
        description: "Enforced a single open attendance per employee",
        sql: r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_attendance_one_open
            ON attendance(employee_id) WHERE check_out IS NULL;
        "#,
    },
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;
    tx.commit()?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Number of known migrations that are not applied yet.
pub fn pending_count(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;
    let mut n = 0;
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            n += 1;
        }
    }
    Ok(n)
}

/// Public entry point: run all pending migrations.
///
/// Invocata da db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
        }
    }

    Ok(())
}
