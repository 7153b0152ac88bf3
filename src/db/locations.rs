use crate::errors::AppResult;
use crate::models::location::AttendanceLocation;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_LOCATION: &str = "SELECT id, name, latitude, longitude, radius_km, address,
        company_id, active, office_start, office_end
     FROM locations";

/// Map a `locations` row; `employee_ids` is filled separately.
fn map_location(row: &Row) -> Result<AttendanceLocation> {
    Ok(AttendanceLocation {
        id: row.get("id")?,
        name: row.get("name")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        radius_km: row.get("radius_km")?,
        address: row.get("address")?,
        company_id: row.get("company_id")?,
        active: row.get::<_, i32>("active")? == 1,
        office_start: row.get("office_start")?,
        office_end: row.get("office_end")?,
        employee_ids: Vec::new(),
    })
}

fn load_assignments(conn: &Connection, location_id: i64) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare_cached(
        "SELECT employee_id FROM location_employees
         WHERE location_id = ?1
         ORDER BY employee_id ASC",
    )?;
    let rows = stmt.query_map([location_id], |row| row.get(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn collect_with_assignments(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> AppResult<Vec<AttendanceLocation>> {
    let mut locations = {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, map_location)?;

        let mut v = Vec::new();
        for r in rows {
            v.push(r?);
        }
        v
    };

    for loc in &mut locations {
        loc.employee_ids = load_assignments(conn, loc.id)?;
    }
    Ok(locations)
}

pub fn insert_location(conn: &Connection, loc: &AttendanceLocation) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO locations (name, latitude, longitude, radius_km, address,
                                company_id, active, office_start, office_end, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            loc.name,
            loc.latitude,
            loc.longitude,
            loc.radius_km,
            loc.address,
            loc.company_id,
            if loc.active { 1 } else { 0 },
            loc.office_start,
            loc.office_end,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update every column except id, company and assignments.
pub fn update_location(conn: &Connection, loc: &AttendanceLocation) -> AppResult<()> {
    conn.execute(
        "UPDATE locations
         SET name = ?1, latitude = ?2, longitude = ?3, radius_km = ?4,
             address = ?5, active = ?6, office_start = ?7, office_end = ?8
         WHERE id = ?9",
        params![
            loc.name,
            loc.latitude,
            loc.longitude,
            loc.radius_km,
            loc.address,
            if loc.active { 1 } else { 0 },
            loc.office_start,
            loc.office_end,
            loc.id,
        ],
    )?;
    Ok(())
}

pub fn find_location(conn: &Connection, id: i64) -> AppResult<Option<AttendanceLocation>> {
    let sql = format!("{SELECT_LOCATION} WHERE id = ?1");
    let found = conn.query_row(&sql, [id], map_location).optional()?;

    match found {
        Some(mut loc) => {
            loc.employee_ids = load_assignments(conn, loc.id)?;
            Ok(Some(loc))
        }
        None => Ok(None),
    }
}

pub fn load_locations(conn: &Connection, include_inactive: bool) -> AppResult<Vec<AttendanceLocation>> {
    let sql = if include_inactive {
        format!("{SELECT_LOCATION} ORDER BY id ASC")
    } else {
        format!("{SELECT_LOCATION} WHERE active = 1 ORDER BY id ASC")
    };
    collect_with_assignments(conn, &sql, params![])
}

/// Active locations explicitly assigned to the employee.
pub fn assigned_active_locations(
    conn: &Connection,
    employee_id: i64,
) -> AppResult<Vec<AttendanceLocation>> {
    let sql = format!(
        "{SELECT_LOCATION}
         WHERE active = 1
           AND id IN (SELECT location_id FROM location_employees WHERE employee_id = ?1)
         ORDER BY id ASC"
    );
    collect_with_assignments(conn, &sql, [employee_id])
}

/// Active locations of the company that nobody is assigned to.
pub fn company_wide_locations(
    conn: &Connection,
    company_id: i64,
) -> AppResult<Vec<AttendanceLocation>> {
    let sql = format!(
        "{SELECT_LOCATION}
         WHERE active = 1
           AND company_id = ?1
           AND NOT EXISTS (SELECT 1 FROM location_employees le WHERE le.location_id = locations.id)
         ORDER BY id ASC"
    );
    collect_with_assignments(conn, &sql, [company_id])
}

/// Returns false when the assignment already existed.
pub fn assign_employee(conn: &Connection, location_id: i64, employee_id: i64) -> AppResult<bool> {
    let n = conn.execute(
        "INSERT OR IGNORE INTO location_employees (location_id, employee_id) VALUES (?1, ?2)",
        params![location_id, employee_id],
    )?;
    Ok(n > 0)
}

/// Returns false when there was nothing to remove.
pub fn unassign_employee(conn: &Connection, location_id: i64, employee_id: i64) -> AppResult<bool> {
    let n = conn.execute(
        "DELETE FROM location_employees WHERE location_id = ?1 AND employee_id = ?2",
        params![location_id, employee_id],
    )?;
    Ok(n > 0)
}
