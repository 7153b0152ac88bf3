use crate::errors::{AppError, AppResult};
use crate::models::attendance::{Attendance, DB_DATETIME_FMT, NewAttendance};
use crate::models::coords::Coordinates;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn parse_db_datetime(idx: usize, raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, DB_DATETIME_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(raw.to_string())),
        )
    })
}

pub fn to_db_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DB_DATETIME_FMT).to_string()
}

pub fn map_attendance(row: &Row) -> Result<Attendance> {
    let check_in_raw: String = row.get("check_in")?;
    let check_out_raw: Option<String> = row.get("check_out")?;

    let check_in = parse_db_datetime(0, &check_in_raw)?;
    let check_out = match check_out_raw {
        Some(s) => Some(parse_db_datetime(0, &s)?),
        None => None,
    };

    Ok(Attendance {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        check_in,
        check_out,
        check_in_latitude: row.get("check_in_latitude")?,
        check_in_longitude: row.get("check_in_longitude")?,
        check_out_latitude: row.get("check_out_latitude")?,
        check_out_longitude: row.get("check_out_longitude")?,
        check_in_location: row.get("check_in_location")?,
        check_out_location: row.get("check_out_location")?,
        is_within_geofence: row.get::<_, i32>("is_within_geofence")? == 1,
        distance_from_office: row.get("distance_from_office")?,
        location_id: row.get("location_id")?,
        auto_checkout: row.get::<_, i32>("auto_checkout")? == 1,
        worked_hours: row.get("worked_hours")?,
    })
}

const SELECT_ATTENDANCE: &str = "SELECT id, employee_id, check_in, check_out,
        check_in_latitude, check_in_longitude, check_out_latitude, check_out_longitude,
        check_in_location, check_out_location, is_within_geofence, distance_from_office,
        location_id, auto_checkout, worked_hours
     FROM attendance";

pub fn find_attendance(conn: &Connection, id: i64) -> AppResult<Option<Attendance>> {
    let sql = format!("{SELECT_ATTENDANCE} WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_attendance).optional()?)
}

/// The employee's session without check-out, if any.
pub fn find_open_attendance(conn: &Connection, employee_id: i64) -> AppResult<Option<Attendance>> {
    let sql = format!(
        "{SELECT_ATTENDANCE}
         WHERE employee_id = ?1 AND check_out IS NULL
         ORDER BY check_in DESC
         LIMIT 1"
    );
    Ok(conn
        .query_row(&sql, [employee_id], map_attendance)
        .optional()?)
}

pub fn load_open_attendances(conn: &Connection) -> AppResult<Vec<Attendance>> {
    load_attendances(
        conn,
        &AttendanceFilter {
            open_only: true,
            ..Default::default()
        },
    )
}

pub fn insert_attendance(conn: &Connection, rec: &NewAttendance) -> Result<i64> {
    conn.execute(
        "INSERT INTO attendance (employee_id, check_in, check_in_latitude, check_in_longitude,
                                 is_within_geofence, distance_from_office, location_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            rec.employee_id,
            to_db_datetime(&rec.check_in),
            rec.coords.latitude,
            rec.coords.longitude,
            if rec.is_within_geofence { 1 } else { 0 },
            rec.distance_from_office,
            rec.location_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Stamp check-out on an open session. Closed sessions are never touched.
///
/// Returns the number of rows written (0 if the session was already closed).
pub fn close_attendance(
    conn: &Connection,
    id: i64,
    check_out: &NaiveDateTime,
    coords: &Coordinates,
    auto_checkout: bool,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE attendance
         SET check_out = ?1, check_out_latitude = ?2, check_out_longitude = ?3,
             auto_checkout = ?4
         WHERE id = ?5 AND check_out IS NULL",
        params![
            to_db_datetime(check_out),
            coords.latitude,
            coords.longitude,
            if auto_checkout { 1 } else { 0 },
            id,
        ],
    )?;
    Ok(n)
}

/// Filter for listing and exporting attendance records.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub employee_id: Option<i64>,
    pub open_only: bool,
    /// Inclusive bounds on the check-in date (UTC).
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub fn load_attendances(conn: &Connection, filter: &AttendanceFilter) -> AppResult<Vec<Attendance>> {
    let mut clauses: Vec<&str> = Vec::new();
    let mut args: Vec<Value> = Vec::new();

    if let Some(emp) = filter.employee_id {
        clauses.push("employee_id = ?");
        args.push(Value::Integer(emp));
    }
    if filter.open_only {
        clauses.push("check_out IS NULL");
    }
    if let Some(from) = filter.from {
        clauses.push("date(check_in) >= ?");
        args.push(Value::Text(from.format("%Y-%m-%d").to_string()));
    }
    if let Some(to) = filter.to {
        clauses.push("date(check_in) <= ?");
        args.push(Value::Text(to.format("%Y-%m-%d").to_string()));
    }

    let mut sql = SELECT_ATTENDANCE.to_string();
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY check_in ASC, id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(args), map_attendance)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
