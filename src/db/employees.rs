use crate::errors::AppResult;
use crate::models::employee::Employee;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_employee(row: &Row) -> Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        company_id: row.get("company_id")?,
        timezone: row.get("timezone")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_employee(
    conn: &Connection,
    name: &str,
    company_id: i64,
    timezone: Option<&str>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO employees (name, company_id, timezone, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![name, company_id, timezone, Local::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_employee(conn: &Connection, id: i64) -> AppResult<Option<Employee>> {
    let emp = conn
        .query_row(
            "SELECT * FROM employees WHERE id = ?1",
            [id],
            map_employee,
        )
        .optional()?;
    Ok(emp)
}

pub fn load_employees(conn: &Connection) -> AppResult<Vec<Employee>> {
    let mut stmt = conn.prepare("SELECT * FROM employees ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_employee)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Returns the number of updated rows (0 when the employee does not exist).
pub fn update_timezone(conn: &Connection, id: i64, timezone: Option<&str>) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE employees SET timezone = ?1 WHERE id = ?2",
        params![timezone, id],
    )?;
    Ok(n)
}
