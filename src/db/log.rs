//! Audit trail: every state change leaves one row in the `log` table.

use crate::errors::AppResult;
use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, params};

/// Append an audit line.
///
/// `operation` is a short machine tag (`check_in`, `auto_checkout`,
/// `location_edit`, ...); `target` names what was touched.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?
    .execute(params![stamp, operation, target, message])?;

    Ok(())
}
