use crate::db::employees::load_employees;
use crate::db::locations::load_locations;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{AttendanceFilter, load_attendances};
use crate::errors::{AppError, AppResult};
use crate::export::{AttendanceExport, ExportFormat, export_csv, export_json};
use crate::ui::messages::warning;
use crate::utils::date::parse_range;
use std::collections::HashMap;
use std::io;
use std::path::Path;

/// Refuse to clobber an existing file unless `force` is set.
fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if path.exists() && !force {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!(
                "The file '{}' already exists (use --force to overwrite)",
                path.display()
            ),
        )));
    }
    Ok(())
}

/// Build export rows with employee and location names resolved.
pub fn build_rows(
    pool: &DbPool,
    filter: &AttendanceFilter,
    tz: Option<&str>,
) -> AppResult<Vec<AttendanceExport>> {
    let employees: HashMap<i64, String> = load_employees(&pool.conn)?
        .into_iter()
        .map(|e| (e.id, e.name))
        .collect();
    let locations: HashMap<i64, String> = load_locations(&pool.conn, true)?
        .into_iter()
        .map(|l| (l.id, l.name))
        .collect();

    let rows = load_attendances(&pool.conn, filter)?
        .iter()
        .map(|a| {
            let emp_name = employees
                .get(&a.employee_id)
                .map(String::as_str)
                .unwrap_or("?");
            let loc_name = a
                .location_id
                .and_then(|id| locations.get(&id))
                .map(String::as_str);
            AttendanceExport::from_record(a, emp_name, loc_name, tz)
        })
        .collect();

    Ok(rows)
}

pub struct ExportLogic;

impl ExportLogic {
    /// Export attendance records.
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or `YYYY`, `YYYY-MM`, `YYYY-MM-DD`,
    ///   optionally as `start:end`
    ///
    /// Returns the number of exported records.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        employee_id: Option<i64>,
        tz: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        let (from, to) = match range {
            None => (None, None),
            Some(r) if r.eq_ignore_ascii_case("all") => (None, None),
            Some(r) => {
                let (f, t) = parse_range(r)?;
                (Some(f), Some(t))
            }
        };

        let filter = AttendanceFilter {
            employee_id,
            open_only: false,
            from,
            to,
        };
        let rows = build_rows(pool, &filter, tz)?;

        if rows.is_empty() {
            warning("No attendance records found for the selected range. Nothing to export.");
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        ttlog(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} records exported as {}", rows.len(), format.as_str()),
        )?;

        Ok(rows.len())
    }
}
