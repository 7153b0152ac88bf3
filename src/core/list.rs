use crate::core::export::build_rows;
use crate::db::pool::DbPool;
use crate::db::queries::AttendanceFilter;
use crate::errors::AppResult;
use crate::utils::colors::{RESET, color_for_geofence, color_for_status, colorize_optional};
use crate::utils::formatting::format_hours;
use crate::utils::table::Table;

fn or_dash(s: String) -> String {
    if s.is_empty() { "--".to_string() } else { s }
}

pub struct ListLogic;

impl ListLogic {
    /// Render attendance records as a table, times in `tz`.
    pub fn render(pool: &DbPool, filter: &AttendanceFilter, tz: Option<&str>) -> AppResult<Table> {
        let rows = build_rows(pool, filter, tz)?;

        let mut table = Table::new(vec![
            "ID", "Employee", "Check-in", "Check-out", "Worked", "Location", "Dist km", "Fence",
            "Status",
        ]);

        for r in rows {
            let worked = if r.check_out.is_empty() {
                String::new()
            } else {
                format_hours(r.worked_hours)
            };
            let fence = format!(
                "{}{}{}",
                color_for_geofence(r.within_geofence),
                if r.within_geofence { "yes" } else { "no" },
                RESET
            );
            let status = format!("{}{}{}", color_for_status(&r.status), r.status, RESET);

            table.add_row(vec![
                r.id.to_string(),
                r.employee_name,
                r.check_in,
                colorize_optional(&or_dash(r.check_out)),
                colorize_optional(&or_dash(worked)),
                colorize_optional(&or_dash(r.location)),
                format!("{:.2}", r.distance_km),
                fence,
                status,
            ]);
        }

        Ok(table)
    }
}
