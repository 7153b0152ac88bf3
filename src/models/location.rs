use super::coords::Coordinates;
use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;
use serde::Serialize;

/// A circular geofence an employee may check in from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceLocation {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub address: Option<String>,
    pub company_id: i64,
    pub active: bool,
    pub office_start: Option<f64>, // fractional hours, 9.5 = 09:30
    pub office_end: Option<f64>,
    pub employee_ids: Vec<i64>,
}

impl AttendanceLocation {
    pub fn center(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn employee_count(&self) -> usize {
        self.employee_ids.len()
    }

    /// Unassigned locations apply to every employee of the company.
    pub fn is_company_wide(&self) -> bool {
        self.employee_ids.is_empty()
    }

    /// Check the configuration-time constraints.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::InvalidLocationConfig(
                "Location name is required.".into(),
            ));
        }

        self.center()
            .validate()
            .map_err(|e| AppError::InvalidLocationConfig(e.to_string()))?;

        if self.radius_km.is_nan() || self.radius_km <= 0.0 {
            return Err(AppError::InvalidLocationConfig(
                "Radius must be greater than 0.".into(),
            ));
        }

        if let Some(start) = self.office_start
            && !valid_hour(start)
        {
            return Err(AppError::InvalidLocationConfig(
                "Office start time must be between 0 and 24.".into(),
            ));
        }
        if let Some(end) = self.office_end
            && !valid_hour(end)
        {
            return Err(AppError::InvalidLocationConfig(
                "Office end time must be between 0 and 24.".into(),
            ));
        }
        if let (Some(start), Some(end)) = (self.office_start, self.office_end)
            && end <= start
        {
            return Err(AppError::InvalidLocationConfig(
                "Office end time must be after start time.".into(),
            ));
        }

        Ok(())
    }
}

fn valid_hour(h: f64) -> bool {
    (0.0..24.0).contains(&h)
}

/// Convert a fractional hour (18.5) into a wall-clock time (18:30).
///
/// Minutes are truncated, so 17.999 gives 17:59.
pub fn hour_to_time(hour: f64) -> Option<NaiveTime> {
    if !valid_hour(hour) {
        return None;
    }
    let h = hour.trunc() as u32;
    let m = (hour.fract() * 60.0).trunc() as u32;
    NaiveTime::from_hms_opt(h, m, 0)
}

/// Render a fractional hour as `HH:MM`.
pub fn format_hour(hour: Option<f64>) -> String {
    hour.and_then(hour_to_time)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}
