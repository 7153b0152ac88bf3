use crate::models::attendance::Attendance;
use crate::utils::tz::to_user_timezone;
use serde::Serialize;

/// Flat attendance row for CSV / JSON export.
///
/// Times are rendered in the export timezone; coordinates stay raw.
#[derive(Serialize, Clone, Debug)]
pub struct AttendanceExport {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub check_in: String,
    pub check_out: String,
    pub check_in_latitude: f64,
    pub check_in_longitude: f64,
    pub check_out_latitude: Option<f64>,
    pub check_out_longitude: Option<f64>,
    pub check_in_location: String,
    pub check_out_location: String,
    pub within_geofence: bool,
    pub distance_km: f64,
    pub location: String,
    pub auto_checkout: bool,
    pub worked_hours: f64,
    pub status: String,
}

impl AttendanceExport {
    pub fn from_record(
        a: &Attendance,
        employee_name: &str,
        location_name: Option<&str>,
        tz: Option<&str>,
    ) -> Self {
        Self {
            id: a.id,
            employee_id: a.employee_id,
            employee_name: employee_name.to_string(),
            check_in: to_user_timezone(&a.check_in, tz),
            check_out: a
                .check_out
                .map(|t| to_user_timezone(&t, tz))
                .unwrap_or_default(),
            check_in_latitude: a.check_in_latitude,
            check_in_longitude: a.check_in_longitude,
            check_out_latitude: a.check_out_latitude,
            check_out_longitude: a.check_out_longitude,
            check_in_location: a.check_in_location.clone().unwrap_or_default(),
            check_out_location: a.check_out_location.clone().unwrap_or_default(),
            within_geofence: a.is_within_geofence,
            distance_km: (a.distance_from_office * 100.0).round() / 100.0,
            location: location_name.unwrap_or_default().to_string(),
            auto_checkout: a.auto_checkout,
            worked_hours: (a.worked_hours * 100.0).round() / 100.0,
            status: a.state().label().to_string(),
        }
    }
}
