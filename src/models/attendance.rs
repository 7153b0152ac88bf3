use super::coords::Coordinates;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Storage format of every timestamp (naive, UTC).
pub const DB_DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    CheckedIn,
    Closed,
    AutoClosed,
}

impl SessionState {
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::CheckedIn => "open",
            SessionState::Closed => "closed",
            SessionState::AutoClosed => "auto",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Attendance {
    pub id: i64,
    pub employee_id: i64,
    pub check_in: NaiveDateTime,       // ⇔ attendance.check_in (UTC)
    pub check_out: Option<NaiveDateTime>,
    pub check_in_latitude: f64,
    pub check_in_longitude: f64,
    pub check_out_latitude: Option<f64>,
    pub check_out_longitude: Option<f64>,
    pub check_in_location: Option<String>,  // generated column
    pub check_out_location: Option<String>, // generated column
    pub is_within_geofence: bool,
    pub distance_from_office: f64,
    pub location_id: Option<i64>,
    pub auto_checkout: bool,
    pub worked_hours: f64, // generated column
}

impl Attendance {
    pub fn is_open(&self) -> bool {
        self.check_out.is_none()
    }

    pub fn state(&self) -> SessionState {
        match (self.check_out, self.auto_checkout) {
            (None, _) => SessionState::CheckedIn,
            (Some(_), true) => SessionState::AutoClosed,
            (Some(_), false) => SessionState::Closed,
        }
    }

    pub fn check_in_coords(&self) -> Coordinates {
        Coordinates::new(self.check_in_latitude, self.check_in_longitude)
    }
}

/// Values written when a session is opened.
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub employee_id: i64,
    pub check_in: NaiveDateTime,
    pub coords: Coordinates,
    pub is_within_geofence: bool,
    pub distance_from_office: f64,
    pub location_id: Option<i64>,
}
