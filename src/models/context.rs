//! Explicit caller context passed into every attendance operation.

/// Who is calling, on behalf of which company, and how to display times.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Employee linked to the calling user, if any.
    pub employee_id: Option<i64>,
    /// Administrative callers bypass the coordinate requirement and geofence.
    pub is_admin: bool,
    pub company_id: i64,
    /// IANA timezone used for display; UTC when unset.
    pub timezone: Option<String>,
}

impl RequestContext {
    pub fn employee(employee_id: i64, company_id: i64) -> Self {
        Self {
            employee_id: Some(employee_id),
            is_admin: false,
            company_id,
            timezone: None,
        }
    }

    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    pub fn with_timezone(mut self, tz: impl Into<String>) -> Self {
        self.timezone = Some(tz.into());
        self
    }
}
