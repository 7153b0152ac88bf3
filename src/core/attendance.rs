//! Check-in / check-out workflow, status query and auto-checkout sweep.

use crate::config::{Config, SweepPolicy};
use crate::core::geofence::{self, GeofenceVerdict};
use crate::db::employees::find_employee;
use crate::db::locations::{assigned_active_locations, company_wide_locations, find_location};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    close_attendance, find_attendance, find_open_attendance, insert_attendance,
    load_open_attendances,
};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{Attendance, NewAttendance};
use crate::models::context::RequestContext;
use crate::models::coords::Coordinates;
use crate::models::employee::Employee;
use crate::utils::tz::{office_end_instant, resolve_tz, to_user_timezone};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rusqlite::{Connection, ErrorCode, TransactionBehavior};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CheckInResult {
    pub id: i64,
    pub employee_id: i64,
    pub check_in_time: String,
    pub within_geofence: bool,
    pub location_name: Option<String>,
    pub distance_km: f64,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckOutResult {
    pub id: i64,
    pub check_out_time: String,
    pub worked_hours: f64,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceStatus {
    pub employee_name: String,
    pub is_checked_in: bool,
    pub check_in_time: Option<String>,
    pub attendance_id: Option<i64>,
    pub worked_hours: f64,
    pub is_admin: bool,
}

/// Status answer for a dashboard: either the status or `{"error": ...}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StatusResponse {
    Status(AttendanceStatus),
    Error { error: String },
}

/// Sweep parameters taken from the configuration.
#[derive(Debug, Clone)]
pub struct SweepSettings {
    pub default_office_end: f64,
    pub default_timezone: String,
    pub policy: SweepPolicy,
}

impl From<&Config> for SweepSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            default_office_end: cfg.default_office_end,
            default_timezone: cfg.default_timezone.clone(),
            policy: cfg.sweep_on_error,
        }
    }
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            default_office_end: 18.0,
            default_timezone: "UTC".to_string(),
            policy: SweepPolicy::Continue,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepReport {
    /// Sessions closed at office end.
    pub closed: Vec<i64>,
    /// Sessions whose office end has not been reached yet.
    pub still_open: Vec<i64>,
    /// Sessions that could not be processed, with the reason.
    pub failed: Vec<(i64, String)>,
}

/// Resolve the employee linked to the caller.
fn linked_employee(conn: &Connection, ctx: &RequestContext) -> AppResult<Employee> {
    let id = ctx.employee_id.ok_or(AppError::MissingEmployeeLink)?;
    find_employee(conn, id)?.ok_or(AppError::MissingEmployeeLink)
}

/// Caller's display timezone, falling back to the employee's own.
fn display_tz<'a>(ctx: &'a RequestContext, emp: &'a Employee) -> Option<&'a str> {
    ctx.timezone.as_deref().or(emp.timezone.as_deref())
}

fn is_open_session_conflict(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

pub struct AttendanceLogic;

impl AttendanceLogic {
    /// Open an attendance session for the caller's employee.
    pub fn check_in(
        pool: &mut DbPool,
        ctx: &RequestContext,
        coords: Option<Coordinates>,
        now: DateTime<Utc>,
    ) -> AppResult<CheckInResult> {
        // IMMEDIATE takes the write lock up front: the open-session check and
        // the insert cannot interleave with another writer.
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let emp = linked_employee(&tx, ctx)?;

        if find_open_attendance(&tx, emp.id)?.is_some() {
            return Err(AppError::AlreadyCheckedIn);
        }

        if !ctx.is_admin && coords.is_none() {
            return Err(AppError::MissingLocationData("check-in"));
        }
        if let Some(c) = &coords {
            c.validate()?;
        }

        let candidates = geofence::candidate_locations(
            assigned_active_locations(&tx, emp.id)?,
            company_wide_locations(&tx, ctx.company_id)?,
        );

        let verdict = geofence::validate(coords.as_ref(), &candidates, ctx.is_admin);

        match &verdict {
            GeofenceVerdict::Rejected {
                distance_km,
                nearest,
            } => {
                return Err(AppError::GeofenceRejected {
                    distance_km: *distance_km,
                    location: nearest.name.clone(),
                    radius_km: nearest.radius_km,
                });
            }
            GeofenceVerdict::NotConfigured => return Err(AppError::NoGeofenceConfigured),
            GeofenceVerdict::Accepted { .. } | GeofenceVerdict::Bypassed { .. } => {}
        }

        let matched = verdict.location();
        let rec = NewAttendance {
            employee_id: emp.id,
            check_in: now.naive_utc(),
            coords: coords.unwrap_or_else(Coordinates::origin),
            is_within_geofence: verdict.within_geofence(),
            distance_from_office: verdict.distance_km(),
            location_id: matched.map(|l| l.id),
        };

        let id = insert_attendance(&tx, &rec).map_err(|e| {
            if is_open_session_conflict(&e) {
                AppError::AlreadyCheckedIn
            } else {
                AppError::Db(e)
            }
        })?;

        let location_name = matched.map(|l| l.name.clone());
        ttlog(
            &tx,
            "check_in",
            &format!("employee {}", emp.id),
            &format!(
                "Attendance {} opened at {} ({:.2} km{})",
                id,
                location_name.as_deref().unwrap_or("no location"),
                rec.distance_from_office,
                if ctx.is_admin { ", admin" } else { "" },
            ),
        )?;
        tx.commit()?;

        Ok(CheckInResult {
            id,
            employee_id: emp.id,
            check_in_time: to_user_timezone(&rec.check_in, display_tz(ctx, &emp)),
            within_geofence: rec.is_within_geofence,
            location_name,
            distance_km: rec.distance_from_office,
            is_admin: ctx.is_admin,
        })
    }

    /// Close the caller's open session. Check-in fields are left untouched.
    pub fn check_out(
        pool: &mut DbPool,
        ctx: &RequestContext,
        coords: Option<Coordinates>,
        now: DateTime<Utc>,
    ) -> AppResult<CheckOutResult> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let emp = linked_employee(&tx, ctx)?;

        if !ctx.is_admin && coords.is_none() {
            return Err(AppError::MissingLocationData("check-out"));
        }
        if let Some(c) = &coords {
            c.validate()?;
        }

        let open = find_open_attendance(&tx, emp.id)?.ok_or(AppError::NotCheckedIn)?;

        let check_out = now.naive_utc();
        let coords = coords.unwrap_or_else(Coordinates::origin);
        if close_attendance(&tx, open.id, &check_out, &coords, false)? == 0 {
            return Err(AppError::NotCheckedIn);
        }

        // worked_hours is computed by the storage layer
        let closed = find_attendance(&tx, open.id)?
            .ok_or_else(|| AppError::NotFound(format!("Attendance {}", open.id)))?;

        ttlog(
            &tx,
            "check_out",
            &format!("employee {}", emp.id),
            &format!(
                "Attendance {} closed after {:.2} h",
                closed.id, closed.worked_hours
            ),
        )?;
        tx.commit()?;

        Ok(CheckOutResult {
            id: closed.id,
            check_out_time: to_user_timezone(&check_out, display_tz(ctx, &emp)),
            worked_hours: closed.worked_hours,
            is_admin: ctx.is_admin,
        })
    }

    /// Read-only status for the dashboard. Never fails: problems are
    /// reported as `StatusResponse::Error`.
    pub fn get_status(pool: &DbPool, ctx: &RequestContext) -> StatusResponse {
        match Self::try_status(&pool.conn, ctx) {
            Ok(status) => StatusResponse::Status(status),
            Err(AppError::MissingEmployeeLink) => StatusResponse::Error {
                error: "No employee linked to this user".to_string(),
            },
            Err(e) => StatusResponse::Error {
                error: e.to_string(),
            },
        }
    }

    fn try_status(conn: &Connection, ctx: &RequestContext) -> AppResult<AttendanceStatus> {
        let emp = linked_employee(conn, ctx)?;
        let open = find_open_attendance(conn, emp.id)?;
        let tz = display_tz(ctx, &emp);

        Ok(AttendanceStatus {
            employee_name: emp.name.clone(),
            is_checked_in: open.is_some(),
            check_in_time: open.as_ref().map(|a| to_user_timezone(&a.check_in, tz)),
            attendance_id: open.as_ref().map(|a| a.id),
            worked_hours: open.as_ref().map(|a| a.worked_hours).unwrap_or(0.0),
            is_admin: ctx.is_admin,
        })
    }

    /// Close every open session whose office end has passed.
    ///
    /// The session is closed at the office-end instant (not at `now`), flagged
    /// as auto-checkout, and the check-in coordinates are reused for the
    /// check-out.
    pub fn auto_checkout_sweep(
        pool: &mut DbPool,
        settings: &SweepSettings,
        now: DateTime<Utc>,
    ) -> AppResult<SweepReport> {
        let open = load_open_attendances(&pool.conn)?;
        let mut report = SweepReport::default();

        for att in open {
            match Self::sweep_one(&pool.conn, &att, settings, now) {
                Ok(true) => report.closed.push(att.id),
                Ok(false) => report.still_open.push(att.id),
                Err(e) => match settings.policy {
                    SweepPolicy::Continue => {
                        let mut reason = e.to_string();
                        if let Err(log_err) = ttlog(
                            &pool.conn,
                            "auto_checkout_failed",
                            &format!("attendance {}", att.id),
                            &reason,
                        ) {
                            reason = format!("{reason} (audit log not written: {log_err})");
                        }
                        report.failed.push((att.id, reason));
                    }
                    SweepPolicy::Abort => return Err(e),
                },
            }
        }

        ttlog(
            &pool.conn,
            "sweep",
            "",
            &format!(
                "{} closed, {} still open, {} failed",
                report.closed.len(),
                report.still_open.len(),
                report.failed.len()
            ),
        )?;

        Ok(report)
    }

    /// Returns true when the session was closed.
    fn sweep_one(
        conn: &Connection,
        att: &Attendance,
        settings: &SweepSettings,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let emp = find_employee(conn, att.employee_id)?
            .ok_or_else(|| AppError::NotFound(format!("Employee {}", att.employee_id)))?;

        let office_end_hour = match att.location_id {
            Some(loc_id) => find_location(conn, loc_id)?.and_then(|l| l.office_end),
            None => None,
        }
        .unwrap_or(settings.default_office_end);

        let tz_name = emp
            .timezone
            .as_deref()
            .unwrap_or(settings.default_timezone.as_str());
        let tz = resolve_tz(Some(tz_name)).unwrap_or(Tz::UTC);

        let office_end = office_end_instant(&att.check_in, office_end_hour, tz)?;
        let now_local = now.with_timezone(&tz);

        if now_local < office_end.with_timezone(&tz) {
            return Ok(false);
        }

        let written = close_attendance(
            conn,
            att.id,
            &office_end.naive_utc(),
            &att.check_in_coords(),
            true,
        )?;

        if written > 0 {
            ttlog(
                conn,
                "auto_checkout",
                &format!("employee {}", emp.id),
                &format!(
                    "Attendance {} closed at office end {}",
                    att.id,
                    to_user_timezone(&office_end.naive_utc(), Some(tz_name))
                ),
            )?;
        }

        Ok(written > 0)
    }
}
