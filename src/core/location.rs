//! Geofence location administration.

use crate::db::employees::find_employee;
use crate::db::locations::{
    assign_employee, find_location, insert_location, load_locations, unassign_employee,
    update_location,
};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::location::AttendanceLocation;

/// Values for a new location (id and assignments are set by storage).
#[derive(Debug, Clone)]
pub struct LocationInput {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub address: Option<String>,
    pub company_id: i64,
    pub office_start: Option<f64>,
    pub office_end: Option<f64>,
}

/// Partial update; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct LocationPatch {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
    pub address: Option<String>,
    pub office_start: Option<f64>,
    pub office_end: Option<f64>,
    /// Remove the address before applying `address`.
    pub clear_address: bool,
    /// Drop both office hours (the sweep falls back to the configured
    /// default) before applying `office_start` / `office_end`.
    pub clear_office_hours: bool,
}

pub struct LocationLogic;

impl LocationLogic {
    pub fn add(pool: &mut DbPool, input: LocationInput) -> AppResult<AttendanceLocation> {
        let mut loc = AttendanceLocation {
            id: 0,
            name: input.name.trim().to_string(),
            latitude: input.latitude,
            longitude: input.longitude,
            radius_km: input.radius_km,
            address: input.address,
            company_id: input.company_id,
            active: true,
            office_start: input.office_start,
            office_end: input.office_end,
            employee_ids: Vec::new(),
        };
        loc.validate()?;

        loc.id = insert_location(&pool.conn, &loc)?;
        ttlog(
            &pool.conn,
            "location_add",
            &loc.name,
            &format!(
                "Location {} at {} (radius {:.2} km)",
                loc.id,
                loc.center(),
                loc.radius_km
            ),
        )?;

        Ok(loc)
    }

    pub fn edit(pool: &mut DbPool, id: i64, patch: LocationPatch) -> AppResult<AttendanceLocation> {
        let mut loc = Self::get(pool, id)?;

        if let Some(v) = patch.name {
            loc.name = v.trim().to_string();
        }
        if let Some(v) = patch.latitude {
            loc.latitude = v;
        }
        if let Some(v) = patch.longitude {
            loc.longitude = v;
        }
        if let Some(v) = patch.radius_km {
            loc.radius_km = v;
        }
        if patch.clear_address {
            loc.address = None;
        }
        if patch.clear_office_hours {
            loc.office_start = None;
            loc.office_end = None;
        }
        if let Some(v) = patch.address {
            loc.address = Some(v);
        }
        if let Some(v) = patch.office_start {
            loc.office_start = Some(v);
        }
        if let Some(v) = patch.office_end {
            loc.office_end = Some(v);
        }

        // rejected here, never at check-in time
        loc.validate()?;

        update_location(&pool.conn, &loc)?;
        ttlog(
            &pool.conn,
            "location_edit",
            &loc.name,
            &format!("Location {} updated", loc.id),
        )?;

        Ok(loc)
    }

    pub fn set_active(pool: &mut DbPool, id: i64, active: bool) -> AppResult<AttendanceLocation> {
        let mut loc = Self::get(pool, id)?;
        loc.active = active;
        update_location(&pool.conn, &loc)?;

        ttlog(
            &pool.conn,
            if active {
                "location_activate"
            } else {
                "location_deactivate"
            },
            &loc.name,
            &format!("Location {} active = {}", loc.id, active),
        )?;
        Ok(loc)
    }

    /// Returns false if the employee was already assigned.
    pub fn assign(pool: &mut DbPool, location_id: i64, employee_id: i64) -> AppResult<bool> {
        let loc = Self::get(pool, location_id)?;
        if find_employee(&pool.conn, employee_id)?.is_none() {
            return Err(AppError::NotFound(format!("Employee {employee_id}")));
        }

        let added = assign_employee(&pool.conn, loc.id, employee_id)?;
        if added {
            ttlog(
                &pool.conn,
                "location_assign",
                &loc.name,
                &format!("Employee {} assigned to location {}", employee_id, loc.id),
            )?;
        }
        Ok(added)
    }

    /// Returns false if the employee was not assigned.
    pub fn unassign(pool: &mut DbPool, location_id: i64, employee_id: i64) -> AppResult<bool> {
        let loc = Self::get(pool, location_id)?;
        let removed = unassign_employee(&pool.conn, loc.id, employee_id)?;
        if removed {
            ttlog(
                &pool.conn,
                "location_unassign",
                &loc.name,
                &format!("Employee {} removed from location {}", employee_id, loc.id),
            )?;
        }
        Ok(removed)
    }

    pub fn get(pool: &DbPool, id: i64) -> AppResult<AttendanceLocation> {
        find_location(&pool.conn, id)?.ok_or_else(|| AppError::NotFound(format!("Location {id}")))
    }

    pub fn list(pool: &DbPool, include_inactive: bool) -> AppResult<Vec<AttendanceLocation>> {
        load_locations(&pool.conn, include_inactive)
    }
}
