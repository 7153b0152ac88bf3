//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Attendance workflow
    // ---------------------------
    #[error("No employee linked to this user.")]
    MissingEmployeeLink,

    #[error("Location is required for {0}. Please enable GPS/location services.")]
    MissingLocationData(&'static str),

    #[error("You are already checked in.")]
    AlreadyCheckedIn,

    #[error("You are not checked in.")]
    NotCheckedIn,

    #[error(
        "You are {distance_km:.2} km away from {location}. Please check in within {radius_km:.2} km radius."
    )]
    GeofenceRejected {
        distance_km: f64,
        location: String,
        radius_km: f64,
    },

    #[error("No attendance locations configured. Contact your HR manager.")]
    NoGeofenceConfigured,

    // ---------------------------
    // Input / configuration validation
    // ---------------------------
    #[error("Invalid location configuration: {0}")]
    InvalidLocationConfig(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("{0} not found")]
    NotFound(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
