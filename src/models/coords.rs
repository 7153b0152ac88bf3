use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A reported position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build coordinates from optional CLI/UI input, checking the ranges.
    ///
    /// Returns `Ok(None)` only when both values are absent; a single missing
    /// half is treated as absent too, since the pair is unusable.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> AppResult<Option<Self>> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => {
                let c = Self::new(lat, lon);
                c.validate()?;
                Ok(Some(c))
            }
            _ => Ok(None),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(AppError::InvalidCoordinates(format!(
                "latitude {} is outside [-90, 90]",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(AppError::InvalidCoordinates(format!(
                "longitude {} is outside [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }

    /// Placeholder stored when an administrator acts without a position.
    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}
