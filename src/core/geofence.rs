//! Geofence validation: Haversine distance and first-match acceptance.

use crate::models::coords::Coordinates;
use crate::models::location::AttendanceLocation;

/// Mean Earth radius used by the Haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometres.
pub fn haversine_km(a: &Coordinates, b: &Coordinates) -> f64 {
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (dlon / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Locations an employee is checked against.
///
/// The employee's own active locations win; with none assigned, the
/// company-wide (unassigned, active) locations apply. Order is preserved.
pub fn candidate_locations(
    assigned: Vec<AttendanceLocation>,
    company_wide: Vec<AttendanceLocation>,
) -> Vec<AttendanceLocation> {
    let own: Vec<AttendanceLocation> = assigned.into_iter().filter(|l| l.active).collect();
    if !own.is_empty() {
        return own;
    }
    company_wide
        .into_iter()
        .filter(|l| l.active && l.is_company_wide())
        .collect()
}

/// Outcome of a geofence check.
#[derive(Debug, Clone, PartialEq)]
pub enum GeofenceVerdict<'a> {
    /// Inside the radius of `location` (first match in candidate order).
    Accepted {
        distance_km: f64,
        location: &'a AttendanceLocation,
    },
    /// Outside every candidate; `nearest` is the closest one.
    Rejected {
        distance_km: f64,
        nearest: &'a AttendanceLocation,
    },
    /// No candidate locations at all.
    NotConfigured,
    /// Administrative override, nothing was checked.
    Bypassed {
        distance_km: f64,
        location: Option<&'a AttendanceLocation>,
    },
}

impl<'a> GeofenceVerdict<'a> {
    pub fn accepted(&self) -> bool {
        matches!(
            self,
            GeofenceVerdict::Accepted { .. } | GeofenceVerdict::Bypassed { .. }
        )
    }

    /// True only when the position really lies inside a geofence.
    pub fn within_geofence(&self) -> bool {
        match self {
            GeofenceVerdict::Accepted { .. } => true,
            GeofenceVerdict::Bypassed { location, .. } => location.is_some(),
            _ => false,
        }
    }

    pub fn distance_km(&self) -> f64 {
        match self {
            GeofenceVerdict::Accepted { distance_km, .. }
            | GeofenceVerdict::Rejected { distance_km, .. }
            | GeofenceVerdict::Bypassed { distance_km, .. } => *distance_km,
            GeofenceVerdict::NotConfigured => 0.0,
        }
    }

    /// Matched location, or the nearest one on rejection.
    pub fn location(&self) -> Option<&'a AttendanceLocation> {
        match self {
            GeofenceVerdict::Accepted { location, .. } => Some(*location),
            GeofenceVerdict::Rejected { nearest, .. } => Some(*nearest),
            GeofenceVerdict::Bypassed { location, .. } => *location,
            GeofenceVerdict::NotConfigured => None,
        }
    }
}

fn first_match<'a>(
    coords: &Coordinates,
    candidates: &'a [AttendanceLocation],
) -> Option<(f64, &'a AttendanceLocation)> {
    candidates.iter().find_map(|loc| {
        let d = haversine_km(coords, &loc.center());
        (d <= loc.radius_km).then_some((d, loc))
    })
}

fn nearest<'a>(
    coords: &Coordinates,
    candidates: &'a [AttendanceLocation],
) -> Option<(f64, &'a AttendanceLocation)> {
    let mut best: Option<(f64, &AttendanceLocation)> = None;
    for loc in candidates {
        let d = haversine_km(coords, &loc.center());
        // strict `<` keeps the earliest candidate on ties
        if best.is_none_or(|(bd, _)| d < bd) {
            best = Some((d, loc));
        }
    }
    best
}

/// Decide whether `coords` may check in against `candidates`.
///
/// Acceptance picks the first candidate whose radius contains the point,
/// not the nearest one. With `bypass`, the verdict is always accepted; when
/// coordinates are given the matched location (or none) and its distance
/// are still reported. Callers reject a missing position before calling
/// without `bypass`; in that case nothing can be checked and the verdict is
/// `NotConfigured`.
pub fn validate<'a>(
    coords: Option<&Coordinates>,
    candidates: &'a [AttendanceLocation],
    bypass: bool,
) -> GeofenceVerdict<'a> {
    let Some(coords) = coords else {
        return if bypass {
            GeofenceVerdict::Bypassed {
                distance_km: 0.0,
                location: None,
            }
        } else {
            GeofenceVerdict::NotConfigured
        };
    };

    if let Some((distance_km, location)) = first_match(coords, candidates) {
        return if bypass {
            GeofenceVerdict::Bypassed {
                distance_km,
                location: Some(location),
            }
        } else {
            GeofenceVerdict::Accepted {
                distance_km,
                location,
            }
        };
    }

    match (nearest(coords, candidates), bypass) {
        (Some((distance_km, _)), true) => GeofenceVerdict::Bypassed {
            distance_km,
            location: None,
        },
        (None, true) => GeofenceVerdict::Bypassed {
            distance_km: 0.0,
            location: None,
        },
        (Some((distance_km, nearest)), false) => GeofenceVerdict::Rejected {
            distance_km,
            nearest,
        },
        (None, false) => GeofenceVerdict::NotConfigured,
    }
}
