mod common;
use common::{CHENNAI, NEAR_OFFICE, OFFICE, at, loc};
use rgeoattend::core::geofence::{GeofenceVerdict, candidate_locations, haversine_km, validate};

#[test]
fn test_haversine_same_point_is_zero() {
    assert_eq!(haversine_km(&at(OFFICE), &at(OFFICE)), 0.0);
}

#[test]
fn test_haversine_is_symmetric() {
    let a = haversine_km(&at(OFFICE), &at(CHENNAI));
    let b = haversine_km(&at(CHENNAI), &at(OFFICE));
    assert!((a - b).abs() < 1e-9);
}

#[test]
fn test_haversine_bangalore_chennai() {
    let d = haversine_km(&at(OFFICE), &at(CHENNAI));
    assert!((285.0..=295.0).contains(&d), "distance was {d}");
}

#[test]
fn test_haversine_one_degree_of_latitude() {
    let d = haversine_km(&at((0.0, 0.0)), &at((1.0, 0.0)));
    assert!((d - 111.19).abs() < 0.01, "distance was {d}");
}

#[test]
fn test_validate_accepts_inside_radius() {
    let locations = vec![loc(1, "HQ", OFFICE, 0.5)];
    let v = validate(Some(&at(NEAR_OFFICE)), &locations, false);

    assert!(v.accepted());
    assert!(v.within_geofence());
    assert_eq!(v.location().map(|l| l.id), Some(1));
    assert!(v.distance_km() < 0.1);
}

#[test]
fn test_validate_boundary_distance_is_accepted() {
    let here = at(NEAR_OFFICE);
    let exact = haversine_km(&here, &at(OFFICE));
    let locations = vec![loc(1, "HQ", OFFICE, exact)];

    assert!(validate(Some(&here), &locations, false).accepted());
}

#[test]
fn test_validate_picks_first_match_not_nearest() {
    // both contain the point; the wide one is listed first but farther away
    let wide = loc(1, "Campus", (12.9800, 77.6000), 5.0);
    let tight = loc(2, "HQ", OFFICE, 0.5);
    let locations = vec![wide, tight];

    let v = validate(Some(&at(NEAR_OFFICE)), &locations, false);
    assert_eq!(v.location().map(|l| l.name.as_str()), Some("Campus"));
}

#[test]
fn test_validate_rejects_with_nearest_location() {
    let locations = vec![
        loc(1, "Mumbai", (19.0760, 72.8777), 1.0),
        loc(2, "HQ", OFFICE, 0.5),
    ];

    match validate(Some(&at(CHENNAI)), &locations, false) {
        GeofenceVerdict::Rejected {
            distance_km,
            nearest,
        } => {
            assert_eq!(nearest.name, "HQ");
            assert!((285.0..=295.0).contains(&distance_km));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[test]
fn test_validate_without_candidates_is_not_configured() {
    let v = validate(Some(&at(OFFICE)), &[], false);
    assert_eq!(v, GeofenceVerdict::NotConfigured);
    assert!(!v.accepted());
}

#[test]
fn test_validate_bypass_outside_reports_nearest_distance() {
    let locations = vec![loc(1, "HQ", OFFICE, 0.5)];
    let v = validate(Some(&at(CHENNAI)), &locations, true);

    assert!(v.accepted());
    assert!(!v.within_geofence());
    assert!(v.location().is_none());
    assert!(v.distance_km() > 280.0);
}

#[test]
fn test_validate_bypass_without_coordinates() {
    let v = validate(None, &[], true);
    assert!(v.accepted());
    assert!(!v.within_geofence());
    assert_eq!(v.distance_km(), 0.0);
}

#[test]
fn test_candidates_prefer_assigned_locations() {
    let mut own = loc(1, "Branch", CHENNAI, 0.5);
    own.employee_ids = vec![7];
    let shared = loc(2, "HQ", OFFICE, 0.5);

    let c = candidate_locations(vec![own], vec![shared.clone()]);
    assert_eq!(c.len(), 1);
    assert_eq!(c[0].name, "Branch");

    let c = candidate_locations(Vec::new(), vec![shared]);
    assert_eq!(c[0].name, "HQ");
}

#[test]
fn test_candidates_skip_inactive() {
    let mut own = loc(1, "Branch", CHENNAI, 0.5);
    own.active = false;
    own.employee_ids = vec![7];

    let c = candidate_locations(vec![own], vec![loc(2, "HQ", OFFICE, 0.5)]);
    assert_eq!(c.len(), 1);
    assert_eq!(c[0].name, "HQ");
}
