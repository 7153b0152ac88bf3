mod common;
use chrono::{NaiveDate, TimeZone, Utc};
use common::{CHENNAI, NEAR_OFFICE, OFFICE, add_employee, add_location, at, memory_pool};
use rgeoattend::core::attendance::AttendanceLogic;
use rgeoattend::core::employee::EmployeeLogic;
use rgeoattend::core::location::{LocationInput, LocationLogic, LocationPatch};
use rgeoattend::errors::AppError;
use rgeoattend::models::context::RequestContext;
use rgeoattend::models::location::{format_hour, hour_to_time};
use rgeoattend::utils::date::parse_range;
use rgeoattend::utils::tz::{office_end_instant, parse_tz, to_user_timezone};

fn input(name: &str, radius_km: f64) -> LocationInput {
    LocationInput {
        name: name.to_string(),
        latitude: OFFICE.0,
        longitude: OFFICE.1,
        radius_km,
        address: Some("MG Road".to_string()),
        company_id: 1,
        office_start: Some(9.0),
        office_end: Some(18.0),
    }
}

fn config_message(err: AppError) -> String {
    match err {
        AppError::InvalidLocationConfig(msg) => msg,
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_location_rejects_non_positive_radius() {
    let mut pool = memory_pool();
    let err = LocationLogic::add(&mut pool, input("HQ", 0.0)).unwrap_err();
    assert_eq!(config_message(err), "Radius must be greater than 0.");

    let err = LocationLogic::add(&mut pool, input("HQ", -1.0)).unwrap_err();
    assert_eq!(config_message(err), "Radius must be greater than 0.");
}

#[test]
fn test_location_rejects_bad_office_hours() {
    let mut pool = memory_pool();

    let mut i = input("HQ", 0.5);
    i.office_end = Some(24.5);
    let err = LocationLogic::add(&mut pool, i).unwrap_err();
    assert_eq!(
        config_message(err),
        "Office end time must be between 0 and 24."
    );

    let mut i = input("HQ", 0.5);
    i.office_start = Some(18.0);
    i.office_end = Some(9.0);
    let err = LocationLogic::add(&mut pool, i).unwrap_err();
    assert_eq!(config_message(err), "Office end time must be after start time.");
}

#[test]
fn test_location_rejects_bad_center() {
    let mut pool = memory_pool();
    let mut i = input("HQ", 0.5);
    i.latitude = 95.0;
    assert!(matches!(
        LocationLogic::add(&mut pool, i),
        Err(AppError::InvalidLocationConfig(_))
    ));
}

#[test]
fn test_location_edit_keeps_unset_fields() {
    let mut pool = memory_pool();
    let loc = LocationLogic::add(&mut pool, input("HQ", 0.5)).unwrap();

    let edited = LocationLogic::edit(
        &mut pool,
        loc.id,
        LocationPatch {
            radius_km: Some(1.5),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(edited.radius_km, 1.5);
    assert_eq!(edited.name, "HQ");
    assert_eq!(edited.address.as_deref(), Some("MG Road"));
    assert_eq!(edited.office_end, Some(18.0));

    let err = LocationLogic::edit(
        &mut pool,
        loc.id,
        LocationPatch {
            radius_km: Some(0.0),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidLocationConfig(_)));
    assert_eq!(LocationLogic::get(&pool, loc.id).unwrap().radius_km, 1.5);
}

#[test]
fn test_location_edit_clears_optional_fields() {
    let mut pool = memory_pool();
    let loc = LocationLogic::add(&mut pool, input("HQ", 0.5)).unwrap();

    let edited = LocationLogic::edit(
        &mut pool,
        loc.id,
        LocationPatch {
            clear_address: true,
            clear_office_hours: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(edited.address.is_none());
    assert!(edited.office_start.is_none());
    assert!(edited.office_end.is_none());

    let stored = LocationLogic::get(&pool, loc.id).unwrap();
    assert!(stored.office_end.is_none());
    assert!(stored.address.is_none());

    // clearing and setting in one edit keeps only the new value
    let edited = LocationLogic::edit(
        &mut pool,
        loc.id,
        LocationPatch {
            office_end: Some(17.0),
            clear_office_hours: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(edited.office_start, None);
    assert_eq!(edited.office_end, Some(17.0));
}

#[test]
fn test_location_edit_unknown_id() {
    let mut pool = memory_pool();
    let err = LocationLogic::edit(&mut pool, 99, LocationPatch::default()).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_deactivated_location_is_not_a_candidate() {
    let mut pool = memory_pool();
    let emp = add_employee(&mut pool, "Asha", None);
    let hq = add_location(&mut pool, "HQ", OFFICE, 0.5, None);
    LocationLogic::set_active(&mut pool, hq.id, false).unwrap();

    assert!(LocationLogic::list(&pool, false).unwrap().is_empty());
    assert_eq!(LocationLogic::list(&pool, true).unwrap().len(), 1);

    let ctx = RequestContext::employee(emp, 1);
    let err =
        AttendanceLogic::check_in(&mut pool, &ctx, Some(at(OFFICE)), Utc::now()).unwrap_err();
    assert!(matches!(err, AppError::NoGeofenceConfigured));
}

#[test]
fn test_assigned_location_replaces_company_wide() {
    let mut pool = memory_pool();
    let asha = add_employee(&mut pool, "Asha", None);
    let ravi = add_employee(&mut pool, "Ravi", None);
    add_location(&mut pool, "HQ", OFFICE, 0.5, None);
    let branch = add_location(&mut pool, "Chennai", CHENNAI, 0.5, None);

    assert!(LocationLogic::assign(&mut pool, branch.id, asha).unwrap());
    assert!(!LocationLogic::assign(&mut pool, branch.id, asha).unwrap());

    // Asha only has her branch now
    let ctx = RequestContext::employee(asha, 1);
    let err =
        AttendanceLogic::check_in(&mut pool, &ctx, Some(at(NEAR_OFFICE)), Utc::now()).unwrap_err();
    match err {
        AppError::GeofenceRejected { location, .. } => assert_eq!(location, "Chennai"),
        other => panic!("unexpected error: {other:?}"),
    }

    // Ravi still uses the unassigned HQ
    let ctx = RequestContext::employee(ravi, 1);
    let res =
        AttendanceLogic::check_in(&mut pool, &ctx, Some(at(NEAR_OFFICE)), Utc::now()).unwrap();
    assert_eq!(res.location_name.as_deref(), Some("HQ"));

    assert!(LocationLogic::unassign(&mut pool, branch.id, asha).unwrap());
    assert!(!LocationLogic::unassign(&mut pool, branch.id, asha).unwrap());
}

#[test]
fn test_assign_unknown_employee() {
    let mut pool = memory_pool();
    let hq = add_location(&mut pool, "HQ", OFFICE, 0.5, None);
    let err = LocationLogic::assign(&mut pool, hq.id, 77).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_other_company_locations_are_ignored() {
    let mut pool = memory_pool();
    let emp = add_employee(&mut pool, "Asha", None);
    let mut i = input("Elsewhere", 0.5);
    i.company_id = 2;
    LocationLogic::add(&mut pool, i).unwrap();

    let ctx = RequestContext::employee(emp, 1);
    let err =
        AttendanceLogic::check_in(&mut pool, &ctx, Some(at(OFFICE)), Utc::now()).unwrap_err();
    assert!(matches!(err, AppError::NoGeofenceConfigured));
}

#[test]
fn test_employee_timezone_is_validated() {
    let mut pool = memory_pool();
    let err = EmployeeLogic::add(&mut pool, "Asha", Some("Nowhere/City"), 1).unwrap_err();
    assert!(matches!(err, AppError::InvalidTimezone(_)));

    let id = add_employee(&mut pool, "Asha", None);
    let emp = EmployeeLogic::set_timezone(&mut pool, id, Some("Asia/Kolkata")).unwrap();
    assert_eq!(emp.timezone.as_deref(), Some("Asia/Kolkata"));

    let emp = EmployeeLogic::set_timezone(&mut pool, id, None).unwrap();
    assert!(emp.timezone.is_none());

    assert!(matches!(
        EmployeeLogic::set_timezone(&mut pool, 99, None),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_hour_helpers() {
    assert_eq!(format_hour(Some(17.5)), "17:30");
    assert_eq!(format_hour(Some(9.0)), "09:00");
    assert_eq!(format_hour(None), "--:--");
    assert!(hour_to_time(24.0).is_none());
}

#[test]
fn test_to_user_timezone() {
    let dt = NaiveDate::from_ymd_opt(2025, 7, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();

    assert_eq!(to_user_timezone(&dt, Some("Europe/Rome")), "2025-07-01 14:00:00");
    assert_eq!(to_user_timezone(&dt, None), "2025-07-01 12:00:00");
    assert_eq!(to_user_timezone(&dt, Some("bogus")), "2025-07-01 12:00:00");
}

#[test]
fn test_office_end_in_dst_gap_uses_check_in_offset() {
    // Rome skips 02:00-03:00 on 2025-03-30; check-in at 00:30 local (23:30 UTC the day before)
    let tz = parse_tz("Europe/Rome").unwrap();
    let check_in = NaiveDate::from_ymd_opt(2025, 3, 29)
        .unwrap()
        .and_hms_opt(23, 30, 0)
        .unwrap();

    let end = office_end_instant(&check_in, 2.5, tz).unwrap();
    assert_eq!(end, Utc.with_ymd_and_hms(2025, 3, 30, 1, 30, 0).unwrap());
}

#[test]
fn test_parse_range() {
    let (from, to) = parse_range("2025-02").unwrap();
    assert_eq!(from, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    assert_eq!(to, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());

    let (from, to) = parse_range("2024:2025").unwrap();
    assert_eq!(from, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(to, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());

    assert!(parse_range("2025-01:2025").is_err());
    assert!(parse_range("2025-13").is_err());
    assert!(parse_range("2025-03:2025-01").is_err());
}
