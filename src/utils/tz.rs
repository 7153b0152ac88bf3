//! Timezone helpers: every stored timestamp is naive UTC, display and
//! office-hour arithmetic happen in the employee's IANA timezone.

use crate::errors::{AppError, AppResult};
use crate::models::attendance::DB_DATETIME_FMT;
use crate::models::location::hour_to_time;
use crate::ui::messages::warning;
use chrono::offset::LocalResult;
use chrono::{DateTime, Duration, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse an IANA timezone name ("Europe/Rome").
pub fn parse_tz(name: &str) -> AppResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| AppError::InvalidTimezone(name.to_string()))
}

/// Resolve an optional name, UTC when unset.
pub fn resolve_tz(name: Option<&str>) -> AppResult<Tz> {
    match name {
        Some(n) if !n.trim().is_empty() => parse_tz(n),
        _ => Ok(Tz::UTC),
    }
}

pub fn localize(dt: &NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    Utc.from_utc_datetime(dt).with_timezone(&tz)
}

/// Format a stored UTC timestamp in the user's timezone.
///
/// An unknown timezone name falls back to the UTC value in the same format.
pub fn to_user_timezone(dt: &NaiveDateTime, tz_name: Option<&str>) -> String {
    match resolve_tz(tz_name) {
        Ok(tz) => localize(dt, tz).format(DB_DATETIME_FMT).to_string(),
        Err(e) => {
            warning(format!("{e}, showing UTC"));
            dt.format(DB_DATETIME_FMT).to_string()
        }
    }
}

/// The instant at which the office closes on the local day of `check_in`.
///
/// `office_end_hour` is a fractional hour (18.5 = 18:30). When the local
/// wall-clock time does not exist (DST gap) the check-in offset is used;
/// an ambiguous time resolves to its earliest instant. If the office-end of
/// the check-in day lies before the check-in itself, the next day's
/// office-end is returned so that a session never closes before it opened.
pub fn office_end_instant(
    check_in: &NaiveDateTime,
    office_end_hour: f64,
    tz: Tz,
) -> AppResult<DateTime<Utc>> {
    let end_time = hour_to_time(office_end_hour).ok_or_else(|| {
        AppError::InvalidLocationConfig(format!(
            "Office end time must be between 0 and 24 (got {office_end_hour})"
        ))
    })?;

    let local_in = localize(check_in, tz);
    let check_in_utc = Utc.from_utc_datetime(check_in);

    let resolve = |naive: NaiveDateTime| -> AppResult<DateTime<Utc>> {
        match tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
            LocalResult::None => local_in
                .offset()
                .fix()
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| AppError::Other(format!("cannot resolve local time {naive}"))),
        }
    };

    let same_day = resolve(local_in.date_naive().and_time(end_time))?;
    if same_day >= check_in_utc {
        return Ok(same_day);
    }

    let next_day = local_in.date_naive() + Duration::days(1);
    resolve(next_day.and_time(end_time))
}
