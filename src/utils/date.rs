use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

/// Bounds of a single period: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn period_bounds(p: &str) -> Option<(NaiveDate, NaiveDate)> {
    match p.len() {
        4 => {
            let y: i32 = p.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(y, 1, 1)?,
                NaiveDate::from_ymd_opt(y, 12, 31)?,
            ))
        }
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d").ok()?;
            Some((first, last_day_of_month(first.year(), first.month())?))
        }
        10 => {
            let d = parse_date(p)?;
            Some((d, d))
        }
        _ => None,
    }
}

/// Parse a `--period` / `--range` expression into inclusive date bounds.
///
/// Accepts a single period (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`) or two periods
/// of the same format joined by `:`.
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidRange(r.to_string());

    if let Some((start, end)) = r.split_once(':') {
        let (start, end) = (start.trim(), end.trim());
        if start.len() != end.len() {
            return Err(AppError::InvalidRange(format!(
                "{r}: start and end must have same format"
            )));
        }
        let (from, _) = period_bounds(start).ok_or_else(invalid)?;
        let (_, to) = period_bounds(end).ok_or_else(invalid)?;
        if to < from {
            return Err(AppError::InvalidRange(format!("{r}: end precedes start")));
        }
        Ok((from, to))
    } else {
        period_bounds(r.trim()).ok_or_else(invalid)
    }
}
