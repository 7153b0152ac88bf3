//! Formatting utilities used for CLI and export outputs.

/// Decimal hours as `HHh MMm` (7.5 → "07h 30m").
pub fn format_hours(hours: f64) -> String {
    let total_min = (hours * 60.0).round() as i64;
    let sign = if total_min < 0 { "-" } else { "" };
    let m = total_min.abs();
    format!("{}{:02}h {:02}m", sign, m / 60, m % 60)
}

/// Distance with two decimals, as shown in geofence messages.
pub fn format_km(km: f64) -> String {
    format!("{:.2} km", km)
}
