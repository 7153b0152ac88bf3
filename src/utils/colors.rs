/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static ANSI_ESCAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok());

/// Remove color escapes, e.g. to measure the visible width of a cell.
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    match ANSI_ESCAPE.as_ref() {
        Some(re) => re.replace_all(s, ""),
        None => Cow::Borrowed(s),
    }
}

/// Open sessions in green, auto-closed ones in magenta (by state label).
pub fn color_for_status(label: &str) -> &'static str {
    match label {
        "open" => GREEN,
        "auto" => MAGENTA,
        _ => RESET,
    }
}

/// Geofence flag: green inside, red outside.
pub fn color_for_geofence(inside: bool) -> &'static str {
    if inside { GREEN } else { RED }
}

/// Ritorna formattazione colorata di un valore opzionale.
///
/// Esempio:
/// `colorize_optional("--:--")` → "<grey>--:--<reset>"
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--:--" || v == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
