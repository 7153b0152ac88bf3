pub mod colors;
pub mod date;
pub mod formatting;
pub mod table;
pub mod tz;

pub use formatting::{format_hours, format_km};
