//! Time utilities: parsing HH:MM, 24h storage format and 12h display format.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

/// Storage format: always 24-hour.
pub const STORE_FMT: &str = "%H:%M";
/// Display format: 12-hour with AM/PM marker.
pub const DISPLAY_FMT: &str = "%I:%M %p";

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), STORE_FMT).ok()
}

/// Accepts "HH:MM" as well as "hh:mm AM/PM" input from the command line.
pub fn parse_user_time(t: &str) -> AppResult<NaiveTime> {
    let t = t.trim();
    parse_time(t)
        .or_else(|| NaiveTime::parse_from_str(&t.to_uppercase(), DISPLAY_FMT).ok())
        .ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    input.map(|s| parse_user_time(s)).transpose()
}

pub fn store_time(t: NaiveTime) -> String {
    t.format(STORE_FMT).to_string()
}

/// "09:00" -> "09:00 AM". Unparseable values render as "--:--".
pub fn display_time(stored: &str) -> String {
    parse_time(stored)
        .map(|t| t.format(DISPLAY_FMT).to_string())
        .unwrap_or_else(|| "--:--".to_string())
}
