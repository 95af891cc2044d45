//! Duration input parsing and formatting.
//!
//! The duration field accepts `MM` or `MM:SS`. The seconds part is not
//! checked against a real clock: `"1:75"` is 135 seconds.

use std::sync::LazyLock;

use regex::Regex;

use super::error::InputError;

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)(?::([0-9]{1,2}))?$").expect("duration pattern is a valid regex")
});

/// Parses `MM` or `MM:SS` into total seconds.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns `InputError::InvalidFormat` for anything else, and
/// `InputError::OutOfRange` if the total does not fit in a `u32`.
pub fn parse_duration(input: &str) -> Result<u32, InputError> {
    let trimmed = input.trim();
    let captures = DURATION_PATTERN
        .captures(trimmed)
        .ok_or_else(|| InputError::InvalidFormat(input.to_string()))?;

    let out_of_range = || InputError::OutOfRange(input.to_string());

    let minutes: u32 = captures[1].parse().map_err(|_| out_of_range())?;
    let seconds: u32 = match captures.get(2) {
        Some(seconds) => seconds.as_str().parse().map_err(|_| out_of_range())?,
        None => 0,
    };

    minutes
        .checked_mul(60)
        .and_then(|total| total.checked_add(seconds))
        .ok_or_else(out_of_range)
}

/// Formats seconds as `MM:SS`; minutes may exceed two digits.
pub fn format_clock(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
