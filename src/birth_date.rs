//! Birth date handling.
//!
//! Birth dates are kept exactly as written in the data file: a fixed-width `YYYYMMDD` string.
//! Because every digit group is zero-padded, comparing two such strings byte by byte orders them
//! chronologically, so the comparison engine never needs to parse them. Parsing only happens for
//! the informational age display.

use time::{Date, OffsetDateTime};

use crate::entity::NOT_RECORDED;

/// The `(year, month, day)` digits of a well-formed birth date, without calendar validation.
///
/// Returns `None` unless `raw` is exactly eight ASCII digits.
pub fn split_digits(raw: &str) -> Option<(i32, u8, u8)> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = raw[0..4].parse().ok()?;
    let month = raw[4..6].parse().ok()?;
    let day = raw[6..8].parse().ok()?;
    Some((year, month, day))
}

/// Whole years elapsed between `raw` and `today`.
///
/// A birthday later in the year than `today` has not happened yet, so one year is taken off.
pub fn age_on(raw: &str, today: Date) -> Option<i32> {
    let (year, month, day) = split_digits(raw)?;
    let mut age = today.year() - year;
    if (u8::from(today.month()), today.day()) < (month, day) {
        age -= 1;
    }
    Some(age)
}

/// Age as displayed next to a profile, or the "not recorded" marker for malformed dates.
pub fn display_age(raw: &str) -> String {
    display_age_on(raw, today())
}

/// [`display_age`] against a fixed day.
pub fn display_age_on(raw: &str, today: Date) -> String {
    match age_on(raw, today) {
        Some(age) => age.to_string(),
        None => NOT_RECORDED.to_owned(),
    }
}

fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}
