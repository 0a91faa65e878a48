//! Unix timestamp helpers for rendering Stripe times.

use chrono::{DateTime, Utc};

/// Parse a unix timestamp given as text (`"1700000000"`, `"1700000000.5"`).
///
/// Returns `None` for anything that is not a number or is out of range.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let secs: f64 = value.trim().parse().ok()?;
    if !secs.is_finite() {
        return None;
    }

    let whole = secs.floor();
    let nanos = ((secs - whole) * 1_000_000_000.0).round() as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
}

/// Convert an integral unix timestamp, as found in Stripe payloads.
pub fn from_unix(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}
