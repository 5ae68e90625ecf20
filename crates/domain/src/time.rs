//! Time and timestamp helpers.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// UTC timestamp used for `created_at` / `updated_at`.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time, truncated to microseconds so it survives a
/// round trip through [`to_sortable`] unchanged.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339 rendering (microseconds, `Z` suffix).
///
/// Values in this format sort lexicographically in chronological order.
#[must_use]
pub fn to_sortable(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
