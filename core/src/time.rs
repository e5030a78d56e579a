//! Time related utils.

use chrono::Utc;

/// DateTime in UTC, the only form used for signing.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Current Unix time in whole seconds, as OAuth timestamps require.
pub fn unix_timestamp() -> i64 {
    now().timestamp()
}
