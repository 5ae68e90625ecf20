//! Column decoding helpers shared by the repositories.

use std::str::FromStr;

use postboard_domain::time::Timestamp;

/// Parse a text column into `T`, reporting failures as [`sqlx::Error::Decode`].
pub(crate) fn parse<T>(value: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    T::from_str(value).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Parse an RFC 3339 text column into a UTC timestamp.
pub(crate) fn timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}
