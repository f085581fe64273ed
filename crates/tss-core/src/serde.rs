//! Wire formats shared by every service response.

use ::serde::Serializer;
use chrono::{DateTime, SecondsFormat, Utc};

/// `DateTime<Utc>` as RFC 3339 in UTC with millisecond precision, e.g.
/// `2026-10-01T08:30:00.000Z`.
pub fn to_rfc3339_ms<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
