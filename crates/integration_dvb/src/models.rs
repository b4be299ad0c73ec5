//! Records shared by several DVB endpoints
//!
//! Field names on the wire are PascalCase and case-sensitive. Records decode
//! leniently: a field missing from the response or sent as `null` becomes its
//! empty value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// API-level outcome reported inside every response envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Status {
    /// Status code, `"Ok"` on success
    #[serde(deserialize_with = "crate::models::null_default")]
    pub code: String,
    /// Human readable details, usually absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Status {
    /// Returns true if the API reported success
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// Cross-network line or stop identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Diva {
    /// DIVA number
    #[serde(deserialize_with = "crate::models::null_default")]
    pub number: String,
    /// Network the number belongs to, e.g. `"voe"`
    #[serde(deserialize_with = "crate::models::null_default")]
    pub network: String,
}

/// Platform or stop position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Platform {
    /// Platform name, e.g. `"3"`
    #[serde(deserialize_with = "crate::models::null_default")]
    pub name: String,
    /// Platform kind, e.g. `"Platform"` or `"Railtrack"`
    #[serde(rename = "Type", deserialize_with = "crate::models::null_default")]
    pub kind: String,
}

/// Deserialize `null` as the type's default value
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a timestamp as sent by the API
///
/// Understands the `/Date(1487277180000+0100)/` form used by the DVB API
/// (milliseconds since the epoch, the offset is informational) and RFC 3339.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Some(inner) = raw
        .strip_prefix("/Date(")
        .and_then(|rest| rest.strip_suffix(")/"))
    {
        let end = inner
            .char_indices()
            .skip(1)
            .find(|(_, c)| *c == '+' || *c == '-')
            .map_or(inner.len(), |(idx, _)| idx);
        let millis: i64 = inner[..end].parse().ok()?;
        return DateTime::from_timestamp_millis(millis);
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
