//! Asset records as returned by a device's asset endpoint.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque asset identifier, unique per host. Used as the deletion key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Expiration timestamp of an asset.
///
/// Keeps the text the device sent alongside the parsed instant: the instant is
/// compared against the cutoff, the text is what reports show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndDate {
    raw: String,
    at: DateTime<Utc>,
}

impl EndDate {
    /// Parse an ISO-8601 style timestamp.
    ///
    /// Accepted shapes:
    /// - RFC 3339 (`2024-05-01T10:00:00+02:00`)
    /// - naive date-time (`2024-05-01T10:00:00`, `2024-05-01 10:00:00.5`)
    /// - date only (`2024-05-01`, read as midnight)
    ///
    /// Values without an offset are read as UTC.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        let at = parse_instant(trimmed)
            .ok_or_else(|| format!("unparseable end_date '{trimmed}'"))?;
        Ok(Self {
            raw: trimmed.to_string(),
            at,
        })
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl fmt::Display for EndDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for EndDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        EndDate::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl Serialize for EndDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

/// One piece of signage content on a device.
///
/// Devices send many more fields (mimetype, uri, is_enabled, ...); only the
/// three the engine acts on are kept. All three are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub asset_id: AssetId,
    pub name: String,
    pub end_date: EndDate,
}

impl Asset {
    pub fn new(asset_id: impl Into<String>, name: impl Into<String>, end_date: EndDate) -> Self {
        Self {
            asset_id: AssetId::new(asset_id),
            name: name.into(),
            end_date,
        }
    }
}
