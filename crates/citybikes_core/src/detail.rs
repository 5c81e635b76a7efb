use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::Station;

const NOT_AVAILABLE: &str = "N/A";
const REDUNDANT_SUFFIX: &str = "+00:00Z";

/// Text shown in the popup of a station marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDetail {
    pub name: String,
    pub bikes_available: u32,
    pub empty_slots: u32,
    pub address: String,
    pub capacity: String,
    pub last_updated: String,
}

impl StationDetail {
    pub fn from_station(station: &Station) -> Self {
        let extra = station.extra.as_ref();
        let address = extra
            .and_then(|e| e.address.as_deref())
            .filter(|a| !a.is_empty())
            .unwrap_or(NOT_AVAILABLE)
            .to_string();
        let capacity = extra
            .and_then(|e| e.capacity)
            .filter(|c| *c > 0)
            .map_or_else(|| NOT_AVAILABLE.to_string(), |c| c.to_string());

        StationDetail {
            name: station.name.clone(),
            bikes_available: station.free_bikes,
            empty_slots: station.empty_slots,
            address,
            capacity,
            last_updated: format_last_updated(station.timestamp.as_deref()),
        }
    }
}

/// Parse a station timestamp, tolerating the `+00:00Z` suffix some feeds emit.
///
/// Timestamps without an offset are read as UTC.
pub fn parse_station_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    let cleaned = match raw.strip_suffix(REDUNDANT_SUFFIX) {
        Some(prefix) => format!("{}+00:00", prefix),
        None => raw.to_string(),
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&cleaned) {
        return Some(parsed);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&cleaned, format).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Human readable local time for a station timestamp, or `N/A`.
pub fn format_last_updated(raw: Option<&str>) -> String {
    match raw.and_then(parse_station_timestamp) {
        Some(parsed) => parsed
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}
