/// Core data types for the water-quality dashboard client.
///
/// This module defines the shared domain model imported by all other modules:
/// stations, timestamped parameter readings, the historical + forecast
/// series envelope, the overview and flood snapshots, and the error types
/// surfaced by the fetch layer. Wire formats live in `ingest`; these are the
/// types the rest of the crate works with after parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Stations
// ---------------------------------------------------------------------------

/// A monitoring location.
///
/// Catalog entries only know their id; the name and coordinates are filled in
/// from the forecast envelope (`station_name`, `latitude`, `longitude`).
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

// ---------------------------------------------------------------------------
// Series types
// ---------------------------------------------------------------------------

/// One named measurement inside a `DataPoint`.
///
/// Parameter names are an open set: whatever the payload carries
/// ("pH", "Turbidity", "ndvi", ...) is kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterReading {
    pub name: String,
    pub value: f64,
    pub is_anomaly: Option<bool>,
    pub normal_range: Option<(f64, f64)>,
}

/// A single timestamped sample, either observed (historical) or predicted
/// (forecast). Immutable once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    /// Timestamp exactly as the remote source sent it.
    pub timestamp: String,
    /// The same timestamp parsed to an instant.
    pub at: DateTime<Utc>,
    pub readings: Vec<ParameterReading>,
    /// Aggregate water quality index, when the feed carries one.
    pub wqi: Option<f64>,
    pub status: Option<String>,
}

impl DataPoint {
    /// Returns the reading for `name`, if this point carries one. When a
    /// name appears more than once the last reading wins.
    pub fn reading(&self, name: &str) -> Option<&ParameterReading> {
        self.readings.iter().rev().find(|r| r.name == name)
    }
}

/// Historical + forecast data for one station from one fetch.
///
/// Both segments keep the order the source sent them in. Nothing here is
/// re-sorted; `analysis::series::merge` concatenates them.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSeries {
    pub station: Station,
    pub historical: Vec<DataPoint>,
    pub forecast: Vec<DataPoint>,
}

// ---------------------------------------------------------------------------
// Overview / flood / map snapshots
// ---------------------------------------------------------------------------

/// Raw parameters reported with a water-quality prediction. Any of them may
/// be missing from the payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParametersUsed {
    pub ph: Option<f64>,
    pub turbidity: Option<f64>,
    pub conductivity: Option<f64>,
    pub oxygen_dissolved: Option<f64>,
    pub water_temperature: Option<f64>,
}

/// The current water-quality prediction for one station.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Remote station name, e.g. `"WQ_Varanasi"`.
    pub name: String,
    pub parameters_used: ParametersUsed,
    pub wqi: Option<f64>,
}

/// Result of `GET /water-quality/predict`.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionSnapshot {
    pub predictions: Vec<Prediction>,
}

/// Result of `GET /flood-observatory/data`.
#[derive(Debug, Clone, PartialEq)]
pub struct FloodSnapshot {
    pub gfds_area_id: String,
    pub last_measured: String,
    /// Value and unit separated by a space, e.g. `"1520.5 m3/s"`.
    pub discharge: String,
    pub flood_magnitude: String,
    /// Numeric status code, 1 through 4 when known.
    pub status: i64,
    /// Every other field of the flat payload, untouched.
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A station as listed by the map data endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct MapStation {
    pub station_id: Option<String>,
    pub name: Option<String>,
    pub location: Option<(f64, f64)>,
    pub parameters: Vec<MapParameter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapParameter {
    pub name: Option<String>,
    pub value: Option<f64>,
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Parses a timestamp as sent by the dashboard API.
///
/// Accepts RFC 3339 with an offset, naive date-times (`T` or space
/// separated, optional fractional seconds, taken as UTC) and plain dates
/// (midnight UTC). Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when fetching or shaping dashboard data.
///
/// The view layer treats every variant the same way (error phase, message,
/// retry), so `to_string()` is what ends up on screen.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Host unreachable, connection reset, timeout.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx HTTP response.
    #[error("HTTP error! status: {status} ({url})")]
    HttpStatus { status: u16, url: String },

    /// Malformed JSON, a missing required field, or an unparseable timestamp.
    #[error("parse error: {0}")]
    Parse(String),

    /// The historical segment was empty, so no normal range can be derived.
    #[error("no historical data for station {station_id}")]
    EmptySeries { station_id: String },

    #[error("invalid station id: {0:?}")]
    InvalidStation(String),

    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

impl FetchError {
    /// HTTP status code, for `HttpStatus` errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_timestamp_accepts_plain_date() {
        let at = parse_timestamp("2024-01-01").expect("plain date should parse");
        assert_eq!((at.year(), at.month(), at.day()), (2024, 1, 1));
        assert_eq!(at.hour(), 0);
    }

    #[test]
    fn test_parse_timestamp_accepts_naive_and_offset_forms() {
        let naive = parse_timestamp("2024-03-05T06:30:00").unwrap();
        let fractional = parse_timestamp("2024-03-05T06:30:00.250").unwrap();
        let spaced = parse_timestamp("2024-03-05 06:30:00").unwrap();
        let offset = parse_timestamp("2024-03-05T12:00:00+05:30").unwrap();

        assert_eq!(naive, spaced);
        assert_eq!(naive.timestamp(), fractional.timestamp());
        // 12:00 IST is 06:30 UTC
        assert_eq!(offset, naive);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("2024-13-45").is_none());
    }

    #[test]
    fn test_reading_lookup_prefers_last_duplicate() {
        let point = DataPoint {
            timestamp: "2024-01-01".to_string(),
            at: parse_timestamp("2024-01-01").unwrap(),
            readings: vec![
                ParameterReading { name: "pH".into(), value: 7.0, is_anomaly: None, normal_range: None },
                ParameterReading { name: "pH".into(), value: 7.4, is_anomaly: None, normal_range: None },
            ],
            wqi: None,
            status: None,
        };
        assert_eq!(point.reading("pH").map(|r| r.value), Some(7.4));
        assert!(point.reading("ph").is_none(), "names match exactly");
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::HttpStatus { status: 503, url: "http://x/y".into() };
        assert_eq!(err.to_string(), "HTTP error! status: 503 (http://x/y)");
        assert_eq!(err.status_code(), Some(503));

        let err = FetchError::EmptySeries { station_id: "UT67".into() };
        assert_eq!(err.to_string(), "no historical data for station UT67");
        assert_eq!(err.status_code(), None);
    }
}
