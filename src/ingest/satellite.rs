/// Per-station satellite index forecast: URL construction and parsing for
///   GET {base}/dashboard/satellite_forecasts/{station_id}
///
/// Same envelope as the parameter forecast, but every point carries exactly
/// three indices as an object rather than an array of readings.

use serde::Deserialize;

use super::envelope::parse_envelope;
use crate::model::{FetchError, ParameterReading, StationSeries};

/// Display metadata for one satellite index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SatelliteIndex {
    /// Key used on the wire and as the parameter name.
    pub key: &'static str,
    pub label: &'static str,
    pub short_label: &'static str,
}

/// The three indices, in chart order.
pub const SATELLITE_INDICES: [SatelliteIndex; 3] = [
    SatelliteIndex {
        key: "ndvi",
        label: "Normalized Difference Vegetation Index",
        short_label: "NDVI",
    },
    SatelliteIndex {
        key: "ndwi",
        label: "Normalized Difference Water Index",
        short_label: "NDWI",
    },
    SatelliteIndex {
        key: "ndbi",
        label: "Normalized Difference Built-up Index",
        short_label: "NDBI",
    },
];

/// Looks up index metadata by wire key.
pub fn satellite_index(key: &str) -> Option<&'static SatelliteIndex> {
    SATELLITE_INDICES.iter().find(|i| i.key == key)
}

#[derive(Deserialize)]
struct SatelliteParameters {
    ndvi: f64,
    ndwi: f64,
    ndbi: f64,
}

impl SatelliteParameters {
    fn into_readings(self) -> Vec<ParameterReading> {
        [self.ndvi, self.ndwi, self.ndbi]
            .into_iter()
            .zip(SATELLITE_INDICES.iter())
            .map(|(value, index)| ParameterReading {
                name: index.key.to_string(),
                value,
                is_anomaly: None,
                normal_range: None,
            })
            .collect()
    }
}

/// Builds the satellite forecast URL for one station.
pub fn build_satellite_forecast_url(origin: &str, station_id: &str) -> String {
    format!(
        "{}/dashboard/satellite_forecasts/{}",
        origin.trim_end_matches('/'),
        urlencoding::encode(station_id)
    )
}

/// Parses a satellite forecast response body. Each point yields readings
/// named `ndvi`, `ndwi`, `ndbi`, in that order.
///
/// # Errors
/// `FetchError::Parse` if any point lacks one of the three indices, or for
/// malformed JSON / timestamps.
pub fn parse_satellite_forecast(json: &str) -> Result<StationSeries, FetchError> {
    parse_envelope(json, SatelliteParameters::into_readings)
}
