/// Per-station parameter forecast: URL construction and JSON parsing for
///   GET {base}/dashboard/parameter_forecasts/{station_id}
///
/// Each point carries an open-ended array of named readings plus the
/// aggregate WQI and a status label.

use serde::Deserialize;

use super::envelope::parse_envelope;
use crate::model::{FetchError, ParameterReading, StationSeries};

#[derive(Deserialize)]
struct WireParameter {
    name: String,
    value: f64,
    #[serde(default)]
    is_anomaly: Option<bool>,
    #[serde(default)]
    normal_range: Option<[f64; 2]>,
}

impl From<WireParameter> for ParameterReading {
    fn from(p: WireParameter) -> Self {
        ParameterReading {
            name: p.name,
            value: p.value,
            is_anomaly: p.is_anomaly,
            normal_range: p.normal_range.map(|[lo, hi]| (lo, hi)),
        }
    }
}

/// Builds the parameter forecast URL for one station. The id is
/// percent-encoded into the path.
pub fn build_parameter_forecast_url(origin: &str, station_id: &str) -> String {
    format!(
        "{}/dashboard/parameter_forecasts/{}",
        origin.trim_end_matches('/'),
        urlencoding::encode(station_id)
    )
}

/// Parses a parameter forecast response body.
///
/// # Errors
/// `FetchError::Parse` for malformed JSON, missing fields, or timestamps
/// that do not parse.
pub fn parse_parameter_forecast(json: &str) -> Result<StationSeries, FetchError> {
    parse_envelope(json, |params: Vec<WireParameter>| {
        params.into_iter().map(ParameterReading::from).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::*;

    #[test]
    fn test_build_url_joins_origin_and_station() {
        assert_eq!(
            build_parameter_forecast_url("http://192.168.29.123:8000", "UT67"),
            "http://192.168.29.123:8000/dashboard/parameter_forecasts/UT67"
        );
        assert_eq!(
            build_parameter_forecast_url("http://host:8000/", "UT67"),
            "http://host:8000/dashboard/parameter_forecasts/UT67"
        );
    }

    #[test]
    fn test_build_url_encodes_station_id() {
        let url = build_parameter_forecast_url("http://host", "UT 67/x");
        assert!(url.ends_with("/parameter_forecasts/UT%2067%2Fx"), "got: {}", url);
    }

    #[test]
    fn test_parse_keeps_segments_and_order() {
        let series = parse_parameter_forecast(fixture_parameter_forecast_json()).unwrap();
        assert_eq!(series.station.id, "UT67");
        assert_eq!(series.station.name, "Ganga at Varanasi");
        assert_eq!(series.historical.len(), 2);
        assert_eq!(series.forecast.len(), 1);
        assert_eq!(series.historical[0].timestamp, "2024-01-01T00:00:00");
        assert_eq!(series.historical[1].timestamp, "2024-01-02T00:00:00");
        assert_eq!(series.forecast[0].timestamp, "2024-01-03T00:00:00");
    }

    #[test]
    fn test_parse_maps_reading_fields() {
        let series = parse_parameter_forecast(fixture_parameter_forecast_json()).unwrap();
        let turbidity = series.historical[1].reading("Turbidity").unwrap();
        assert_eq!(turbidity.value, 9.8);
        assert_eq!(turbidity.is_anomaly, Some(true));
        assert_eq!(turbidity.normal_range, Some((0.0, 5.0)));
        assert_eq!(series.historical[1].wqi, Some(62.5));
        assert_eq!(series.historical[1].status.as_deref(), Some("Moderate"));
    }

    #[test]
    fn test_parse_accepts_empty_historical_segment() {
        // Emptiness is the view layer's concern, not the parser's.
        let series = parse_parameter_forecast(fixture_empty_historical_json()).unwrap();
        assert!(series.historical.is_empty());
        assert_eq!(series.forecast.len(), 1);
    }

    #[test]
    fn test_parse_rejects_bad_timestamp() {
        let err = parse_parameter_forecast(fixture_bad_timestamp_json()).unwrap_err();
        assert!(matches!(err, FetchError::Parse(ref m) if m.contains("not-a-date")), "got: {:?}", err);
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_parameter_forecast("{ not json").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_missing_segment() {
        let err = parse_parameter_forecast(r#"{ "station_id": "UT67", "historical_data": [] }"#).unwrap_err();
        assert!(err.to_string().contains("forecast_data"), "got: {}", err);
    }
}
