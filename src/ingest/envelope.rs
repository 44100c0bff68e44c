/// Shared station envelope for the forecast and satellite endpoints.
///
/// Both endpoints return the same wrapper around two arrays of points; only
/// the shape of `parameters` differs (array of named readings vs. an object
/// of three fixed indices). The envelope is generic over that shape and the
/// caller supplies the conversion into `ParameterReading`s.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::model::{DataPoint, FetchError, ParameterReading, Station, StationSeries, parse_timestamp};

#[derive(Deserialize)]
#[serde(bound(deserialize = "P: DeserializeOwned"))]
pub(crate) struct Envelope<P> {
    station_id: String,
    #[serde(default)]
    station_name: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    historical_data: Vec<WirePoint<P>>,
    forecast_data: Vec<WirePoint<P>>,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "P: DeserializeOwned"))]
struct WirePoint<P> {
    timestamp: String,
    parameters: P,
    #[serde(default)]
    wqi: Option<f64>,
    #[serde(default)]
    status: Option<String>,
}

/// Deserializes an envelope and converts every point's parameters with
/// `convert`, keeping both segments in source order.
///
/// # Errors
/// `FetchError::Parse` for malformed JSON, missing required fields or a
/// timestamp that does not parse.
pub(crate) fn parse_envelope<P, F>(json: &str, convert: F) -> Result<StationSeries, FetchError>
where
    P: DeserializeOwned,
    F: Fn(P) -> Vec<ParameterReading>,
{
    let envelope: Envelope<P> = serde_json::from_str(json)
        .map_err(|e| FetchError::Parse(format!("JSON deserialization failed: {}", e)))?;

    let station = Station {
        name: envelope.station_name.unwrap_or_else(|| envelope.station_id.clone()),
        id: envelope.station_id,
        latitude: envelope.latitude.unwrap_or(0.0),
        longitude: envelope.longitude.unwrap_or(0.0),
    };

    let historical = convert_points(envelope.historical_data, &convert)?;
    let forecast = convert_points(envelope.forecast_data, &convert)?;

    Ok(StationSeries { station, historical, forecast })
}

fn convert_points<P, F>(points: Vec<WirePoint<P>>, convert: &F) -> Result<Vec<DataPoint>, FetchError>
where
    F: Fn(P) -> Vec<ParameterReading>,
{
    points
        .into_iter()
        .map(|p| {
            let at = parse_timestamp(&p.timestamp)
                .ok_or_else(|| FetchError::Parse(format!("invalid timestamp '{}'", p.timestamp)))?;
            Ok(DataPoint {
                timestamp: p.timestamp,
                at,
                readings: convert(p.parameters),
                wqi: p.wqi,
                status: p.status,
            })
        })
        .collect()
}
