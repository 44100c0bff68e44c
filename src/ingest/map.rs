/// Station listing behind the map panel.
///
/// The map endpoint is configured as a full URL (`map_data_url`) rather
/// than a path under the API origin. Its body is `{ stations: [...] }`,
/// where every field of a station may be missing.

use serde::Deserialize;

use crate::model::{FetchError, MapParameter, MapStation};

#[derive(Deserialize)]
struct MapResponse {
    #[serde(default)]
    stations: Option<Vec<WireMapStation>>,
}

#[derive(Deserialize)]
struct WireMapStation {
    #[serde(default)]
    station_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    location: Option<WireLocation>,
    #[serde(default)]
    parameters: Option<Vec<WireMapParameter>>,
}

#[derive(Deserialize)]
struct WireLocation {
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
}

#[derive(Deserialize)]
struct WireMapParameter {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    value: Option<f64>,
}

/// Units appended to map popup values, keyed by parameter name.
const PARAMETER_UNITS: &[(&str, &str)] = &[
    ("Water Temperature", "°C"),
    ("Depth", "m"),
    ("Conductivity", "µS/cm"),
    ("Water Turbidity", "NTU"),
    ("River Stage", "m"),
    ("Nitrate", "mg/L"),
    ("Chloride", "mg/L"),
    ("Oxygen, dissolved", "mg/L"),
    ("Chemical Oxygen Demand", "mg/L"),
    ("Biochemical Oxygen Demand", "mg/L"),
    ("Total Organic Carbon", "mg/L"),
];

pub fn unit_for(parameter: &str) -> Option<&'static str> {
    PARAMETER_UNITS
        .iter()
        .find(|(name, _)| *name == parameter)
        .map(|(_, unit)| *unit)
}

/// Parses the map listing. A missing `stations` key yields an empty list.
/// Stations without both coordinates get `location: None`.
pub fn parse_map_stations(json: &str) -> Result<Vec<MapStation>, FetchError> {
    let response: MapResponse = serde_json::from_str(json)
        .map_err(|e| FetchError::Parse(format!("JSON deserialization failed: {}", e)))?;

    Ok(response
        .stations
        .unwrap_or_default()
        .into_iter()
        .map(|s| MapStation {
            station_id: s.station_id,
            name: s.name,
            location: s.location.and_then(|l| Some((l.latitude?, l.longitude?))),
            parameters: s
                .parameters
                .unwrap_or_default()
                .into_iter()
                .map(|p| MapParameter { name: p.name, value: p.value })
                .collect(),
        })
        .collect())
}

/// Formats a value for display with two decimals and the parameter's unit,
/// or `"N/A"` when there is no value.
pub fn format_map_value(value: Option<f64>, parameter: &str) -> String {
    match value {
        None => "N/A".to_string(),
        Some(v) => match unit_for(parameter) {
            Some(unit) => format!("{:.2} {}", v, unit),
            None => format!("{:.2}", v),
        },
    }
}
