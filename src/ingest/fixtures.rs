/// Test fixtures: representative JSON payloads from the dashboard API.
///
/// These fixtures are structurally complete but truncated to the minimum
/// needed to exercise the parsers. Shapes:
///
///   /water-quality/predict
///     predictions[] { name, parameters_used { ph, turbidity, conductivity,
///                     oxygen_dissolved, water_temperature }, wqi }
///
///   /dashboard/parameter_forecasts/{id}
///     { station_id, station_name, latitude, longitude,
///       historical_data[], forecast_data[] }
///     each entry { timestamp, parameters[] { name, value, is_anomaly,
///                  normal_range [lo, hi] }, wqi, status }
///
///   /dashboard/satellite_forecasts/{id}
///     same envelope, but `parameters` is { ndvi, ndwi, ndbi }
///
///   /flood-observatory/data
///     flat object; discharge is "value unit", status a numeric code

/// Two historical points and one forecast point for UT67. The second
/// historical point carries a Turbidity anomaly; the forecast point drops
/// Turbidity entirely.
#[cfg(test)]
pub(crate) fn fixture_parameter_forecast_json() -> &'static str {
    r#"{
      "station_id": "UT67",
      "station_name": "Ganga at Varanasi",
      "latitude": 25.3176,
      "longitude": 82.9739,
      "historical_data": [
        {
          "timestamp": "2024-01-01T00:00:00",
          "parameters": [
            { "name": "pH", "value": 7.0, "is_anomaly": false, "normal_range": [6.5, 8.5] },
            { "name": "Turbidity", "value": 4.2, "is_anomaly": false, "normal_range": [0.0, 5.0] }
          ],
          "wqi": 80.0,
          "status": "Good"
        },
        {
          "timestamp": "2024-01-02T00:00:00",
          "parameters": [
            { "name": "pH", "value": 7.1, "is_anomaly": false, "normal_range": [6.5, 8.5] },
            { "name": "Turbidity", "value": 9.8, "is_anomaly": true, "normal_range": [0.0, 5.0] }
          ],
          "wqi": 62.5,
          "status": "Moderate"
        }
      ],
      "forecast_data": [
        {
          "timestamp": "2024-01-03T00:00:00",
          "parameters": [
            { "name": "pH", "value": 6.8, "is_anomaly": false, "normal_range": [6.5, 8.5] }
          ],
          "wqi": 35.0,
          "status": "Poor"
        }
      ]
    }"#
}

/// Forecast envelope with no historical points.
#[cfg(test)]
pub(crate) fn fixture_empty_historical_json() -> &'static str {
    r#"{
      "station_id": "WB90",
      "station_name": "Hooghly at Kolkata",
      "latitude": 22.57,
      "longitude": 88.36,
      "historical_data": [],
      "forecast_data": [
        {
          "timestamp": "2024-02-01",
          "parameters": [{ "name": "pH", "value": 7.3, "is_anomaly": false, "normal_range": [6.5, 8.5] }],
          "wqi": 71.0,
          "status": "Moderate"
        }
      ]
    }"#
}

/// Forecast envelope whose only point has a timestamp that is not a date.
#[cfg(test)]
pub(crate) fn fixture_bad_timestamp_json() -> &'static str {
    r#"{
      "station_id": "UT67",
      "station_name": "Ganga at Varanasi",
      "latitude": 25.3176,
      "longitude": 82.9739,
      "historical_data": [
        { "timestamp": "not-a-date", "parameters": [], "wqi": 50.0, "status": "Moderate" }
      ],
      "forecast_data": []
    }"#
}

/// Satellite indices for UT67: one historical, two forecast points.
#[cfg(test)]
pub(crate) fn fixture_satellite_forecast_json() -> &'static str {
    r#"{
      "station_id": "UT67",
      "station_name": "Ganga at Varanasi",
      "latitude": 25.3176,
      "longitude": 82.9739,
      "historical_data": [
        { "timestamp": "2024-01-01T00:00:00", "parameters": { "ndvi": 0.41, "ndwi": -0.12, "ndbi": 0.05 } }
      ],
      "forecast_data": [
        { "timestamp": "2024-01-17T00:00:00", "parameters": { "ndvi": 0.43, "ndwi": -0.10, "ndbi": 0.04 } },
        { "timestamp": "2024-02-02T00:00:00", "parameters": { "ndvi": 0.45, "ndwi": -0.08, "ndbi": 0.04 } }
      ]
    }"#
}

/// Satellite payload missing `ndbi` in its only point.
#[cfg(test)]
pub(crate) fn fixture_satellite_missing_index_json() -> &'static str {
    r#"{
      "station_id": "UT67",
      "station_name": "Ganga at Varanasi",
      "latitude": 25.3176,
      "longitude": 82.9739,
      "historical_data": [
        { "timestamp": "2024-01-01T00:00:00", "parameters": { "ndvi": 0.41, "ndwi": -0.12 } }
      ],
      "forecast_data": []
    }"#
}

/// Three predictions: one complete, one missing raw parameters, one
/// missing the index entirely.
#[cfg(test)]
pub(crate) fn fixture_water_quality_json() -> &'static str {
    r#"{
      "predictions": [
        {
          "name": "WQ_Varanasi",
          "parameters_used": {
            "ph": 7.4, "turbidity": 3.1, "conductivity": 412.0,
            "oxygen_dissolved": 6.8, "water_temperature": 24.5
          },
          "wqi": 78.25
        },
        {
          "name": "WQ_Patna",
          "parameters_used": { "ph": 6.9, "turbidity": 12.4 },
          "wqi": 41.0
        },
        {
          "name": "Kanpur",
          "parameters_used": {}
        }
      ]
    }"#
}

/// Flood observatory snapshot with an extra field the client ignores.
#[cfg(test)]
pub(crate) fn fixture_flood_json() -> &'static str {
    r#"{
      "gfds_area_id": 1234,
      "last_measured": "2024-08-14",
      "discharge": "1520.5 m3/s",
      "flood_magnitude": "2.3 sigma",
      "status": 3,
      "river": "Ganga"
    }"#
}

/// Map station listing with one station lacking a location.
#[cfg(test)]
pub(crate) fn fixture_map_stations_json() -> &'static str {
    r#"{
      "stations": [
        {
          "station_id": "UT67",
          "name": "Varanasi",
          "location": { "latitude": 25.3176, "longitude": 82.9739 },
          "parameters": [
            { "name": "Water Temperature", "value": 24.4 },
            { "name": "Nitrate", "value": 1.2 },
            { "name": "Colour", "value": null }
          ]
        },
        {
          "station_id": "BH79",
          "name": "Patna",
          "parameters": []
        }
      ]
    }"#
}
