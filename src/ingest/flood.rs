/// Flood observatory snapshot:
///   GET {base}/flood-observatory/data
///
/// The payload is a flat object. `discharge` and `flood_magnitude` arrive as
/// strings and are split here for display; `status` is a numeric code that
/// `alert::thresholds::flood_status_label` turns into text.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::model::{FetchError, FloodSnapshot};

#[derive(Deserialize)]
struct WireFlood {
    gfds_area_id: Value,
    last_measured: String,
    discharge: String,
    flood_magnitude: String,
    status: Value,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

pub fn build_flood_url(origin: &str) -> String {
    format!("{}/flood-observatory/data", origin.trim_end_matches('/'))
}

/// Parses the flood snapshot.
///
/// `gfds_area_id` may be a string or a number. `status` must be an integer
/// (a numeric string is tolerated).
pub fn parse_flood_snapshot(json: &str) -> Result<FloodSnapshot, FetchError> {
    let wire: WireFlood = serde_json::from_str(json)
        .map_err(|e| FetchError::Parse(format!("JSON deserialization failed: {}", e)))?;

    let gfds_area_id = match &wire.gfds_area_id {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => return Err(FetchError::Parse(format!("unexpected gfds_area_id: {}", other))),
    };

    let status = status_code(&wire.status)
        .ok_or_else(|| FetchError::Parse(format!("status is not a numeric code: {}", wire.status)))?;

    Ok(FloodSnapshot {
        gfds_area_id,
        last_measured: wire.last_measured,
        discharge: wire.discharge,
        flood_magnitude: wire.flood_magnitude,
        status,
        extra: wire.extra,
    })
}

fn status_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Splits a discharge string such as `"1520.5 m3/s"` into its value and
/// unit. Returns `None` if the first token is not a number.
pub fn parse_discharge(discharge: &str) -> Option<(f64, String)> {
    let mut tokens = discharge.split(' ').filter(|t| !t.is_empty());
    let value = tokens.next()?.parse().ok()?;
    let unit = tokens.collect::<Vec<_>>().join(" ");
    Some((value, unit))
}

/// Leading marker of the flood magnitude string.
///
/// This takes the first character, not the first space-separated token the
/// way `parse_discharge` does, so `"12.3 sigma"` yields `'1'`. Kept as the
/// existing dashboard shows it.
pub fn magnitude_marker(flood_magnitude: &str) -> Option<char> {
    flood_magnitude.split(' ').next().and_then(|s| s.chars().next())
}
