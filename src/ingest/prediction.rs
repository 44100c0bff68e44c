/// Current water-quality predictions for all stations:
///   GET {base}/water-quality/predict

use serde::Deserialize;

use crate::model::{FetchError, ParametersUsed, Prediction, PredictionSnapshot};

#[derive(Deserialize)]
struct PredictResponse {
    predictions: Vec<WirePrediction>,
}

#[derive(Deserialize)]
struct WirePrediction {
    name: String,
    #[serde(default)]
    parameters_used: Option<WireParametersUsed>,
    #[serde(default)]
    wqi: Option<f64>,
}

#[derive(Deserialize, Default)]
struct WireParametersUsed {
    #[serde(default)]
    ph: Option<f64>,
    #[serde(default)]
    turbidity: Option<f64>,
    #[serde(default)]
    conductivity: Option<f64>,
    #[serde(default)]
    oxygen_dissolved: Option<f64>,
    #[serde(default)]
    water_temperature: Option<f64>,
}

pub fn build_water_quality_url(origin: &str) -> String {
    format!("{}/water-quality/predict", origin.trim_end_matches('/'))
}

/// Parses the prediction list. Missing raw parameters or a missing index
/// are kept as `None`; only `predictions[].name` is required.
pub fn parse_water_quality(json: &str) -> Result<PredictionSnapshot, FetchError> {
    let response: PredictResponse = serde_json::from_str(json)
        .map_err(|e| FetchError::Parse(format!("JSON deserialization failed: {}", e)))?;

    let predictions = response
        .predictions
        .into_iter()
        .map(|p| {
            let used = p.parameters_used.unwrap_or_default();
            Prediction {
                name: p.name,
                parameters_used: ParametersUsed {
                    ph: used.ph,
                    turbidity: used.turbidity,
                    conductivity: used.conductivity,
                    oxygen_dissolved: used.oxygen_dissolved,
                    water_temperature: used.water_temperature,
                },
                wqi: p.wqi,
            }
        })
        .collect();

    Ok(PredictionSnapshot { predictions })
}

/// Short station name shown on an overview card: the segment after the
/// first `_` (`"WQ_Varanasi"` → `"Varanasi"`), or the whole name when there
/// is no underscore.
pub fn display_name(name: &str) -> &str {
    name.split('_').nth(1).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::*;

    #[test]
    fn test_build_url() {
        assert_eq!(
            build_water_quality_url("http://192.168.240.122:8000"),
            "http://192.168.240.122:8000/water-quality/predict"
        );
    }

    #[test]
    fn test_parse_full_and_sparse_predictions() {
        let snapshot = parse_water_quality(fixture_water_quality_json()).unwrap();
        assert_eq!(snapshot.predictions.len(), 3);

        let varanasi = &snapshot.predictions[0];
        assert_eq!(varanasi.name, "WQ_Varanasi");
        assert_eq!(varanasi.parameters_used.ph, Some(7.4));
        assert_eq!(varanasi.parameters_used.water_temperature, Some(24.5));
        assert_eq!(varanasi.wqi, Some(78.25));

        let patna = &snapshot.predictions[1];
        assert_eq!(patna.parameters_used.turbidity, Some(12.4));
        assert!(patna.parameters_used.conductivity.is_none());

        let kanpur = &snapshot.predictions[2];
        assert!(kanpur.wqi.is_none());
        assert_eq!(kanpur.parameters_used, ParametersUsed::default());
    }

    #[test]
    fn test_missing_predictions_key_is_parse_error() {
        let err = parse_water_quality(r#"{ "detail": "model not loaded" }"#).unwrap_err();
        assert!(err.to_string().contains("predictions"), "got: {}", err);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("WQ_Varanasi"), "Varanasi");
        assert_eq!(display_name("WQ_Patna_2"), "Patna");
        assert_eq!(display_name("Kanpur"), "Kanpur");
    }
}
