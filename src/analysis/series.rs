/// Series shaping for the forecast and satellite charts.
///
/// The remote payload is point-major (each timestamp carries a list of
/// named readings); charts want parameter-major series (one line per
/// parameter, one value per timestamp). This module does that pivot.
///
/// Nothing here re-sorts or de-duplicates. Order is always the order the
/// points arrived in, historical segment first.

use std::collections::HashSet;

use crate::model::DataPoint;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One position in a parameter series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub timestamp: String,
    /// `None` when the point at this position did not carry the parameter.
    pub value: Option<f64>,
}

/// All values of one parameter across a list of points.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSeries {
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

impl ParameterSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Values by position, gaps included.
    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Smallest and largest present value.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.value)
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Parameter series keyed by name, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    series: Vec<ParameterSeries>,
}

impl SeriesSet {
    pub fn get(&self, name: &str) -> Option<&ParameterSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterSeries> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// A chart to draw: parameter name plus its normal band.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartParameter {
    pub name: String,
    pub normal_range: Option<(f64, f64)>,
}

// ---------------------------------------------------------------------------
// Transforms
// ---------------------------------------------------------------------------

/// Concatenates the historical and forecast segments.
///
/// Historical first, then forecast. No sorting and no de-duplication: a
/// timestamp present in both segments appears twice.
pub fn merge(historical: &[DataPoint], forecast: &[DataPoint]) -> Vec<DataPoint> {
    let mut merged = Vec::with_capacity(historical.len() + forecast.len());
    merged.extend_from_slice(historical);
    merged.extend_from_slice(forecast);
    merged
}

/// Pivots points into one series per parameter name.
///
/// Names are discovered from the data in first-seen order and matched by
/// exact equality. Every resulting series has exactly `points.len()`
/// entries, aligned with `points`; a point that lacks a parameter leaves a
/// `None` at its position.
pub fn to_parameter_series(points: &[DataPoint]) -> SeriesSet {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut names: Vec<&str> = Vec::new();

    for point in points {
        for reading in &point.readings {
            if seen.insert(reading.name.as_str()) {
                names.push(reading.name.as_str());
            }
        }
    }

    let series = names
        .into_iter()
        .map(|name| ParameterSeries {
            name: name.to_string(),
            points: points
                .iter()
                .map(|point| SeriesPoint {
                    timestamp: point.timestamp.clone(),
                    value: point.reading(name).map(|r| r.value),
                })
                .collect(),
        })
        .collect();

    SeriesSet { series }
}

/// Normal range for `name`, taken from the first point only.
///
/// Later points are not consulted even if they report a different range.
pub fn normal_range_of(points: &[DataPoint], name: &str) -> Option<(f64, f64)> {
    points.first()?.reading(name)?.normal_range
}

/// The charts the forecast screen draws: every parameter of the first
/// point, with its normal range, in the order the point lists them.
pub fn chart_parameters(points: &[DataPoint]) -> Vec<ChartParameter> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let mut charts: Vec<ChartParameter> = Vec::new();
    for reading in &first.readings {
        if charts.iter().any(|c| c.name == reading.name) {
            continue;
        }
        charts.push(ChartParameter {
            name: reading.name.clone(),
            normal_range: normal_range_of(points, &reading.name),
        });
    }
    charts
}

/// Short x-axis label for a point, e.g. `"Jan 1"`.
pub fn chart_label(point: &DataPoint) -> String {
    point.at.format("%b %-d").to_string()
}

/// X-axis labels for a list of points.
pub fn chart_labels(points: &[DataPoint]) -> Vec<String> {
    points.iter().map(chart_label).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
