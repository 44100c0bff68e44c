/// Data shaping for the dashboard charts.
///
/// Submodules:
/// - `series` — merges historical + forecast points and pivots them into
///   per-parameter series.

pub mod series;
