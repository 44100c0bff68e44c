/// Status classification for dashboard readings.
///
/// Submodules:
/// - `thresholds` — WQI bands and flood observatory status codes.

pub mod thresholds;
