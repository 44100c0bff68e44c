/// wqdash: client core for the river water-quality dashboard.
///
/// # Module structure
///
/// ```text
/// wqdash
/// ├── model       — shared data types (DataPoint, StationSeries, FloodSnapshot, FetchError, …)
/// ├── config      — client configuration loader (wqdash.toml + WQDASH_* overrides)
/// ├── stations    — monitoring station id catalog
/// ├── logging     — tracing setup and fetch failure classification
/// ├── ingest
/// │   ├── client     — blocking HTTP client for the dashboard API
/// │   ├── prediction — current water quality predictions
/// │   ├── forecast   — per-station parameter forecasts
/// │   ├── satellite  — per-station NDVI/NDWI/NDBI forecasts
/// │   ├── flood      — flood observatory snapshot
/// │   ├── map        — map station listing and value formatting
/// │   └── fixtures (test only) — representative API response payloads
/// ├── analysis
/// │   └── series     — merges points and reshapes them into chart series
/// ├── alert
/// │   └── thresholds — WQI categories and flood status labels
/// ├── view        — per-screen load state (Idle/Loading/Ready/Error)
/// │   └── screen     — background fetch driver for one screen
/// └── dashboard   — view models and the screens wired to the client
/// ```

/// Public modules
pub mod alert;
pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod stations;
pub mod view;
