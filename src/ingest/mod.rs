/// Remote data ingestion for the dashboard.
///
/// One file per endpoint family, each with URL construction and response
/// parsing as plain functions; `client` does the HTTP and ties them
/// together.
///
/// - `prediction` — current water-quality predictions (overview cards)
/// - `forecast`   — per-station parameter forecast (historical + forecast)
/// - `satellite`  — per-station NDVI/NDWI/NDBI forecast
/// - `flood`      — flood observatory snapshot
/// - `map`        — station listing behind the map panel
/// - `envelope`   — station envelope shared by forecast and satellite
/// - `fixtures`   (test only) — representative API payloads

pub mod client;
mod envelope;
pub mod fixtures;
pub mod flood;
pub mod forecast;
pub mod map;
pub mod prediction;
pub mod satellite;

pub use client::RemoteDataClient;
