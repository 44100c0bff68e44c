/// Structured logging for the dashboard client
///
/// Installs a `tracing` subscriber and provides helpers that tag fetch
/// failures with their data source, station and a failure classification,
/// so an unreachable backend reads differently in the logs from a station
/// the backend simply does not know.

use std::fmt;
use tracing_subscriber::EnvFilter;

use crate::model::FetchError;

// ---------------------------------------------------------------------------
// Data Source Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    WaterQuality,
    Forecast,
    Satellite,
    Flood,
    Map,
    System,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::WaterQuality => write!(f, "WQI"),
            DataSource::Forecast => write!(f, "FORECAST"),
            DataSource::Satellite => write!(f, "SATELLITE"),
            DataSource::Flood => write!(f, "FLOOD"),
            DataSource::Map => write!(f, "MAP"),
            DataSource::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureType {
    /// The backend answered but has nothing for this station (404).
    Expected,
    /// Server error, malformed payload or bad input.
    Unexpected,
    /// Could not reach the backend at all.
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Classifies a fetch failure for logging.
pub fn classify_failure(err: &FetchError) -> FailureType {
    match err {
        FetchError::HttpStatus { status: 404, .. } => FailureType::Expected,
        FetchError::EmptySeries { .. } => FailureType::Expected,
        FetchError::Network(_) => FailureType::Unknown,
        FetchError::HttpStatus { .. }
        | FetchError::Parse(_)
        | FetchError::InvalidStation(_)
        | FetchError::NotConfigured(_) => FailureType::Unexpected,
    }
}

// ---------------------------------------------------------------------------
// Subscriber setup
// ---------------------------------------------------------------------------

/// Default filter when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "wqdash=debug" } else { "wqdash=info" }
}

/// Installs the global subscriber. `RUST_LOG` wins over `verbose`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Failure logging
// ---------------------------------------------------------------------------

/// Logs a fetch failure at a level chosen by its classification.
pub fn log_fetch_failure(source: DataSource, station_id: Option<&str>, operation: &str, err: &FetchError) {
    let failure_type = classify_failure(err);
    let station = station_id.unwrap_or("-");

    match failure_type {
        FailureType::Expected => {
            tracing::debug!(%source, station, %failure_type, error = %err, "{} failed", operation)
        }
        FailureType::Unexpected => {
            tracing::error!(%source, station, %failure_type, error = %err, "{} failed", operation)
        }
        FailureType::Unknown => {
            tracing::warn!(%source, station, %failure_type, error = %err, "{} failed", operation)
        }
    }
}
