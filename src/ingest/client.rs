/// Blocking HTTP client for the dashboard API.
///
/// One method per endpoint family. Each builds its URL with the matching
/// `build_*_url`, performs an unauthenticated GET, and hands the body to
/// the matching `parse_*` function. There is no retry, caching or
/// persistence here; retrying is the view layer's job.
///
/// Failures are logged with a classification (see `logging`) and returned
/// to the caller unchanged.

use std::time::Duration;

use tracing::{debug, info};

use super::{flood, forecast, map, prediction, satellite};
use crate::config::DashboardConfig;
use crate::logging::{DataSource, log_fetch_failure};
use crate::model::{FetchError, FloodSnapshot, MapStation, PredictionSnapshot, StationSeries};

#[derive(Clone)]
pub struct RemoteDataClient {
    http: reqwest::blocking::Client,
    origin: String,
    map_data_url: Option<String>,
}

impl RemoteDataClient {
    /// Builds a client from configuration.
    pub fn new(config: &DashboardConfig) -> Result<Self, FetchError> {
        let mut client = Self::with_origin(config.api_origin(), config.request_timeout())?;
        client.map_data_url = config.map_data_url.clone();
        Ok(client)
    }

    /// Builds a client for `origin` with a per-request timeout.
    pub fn with_origin(origin: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            origin: origin.trim_end_matches('/').to_string(),
            map_data_url: None,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    // -----------------------------------------------------------------------
    // Endpoints
    // -----------------------------------------------------------------------

    /// `GET /water-quality/predict`
    pub fn fetch_water_quality(&self) -> Result<PredictionSnapshot, FetchError> {
        let url = prediction::build_water_quality_url(&self.origin);
        self.get_text(&url)
            .and_then(|body| prediction::parse_water_quality(&body))
            .inspect(|s| info!(predictions = s.predictions.len(), "Received water quality predictions"))
            .inspect_err(|e| log_fetch_failure(DataSource::WaterQuality, None, "fetch_water_quality", e))
    }

    /// `GET /dashboard/parameter_forecasts/{station_id}`
    pub fn fetch_parameter_forecast(&self, station_id: &str) -> Result<StationSeries, FetchError> {
        check_station_id(station_id)
            .map(|id| forecast::build_parameter_forecast_url(&self.origin, id))
            .and_then(|url| self.get_text(&url))
            .and_then(|body| forecast::parse_parameter_forecast(&body))
            .inspect(|s| log_series(DataSource::Forecast, station_id, s))
            .inspect_err(|e| {
                log_fetch_failure(DataSource::Forecast, Some(station_id), "fetch_parameter_forecast", e)
            })
    }

    /// `GET /dashboard/satellite_forecasts/{station_id}`
    pub fn fetch_satellite_forecast(&self, station_id: &str) -> Result<StationSeries, FetchError> {
        check_station_id(station_id)
            .map(|id| satellite::build_satellite_forecast_url(&self.origin, id))
            .and_then(|url| self.get_text(&url))
            .and_then(|body| satellite::parse_satellite_forecast(&body))
            .inspect(|s| log_series(DataSource::Satellite, station_id, s))
            .inspect_err(|e| {
                log_fetch_failure(DataSource::Satellite, Some(station_id), "fetch_satellite_forecast", e)
            })
    }

    /// `GET /flood-observatory/data`
    pub fn fetch_flood_snapshot(&self) -> Result<FloodSnapshot, FetchError> {
        let url = flood::build_flood_url(&self.origin);
        self.get_text(&url)
            .and_then(|body| flood::parse_flood_snapshot(&body))
            .inspect(|s| info!(area = %s.gfds_area_id, status = s.status, "Received flood snapshot"))
            .inspect_err(|e| log_fetch_failure(DataSource::Flood, None, "fetch_flood_snapshot", e))
    }

    /// `GET {map_data_url}`. Fails with `NotConfigured` when no map URL was
    /// set.
    pub fn fetch_map_stations(&self) -> Result<Vec<MapStation>, FetchError> {
        self.map_data_url
            .as_deref()
            .ok_or(FetchError::NotConfigured("map_data_url"))
            .and_then(|url| self.get_text(url))
            .and_then(|body| map::parse_map_stations(&body))
            .inspect(|s| info!(stations = s.len(), "Received map stations"))
            .inspect_err(|e| log_fetch_failure(DataSource::Map, None, "fetch_map_stations", e))
    }

    // -----------------------------------------------------------------------
    // Transport
    // -----------------------------------------------------------------------

    /// GETs `url` and returns the body of a 2xx response.
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "GET");

        let response = self
            .http
            .get(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().map_err(transport_error)
    }
}

fn check_station_id(station_id: &str) -> Result<&str, FetchError> {
    if station_id.trim().is_empty() {
        Err(FetchError::InvalidStation(station_id.to_string()))
    } else {
        Ok(station_id)
    }
}

fn transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Network(format!("request timed out: {}", err))
    } else {
        FetchError::Network(err.to_string())
    }
}

fn log_series(source: DataSource, station_id: &str, series: &StationSeries) {
    info!(
        %source,
        station = station_id,
        historical = series.historical.len(),
        forecast = series.forecast.len(),
        "Received station series"
    );
}
