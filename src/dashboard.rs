/// Dashboard composition: view models and screens.
///
/// This module ties the client, the series transforms and the status
/// classifier together into what each screen of the app shows:
///
/// 1. Overview - one card per station from the current predictions
/// 2. Forecast - per-parameter charts over historical + forecast points
/// 3. Satellite - NDVI/NDWI/NDBI charts over the same span
/// 4. Flood / map - the flood observatory panel and map markers
///
/// The forecast and satellite screens are `ScreenController`s; the others
/// are one-shot fetches. Rendering is left to the caller.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use threadpool::ThreadPool;
use tracing::info;

use crate::alert::thresholds::{WaterQualityStatus, classify, flood_status_label};
use crate::analysis::series::{ChartParameter, SeriesSet, chart_labels, chart_parameters, merge, to_parameter_series};
use crate::config::DashboardConfig;
use crate::ingest::RemoteDataClient;
use crate::ingest::flood::{magnitude_marker, parse_discharge};
use crate::ingest::map::format_map_value;
use crate::ingest::prediction::display_name;
use crate::model::{DataPoint, FetchError, FloodSnapshot, MapStation, Prediction, Station, StationSeries};
use crate::view::screen::{Loader, ScreenController};

// ---------------------------------------------------------------------------
// Forecast view
// ---------------------------------------------------------------------------

/// Everything the forecast screen draws for one station.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub station: Station,
    /// Historical points followed by forecast points.
    pub points: Vec<DataPoint>,
    /// Index of the first forecast point in `points`.
    pub forecast_start: usize,
    pub labels: Vec<String>,
    pub series: SeriesSet,
    /// One chart per parameter of the first historical point.
    pub charts: Vec<ChartParameter>,
    /// WQI category per point, where the point has an index.
    pub statuses: Vec<Option<WaterQualityStatus>>,
}

impl ForecastView {
    /// Shapes a fetched series for display.
    ///
    /// # Errors
    /// `FetchError::EmptySeries` when there are no historical points, since
    /// the charts and their normal ranges are taken from the first one.
    pub fn from_series(series: StationSeries) -> Result<Self, FetchError> {
        if series.historical.is_empty() {
            return Err(FetchError::EmptySeries {
                station_id: series.station.id,
            });
        }

        let charts = chart_parameters(&series.historical);
        let points = merge(&series.historical, &series.forecast);
        let statuses = points.iter().map(|p| p.wqi.map(classify)).collect();

        Ok(Self {
            forecast_start: series.historical.len(),
            labels: chart_labels(&points),
            series: to_parameter_series(&points),
            charts,
            statuses,
            points,
            station: series.station,
        })
    }

    /// Category of the most recent historical point.
    pub fn current_status(&self) -> Option<WaterQualityStatus> {
        self.forecast_start
            .checked_sub(1)
            .and_then(|i| self.statuses.get(i).copied().flatten())
    }

    pub fn is_forecast(&self, position: usize) -> bool {
        position >= self.forecast_start
    }
}

// ---------------------------------------------------------------------------
// Satellite view
// ---------------------------------------------------------------------------

/// Everything the satellite screen draws for one station.
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteView {
    pub station: Station,
    pub points: Vec<DataPoint>,
    pub forecast_start: usize,
    pub labels: Vec<String>,
    /// Always keyed `ndvi`, `ndwi`, `ndbi` when there is at least one point.
    pub series: SeriesSet,
}

impl SatelliteView {
    /// Shapes a fetched series for display. An empty series is allowed and
    /// simply draws nothing.
    pub fn from_series(series: StationSeries) -> Self {
        let points = merge(&series.historical, &series.forecast);
        Self {
            forecast_start: series.historical.len(),
            labels: chart_labels(&points),
            series: to_parameter_series(&points),
            points,
            station: series.station,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Overview cards
// ---------------------------------------------------------------------------

/// One overview card. Missing raw values display as 0.
#[derive(Debug, Clone, PartialEq)]
pub struct StationCard {
    pub display_name: String,
    pub ph: f64,
    pub turbidity: f64,
    pub conductivity: f64,
    pub dissolved_oxygen: f64,
    pub temperature: f64,
    pub wqi: f64,
    pub status: WaterQualityStatus,
}

impl From<&Prediction> for StationCard {
    fn from(p: &Prediction) -> Self {
        let used = &p.parameters_used;
        let wqi = p.wqi.unwrap_or(0.0);
        StationCard {
            display_name: display_name(&p.name).to_string(),
            ph: used.ph.unwrap_or(0.0),
            turbidity: used.turbidity.unwrap_or(0.0),
            conductivity: used.conductivity.unwrap_or(0.0),
            dissolved_oxygen: used.oxygen_dissolved.unwrap_or(0.0),
            temperature: used.water_temperature.unwrap_or(0.0),
            wqi,
            status: classify(wqi),
        }
    }
}

// ---------------------------------------------------------------------------
// Flood panel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct FloodPanel {
    pub area_id: String,
    pub last_measured: String,
    pub discharge_value: Option<f64>,
    pub discharge_unit: String,
    pub magnitude_marker: Option<char>,
    pub status_code: i64,
    pub status_label: &'static str,
}

impl From<&FloodSnapshot> for FloodPanel {
    fn from(s: &FloodSnapshot) -> Self {
        let (discharge_value, discharge_unit) = match parse_discharge(&s.discharge) {
            Some((value, unit)) => (Some(value), unit),
            None => (None, String::new()),
        };
        FloodPanel {
            area_id: s.gfds_area_id.clone(),
            last_measured: s.last_measured.clone(),
            discharge_value,
            discharge_unit,
            magnitude_marker: magnitude_marker(&s.flood_magnitude),
            status_code: s.status,
            status_label: flood_status_label(s.status),
        }
    }
}

/// A flood panel fetch running on the worker pool.
pub struct PendingFlood {
    rx: Receiver<Result<FloodPanel, FetchError>>,
}

impl PendingFlood {
    /// Waits up to `timeout` for the panel.
    pub fn wait(self, timeout: Duration) -> Result<FloodPanel, FetchError> {
        self.rx
            .recv_timeout(timeout)
            .unwrap_or_else(|_| Err(FetchError::Network("flood snapshot fetch did not finish".into())))
    }
}

// ---------------------------------------------------------------------------
// Map markers
// ---------------------------------------------------------------------------

/// A map marker with its popup rows, ready to display.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub station_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// `(parameter name, formatted value)` pairs.
    pub rows: Vec<(String, String)>,
}

/// Builds markers for every station with a location. Stations without one
/// are skipped with a warning.
pub fn map_markers(stations: &[MapStation]) -> Vec<MapMarker> {
    stations
        .iter()
        .filter_map(|s| {
            let Some((latitude, longitude)) = s.location else {
                tracing::warn!(station = s.station_id.as_deref().unwrap_or("?"), "Invalid location data for station");
                return None;
            };
            Some(MapMarker {
                station_id: s.station_id.clone().unwrap_or_else(|| "N/A".to_string()),
                name: s.name.clone().unwrap_or_else(|| "Unnamed Station".to_string()),
                latitude,
                longitude,
                rows: s
                    .parameters
                    .iter()
                    .map(|p| {
                        let name = p.name.clone().unwrap_or_else(|| "Unknown Parameter".to_string());
                        let value = format_map_value(p.value, &name);
                        (name, value)
                    })
                    .collect(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Owns the client and worker pool shared by every screen.
pub struct Dashboard {
    config: DashboardConfig,
    client: RemoteDataClient,
    pool: ThreadPool,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Result<Self, FetchError> {
        let client = RemoteDataClient::new(&config)?;
        let pool = ThreadPool::with_name("wqdash-fetch".into(), config.fetch_workers.max(1));
        info!(origin = client.origin(), workers = config.fetch_workers, "Dashboard ready");
        Ok(Self { config, client, pool })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn client(&self) -> &RemoteDataClient {
        &self.client
    }

    /// Station ids offered in the picker.
    pub fn station_ids(&self) -> Vec<String> {
        self.config.station_ids()
    }

    /// Forecast screen, Idle on the configured default station.
    pub fn forecast_screen(&self) -> ScreenController<ForecastView> {
        let client = self.client.clone();
        let loader: Loader<ForecastView> = Arc::new(move |station_id: &str| {
            client
                .fetch_parameter_forecast(station_id)
                .and_then(ForecastView::from_series)
        });
        ScreenController::new("forecast", self.config.default_station.clone(), self.pool.clone(), loader)
    }

    /// Satellite screen, Idle on the configured default station.
    pub fn satellite_screen(&self) -> ScreenController<SatelliteView> {
        let client = self.client.clone();
        let loader: Loader<SatelliteView> = Arc::new(move |station_id: &str| {
            client
                .fetch_satellite_forecast(station_id)
                .map(SatelliteView::from_series)
        });
        ScreenController::new("satellite", self.config.default_station.clone(), self.pool.clone(), loader)
    }

    /// Overview cards, one per prediction.
    pub fn overview_cards(&self) -> Result<Vec<StationCard>, FetchError> {
        let snapshot = self.client.fetch_water_quality()?;
        Ok(snapshot.predictions.iter().map(StationCard::from).collect())
    }

    pub fn flood_panel(&self) -> Result<FloodPanel, FetchError> {
        self.client.fetch_flood_snapshot().map(|s| FloodPanel::from(&s))
    }

    /// Starts the flood panel fetch on the worker pool, independent of any
    /// screen fetch already running.
    pub fn spawn_flood_panel(&self) -> PendingFlood {
        let (tx, rx) = mpsc::channel();
        let client = self.client.clone();
        self.pool.execute(move || {
            let _ = tx.send(client.fetch_flood_snapshot().map(|s| FloodPanel::from(&s)));
        });
        PendingFlood { rx }
    }

    pub fn map_markers(&self) -> Result<Vec<MapMarker>, FetchError> {
        self.client.fetch_map_stations().map(|s| map_markers(&s))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
