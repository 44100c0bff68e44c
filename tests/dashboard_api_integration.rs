/// Integration tests for the dashboard client against a local mock API
///
/// These tests verify:
/// 1. Every endpoint is fetched, parsed and shaped into its view model
/// 2. Screens go Loading → Ready / Error over real HTTP
/// 3. Retry after a server error recovers
/// 4. A slow answer for a previous station never overwrites the current one
/// 5. The flood panel loads alongside a forecast screen
///
/// The mock API is a tiny_http server on an ephemeral port; each request is
/// answered on its own thread so slow routes do not hold up the others.
///
/// Run with: cargo test --test dashboard_api_integration

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use wqdash::alert::thresholds::WaterQualityStatus;
use wqdash::config::DashboardConfig;
use wqdash::dashboard::Dashboard;
use wqdash::ingest::RemoteDataClient;
use wqdash::model::FetchError;
use wqdash::view::{Applied, Phase};

const WAIT: Duration = Duration::from_secs(10);

const PREDICTIONS: &str = r#"{
  "predictions": [
    {
      "name": "WQ_Varanasi",
      "parameters_used": {
        "ph": 7.4, "turbidity": 3.1, "conductivity": 412.0,
        "oxygen_dissolved": 6.8, "water_temperature": 24.5
      },
      "wqi": 78.25
    },
    { "name": "WQ_Patna", "parameters_used": { "ph": 6.9 }, "wqi": 22.0 }
  ]
}"#;

const SATELLITE: &str = r#"{
  "station_id": "UT67",
  "station_name": "Ganga at Varanasi",
  "latitude": 25.3176,
  "longitude": 82.9739,
  "historical_data": [
    { "timestamp": "2024-01-01T00:00:00", "parameters": { "ndvi": 0.41, "ndwi": -0.12, "ndbi": 0.05 } }
  ],
  "forecast_data": [
    { "timestamp": "2024-01-17T00:00:00", "parameters": { "ndvi": 0.43, "ndwi": -0.10, "ndbi": 0.04 } }
  ]
}"#;

const FLOOD: &str = r#"{
  "gfds_area_id": "1234",
  "last_measured": "2024-08-14",
  "discharge": "1520.5 m3/s",
  "flood_magnitude": "2.3 sigma",
  "status": 3
}"#;

const MAP: &str = r#"{
  "stations": [
    {
      "station_id": "UT67",
      "name": "Varanasi",
      "location": { "latitude": 25.3176, "longitude": 82.9739 },
      "parameters": [ { "name": "pH", "value": 7.2 } ]
    }
  ]
}"#;

fn forecast_body(station_id: &str) -> String {
    format!(
        r#"{{
  "station_id": "{id}",
  "station_name": "Station {id}",
  "latitude": 25.3,
  "longitude": 82.9,
  "historical_data": [
    {{
      "timestamp": "2024-01-01T00:00:00",
      "parameters": [
        {{ "name": "pH", "value": 7.0, "is_anomaly": false, "normal_range": [6.5, 8.5] }},
        {{ "name": "Turbidity", "value": 4.2, "is_anomaly": false, "normal_range": [0.0, 5.0] }}
      ],
      "wqi": 80.0
    }}
  ],
  "forecast_data": [
    {{
      "timestamp": "2024-01-02T00:00:00",
      "parameters": [ {{ "name": "pH", "value": 6.8 }} ],
      "wqi": 35.0
    }}
  ]
}}"#,
        id = station_id
    )
}

fn empty_forecast_body(station_id: &str) -> String {
    format!(
        r#"{{ "station_id": "{}", "historical_data": [], "forecast_data": [] }}"#,
        station_id
    )
}

// ---------------------------------------------------------------------------
// Mock API
// ---------------------------------------------------------------------------

struct MockApi {
    origin: String,
    flaky_calls: Arc<AtomicUsize>,
}

/// Routes one request path to a status and body.
///
/// - `FAIL` always answers 500
/// - `FLAKY` answers 500 once, then succeeds
/// - `SLOW` succeeds after a delay
/// - `EMPTY` has no historical points
/// - unknown paths answer 404
fn route(path: &str, flaky_calls: &AtomicUsize) -> (u16, String) {
    const FORECAST: &str = "/dashboard/parameter_forecasts/";

    if path == "/water-quality/predict" {
        return (200, PREDICTIONS.to_string());
    }
    if path == "/flood-observatory/data" {
        return (200, FLOOD.to_string());
    }
    if path == "/map/stations" {
        return (200, MAP.to_string());
    }
    if path == "/dashboard/satellite_forecasts/UT67" {
        return (200, SATELLITE.to_string());
    }
    if let Some(id) = path.strip_prefix(FORECAST) {
        return match id {
            "UT67" | "BH79" => (200, forecast_body(id)),
            "FAIL" => (500, r#"{"detail":"model crashed"}"#.to_string()),
            "FLAKY" => {
                if flaky_calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    (500, r#"{"detail":"warming up"}"#.to_string())
                } else {
                    (200, forecast_body(id))
                }
            }
            "SLOW" => {
                thread::sleep(Duration::from_millis(500));
                (200, forecast_body(id))
            }
            "EMPTY" => (200, empty_forecast_body(id)),
            _ => (404, r#"{"detail":"Station not found"}"#.to_string()),
        };
    }
    (404, r#"{"detail":"Not Found"}"#.to_string())
}

fn start_mock_api() -> MockApi {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock API");
    let port = server.server_addr().to_ip().expect("TCP listener").port();
    let flaky_calls = Arc::new(AtomicUsize::new(0));

    let calls = Arc::clone(&flaky_calls);
    thread::spawn(move || {
        for request in server.incoming_requests() {
            let calls = Arc::clone(&calls);
            thread::spawn(move || {
                let (status, body) = route(request.url(), &calls);
                let response = tiny_http::Response::from_string(body)
                    .with_status_code(tiny_http::StatusCode::from(status))
                    .with_header(
                        tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
                    );
                let _ = request.respond(response);
            });
        }
    });

    MockApi {
        origin: format!("http://127.0.0.1:{}", port),
        flaky_calls,
    }
}

fn dashboard_for(api: &MockApi) -> Dashboard {
    let config = DashboardConfig {
        base_url: api.origin.clone(),
        request_timeout_secs: 5,
        map_data_url: Some(format!("{}/map/stations", api.origin)),
        fetch_workers: 2,
        ..DashboardConfig::default()
    };
    Dashboard::new(config).expect("dashboard")
}

// ---------------------------------------------------------------------------
// One-shot fetches
// ---------------------------------------------------------------------------

#[test]
fn test_overview_cards_over_http() {
    let api = start_mock_api();
    let cards = dashboard_for(&api).overview_cards().unwrap();

    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].display_name, "Varanasi");
    assert_eq!(cards[0].status, WaterQualityStatus::Good);
    assert_eq!(cards[1].display_name, "Patna");
    assert_eq!(cards[1].status, WaterQualityStatus::Poor);
    assert_eq!(cards[1].turbidity, 0.0);
}

#[test]
fn test_flood_panel_over_http() {
    let api = start_mock_api();
    let panel = dashboard_for(&api).flood_panel().unwrap();

    assert_eq!(panel.area_id, "1234");
    assert_eq!(panel.discharge_value, Some(1520.5));
    assert_eq!(panel.status_label, "Moderate flow");
}

#[test]
fn test_map_markers_over_http() {
    let api = start_mock_api();
    let markers = dashboard_for(&api).map_markers().unwrap();

    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].name, "Varanasi");
    assert_eq!(markers[0].rows, vec![("pH".to_string(), "7.20".to_string())]);
}

#[test]
fn test_map_requires_configured_url() {
    let api = start_mock_api();
    let config = DashboardConfig {
        base_url: api.origin.clone(),
        ..DashboardConfig::default()
    };
    let dashboard = Dashboard::new(config).unwrap();

    assert_eq!(dashboard.map_markers().unwrap_err(), FetchError::NotConfigured("map_data_url"));
}

#[test]
fn test_unknown_station_is_http_404() {
    let api = start_mock_api();
    let client = RemoteDataClient::with_origin(&api.origin, Duration::from_secs(5)).unwrap();

    let err = client.fetch_parameter_forecast("ZZ00").unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert!(err.to_string().starts_with("HTTP error! status: 404"));
}

#[test]
fn test_unreachable_backend_is_network_error() {
    // Bind then drop a listener so the port is known to be closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = RemoteDataClient::with_origin(&format!("http://127.0.0.1:{}", port), Duration::from_secs(2)).unwrap();

    let err = client.fetch_water_quality().unwrap_err();
    assert!(matches!(err, FetchError::Network(_)), "got {:?}", err);
}

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

#[test]
fn test_forecast_screen_loads_default_station() {
    let api = start_mock_api();
    let dashboard = dashboard_for(&api);
    let mut screen = dashboard.forecast_screen();

    assert!(screen.mount());
    assert!(screen.wait_settled(WAIT));

    let view = screen.cycle().data().expect("forecast ready");
    assert_eq!(view.station.id, "UT67");
    assert_eq!(view.points.len(), 2);
    assert_eq!(view.series.names(), vec!["pH", "Turbidity"]);
    assert_eq!(view.labels, vec!["Jan 1", "Jan 2"]);

    let turbidity = view.series.get("Turbidity").unwrap();
    assert_eq!(turbidity.values(), vec![Some(4.2), None]);
}

#[test]
fn test_forecast_screen_server_error_then_retry() {
    let api = start_mock_api();
    let dashboard = dashboard_for(&api);
    let mut screen = dashboard.forecast_screen();

    screen.select_station("FLAKY");
    assert!(screen.wait_settled(WAIT));
    let message = screen.cycle().error().expect("first attempt fails").to_string();
    assert!(message.starts_with("HTTP error! status: 500"), "{}", message);
    assert!(screen.cycle().data().is_none());

    assert!(screen.retry());
    assert!(screen.wait_settled(WAIT));
    assert_eq!(screen.cycle().data().map(|v| v.station.id.as_str()), Some("FLAKY"));
    assert!(screen.cycle().error().is_none());
    assert_eq!(api.flaky_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_forecast_screen_persistent_failure_stays_in_error() {
    let api = start_mock_api();
    let dashboard = dashboard_for(&api);
    let mut screen = dashboard.forecast_screen();

    screen.select_station("FAIL");
    assert!(screen.wait_settled(WAIT));
    assert!(screen.cycle().error().is_some());

    screen.retry();
    assert!(screen.wait_settled(WAIT));
    assert!(matches!(screen.cycle().phase(), Phase::Error(_)));
}

#[test]
fn test_forecast_screen_empty_history_is_error() {
    let api = start_mock_api();
    let dashboard = dashboard_for(&api);
    let mut screen = dashboard.forecast_screen();

    screen.select_station("EMPTY");
    assert!(screen.wait_settled(WAIT));
    assert_eq!(screen.cycle().error(), Some("no historical data for station EMPTY"));
}

#[test]
fn test_slow_previous_station_does_not_overwrite_current() {
    let api = start_mock_api();
    let dashboard = dashboard_for(&api);
    let mut screen = dashboard.forecast_screen();

    screen.select_station("SLOW");
    screen.select_station("BH79");

    assert!(screen.wait_settled(WAIT));
    assert_eq!(screen.cycle().data().map(|v| v.station.id.as_str()), Some("BH79"));

    assert_eq!(screen.next_completion(WAIT), Some(Applied::Stale));
    assert_eq!(screen.cycle().station_id(), "BH79");
    assert_eq!(screen.cycle().data().map(|v| v.station.id.as_str()), Some("BH79"));
}

#[test]
fn test_flood_panel_loads_alongside_forecast() {
    let api = start_mock_api();
    let dashboard = dashboard_for(&api);
    let mut screen = dashboard.forecast_screen();

    screen.mount();
    let flood = dashboard.spawn_flood_panel();

    assert!(screen.wait_settled(WAIT));
    let panel = flood.wait(WAIT).unwrap();

    assert!(screen.cycle().data().is_some());
    assert_eq!(panel.magnitude_marker, Some('2'));
}

#[test]
fn test_satellite_screen_over_http() {
    let api = start_mock_api();
    let dashboard = dashboard_for(&api);
    let mut screen = dashboard.satellite_screen();

    screen.mount();
    assert!(screen.wait_settled(WAIT));

    let view = screen.cycle().data().expect("satellite ready");
    assert_eq!(view.series.names(), vec!["ndvi", "ndwi", "ndbi"]);
    assert_eq!(view.series.get("ndvi").unwrap().values(), vec![Some(0.41), Some(0.43)]);
    assert_eq!(view.forecast_start, 1);
}

#[test]
fn test_unmounted_screen_ignores_late_result() {
    let api = start_mock_api();
    let dashboard = dashboard_for(&api);
    let mut screen = dashboard.forecast_screen();

    screen.select_station("SLOW");
    screen.unmount();

    assert_eq!(screen.next_completion(WAIT), Some(Applied::Unmounted));
    assert!(screen.cycle().data().is_none());
}
