//! Water Quality Dashboard - command line client
//!
//! Fetches one dashboard view from the backend and prints it:
//! 1. overview  - current WQI card per station
//! 2. forecast  - parameter forecast for a station, with the flood panel
//! 3. satellite - NDVI/NDWI/NDBI forecast for a station
//! 4. flood     - flood observatory snapshot
//! 5. map       - map station listing (needs map_data_url)
//! 6. stations  - the station picker list
//!
//! A failed fetch is printed as an error view with a retry hint; the exit
//! status is non-zero only for usage and configuration errors.
//!
//! Usage:
//!   wqdash [--config PATH] [-v] <overview|forecast [ID]|satellite [ID]|flood|map|stations>
//!
//! Environment:
//!   WQDASH_BASE_URL, WQDASH_MAP_URL, WQDASH_TIMEOUT_SECS - override wqdash.toml
//!   RUST_LOG - log filter (logs go to stderr)

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use wqdash::config::DashboardConfig;
use wqdash::dashboard::{Dashboard, FloodPanel, ForecastView, MapMarker, SatelliteView, StationCard};
use wqdash::logging::{self, DataSource};
use wqdash::model::FetchError;
use wqdash::view::Phase;
use wqdash::view::screen::ScreenController;

enum Command {
    Overview,
    Forecast(Option<String>),
    Satellite(Option<String>),
    Flood,
    Map,
    Stations,
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {} [--config PATH] [-v] <overview|forecast [ID]|satellite [ID]|flood|map|stations>",
        program
    )
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("wqdash");

    let mut config_path: Option<PathBuf> = None;
    let mut verbose = false;
    let mut positional: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else {
                    eprintln!("Error: --config requires a path");
                    std::process::exit(2);
                }
            }
            "-v" | "--verbose" => {
                verbose = true;
                i += 1;
            }
            "-h" | "--help" => {
                println!("{}", usage(program));
                return;
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("{}", usage(program));
                std::process::exit(2);
            }
            other => {
                positional.push(other.to_string());
                i += 1;
            }
        }
    }

    let command = match parse_command(&positional) {
        Some(command) => command,
        None => {
            eprintln!("{}", usage(program));
            std::process::exit(2);
        }
    };

    logging::init(verbose);

    let config = match DashboardConfig::load_with_env(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let dashboard = match Dashboard::new(config) {
        Ok(dashboard) => dashboard,
        Err(e) => {
            logging::log_fetch_failure(DataSource::System, None, "client setup", &e);
            eprintln!("❌ Could not set up the HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    println!("💧 Water Quality Dashboard ({})", dashboard.client().origin());
    println!("================================\n");

    match command {
        Command::Overview => show_overview(&dashboard),
        Command::Forecast(station) => show_forecast(&dashboard, station),
        Command::Satellite(station) => show_satellite(&dashboard, station),
        Command::Flood => show_flood(dashboard.flood_panel()),
        Command::Map => show_map(&dashboard),
        Command::Stations => show_stations(&dashboard),
    }
}

fn parse_command(positional: &[String]) -> Option<Command> {
    let (name, rest) = positional.split_first()?;
    let station = rest.first().cloned();
    if rest.len() > 1 {
        return None;
    }
    match (name.as_str(), station) {
        ("overview", None) => Some(Command::Overview),
        ("forecast", station) => Some(Command::Forecast(station)),
        ("satellite", station) => Some(Command::Satellite(station)),
        ("flood", None) => Some(Command::Flood),
        ("map", None) => Some(Command::Map),
        ("stations", None) => Some(Command::Stations),
        _ => None,
    }
}

/// Long enough for one request at the configured timeout plus slack.
fn settle_timeout(dashboard: &Dashboard) -> Duration {
    dashboard.config().request_timeout() + Duration::from_secs(5)
}

/// Mounts `screen` on `station` (or its default) and waits for it to settle.
fn load_screen<T: Send + 'static>(screen: &mut ScreenController<T>, station: Option<String>, timeout: Duration) {
    match station {
        Some(id) => {
            screen.select_station(&id);
        }
        None => {
            screen.mount();
        }
    }
    if !screen.wait_settled(timeout) {
        eprintln!("⚠️  Timed out waiting for {}", screen.cycle().station_id());
    }
}

fn print_error_view(message: &str, retry_hint: &str) {
    println!("❌ Error: {}", message);
    println!("   ↻ Retry: {}", retry_hint);
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

fn show_overview(dashboard: &Dashboard) {
    println!("📊 Current water quality\n");
    match dashboard.overview_cards() {
        Ok(cards) if cards.is_empty() => println!("   No predictions available"),
        Ok(cards) => cards.iter().for_each(print_card),
        Err(e) => print_error_view(&e.to_string(), "wqdash overview"),
    }
}

fn print_card(card: &StationCard) {
    println!("   {} - WQI {:.2} ({})", card.display_name, card.wqi, card.status);
    println!(
        "      pH {:.2} | Turbidity {:.2} | Conductivity {:.2} | DO {:.2} | Temp {:.2}",
        card.ph, card.turbidity, card.conductivity, card.dissolved_oxygen, card.temperature
    );
}

fn show_forecast(dashboard: &Dashboard, station: Option<String>) {
    let mut screen = dashboard.forecast_screen();
    let flood = dashboard.spawn_flood_panel();
    let timeout = settle_timeout(dashboard);

    load_screen(&mut screen, station, timeout);

    let station_id = screen.cycle().station_id().to_string();
    match screen.cycle().phase() {
        Phase::Ready(view) => print_forecast(view),
        Phase::Error(message) => print_error_view(message, &format!("wqdash forecast {}", station_id)),
        Phase::Idle | Phase::Loading => println!("⏳ Loading {}...", station_id),
    }
    screen.unmount();

    println!();
    show_flood(flood.wait(timeout));
}

fn print_forecast(view: &ForecastView) {
    println!("📈 {} ({})", view.station.name, view.station.id);
    if let Some(status) = view.current_status() {
        println!("   Current status: {}", status);
    }
    println!();

    for chart in &view.charts {
        let Some(series) = view.series.get(&chart.name) else {
            continue;
        };
        match chart.normal_range {
            Some((low, high)) => println!("   {} (normal {}-{})", chart.name, low, high),
            None => println!("   {}", chart.name),
        }
        for (pos, (label, point)) in view.labels.iter().zip(&series.points).enumerate() {
            let marker = if view.is_forecast(pos) { "forecast" } else { "" };
            match point.value {
                Some(v) => println!("      {:<8} {:>10.2} {}", label, v, marker),
                None => println!("      {:<8} {:>10} {}", label, "-", marker),
            }
        }
    }
}

fn show_satellite(dashboard: &Dashboard, station: Option<String>) {
    let mut screen = dashboard.satellite_screen();
    load_screen(&mut screen, station, settle_timeout(dashboard));

    let station_id = screen.cycle().station_id().to_string();
    match screen.cycle().phase() {
        Phase::Ready(view) => print_satellite(view),
        Phase::Error(message) => print_error_view(message, &format!("wqdash satellite {}", station_id)),
        Phase::Idle | Phase::Loading => println!("⏳ Loading {}...", station_id),
    }
    screen.unmount();
}

fn print_satellite(view: &SatelliteView) {
    if view.is_empty() {
        return;
    }
    println!("🛰️  {} ({})\n", view.station.name, view.station.id);
    for series in view.series.iter() {
        let label = wqdash::ingest::satellite::satellite_index(&series.name)
            .map(|index| index.label)
            .unwrap_or(series.name.as_str());
        println!("   {}", label);
        for (pos, (date, point)) in view.labels.iter().zip(&series.points).enumerate() {
            let marker = if pos >= view.forecast_start { "forecast" } else { "" };
            match point.value {
                Some(v) => println!("      {:<8} {:>8.3} {}", date, v, marker),
                None => println!("      {:<8} {:>8} {}", date, "-", marker),
            }
        }
    }
}

fn show_flood(panel: Result<FloodPanel, FetchError>) {
    println!("🌊 Flood observatory");
    match panel {
        Ok(panel) => {
            println!("   Area {} - last measured {}", panel.area_id, panel.last_measured);
            match panel.discharge_value {
                Some(value) => println!("   Discharge: {} {}", value, panel.discharge_unit),
                None => println!("   Discharge: N/A"),
            }
            match panel.magnitude_marker {
                Some(marker) => println!("   Magnitude: {}", marker),
                None => println!("   Magnitude: N/A"),
            }
            println!("   Status: {} ({})", panel.status_label, panel.status_code);
        }
        Err(e) => print_error_view(&e.to_string(), "wqdash flood"),
    }
}

fn show_map(dashboard: &Dashboard) {
    println!("🗺️  Map stations\n");
    match dashboard.map_markers() {
        Ok(markers) if markers.is_empty() => println!("   No stations with a location"),
        Ok(markers) => markers.iter().for_each(print_marker),
        Err(FetchError::NotConfigured(key)) => {
            println!("   Map panel disabled: set {} in wqdash.toml or WQDASH_MAP_URL", key)
        }
        Err(e) => print_error_view(&e.to_string(), "wqdash map"),
    }
}

fn print_marker(marker: &MapMarker) {
    println!(
        "   {} ({}) at {:.4}, {:.4}",
        marker.name, marker.station_id, marker.latitude, marker.longitude
    );
    for (name, value) in &marker.rows {
        println!("      {}: {}", name, value);
    }
}

fn show_stations(dashboard: &Dashboard) {
    let default = &dashboard.config().default_station;
    for id in dashboard.station_ids() {
        let marker = if &id == default { " (default)" } else { "" };
        println!("   {}{}", id, marker);
    }
}
