use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use departure_board::config::AppConfig;
use departure_board::huxley::{DepartureSource, HuxleyClient, MockHuxleyClient};
use departure_board::stations::StationNames;
use departure_board::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("departure_board=info,tower_http=info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let stations = match &config.stations_file {
        Some(path) => StationNames::from_json_file(path),
        None => StationNames::builtin(),
    };
    let stations = match stations {
        Ok(stations) => stations,
        Err(e) => {
            error!(error = %e, "Failed to load station names");
            return ExitCode::FAILURE;
        }
    };
    info!(count = stations.len(), "Loaded station names");

    let result = match &config.mock_boards_dir {
        Some(dir) => match MockHuxleyClient::from_dir(dir) {
            Ok(mock) => {
                info!(
                    dir = %dir.display(),
                    stations = ?mock.available_stations(),
                    "Serving mock departure data"
                );
                serve(&config, mock, stations).await
            }
            Err(e) => {
                error!(error = %e, "Failed to load mock data");
                return ExitCode::FAILURE;
            }
        },
        None => match HuxleyClient::new(config.huxley()) {
            Ok(client) => {
                info!(base_url = %config.huxley_base_url, "Using live Huxley upstream");
                serve(&config, client, stations).await
            }
            Err(e) => {
                error!(error = %e, "Failed to create Huxley client");
                return ExitCode::FAILURE;
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}

async fn serve<S>(config: &AppConfig, upstream: S, stations: StationNames) -> std::io::Result<()>
where
    S: DepartureSource + Send + Sync + 'static,
{
    let static_dir = &config.static_dir;
    if !static_dir.is_dir() {
        warn!(dir = %static_dir.display(), "Static directory not found");
    }

    let app = create_router(AppState::new(upstream, stations), static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Departure board listening on http://{}", config.bind_addr);
    info!("  GET /                              - Board page");
    info!("  GET /health                        - Health check");
    info!("  GET /api/departures/{{stationCode}}  - Aggregated departures");
    info!("  GET /api/service/{{serviceId}}       - Calling points");
    info!("  GET /api/stations?q=               - Station search");

    axum::serve(listener, app).await
}
