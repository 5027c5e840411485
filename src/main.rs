mod core;
mod platform;
mod poi;
#[cfg(test)]
mod test_support;

use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use tokio::sync::mpsc;

use crate::core::action::{Action, Effect, update};
use crate::core::config::{self, CliOverrides};
use crate::core::state::{App, Phase};
use crate::core::workflow::Workflow;
use crate::platform::permission::PermissionKind;
use crate::platform::providers::{DesktopPermissions, IpLocationProvider};
use crate::poi::overpass::OverpassClient;

#[derive(Parser)]
#[command(name = "parkscout", about = "Nearby parking finder")]
struct Args {
    /// Latitude of a manual position (skips geolocation; pair with --lon)
    #[arg(long, requires = "lon")]
    lat: Option<f64>,
    /// Longitude of a manual position
    #[arg(long, requires = "lat")]
    lon: Option<f64>,
    /// Overpass API endpoint override
    #[arg(long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to parkscout.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("parkscout.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Falling back to default config: {e}");
        config::ParkscoutConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            endpoint: args.endpoint,
            latitude: args.lat,
            longitude: args.lon,
        },
    );
    info!(
        "parkscout starting up (endpoint: {})",
        resolved.overpass_endpoint
    );

    let (tx, mut rx) = mpsc::channel(32);
    let workflow = Arc::new(Workflow::new(
        Arc::new(DesktopPermissions),
        Arc::new(IpLocationProvider::new(resolved.ip_api_endpoint.clone())),
        Arc::new(OverpassClient::with_timeout(
            Some(resolved.overpass_endpoint.clone()),
            resolved.request_timeout,
        )),
        resolved.location,
        PermissionKind::FineLocation,
        tx,
    ));

    let mut app = App::new();
    app.region.center = resolved.default_center;

    // A manual position takes the tap path and skips geolocation entirely.
    let first = match resolved.manual_position {
        Some(position) => Action::MapTapped(position),
        None => Action::Initialize,
    };
    run_effect(&workflow, update(&mut app, first));

    // Drain actions until the pipeline settles in Ready or Failed.
    while let Some(action) = rx.recv().await {
        let effect = update(&mut app, action);
        run_effect(&workflow, effect);
        if matches!(app.phase, Phase::Ready | Phase::Failed(_)) {
            break;
        }
    }

    render(&app);
    Ok(())
}

fn run_effect(workflow: &Arc<Workflow>, effect: Effect) {
    match effect {
        Effect::ResolveLocation => workflow.spawn_initialize(),
        Effect::FetchSpots { center, generation } => workflow.spawn_query(center, generation),
        Effect::None => {}
    }
}

/// Stand-in display layer: prints what a map screen would render.
fn render(app: &App) {
    println!("{}", app.status_message);
    println!(
        "Region: ({}, {}) spanning {} x {} deg",
        app.region.center.latitude,
        app.region.center.longitude,
        app.region.latitude_span,
        app.region.longitude_span
    );
    for spot in &app.spots {
        println!(
            "  [{}] {} ({}, {}) at ({}, {})",
            spot.id,
            spot.name(),
            spot.parking_type(),
            spot.operator(),
            spot.position.latitude,
            spot.position.longitude
        );
    }
}
