use std::collections::HashSet;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use traveltime_collector::config::{JobConfig, Throttle};
use traveltime_collector::domain::{DepartureTime, StationKind};
use traveltime_collector::fetch::collect_travel_times;
use traveltime_collector::ns::{NsClient, NsConfig};
use traveltime_collector::reconcile::Reconciler;
use traveltime_collector::registry::{Registry, RegistryConfig};
use traveltime_collector::store::TravelTimeStore;

/// Pause between destination queries to balance load on the NS server.
const THROTTLE_DELAY: Duration = Duration::from_millis(300);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Credentials come from the environment, never from the repo
    let username = std::env::var("NS_USERNAME").unwrap_or_else(|_| {
        eprintln!("Warning: NS_USERNAME not set. API calls will fail.");
        String::new()
    });
    let api_key = std::env::var("NS_APIKEY").unwrap_or_else(|_| {
        eprintln!("Warning: NS_APIKEY not set. API calls will fail.");
        String::new()
    });

    let departure = match std::env::var("DEPARTURE_TIME") {
        Ok(raw) => match DepartureTime::parse(&raw) {
            Ok(departure) => departure,
            Err(e) => panic!("DEPARTURE_TIME is not a valid timestamp: {e}"),
        },
        Err(_) => panic!("DEPARTURE_TIME must be set to a DD-MM-YYYY hh:mm timestamp"),
    };

    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "website/data".to_string());
    let dry_run = std::env::var("DRY_RUN").is_ok_and(|v| v == "1");

    let job = JobConfig::new(&data_dir)
        .with_throttle(Throttle::fixed(THROTTLE_DELAY))
        .with_dry_run(dry_run);

    let client = NsClient::new(NsConfig::new(&username, &api_key))
        .expect("Failed to create NS client");

    info!("loading station registry");
    let registry = Registry::load(&client, &RegistryConfig::default())
        .await
        .expect("Failed to load station registry");
    info!(stations = registry.len(), "registry loaded");

    let store = TravelTimeStore::new(&job.data_dir);

    // Collect travel times from the larger stations; stoptrein-only and
    // optional stations are destinations, not origins.
    let origin_kinds: HashSet<StationKind> = [
        StationKind::Mega,
        StationKind::Intercity,
        StationKind::InterchangeIntercity,
    ]
    .into();
    let origins = registry.filter_by_kind(&origin_kinds);

    collect_travel_times(
        &client,
        &registry,
        &store,
        &origins,
        &departure,
        &job.throttle,
    )
    .await
    .expect("Travel-time collection failed");

    let reconciler = Reconciler::new(&registry, &store, &job);
    let reports = reconciler
        .run(&client, &departure, &job.throttle)
        .await
        .expect("Reconciliation failed");
    let rewritten = reports.iter().filter(|r| r.rewritten).count();
    info!(origins = reports.len(), rewritten, "reconciliation done");

    let summary_path = std::path::Path::new(&data_dir).join("stations.json");
    registry
        .export_summary(job.data_dir.as_path(), &summary_path)
        .expect("Failed to write station summary");
    info!(path = %summary_path.display(), "station summary written");
}
