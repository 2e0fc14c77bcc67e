pub mod dashboard;
pub mod fleet_api;
pub mod health;
pub mod presets;
pub mod servers;
pub mod settings;

use axum::{routing::get, routing::post, Router};
use csman::fleet::Fleet;
use csman::page::{PageScanner, ReqwestFetcher};
use csman::presets::PresetCatalog;
use csman::storage::{load_settings, settings_path};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<PresetCatalog>,
    pub fleet: Fleet,
    pub scanner: PageScanner,
    pub settings_path: PathBuf,
}

pub fn build_router(state: AppState) -> Router {
    let web_dir = web_dir();
    Router::new()
        .route("/", get(dashboard::dashboard_page))
        .route("/servers", get(servers::servers_page))
        .route("/servers/refresh", post(servers::refresh_servers))
        .route("/servers/:server_id/map", post(servers::pick_map))
        .route("/servers/:server_id/map/search", post(servers::search_map))
        .route("/presets/apply", post(presets::apply_preset_action))
        .route("/api/fleet", get(fleet_api::fleet_snapshot))
        .route("/api/fleet/events", get(fleet_api::fleet_events))
        .route("/settings", get(settings::settings_page).post(settings::settings_save))
        .route("/health", get(health::health))
        .nest_service("/web", ServeDir::new(web_dir))
        .with_state(state)
}

pub fn default_state() -> AppState {
    AppState {
        catalog: Arc::new(PresetCatalog::builtin()),
        fleet: Fleet::new(),
        scanner: PageScanner::new(Arc::new(ReqwestFetcher::new())),
        settings_path: settings_path(),
    }
}

/// One scan at startup when a manage URL is configured. Failures leave the
/// fleet empty; the operator can rescan from the Servers page.
pub async fn initial_scan(state: &AppState) {
    let settings = match load_settings(&state.settings_path).await {
        Ok(settings) => settings,
        Err(message) => {
            warn!("could not load settings: {message}");
            return;
        }
    };

    let url = settings.manage_url.trim();
    if url.is_empty() {
        info!("manage URL not configured; fleet stays empty until a scan");
        return;
    }

    match state.scanner.scan(url).await {
        Ok(records) => {
            info!("scanned {} servers from {url}", records.len());
            state.fleet.replace(records).await;
        }
        Err(message) => warn!("initial scan failed: {message}"),
    }
}

fn web_dir() -> PathBuf {
    std::env::var("CSMAN_WEB_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("web"))
}
