use crate::forms::{MapPickForm, MapSearchForm};
use crate::routes::AppState;
use crate::services::{first_map_match, format_scan_timestamp};
use crate::views::servers::render_servers_page;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Form,
};
use csman::storage::load_settings;
use tracing::info;

pub async fn servers_page(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    render_page(&state, None).await
}

pub async fn refresh_servers(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let settings = load_settings(&state.settings_path)
        .await
        .map_err(|message| (StatusCode::INTERNAL_SERVER_ERROR, message))?;

    let url = settings.manage_url.trim().to_string();
    if url.is_empty() {
        return render_page(&state, Some("manage URL not configured; see Settings")).await;
    }

    match state.scanner.scan(&url).await {
        Ok(records) => {
            info!("rescanned {} servers", records.len());
            let message = format!("scanned {} servers", records.len());
            state.fleet.replace(records).await;
            render_page(&state, Some(&message)).await
        }
        Err(message) => render_page(&state, Some(&format!("scan failed: {message}"))).await,
    }
}

pub async fn pick_map(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    Form(form): Form<MapPickForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    let message = match state.fleet.set_map(&server_id, &form.map).await {
        Ok(()) => format!("server {server_id} switched to {}", form.map),
        Err(message) => message,
    };
    render_page(&state, Some(&message)).await
}

pub async fn search_map(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    Form(form): Form<MapSearchForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    let records = state.fleet.snapshot().await;
    let record = records
        .iter()
        .find(|record| record.server_id == server_id);

    let message = match record {
        None => format!("unknown server {server_id}"),
        Some(record) => match first_map_match(&record.available_maps, &form.query) {
            None => format!("no map matches {:?}", form.query),
            Some(map) => {
                let map = map.to_string();
                match state.fleet.set_map(&server_id, &map).await {
                    Ok(()) => format!("server {server_id} switched to {map}"),
                    Err(message) => message,
                }
            }
        },
    };
    render_page(&state, Some(&message)).await
}

pub(crate) async fn render_page(
    state: &AppState,
    message: Option<&str>,
) -> Result<Html<String>, (StatusCode, String)> {
    let settings = load_settings(&state.settings_path)
        .await
        .map_err(|message| (StatusCode::INTERNAL_SERVER_ERROR, message))?;
    let records = state.fleet.snapshot().await;
    let last_scan = format_scan_timestamp(state.fleet.scanned_at().await);

    Ok(Html(render_servers_page(
        &records,
        state.catalog.as_ref(),
        &settings.favorite_maps,
        last_scan.as_deref(),
        message,
    )))
}
