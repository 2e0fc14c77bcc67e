use crate::routes::AppState;
use crate::services::{format_scan_timestamp, settings_status};
use crate::views::dashboard::render_dashboard_page;
use axum::{extract::State, http::StatusCode, response::Html};
use csman::storage::load_settings;

pub async fn dashboard_page(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let settings = load_settings(&state.settings_path)
        .await
        .map_err(|message| (StatusCode::INTERNAL_SERVER_ERROR, message))?;

    let server_count = state.fleet.len().await;
    let last_scan = format_scan_timestamp(state.fleet.scanned_at().await);

    Ok(Html(render_dashboard_page(
        server_count,
        state.catalog.len(),
        settings_status(&settings),
        last_scan.as_deref(),
    )))
}
