use crate::forms::SettingsForm;
use crate::routes::AppState;
use crate::services::parse_favorite_maps;
use crate::views::settings::render_settings_page;
use axum::{extract::State, http::StatusCode, response::Html, Form};
use csman::storage::{load_settings, save_settings, AppSettings};
use tracing::info;

pub async fn settings_page(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let settings = load_settings(&state.settings_path)
        .await
        .map_err(|message| (StatusCode::INTERNAL_SERVER_ERROR, message))?;
    Ok(Html(render_settings_page(&settings, None)))
}

pub async fn settings_save(
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    let settings = AppSettings {
        manage_url: form.manage_url.trim().to_string(),
        favorite_maps: parse_favorite_maps(&form.favorite_maps),
    };

    if let Err(message) = settings.validate() {
        return Ok(Html(render_settings_page(&settings, Some(&message))));
    }

    save_settings(&state.settings_path, &settings)
        .await
        .map_err(|message| (StatusCode::INTERNAL_SERVER_ERROR, message))?;
    info!("settings saved");

    Ok(Html(render_settings_page(&settings, Some("Settings saved"))))
}
