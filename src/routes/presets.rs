use crate::forms::ApplyPresetForm;
use crate::routes::AppState;
use axum::{extract::State, http::StatusCode, response::Html, Form};

/// One trigger per catalog entry on the Servers page lands here. The
/// preset goes to every server currently in the fleet; an unknown name
/// applies nothing and only shows up in the notice.
pub async fn apply_preset_action(
    State(state): State<AppState>,
    Form(form): Form<ApplyPresetForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    let message = if state.catalog.get(&form.preset).is_some() {
        state
            .fleet
            .apply_preset(state.catalog.as_ref(), &form.preset)
            .await;
        format!("preset {} applied to all servers", form.preset)
    } else {
        format!("unknown preset {:?}, nothing applied", form.preset)
    };

    crate::routes::servers::render_page(&state, Some(&message)).await
}
