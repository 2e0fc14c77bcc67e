use crate::pin::generate_pin;
use crate::presets::PresetCatalog;
use rand::Rng;
use tracing::{info, warn};

/// The applier's only view of the live form fields. Every setter resolves
/// the field within the named server only and is a silent no-op when that
/// server lacks the control; legacy servers are missing some cvars and that
/// must never abort a bulk apply.
pub trait FieldAccess {
    fn set_public(&mut self, server_id: &str, public: bool);
    /// Every checkbox cvar the server offers, used to establish the
    /// all-false baseline before a preset's own values go in.
    fn checkbox_keys(&self, server_id: &str) -> Vec<String>;
    fn set_checkbox(&mut self, server_id: &str, cvar: &str, on: bool);
    fn set_dropdown(&mut self, server_id: &str, cvar: &str, value: &str);
    fn set_pin(&mut self, server_id: &str, pin: &str);
    /// Change notification for every field under the server's row, fired
    /// after the values are in place. Unchanged fields are included;
    /// listeners key off the notification, not the delta.
    fn notify_all(&mut self, server_id: &str);
}

/// Applies the named preset to every listed server.
///
/// Per server: public toggle, then all checkboxes cleared, then the
/// preset's checkboxes and dropdowns, then a fresh PIN when the preset
/// calls for one, then one notification sweep. Dropdowns the preset does
/// not mention keep their previous selection. An unknown preset name
/// applies nothing; the catalog is fixed, so that only happens on a
/// hand-crafted request.
pub fn apply_preset<F, R>(
    catalog: &PresetCatalog,
    fields: &mut F,
    rng: &mut R,
    preset_name: &str,
    server_ids: &[String],
) where
    F: FieldAccess + ?Sized,
    R: Rng,
{
    let preset = match catalog.get(preset_name) {
        Some(preset) => preset,
        None => {
            warn!("unknown preset {preset_name:?}, nothing applied");
            return;
        }
    };

    for server_id in server_ids {
        fields.set_public(server_id, preset.is_public);

        for cvar in fields.checkbox_keys(server_id) {
            fields.set_checkbox(server_id, &cvar, false);
        }
        for (cvar, on) in &preset.checkboxes {
            fields.set_checkbox(server_id, cvar, *on);
        }

        for (cvar, value) in &preset.dropdowns {
            fields.set_dropdown(server_id, cvar, value);
        }

        if preset.generates_pin {
            fields.set_pin(server_id, &generate_pin(rng));
        }

        fields.notify_all(server_id);
    }

    info!("applied preset {} to {} servers", preset_name, server_ids.len());
}
