use serde::Deserialize;

#[derive(Deserialize)]
pub struct ApplyPresetForm {
    pub preset: String,
}

#[derive(Deserialize)]
pub struct MapPickForm {
    pub map: String,
}

#[derive(Deserialize)]
pub struct MapSearchForm {
    #[serde(default)]
    pub query: String,
}

#[derive(Deserialize)]
pub struct SettingsForm {
    pub manage_url: String,
    /// Comma- or newline-separated map names, split in `services`.
    pub favorite_maps: String,
}
