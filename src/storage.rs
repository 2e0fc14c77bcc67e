use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// The play-cs.com "My servers" page the console scans. Empty until the
    /// operator fills it in; the fleet stays empty without it.
    #[serde(default)]
    pub manage_url: String,
    #[serde(default = "default_favorite_maps")]
    pub favorite_maps: Vec<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            manage_url: String::new(),
            favorite_maps: default_favorite_maps(),
        }
    }
}

fn default_favorite_maps() -> Vec<String> {
    ["de_mirage", "de_nuke", "de_tuscan", "de_dust2", "de_inferno", "de_train"]
        .iter()
        .map(|map| map.to_string())
        .collect()
}

impl AppSettings {
    pub fn validate(&self) -> Result<(), String> {
        let url = self.manage_url.trim();
        if !url.is_empty() && !url.starts_with("http://") && !url.starts_with("https://") {
            return Err("manage_url must be an http(s) URL".to_string());
        }
        if self.favorite_maps.iter().any(|map| map.trim().is_empty()) {
            return Err("favorite_maps must not contain empty entries".to_string());
        }
        Ok(())
    }
}

pub fn base_dir() -> PathBuf {
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata).join("csman");
    }
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("csman");
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config").join("csman");
    }
    PathBuf::from("csman-data")
}

pub fn settings_path() -> PathBuf {
    base_dir().join("settings.json")
}

pub async fn load_settings(path: &Path) -> Result<AppSettings, String> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => serde_json::from_str(&contents)
            .map_err(|err| format!("failed to parse settings: {err}")),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(AppSettings::default()),
        Err(err) => Err(format!("failed to read settings: {err}")),
    }
}

pub async fn save_settings(path: &Path, settings: &AppSettings) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|err| format!("failed to create settings dir: {err}"))?;
    }

    let data = serde_json::to_string_pretty(settings)
        .map_err(|err| format!("failed to serialize settings: {err}"))?;

    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, data)
        .await
        .map_err(|err| format!("failed to write temp settings: {err}"))?;

    if tokio::fs::metadata(path).await.is_ok() {
        tokio::fs::remove_file(path)
            .await
            .map_err(|err| format!("failed to remove old settings: {err}"))?;
    }

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|err| format!("failed to move settings into place: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn base_dir_prefers_appdata() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        let original = std::env::var("APPDATA").ok();
        std::env::set_var("APPDATA", "C:\\Users\\test\\AppData\\Roaming");

        let base = base_dir();
        assert!(base.to_string_lossy().contains("AppData"));
        assert!(base.to_string_lossy().ends_with("csman"));

        if let Some(value) = original {
            std::env::set_var("APPDATA", value);
        } else {
            std::env::remove_var("APPDATA");
        }
    }

    #[test]
    fn default_settings_carry_the_favorite_rotation() {
        let settings = AppSettings::default();
        assert!(settings.manage_url.is_empty());
        assert_eq!(settings.favorite_maps.len(), 6);
        assert!(settings.favorite_maps.contains(&"de_dust2".to_string()));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_http_urls() {
        let settings = AppSettings {
            manage_url: "ftp://play-cs.com/en/myservers".to_string(),
            ..AppSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
