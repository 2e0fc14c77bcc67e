use crate::engine::{self, FieldAccess};
use crate::models::ServerRecord;
use crate::presets::PresetCatalog;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

/// Emitted once per field whenever a server's row is touched, so anything
/// watching the fleet can repaint without diffing.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FieldChange {
    pub server_id: String,
    pub field: String,
    pub value: String,
}

/// The live record set scanned off the management page, plus the change
/// feed its observers subscribe to. All writes go through the single
/// handler task holding the lock, so an apply never interleaves with
/// another.
#[derive(Clone)]
pub struct Fleet {
    inner: Arc<Mutex<FleetInner>>,
    sender: broadcast::Sender<FieldChange>,
}

struct FleetInner {
    records: Vec<ServerRecord>,
    scanned_at: Option<u64>,
    sender: broadcast::Sender<FieldChange>,
}

impl Fleet {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(256);
        let inner = FleetInner {
            records: Vec::new(),
            scanned_at: None,
            sender: sender.clone(),
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
            sender,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FieldChange> {
        self.sender.subscribe()
    }

    /// Installs a fresh scan result. Discovery is not a field mutation, so
    /// no change events are emitted here.
    pub async fn replace(&self, records: Vec<ServerRecord>) {
        let mut inner = self.inner.lock().await;
        inner.records = records;
        inner.scanned_at = Some(current_epoch_seconds());
    }

    pub async fn snapshot(&self) -> Vec<ServerRecord> {
        self.inner.lock().await.records.clone()
    }

    pub async fn scanned_at(&self) -> Option<u64> {
        self.inner.lock().await.scanned_at
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.records.is_empty()
    }

    /// Applies a preset to every server currently in the fleet. The lock is
    /// held for the whole sweep; a second trigger waits rather than
    /// interleaving.
    pub async fn apply_preset(&self, catalog: &PresetCatalog, preset_name: &str) {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        let server_ids: Vec<String> = inner
            .records
            .iter()
            .map(|record| record.server_id.clone())
            .collect();
        engine::apply_preset(
            catalog,
            inner,
            &mut rand::thread_rng(),
            preset_name,
            &server_ids,
        );
    }

    /// Switches a server's map selection, mirroring the quick-pick buttons.
    /// The choice must be one the server's own map list offers.
    pub async fn set_map(&self, server_id: &str, map: &str) -> Result<(), String> {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        let record = inner
            .records
            .iter_mut()
            .find(|record| record.server_id == server_id)
            .ok_or_else(|| format!("unknown server {server_id}"))?;
        if !record.available_maps.iter().any(|name| name == map) {
            return Err(format!("map {map} is not offered by server {server_id}"));
        }
        record.map = Some(map.to_string());
        let change = FieldChange {
            server_id: server_id.to_string(),
            field: "map".to_string(),
            value: map.to_string(),
        };
        let _ = inner.sender.send(change);
        Ok(())
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Self::new()
    }
}

impl FleetInner {
    fn record(&self, server_id: &str) -> Option<&ServerRecord> {
        self.records
            .iter()
            .find(|record| record.server_id == server_id)
    }

    fn record_mut(&mut self, server_id: &str) -> Option<&mut ServerRecord> {
        self.records
            .iter_mut()
            .find(|record| record.server_id == server_id)
    }
}

impl FieldAccess for FleetInner {
    fn set_public(&mut self, server_id: &str, public: bool) {
        if let Some(record) = self.record_mut(server_id) {
            record.is_public = public;
        }
    }

    fn checkbox_keys(&self, server_id: &str) -> Vec<String> {
        self.record(server_id)
            .map(|record| record.cvar_flags.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn set_checkbox(&mut self, server_id: &str, cvar: &str, on: bool) {
        if let Some(record) = self.record_mut(server_id) {
            if let Some(slot) = record.cvar_flags.get_mut(cvar) {
                *slot = on;
            }
        }
    }

    fn set_dropdown(&mut self, server_id: &str, cvar: &str, value: &str) {
        if let Some(record) = self.record_mut(server_id) {
            if let Some(choice) = record.cvar_choices.get_mut(cvar) {
                choice.value = value.to_string();
            }
        }
    }

    fn set_pin(&mut self, server_id: &str, pin: &str) {
        if let Some(record) = self.record_mut(server_id) {
            if let Some(slot) = record.pin.as_mut() {
                *slot = pin.to_string();
            }
        }
    }

    fn notify_all(&mut self, server_id: &str) {
        let record = match self.record(server_id) {
            Some(record) => record,
            None => return,
        };

        let mut changes = Vec::new();
        changes.push(("public".to_string(), record.is_public.to_string()));
        if let Some(map) = &record.map {
            changes.push(("map".to_string(), map.clone()));
        }
        for (cvar, on) in &record.cvar_flags {
            changes.push((format!("cvars.{cvar}"), on.to_string()));
        }
        for (cvar, choice) in &record.cvar_choices {
            changes.push((format!("cvars.{cvar}"), choice.value.clone()));
        }
        if let Some(pin) = &record.pin {
            changes.push(("pin".to_string(), pin.clone()));
        }

        for (field, value) in changes {
            let _ = self.sender.send(FieldChange {
                server_id: server_id.to_string(),
                field,
                value,
            });
        }
    }
}

fn current_epoch_seconds() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or(0)
}
