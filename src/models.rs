use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One manageable server as discovered on the management page. Records are
/// only ever mutated in place; the scan that found them is the sole source
/// of new ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerRecord {
    pub server_id: String,
    pub name: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub promoted_until: Option<String>,
    #[serde(default)]
    pub map: Option<String>,
    #[serde(default)]
    pub available_maps: Vec<String>,
    pub is_public: bool,
    /// Checkbox cvars the record actually offers. Absence of a key means
    /// the control does not exist for this server.
    #[serde(default)]
    pub cvar_flags: BTreeMap<String, bool>,
    #[serde(default)]
    pub cvar_choices: BTreeMap<String, CvarChoice>,
    /// `None` when the server has no PIN input at all.
    #[serde(default)]
    pub pin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvarChoice {
    pub value: String,
    #[serde(default)]
    pub options: Vec<String>,
}

impl ServerRecord {
    pub fn new(server_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            server_id: server_id.into(),
            name: name.into(),
            link: None,
            promoted_until: None,
            map: None,
            available_maps: Vec::new(),
            is_public: false,
            cvar_flags: BTreeMap::new(),
            cvar_choices: BTreeMap::new(),
            pin: None,
        }
    }
}
