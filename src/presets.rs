/// A named target configuration for a server's form fields.
///
/// Checkbox entries are asserted on top of an all-false baseline: every
/// checkbox the server offers is cleared before the listed ones are set, so
/// applying a preset converges to the same state regardless of what was
/// configured before. Dropdowns are set-only; values a preset does not
/// mention keep their previous selection.
#[derive(Debug, Clone)]
pub struct Preset {
    pub name: String,
    pub is_public: bool,
    pub checkboxes: Vec<(String, bool)>,
    /// Values are strings so they match the control's value domain exactly
    /// ("1.75" stays "1.75", never "1.8" or "2").
    pub dropdowns: Vec<(String, String)>,
    pub generates_pin: bool,
}

/// Fixed, ordered collection of presets. Built once at startup and read-only
/// afterwards; adding a preset is a source change, not a runtime operation.
#[derive(Debug, Clone)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    pub fn new(presets: Vec<Preset>) -> Self {
        Self { presets }
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|preset| preset.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// The production catalog: `public`, `5vs5` and `deathmatch`, matching
    /// the game modes offered on play-cs.com. `5vs5` is the only preset
    /// that issues a fresh PIN, since competitive lobbies are meant to be
    /// joined by invitation.
    pub fn builtin() -> Self {
        let shared_limits = [
            ("csem_sank_cd", "300"),
            ("limit_hegren", "1"),
            ("limit_sgren", "1"),
            ("limit_flash", "2"),
        ];

        let public = Preset {
            name: "public".to_string(),
            is_public: true,
            checkboxes: flags(&[
                ("mp_friendlyfire", false),
                ("mp_autoteambalance", true),
                ("mp_afkbomb", true),
                ("afk_kick", true),
                ("statistics", true),
                ("votekick", true),
                ("bonus_slot", true),
                ("tfb", true),
                ("statsx", true),
                ("dib3", true),
                ("rwd_grenadedrop", true),
            ]),
            dropdowns: choices(
                &[
                    ("minimal_skill", "0"),
                    ("ping_limit", "1000"),
                    ("mp_roundtime", "1.75"),
                    ("mp_buytime", "0.25"),
                    ("mp_c4timer", "35"),
                    ("mp_freezetime", "1"),
                    ("mp_startmoney", "5000"),
                ],
                &shared_limits,
            ),
            generates_pin: false,
        };

        let five_on_five = Preset {
            name: "5vs5".to_string(),
            is_public: true,
            checkboxes: flags(&[
                ("mp_friendlyfire", true),
                ("mp_autoteambalance", false),
                ("mp_afkbomb", true),
                ("afk_kick", true),
                ("statistics", true),
                ("votekick", false),
                ("bonus_slot", false),
            ]),
            dropdowns: choices(
                &[
                    ("minimal_skill", "0"),
                    ("ping_limit", "1000"),
                    ("mp_roundtime", "1.75"),
                    ("mp_buytime", "0.25"),
                    ("mp_c4timer", "35"),
                    ("mp_freezetime", "1"),
                    ("mp_startmoney", "800"),
                ],
                &shared_limits,
            ),
            generates_pin: true,
        };

        let deathmatch = Preset {
            name: "deathmatch".to_string(),
            is_public: true,
            checkboxes: flags(&[
                ("mp_friendlyfire", true),
                ("mp_autoteambalance", true),
                ("mp_afkbomb", true),
                ("afk_kick", true),
                ("statistics", true),
                ("votekick", true),
                ("bonus_slot", true),
                ("tfb", true),
                ("statsx", true),
                ("dib3", true),
                ("rwd_grenadedrop", true),
            ]),
            dropdowns: choices(
                &[
                    ("minimal_skill", "0"),
                    ("ping_limit", "1000"),
                    ("mp_roundtime", "2.5"),
                    ("mp_buytime", "0.5"),
                    ("mp_c4timer", "35"),
                    ("mp_freezetime", "5"),
                    ("mp_startmoney", "1000"),
                ],
                &shared_limits,
            ),
            generates_pin: false,
        };

        Self::new(vec![public, five_on_five, deathmatch])
    }
}

fn flags(entries: &[(&str, bool)]) -> Vec<(String, bool)> {
    entries
        .iter()
        .map(|(cvar, on)| (cvar.to_string(), *on))
        .collect()
}

fn choices(entries: &[(&str, &str)], shared: &[(&str, &str)]) -> Vec<(String, String)> {
    entries
        .iter()
        .chain(shared.iter())
        .map(|(cvar, value)| (cvar.to_string(), value.to_string()))
        .collect()
}
