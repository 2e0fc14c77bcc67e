use csman::fleet::{FieldChange, Fleet};
use csman::page::parse_manage_page;
use csman::presets::PresetCatalog;
use tokio::sync::broadcast;

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{name}")).expect("fixture missing")
}

async fn scanned_fleet() -> Fleet {
    let records = parse_manage_page(&read_fixture("myservers.html")).expect("parse failed");
    let fleet = Fleet::new();
    fleet.replace(records).await;
    fleet
}

fn drain(receiver: &mut broadcast::Receiver<FieldChange>) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    while let Ok(change) = receiver.try_recv() {
        changes.push(change);
    }
    changes
}

fn single_alphabet(pin: &str) -> bool {
    pin.chars().all(|ch| ch.is_ascii_digit()) || pin.chars().all(|ch| ch.is_ascii_lowercase())
}

#[tokio::test]
async fn mode_cycle_matches_expected_field_states() {
    let catalog = PresetCatalog::builtin();
    let fleet = scanned_fleet().await;
    let mut receiver = fleet.subscribe();

    // public: friendly fire off, PIN untouched.
    fleet.apply_preset(&catalog, "public").await;
    let records = fleet.snapshot().await;
    let full = &records[0];
    assert!(full.is_public);
    assert_eq!(full.cvar_flags["mp_friendlyfire"], false);
    assert_eq!(full.cvar_flags["votekick"], true);
    assert_eq!(full.cvar_choices["mp_startmoney"].value, "5000");
    assert_eq!(full.cvar_choices["mp_roundtime"].value, "1.75");
    assert_eq!(full.pin.as_deref(), Some(""));
    drain(&mut receiver);

    // 5vs5: friendly fire on, fresh 4-character PIN from one alphabet.
    fleet.apply_preset(&catalog, "5vs5").await;
    let records = fleet.snapshot().await;
    let full = &records[0];
    assert_eq!(full.cvar_flags["mp_friendlyfire"], true);
    assert_eq!(full.cvar_flags["votekick"], false);
    assert_eq!(full.cvar_choices["mp_startmoney"].value, "800");
    let pin = full.pin.clone().expect("pin field");
    assert_eq!(pin.len(), 4);
    assert!(single_alphabet(&pin));
    drain(&mut receiver);

    // deathmatch: PIN stays whatever 5vs5 issued.
    fleet.apply_preset(&catalog, "deathmatch").await;
    let records = fleet.snapshot().await;
    let full = &records[0];
    assert_eq!(full.cvar_flags["mp_friendlyfire"], true);
    assert_eq!(full.cvar_choices["mp_startmoney"].value, "1000");
    assert_eq!(full.pin.as_deref(), Some(pin.as_str()));
}

#[tokio::test]
async fn legacy_server_without_votekick_still_gets_the_rest() {
    let catalog = PresetCatalog::builtin();
    let fleet = scanned_fleet().await;

    fleet.apply_preset(&catalog, "public").await;

    let records = fleet.snapshot().await;
    let legacy = &records[1];
    assert!(legacy.is_public);
    assert!(!legacy.cvar_flags.contains_key("votekick"));
    assert_eq!(legacy.cvar_flags["mp_autoteambalance"], true);
    assert_eq!(legacy.cvar_flags["bonus_slot"], true);
    assert_eq!(legacy.cvar_choices["mp_startmoney"].value, "5000");
    // No PIN input on the old server; 5vs5 must not invent one.
    fleet.apply_preset(&catalog, "5vs5").await;
    let records = fleet.snapshot().await;
    assert_eq!(records[1].pin, None);
}

#[tokio::test]
async fn reapplying_a_preset_converges() {
    let catalog = PresetCatalog::builtin();
    let fleet = scanned_fleet().await;

    fleet.apply_preset(&catalog, "deathmatch").await;
    let first = fleet.snapshot().await;
    fleet.apply_preset(&catalog, "deathmatch").await;
    let second = fleet.snapshot().await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn switching_presets_leaves_no_checkbox_residue() {
    let catalog = PresetCatalog::builtin();
    let fleet_p_then_q = scanned_fleet().await;
    let fleet_q = scanned_fleet().await;

    fleet_p_then_q.apply_preset(&catalog, "deathmatch").await;
    fleet_p_then_q.apply_preset(&catalog, "5vs5").await;
    fleet_q.apply_preset(&catalog, "5vs5").await;

    let p_then_q = fleet_p_then_q.snapshot().await;
    let q_alone = fleet_q.snapshot().await;
    for (left, right) in p_then_q.iter().zip(q_alone.iter()) {
        assert_eq!(left.cvar_flags, right.cvar_flags);
        assert_eq!(left.is_public, right.is_public);
    }
}

#[tokio::test]
async fn every_field_under_a_row_is_notified() {
    let catalog = PresetCatalog::builtin();
    let fleet = scanned_fleet().await;
    let mut receiver = fleet.subscribe();

    fleet.apply_preset(&catalog, "public").await;
    let changes = drain(&mut receiver);

    // Full server: public + map + 11 checkboxes + 11 dropdowns + pin.
    let full: Vec<&FieldChange> = changes
        .iter()
        .filter(|change| change.server_id == "730001")
        .collect();
    assert_eq!(full.len(), 25);

    // Legacy server: public + map + 6 checkboxes + 2 dropdowns, no pin.
    let legacy: Vec<&FieldChange> = changes
        .iter()
        .filter(|change| change.server_id == "730002")
        .collect();
    assert_eq!(legacy.len(), 10);

    assert!(full
        .iter()
        .any(|change| change.field == "cvars.votekick" && change.value == "true"));
}

#[tokio::test]
async fn unknown_preset_changes_nothing_and_stays_quiet() {
    let catalog = PresetCatalog::builtin();
    let fleet = scanned_fleet().await;
    let before = fleet.snapshot().await;
    let mut receiver = fleet.subscribe();

    fleet.apply_preset(&catalog, "clanwar").await;

    assert_eq!(fleet.snapshot().await, before);
    assert!(receiver.try_recv().is_err());
}
