use csman::page::{parse_manage_page, PageFetcher, PageScanner};

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{name}")).expect("fixture missing")
}

#[test]
fn parses_every_server_row() {
    let html = read_fixture("myservers.html");
    let records = parse_manage_page(&html).expect("parse failed");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].server_id, "730001");
    assert_eq!(records[0].name, "Dust2 24/7 #1");
    assert_eq!(records[1].server_id, "730002");
    assert_eq!(records[1].name, "Old Clan Server");
}

#[test]
fn repairs_scheme_less_server_links() {
    let html = read_fixture("myservers.html");
    let records = parse_manage_page(&html).expect("parse failed");

    assert_eq!(
        records[0].link.as_deref(),
        Some("https://play-cs.com/go/4Kx9Qw")
    );
    assert_eq!(
        records[1].link.as_deref(),
        Some("https://play-cs.com/go/Zr7mNp")
    );
}

#[test]
fn reduces_promo_cells_to_the_promoted_until_tail() {
    let html = read_fixture("myservers.html");
    let records = parse_manage_page(&html).expect("parse failed");

    assert_eq!(records[0].promoted_until.as_deref(), Some("2025-12-31 23:59"));
    assert_eq!(records[1].promoted_until, None);
}

#[test]
fn reads_map_selection_and_options() {
    let html = read_fixture("myservers.html");
    let records = parse_manage_page(&html).expect("parse failed");

    assert_eq!(records[0].map.as_deref(), Some("de_dust2"));
    assert_eq!(records[0].available_maps.len(), 6);
    assert!(records[0]
        .available_maps
        .contains(&"fy_pool_day".to_string()));
    assert_eq!(records[1].map.as_deref(), Some("de_inferno"));
}

#[test]
fn discovers_cvar_controls_scoped_to_each_server() {
    let html = read_fixture("myservers.html");
    let records = parse_manage_page(&html).expect("parse failed");

    let full = &records[0];
    assert!(full.is_public);
    assert_eq!(full.cvar_flags.len(), 11);
    assert_eq!(full.cvar_flags["mp_friendlyfire"], true);
    assert_eq!(full.cvar_flags["votekick"], false);
    assert_eq!(full.cvar_choices.len(), 11);
    assert_eq!(full.cvar_choices["mp_startmoney"].value, "800");
    assert_eq!(full.cvar_choices["mp_roundtime"].value, "2");

    let legacy = &records[1];
    assert!(!legacy.is_public);
    assert_eq!(legacy.cvar_flags.len(), 6);
    assert!(!legacy.cvar_flags.contains_key("votekick"));
    assert_eq!(legacy.cvar_choices.len(), 2);
    assert_eq!(legacy.cvar_choices["mp_startmoney"].value, "1000");
}

#[test]
fn pin_field_presence_is_per_server() {
    let html = read_fixture("myservers.html");
    let records = parse_manage_page(&html).expect("parse failed");

    assert_eq!(records[0].pin.as_deref(), Some(""));
    assert_eq!(records[1].pin, None);
}

#[test]
fn empty_page_yields_no_records() {
    let records = parse_manage_page("<html><body><p>no servers</p></body></html>")
        .expect("parse failed");
    assert!(records.is_empty());
}

struct MockFetcher;

#[async_trait::async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String, String> {
        match url {
            "https://play-cs.com/en/myservers" => Ok(read_fixture("myservers.html")),
            _ => Err("unknown url".to_string()),
        }
    }
}

#[tokio::test]
async fn scanner_fetches_and_parses() {
    let scanner = PageScanner::new(std::sync::Arc::new(MockFetcher));
    let records = scanner
        .scan("https://play-cs.com/en/myservers")
        .await
        .expect("scan failed");
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn scanner_propagates_fetch_errors() {
    let scanner = PageScanner::new(std::sync::Arc::new(MockFetcher));
    let result = scanner.scan("https://play-cs.com/en/elsewhere").await;
    assert_eq!(result, Err("unknown url".to_string()));
}
