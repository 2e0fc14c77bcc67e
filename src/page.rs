use crate::models::{CvarChoice, ServerRecord};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use std::sync::Arc;

#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_html(&self, url: &str) -> Result<String, String>;
}

/// Fetches the management page and turns its form markup into records.
/// Scanning is the only way servers enter the fleet; everything afterwards
/// mutates them in place.
#[derive(Clone)]
pub struct PageScanner {
    fetcher: Arc<dyn PageFetcher>,
}

impl PageScanner {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn scan(&self, url: &str) -> Result<Vec<ServerRecord>, String> {
        let html = self.fetcher.fetch_html(url).await?;
        parse_manage_page(&html)
    }
}

pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl PageFetcher for ReqwestFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| format!("request failed: {err}"))?;

        if !response.status().is_success() {
            return Err(format!("request failed: status {}", response.status()));
        }

        response
            .text()
            .await
            .map_err(|err| format!("failed to read response: {err}"))
    }
}

/// Scans the "My servers" page. Each `tr.myserver[data-server]` row is one
/// server; its controls carry the server id inside their `id`/`name`
/// attributes (`server[ID][public]`, `server[ID][cvars][KEY]`, `pin_ID`),
/// which is what keeps the lookup scoped to a single record.
pub fn parse_manage_page(html: &str) -> Result<Vec<ServerRecord>, String> {
    let document = Html::parse_document(html);
    let rows = Selector::parse("tr.myserver[data-server]")
        .map_err(|_| "invalid server row selector".to_string())?;

    let mut records = Vec::new();
    for row in document.select(&rows) {
        let server_id = match row.value().attr("data-server") {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => continue,
        };
        records.push(parse_server_record(&document, row, &server_id));
    }
    Ok(records)
}

fn parse_server_record(document: &Html, row: ElementRef<'_>, server_id: &str) -> ServerRecord {
    let mut record = ServerRecord::new(server_id, format!("server {server_id}"));

    if let Some(link) = select_in(row, "td a") {
        let text = link.text().collect::<String>();
        let text = text.trim();
        if !text.is_empty() {
            record.name = text.to_string();
        }
        if let Some(href) = link.value().attr("href") {
            record.link = Some(repair_link(href));
        }
    }

    record.promoted_until = parse_promoted_until(row);

    if let Some((map, available_maps)) = parse_map_select(document, server_id) {
        record.map = map;
        record.available_maps = available_maps;
    }

    record.is_public =
        checkbox_checked(document, &format!(r#"input[id="server[{server_id}][public]"]"#))
            .unwrap_or(false);
    record.cvar_flags = parse_cvar_flags(document, server_id);
    record.cvar_choices = parse_cvar_choices(document, server_id);
    record.pin = parse_pin_field(document, server_id);

    record
}

fn select_in<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    scope.select(&selector).next()
}

fn checkbox_checked(document: &Html, css: &str) -> Option<bool> {
    let selector = Selector::parse(css).ok()?;
    let input = document.select(&selector).next()?;
    Some(input.value().attr("checked").is_some())
}

/// The page emits scheme-less hrefs for server invite links; give them back
/// their `https`.
fn repair_link(href: &str) -> String {
    if let Some(rest) = href.strip_prefix("://") {
        format!("https://{rest}")
    } else {
        href.to_string()
    }
}

fn parse_promoted_until(row: ElementRef<'_>) -> Option<String> {
    let cells = Selector::parse(r#"td[colspan="2"]"#).ok()?;
    for cell in row.select(&cells) {
        let text = cell.text().collect::<String>();
        if let Some(value) = promoted_until_from_text(&text) {
            return Some(value);
        }
    }
    None
}

fn promoted_until_from_text(text: &str) -> Option<String> {
    let re = Regex::new(r"(?s)Promoted until:\s*(.+)").ok()?;
    let caps = re.captures(text)?;
    let value = caps
        .get(1)?
        .as_str()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_map_select(document: &Html, server_id: &str) -> Option<(Option<String>, Vec<String>)> {
    let css = format!(r#"select[name="server[{server_id}][map]"]"#);
    let selector = Selector::parse(&css).ok()?;
    let select = document.select(&selector).next()?;
    Some(read_select(select))
}

fn parse_cvar_flags(document: &Html, server_id: &str) -> BTreeMap<String, bool> {
    let mut flags = BTreeMap::new();
    let css = format!(r#"input[type="checkbox"][id^="server[{server_id}][cvars]"]"#);
    let selector = match Selector::parse(&css) {
        Ok(selector) => selector,
        Err(_) => return flags,
    };

    for input in document.select(&selector) {
        let id = match input.value().attr("id") {
            Some(id) => id,
            None => continue,
        };
        if let Some(cvar) = cvar_key(id) {
            flags.insert(cvar, input.value().attr("checked").is_some());
        }
    }
    flags
}

fn parse_cvar_choices(document: &Html, server_id: &str) -> BTreeMap<String, CvarChoice> {
    let mut dropdowns = BTreeMap::new();
    let css = format!(r#"select[name^="server[{server_id}][cvars]"]"#);
    let selector = match Selector::parse(&css) {
        Ok(selector) => selector,
        Err(_) => return dropdowns,
    };

    for select in document.select(&selector) {
        let name = match select.value().attr("name") {
            Some(name) => name,
            None => continue,
        };
        if let Some(cvar) = cvar_key(name) {
            let (value, options) = read_select(select);
            dropdowns.insert(
                cvar,
                CvarChoice {
                    value: value.unwrap_or_default(),
                    options,
                },
            );
        }
    }
    dropdowns
}

fn parse_pin_field(document: &Html, server_id: &str) -> Option<String> {
    let css = format!(r#"input[id="pin_{server_id}"]"#);
    let selector = Selector::parse(&css).ok()?;
    let input = document.select(&selector).next()?;
    Some(input.value().attr("value").unwrap_or_default().to_string())
}

fn cvar_key(attr: &str) -> Option<String> {
    let re = Regex::new(r"\[cvars\]\[([^\]]+)\]").ok()?;
    re.captures(attr)
        .and_then(|caps| caps.get(1).map(|m| m.as_str().to_string()))
}

fn read_select(select: ElementRef<'_>) -> (Option<String>, Vec<String>) {
    let option_selector = match Selector::parse("option") {
        Ok(selector) => selector,
        Err(_) => return (None, Vec::new()),
    };

    let mut options = Vec::new();
    let mut selected = None;
    for option in select.select(&option_selector) {
        let value = match option.value().attr("value") {
            Some(value) => value.to_string(),
            None => option.text().collect::<String>().trim().to_string(),
        };
        if option.value().attr("selected").is_some() {
            selected = Some(value.clone());
        }
        options.push(value);
    }

    let selected = selected.or_else(|| options.first().cloned());
    (selected, options)
}
