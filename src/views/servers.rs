use crate::services::{capitalize, favorites_on_record};
use crate::views::helpers::{on_off, render_notice};
use crate::views::layout::{breadcrumb, render_layout};
use csman::models::ServerRecord;
use csman::presets::PresetCatalog;

pub fn render_servers_page(
    records: &[ServerRecord],
    catalog: &PresetCatalog,
    favorite_maps: &[String],
    last_scan: Option<&str>,
    message: Option<&str>,
) -> String {
    let notice = render_notice(message);
    let presets = render_preset_bar(catalog);
    let scan_label = html_escape::encode_text(last_scan.unwrap_or("never")).to_string();

    let rows = if records.is_empty() {
        r#"<p class="muted">No servers scanned yet. Set the my-servers URL under Settings, then hit Rescan.</p>"#.to_string()
    } else {
        records.iter().map(|record| render_server_card(record, favorite_maps)).collect()
    };

    let content = format!(
        r#"<h1 class="page-title">Servers</h1>
        {notice}
        {presets}
        <form method="post" action="/servers/refresh" class="inline-form">
          <button class="btn btn-secondary" type="submit">Rescan</button>
          <span class="muted">Last scan: {scan_label}</span>
        </form>
        {rows}
        <h2 class="section-title">Field changes</h2>
        <pre id="change-feed" class="change-feed"></pre>
        <script>
          const feed = document.getElementById('change-feed');
          const source = new EventSource('/api/fleet/events');
          source.onmessage = (event) => {{
            const change = JSON.parse(event.data);
            feed.textContent += change.server_id + ' ' + change.field + ' = ' + change.value + '\n';
            feed.scrollTop = feed.scrollHeight;
          }};
        </script>"#,
        notice = notice,
        presets = presets,
        scan_label = scan_label,
        rows = rows,
    );

    render_layout(
        "csman Servers",
        "servers",
        vec![breadcrumb("Servers", None)],
        &content,
    )
}

fn render_preset_bar(catalog: &PresetCatalog) -> String {
    let buttons: String = catalog
        .iter()
        .map(|preset| {
            format!(
                r#"<form method="post" action="/presets/apply" class="inline-form">
                  <input type="hidden" name="preset" value="{name}">
                  <button class="btn btn-primary" type="submit">{label}</button>
                </form>"#,
                name = html_escape::encode_text(&preset.name),
                label = html_escape::encode_text(&capitalize(&preset.name)),
            )
        })
        .collect();

    format!(
        r#"<div class="preset-bar">
          <h2 class="section-title">Mode presets</h2>
          {buttons}
          <p class="muted">Applies to every scanned server. 5vs5 also issues a fresh PIN.</p>
        </div>"#,
        buttons = buttons,
    )
}

fn render_server_card(record: &ServerRecord, favorite_maps: &[String]) -> String {
    let title = match &record.link {
        Some(link) => format!(
            r#"<a href="{link}">{name}</a>"#,
            link = html_escape::encode_double_quoted_attribute(link),
            name = html_escape::encode_text(&record.name),
        ),
        None => html_escape::encode_text(&record.name).to_string(),
    };

    let promoted = record
        .promoted_until
        .as_deref()
        .map(|until| {
            format!(
                r#"<span class="tag">Promoted until {until}</span>"#,
                until = html_escape::encode_text(until)
            )
        })
        .unwrap_or_default();

    let pin = record
        .pin
        .as_deref()
        .map(|pin| {
            let shown = if pin.is_empty() { "not set" } else { pin };
            format!(
                r#"<span class="tag">PIN: {pin}</span>"#,
                pin = html_escape::encode_text(shown)
            )
        })
        .unwrap_or_default();

    let flags: String = record
        .cvar_flags
        .iter()
        .map(|(cvar, on)| {
            format!(
                r#"<span class="chip chip-{state}">{cvar} {state}</span>"#,
                cvar = html_escape::encode_text(cvar),
                state = on_off(*on),
            )
        })
        .collect();

    let choices: String = record
        .cvar_choices
        .iter()
        .map(|(cvar, choice)| {
            format!(
                r#"<span class="chip">{cvar} = {value}</span>"#,
                cvar = html_escape::encode_text(cvar),
                value = html_escape::encode_text(&choice.value),
            )
        })
        .collect();

    format!(
        r#"<div class="card server-card">
          <div class="server-head">
            <h2 class="server-name">{title}</h2>
            <span class="tag">public: {public}</span>
            {promoted}
            {pin}
          </div>
          {map_section}
          <div class="chip-row">{flags}</div>
          <div class="chip-row">{choices}</div>
        </div>"#,
        title = title,
        public = on_off(record.is_public),
        promoted = promoted,
        pin = pin,
        map_section = render_map_section(record, favorite_maps),
        flags = flags,
        choices = choices,
    )
}

fn render_map_section(record: &ServerRecord, favorite_maps: &[String]) -> String {
    let current = record.map.as_deref().unwrap_or("unknown");
    let favorites: String = favorites_on_record(favorite_maps, &record.available_maps)
        .into_iter()
        .map(|map| {
            format!(
                r#"<form method="post" action="/servers/{server_id}/map" class="inline-form">
                  <input type="hidden" name="map" value="{map}">
                  <button class="btn btn-small" type="submit">{map_label}</button>
                </form>"#,
                server_id = html_escape::encode_double_quoted_attribute(&record.server_id),
                map = html_escape::encode_double_quoted_attribute(map),
                map_label = html_escape::encode_text(map),
            )
        })
        .collect();

    format!(
        r#"<div class="map-section">
          <span class="tag">map: {current}</span>
          {favorites}
          <form method="post" action="/servers/{server_id}/map/search" class="inline-form">
            <input name="query" placeholder="Type to search map..." value="">
            <button class="btn btn-small" type="submit">Pick first match</button>
          </form>
        </div>"#,
        current = html_escape::encode_text(current),
        favorites = favorites,
        server_id = html_escape::encode_double_quoted_attribute(&record.server_id),
    )
}
