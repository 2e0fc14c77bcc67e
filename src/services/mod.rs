use csman::storage::AppSettings;

/// Splits the settings textarea into map names. Accepts commas and
/// newlines, drops blanks, keeps first occurrence order.
pub fn parse_favorite_maps(input: &str) -> Vec<String> {
    let mut maps = Vec::new();
    for value in input.lines().flat_map(|line| line.split(',')) {
        let value = value.trim();
        if !value.is_empty() && !maps.iter().any(|existing| existing == value) {
            maps.push(value.to_string());
        }
    }
    maps
}

/// Favorite maps a given server actually offers, in favorites order.
pub fn favorites_on_record<'a>(favorites: &'a [String], available: &[String]) -> Vec<&'a str> {
    favorites
        .iter()
        .filter(|favorite| available.iter().any(|map| map == *favorite))
        .map(|favorite| favorite.as_str())
        .collect()
}

/// First map whose name contains the query, ignoring case. An empty query
/// matches the first map, same as an empty filter matching everything.
pub fn first_map_match<'a>(available: &'a [String], query: &str) -> Option<&'a str> {
    let query = query.trim().to_lowercase();
    available
        .iter()
        .find(|map| map.to_lowercase().contains(&query))
        .map(|map| map.as_str())
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub fn settings_status(settings: &AppSettings) -> &'static str {
    if settings.manage_url.trim().is_empty() {
        "manage URL not set"
    } else {
        "ok"
    }
}

pub fn format_scan_timestamp(value: Option<u64>) -> Option<String> {
    let seconds = i64::try_from(value?).ok()?;
    let timestamp = time::OffsetDateTime::from_unix_timestamp(seconds).ok()?;
    let format =
        time::format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]").ok()?;
    timestamp.format(&format).ok()
}
