pub fn render_notice(message: Option<&str>) -> String {
    message
        .map(|value| {
            format!(
                "<p class=\"notice\">{value}</p>",
                value = html_escape::encode_text(value)
            )
        })
        .unwrap_or_default()
}

pub fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
