use crate::views::layout::{breadcrumb, render_layout};

pub fn render_dashboard_page(
    server_count: usize,
    preset_count: usize,
    settings_status: &str,
    last_scan: Option<&str>,
) -> String {
    let last_scan = last_scan.unwrap_or("never");
    let content = format!(
        r#"<h1 class="page-title">Dashboard</h1>
        <div class="card-row">
          <div class="card">
            <h2 class="card-label">Servers</h2>
            <p class="card-figure">{server_count}</p>
            <p class="card-hint">Last scan: {last_scan}</p>
          </div>
          <div class="card">
            <h2 class="card-label">Mode presets</h2>
            <p class="card-figure">{preset_count}</p>
            <p class="card-hint">Applied from the Servers page</p>
          </div>
          <div class="card">
            <h2 class="card-label">Settings</h2>
            <p class="card-figure">&nbsp;</p>
            <p class="card-hint">{settings_status}</p>
          </div>
        </div>"#,
        server_count = server_count,
        preset_count = preset_count,
        last_scan = html_escape::encode_text(last_scan),
        settings_status = html_escape::encode_text(settings_status),
    );

    render_layout(
        "csman Dashboard",
        "dashboard",
        vec![breadcrumb("Dashboard", None)],
        &content,
    )
}
