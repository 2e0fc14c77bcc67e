use crate::views::helpers::render_notice;
use crate::views::layout::{breadcrumb, render_layout};
use csman::storage::AppSettings;

pub fn render_settings_page(settings: &AppSettings, message: Option<&str>) -> String {
    let notice = render_notice(message);
    let content = format!(
        r#"<h1 class="page-title">Settings</h1>
        {notice}
        <form method="post" action="/settings">
          <div class="field">
            <label for="manage_url">My-servers page URL</label>
            <input id="manage_url" name="manage_url" value="{manage_url}" placeholder="https://play-cs.com/en/myservers">
            <p class="field-hint">The page is scanned at startup and on "Rescan".</p>
          </div>
          <div class="field">
            <label for="favorite_maps">Favorite maps</label>
            <textarea id="favorite_maps" name="favorite_maps" rows="6">{favorite_maps}</textarea>
            <p class="field-hint">One per line (or comma separated). Shown as quick-pick buttons on servers that offer them.</p>
          </div>
          <button class="btn btn-primary" type="submit">Save</button>
        </form>"#,
        notice = notice,
        manage_url = html_escape::encode_text(&settings.manage_url),
        favorite_maps = html_escape::encode_text(&settings.favorite_maps.join("\n")),
    );

    render_layout(
        "csman Settings",
        "settings",
        vec![breadcrumb("Settings", None)],
        &content,
    )
}
