use crate::views::layout::{breadcrumb, render_layout};

pub fn health_html() -> String {
    let content = r#"<h1 class="page-title">Health</h1>
        <p>csman console is up.</p>
        <p><a href="/">Back to dashboard</a></p>"#;

    render_layout("csman Health", "dashboard", vec![breadcrumb("Health", None)], content)
}
