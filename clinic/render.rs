/// Page renderer for the clinic.
///
/// A single HTML template (`clinic/assets/clinic.html`) is embedded at
/// compile time; `render_page` fills the `{{TOKEN}}` placeholders and blanks
/// any the caller left unfilled.

const TEMPLATE: &str = include_str!("assets/clinic.html");

/// Renders the full page with `content` as the main card body.
pub fn render_page(content: &str, flash: Option<&str>) -> String {
    let flash_html = match flash {
        Some(msg) => format!(r#"<div class="error-box">{}</div>"#, msg),
        None      => String::new(),
    };
    let html = TEMPLATE
        .replace("{{FLASH}}", &flash_html)
        .replace("{{CONTENT}}", content);
    blank_remaining(html)
}

/// Replaces any leftover `{{TOKEN}}` with an empty string.
fn blank_remaining(mut html: String) -> String {
    while let Some(start) = html.find("{{") {
        match html[start..].find("}}") {
            Some(end) => html.replace_range(start..start + end + 2, ""),
            None => break,
        }
    }
    html
}
