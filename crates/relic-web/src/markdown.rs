//! Markdown to HTML for report display.

use pulldown_cmark::{html, CowStr, Event, Options, Parser};

/// Render a report as HTML. Raw HTML in the source is shown as text.
pub fn to_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(CowStr::from(raw.into_string())),
        other => other,
    });

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_lists() {
        let html = to_html("## 1. Object Identification\n\n- **Category:** pottery\n");
        assert!(html.contains("<h2>1. Object Identification</h2>"));
        assert!(html.contains("<li><strong>Category:</strong> pottery</li>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = to_html("before\n\n<script>alert(1)</script>\n");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
