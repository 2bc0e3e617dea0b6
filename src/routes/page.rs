//! Index page rendering.
//!
//! The page is a single embedded template with one `{{data}}` placeholder,
//! filled in once at startup from `PAGE_DATA`.

use axum::extract::State;
use axum::response::Html;

use crate::state::AppState;

const INDEX_TEMPLATE: &str = include_str!("../../views/index.html");
const DATA_PLACEHOLDER: &str = "{{data}}";

/// Fill the index template. The value is HTML-escaped.
#[must_use]
pub fn render_index(data: &str) -> String {
    INDEX_TEMPLATE.replace(DATA_PLACEHOLDER, &escape_html(data))
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.index_html.to_string())
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_index_substitutes_placeholder() {
        let html = render_index("test data");
        assert!(html.contains("test data"));
        assert!(!html.contains(DATA_PLACEHOLDER));
        assert!(html.contains("hsl-indicator"));
        assert!(html.contains("/scripts/ui.js"));
    }

    #[test]
    fn render_index_escapes_markup() {
        let html = render_index("<b>\"hi\" & 'bye'</b>");
        assert!(html.contains("&lt;b&gt;&quot;hi&quot; &amp; &#39;bye&#39;&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }
}
