//! Minimal HTML pages rendered by the route guard layer.

use crate::guard::DeniedView;

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<main>\n{}\n</main>\n</body>\n</html>\n",
        escape(title),
        body
    )
}

/// Static denial page. The button is a plain link, nothing redirects.
pub fn denied_page(view: &DeniedView) -> String {
    page(
        view.title,
        &format!(
            "<h1>{}</h1>\n<p>{}</p>\n<a class=\"button\" href=\"{}\">{}</a>",
            escape(view.title),
            escape(view.message),
            escape(&view.fallback_route),
            escape(view.button_label)
        ),
    )
}

/// Shown when access could not be decided yet.
pub fn loading_page() -> String {
    page(
        "Checking access",
        "<p role=\"status\">Checking your access&hellip;</p>\n<p>This page will be available in a moment. Reload to try again.</p>",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denied_page_links_to_fallback() {
        let html = denied_page(&DeniedView::new("/"));

        assert!(html.contains("Access Denied"));
        assert!(html.contains("href=\"/\""));
        assert!(!html.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn test_denied_page_escapes_route() {
        let html = denied_page(&DeniedView::new("/\"><script>"));

        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_loading_page() {
        assert!(loading_page().contains("Checking your access"));
    }
}
