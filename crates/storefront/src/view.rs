//! HTML rendering of product pages.
//!
//! Renders the three outcomes of a page request:
//! - `render_page()` - a ready page: image, name, price and description
//! - `render_fallback()` - the placeholder served while a page is first built
//! - `render_not_found()` - the body of a 404

use crate::model::PageViewModel;
use std::borrow::Cow;
use std::fmt::Write;

pub const SITE_NAME: &str = "Storefront";

// =============================================================================
// HTML Escaping
// =============================================================================

const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML special characters in text content and attribute values.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

// =============================================================================
// Pages
// =============================================================================

/// Document title of a ready page.
pub fn page_title(page: &PageViewModel) -> String {
    format!("{} | {SITE_NAME}", page.product.name)
}

pub fn render_page(page: &PageViewModel) -> String {
    let product = &page.product;
    let name = escape(&product.name);
    let mut html = String::new();

    html.push_str("<article class=\"product\">\n");
    if let Some(image) = &product.image {
        let _ = writeln!(
            html,
            "  <img src=\"{}\" alt=\"{name}\">",
            escape(image)
        );
    }
    let _ = writeln!(html, "  <h2>{name}</h2>");
    html.push_str("  <p>Availability: <span>In stock</span></p>\n");
    let _ = writeln!(
        html,
        "  <p class=\"price\">{}</p>",
        escape(&product.display_price())
    );

    let description = page.description();
    if !description.is_empty() {
        html.push_str("  <section class=\"description\">\n");
        html.push_str(&description.to_html());
        html.push_str("  </section>\n");
    }
    html.push_str("</article>\n");
    html
}

pub fn render_fallback() -> String {
    "<p class=\"loading\">Loading...</p>\n".to_string()
}

pub fn render_not_found(path: &str) -> String {
    format!("<p>No page at {}</p>\n", escape(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentDocument, Product};

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"Mug\" & 'Cup'</b>"), "&lt;b&gt;&quot;Mug&quot; &amp; &#39;Cup&#39;&lt;/b&gt;");
        assert!(matches!(escape("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_render_page_without_content() {
        let page = PageViewModel::new(Product::new("sku-1", "Mug <XL>", 1200, "usd"), None);
        let html = render_page(&page);

        assert!(html.contains("<h2>Mug &lt;XL&gt;</h2>"));
        assert!(html.contains("$12.00"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("description"));
        assert_eq!(page_title(&page), "Mug <XL> | Storefront");
    }

    #[test]
    fn test_render_page_with_image_and_description() {
        let page = PageViewModel::new(
            Product::new("sku-1", "Mug", 1200, "usd").with_image("/img/mug.png"),
            Some(ContentDocument::new("sku-1", "Holds **coffee**.")),
        );
        let html = render_page(&page);

        assert!(html.contains("<img src=\"/img/mug.png\" alt=\"Mug\">"));
        assert!(html.contains("<strong>coffee</strong>"));
    }
}
