//! Editorial content attached to a product page.

use pulldown_cmark::{html, Options, Parser};
use serde::{Deserialize, Serialize};

/// Markdown source of a rich-text field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText {
    pub markdown: String,
}

impl RichText {
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.markdown.trim().is_empty()
    }

    /// Renders the markdown to HTML. Raw HTML in the source is passed through.
    pub fn to_html(&self) -> String {
        let parser = Parser::new_ext(&self.markdown, Options::ENABLE_STRIKETHROUGH);
        let mut out = String::with_capacity(self.markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

/// A document from the content repository, keyed by the product's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDocument {
    pub unique_id: String,
    #[serde(default)]
    pub description: RichText,
}

impl ContentDocument {
    pub fn new(unique_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            unique_id: unique_id.into(),
            description: RichText::new(description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rich_text_renders_markdown() {
        let text = RichText::new("# Mug\n\nHolds **coffee**.");
        let html = text.to_html();
        assert!(html.contains("<h1>Mug</h1>"));
        assert!(html.contains("<strong>coffee</strong>"));
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(RichText::new("  \n").is_empty());
        assert!(RichText::default().is_empty());
        assert!(!RichText::new("x").is_empty());
    }
}
