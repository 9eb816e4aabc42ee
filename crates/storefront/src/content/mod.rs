//! # Content Source
//!
//! Editorial content lives apart from the catalog and has its own lifecycle. A page asks the
//! content source for the document at [`content_path`] of its product id; the source answers
//! with a [`ContentDocument`] or a [`ContentError`].
//!
//! ## Structure
//!
//! - [`ContentSource`] - the query contract, injected into the page context
//! - [`FsContentSource`] - markdown files with optional `+++` TOML front matter
//! - [`MemoryContentSource`] - in-memory documents for the demo and tests
//!
//! A missing document is a normal outcome ([`ContentError::Missing`]); every other error
//! means the source could not answer and is handled by the page's failure policy.

pub mod fs;
pub mod memory;

pub use fs::FsContentSource;
pub use memory::MemoryContentSource;

use crate::model::{ContentDocument, ProductId};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invalid content path: {0:?}")]
    InvalidPath(String),

    #[error("no content document at {0}")]
    Missing(String),

    #[error("content source unavailable")]
    Unavailable(#[source] std::io::Error),

    #[error("malformed content document {path}: {reason}")]
    Malformed { path: String, reason: String },
}

impl ContentError {
    /// Whether the error only says the document does not exist.
    pub fn is_missing(&self) -> bool {
        matches!(self, ContentError::Missing(_))
    }
}

/// Asynchronous query contract of the content repository.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetches the document stored at `relative_path`.
    async fn fetch(&self, relative_path: &str) -> Result<ContentDocument, ContentError>;
}

/// The relative path of the content document for a product.
pub fn content_path(id: &ProductId) -> String {
    format!("{id}.md")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_path() {
        assert_eq!(content_path(&"sku-1".into()), "sku-1.md");
    }
}
