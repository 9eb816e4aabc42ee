use super::{ContentError, ContentSource};
use crate::model::ContentDocument;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Content documents held in memory, keyed by relative path.
///
/// Documents can be replaced while pages are being served, which makes revalidation
/// observable without touching the filesystem.
#[derive(Debug, Default)]
pub struct MemoryContentSource {
    documents: RwLock<HashMap<String, ContentDocument>>,
}

impl MemoryContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, relative_path: impl Into<String>, doc: ContentDocument) -> Self {
        self.documents
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(relative_path.into(), doc);
        self
    }

    /// Adds or replaces a document. Returns the document it replaced.
    pub fn insert(
        &self,
        relative_path: impl Into<String>,
        doc: ContentDocument,
    ) -> Result<Option<ContentDocument>, ContentError> {
        let mut documents = self.documents.write().map_err(|_| poisoned())?;
        Ok(documents.insert(relative_path.into(), doc))
    }

    pub fn remove(&self, relative_path: &str) -> Result<Option<ContentDocument>, ContentError> {
        let mut documents = self.documents.write().map_err(|_| poisoned())?;
        Ok(documents.remove(relative_path))
    }
}

fn poisoned() -> ContentError {
    ContentError::Unavailable(std::io::Error::other("content lock poisoned"))
}

#[async_trait]
impl ContentSource for MemoryContentSource {
    async fn fetch(&self, relative_path: &str) -> Result<ContentDocument, ContentError> {
        let documents = self.documents.read().map_err(|_| poisoned())?;
        documents
            .get(relative_path)
            .cloned()
            .ok_or_else(|| ContentError::Missing(relative_path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_and_replace() {
        let source = MemoryContentSource::new()
            .with_document("sku-1.md", ContentDocument::new("sku-1", "first"));

        let doc = source.fetch("sku-1.md").await.unwrap();
        assert_eq!(doc.description.markdown, "first");

        let replaced = source
            .insert("sku-1.md", ContentDocument::new("sku-1", "second"))
            .unwrap();
        assert_eq!(replaced.unwrap().description.markdown, "first");
        let doc = source.fetch("sku-1.md").await.unwrap();
        assert_eq!(doc.description.markdown, "second");

        assert!(source.remove("sku-1.md").unwrap().is_some());
        assert!(source.fetch("sku-1.md").await.unwrap_err().is_missing());
    }

    #[tokio::test]
    async fn test_poisoned_store_reports_writes() {
        let source = std::sync::Arc::new(MemoryContentSource::new());
        let holder = source.clone();
        let _ = std::thread::spawn(move || {
            let _guard = holder.documents.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        let err = source
            .insert("sku-1.md", ContentDocument::new("sku-1", "lost"))
            .unwrap_err();
        assert!(matches!(err, ContentError::Unavailable(_)));
        assert!(source.remove("sku-1.md").is_err());
        assert!(matches!(
            source.fetch("sku-1.md").await,
            Err(ContentError::Unavailable(_))
        ));
    }
}
