/// Everything a product page renders: the catalog record merged with its content document.
///
/// # Page Framework
/// This struct implements the [`PageEntity`](page_framework::PageEntity) trait, allowing it
/// to be materialized and cached by a [`PageActor`](page_framework::PageActor).
///
/// See [`impl PageEntity for PageViewModel`](#impl-PageEntity-for-PageViewModel) for how
/// content-source failures are mapped.
use crate::model::{ContentDocument, Product, RichText};

#[derive(Debug, Clone, PartialEq)]
pub struct PageViewModel {
    pub product: Product,
    /// Absent when the content source has no document (or failed) for this product.
    pub content: Option<ContentDocument>,
}

impl PageViewModel {
    pub fn new(product: Product, content: Option<ContentDocument>) -> Self {
        Self { product, content }
    }

    /// The description to render; empty when there is no content document.
    pub fn description(&self) -> RichText {
        self.content
            .as_ref()
            .map(|doc| doc.description.clone())
            .unwrap_or_default()
    }
}
