use super::{ContentFailurePolicy, PageContext, PageError};
use crate::content::{content_path, ContentError};
use crate::model::{ContentDocument, PageViewModel, Product, ProductId};
use async_trait::async_trait;
use page_framework::PageEntity;
use tracing::{debug, info, warn};

impl PageViewModel {
    /// Builds the page for `id` straight from the catalog and the content source.
    ///
    /// A missing content document is not an error: the page renders with product data only.
    pub async fn assemble(id: &ProductId, ctx: &PageContext) -> Result<Self, PageError> {
        let product = lookup(id, ctx)?;
        let content = match fetch_content(id, ctx).await {
            Ok(content) => content,
            Err(source) => match ctx.failure_policy {
                ContentFailurePolicy::Degrade => {
                    warn!(%id, error = %source, "Content fetch failed, rendering product data only");
                    None
                }
                ContentFailurePolicy::NotFound => {
                    return Err(PageError::ContentFetch {
                        id: id.clone(),
                        source,
                    })
                }
            },
        };

        Ok(Self::new(product, content))
    }

    /// Rebuilds a page that is already being served.
    ///
    /// Unlike [`assemble`](Self::assemble), a content outage is an error under every policy,
    /// so a stale page keeps its description instead of being replaced by product data only.
    pub async fn reassemble(id: &ProductId, ctx: &PageContext) -> Result<Self, PageError> {
        let product = lookup(id, ctx)?;
        let content = fetch_content(id, ctx)
            .await
            .map_err(|source| PageError::ContentFetch {
                id: id.clone(),
                source,
            })?;
        Ok(Self::new(product, content))
    }
}

fn lookup(id: &ProductId, ctx: &PageContext) -> Result<Product, PageError> {
    ctx.catalog
        .get(id)
        .cloned()
        .ok_or_else(|| PageError::CatalogMiss(id.clone()))
}

/// A missing document is `Ok(None)`; anything else that goes wrong is an error.
async fn fetch_content(
    id: &ProductId,
    ctx: &PageContext,
) -> Result<Option<ContentDocument>, ContentError> {
    match ctx.content.fetch(&content_path(id)).await {
        Ok(doc) => Ok(Some(doc)),
        Err(e) if e.is_missing() => {
            debug!(%id, "No content document");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[async_trait]
impl PageEntity for PageViewModel {
    type Id = ProductId;
    type Context = PageContext;
    type Error = PageError;

    fn known_ids(ctx: &PageContext) -> Vec<ProductId> {
        ctx.catalog.ids()
    }

    fn exists(ctx: &PageContext, id: &ProductId) -> bool {
        ctx.catalog.contains(id)
    }

    async fn materialize(id: &ProductId, ctx: &PageContext) -> Result<Option<Self>, PageError> {
        match Self::assemble(id, ctx).await {
            Ok(page) => Ok(Some(page)),
            Err(e @ (PageError::CatalogMiss(_) | PageError::ContentFetch { .. })) => {
                info!(%id, error = %e, "Page resolves to not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn refresh(id: &ProductId, ctx: &PageContext) -> Result<Option<Self>, PageError> {
        if ctx.failure_policy == ContentFailurePolicy::NotFound {
            return Self::materialize(id, ctx).await;
        }
        match Self::reassemble(id, ctx).await {
            Ok(page) => Ok(Some(page)),
            Err(e @ PageError::CatalogMiss(_)) => {
                info!(%id, error = %e, "Page resolves to not found");
                Ok(None)
            }
            Err(e) => {
                warn!(%id, error = %e, "Refresh failed, keeping the current page");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::content::{ContentError, ContentSource, MemoryContentSource};
    use crate::model::{ContentDocument, Product};
    use std::sync::Arc;

    struct Offline;

    #[async_trait]
    impl ContentSource for Offline {
        async fn fetch(&self, _: &str) -> Result<ContentDocument, ContentError> {
            Err(ContentError::Unavailable(std::io::Error::other("connection refused")))
        }
    }

    fn context(content: Arc<dyn ContentSource>, policy: ContentFailurePolicy) -> PageContext {
        let catalog = Catalog::from_products(vec![Product::new("sku-1", "Mug", 1200, "usd")]).unwrap();
        PageContext::new(Arc::new(catalog), content).with_failure_policy(policy)
    }

    #[tokio::test]
    async fn test_missing_document_renders_product_only() {
        let ctx = context(Arc::new(MemoryContentSource::new()), ContentFailurePolicy::NotFound);

        let page = PageViewModel::materialize(&"sku-1".into(), &ctx)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.product.name, "Mug");
        assert_eq!(page.product.price, 1200);
        assert!(page.content.is_none());
        assert!(page.description().is_empty());
    }

    #[tokio::test]
    async fn test_document_is_merged() {
        let content = MemoryContentSource::new()
            .with_document("sku-1.md", ContentDocument::new("sku-1", "Holds coffee."));
        let ctx = context(Arc::new(content), ContentFailurePolicy::Degrade);

        let page = PageViewModel::assemble(&"sku-1".into(), &ctx).await.unwrap();
        assert_eq!(page.description().markdown, "Holds coffee.");
    }

    #[tokio::test]
    async fn test_catalog_miss_is_not_found_regardless_of_content() {
        let content = MemoryContentSource::new()
            .with_document("sku-404.md", ContentDocument::new("sku-404", "orphan"));
        let ctx = context(Arc::new(content), ContentFailurePolicy::Degrade);

        let err = PageViewModel::assemble(&"sku-404".into(), &ctx).await.unwrap_err();
        assert!(matches!(err, PageError::CatalogMiss(_)));
        assert!(PageViewModel::materialize(&"sku-404".into(), &ctx)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_unavailable_content_degrades() {
        let ctx = context(Arc::new(Offline), ContentFailurePolicy::Degrade);

        let page = PageViewModel::materialize(&"sku-1".into(), &ctx).await.unwrap();
        assert!(page.is_some_and(|page| page.content.is_none()));
    }

    #[tokio::test]
    async fn test_refresh_during_outage_is_an_error() {
        let ctx = context(Arc::new(Offline), ContentFailurePolicy::Degrade);

        let err = PageViewModel::refresh(&"sku-1".into(), &ctx).await.unwrap_err();
        assert!(matches!(err, PageError::ContentFetch { .. }));
    }

    #[tokio::test]
    async fn test_refresh_without_document_is_product_only() {
        let ctx = context(Arc::new(MemoryContentSource::new()), ContentFailurePolicy::Degrade);

        let page = PageViewModel::refresh(&"sku-1".into(), &ctx).await.unwrap();
        assert!(page.is_some_and(|page| page.content.is_none()));
        assert!(PageViewModel::refresh(&"sku-404".into(), &ctx)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_unavailable_content_not_found_policy() {
        let ctx = context(Arc::new(Offline), ContentFailurePolicy::NotFound);

        let err = PageViewModel::assemble(&"sku-1".into(), &ctx).await.unwrap_err();
        assert!(matches!(err, PageError::ContentFetch { .. }));
        assert!(PageViewModel::materialize(&"sku-1".into(), &ctx)
            .await
            .unwrap()
            .is_none());
    }
}
