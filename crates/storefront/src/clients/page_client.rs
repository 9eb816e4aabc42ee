//! # Page Service
//!
//! Provides a high‑level API for interacting with the product page actor.
//! It wraps a `PageClient<PageViewModel>` and exposes domain‑specific methods.
use crate::model::{PageViewModel, ProductId};
use crate::page::PageError;
use async_trait::async_trait;
use page_framework::{FrameworkError, PageClient, PageClientExt, RenderState};
use tracing::{debug, instrument};

/// Client for interacting with the page actor.
#[derive(Clone)]
pub struct PageService {
    inner: PageClient<PageViewModel>,
}

impl PageService {
    pub fn new(inner: PageClient<PageViewModel>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl PageClientExt<PageViewModel> for PageService {
    type Error = PageError;

    fn inner(&self) -> &PageClient<PageViewModel> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        PageError::ActorCommunicationError(e.to_string())
    }
}

impl PageService {
    /// The page for `id`, a fallback if it has not been built yet, or `NotFound`.
    pub async fn page(&self, id: ProductId) -> Result<RenderState<PageViewModel>, PageError> {
        self.resolve(id).await
    }

    /// Like [`page`](Self::page) but waits for the first build instead of taking a fallback.
    #[instrument(skip(self))]
    pub async fn page_blocking(
        &self,
        id: ProductId,
    ) -> Result<RenderState<PageViewModel>, PageError> {
        debug!("Sending request");
        self.inner
            .resolve_blocking(id)
            .await
            .map_err(Self::map_error)
    }

    /// Starts an on-demand rebuild of `id`.
    ///
    /// Returns the ticket of the new build, or `None` if the product is not in the catalog.
    #[instrument(skip(self))]
    pub async fn revalidate(&self, id: ProductId) -> Result<Option<u64>, PageError> {
        debug!("Revalidating page {}", id);
        self.inner.revalidate(id).await.map_err(Self::map_error)
    }

    /// Builds every catalog page. Returns how many pages are ready.
    #[instrument(skip(self))]
    pub async fn prebuild(&self) -> Result<usize, PageError> {
        debug!("Prebuilding pages");
        self.inner.prebuild().await.map_err(Self::map_error)
    }

    /// Known paths in catalog order.
    pub async fn sorted_paths(&self) -> Result<Vec<ProductId>, PageError> {
        let mut paths: Vec<ProductId> = self.known_paths().await?.into_iter().collect();
        paths.sort();
        Ok(paths)
    }
}
