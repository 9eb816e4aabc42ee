use crate::cart::{CartController, CartService, MemoryCart, Toaster};
use crate::catalog::{Catalog, CatalogError};
use crate::clients::PageService;
use crate::config::StorefrontConfig;
use crate::content::{ContentSource, FsContentSource};
use crate::model::ProductId;
use crate::page::{self, PageContext, PageError};
use crate::route::{self, Response};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

/// Owns the page actor and the shared collaborators of the storefront.
pub struct Storefront {
    pub pages: PageService,
    pub cart: Arc<dyn CartService>,
    catalog: Arc<Catalog>,
    add_timeout: Option<Duration>,
    handle: JoinHandle<()>,
}

impl Storefront {
    /// Starts the page actor over `catalog` and `content`.
    pub fn new(
        catalog: Catalog,
        content: Arc<dyn ContentSource>,
        cart: Arc<dyn CartService>,
        config: &StorefrontConfig,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let context = PageContext::new(catalog.clone(), content)
            .with_failure_policy(config.content.failure);

        let (actor, client) = page::new(config.pages.actor_config());
        let handle = tokio::spawn(actor.run(context));
        info!(products = catalog.len(), "Storefront started");

        Self {
            pages: PageService::new(client),
            cart,
            catalog,
            add_timeout: config.cart.add_timeout(),
            handle,
        }
    }

    /// Loads the catalog and the content directory named by `config`, with an in-memory cart.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = Catalog::load(&config.catalog.path)?;
        let content = Arc::new(FsContentSource::new(&config.content.root));
        Ok(Self::new(catalog, content, Arc::new(MemoryCart::new()), config))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Serves one request on the product route.
    pub async fn handle(&self, method: &str, path: &str) -> Result<Response, PageError> {
        route::handle(&self.pages, method, path).await
    }

    /// Mounts a cart controller for a catalog product.
    pub fn controller(&self, id: &ProductId, toaster: Arc<dyn Toaster>) -> Option<CartController> {
        let product = self.catalog.get(id)?.clone();
        Some(
            CartController::mount(product, self.cart.clone(), toaster)
                .with_add_timeout(self.add_timeout),
        )
    }

    /// Drops the page client and waits for the actor to stop.
    pub async fn shutdown(self) {
        info!("Shutting down storefront");
        drop(self.pages);
        let _ = self.handle.await;
        info!("Storefront stopped");
    }
}
