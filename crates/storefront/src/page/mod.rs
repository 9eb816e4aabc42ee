//! # Product Pages
//!
//! This module wires [`PageViewModel`](crate::model::PageViewModel) into the page framework.
//!
//! ## Overview
//!
//! A product page is materialized from two sources with independent lifecycles: the static
//! [`Catalog`] and a [`ContentSource`]. The catalog decides whether a page exists at all;
//! the content source only decorates it.
//!
//! ## Structure
//!
//! - [`entity`] - [`PageEntity`](page_framework::PageEntity) implementation for `PageViewModel`
//! - [`error`] - [`PageError`] taxonomy (catalog miss vs. content fetch failure)
//! - [`new()`] - Factory function that creates the page actor and client
//!
//! ## Failure Policy
//!
//! | Condition | `Degrade` (default) | `NotFound` |
//! |-----------|---------------------|------------|
//! | id not in catalog | `NotFound` | `NotFound` |
//! | no content document | product-only page | product-only page |
//! | content source failed | product-only page, logged at `warn` | `NotFound` |
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use storefront::catalog::Catalog;
//! use storefront::clients::PageService;
//! use storefront::content::MemoryContentSource;
//! use storefront::model::Product;
//! use storefront::page::{self, PageContext};
//! use page_framework::PageActorConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Catalog::from_products(vec![Product::new("sku-1", "Mug", 1200, "usd")])?;
//!     let context = PageContext::new(Arc::new(catalog), Arc::new(MemoryContentSource::new()));
//!
//!     let (actor, client) = page::new(PageActorConfig::default());
//!     tokio::spawn(actor.run(context));
//!     let pages = PageService::new(client);
//!
//!     let state = pages.page_blocking("sku-1".into()).await?;
//!     assert!(state.is_ready());
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::catalog::Catalog;
use crate::content::ContentSource;
use crate::model::PageViewModel;
use page_framework::{PageActor, PageActorConfig, PageClient};
use serde::Deserialize;
use std::sync::Arc;

/// What a page does when the content source fails for a reason other than a missing document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentFailurePolicy {
    /// Render the page from product data alone.
    #[default]
    Degrade,
    /// Treat the page as not found.
    NotFound,
}

/// Data sources a product page is materialized from.
#[derive(Clone)]
pub struct PageContext {
    pub catalog: Arc<Catalog>,
    pub content: Arc<dyn ContentSource>,
    pub failure_policy: ContentFailurePolicy,
}

impl PageContext {
    pub fn new(catalog: Arc<Catalog>, content: Arc<dyn ContentSource>) -> Self {
        Self {
            catalog,
            content,
            failure_policy: ContentFailurePolicy::default(),
        }
    }

    pub fn with_failure_policy(mut self, failure_policy: ContentFailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }
}

/// Creates a new page actor and its client.
pub fn new(config: PageActorConfig) -> (PageActor<PageViewModel>, PageClient<PageViewModel>) {
    PageActor::new(config)
}
