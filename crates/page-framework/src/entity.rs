//! # PageEntity Trait
//!
//! The `PageEntity` trait defines the contract that every page type must implement to be
//! managed by the generic [`PageActor`](crate::PageActor). It specifies associated types for
//! IDs, the injected context and errors, and the two hooks the actor calls: enumerating the
//! ids known at build time and materializing one page.
//!
//! # Architecture Note
//! The actor owns *when* a page is built (fallback, freshness, ordering of results).
//! The entity owns *what* a page is. Keeping those apart means the caching rules are written
//! once and every page type gets the same stale-while-revalidate behaviour.
//!
//! # Provided Methods
//! - [`PageEntity::exists`] defaults to a membership test over [`PageEntity::known_ids`].
//!   Override it when the context offers a direct lookup.
//! - [`PageEntity::refresh`] defaults to [`PageEntity::materialize`]. Override it when a
//!   rebuild should fail (and keep the served page) where a first build would degrade.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any page type must implement to be managed by `PageActor`.
///
/// # Async & Context
/// `materialize` runs inside background Tokio tasks, so the `Context` is shared behind an
/// `Arc` and must be `Send + Sync + 'static`. The context is injected at `run()` time,
/// not at construction time.
#[async_trait]
pub trait PageEntity: Clone + Send + Sync + 'static {
    /// The identifier a page is addressed by (e.g. a product id taken from the route).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + 'static;

    /// Data sources the page is built from.
    type Context: Send + Sync + 'static;

    /// The error type for a failed materialization.
    ///
    /// A failure is not a "not found": the actor keeps serving the last good page and
    /// retries on the next request. Return `Ok(None)` from `materialize` for a missing page.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Every id that should be materialized at build time.
    fn known_ids(ctx: &Self::Context) -> Vec<Self::Id>;

    /// Whether `id` may be served at all. Checked before any fallback is issued.
    fn exists(ctx: &Self::Context, id: &Self::Id) -> bool {
        Self::known_ids(ctx).contains(id)
    }

    /// Build the page for `id`.
    ///
    /// `Ok(None)` marks the page as gone; subsequent requests resolve to `NotFound`
    /// until a later materialization produces a page again.
    async fn materialize(id: &Self::Id, ctx: &Self::Context) -> Result<Option<Self>, Self::Error>;

    /// Rebuild a page that is already being served.
    ///
    /// An `Err` leaves the served page in place until the next refresh.
    async fn refresh(id: &Self::Id, ctx: &Self::Context) -> Result<Option<Self>, Self::Error> {
        Self::materialize(id, ctx).await
    }
}
