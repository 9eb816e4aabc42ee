//! # System Lifecycle & Orchestration
//!
//! This module starts, wires and shuts down the storefront.
//!
//! ## The Storefront Pattern
//!
//! [`Storefront`] owns the one actor of the system, the page actor, together with the
//! collaborators it was wired with:
//!
//! ```rust,ignore
//! impl Storefront {
//!     pub fn new(catalog, content, cart, config) -> Self {
//!         // 1. Build the context the pages are materialized from
//!         let context = PageContext::new(catalog, content).with_failure_policy(..);
//!
//!         // 2. Create the actor, inject the context at run time
//!         let (actor, client) = page::new(config.pages.actor_config());
//!         let handle = tokio::spawn(actor.run(context));
//!
//!         Self { pages: PageService::new(client), cart, handle, .. }
//!     }
//! }
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the page client** - closes the sender side of the channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - in-flight page builds are abandoned
//!
//! Clones of [`PageService`](crate::clients::PageService) handed out to callers keep the
//! actor alive; drop them before calling [`Storefront::shutdown`].
//!
//! ## Observability
//!
//! Logging is initialized once by the binary through
//! [`page_framework::tracing::setup_tracing`]; `RUST_LOG` selects the level.

pub mod storefront;

pub use storefront::*;
