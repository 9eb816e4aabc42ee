//! # Page Framework
//!
//! This crate provides a small, type-safe runtime for **incrementally materialized pages**:
//! pages that are built ahead of time for every known id, built on demand for ids that show
//! up later, and rebuilt in the background once they go stale.
//!
//! It is built on the **Actor Model**: a single `PageActor` task owns the page store and
//! processes requests sequentially, while page builds run in background tasks and report
//! back through the same channel.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Entity Layer** ([`PageEntity`]) - What a page is and how it is built
//! 2. **Runtime Layer** ([`PageActor`]) - When a page is built, served stale, or rebuilt
//! 3. **Interface Layer** ([`PageClient`], [`PageClientExt`]) - Type-safe communication
//!
//! ## Resolution Rules
//!
//! | Slot state | Request receives | Side effect |
//! |------------|------------------|-------------|
//! | id unknown | `NotFound` | none |
//! | never built | `Fallback` (or waits, in blocking mode) | background build |
//! | fresh page | `Ready(page)` | none |
//! | stale page | `Ready(page)` (the stale one) | background rebuild |
//! | gone | `NotFound` | background rebuild once stale |
//!
//! Results are applied by **ticket**: each build takes a number from a monotonic counter
//! when it starts, and a result older than the one already applied is discarded.
//!
//! ## Concurrency Model
//!
//! - The actor runs in its own Tokio task and never blocks on a page build, including
//!   during [`PageClient::prebuild`]
//! - A build that panics is reported as a failed materialization
//! - Resolves for different ids, and a resolve racing a refresh of the same id,
//!   are serialized by the actor's channel
//! - Dropping every client shuts the actor down; in-flight builds are discarded
//!
//! ## Testing
//!
//! See the [`mock`] module for [`MockPageClient`](mock::MockPageClient), which answers
//! requests from queued expectations without running an actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod state;
pub mod tracing;

// Re-export core types for convenience
pub use actor::{FallbackMode, PageActor, PageActorConfig};
pub use client::PageClient;
pub use client_trait::PageClientExt;
pub use entity::PageEntity;
pub use error::FrameworkError;
pub use message::{PageRequest, Response};
pub use state::{RenderState, SlotInfo};
