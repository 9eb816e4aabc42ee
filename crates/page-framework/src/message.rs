//! # Page Messages
//!
//! This module defines the message types used for communication between
//! the `PageClient` and `PageActor`.

use crate::entity::PageEntity;
use crate::error::FrameworkError;
use crate::state::{RenderState, SlotInfo};
use std::collections::HashSet;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Message type sent to the actor.
///
/// Every variant except `Materialized` is a request from a client. `Materialized` is sent
/// back to the actor by its own background tasks once a page build finishes, so that all
/// mutations of the page store happen inside the actor loop.
#[derive(Debug)]
pub enum PageRequest<T: PageEntity> {
    /// Resolve a page. With `wait` set, a not-yet-built page parks the request
    /// until its first materialization completes instead of answering `Fallback`.
    Resolve {
        id: T::Id,
        wait: bool,
        respond_to: Response<RenderState<T>>,
    },
    /// Start a fresh materialization regardless of freshness. Answers the ticket,
    /// or `None` for an unknown id.
    Revalidate {
        id: T::Id,
        respond_to: Response<Option<u64>>,
    },
    /// Build every known id in the background. Answers the number of ready pages
    /// once all of those builds have completed.
    Prebuild { respond_to: Response<usize> },
    KnownPaths {
        respond_to: Response<HashSet<T::Id>>,
    },
    Inspect {
        id: T::Id,
        respond_to: Response<Option<SlotInfo>>,
    },
    Materialized {
        id: T::Id,
        ticket: u64,
        result: Result<Option<T>, String>,
    },
}
