//! # Page Client
//!
//! This module defines the generic client for communicating with a `PageActor`.

use crate::entity::PageEntity;
use crate::error::FrameworkError;
use crate::message::PageRequest;
use crate::state::{RenderState, SlotInfo};
use std::collections::HashSet;
use tokio::sync::{mpsc, oneshot};

/// ## PageClient
///
/// The `PageClient<T>` provides a type‑safe, async API for interacting with a `PageActor<T>`.
/// It forwards requests over a Tokio mpsc channel and returns results via oneshot channels.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive.
/// * **Non-blocking** – `resolve` never waits for a page build unless asked to.
#[derive(Clone)]
pub struct PageClient<T: PageEntity> {
    sender: mpsc::Sender<PageRequest<T>>,
}

impl<T: PageEntity> PageClient<T> {
    pub fn new(sender: mpsc::Sender<PageRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> PageRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Resolves a page using the actor's configured fallback mode.
    pub async fn resolve(&self, id: T::Id) -> Result<RenderState<T>, FrameworkError> {
        self.request(|respond_to| PageRequest::Resolve {
            id,
            wait: false,
            respond_to,
        })
        .await
    }

    /// Resolves a page, waiting for its first materialization instead of taking a fallback.
    pub async fn resolve_blocking(&self, id: T::Id) -> Result<RenderState<T>, FrameworkError> {
        self.request(|respond_to| PageRequest::Resolve {
            id,
            wait: true,
            respond_to,
        })
        .await
    }

    /// Forces a rebuild of `id`. Returns the ticket of the new materialization.
    pub async fn revalidate(&self, id: T::Id) -> Result<Option<u64>, FrameworkError> {
        self.request(|respond_to| PageRequest::Revalidate { id, respond_to })
            .await
    }

    /// Materializes every known page. Returns the number of ready pages.
    pub async fn prebuild(&self) -> Result<usize, FrameworkError> {
        self.request(|respond_to| PageRequest::Prebuild { respond_to })
            .await
    }

    pub async fn known_paths(&self) -> Result<HashSet<T::Id>, FrameworkError> {
        self.request(|respond_to| PageRequest::KnownPaths { respond_to })
            .await
    }

    pub async fn inspect(&self, id: T::Id) -> Result<Option<SlotInfo>, FrameworkError> {
        self.request(|respond_to| PageRequest::Inspect { id, respond_to })
            .await
    }
}
