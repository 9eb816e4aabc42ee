//! # Framework Errors
//!
//! This module defines the common error types used throughout the page framework.
//! By centralizing error definitions, we ensure consistent error handling across
//! the actor, its clients and the mocks.

/// Errors that can occur within the page framework itself.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    /// A materialization failed while the request was waiting for it and no
    /// earlier page existed to serve instead.
    #[error("Materialization failed: {0}")]
    Materialization(String),
}
