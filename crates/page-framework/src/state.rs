//! # Render States
//!
//! What a single request for a page resolves to, plus the diagnostic view of a cache slot.

use std::time::Duration;

/// Outcome of resolving one page request.
///
/// `NotFound` is a normal outcome, not a fault: callers render a 404 and move on.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderState<T> {
    /// The page is not materialized yet; a placeholder should be rendered.
    Fallback,
    /// A materialized page.
    Ready(T),
    /// The id is unknown, or its last materialization reported it missing.
    NotFound,
}

impl<T> RenderState<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, RenderState::Fallback)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, RenderState::Ready(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RenderState::NotFound)
    }

    /// Returns the page if this state is `Ready`.
    pub fn into_page(self) -> Option<T> {
        match self {
            RenderState::Ready(page) => Some(page),
            _ => None,
        }
    }
}

/// Snapshot of one slot in the actor's page store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotInfo {
    /// Ticket of the materialization currently applied (0 if none yet).
    pub version: u64,
    /// A page is stored and servable.
    pub ready: bool,
    /// The last applied materialization reported the page missing.
    pub gone: bool,
    /// Materializations started but not completed.
    pub in_flight: usize,
    /// Time since the applied materialization completed.
    pub age: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_page_only_for_ready() {
        assert_eq!(RenderState::Ready(7).into_page(), Some(7));
        assert_eq!(RenderState::<u32>::Fallback.into_page(), None);
        assert_eq!(RenderState::<u32>::NotFound.into_page(), None);
    }

    #[test]
    fn test_predicates() {
        assert!(RenderState::<()>::Fallback.is_fallback());
        assert!(RenderState::Ready(()).is_ready());
        assert!(RenderState::<()>::NotFound.is_not_found());
        assert!(!RenderState::<()>::NotFound.is_ready());
    }
}
