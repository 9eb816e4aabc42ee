use super::Quantity;
use std::fmt::Display;

/// Identifies one add-to-cart submission of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "add-{}", self.0)
    }
}

/// Lifecycle of the single add-to-cart notification slot.
///
/// ```text
/// Idle ──submit──▶ Pending ──count change──▶ Resolved
///                     │
///                     └──add timeout──▶ Expired
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationState {
    #[default]
    Idle,
    Pending {
        request: RequestId,
        quantity: Quantity,
    },
    Resolved {
        request: RequestId,
    },
    Expired {
        request: RequestId,
    },
}

impl NotificationState {
    pub fn is_pending(&self) -> bool {
        matches!(self, NotificationState::Pending { .. })
    }

    /// The request this notification was opened for.
    pub fn request(&self) -> Option<RequestId> {
        match self {
            NotificationState::Idle => None,
            NotificationState::Pending { request, .. }
            | NotificationState::Resolved { request }
            | NotificationState::Expired { request } => Some(*request),
        }
    }
}

pub(crate) fn loading_message(quantity: Quantity) -> String {
    let plural = if quantity.get() > 1 { "s" } else { "" };
    format!("Adding {quantity} item{plural}...")
}

pub(crate) fn success_message(quantity: Quantity, name: &str) -> String {
    format!("{quantity} {name} added")
}

pub(crate) fn expired_message(name: &str) -> String {
    format!("Could not confirm {name} was added")
}
