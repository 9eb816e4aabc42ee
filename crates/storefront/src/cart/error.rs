use super::RequestId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("add {0} is still pending")]
    AddInFlight(RequestId),

    #[error("cart count signal closed")]
    SignalClosed,
}
