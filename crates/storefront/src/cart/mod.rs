//! # Cart Interaction
//!
//! Client-side state for adding the displayed product to the cart.
//!
//! ## Overview
//!
//! The cart itself is an injected [`CartService`]; this module only owns the quantity
//! picker and the notification shown while an add is in flight. Success is never taken from
//! the add call. It is inferred from the next change of the service's cart count, observed
//! by an edge-triggered [`CountObserver`] that ignores the value seen at mount.
//!
//! ## Structure
//!
//! - [`controller`] - [`CartController`], one per displayed product
//! - [`quantity`] - [`Quantity`], never below one
//! - [`notification`] - [`NotificationState`] and [`RequestId`]
//! - [`service`] - [`CartService`] contract and the in-process [`MemoryCart`]
//! - [`toast`] - [`Toaster`] surface, [`TracingToaster`] and [`RecordingToaster`]
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use storefront::cart::{CartController, MemoryCart, NotificationState, TracingToaster};
//! use storefront::model::Product;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cart = Arc::new(MemoryCart::with_count(2));
//!     let mug = Product::new("sku-1", "Mug", 1200, "usd");
//!     let mut controller = CartController::mount(mug, cart, Arc::new(TracingToaster::new()));
//!
//!     controller.increment_quantity();
//!     controller.increment_quantity();
//!     let request = controller.submit_add().await?;
//!
//!     let state = controller.next_change().await?;
//!     assert_eq!(state, NotificationState::Resolved { request });
//!     assert_eq!(controller.quantity().get(), 1);
//!     Ok(())
//! }
//! ```

pub mod controller;
pub mod error;
pub mod notification;
pub mod observer;
pub mod quantity;
pub mod service;
pub mod toast;

pub use controller::CartController;
pub use error::CartError;
pub use notification::{NotificationState, RequestId};
pub use observer::CountObserver;
pub use quantity::Quantity;
pub use service::{CartLine, CartService, MemoryCart};
pub use toast::{RecordingToaster, ToastEvent, ToastId, Toaster, TracingToaster};
