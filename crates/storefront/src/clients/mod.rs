//! # Domain Clients
//!
//! Type-safe wrappers over the generic [`PageClient`](page_framework::PageClient) that hide
//! the message passing and translate framework errors into domain errors.

pub mod page_client;

pub use page_client::PageService;
