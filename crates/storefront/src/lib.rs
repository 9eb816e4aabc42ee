//! # Storefront Library
//!
//! Product detail pages and the add-to-cart interaction of a small storefront.
//! This library exposes the core modules of the application for integration testing.

pub mod cart;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod content;
pub mod lifecycle;
pub mod model;
pub mod page;
pub mod route;
pub mod view;
