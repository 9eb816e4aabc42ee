//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup (with revalidate interval and fallback mode), shutdown
//! - **Resolves**: id, applied version, whether the page was stale
//! - **Materializations**: start and completion with their `ticket`, discarded
//!   superseded results, failures
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run -- demo      # Compact logs
//! RUST_LOG=debug cargo run -- demo     # Every resolve and ticket
//! RUST_LOG=page_framework=debug cargo run -- demo
//! ```
//!
//! With `RUST_LOG=debug` a fallback followed by a materialization looks like:
//!
//! ```text
//! DEBUG Resolve before first materialization entity_type="PageViewModel" id=sku-1 blocking=false
//! DEBUG Materialization started entity_type="PageViewModel" id=sku-1 ticket=1
//! INFO Materialized entity_type="PageViewModel" id=sku-1 ticket=1 found=true
//! DEBUG Resolve entity_type="PageViewModel" id=sku-1 version=1 stale=false
//! ```

/// Initializes the tracing/logging infrastructure for the application.
///
/// Uses a compact format without module paths (`entity_type` already names the source)
/// and filters through the `RUST_LOG` environment variable.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
