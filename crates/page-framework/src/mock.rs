//! # Mock Framework & Testing Guide
//!
//! The `MockPageClient<T>` type hands out a real `PageClient<T>` whose requests are answered
//! from queued expectations instead of a running actor. It lets you test code built on top of
//! a page client (routes, views, domain clients) without materializing anything.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockPageClient | Real Actor |
//! |---------|----------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler and clock |
//! | **State** | No real state (expectations) | Real page store, freshness, tickets |
//! | **Use Case** | Testing logic *around* the client | Testing caching rules or the full system |
//! | **Error Injection** | Easy (`return_err`) | Requires a failing context |
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use page_framework::mock::MockPageClient;
//! use page_framework::{FrameworkError, PageEntity, RenderState};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Note { id: u32 }
//!
//! #[async_trait]
//! impl PageEntity for Note {
//!     type Id = u32;
//!     type Context = ();
//!     type Error = std::io::Error;
//!     fn known_ids(_: &()) -> Vec<u32> { vec![1] }
//!     async fn materialize(id: &u32, _: &()) -> Result<Option<Self>, Self::Error> {
//!         Ok(Some(Note { id: *id }))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockPageClient::<Note>::new();
//!     mock.expect_resolve(1).return_ok(RenderState::Ready(Note { id: 1 }));
//!     mock.expect_resolve(2).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert!(client.resolve(1).await.unwrap().is_ready());
//!     assert!(matches!(client.resolve(2).await, Err(FrameworkError::ActorClosed)));
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_client`] to get a client and a receiver, or use the fluent [`MockPageClient`] API.

use crate::client::PageClient;
use crate::entity::PageEntity;
use crate::error::FrameworkError;
use crate::message::PageRequest;
use crate::state::RenderState;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client.
enum Expectation<T: PageEntity> {
    Resolve {
        id: T::Id,
        response: Result<RenderState<T>, FrameworkError>,
    },
    Revalidate {
        id: T::Id,
        response: Result<Option<u64>, FrameworkError>,
    },
    KnownPaths {
        response: Result<HashSet<T::Id>, FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock page client with expectation tracking for fluent testing.
pub struct MockPageClient<T: PageEntity> {
    client: PageClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: PageEntity> Default for MockPageClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PageEntity> MockPageClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<PageRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        PageRequest::Resolve { id, respond_to, .. },
                        Some(Expectation::Resolve {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "Resolve for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        PageRequest::Revalidate { id, respond_to },
                        Some(Expectation::Revalidate {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "Revalidate for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        PageRequest::KnownPaths { respond_to },
                        Some(Expectation::KnownPaths { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: PageClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> PageClient<T> {
        self.client.clone()
    }

    /// Expects a `resolve` (or `resolve_blocking`) for `id`.
    pub fn expect_resolve(&mut self, id: T::Id) -> ResolveExpectationBuilder<T> {
        ResolveExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `revalidate` for `id`.
    pub fn expect_revalidate(&mut self, id: T::Id) -> RevalidateExpectationBuilder<T> {
        RevalidateExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `known_paths` request.
    pub fn expect_known_paths(&mut self) -> KnownPathsExpectationBuilder<T> {
        KnownPathsExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `resolve` expectations.
pub struct ResolveExpectationBuilder<T: PageEntity> {
    id: T::Id,
    expectations: Expectations<T>,
}

impl<T: PageEntity> ResolveExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, state: RenderState<T>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Resolve {
                id: self.id,
                response: Ok(state),
            });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Resolve {
                id: self.id,
                response: Err(error),
            });
    }
}

/// Builder for `revalidate` expectations.
pub struct RevalidateExpectationBuilder<T: PageEntity> {
    id: T::Id,
    expectations: Expectations<T>,
}

impl<T: PageEntity> RevalidateExpectationBuilder<T> {
    pub fn return_ok(self, ticket: Option<u64>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Revalidate {
                id: self.id,
                response: Ok(ticket),
            });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Revalidate {
                id: self.id,
                response: Err(error),
            });
    }
}

/// Builder for `known_paths` expectations.
pub struct KnownPathsExpectationBuilder<T: PageEntity> {
    expectations: Expectations<T>,
}

impl<T: PageEntity> KnownPathsExpectationBuilder<T> {
    pub fn return_ok(self, paths: impl IntoIterator<Item = T::Id>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::KnownPaths {
                response: Ok(paths.into_iter().collect()),
            });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::KnownPaths {
                response: Err(error),
            });
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// The client sends messages to a channel we control (`receiver`). The test inspects each
/// message and answers it through the embedded responder, which makes timing scenarios
/// (a request arriving while another is outstanding) fully deterministic.
///
/// **Note**: Consider using [`MockPageClient`] for a more fluent API.
pub fn create_mock_client<T: PageEntity>(
    buffer_size: usize,
) -> (PageClient<T>, mpsc::Receiver<PageRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (PageClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Resolve request
pub async fn expect_resolve<T: PageEntity>(
    receiver: &mut mpsc::Receiver<PageRequest<T>>,
) -> Option<(
    T::Id,
    bool,
    oneshot::Sender<Result<RenderState<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(PageRequest::Resolve {
            id,
            wait,
            respond_to,
        }) => Some((id, wait, respond_to)),
        _ => None,
    }
}
