//! # PageClientExt Trait
//!
//! Provides a common interface for domain-specific page clients, adding default `resolve`
//! and `known_paths` methods built on top of a generic `PageClient`.
use crate::{FrameworkError, PageClient, PageEntity, RenderState};
use async_trait::async_trait;
use std::collections::HashSet;

/// Trait for domain-specific clients to inherit the standard page operations.
///
/// This trait reduces boilerplate by providing default implementations that
/// translate framework errors into the domain's own error type.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use page_framework::{FrameworkError, PageClient, PageClientExt, PageEntity};
///
/// #[derive(Clone, Debug)]
/// struct Note { id: u32 }
///
/// #[async_trait]
/// impl PageEntity for Note {
///     type Id = u32;
///     type Context = ();
///     type Error = std::io::Error;
///     fn known_ids(_: &()) -> Vec<u32> { vec![1] }
///     async fn materialize(id: &u32, _: &()) -> Result<Option<Self>, Self::Error> {
///         Ok(Some(Note { id: *id }))
///     }
/// }
///
/// #[derive(Debug)]
/// struct NoteError(String);
///
/// struct NoteClient {
///     inner: PageClient<Note>,
/// }
///
/// #[async_trait]
/// impl PageClientExt<Note> for NoteClient {
///     type Error = NoteError;
///
///     fn inner(&self) -> &PageClient<Note> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         NoteError(e.to_string())
///     }
/// }
///
/// async fn usage(client: NoteClient) {
///     // resolve() and known_paths() are provided automatically!
///     let _ = client.resolve(1).await;
///     let _ = client.known_paths().await;
/// }
/// ```
#[async_trait]
pub trait PageClientExt<T: PageEntity>: Send + Sync {
    /// The domain-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic PageClient.
    fn inner(&self) -> &PageClient<T>;

    /// Map framework errors to the domain error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Resolve a page by id.
    #[tracing::instrument(skip(self))]
    async fn resolve(&self, id: T::Id) -> Result<RenderState<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().resolve(id).await.map_err(Self::map_error)
    }

    /// Every id known at build time.
    #[tracing::instrument(skip(self))]
    async fn known_paths(&self) -> Result<HashSet<T::Id>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().known_paths().await.map_err(Self::map_error)
    }
}
