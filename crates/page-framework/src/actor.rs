//! # Page Actor
//!
//! This module defines the `PageActor`, the component that decides when a page is built,
//! served stale, or rebuilt. It implements the "Server" side of the Actor Model, processing
//! messages sequentially and ensuring exclusive access to the page store.

use crate::client::PageClient;
use crate::entity::PageEntity;
use crate::error::FrameworkError;
use crate::message::{PageRequest, Response};
use crate::state::{RenderState, SlotInfo};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// What a request for a not-yet-built page receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackMode {
    /// Answer `RenderState::Fallback` immediately and build in the background.
    #[default]
    Placeholder,
    /// Hold the request until the first materialization completes.
    Blocking,
}

/// Tuning for a [`PageActor`].
#[derive(Debug, Clone)]
pub struct PageActorConfig {
    /// Capacity of the request channel.
    pub buffer_size: usize,
    /// How long a materialized page stays fresh.
    pub revalidate: Duration,
    pub fallback: FallbackMode,
}

impl Default for PageActorConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            revalidate: Duration::from_secs(1),
            fallback: FallbackMode::Placeholder,
        }
    }
}

enum SlotState<T> {
    Pending,
    Ready(T),
    Gone,
}

/// One entry of the page store: the applied page plus its ordering metadata.
struct Slot<T: PageEntity> {
    state: SlotState<T>,
    /// Ticket of the applied materialization. Completions with a lower ticket are stale.
    version: u64,
    refreshed_at: Option<Instant>,
    in_flight: usize,
    waiters: Vec<Response<RenderState<T>>>,
}

impl<T: PageEntity> Slot<T> {
    fn pending() -> Self {
        Self {
            state: SlotState::Pending,
            version: 0,
            refreshed_at: None,
            in_flight: 0,
            waiters: Vec::new(),
        }
    }

    /// The state a request should receive, or `None` if nothing has been applied yet.
    fn answer(&self) -> Option<RenderState<T>> {
        match &self.state {
            SlotState::Pending => None,
            SlotState::Ready(page) => Some(RenderState::Ready(page.clone())),
            SlotState::Gone => Some(RenderState::NotFound),
        }
    }

    fn is_stale(&self, now: Instant, revalidate: Duration) -> bool {
        self.refreshed_at
            .is_some_and(|at| now.duration_since(at) >= revalidate)
    }

    fn info(&self, now: Instant) -> SlotInfo {
        SlotInfo {
            version: self.version,
            ready: matches!(self.state, SlotState::Ready(_)),
            gone: matches!(self.state, SlotState::Gone),
            in_flight: self.in_flight,
            age: self.refreshed_at.map(|at| now.duration_since(at)),
        }
    }

    fn flush_waiters(&mut self) {
        if let Some(state) = self.answer() {
            for waiter in self.waiters.drain(..) {
                let _ = waiter.send(Ok(state.clone()));
            }
        }
    }
}

/// A `prebuild` caller parked until every build it started has reported back.
struct PrebuildWaiter {
    outstanding: HashSet<u64>,
    respond_to: Response<usize>,
}

/// The generic actor that materializes and caches pages.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the page store and the receiver
/// end of the channel. Page builds run in background tasks, but their results come back
/// as [`PageRequest::Materialized`] messages, so the store is still only touched by the
/// actor loop. No `Mutex` is needed, and concurrent resolves for different ids (or a
/// resolve racing a refresh of the same id) are serialized by the channel.
///
/// # Ordering
/// Every materialization takes a ticket from a monotonic counter when it starts. A result
/// is applied only if its ticket is newer than the one already applied, so a slow refresh
/// that started earlier can never overwrite a faster one that started later.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `PageActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass the data sources into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use async_trait::async_trait;
/// use page_framework::{PageActor, PageActorConfig, PageEntity};
///
/// #[derive(Clone, Debug)]
/// struct Note { id: u32 }
///
/// #[async_trait]
/// impl PageEntity for Note {
///     type Id = u32;
///     type Context = Vec<u32>;
///     type Error = std::io::Error;
///
///     fn known_ids(ctx: &Vec<u32>) -> Vec<u32> { ctx.clone() }
///
///     async fn materialize(id: &u32, _: &Vec<u32>) -> Result<Option<Self>, Self::Error> {
///         Ok(Some(Note { id: *id }))
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = PageActor::<Note>::new(PageActorConfig::default());
///     tokio::spawn(actor.run(vec![1, 2, 3]));
///
///     let page = client.resolve_blocking(2).await.unwrap();
///     assert!(page.is_ready());
/// }
/// ```
pub struct PageActor<T: PageEntity> {
    receiver: mpsc::Receiver<PageRequest<T>>,
    loopback: mpsc::WeakSender<PageRequest<T>>,
    slots: HashMap<T::Id, Slot<T>>,
    prebuilds: Vec<PrebuildWaiter>,
    config: PageActorConfig,
    next_ticket: u64,
    entity_type: &'static str,
}

impl<T: PageEntity> PageActor<T> {
    /// Creates a new `PageActor` and its associated `PageClient`.
    ///
    /// The actor keeps only a weak handle to its own channel for background results,
    /// so it shuts down once every client has been dropped.
    pub fn new(config: PageActorConfig) -> (Self, PageClient<T>) {
        let (sender, receiver) = mpsc::channel(config.buffer_size);
        // Extract just the type name (e.g., "PageViewModel" instead of the full path)
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        let actor = Self {
            receiver,
            loopback: sender.downgrade(),
            slots: HashMap::new(),
            prebuilds: Vec::new(),
            config,
            next_ticket: 0,
            entity_type,
        };
        (actor, PageClient::new(sender))
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` is shared with every background materialization task.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = self.entity_type;
        let context = Arc::new(context);
        info!(
            entity_type,
            revalidate_ms = self.config.revalidate.as_millis() as u64,
            fallback = ?self.config.fallback,
            "Actor started"
        );

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                PageRequest::Resolve {
                    id,
                    wait,
                    respond_to,
                } => self.resolve(id, wait, respond_to, &context),
                PageRequest::Revalidate { id, respond_to } => {
                    if !T::exists(&context, &id) {
                        debug!(entity_type, %id, "Revalidate unknown id");
                        let _ = respond_to.send(Ok(None));
                        continue;
                    }
                    self.slots.entry(id.clone()).or_insert_with(Slot::pending);
                    let ticket = self.spawn_materialize(id, &context);
                    let _ = respond_to.send(Ok(Some(ticket)));
                }
                PageRequest::Prebuild { respond_to } => self.prebuild(respond_to, &context),
                PageRequest::KnownPaths { respond_to } => {
                    let paths: HashSet<T::Id> = T::known_ids(&context).into_iter().collect();
                    debug!(entity_type, count = paths.len(), "KnownPaths");
                    let _ = respond_to.send(Ok(paths));
                }
                PageRequest::Inspect { id, respond_to } => {
                    let now = Instant::now();
                    let info = self.slots.get(&id).map(|slot| slot.info(now));
                    let _ = respond_to.send(Ok(info));
                }
                PageRequest::Materialized { id, ticket, result } => {
                    self.complete(id, ticket, result);
                }
            }
        }

        info!(entity_type, size = self.slots.len(), "Shutdown");
    }

    fn resolve(
        &mut self,
        id: T::Id,
        wait: bool,
        respond_to: Response<RenderState<T>>,
        context: &Arc<T::Context>,
    ) {
        let entity_type = self.entity_type;
        // Catalog check comes first: unknown ids never get a fallback.
        if !T::exists(context, &id) {
            debug!(entity_type, %id, "Unknown id");
            let _ = respond_to.send(Ok(RenderState::NotFound));
            return;
        }

        let now = Instant::now();
        let revalidate = self.config.revalidate;
        let blocking = wait || self.config.fallback == FallbackMode::Blocking;
        let slot = self.slots.entry(id.clone()).or_insert_with(Slot::pending);
        let idle = slot.in_flight == 0;

        match slot.answer() {
            Some(state) => {
                let stale = slot.is_stale(now, revalidate);
                debug!(entity_type, %id, version = slot.version, stale, "Resolve");
                let _ = respond_to.send(Ok(state));
                if stale && idle {
                    self.spawn_materialize(id, context);
                }
            }
            None => {
                debug!(entity_type, %id, blocking, "Resolve before first materialization");
                if blocking {
                    slot.waiters.push(respond_to);
                } else {
                    let _ = respond_to.send(Ok(RenderState::Fallback));
                }
                if idle {
                    self.spawn_materialize(id, context);
                }
            }
        }
    }

    fn take_ticket(&mut self) -> u64 {
        self.next_ticket += 1;
        self.next_ticket
    }

    /// Starts a background materialization and returns its ticket.
    fn spawn_materialize(&mut self, id: T::Id, context: &Arc<T::Context>) -> u64 {
        let entity_type = self.entity_type;
        let ticket = self.take_ticket();
        let serving = match self.slots.get_mut(&id) {
            Some(slot) => {
                slot.in_flight += 1;
                matches!(slot.state, SlotState::Ready(_))
            }
            None => false,
        };
        debug!(entity_type, %id, ticket, serving, "Materialization started");

        let loopback = self.loopback.clone();
        let context = Arc::clone(context);
        tokio::spawn(async move {
            // The build runs in its own task so a panic still reports back to the actor.
            let build = {
                let id = id.clone();
                tokio::spawn(async move {
                    if serving {
                        T::refresh(&id, &context).await
                    } else {
                        T::materialize(&id, &context).await
                    }
                })
            };
            let result = match build.await {
                Ok(result) => result.map_err(|e| e.to_string()),
                Err(e) => {
                    warn!(entity_type, %id, ticket, error = %e, "Materialization task aborted");
                    Err(e.to_string())
                }
            };
            match loopback.upgrade() {
                Some(sender) => {
                    let _ = sender
                        .send(PageRequest::Materialized { id, ticket, result })
                        .await;
                }
                None => debug!(entity_type, %id, ticket, "Actor gone, result dropped"),
            }
        });
        ticket
    }

    /// Starts a build for every known id. The caller is answered with the number of ready
    /// pages once all of them have reported back; other requests are served meanwhile.
    fn prebuild(&mut self, respond_to: Response<usize>, context: &Arc<T::Context>) {
        let entity_type = self.entity_type;
        let ids = T::known_ids(context);
        info!(entity_type, count = ids.len(), "Prebuild started");

        let mut outstanding = HashSet::with_capacity(ids.len());
        for id in ids {
            self.slots.entry(id.clone()).or_insert_with(Slot::pending);
            outstanding.insert(self.spawn_materialize(id, context));
        }

        if outstanding.is_empty() {
            let _ = respond_to.send(Ok(self.ready_count()));
        } else {
            self.prebuilds.push(PrebuildWaiter {
                outstanding,
                respond_to,
            });
        }
    }

    fn ready_count(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| matches!(slot.state, SlotState::Ready(_)))
            .count()
    }

    /// Answers every prebuild whose last outstanding build was `ticket`.
    fn settle_prebuilds(&mut self, ticket: u64) {
        if self.prebuilds.is_empty() {
            return;
        }
        for waiter in &mut self.prebuilds {
            waiter.outstanding.remove(&ticket);
        }
        let (done, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.prebuilds)
            .into_iter()
            .partition(|waiter| waiter.outstanding.is_empty());
        self.prebuilds = waiting;

        if !done.is_empty() {
            let ready = self.ready_count();
            info!(entity_type = self.entity_type, ready, "Prebuild finished");
            for waiter in done {
                let _ = waiter.respond_to.send(Ok(ready));
            }
        }
    }

    fn complete(&mut self, id: T::Id, ticket: u64, result: Result<Option<T>, String>) {
        self.apply(id, ticket, result);
        self.settle_prebuilds(ticket);
    }

    fn apply(&mut self, id: T::Id, ticket: u64, result: Result<Option<T>, String>) {
        let entity_type = self.entity_type;
        let Some(slot) = self.slots.get_mut(&id) else {
            warn!(entity_type, %id, ticket, "Materialized without a slot");
            return;
        };
        slot.in_flight = slot.in_flight.saturating_sub(1);

        match result {
            Ok(page) if ticket > slot.version => {
                let found = page.is_some();
                slot.state = match page {
                    Some(page) => SlotState::Ready(page),
                    None => SlotState::Gone,
                };
                slot.version = ticket;
                slot.refreshed_at = Some(Instant::now());
                info!(entity_type, %id, ticket, found, "Materialized");
            }
            Ok(_) => {
                debug!(
                    entity_type,
                    %id,
                    ticket,
                    version = slot.version,
                    "Discarded superseded materialization"
                );
            }
            Err(e) => {
                warn!(entity_type, %id, ticket, error = %e, "Materialization failed");
                if slot.answer().is_none() && slot.in_flight == 0 {
                    for waiter in slot.waiters.drain(..) {
                        let _ = waiter.send(Err(FrameworkError::Materialization(e.clone())));
                    }
                }
            }
        }

        slot.flush_waiters();
    }
}
