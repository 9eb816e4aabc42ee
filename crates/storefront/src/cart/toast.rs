//! Notification surface for the add-to-cart lifecycle.
//!
//! A loading toast is opened on submit and later replaced in place by a success or error
//! toast with the same id, or dismissed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(pub u64);

pub trait Toaster: Send + Sync {
    fn loading(&self, message: &str) -> ToastId;
    fn success(&self, id: ToastId, message: &str);
    fn error(&self, id: ToastId, message: &str);
    fn dismiss(&self, id: ToastId);
}

/// Writes toasts to the log.
#[derive(Debug, Default)]
pub struct TracingToaster {
    next: AtomicU64,
}

impl TracingToaster {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Toaster for TracingToaster {
    fn loading(&self, message: &str) -> ToastId {
        let id = ToastId(self.next.fetch_add(1, Ordering::Relaxed) + 1);
        info!(toast = id.0, "{message}");
        id
    }

    fn success(&self, id: ToastId, message: &str) {
        info!(toast = id.0, "{message}");
    }

    fn error(&self, id: ToastId, message: &str) {
        error!(toast = id.0, "{message}");
    }

    fn dismiss(&self, id: ToastId) {
        info!(toast = id.0, "Toast dismissed");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    Loading(ToastId, String),
    Success(ToastId, String),
    Error(ToastId, String),
    Dismiss(ToastId),
}

/// Records every toast, for asserting on the notification lifecycle.
#[derive(Debug, Default)]
pub struct RecordingToaster {
    events: Mutex<Vec<ToastEvent>>,
}

impl RecordingToaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ToastEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ToastEvent::Success(_, message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: ToastEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Toaster for RecordingToaster {
    fn loading(&self, message: &str) -> ToastId {
        let mut events = self.events.lock().unwrap();
        let id = ToastId(events.len() as u64 + 1);
        events.push(ToastEvent::Loading(id, message.to_string()));
        id
    }

    fn success(&self, id: ToastId, message: &str) {
        self.record(ToastEvent::Success(id, message.to_string()));
    }

    fn error(&self, id: ToastId, message: &str) {
        self.record(ToastEvent::Error(id, message.to_string()));
    }

    fn dismiss(&self, id: ToastId) {
        self.record(ToastEvent::Dismiss(id));
    }
}
