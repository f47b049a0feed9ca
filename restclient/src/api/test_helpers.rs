//! Test helpers for the API client

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use super::{ApiClient, ClientConfig, ErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    NotFound,
    OutOfStock,
}

impl ErrorCode for StoreError {
    fn code(&self) -> &str {
        match self {
            StoreError::NotFound => "NOT_FOUND",
            StoreError::OutOfStock => "OUT_OF_STOCK",
        }
    }

    fn name(&self) -> &str {
        match self {
            StoreError::NotFound => "NotFound",
            StoreError::OutOfStock => "OutOfStock",
        }
    }

    fn all() -> &'static [Self] {
        &[StoreError::NotFound, StoreError::OutOfStock]
    }
}

pub fn create_test_client(url: &str, retry_count: u32) -> ApiClient<StoreError> {
    let config = ClientConfig::new(url).with_retry(retry_count, Duration::ZERO);
    ApiClient::with_config(config).unwrap()
}

/// Counts warning and error events emitted on the current thread.
#[derive(Debug, Clone, Default)]
pub struct EventCounts {
    warnings: Arc<AtomicUsize>,
    errors: Arc<AtomicUsize>,
}

impl EventCounts {
    pub fn warnings(&self) -> usize {
        self.warnings.load(Ordering::SeqCst)
    }

    pub fn errors(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for EventCounts {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        match *event.metadata().level() {
            Level::WARN => {
                self.warnings.fetch_add(1, Ordering::SeqCst);
            }
            Level::ERROR => {
                self.errors.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        }
    }
}

pub fn with_event_counter<R>(f: impl FnOnce() -> R) -> (R, EventCounts) {
    let counts = EventCounts::default();
    let subscriber = tracing_subscriber::registry().with(counts.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, counts)
}
