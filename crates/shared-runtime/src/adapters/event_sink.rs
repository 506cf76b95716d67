//! # Event Sink Adapters
//!
//! | Adapter | Use |
//! |---------|-----|
//! | `NoopEventSink` | Default, drops everything |
//! | `InMemoryEventLog` | Tests and scenario reports |
//! | `BroadcastEventBus` | Async subscribers via `tokio::sync::broadcast` |

use crate::events::RuntimeEvent;
use crate::ports::EventSink;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Default broadcast channel capacity.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn publish(&self, _event: &RuntimeEvent) {}
}

/// Keeps every event in memory, in publish order.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    events: RwLock<Vec<RuntimeEvent>>,
}

impl InMemoryEventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<RuntimeEvent> {
        self.events.read().clone()
    }

    /// Events with the given topic.
    #[must_use]
    pub fn by_topic(&self, topic: &str) -> Vec<RuntimeEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.topic() == topic)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    pub fn clear(&self) {
        self.events.write().clear();
    }
}

impl EventSink for InMemoryEventLog {
    fn publish(&self, event: &RuntimeEvent) {
        self.events.write().push(event.clone());
    }
}

/// Fans events out to any number of async subscribers.
///
/// Events published while nobody is subscribed are dropped.
#[derive(Debug)]
pub struct BroadcastEventBus {
    sender: broadcast::Sender<RuntimeEvent>,
    events_published: AtomicU64,
}

impl BroadcastEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            events_published: AtomicU64::new(0),
        }
    }

    /// New receiver that sees every event published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RuntimeEvent> {
        debug!("New runtime event subscription");
        self.sender.subscribe()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Total events published, delivered or not.
    #[must_use]
    pub fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}

impl Default for BroadcastEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for BroadcastEventBus {
    fn publish(&self, event: &RuntimeEvent) {
        self.events_published.fetch_add(1, Ordering::Relaxed);
        match self.sender.send(event.clone()) {
            Ok(receivers) => trace!(topic = event.topic(), receivers, "Event published"),
            Err(_) => trace!(topic = event.topic(), "Event dropped (no receivers)"),
        }
    }
}
