//! # Adapters
//!
//! Concrete implementations of the outbound ports.

pub mod event_sink;
pub mod registry;

pub use event_sink::{BroadcastEventBus, InMemoryEventLog, NoopEventSink};
pub use registry::ContractRegistry;
