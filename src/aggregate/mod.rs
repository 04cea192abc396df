//! Per-batch deduplication of log events by error signature.

pub mod aggregator;

pub use aggregator::{AggregatedEvent, EventAggregator};
