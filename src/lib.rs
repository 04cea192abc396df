//! Forwards batched log events to a webhook chat endpoint as notification
//! cards.
//!
//! Events flow through three stages per batch: [`aggregate`] deduplicates
//! them by error signature and tracks occurrence timing, [`card`] renders
//! each group into a severity-colored card, and [`sender`] posts the cards
//! sequentially over HTTP. [`sink::CardSink`] wires the stages together;
//! [`sink::SinkHandle`] adds a size/period-triggered batching worker for
//! hosts that do not bring their own scheduler.

// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::missing_errors_doc,      // Internal API
    clippy::missing_panics_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. EventAggregator in aggregate module
    clippy::must_use_candidate,      // Annotated selectively on critical APIs
    clippy::doc_markdown             // Internal API
)]

pub mod aggregate;
pub mod card;
pub mod domain;
pub mod sender;
pub mod sink;

// Re-export main types for easy access
pub use domain::{Exception, Level, LogEvent};
pub use sink::{BatchReport, CardSink, SinkError, SinkHandle, SinkOptions};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
