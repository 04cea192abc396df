use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::level::Level;

/// A structured log event handed to the sink by the host application.
///
/// Events are immutable once produced; the sink never mutates or re-renders
/// them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEvent {
    /// When the event occurred, with the producer's UTC offset.
    pub timestamp: DateTime<FixedOffset>,
    pub level: Level,
    /// Fully rendered message text.
    pub message: String,
    /// Raw, unrendered message template.
    pub template: String,
    pub exception: Option<Exception>,
    /// Structured properties in the event's own enumeration order.
    #[serde(default)]
    pub properties: Vec<(String, Value)>,
}

/// Error attached to a log event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exception {
    /// Short error message, used as the deduplication signature.
    pub message: String,
    /// Full description (type, message, backtrace) as produced by the host.
    pub details: String,
}

impl LogEvent {
    /// Key under which events count as the same occurrence within a batch.
    ///
    /// Events carrying an exception group by the exception message; events
    /// without one fall back to the rendered message text, so they never
    /// fault aggregation.
    pub fn group_key(&self) -> &str {
        self.exception
            .as_ref()
            .map_or(self.message.as_str(), |e| e.message.as_str())
    }
}
