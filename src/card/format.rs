use serde_json::Value;

use crate::domain::LogEvent;

#[cfg(test)]
use mockall::automock;

/// Formatting provider applied to structured values before they land on a
/// card. Hosts plug in their own to control culture or precision rules.
#[cfg_attr(test, automock)]
pub trait ValueFormatter: Send + Sync {
    /// Format one structured property value for display.
    fn format(&self, value: &Value) -> String;

    /// Produce the card body text for an event. The default trusts the
    /// host's own rendering.
    fn render_message(&self, event: &LogEvent) -> String {
        event.message.clone()
    }
}

/// Renders strings bare and everything else through its compact JSON form.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultValueFormatter;

impl ValueFormatter for DefaultValueFormatter {
    fn format(&self, value: &Value) -> String {
        match value {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}
