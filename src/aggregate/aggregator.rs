use chrono::{DateTime, FixedOffset};

use crate::domain::{Level, LogEvent};

/// One deduplicated event group within a batch, carrying the first event
/// seen for its key plus the timestamp span over which the key recurred.
///
/// Invariant: `first_occurrence <= last_occurrence` after every merge.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedEvent {
    event: LogEvent,
    first_occurrence: DateTime<FixedOffset>,
    last_occurrence: DateTime<FixedOffset>,
}

impl AggregatedEvent {
    fn new(event: LogEvent) -> Self {
        let timestamp = event.timestamp;
        Self {
            event,
            first_occurrence: timestamp,
            last_occurrence: timestamp,
        }
    }

    /// Widen the occurrence span; the representative event stays untouched.
    fn merge(&mut self, timestamp: DateTime<FixedOffset>) {
        self.first_occurrence = self.first_occurrence.min(timestamp);
        self.last_occurrence = self.last_occurrence.max(timestamp);
    }

    /// The representative event: the first one seen for this group's key.
    pub fn event(&self) -> &LogEvent {
        &self.event
    }

    pub fn first_occurrence(&self) -> DateTime<FixedOffset> {
        self.first_occurrence
    }

    pub fn last_occurrence(&self) -> DateTime<FixedOffset> {
        self.last_occurrence
    }

    /// Whether the key was seen more than one instant within the batch.
    pub fn is_recurring(&self) -> bool {
        self.first_occurrence != self.last_occurrence
    }
}

/// Groups a batch of raw events by their deduplication key.
///
/// State is local to one `aggregate` call; nothing carries over between
/// batches.
#[derive(Debug, Clone, Copy)]
pub struct EventAggregator {
    minimum_level: Level,
}

impl EventAggregator {
    pub fn new(minimum_level: Level) -> Self {
        Self { minimum_level }
    }

    /// Collapse a batch into one `AggregatedEvent` per distinct group key,
    /// preserving first-seen key order.
    ///
    /// Events below the minimum level are skipped entirely; they do not
    /// contribute to existing groups either. Matching is a linear scan over
    /// the current groups, fine for configuration-bounded batch sizes.
    pub fn aggregate(&self, events: impl IntoIterator<Item = LogEvent>) -> Vec<AggregatedEvent> {
        let mut groups: Vec<AggregatedEvent> = Vec::new();

        for event in events {
            if event.level < self.minimum_level {
                continue;
            }

            match groups
                .iter_mut()
                .find(|group| group.event.group_key() == event.group_key())
            {
                Some(group) => group.merge(event.timestamp),
                None => groups.push(AggregatedEvent::new(event)),
            }
        }

        groups
    }
}
