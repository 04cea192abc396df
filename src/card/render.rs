use std::sync::Arc;

use crate::aggregate::AggregatedEvent;
use crate::domain::Level;

use super::format::ValueFormatter;
use super::model::{CardFact, CardSection, MessageCard};

/// Timestamp layout for occurrence facts, e.g. `01.05.2024 10:00:00+02:00`.
const OCCURRENCE_FORMAT: &str = "%d.%m.%Y %H:%M:%S%:z";

/// Hex card color (no leading '#') for a severity. Total mapping: levels
/// without a dedicated color fall through to grey.
pub fn level_color(level: Level) -> &'static str {
    match level {
        Level::Information => "5bc0de",
        Level::Warning => "f0ad4e",
        Level::Error | Level::Fatal => "d9534f",
        _ => "777777",
    }
}

/// Pure transformation from one aggregated event to one card.
#[derive(Clone)]
pub struct CardRenderer {
    title: String,
    omit_properties_section: bool,
    formatter: Arc<dyn ValueFormatter>,
}

impl CardRenderer {
    pub fn new(
        title: impl Into<String>,
        omit_properties_section: bool,
        formatter: Arc<dyn ValueFormatter>,
    ) -> Self {
        Self {
            title: title.into(),
            omit_properties_section,
            formatter,
        }
    }

    pub fn render(&self, aggregated: &AggregatedEvent) -> MessageCard {
        let event = aggregated.event();

        let mut card = MessageCard {
            title: self.title.clone(),
            text: self.formatter.render_message(event),
            theme_color: level_color(event.level).to_string(),
            sections: Vec::new(),
        };

        if !self.omit_properties_section {
            card.sections.push(CardSection {
                activity_title: "Properties".to_string(),
                facts: self.facts(aggregated),
            });
        }

        card
    }

    /// Fact order is fixed: level, template, exception, structured
    /// properties in event order, then occurrence timing.
    fn facts(&self, aggregated: &AggregatedEvent) -> Vec<CardFact> {
        let event = aggregated.event();

        let mut facts = vec![
            CardFact::new("Level", event.level.as_str()),
            CardFact::new("MessageTemplate", event.template.clone()),
        ];

        if let Some(exception) = &event.exception {
            facts.push(CardFact::new("Exception", exception.details.clone()));
        }

        for (name, value) in &event.properties {
            facts.push(CardFact::new(name.clone(), self.formatter.format(value)));
        }

        if aggregated.is_recurring() {
            facts.push(CardFact::new(
                "First occurrence",
                aggregated
                    .first_occurrence()
                    .format(OCCURRENCE_FORMAT)
                    .to_string(),
            ));
            facts.push(CardFact::new(
                "Last occurrence",
                aggregated
                    .last_occurrence()
                    .format(OCCURRENCE_FORMAT)
                    .to_string(),
            ));
        } else {
            facts.push(CardFact::new(
                "Occured on",
                aggregated
                    .first_occurrence()
                    .format(OCCURRENCE_FORMAT)
                    .to_string(),
            ));
        }

        facts
    }
}

impl std::fmt::Debug for CardRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardRenderer")
            .field("title", &self.title)
            .field("omit_properties_section", &self.omit_properties_section)
            .finish_non_exhaustive()
    }
}
