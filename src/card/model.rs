use serde::{Deserialize, Serialize};

/// Notification card posted to the webhook endpoint.
///
/// Matches the connector card wire shape: camelCase keys, and empty fields
/// omitted from the body entirely rather than serialized as null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessageCard {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Hex color, no leading '#'.
    pub theme_color: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<CardSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardSection {
    pub activity_title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facts: Vec<CardFact>,
}

/// One name/value pair displayed within a card section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardFact {
    pub name: String,
    pub value: String,
}

impl CardFact {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
