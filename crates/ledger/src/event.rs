use std::collections::HashMap;

use chrono::{DateTime, Utc};
use common::Money;
use serde::{Deserialize, Serialize};

use crate::EntityId;

/// The kind of fact a history entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Birth,
    Sale,
    Medical,
    Reproduction,
    Feeding,
    Other,
}

impl EventKind {
    /// Returns the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Birth => "birth",
            EventKind::Sale => "sale",
            EventKind::Medical => "medical",
            EventKind::Reproduction => "reproduction",
            EventKind::Feeding => "feeding",
            EventKind::Other => "other",
        }
    }

    /// Parses a kind from its string name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "birth" => Some(EventKind::Birth),
            "sale" => Some(EventKind::Sale),
            "medical" => Some(EventKind::Medical),
            "reproduction" => Some(EventKind::Reproduction),
            "feeding" => Some(EventKind::Feeding),
            "other" => Some(EventKind::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable entry in the history ledger.
///
/// Describes a fact that occurred to an animal (or to the herd when
/// `animal_id` is None). Entries are never revised after appending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEvent {
    /// Unique identifier for this entry.
    pub id: EntityId,

    /// The animal this entry concerns, if any.
    pub animal_id: Option<EntityId>,

    /// The kind of fact recorded.
    pub kind: EventKind,

    /// Short human-readable title.
    pub title: String,

    /// Longer description of what happened.
    pub description: String,

    /// When the fact occurred.
    pub date: DateTime<Utc>,

    /// Cost associated with the fact, if any.
    pub cost: Option<Money>,

    /// Free-form metadata about the entry.
    pub metadata: HashMap<String, serde_json::Value>,

    /// Insertion sequence number, assigned by the ledger on append.
    #[serde(default)]
    pub seq: u64,
}

impl HistoryEvent {
    /// Creates a new history event builder.
    pub fn builder() -> HistoryEventBuilder {
        HistoryEventBuilder::default()
    }
}

/// Builder for constructing history events.
#[derive(Debug, Default)]
pub struct HistoryEventBuilder {
    id: Option<EntityId>,
    animal_id: Option<EntityId>,
    kind: Option<EventKind>,
    title: Option<String>,
    description: Option<String>,
    date: Option<DateTime<Utc>>,
    cost: Option<Money>,
    metadata: HashMap<String, serde_json::Value>,
}

impl HistoryEventBuilder {
    /// Sets the entry ID. If not set, a new ID will be generated.
    pub fn id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the subject animal.
    pub fn animal_id(mut self, id: EntityId) -> Self {
        self.animal_id = Some(id);
        self
    }

    /// Sets the event kind.
    pub fn kind(mut self, kind: EventKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the event date. If not set, the current time will be used.
    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the associated cost.
    pub fn cost(mut self, cost: Money) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Adds a metadata entry.
    pub fn metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Builds the history event.
    ///
    /// # Panics
    ///
    /// Panics if required fields (kind, title) are not set.
    pub fn build(self) -> HistoryEvent {
        HistoryEvent {
            id: self.id.unwrap_or_default(),
            animal_id: self.animal_id,
            kind: self.kind.expect("kind is required"),
            title: self.title.expect("title is required"),
            description: self.description.unwrap_or_default(),
            date: self.date.unwrap_or_else(Utc::now),
            cost: self.cost,
            metadata: self.metadata,
            seq: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_defaults() {
        let event = HistoryEvent::builder()
            .kind(EventKind::Sale)
            .title("Sale of swine #a1b2")
            .build();

        assert_eq!(event.kind, EventKind::Sale);
        assert!(event.animal_id.is_none());
        assert!(event.description.is_empty());
        assert!(event.cost.is_none());
        assert_eq!(event.seq, 0);
    }

    #[test]
    fn builder_keeps_explicit_fields() {
        let animal = EntityId::new();
        let date = "2024-03-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap();

        let event = HistoryEvent::builder()
            .animal_id(animal)
            .kind(EventKind::Medical)
            .title("Vaccination")
            .description("Newcastle vaccine")
            .date(date)
            .cost(Money::from_cents(2500))
            .metadata("veterinarian", serde_json::json!("Dr. Diallo"))
            .build();

        assert_eq!(event.animal_id, Some(animal));
        assert_eq!(event.date, date);
        assert_eq!(event.cost, Some(Money::from_cents(2500)));
        assert_eq!(
            event.metadata.get("veterinarian"),
            Some(&serde_json::json!("Dr. Diallo"))
        );
    }

    #[test]
    fn kind_string_roundtrip() {
        for kind in [
            EventKind::Birth,
            EventKind::Sale,
            EventKind::Medical,
            EventKind::Reproduction,
            EventKind::Feeding,
            EventKind::Other,
        ] {
            assert_eq!(EventKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(EventKind::parse("harvest"), None);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&EventKind::Reproduction).unwrap();
        assert_eq!(json, "\"reproduction\"");
    }

    #[test]
    fn event_serialization_roundtrip() {
        let event = HistoryEvent::builder()
            .kind(EventKind::Birth)
            .title("Birth")
            .description("5 live, 1 dead")
            .build();

        let json = serde_json::to_string(&event).unwrap();
        let back: HistoryEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, event.id);
        assert_eq!(back.kind, EventKind::Birth);
    }
}
