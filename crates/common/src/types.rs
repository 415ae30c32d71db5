use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a stored record.
///
/// Wraps a UUID to provide type safety and prevent mixing up record
/// keys with other UUID-based identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Creates a new random entity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an entity ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Returns the last four hex characters of the ID.
    ///
    /// Used as a short tag when a record has no display name.
    pub fn short_code(&self) -> String {
        let simple = self.0.simple().to_string();
        simple[simple.len() - 4..].to_string()
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for EntityId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<EntityId> for Uuid {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_new_creates_unique_ids() {
        let id1 = EntityId::new();
        let id2 = EntityId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn entity_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = EntityId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
    }

    #[test]
    fn entity_id_serialization_roundtrip() {
        let id = EntityId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn short_code_is_four_hex_chars() {
        let id = EntityId::from_uuid(Uuid::parse_str("c924e8da-5b59-42c2-a221-9ada102ec70e").unwrap());
        assert_eq!(id.short_code(), "c70e");
    }
}
