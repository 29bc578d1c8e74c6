//! Common plumbing shared by events and tasks

use std::fmt::{Display, Formatter};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::StoreError;
use crate::user::UserId;

/// A unique identifier for a record, assigned at creation time and never reassigned
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordId {
    content: String,
}

impl RecordId {
    /// Generate a random RecordId
    pub fn random() -> Self {
        let random = uuid::Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<&str> for RecordId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// Used to support serde. Ids are stored as plain strings
impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<RecordId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let content = String::deserialize(deserializer)?;
        Ok(RecordId { content })
    }
}

/// One kind of record a [`RecordStore`](crate::store::RecordStore) can manage.
///
/// Events and tasks differ only in their field shape, so the store logic is written once
/// against this trait.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// The storage namespace for this kind. The per-user key is `<KIND>_<user id>`
    const KIND: &'static str;

    /// The caller-provided fields for create/update operations
    type Fields;

    /// Build a brand new record from caller-provided fields.
    /// This validates the fields and picks a new (random) record id.
    fn create(fields: Self::Fields) -> Result<Self, StoreError>;

    /// Replace the mutable fields of an existing record.
    /// This validates the fields; the id is preserved.
    fn apply(&mut self, fields: Self::Fields) -> Result<(), StoreError>;

    fn id(&self) -> &RecordId;
    fn name(&self) -> &str;
    fn description(&self) -> Option<&str>;
}

/// The key a user's list of records of this kind is stored under
pub fn storage_key<R: Record>(user_id: &UserId) -> String {
    format!("{}_{}", R::KIND, user_id)
}

/// Rejects empty or whitespace-only required fields
pub(crate) fn require_non_empty(value: &str, field: &'static str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation { field });
    }
    Ok(())
}

/// Normalizes optional text: empty or whitespace-only input becomes `None`
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    match value {
        Some(s) if s.trim().is_empty() => None,
        other => other,
    }
}
