//! Calendar events

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::record::{normalize_optional, require_non_empty, Record, RecordId};

/// The caller-provided fields of an event, as entered in a form
#[derive(Clone, Debug, Default)]
pub struct EventFields {
    pub name: String,
    /// The calendar date the event takes place on. Serialized as an ISO calendar date
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// A planned event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    id: RecordId,
    name: String,
    date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Event {
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Record for Event {
    const KIND: &'static str = "events";

    type Fields = EventFields;

    fn create(fields: EventFields) -> Result<Self, StoreError> {
        require_non_empty(&fields.name, "name")?;
        let date = fields.date.ok_or(StoreError::Validation { field: "date" })?;
        Ok(Self {
            id: RecordId::random(),
            name: fields.name,
            date,
            location: normalize_optional(fields.location),
            description: normalize_optional(fields.description),
        })
    }

    fn apply(&mut self, fields: EventFields) -> Result<(), StoreError> {
        require_non_empty(&fields.name, "name")?;
        let date = fields.date.ok_or(StoreError::Validation { field: "date" })?;
        self.name = fields.name;
        self.date = date;
        self.location = normalize_optional(fields.location);
        self.description = normalize_optional(fields.description);
        Ok(())
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
