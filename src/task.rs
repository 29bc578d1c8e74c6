//! To-do tasks

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::record::{normalize_optional, require_non_empty, Record, RecordId};

/// The caller-provided fields of a task, as entered in a form.
///
/// Unlike events, a due date is optional.
#[derive(Clone, Debug, Default)]
pub struct TaskFields {
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// A to-do task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: RecordId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "dueDate", default, skip_serializing_if = "Option::is_none")]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    completed: bool,
}

impl Task {
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Flip the completion flag
    pub fn toggle_completion(&mut self) {
        self.completed = !self.completed;
    }
}

impl Record for Task {
    const KIND: &'static str = "tasks";

    type Fields = TaskFields;

    fn create(fields: TaskFields) -> Result<Self, StoreError> {
        require_non_empty(&fields.name, "name")?;
        Ok(Self {
            id: RecordId::random(),
            name: fields.name,
            description: normalize_optional(fields.description),
            due_date: fields.due_date,
            completed: false,
        })
    }

    /// Replaces the task's fields. The completion flag is not part of the form,
    /// it is only changed through [`Task::toggle_completion`]
    fn apply(&mut self, fields: TaskFields) -> Result<(), StoreError> {
        require_non_empty(&fields.name, "name")?;
        self.name = fields.name;
        self.description = normalize_optional(fields.description);
        self.due_date = fields.due_date;
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
