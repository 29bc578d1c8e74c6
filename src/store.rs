//! Per-user record stores.
//!
//! A [`RecordStore`] owns the authoritative list of one user's records of one kind.
//! Both entity kinds (events and tasks) share the same store logic; only the field shape
//! differs, which is captured by the [`Record`](crate::record::Record) trait.
//!
//! The list is loaded from storage once, the first time an operation targets a user.
//! Every mutation then produces a new list, persists it in full, and only replaces the
//! in-memory list once the write succeeded. A failed write therefore never leaves the
//! in-memory list ahead of the stored one.

use crate::error::StoreError;
use crate::event::Event;
use crate::record::{storage_key, Record, RecordId};
use crate::storage::KeyValueStorage;
use crate::task::Task;
use crate::user::UserId;

/// A store of [`Event`]s
pub type EventStore<S> = RecordStore<Event, S>;
/// A store of [`Task`]s
pub type TaskStore<S> = RecordStore<Task, S>;

/// The list currently held in memory, and the user it belongs to
#[derive(Debug)]
struct ActiveList<R> {
    user_id: UserId,
    records: Vec<R>,
}

/// Maintains one user's list of records of kind `R`, backed by durable key-value storage
#[derive(Debug)]
pub struct RecordStore<R, S>
where
    R: Record,
    S: KeyValueStorage,
{
    storage: S,
    active: Option<ActiveList<R>>,
}

impl<R, S> RecordStore<R, S>
where
    R: Record,
    S: KeyValueStorage,
{
    /// Create a store on top of a storage backend
    pub fn new(storage: S) -> Self {
        Self { storage, active: None }
    }

    /// Returns the underlying storage backend.
    ///
    /// Apart from tests, there are very few (if any) reasons to access it directly
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the records of `user_id`, in insertion order.
    ///
    /// An absent or unparseable stored value yields an empty list, never an error.
    /// Only an actual storage read failure is surfaced.
    pub fn load(&mut self, user_id: &UserId) -> Result<Vec<R>, StoreError> {
        Ok(self.active_list(user_id)?.to_vec())
    }

    /// Validate `fields`, append a new record with a fresh id, and persist the updated list.
    ///
    /// Returns the created record
    pub fn add(&mut self, user_id: &UserId, fields: R::Fields) -> Result<R, StoreError> {
        let record = R::create(fields)?;

        let mut updated = self.active_list(user_id)?.to_vec();
        updated.push(record.clone());
        self.commit(user_id, updated)?;

        log::debug!("{}: added record {} for user {}", R::KIND, record.id(), user_id);
        Ok(record)
    }

    /// Replace the mutable fields of the record with this `id`, keeping its identity and
    /// its position in the list.
    ///
    /// Returns the updated record, or [`StoreError::NotFound`] if the id is absent
    /// (in which case nothing is changed, in memory or in storage)
    pub fn update(&mut self, user_id: &UserId, id: &RecordId, fields: R::Fields) -> Result<R, StoreError> {
        let mut updated = self.active_list(user_id)?.to_vec();
        let record = match updated.iter_mut().find(|r| r.id() == id) {
            None => return Err(StoreError::NotFound(id.clone())),
            Some(record) => {
                record.apply(fields)?;
                record.clone()
            }
        };
        self.commit(user_id, updated)?;

        log::debug!("{}: updated record {} for user {}", R::KIND, id, user_id);
        Ok(record)
    }

    /// Remove the record with this `id` if it is present.
    ///
    /// Removing an absent id is an idempotent no-op: it succeeds and does not rewrite storage
    pub fn remove(&mut self, user_id: &UserId, id: &RecordId) -> Result<(), StoreError> {
        let current = self.active_list(user_id)?;
        if !current.iter().any(|r| r.id() == id) {
            log::debug!("{}: remove of absent record {} is a no-op", R::KIND, id);
            return Ok(());
        }

        let updated: Vec<R> = current.iter().filter(|r| r.id() != id).cloned().collect();
        self.commit(user_id, updated)?;

        log::debug!("{}: removed record {} for user {}", R::KIND, id, user_id);
        Ok(())
    }

    /// Returns the records whose name or description contains `term`, case-insensitively.
    ///
    /// An empty `term` returns the full list. Order is the list order
    pub fn search(&mut self, user_id: &UserId, term: &str) -> Result<Vec<R>, StoreError> {
        let records = self.active_list(user_id)?;
        if term.is_empty() {
            return Ok(records.to_vec());
        }

        let term = term.to_lowercase();
        Ok(records
            .iter()
            .filter(|r| {
                r.name().to_lowercase().contains(&term)
                    || r.description()
                        .map(|d| d.to_lowercase().contains(&term))
                        .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    /// Drop the in-memory list without persisting anything.
    ///
    /// This is what a logout does: the stored data is untouched, only the
    /// active-session view is discarded
    pub fn forget_active_user(&mut self) {
        if let Some(active) = self.active.take() {
            log::debug!("{}: dropped in-memory list of user {}", R::KIND, active.user_id);
        }
    }

    /// Returns the in-memory list for `user_id`, loading it from storage first if the
    /// store currently holds no list or a different user's list
    fn active_list(&mut self, user_id: &UserId) -> Result<&[R], StoreError> {
        let needs_load = match &self.active {
            Some(active) => &active.user_id != user_id,
            None => true,
        };

        if needs_load {
            let key = storage_key::<R>(user_id);
            let records = match self.storage.get(&key)? {
                None => Vec::new(),
                Some(raw) => match serde_json::from_str(&raw) {
                    Ok(records) => records,
                    Err(err) => {
                        log::warn!("Unable to parse stored value for key {}, starting from an empty list: {}", key, err);
                        Vec::new()
                    }
                },
            };
            self.active = Some(ActiveList {
                user_id: user_id.clone(),
                records,
            });
        }

        Ok(&self.active.as_ref().unwrap(/* just set above */).records)
    }

    /// Persist `updated` as the full list for `user_id`, then make it the in-memory list.
    ///
    /// If the write fails, the in-memory list is left as it was, so it never gets ahead
    /// of the stored one
    fn commit(&mut self, user_id: &UserId, updated: Vec<R>) -> Result<(), StoreError> {
        let key = storage_key::<R>(user_id);
        let serialized = serde_json::to_string(&updated)
            .map_err(|source| crate::error::PersistenceError::Serialize { key: key.clone(), source })?;
        self.storage.set(&key, &serialized)?;

        self.active = Some(ActiveList {
            user_id: user_id.clone(),
            records: updated,
        });
        Ok(())
    }
}

impl<S> RecordStore<Task, S>
where
    S: KeyValueStorage,
{
    /// Flip the completion flag of the task with this `id` and persist the list.
    ///
    /// Returns the updated task, or [`StoreError::NotFound`] if the id is absent
    pub fn toggle_completion(&mut self, user_id: &UserId, id: &RecordId) -> Result<Task, StoreError> {
        let mut updated = self.active_list(user_id)?.to_vec();
        let task = match updated.iter_mut().find(|t| t.id() == id) {
            None => return Err(StoreError::NotFound(id.clone())),
            Some(task) => {
                task.toggle_completion();
                task.clone()
            }
        };
        self.commit(user_id, updated)?;
        Ok(task)
    }
}
