//! This crate provides the data layer of a personal event/task planner.
//!
//! Users sign up and log in through a [`CredentialStore`](identity::CredentialStore), then manage their own
//! events and tasks through a [`RecordStore`](store::RecordStore). \
//! A `RecordStore` keeps the authoritative list of one user's records of one kind (events or tasks),
//! backed by a [`KeyValueStorage`](storage::KeyValueStorage) implementation. \
//! Every mutation is a full read-modify-write of the list: the updated list is persisted first,
//! and the in-memory copy is only replaced once the write succeeded.
//!
//! Records never leak across users: each list is stored under a key that encodes the owning user's id.

pub mod error;
pub use error::{AuthError, PersistenceError, StoreError};

pub mod storage;
pub use storage::{FileStorage, MemoryStorage};

mod user;
pub use user::{User, UserId};

pub mod record;
pub use record::RecordId;

mod event;
pub use event::{Event, EventFields};
mod task;
pub use task::{Task, TaskFields};

pub mod store;
pub use store::{EventStore, RecordStore, TaskStore};

pub mod identity;
pub use identity::CredentialStore;

pub mod config;
