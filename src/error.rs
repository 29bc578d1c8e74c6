//! The errors surfaced by stores and the credential layer.
//!
//! Every failure is terminal for the operation that triggered it: there are no retries,
//! and a failed operation leaves both the in-memory list and the stored bytes unchanged.

use thiserror::Error;

use crate::record::RecordId;

/// A failure of the underlying key-value persistence layer
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("unable to read key {key:?}: {source}")]
    Read {
        key: String,
        source: std::io::Error,
    },

    #[error("unable to write key {key:?}: {source}")]
    Write {
        key: String,
        source: std::io::Error,
    },

    #[error("unable to remove key {key:?}: {source}")]
    Remove {
        key: String,
        source: std::io::Error,
    },

    #[error("unable to serialize value for key {key:?}: {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
}

/// An error returned by a [`RecordStore`](crate::store::RecordStore) operation
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field was empty at create/update time. The store rejects the operation
    /// rather than trusting the caller to have validated.
    #[error("{field} is required")]
    Validation { field: &'static str },

    /// The operation targeted a record id that is not in the current list
    #[error("no record with id {0}")]
    NotFound(RecordId),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// An error returned by the [`CredentialStore`](crate::identity::CredentialStore)
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("this email address is already registered")]
    EmailAlreadyRegistered,

    /// Unknown email and wrong password both map to this variant
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
