//! Local identity provider.
//!
//! A [`CredentialStore`] keeps a table of registered users and the currently active session
//! in the same key-value storage the record stores use. \
//! Passwords are never stored: each user gets a random salt, and only
//! `sha256(salt + password)` is written to the table.
//!
//! Validation (email shape, password length) happens here rather than in the caller,
//! so both the signup and login paths get the same checks.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::AuthError;
use crate::storage::KeyValueStorage;
use crate::user::User;

/// The key the registered-users table is stored under
const USERS_KEY: &str = "users";
/// The key the active session (a serialized [`User`]) is stored under
const SESSION_KEY: &str = "session";

const MIN_PASSWORD_LEN: usize = 8;

/// One row of the registered-users table
#[derive(Clone, Debug, Serialize, Deserialize)]
struct StoredUser {
    user: User,
    salt: String,
    password_hash: String,
}

/// A credential store backed by durable key-value storage.
///
/// Signup and login establish a session that survives restarts: the active user is
/// persisted under its own key and picked up again by [`CredentialStore::open`].
/// Logout clears the session but never deletes user data.
#[derive(Debug)]
pub struct CredentialStore<S: KeyValueStorage> {
    storage: S,
    current: Option<User>,
}

impl<S: KeyValueStorage> CredentialStore<S> {
    /// Open a credential store, resuming any persisted session.
    ///
    /// An unparseable session value is discarded (and logged), not an error
    pub fn open(storage: S) -> Result<Self, AuthError> {
        let current = match storage.get(SESSION_KEY)? {
            None => None,
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    log::warn!("Unable to parse the stored session, discarding it: {}", err);
                    None
                }
            },
        };
        Ok(Self { storage, current })
    }

    /// The currently logged-in user, if any
    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Returns the underlying storage backend.
    ///
    /// Apart from tests, there are very few (if any) reasons to access it directly
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Register a new user and log them in.
    ///
    /// The email is normalized to lowercase. Fails with [`AuthError::EmailAlreadyRegistered`]
    /// if the email is already in the table
    pub fn signup(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = validate_email(email)?;
        validate_password(password)?;

        let mut users = self.users()?;
        if users.iter().any(|u| u.user.email() == email) {
            return Err(AuthError::EmailAlreadyRegistered);
        }

        let salt = uuid::Uuid::new_v4().to_hyphenated().to_string();
        let password_hash = hash_password(&salt, password);
        let user = User::new(email);

        users.push(StoredUser {
            user: user.clone(),
            salt,
            password_hash,
        });
        self.save_users(&users)?;
        self.set_session(user.clone())?;

        log::debug!("Registered user {}", user.id());
        Ok(user)
    }

    /// Log a user in.
    ///
    /// An unknown email and a wrong password both fail with [`AuthError::InvalidCredentials`]
    pub fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = email.trim().to_lowercase();
        let users = self.users()?;

        let stored = users
            .iter()
            .find(|u| u.user.email() == email)
            .ok_or(AuthError::InvalidCredentials)?;
        if hash_password(&stored.salt, password) != stored.password_hash {
            return Err(AuthError::InvalidCredentials);
        }

        let user = stored.user.clone();
        self.set_session(user.clone())?;

        log::debug!("User {} logged in", user.id());
        Ok(user)
    }

    /// Clear the active session. The user table and all record data stay in storage
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.storage.remove(SESSION_KEY)?;
        if let Some(user) = self.current.take() {
            log::debug!("User {} logged out", user.id());
        }
        Ok(())
    }

    fn users(&self) -> Result<Vec<StoredUser>, AuthError> {
        let users = match self.storage.get(USERS_KEY)? {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(users) => users,
                Err(err) => {
                    log::warn!("Unable to parse the stored user table, starting from an empty one: {}", err);
                    Vec::new()
                }
            },
        };
        Ok(users)
    }

    fn save_users(&mut self, users: &[StoredUser]) -> Result<(), AuthError> {
        let serialized = serde_json::to_string(users)
            .map_err(|source| crate::error::PersistenceError::Serialize {
                key: USERS_KEY.to_string(),
                source,
            })?;
        self.storage.set(USERS_KEY, &serialized)?;
        Ok(())
    }

    fn set_session(&mut self, user: User) -> Result<(), AuthError> {
        let serialized = serde_json::to_string(&user)
            .map_err(|source| crate::error::PersistenceError::Serialize {
                key: SESSION_KEY.to_string(),
                source,
            })?;
        self.storage.set(SESSION_KEY, &serialized)?;
        self.current = Some(user);
        Ok(())
    }
}

/// Checks the email looks like `local@domain.tld` and returns it normalized to lowercase
fn validate_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(AuthError::Validation("a valid email address is required".to_string()));
    }
    Ok(email)
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!(
            "the password must be at least {} characters long",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

fn hash_password(salt: &str, password: &str) -> String {
    use std::fmt::Write;

    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();

    let mut output = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(output, "{:02x}", byte);
    }
    output
}
