//! Scenarios exercising signup, login, session resumption and logout.

use corkboard::storage::KeyValueStorage;
use corkboard::{AuthError, CredentialStore, MemoryStorage};

fn open_empty() -> CredentialStore<MemoryStorage> {
    CredentialStore::open(MemoryStorage::new()).unwrap()
}

#[test]
fn signup_then_login_roundtrip() {
    let mut identity = open_empty();

    let user = identity.signup("someone@example.com", "a long password").unwrap();
    assert_eq!(user.email(), "someone@example.com");
    assert_eq!(identity.current_user(), Some(&user));

    identity.logout().unwrap();
    assert_eq!(identity.current_user(), None);

    let back = identity.login("someone@example.com", "a long password").unwrap();
    assert_eq!(back.id(), user.id());
    assert_eq!(identity.current_user(), Some(&back));
}

#[test]
fn login_rejects_wrong_password_and_unknown_email() {
    let mut identity = open_empty();
    identity.signup("someone@example.com", "a long password").unwrap();
    identity.logout().unwrap();

    assert!(matches!(
        identity.login("someone@example.com", "not the password"),
        Err(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        identity.login("nobody@example.com", "a long password"),
        Err(AuthError::InvalidCredentials)
    ));
    assert_eq!(identity.current_user(), None);
}

#[test]
fn email_is_normalized_and_matched_case_insensitively() {
    let mut identity = open_empty();

    let user = identity.signup("  Someone@Example.COM ", "a long password").unwrap();
    assert_eq!(user.email(), "someone@example.com");

    identity.logout().unwrap();
    let back = identity.login("SOMEONE@example.com", "a long password").unwrap();
    assert_eq!(back.id(), user.id());
}

#[test]
fn signup_validates_inputs() {
    let mut identity = open_empty();

    assert!(matches!(
        identity.signup("not-an-email", "a long password"),
        Err(AuthError::Validation(_))
    ));
    assert!(matches!(
        identity.signup("someone@example.com", "short"),
        Err(AuthError::Validation(_))
    ));

    identity.signup("someone@example.com", "a long password").unwrap();
    assert!(matches!(
        identity.signup("someone@example.com", "another password"),
        Err(AuthError::EmailAlreadyRegistered)
    ));
}

#[test]
fn passwords_are_never_stored_in_plaintext() {
    let mut identity = open_empty();
    identity.signup("someone@example.com", "extremely secret phrase").unwrap();

    let table = identity.storage().get("users").unwrap().unwrap();
    assert!(!table.contains("extremely secret phrase"));
    let session = identity.storage().get("session").unwrap().unwrap();
    assert!(!session.contains("extremely secret phrase"));
}

#[test]
fn session_survives_reopening_the_store() {
    let dir = std::env::temp_dir().join("corkboard-identity-resume");
    let _ = std::fs::remove_dir_all(&dir);
    let storage = corkboard::FileStorage::new(&dir).unwrap();

    let mut identity = CredentialStore::open(storage.clone()).unwrap();
    let user = identity.signup("someone@example.com", "a long password").unwrap();

    // A fresh store over the same directory resumes the session
    let resumed = CredentialStore::open(storage.clone()).unwrap();
    assert_eq!(resumed.current_user().map(|u| u.id()), Some(user.id()));

    identity.logout().unwrap();
    let after_logout = CredentialStore::open(storage).unwrap();
    assert_eq!(after_logout.current_user(), None);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn user_ids_are_stored_as_plain_strings() {
    let mut identity = open_empty();
    let user = identity.signup("someone@example.com", "a long password").unwrap();

    let session = identity.storage().get("session").unwrap().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&session).unwrap();
    assert_eq!(parsed["id"].as_str(), Some(user.id().as_str()));

    let table = identity.storage().get("users").unwrap().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&table).unwrap();
    assert_eq!(parsed[0]["user"]["id"].as_str(), Some(user.id().as_str()));
}

#[test]
fn logout_keeps_the_user_table() {
    let mut identity = open_empty();
    identity.signup("someone@example.com", "a long password").unwrap();
    identity.logout().unwrap();

    assert!(identity.storage().get("users").unwrap().is_some());
    assert!(identity.storage().get("session").unwrap().is_none());
}
