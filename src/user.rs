//! Users and their identifiers

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A stable, unique identifier for a user.
///
/// It is referenced (never owned) by every record's storage key, so two users can never
/// see each other's records.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId {
    content: String,
}

impl UserId {
    /// Generate a random UserId
    pub fn random() -> Self {
        let random = uuid::Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for UserId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for UserId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// Used to support serde. Ids are stored as plain strings
impl Serialize for UserId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<UserId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let content = String::deserialize(deserializer)?;
        Ok(UserId { content })
    }
}

/// A registered user.
///
/// Created at signup and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: String,
}

impl User {
    /// Create a brand new User with a random id
    pub fn new(email: String) -> Self {
        Self {
            id: UserId::random(),
            email,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
