//! User domain types.
//!
//! These types represent validated domain objects. They never cross the
//! service boundary directly: outbound payloads are built with
//! [`User::to_record`] and then passed through the redaction transform.

use serde_json::{Map, Value};

use user_directory_core::{Email, PasswordCredential, UserId};

/// A directory user (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID, allocated by the store.
    pub id: UserId,
    /// User's email address, unique within the store.
    pub email: Email,
    /// Opaque credential produced by the password hasher.
    pub password: PasswordCredential,
    /// Display name, trimmed and non-empty.
    pub name: String,
    /// Address the registration request came from (private field).
    pub created_ip: Option<String>,
    /// Operator notes (private field).
    pub internal_notes: Option<String>,
}

/// Input for creating a user. The store assigns the ID.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password: PasswordCredential,
    pub name: String,
    pub created_ip: Option<String>,
    pub internal_notes: Option<String>,
}

impl NewUser {
    /// Attach the ID allocated by the store.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            email: self.email,
            password: self.password,
            name: self.name,
            created_ip: self.created_ip,
            internal_notes: self.internal_notes,
        }
    }
}

impl User {
    /// Build the full, unredacted record for this user.
    ///
    /// The result contains the `password_hash` key and any private fields
    /// that are set; it must go through `redact` before it is returned to a
    /// caller.
    #[must_use]
    pub fn to_record(&self) -> Value {
        let mut record = Map::new();
        record.insert("id".to_owned(), Value::from(self.id.as_i32()));
        record.insert("email".to_owned(), Value::from(self.email.as_str()));
        record.insert("name".to_owned(), Value::from(self.name.as_str()));
        record.insert(
            "password_hash".to_owned(),
            Value::from(self.password.expose()),
        );
        if let Some(ip) = &self.created_ip {
            record.insert("created_ip".to_owned(), Value::from(ip.as_str()));
        }
        if let Some(notes) = &self.internal_notes {
            record.insert("internal_notes".to_owned(), Value::from(notes.as_str()));
        }
        Value::Object(record)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use user_directory_core::redact;

    use super::*;

    fn user() -> User {
        NewUser {
            email: Email::parse("a@b.com").unwrap(),
            password: PasswordCredential::new("hash"),
            name: "A".to_owned(),
            created_ip: Some("10.0.0.1".to_owned()),
            internal_notes: None,
        }
        .into_user(UserId::new(2))
    }

    #[test]
    fn test_record_carries_every_field() {
        assert_eq!(
            user().to_record(),
            json!({
                "id": 2,
                "email": "a@b.com",
                "name": "A",
                "password_hash": "hash",
                "created_ip": "10.0.0.1"
            })
        );
    }

    #[test]
    fn test_redacted_record_is_public_view() {
        let redacted = redact(&user().to_record(), false);
        assert_eq!(
            redacted.into_value(),
            json!({"id": 2, "email": "a@b.com", "name": "A"})
        );
    }
}
