//! Redaction of user records before they leave the service boundary.
//!
//! Records are handled as `serde_json::Value` trees so that nested records,
//! lists of records and extension fields are all covered by the same walk.
//!
//! - Keys in [`SENSITIVE_FIELDS`] are always removed.
//! - Keys in [`PRIVATE_FIELDS`] are removed unless `include_private` is set.
//! - The flag applies unchanged at every depth.

use serde::Serialize;
use serde_json::{Map, Value};

/// Keys that never appear in any outbound payload.
pub const SENSITIVE_FIELDS: &[&str] = &["password", "password_hash", "token", "secret", "api_key"];

/// Keys that only appear when the caller asks for private fields.
pub const PRIVATE_FIELDS: &[&str] = &["created_ip", "last_login_ip", "internal_notes"];

/// A value that has been through [`redact`].
///
/// There is no other constructor, so anything typed `Redacted` is safe to
/// serialize into a response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Redacted(Value);

impl Redacted {
    /// Borrow the redacted tree.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume into the redacted tree.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Look up a top-level key of a redacted record.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// Redact a record tree.
///
/// An absent (`null`) top-level input yields an empty record. Scalars pass
/// through unchanged.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use user_directory_core::redact;
///
/// let user = json!({"id": 1, "email": "a@b.com", "password_hash": "x", "created_ip": "10.0.0.1"});
/// assert_eq!(redact(&user, false).into_value(), json!({"id": 1, "email": "a@b.com"}));
/// assert_eq!(
///     redact(&user, true).into_value(),
///     json!({"id": 1, "email": "a@b.com", "created_ip": "10.0.0.1"})
/// );
/// ```
#[must_use]
pub fn redact(value: &Value, include_private: bool) -> Redacted {
    match value {
        Value::Null => Redacted(Value::Object(Map::new())),
        other => Redacted(walk(other, include_private)),
    }
}

/// Redact every record in a list.
#[must_use]
pub fn redact_all(values: &[Value], include_private: bool) -> Vec<Redacted> {
    values
        .iter()
        .map(|value| redact(value, include_private))
        .collect()
}

fn walk(value: &Value, include_private: bool) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| is_visible(key, include_private))
                .map(|(key, inner)| (key.clone(), walk(inner, include_private)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| walk(item, include_private))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

fn is_visible(key: &str, include_private: bool) -> bool {
    if SENSITIVE_FIELDS.contains(&key) {
        return false;
    }
    include_private || !PRIVATE_FIELDS.contains(&key)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> Value {
        json!({
            "id": 1,
            "email": "test@example.com",
            "name": "Test User",
            "password_hash": "$argon2id$...",
            "created_ip": "192.168.1.1",
            "internal_notes": "VIP",
            "profile": {
                "bio": "hello",
                "api_key": "k-123",
                "last_login_ip": "10.0.0.2"
            },
            "sessions": [
                {"token": "abc", "device": "phone"},
                "plain",
                [{"secret": "s", "ok": true}]
            ]
        })
    }

    #[test]
    fn test_removes_sensitive_and_private_by_default() {
        let redacted = redact(&sample(), false).into_value();
        assert_eq!(
            redacted,
            json!({
                "id": 1,
                "email": "test@example.com",
                "name": "Test User",
                "profile": {"bio": "hello"},
                "sessions": [
                    {"device": "phone"},
                    "plain",
                    [{"ok": true}]
                ]
            })
        );
    }

    #[test]
    fn test_include_private_propagates_into_nested_records() {
        let redacted = redact(&sample(), true);
        assert_eq!(redacted.get("created_ip"), Some(&json!("192.168.1.1")));
        assert_eq!(redacted.get("internal_notes"), Some(&json!("VIP")));
        assert_eq!(
            redacted.get("profile"),
            Some(&json!({"bio": "hello", "last_login_ip": "10.0.0.2"}))
        );
        assert!(redacted.get("password_hash").is_none());
    }

    #[test]
    fn test_sensitive_fields_ignore_the_flag() {
        let record = json!({"password": "p", "secret": "s", "token": "t", "api_key": "k"});
        assert_eq!(redact(&record, true).into_value(), json!({}));
    }

    #[test]
    fn test_null_and_empty_yield_empty_record() {
        assert_eq!(redact(&Value::Null, false).into_value(), json!({}));
        assert_eq!(redact(&json!({}), false).into_value(), json!({}));
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(redact(&json!(42), false).into_value(), json!(42));
        assert_eq!(redact(&json!("x"), true).into_value(), json!("x"));
    }

    #[test]
    fn test_nested_null_is_kept() {
        let record = json!({"manager": null});
        assert_eq!(redact(&record, false).into_value(), record);
    }

    #[test]
    fn test_redaction_is_idempotent() {
        for include_private in [false, true] {
            let once = redact(&sample(), include_private);
            let twice = redact(once.as_value(), include_private);
            assert_eq!(once, twice);
        }
        let empty_once = redact(&Value::Null, false);
        assert_eq!(redact(empty_once.as_value(), false), empty_once);
    }

    #[test]
    fn test_redact_all() {
        let users = vec![
            json!({"id": 1, "password": "a"}),
            json!({"id": 2, "password": "b"}),
        ];
        let redacted: Vec<Value> = redact_all(&users, false)
            .into_iter()
            .map(Redacted::into_value)
            .collect();
        assert_eq!(redacted, vec![json!({"id": 1}), json!({"id": 2})]);
        assert!(redact_all(&[], false).is_empty());
    }
}
