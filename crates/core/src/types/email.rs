//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty after trimming.
    #[error("email cannot be empty")]
    Empty,
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// There is no `.` after the @ symbol.
    #[error("email must contain a '.' after the @ symbol")]
    MissingDomainSeparator,
}

/// An email address.
///
/// Validation is deliberately permissive: the trimmed input must contain an
/// `@` and a `.` somewhere after it. Anything stricter (RFC 5322 grammar,
/// length caps, non-empty local part) is not checked.
///
/// ## Examples
///
/// ```
/// use user_directory_core::Email;
///
/// assert!(Email::parse("user@example.com").is_ok());
/// assert!(Email::parse("  a@b.c  ").is_ok());
///
/// assert!(Email::parse("").is_err());              // empty
/// assert!(Email::parse("no-at-symbol").is_err());  // missing @
/// assert!(Email::parse("first.last@host").is_err()); // no '.' after @
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parse an `Email` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input:
    /// - Is empty
    /// - Does not contain an @ symbol
    /// - Has no `.` after the first @ symbol
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        let (_, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;
        if !domain.contains('.') {
            return Err(EmailError::MissingDomainSeparator);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against a raw address using the store's case policy.
    ///
    /// The stored value is compared exactly as stored; only ASCII case
    /// folding is applied when `case_insensitive` is set.
    #[must_use]
    pub fn matches(&self, other: &str, case_insensitive: bool) -> bool {
        if case_insensitive {
            self.0.eq_ignore_ascii_case(other)
        } else {
            self.0 == other
        }
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
