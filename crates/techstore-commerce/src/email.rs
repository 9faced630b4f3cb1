//! Email address validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing an [`Email`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input contains whitespace.
    #[error("email cannot contain whitespace")]
    Whitespace,
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The input contains more than one @ symbol.
    #[error("email must contain exactly one @ symbol")]
    MultipleAtSymbols,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain part (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
    /// The domain has no dot with text on both sides of it.
    #[error("email domain must contain a dot")]
    MissingDomainDot,
}

/// An email address with a local part and a dotted domain.
///
/// ## Constraints
///
/// - No whitespace anywhere
/// - Exactly one @ symbol, with a non-empty local part before it
/// - The domain contains a `.` that has at least one character on each side
///
/// ## Examples
///
/// ```
/// use techstore_commerce::Email;
///
/// assert!(Email::parse("a@b.co").is_ok());
/// assert!(Email::parse("user.name+tag@domain.co.uk").is_ok());
///
/// assert!(Email::parse("").is_err());
/// assert!(Email::parse("a@b").is_err());
/// assert!(Email::parse("a b@c.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "String", try_from = "String")]
pub struct Email(String);

impl Email {
    /// Parse an `Email` from a string.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.chars().any(is_form_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;

        if domain.contains('@') {
            return Err(EmailError::MultipleAtSymbols);
        }

        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }

        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }

        let dotted = domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
        if !dotted {
            return Err(EmailError::MissingDomainDot);
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the local part of the email (before the @).
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or("")
    }

    /// Returns the domain part of the email (after the @).
    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or("")
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

/// The whitespace set browsers use for `\s` in form patterns: Unicode
/// `White_Space` without NEL (U+0085), plus the byte order mark (U+FEFF).
fn is_form_whitespace(c: char) -> bool {
    match c {
        '\u{85}' => false,
        '\u{feff}' => true,
        c => c.is_whitespace(),
    }
}

/// Whether `s` looks like an email address.
pub fn is_valid_email(s: &str) -> bool {
    Email::parse(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_simple_address() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("user+tag@sub.example.com"));
        assert!(is_valid_email("a@b.c."));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(!is_valid_email(""));
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
    }

    #[test]
    fn test_rejects_undotted_domain() {
        assert!(!is_valid_email("a@b"));
        assert_eq!(Email::parse("a@b"), Err(EmailError::MissingDomainDot));
        assert_eq!(Email::parse("a@.co"), Err(EmailError::MissingDomainDot));
        assert_eq!(Email::parse("a@co."), Err(EmailError::MissingDomainDot));
    }

    #[test]
    fn test_rejects_whitespace() {
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@c.com "));
        assert_eq!(Email::parse("a\t@c.com"), Err(EmailError::Whitespace));
        assert_eq!(Email::parse("a\u{a0}@c.com"), Err(EmailError::Whitespace));
        assert_eq!(Email::parse("a\u{feff}@b.co"), Err(EmailError::Whitespace));
        assert!(is_valid_email("a\u{85}@b.co"));
    }

    #[test]
    fn test_at_symbol_rules() {
        assert_eq!(Email::parse("abc.com"), Err(EmailError::MissingAtSymbol));
        assert_eq!(Email::parse("a@b@c.com"), Err(EmailError::MultipleAtSymbols));
        assert_eq!(Email::parse("@c.com"), Err(EmailError::EmptyLocalPart));
        assert_eq!(Email::parse("a@"), Err(EmailError::EmptyDomain));
    }

    #[test]
    fn test_parts() {
        let email = Email::parse("jane@techstore.io").unwrap();
        assert_eq!(email.local_part(), "jane");
        assert_eq!(email.domain(), "techstore.io");
        assert_eq!(email.to_string(), "jane@techstore.io");
    }

    #[test]
    fn test_deserialize_validates() {
        let email: Email = serde_json::from_str(r#""jane@techstore.io""#).unwrap();
        assert_eq!(email.domain(), "techstore.io");
        assert_eq!(serde_json::to_string(&email).unwrap(), r#""jane@techstore.io""#);

        assert!(serde_json::from_str::<Email>(r#""not an email""#).is_err());
        assert!(serde_json::from_str::<Email>(r#""a@b""#).is_err());
    }
}
