//! Vendor identity: the end-user key looked up in the vendor system.

use std::fmt;

/// Validation errors for [`Identity`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityValidationError {
    /// The identity was empty.
    #[error("identity must not be empty")]
    Empty,
}

/// Caller-supplied identity string.
///
/// The vendor owns identity semantics, so the only local rule is that the
/// value is non-empty. Whitespace and punctuation are passed through and
/// percent-encoded by the outbound adapter.
///
/// # Examples
/// ```
/// use engage_relay::domain::Identity;
///
/// let identity = Identity::new("jane@example.com").unwrap();
/// assert_eq!(identity.as_str(), "jane@example.com");
/// assert!(Identity::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Validate and wrap an identity.
    ///
    /// # Errors
    /// Returns [`IdentityValidationError::Empty`] for an empty string.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityValidationError> {
        let raw: String = value.into();
        if raw.is_empty() {
            return Err(IdentityValidationError::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the raw identity.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
