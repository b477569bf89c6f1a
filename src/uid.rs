//! Unique identifier values supplied by connectors.

use std::fmt;

use uuid::Uuid;

use crate::encoding::encode_segment;
use crate::error::{IdError, IdErrorKind};

/// A value that identifies one object instance within a connected system.
///
/// Connectors assign these when an object is created; the identifier layer
/// only ever reads the textual value.
pub trait UniqueId {
    /// Returns the textual value of the unique identifier.
    fn uid_value(&self) -> &str;
}

impl UniqueId for str {
    fn uid_value(&self) -> &str {
        self
    }
}

impl UniqueId for String {
    fn uid_value(&self) -> &str {
        self
    }
}

/// A connector-assigned unique identifier.
///
/// # Examples
///
/// ```
/// use system_id::{Uid, UniqueId};
///
/// let uid = Uid::new("uid=jdoe,ou=people");
/// assert_eq!(uid.uid_value(), "uid=jdoe,ou=people");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Uid(String);

impl Uid {
    /// Creates a unique identifier from its textual value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the textual value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl UniqueId for Uid {
    fn uid_value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Uid {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Uid {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<Uuid> for Uid {
    fn from(value: Uuid) -> Self {
        Self(value.hyphenated().to_string())
    }
}

/// Percent-encodes a unique identifier for embedding in a path segment.
///
/// # Errors
///
/// Returns [`IdErrorKind::NullArgument`] if `uid` is `None` and
/// [`IdErrorKind::BlankArgument`] if its value is empty or whitespace-only.
///
/// # Examples
///
/// ```
/// use system_id::{Uid, escape_uid};
///
/// let escaped = escape_uid(Some(&Uid::new("http://openidm/managed/user/1"))).unwrap();
/// assert_eq!(escaped, "http%3A%2F%2Fopenidm%2Fmanaged%2Fuser%2F1");
///
/// assert!(escape_uid::<Uid>(None).is_err());
/// assert!(escape_uid(Some("   ")).is_err());
/// ```
pub fn escape_uid<U: UniqueId + ?Sized>(uid: Option<&U>) -> Result<String, IdError> {
    let uid = uid.ok_or_else(|| {
        IdError::new(String::new(), IdErrorKind::NullArgument { argument: "uid" })
    })?;
    let value = uid.uid_value();
    if value.trim().is_empty() {
        return Err(IdError::new(
            value,
            IdErrorKind::BlankArgument { argument: "uid" },
        ));
    }
    Ok(encode_segment(value))
}
