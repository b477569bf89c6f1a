//! Canonical URI produced from an identifier.

use std::cmp::Ordering;
use std::fmt;

use url::Url;

/// A canonical container or instance URI.
///
/// Absolute when the identifier carried a base URI, otherwise a relative
/// reference starting with `system/`. Resolution follows RFC 3986, so an
/// escaped dot segment such as `%2E%2E` stays a literal segment.
///
/// # Examples
///
/// ```
/// use system_id::Identifier;
///
/// let id = Identifier::parse("system/LDAP/account").unwrap();
/// let uri = id.container_uri();
/// assert_eq!(uri.as_str(), "system/LDAP/account/");
/// assert!(!uri.is_absolute());
/// assert!(uri.is_container());
///
/// let id = Identifier::parse("https://host/base/system/LDAP/account/42").unwrap();
/// let uri = id.id();
/// assert_eq!(uri.as_str(), "https://host/base/system/LDAP/account/42");
/// assert!(uri.is_absolute());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceUri {
    text: String,
    absolute: bool,
}

impl ResourceUri {
    pub(crate) fn absolute(root: &Url) -> Self {
        Self {
            text: root.as_str().to_string(),
            absolute: true,
        }
    }

    pub(crate) fn relative(root: &str) -> Self {
        Self {
            text: root.to_string(),
            absolute: false,
        }
    }

    /// Returns the URI as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns true if the URI is absolute.
    #[must_use]
    pub const fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Parses an absolute URI into a [`Url`].
    ///
    /// Returns `None` for relative URIs. Note that [`Url`] applies WHATWG
    /// normalization, which collapses escaped dot segments.
    #[must_use]
    pub fn to_url(&self) -> Option<Url> {
        if self.absolute {
            Url::parse(&self.text).ok()
        } else {
            None
        }
    }

    /// Returns true if the URI denotes a collection (ends with `/`).
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.text.ends_with('/')
    }

    /// Resolves an already-encoded segment against this URI.
    ///
    /// The segment must not contain `/`, `?`, `#` and must not be a dot
    /// segment, so resolution replaces everything after the last `/`.
    pub(crate) fn resolve(&self, encoded: &str) -> Self {
        let dir = self.text.rfind('/').map_or("", |i| &self.text[..=i]);
        Self {
            text: format!("{dir}{encoded}"),
            absolute: self.absolute,
        }
    }

    /// Consumes the URI and returns its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl AsRef<str> for ResourceUri {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl PartialOrd for ResourceUri {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ResourceUri {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ResourceUri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}
