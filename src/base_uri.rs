//! Absolute URI prefix preceding the marker token.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::constants::SYSTEM_MARKER;
use crate::error::SyntaxError;
use crate::options::MarkerSearch;

/// A validated absolute URI that precedes `system/` in an identifier.
///
/// The URI must be hierarchical so that `system/` can be resolved against
/// it. The resolved marker root is computed once, at parse time.
///
/// # Examples
///
/// ```
/// use system_id::BaseUri;
///
/// let base = BaseUri::parse("https://host/base/").unwrap();
/// assert_eq!(base.as_str(), "https://host/base/");
/// assert_eq!(base.marker_root().as_str(), "https://host/base/system/");
///
/// assert!(BaseUri::parse("not-a-url/").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseUri {
    url: Url,
    marker_root: Url,
}

impl BaseUri {
    /// Parses a base URI.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::InvalidPrefix`] if the input is not an absolute
    /// URI or cannot be used as a base for relative resolution.
    pub fn parse(input: &str) -> Result<Self, SyntaxError> {
        let invalid = |cause| SyntaxError::InvalidPrefix {
            prefix: input.to_string(),
            cause,
        };

        let url = Url::parse(input).map_err(|e| invalid(Some(e)))?;
        if url.cannot_be_a_base() {
            return Err(invalid(None));
        }
        let marker_root = url.join(SYSTEM_MARKER).map_err(|e| invalid(Some(e)))?;

        Ok(Self { url, marker_root })
    }

    /// Returns the base URI as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Returns the underlying URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.url
    }

    /// Returns the base resolved with `system/`.
    #[must_use]
    pub const fn marker_root(&self) -> &Url {
        &self.marker_root
    }

    /// Returns true if the marker root is this base followed by `system/`,
    /// and that appended marker is the first one a default parse finds.
    ///
    /// Only then does an identifier's canonical URI parse back to the same
    /// base.
    ///
    /// # Examples
    ///
    /// ```
    /// use system_id::BaseUri;
    ///
    /// assert!(BaseUri::parse("https://host/base/").unwrap().is_rooting());
    /// assert!(!BaseUri::parse("https://host/openidm").unwrap().is_rooting());
    /// assert!(!BaseUri::parse("https://host/system/").unwrap().is_rooting());
    /// ```
    #[must_use]
    pub fn is_rooting(&self) -> bool {
        let base = self.url.as_str();
        let root = self.marker_root.as_str();
        root.strip_prefix(base) == Some(SYSTEM_MARKER)
            && MarkerSearch::SegmentBoundary.find(root) == Some(base.len())
    }

    pub(crate) fn check_rooting(&self) -> Result<(), SyntaxError> {
        if self.is_rooting() {
            Ok(())
        } else {
            Err(SyntaxError::UnrootedBase {
                base: self.as_str().to_string(),
            })
        }
    }
}

impl fmt::Display for BaseUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

impl FromStr for BaseUri {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for BaseUri {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BaseUri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BaseUri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
