//! Main system identifier type.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::base_uri::BaseUri;
use crate::constants::{LOCAL_ID_SEPARATOR, MARKER_WORD, SYSTEM_MARKER};
use crate::encoding::{decode_segment, encode_segment};
use crate::error::{IdError, IdErrorKind, SyntaxError};
use crate::options::{MarkerSearch, ParseOptions};
use crate::resource_uri::ResourceUri;
use crate::uid::UniqueId;

/// A parsed and validated identifier of objects in a connected system.
///
/// An identifier names a connected system, an object type within that
/// system and optionally one instance of that type.
///
/// # Structure
///
/// ```text
/// [base-uri]system/<system-name>/<object-type>[/<local-id>][/]
/// ```
///
/// # Examples
///
/// ```
/// use system_id::Identifier;
///
/// let id = Identifier::parse(
///     "system/Another+OpenIDM/account/http%3a%2f%2fopenidm%2fopenidm%2fmanaged%2fuser%2fead738c0",
/// )
/// .unwrap();
/// assert_eq!(id.system_name(), "Another+OpenIDM");
/// assert_eq!(id.object_type(), "account");
/// assert_eq!(id.local_id(), Some("http://openidm/openidm/managed/user/ead738c0"));
///
/// assert_eq!(
///     id.id().as_str(),
///     "system/Another%2BOpenIDM/account/http%3A%2F%2Fopenidm%2Fopenidm%2Fmanaged%2Fuser%2Fead738c0"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    base_uri: Option<BaseUri>,
    system_name: String,
    object_type: String,
    local_id: Option<String>,
}

impl Identifier {
    /// Creates an identifier for all objects of a type in a system.
    ///
    /// # Errors
    ///
    /// Returns [`IdErrorKind::BlankArgument`] if either argument is empty or
    /// whitespace-only.
    ///
    /// # Examples
    ///
    /// ```
    /// use system_id::Identifier;
    ///
    /// let id = Identifier::new("LDAP", "account").unwrap();
    /// assert_eq!(id.container_uri().as_str(), "system/LDAP/account/");
    ///
    /// assert!(Identifier::new(" ", "account").is_err());
    /// ```
    pub fn new(system_name: &str, object_type: &str) -> Result<Self, IdError> {
        Self::from_parts(None, system_name, object_type, None)
    }

    /// Parses an identifier using the default [`ParseOptions`].
    ///
    /// # Errors
    ///
    /// Returns `IdError` if:
    /// - The input is blank
    /// - The `system/` marker is missing
    /// - The text before the marker is not a valid absolute URI, or is not
    ///   directory-shaped (see [`BaseUri::is_rooting`])
    /// - The marker is not followed by a system name, an object type and at
    ///   most one local id
    /// - A segment decodes to a blank system name or object type, or the
    ///   local id segment is empty
    /// - A segment holds a `%` not followed by two hex digits
    pub fn parse(input: &str) -> Result<Self, IdError> {
        Self::parse_with(input, &ParseOptions::default())
    }

    /// Parses an identifier with explicit options.
    ///
    /// # Errors
    ///
    /// Same as [`Identifier::parse`], except that [`MarkerSearch::Substring`]
    /// accepts bases that are not directory-shaped.
    ///
    /// # Examples
    ///
    /// ```
    /// use system_id::{Identifier, ParseOptions};
    ///
    /// assert!(Identifier::parse("https://host/basesystem/LDAP/account").is_err());
    ///
    /// let id = Identifier::parse_with("https://host/basesystem/LDAP/account", &ParseOptions::legacy())
    ///     .unwrap();
    /// assert_eq!(id.base_uri().unwrap().as_str(), "https://host/base");
    /// ```
    pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Self, IdError> {
        trace!(input, "parsing system identifier");
        Self::parse_inner(input, options).map_err(|kind| {
            debug!(input, error = ?kind, "rejected system identifier");
            IdError::new(input, kind)
        })
    }

    pub(crate) fn from_parts(
        base_uri: Option<BaseUri>,
        system_name: &str,
        object_type: &str,
        local_id: Option<&str>,
    ) -> Result<Self, IdError> {
        if system_name.trim().is_empty() {
            return Err(IdError::new(
                system_name,
                IdErrorKind::BlankArgument {
                    argument: "systemName",
                },
            ));
        }
        if object_type.trim().is_empty() {
            return Err(IdError::new(
                object_type,
                IdErrorKind::BlankArgument {
                    argument: "objectType",
                },
            ));
        }
        if local_id.is_some_and(str::is_empty) {
            return Err(IdError::new(
                String::new(),
                IdErrorKind::BlankArgument { argument: "localId" },
            ));
        }

        Ok(Self {
            base_uri,
            system_name: system_name.to_string(),
            object_type: object_type.to_string(),
            local_id: local_id.map(str::to_string),
        })
    }

    /// Returns the base URI, if the identifier had one.
    #[must_use]
    pub const fn base_uri(&self) -> Option<&BaseUri> {
        self.base_uri.as_ref()
    }

    /// Returns the decoded system name.
    #[must_use]
    pub fn system_name(&self) -> &str {
        &self.system_name
    }

    /// Returns the decoded object type.
    #[must_use]
    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    /// Returns the decoded local id, if present.
    #[must_use]
    pub fn local_id(&self) -> Option<&str> {
        self.local_id.as_deref()
    }

    /// Returns true if the identifier denotes all objects of its type.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        self.local_id.is_none()
    }

    /// Returns the URI of all objects of this type in this system.
    ///
    /// Always ends with `/`.
    #[must_use]
    pub fn container_uri(&self) -> ResourceUri {
        let root = match &self.base_uri {
            Some(base) => ResourceUri::absolute(base.marker_root()),
            None => ResourceUri::relative(SYSTEM_MARKER),
        };
        root.resolve(&format!("{}/", encode_segment(&self.system_name)))
            .resolve(&format!("{}/", encode_segment(&self.object_type)))
    }

    /// Returns the canonical URI of this identifier.
    ///
    /// The container URI, resolved with the local id when one is present.
    #[must_use]
    pub fn id(&self) -> ResourceUri {
        self.resolve_encoded(self.local_id.as_deref())
    }

    /// Returns the instance URI for a freshly assigned unique id.
    ///
    /// The stored local id is ignored. With `None` this is the container
    /// URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use system_id::{Identifier, Uid};
    ///
    /// let id = Identifier::parse("system/LDAP/account/old").unwrap();
    ///
    /// let uri = id.resolve_local_id(Some(&Uid::new("cn=new user")));
    /// assert_eq!(uri.as_str(), "system/LDAP/account/cn%3Dnew%20user");
    ///
    /// let uri = id.resolve_local_id::<Uid>(None);
    /// assert_eq!(uri.as_str(), "system/LDAP/account/");
    /// ```
    #[must_use]
    pub fn resolve_local_id<U: UniqueId + ?Sized>(&self, uid: Option<&U>) -> ResourceUri {
        self.resolve_encoded(uid.map(UniqueId::uid_value))
    }

    /// Renders the human-readable form.
    ///
    /// Raw field values joined under the marker root, followed by `"/ "` and
    /// the raw local id when present. This is not a URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use system_id::Identifier;
    ///
    /// let id = Identifier::parse("system/LDAP/account/uid%3Djdoe").unwrap();
    /// assert_eq!(id.display_form(), "system/LDAP/account/ uid=jdoe");
    /// ```
    #[must_use]
    pub fn display_form(&self) -> String {
        let root = self
            .base_uri
            .as_ref()
            .map_or(SYSTEM_MARKER, |base| base.marker_root().as_str());
        let mut out = format!("{root}{}/{}", self.system_name, self.object_type);
        if let Some(local_id) = &self.local_id {
            out.push_str(LOCAL_ID_SEPARATOR);
            out.push_str(local_id);
        }
        out
    }

    fn resolve_encoded(&self, local: Option<&str>) -> ResourceUri {
        let container = self.container_uri();
        match local {
            Some(local) => container.resolve(&encode_segment(local)),
            None => container,
        }
    }

    fn parse_inner(input: &str, options: &ParseOptions) -> Result<Self, IdErrorKind> {
        if input.trim().is_empty() {
            return Err(IdErrorKind::BlankArgument { argument: "id" });
        }

        let index = options
            .marker_search
            .find(input)
            .ok_or(IdErrorKind::InvalidSyntax(SyntaxError::MissingMarker))?;

        let base_uri = if index == 0 {
            None
        } else {
            let base = BaseUri::parse(&input[..index]).map_err(IdErrorKind::InvalidSyntax)?;
            // Substring search keeps non-directory bases such as `https://host/base`.
            if options.marker_search == MarkerSearch::SegmentBoundary {
                base.check_rooting().map_err(IdErrorKind::InvalidSyntax)?;
            }
            Some(base)
        };

        let structured = &input[index..];
        let structured = structured.strip_suffix('/').unwrap_or(structured);
        let segments: Vec<&str> = structured.split('/').collect();
        debug_assert_eq!(segments.first(), Some(&MARKER_WORD));

        let (system_seg, type_seg, local_seg) = match segments.as_slice() {
            [_marker, system, object_type] => (*system, *object_type, None),
            [_marker, system, object_type, local] => (*system, *object_type, Some(*local)),
            other => {
                return Err(IdErrorKind::InvalidSyntax(SyntaxError::SegmentCount {
                    actual: other.len(),
                }));
            }
        };

        let system_name = Self::decode_required(system_seg, "systemName")?;
        let object_type = Self::decode_required(type_seg, "objectType")?;
        let local_id = match local_seg {
            Some("") => {
                return Err(IdErrorKind::InvalidSyntax(SyntaxError::BlankSegment {
                    component: "localId",
                }));
            }
            Some(seg) => Some(decode_segment(seg, "localId")?),
            None => None,
        };

        Ok(Self {
            base_uri,
            system_name,
            object_type,
            local_id,
        })
    }

    fn decode_required(segment: &str, component: &'static str) -> Result<String, IdErrorKind> {
        let decoded = decode_segment(segment, component)?;
        if decoded.trim().is_empty() {
            return Err(IdErrorKind::InvalidSyntax(SyntaxError::BlankSegment {
                component,
            }));
        }
        Ok(decoded)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_form())
    }
}

impl FromStr for Identifier {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = IdError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Identifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.id().as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uid::Uid;

    #[test]
    fn parse_collection() {
        let id = Identifier::parse("system/LDAP/account").unwrap();
        assert_eq!(id.system_name(), "LDAP");
        assert_eq!(id.object_type(), "account");
        assert_eq!(id.local_id(), None);
        assert!(id.base_uri().is_none());
        assert!(id.is_collection());
    }

    #[test]
    fn parse_trailing_slash_is_equivalent() {
        let a = Identifier::parse("system/LDAP/account").unwrap();
        let b = Identifier::parse("system/LDAP/account/").unwrap();
        assert_eq!(a, b);
        assert_eq!(b.local_id(), None);
    }

    #[test]
    fn parse_instance() {
        let id = Identifier::parse("system/LDAP/account/ead738c0-7641-11e0-a1f0-0800200c9a66")
            .unwrap();
        assert_eq!(id.local_id(), Some("ead738c0-7641-11e0-a1f0-0800200c9a66"));
        assert!(!id.is_collection());
    }

    #[test]
    fn parse_instance_with_trailing_slash() {
        let id = Identifier::parse("system/LDAP/account/42/").unwrap();
        assert_eq!(id.local_id(), Some("42"));
    }

    #[test]
    fn parse_encoded_segments() {
        let id = Identifier::parse(
            "system/Another+OpenIDM/account/http%3a%2f%2fopenidm%2fopenidm%2fmanaged%2fuser%2fead738c0",
        )
        .unwrap();
        assert_eq!(id.system_name(), "Another+OpenIDM");
        assert_eq!(id.object_type(), "account");
        assert_eq!(id.local_id(), Some("http://openidm/openidm/managed/user/ead738c0"));
    }

    #[test]
    fn parse_with_base_uri() {
        let id = Identifier::parse(
            "https://host/path/system/Another%2bOpenIDM/account/http%3a%2f%2fopenidm",
        )
        .unwrap();
        assert_eq!(id.base_uri().unwrap().as_str(), "https://host/path/");
        assert_eq!(id.system_name(), "Another+OpenIDM");
        assert_eq!(id.local_id(), Some("http://openidm"));
        assert_eq!(
            id.id().as_str(),
            "https://host/path/system/Another%2BOpenIDM/account/http%3A%2F%2Fopenidm"
        );
    }

    #[test]
    fn parse_base_uri_example() {
        let id = Identifier::parse("https://host/base/system/LDAP/account").unwrap();
        assert_eq!(id.base_uri().unwrap().as_str(), "https://host/base/");
    }

    #[test]
    fn parse_blank_fails() {
        for input in ["", "   "] {
            let err = Identifier::parse(input).unwrap_err();
            assert_eq!(err.kind, IdErrorKind::BlankArgument { argument: "id" });
        }
    }

    #[test]
    fn parse_missing_marker_fails() {
        let err = Identifier::parse("LDAP/account").unwrap_err();
        assert_eq!(err.syntax(), Some(&SyntaxError::MissingMarker));
    }

    #[test]
    fn parse_embedded_marker_fails_by_default() {
        let err = Identifier::parse("LDAPsystem/x/y").unwrap_err();
        assert_eq!(err.syntax(), Some(&SyntaxError::MissingMarker));
    }

    #[test]
    fn parse_leading_slash_fails() {
        let err = Identifier::parse("/system/LDAP/account").unwrap_err();
        assert!(matches!(
            err.syntax(),
            Some(SyntaxError::InvalidPrefix { prefix, .. }) if prefix == "/"
        ));
    }

    #[test]
    fn parse_invalid_prefix_fails() {
        let err = Identifier::parse("not-a-url/system/LDAP/account").unwrap_err();
        assert!(matches!(
            err.syntax(),
            Some(SyntaxError::InvalidPrefix { .. })
        ));
        assert!(err.to_string().contains("valid absolute URI"));
    }

    #[test]
    fn parse_segment_counts() {
        let cases = [
            ("system/", 1),
            ("system/account", 2),
            ("system/LDAP/account/42/extra", 5),
            ("system/a/b/c/d/e", 6),
        ];
        for (input, actual) in cases {
            let err = Identifier::parse(input).unwrap_err();
            assert_eq!(
                err.syntax(),
                Some(&SyntaxError::SegmentCount { actual }),
                "input: {input}"
            );
        }
    }

    #[test]
    fn parse_blank_segments_fail() {
        let err = Identifier::parse("system//account").unwrap_err();
        assert_eq!(
            err.syntax(),
            Some(&SyntaxError::BlankSegment {
                component: "systemName"
            })
        );

        let err = Identifier::parse("system/LDAP/%20").unwrap_err();
        assert_eq!(
            err.syntax(),
            Some(&SyntaxError::BlankSegment {
                component: "objectType"
            })
        );

        let err = Identifier::parse("system/LDAP/account//").unwrap_err();
        assert_eq!(
            err.syntax(),
            Some(&SyntaxError::BlankSegment { component: "localId" })
        );
    }

    #[test]
    fn parse_invalid_utf8_is_internal() {
        let err = Identifier::parse("system/LDAP/account/%FF").unwrap_err();
        assert!(err.is_internal());
    }

    #[test]
    fn parse_malformed_escapes_fail() {
        for (input, component) in [
            ("system/LDAP/account/a%zz", "localId"),
            ("system/LDAP/account/100%", "localId"),
            ("system/LDAP/account/%z/", "localId"),
            ("system/LD%GAP/account", "systemName"),
            ("system/LDAP/acc%/42", "objectType"),
        ] {
            let err = Identifier::parse(input).unwrap_err();
            assert_eq!(
                err.kind,
                IdErrorKind::InvalidSyntax(SyntaxError::MalformedEscape { component }),
                "input: {input}"
            );
            assert!(!err.is_internal());
        }
    }

    #[test]
    fn parse_escaped_percent_roundtrips() {
        let id = Identifier::parse("system/LDAP/account/100%25").unwrap();
        assert_eq!(id.local_id(), Some("100%"));
        assert_eq!(id.id().as_str(), "system/LDAP/account/100%25");
    }

    #[test]
    fn parse_base_with_query_fails() {
        let err = Identifier::parse("https://host/a/?x=/system/LDAP/account").unwrap_err();
        assert!(matches!(
            err.syntax(),
            Some(SyntaxError::UnrootedBase { .. })
        ));
    }

    #[test]
    fn new_rejects_blank() {
        let err = Identifier::new("", "account").unwrap_err();
        assert_eq!(
            err.kind,
            IdErrorKind::BlankArgument {
                argument: "systemName"
            }
        );

        let err = Identifier::new("LDAP", "\t").unwrap_err();
        assert_eq!(
            err.kind,
            IdErrorKind::BlankArgument {
                argument: "objectType"
            }
        );
    }

    #[test]
    fn container_uri_ends_with_slash() {
        let id = Identifier::parse("system/LDAP/account/42").unwrap();
        let uri = id.container_uri();
        assert_eq!(uri.as_str(), "system/LDAP/account/");
        assert!(uri.is_container());
    }

    #[test]
    fn id_without_local_id_is_container() {
        let id = Identifier::new("Another OpenIDM", "account").unwrap();
        assert_eq!(id.id(), id.container_uri());
        assert_eq!(id.id().as_str(), "system/Another%20OpenIDM/account/");
    }

    #[test]
    fn id_with_dot_local_id_appends() {
        let id = Identifier::parse("system/LDAP/account/%2E%2E").unwrap();
        assert_eq!(id.local_id(), Some(".."));
        assert_eq!(id.id().as_str(), "system/LDAP/account/%2E%2E");
    }

    #[test]
    fn resolve_local_id_ignores_stored_local_id() {
        let id = Identifier::parse("https://host/base/system/LDAP/account/old").unwrap();

        let uri = id.resolve_local_id(Some(&Uid::new("a/b")));
        assert_eq!(uri.as_str(), "https://host/base/system/LDAP/account/a%2Fb");

        let uri = id.resolve_local_id::<Uid>(None);
        assert_eq!(uri.as_str(), "https://host/base/system/LDAP/account/");
        assert_eq!(uri, id.container_uri());
    }

    #[test]
    fn display_form_uses_raw_values() {
        let id = Identifier::parse("system/Another%20OpenIDM/account").unwrap();
        assert_eq!(id.display_form(), "system/Another OpenIDM/account");
        assert_eq!(id.to_string(), id.display_form());
    }

    #[test]
    fn display_form_with_base_and_local_id() {
        let id = Identifier::parse("https://host/base/system/LDAP/account/a%2Fb").unwrap();
        assert_eq!(
            id.display_form(),
            "https://host/base/system/LDAP/account/ a/b"
        );
    }

    #[test]
    fn from_str_and_try_from() {
        let a: Identifier = "system/LDAP/account".parse().unwrap();
        let b = Identifier::try_from("system/LDAP/account/").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn identifier_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Identifier>();
        assert_send_sync::<ResourceUri>();
        assert_send_sync::<IdError>();
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let id = Identifier::parse("https://host/base/system/LDAP/account/a%2Fb").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"https://host/base/system/LDAP/account/a%2Fb\"");
        let back: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip_built_with_base() {
        let id = crate::IdentifierBuilder::new()
            .try_base_uri("https://host/openidm/")
            .unwrap()
            .system_name("LDAP")
            .object_type("account")
            .local_id("42")
            .build()
            .unwrap();
        let json = serde_json::to_string(&id).unwrap();
        let back: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
