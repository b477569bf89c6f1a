//! Error types for system identifier parsing and construction.

use std::fmt;

use crate::constants::{MAX_SEGMENTS, MIN_SEGMENTS, SYSTEM_MARKER};

/// Errors that can occur when parsing or constructing an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdError {
    /// The input that was rejected
    pub input: String,
    /// The specific error that occurred
    pub kind: IdErrorKind,
}

impl IdError {
    pub(crate) fn new(input: impl Into<String>, kind: IdErrorKind) -> Self {
        Self {
            input: input.into(),
            kind,
        }
    }

    /// Returns true if this is an internal encoding fault rather than a
    /// validation failure the caller is expected to handle.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self.kind, IdErrorKind::InternalEncoding { .. })
    }

    /// Returns the syntax error, if this is one.
    #[must_use]
    pub const fn syntax(&self) -> Option<&SyntaxError> {
        match &self.kind {
            IdErrorKind::InvalidSyntax(e) => Some(e),
            _ => None,
        }
    }
}

/// Specific error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdErrorKind {
    /// A required argument is empty or whitespace-only
    BlankArgument {
        /// Name of the argument
        argument: &'static str,
    },
    /// A required value is absent
    NullArgument {
        /// Name of the argument
        argument: &'static str,
    },
    /// The textual form is not a valid identifier
    InvalidSyntax(SyntaxError),
    /// A percent-encoded segment did not decode to UTF-8
    InternalEncoding {
        /// What went wrong
        reason: String,
    },
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IdErrorKind::BlankArgument { argument } => {
                write!(f, "argument '{argument}' must not be blank")
            }
            IdErrorKind::NullArgument { argument } => {
                write!(f, "argument '{argument}' must be present")
            }
            IdErrorKind::InvalidSyntax(e) => {
                write!(f, "invalid identifier syntax of '{}': {e}", self.input)
            }
            IdErrorKind::InternalEncoding { reason } => {
                write!(f, "internal encoding fault on '{}': {reason}", self.input)
            }
        }
    }
}

impl std::error::Error for IdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            IdErrorKind::InvalidSyntax(e) => Some(e),
            _ => None,
        }
    }
}

/// Structural problems in the textual form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// The marker token was not found
    MissingMarker,
    /// The text before the marker is not a usable absolute URI
    InvalidPrefix {
        /// The rejected prefix
        prefix: String,
        /// The underlying URL parse failure, if any
        cause: Option<url::ParseError>,
    },
    /// Wrong number of segments from the marker onward
    SegmentCount {
        /// Segment count found, marker included
        actual: usize,
    },
    /// A segment decoded to an empty or blank value
    BlankSegment {
        /// Name of the component
        component: &'static str,
    },
    /// A `%` in a segment is not followed by two hex digits
    MalformedEscape {
        /// Name of the component
        component: &'static str,
    },
    /// A base URI whose `system/` root does not sit directly below it
    ///
    /// Raised for bases that are not directory-shaped (no trailing `/`, or
    /// carrying a query or fragment) and for bases that already contain a
    /// `system/` segment. Identifiers built on them would not parse back
    /// from their canonical URI.
    UnrootedBase {
        /// The rejected base URI
        base: String,
    },
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMarker => write!(f, "identifier must contain '{SYSTEM_MARKER}'"),
            Self::InvalidPrefix { prefix, cause } => {
                write!(
                    f,
                    "prefix '{prefix}' before '{SYSTEM_MARKER}' must be empty or a valid absolute URI"
                )?;
                match cause {
                    Some(e) => write!(f, " ({e})"),
                    None => write!(f, " (URI cannot be used as a base)"),
                }
            }
            Self::SegmentCount { actual } => write!(
                f,
                "found {actual} segments from '{SYSTEM_MARKER}' onward, expected {MIN_SEGMENTS} to {MAX_SEGMENTS}"
            ),
            Self::BlankSegment { component } => {
                write!(f, "{component} segment cannot be blank")
            }
            Self::MalformedEscape { component } => write!(
                f,
                "{component} segment has a '%' not followed by two hex digits"
            ),
            Self::UnrootedBase { base } => write!(
                f,
                "base URI '{base}' must end in '/' and must not contain a '{SYSTEM_MARKER}' segment"
            ),
        }
    }
}

impl std::error::Error for SyntaxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPrefix { cause: Some(e), .. } => Some(e),
            _ => None,
        }
    }
}
