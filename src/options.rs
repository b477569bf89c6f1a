//! Parser configuration.

use crate::constants::SYSTEM_MARKER;

/// How the parser locates the `system/` marker token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MarkerSearch {
    /// First occurrence at the start of the input or directly after a `/`.
    ///
    /// `LDAPsystem/x/y` contains no marker under this policy.
    #[default]
    SegmentBoundary,
    /// First raw substring occurrence, wherever it falls.
    ///
    /// `https://host/basesystem/LDAP/account` then yields the base
    /// `https://host/base`.
    Substring,
}

impl MarkerSearch {
    /// Returns the byte offset of the marker token in `input`, if any.
    #[must_use]
    pub fn find(self, input: &str) -> Option<usize> {
        match self {
            Self::Substring => input.find(SYSTEM_MARKER),
            Self::SegmentBoundary => input
                .match_indices(SYSTEM_MARKER)
                .map(|(i, _)| i)
                .find(|&i| i == 0 || input[..i].ends_with('/')),
        }
    }
}

/// Configuration for [`Identifier::parse_with`](crate::Identifier::parse_with).
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Marker search policy.
    ///
    /// Default: [`MarkerSearch::SegmentBoundary`]
    pub marker_search: MarkerSearch,
}

impl ParseOptions {
    /// Creates options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options reproducing the historic substring search.
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            marker_search: MarkerSearch::Substring,
        }
    }

    /// Sets the marker search policy.
    #[must_use]
    pub const fn with_marker_search(mut self, marker_search: MarkerSearch) -> Self {
        self.marker_search = marker_search;
        self
    }
}
