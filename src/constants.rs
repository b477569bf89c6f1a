//! Constants for system identifier parsing.

/// The marker token that anchors the structured part of an identifier.
pub const SYSTEM_MARKER: &str = "system/";

/// The marker word, i.e. the first segment of the structured part.
pub const MARKER_WORD: &str = "system";

/// Minimum number of segments from the marker onward (marker, system, type).
pub const MIN_SEGMENTS: usize = 3;

/// Maximum number of segments from the marker onward (marker, system, type, local id).
pub const MAX_SEGMENTS: usize = 4;

/// Separator placed before the local id in the display form.
///
/// Not valid URI syntax.
pub const LOCAL_ID_SEPARATOR: &str = "/ ";
