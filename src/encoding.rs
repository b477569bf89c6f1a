//! Percent-encoding of identifier segments.

use crate::error::{IdErrorKind, SyntaxError};

/// Percent-encodes a raw value for use as a single path segment.
///
/// Every byte outside `A-Z a-z 0-9 - _ . ~` is escaped, so the result never
/// contains `/`, `?`, `#` or `%`-ambiguous text. Dot segments (`.`, `..`)
/// get their dots escaped so that relative resolution always appends.
///
/// # Examples
///
/// ```
/// use system_id::encode_segment;
///
/// assert_eq!(encode_segment("Another+OpenIDM"), "Another%2BOpenIDM");
/// assert_eq!(encode_segment("a/b c"), "a%2Fb%20c");
/// assert_eq!(encode_segment(".."), "%2E%2E");
/// ```
#[must_use]
pub fn encode_segment(raw: &str) -> String {
    let encoded = urlencoding::encode(raw);
    if encoded == "." || encoded == ".." {
        encoded.replace('.', "%2E")
    } else {
        encoded.into_owned()
    }
}

/// Percent-decodes a single segment.
///
/// `+` is kept as a literal plus sign. A `%` not followed by two hex digits
/// is a syntax error for `component`. Well-formed escapes that decode to
/// invalid UTF-8 are reported as an internal encoding fault.
pub(crate) fn decode_segment(
    segment: &str,
    component: &'static str,
) -> Result<String, IdErrorKind> {
    if !escapes_well_formed(segment) {
        return Err(IdErrorKind::InvalidSyntax(SyntaxError::MalformedEscape {
            component,
        }));
    }
    urlencoding::decode(segment)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| IdErrorKind::InternalEncoding {
            reason: format!("segment '{segment}' does not decode to UTF-8: {e}"),
        })
}

fn escapes_well_formed(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            match bytes.get(i + 1..i + 3) {
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
                _ => return false,
            }
        } else {
            i += 1;
        }
    }
    true
}
