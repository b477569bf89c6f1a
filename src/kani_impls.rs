//! Kani Arbitrary implementations and proof harnesses for property verification.
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::{Identifier, IdentifierBuilder, Uid, escape_uid};

/// Mix of unreserved and reserved characters, space included
const NAME_CHARS: &[u8] = b"aZ09-_.~ /:+%?#=";

/// Generate a name character
fn arbitrary_name_char() -> char {
    let idx: usize = kani::any();
    let idx = idx % NAME_CHARS.len();
    NAME_CHARS[idx] as char
}

/// Generate a 1-4 char name that is not blank
fn arbitrary_name() -> String {
    let len: usize = kani::any();
    let len = 1 + (len % 4);
    let s: String = (0..len).map(|_| arbitrary_name_char()).collect();
    kani::assume(!s.trim().is_empty());
    s
}

impl kani::Arbitrary for Identifier {
    fn any() -> Self {
        let has_local_id: bool = kani::any();
        let builder = IdentifierBuilder::new()
            .system_name(arbitrary_name())
            .object_type(arbitrary_name());
        let builder = if has_local_id {
            builder.local_id(arbitrary_name())
        } else {
            builder
        };
        builder.build().expect("valid identifier by construction")
    }
}

// ============================================================================
// Kani Proof Harnesses
// ============================================================================

/// Proof: Parsing the canonical id yields the same identifier
#[kani::proof]
#[kani::unwind(10)]
fn proof_id_roundtrip() {
    let id: Identifier = kani::any();
    let reparsed = Identifier::parse(id.id().as_str()).expect("canonical id should parse");
    assert_eq!(reparsed, id);
}

/// Proof: The container URI always ends with a slash
#[kani::proof]
#[kani::unwind(10)]
fn proof_container_is_directory() {
    let id: Identifier = kani::any();
    assert!(id.container_uri().is_container());
}

/// Proof: Escaped values never contain path delimiters
#[kani::proof]
#[kani::unwind(10)]
fn proof_escape_has_no_delimiters() {
    let uid = Uid::new(arbitrary_name());
    let escaped = escape_uid(Some(&uid)).expect("non-blank by construction");
    assert!(!escaped.contains('/'));
    assert!(!escaped.contains('?'));
    assert!(!escaped.contains('#'));
}
