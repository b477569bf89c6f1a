//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use system_id::prelude::*;
//!
//! let id = Identifier::parse("system/LDAP/account").unwrap();
//! assert!(id.is_collection());
//! ```
//!
//! Builder state markers (`Empty`, `HasSystemName`, `Ready`) are
//! intentionally excluded as they are implementation details.

pub use crate::{
    // Core types
    BaseUri, Identifier, ResourceUri, Uid, UniqueId,
    // Builder and options
    IdentifierBuilder, MarkerSearch, ParseOptions,
    // Errors
    IdError, IdErrorKind, SyntaxError,
    // Functions
    encode_segment, escape_uid,
    // Constants
    SYSTEM_MARKER,
};
