//! Parser and canonical URI builder for connector system identifiers.
//!
//! This crate implements parsing, validation and canonicalization of the
//! identifiers that address objects managed by pluggable back-end
//! connectors (directory servers, databases, other provisioning systems).
//!
//! # Overview
//!
//! An identifier names a connected system, an object type within that
//! system and optionally one instance of that type:
//!
//! ```text
//! [base-uri]system/<system-name>/<object-type>[/<local-id>][/]
//! ```
//!
//! Segments are percent-encoded in the textual form and stored decoded.
//!
//! # Quick Start
//!
//! ```rust
//! use system_id::{Identifier, Uid};
//!
//! // Parse an identifier
//! let id = Identifier::parse("system/LDAP/account/uid%3Djdoe").unwrap();
//!
//! // Access components
//! assert_eq!(id.system_name(), "LDAP");
//! assert_eq!(id.object_type(), "account");
//! assert_eq!(id.local_id(), Some("uid=jdoe"));
//!
//! // Canonical URIs
//! assert_eq!(id.container_uri().as_str(), "system/LDAP/account/");
//! assert_eq!(id.id().as_str(), "system/LDAP/account/uid%3Djdoe");
//!
//! // Instance URI for a newly assigned unique id
//! let uri = id.resolve_local_id(Some(&Uid::new("uid=jsmith")));
//! assert_eq!(uri.as_str(), "system/LDAP/account/uid%3Djsmith");
//! ```
//!
//! # Base URIs
//!
//! Text before `system/` must be an absolute URI; canonical URIs are then
//! resolved against it:
//!
//! ```rust
//! use system_id::Identifier;
//!
//! let id = Identifier::parse("https://idm.example.com/openidm/system/LDAP/account").unwrap();
//! assert_eq!(
//!     id.container_uri().as_str(),
//!     "https://idm.example.com/openidm/system/LDAP/account/"
//! );
//!
//! assert!(Identifier::parse("not-a-url/system/LDAP/account").is_err());
//! ```
//!
//! # Grammar Specification
//!
//! The accepted textual form is defined in `grammar.abnf` at the crate
//! root (RFC 5234 ABNF).

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod base_uri;
mod builder;
mod constants;
mod encoding;
mod error;
mod identifier;
#[cfg(kani)]
mod kani_impls;
mod options;
pub mod prelude;
mod resource_uri;
mod uid;

pub use base_uri::BaseUri;
pub use builder::{Empty, HasSystemName, IdentifierBuilder, Ready};
pub use constants::{LOCAL_ID_SEPARATOR, MARKER_WORD, MAX_SEGMENTS, MIN_SEGMENTS, SYSTEM_MARKER};
pub use encoding::encode_segment;
pub use error::{IdError, IdErrorKind, SyntaxError};
pub use identifier::Identifier;
pub use options::{MarkerSearch, ParseOptions};
pub use resource_uri::ResourceUri;
pub use uid::{Uid, UniqueId, escape_uid};
