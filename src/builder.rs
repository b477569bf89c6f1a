//! Typestate builder for constructing [`Identifier`] instances.
//!
//! This module provides a builder that uses phantom types to enforce
//! at compile-time that the system name is set before the object type.

use std::marker::PhantomData;

use crate::base_uri::BaseUri;
use crate::error::{IdError, IdErrorKind};
use crate::identifier::Identifier;

/// Marker: No components set yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

/// Marker: System name has been set.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasSystemName;

/// Marker: System name and object type have been set, ready to build.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ready;

/// A typestate builder for constructing [`Identifier`] instances.
///
/// Unlike [`Identifier::new`], the builder can attach a base URI and a
/// local id.
///
/// # Type State
///
/// - [`Empty`]: Initial state
/// - [`HasSystemName`]: System name has been set
/// - [`Ready`]: Object type has been set, can call `build()`
///
/// # Examples
///
/// ```
/// use system_id::IdentifierBuilder;
///
/// let id = IdentifierBuilder::new()
///     .try_base_uri("https://host/base/")?
///     .system_name("LDAP")
///     .object_type("account")
///     .local_id("uid=jdoe,ou=people")
///     .build()?;
///
/// assert_eq!(
///     id.id().as_str(),
///     "https://host/base/system/LDAP/account/uid%3Djdoe%2Cou%3Dpeople"
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Compile-Time Safety
///
/// ```compile_fail
/// use system_id::IdentifierBuilder;
///
/// // Error: cannot call build() without an object type
/// let id = IdentifierBuilder::new().system_name("LDAP").build();
/// ```
#[derive(Debug, Clone)]
pub struct IdentifierBuilder<State = Empty> {
    base_uri: Option<BaseUri>,
    system_name: String,
    object_type: String,
    local_id: Option<String>,
    _state: PhantomData<State>,
}

impl IdentifierBuilder<Empty> {
    /// Creates a new builder in the initial state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            base_uri: None,
            system_name: String::new(),
            object_type: String::new(),
            local_id: None,
            _state: PhantomData,
        }
    }

    /// Sets the system name and advances to the [`HasSystemName`] state.
    #[must_use]
    pub fn system_name(self, system_name: impl Into<String>) -> IdentifierBuilder<HasSystemName> {
        IdentifierBuilder {
            base_uri: self.base_uri,
            system_name: system_name.into(),
            object_type: self.object_type,
            local_id: self.local_id,
            _state: PhantomData,
        }
    }
}

impl Default for IdentifierBuilder<Empty> {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierBuilder<HasSystemName> {
    /// Sets the object type and advances to the [`Ready`] state.
    #[must_use]
    pub fn object_type(self, object_type: impl Into<String>) -> IdentifierBuilder<Ready> {
        IdentifierBuilder {
            base_uri: self.base_uri,
            system_name: self.system_name,
            object_type: object_type.into(),
            local_id: self.local_id,
            _state: PhantomData,
        }
    }
}

impl IdentifierBuilder<Ready> {
    /// Builds the final [`Identifier`].
    ///
    /// # Errors
    ///
    /// Returns [`IdErrorKind::BlankArgument`] if the system name or object
    /// type is blank, or the local id is empty.
    ///
    /// Returns [`IdErrorKind::InvalidSyntax`] with
    /// [`SyntaxError::UnrootedBase`](crate::SyntaxError::UnrootedBase) if
    /// the base URI cannot root an identifier (see [`BaseUri::is_rooting`]).
    pub fn build(self) -> Result<Identifier, IdError> {
        if let Some(base) = &self.base_uri {
            base.check_rooting()
                .map_err(|e| IdError::new(base.as_str(), IdErrorKind::InvalidSyntax(e)))?;
        }
        Identifier::from_parts(
            self.base_uri,
            &self.system_name,
            &self.object_type,
            self.local_id.as_deref(),
        )
    }
}

/// Methods available in all states for optional components.
impl<State> IdentifierBuilder<State> {
    /// Sets the base URI.
    ///
    /// If called multiple times, the last value wins.
    #[must_use]
    pub fn base_uri(mut self, base_uri: BaseUri) -> Self {
        self.base_uri = Some(base_uri);
        self
    }

    /// Parses and sets the base URI from a string.
    ///
    /// # Errors
    ///
    /// Returns [`IdErrorKind::InvalidSyntax`] if the string is not a valid
    /// absolute URI, or is one that cannot root an identifier: it must end
    /// in `/`, carry no query or fragment and contain no `system/` segment.
    pub fn try_base_uri(self, s: &str) -> Result<Self, IdError> {
        let base_uri = BaseUri::parse(s)
            .and_then(|base| base.check_rooting().map(|()| base))
            .map_err(|e| IdError::new(s, IdErrorKind::InvalidSyntax(e)))?;
        Ok(self.base_uri(base_uri))
    }

    /// Sets the local id (raw, not percent-encoded).
    ///
    /// If called multiple times, the last value wins.
    #[must_use]
    pub fn local_id(mut self, local_id: impl Into<String>) -> Self {
        self.local_id = Some(local_id.into());
        self
    }
}
