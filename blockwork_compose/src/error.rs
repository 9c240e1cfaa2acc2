// Copyright 2025 the Blockwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for composition and rendering.
//!
//! Composition-time validation failures ([`InvalidComposition`]) are
//! reported by [`with_mods`](crate::with_mods), never at render time.
//! Render-time failures are reported as [`RenderError`]. All failures are
//! synchronous and local; nothing is retried or recovered internally.

use alloc::boxed::Box;
use core::fmt;

/// An overridable operation on a composed component.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// The rendered tag name.
    Tag,
    /// The rendered attribute map.
    Attrs,
    /// The rendered child sequence.
    Content,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tag => "tag",
            Self::Attrs => "attrs",
            Self::Content => "content",
        };
        f.write_str(name)
    }
}

/// Error returned by [`with_mods`](crate::with_mods) when the supplied
/// descriptors cannot form a composition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidComposition {
    /// The base argument is a modifier descriptor.
    BaseIsModifier {
        /// Name of the offending descriptor.
        name: Box<str>,
    },
    /// The base descriptor's authoring chain contains a modifier.
    BaseLineageHasModifier {
        /// Name of the base descriptor.
        base: Box<str>,
        /// Name of the modifier ancestor.
        ancestor: Box<str>,
    },
    /// An entry in the modifier list is a block descriptor.
    ModifierIsBlock {
        /// Name of the offending descriptor.
        name: Box<str>,
    },
}

impl fmt::Display for InvalidComposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseIsModifier { name } => {
                write!(f, "base `{name}` is a modifier, expected a block")
            }
            Self::BaseLineageHasModifier { base, ancestor } => {
                write!(
                    f,
                    "base `{base}` is built on modifier `{ancestor}`, expected a block lineage"
                )
            }
            Self::ModifierIsBlock { name } => {
                write!(f, "modifier list entry `{name}` is a block, expected a modifier")
            }
        }
    }
}

impl core::error::Error for InvalidComposition {}

/// Error raised when an activation predicate fails during render.
///
/// Wraps the predicate's own failure; the original error is available via
/// [`core::error::Error::source`].
#[derive(Debug)]
pub struct PredicateError {
    modifier: Box<str>,
    source: Box<dyn core::error::Error>,
}

impl PredicateError {
    pub(crate) fn new(modifier: &str, source: Box<dyn core::error::Error>) -> Self {
        Self {
            modifier: modifier.into(),
            source,
        }
    }

    /// Returns the name of the modifier whose predicate failed.
    #[must_use]
    pub fn modifier(&self) -> &str {
        &self.modifier
    }
}

impl fmt::Display for PredicateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "activation predicate of modifier `{}` failed: {}",
            self.modifier, self.source
        )
    }
}

impl core::error::Error for PredicateError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Error raised when an operation delegates past the bottom of the composed
/// chain and no terminal default is declared.
///
/// Attribute and content operations always have a terminal default (an empty
/// map, the supplied children), so in practice this reports a composed chain
/// in which no unit declared a tag default. That is an authoring error in the
/// descriptors, not a property-dependent condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnresolvedDelegation {
    /// The operation that could not be resolved.
    pub operation: Operation,
    /// Name of the base descriptor of the composition.
    pub block: Box<str>,
}

impl fmt::Display for UnresolvedDelegation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "operation `{}` on block `{}` delegated past the composed chain with no declared default",
            self.operation, self.block
        )
    }
}

impl core::error::Error for UnresolvedDelegation {}

/// Error returned by [`ComposedComponent::render`](crate::ComposedComponent::render).
#[derive(Debug)]
pub enum RenderError {
    /// An activation predicate failed.
    Predicate(PredicateError),
    /// An override delegated with nothing beneath it.
    Delegation(UnresolvedDelegation),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predicate(e) => e.fmt(f),
            Self::Delegation(e) => e.fmt(f),
        }
    }
}

impl core::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Predicate(e) => Some(e),
            Self::Delegation(e) => Some(e),
        }
    }
}

impl From<PredicateError> for RenderError {
    fn from(e: PredicateError) -> Self {
        Self::Predicate(e)
    }
}

impl From<UnresolvedDelegation> for RenderError {
    fn from(e: UnresolvedDelegation) -> Self {
        Self::Delegation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn invalid_composition_display() {
        let e = InvalidComposition::BaseIsModifier { name: "M".into() };
        assert_eq!(format!("{e}"), "base `M` is a modifier, expected a block");
    }

    #[test]
    fn unresolved_delegation_display() {
        let e = UnresolvedDelegation {
            operation: Operation::Tag,
            block: "Button".into(),
        };
        let text = format!("{e}");
        assert!(text.contains("`tag`"), "got: {text}");
        assert!(text.contains("`Button`"), "got: {text}");
    }

    #[test]
    fn predicate_error_preserves_source() {
        use core::error::Error as _;

        #[derive(Debug)]
        struct Boom;
        impl fmt::Display for Boom {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("boom")
            }
        }
        impl core::error::Error for Boom {}

        let e = PredicateError::new("Block_m", Box::new(Boom));
        assert_eq!(e.modifier(), "Block_m");
        assert!(e.source().is_some());
        assert!(format!("{e}").contains("boom"));
    }
}
