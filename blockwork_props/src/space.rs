// Copyright 2025 the Blockwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property name space.
//!
//! This module provides [`PropSpace`], which allocates property ids from
//! names and answers name lookups for diagnostics.

use alloc::boxed::Box;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::key::{Prop, PropId};

/// Allocates property keys and remembers their names.
///
/// Properties are registered once, at startup, by the application that owns
/// the component definitions. Registration hands back a typed [`Prop<T>`]
/// key; the space itself only keeps the name table.
///
/// # Example
///
/// ```rust
/// use blockwork_props::PropSpace;
///
/// let mut space = PropSpace::new();
/// let primary = space.register::<bool>("primary");
///
/// assert_eq!(space.name(primary.id()), Some("primary"));
/// assert_eq!(space.lookup("primary"), Some(primary.id()));
/// ```
#[derive(Debug, Default)]
pub struct PropSpace {
    names: Vec<Box<str>>,
    by_name: HashMap<Box<str>, PropId>,
}

impl PropSpace {
    /// Creates a new empty space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a property and returns its typed key.
    ///
    /// # Panics
    ///
    /// Panics if a property with the same name is already registered, or if
    /// more than 65,536 properties are registered.
    pub fn register<T: 'static>(&mut self, name: &str) -> Prop<T> {
        assert!(
            !self.by_name.contains_key(name),
            "property '{name}' is already registered"
        );
        assert!(
            self.names.len() < usize::from(u16::MAX),
            "too many properties registered (max {})",
            u16::MAX
        );

        #[expect(clippy::cast_possible_truncation, reason = "checked above")]
        let id = PropId::new(self.names.len() as u16);
        self.names.push(name.into());
        self.by_name.insert(name.into(), id);
        Prop::from_id(id)
    }

    /// Returns the name a property was registered under.
    #[must_use]
    pub fn name(&self, id: PropId) -> Option<&str> {
        self.names.get(usize::from(id.index())).map(|n| &**n)
    }

    /// Returns the id registered under `name`, if any.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<PropId> {
        self.by_name.get(name).copied()
    }

    /// Returns the number of registered properties.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no properties are registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_allocates_sequential_ids() {
        let mut space = PropSpace::new();
        let a = space.register::<bool>("a");
        let b = space.register::<bool>("b");
        assert_eq!(a.id().index(), 0);
        assert_eq!(b.id().index(), 1);
        assert_eq!(space.len(), 2);
    }

    #[test]
    fn name_round_trip() {
        let mut space = PropSpace::new();
        let size = space.register::<u32>("size");
        assert_eq!(space.name(size.id()), Some("size"));
        assert_eq!(space.lookup("size"), Some(size.id()));
        assert_eq!(space.lookup("missing"), None);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn duplicate_name_panics() {
        let mut space = PropSpace::new();
        let _ = space.register::<bool>("a");
        let _ = space.register::<u32>("a");
    }
}
