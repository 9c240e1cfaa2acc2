// Copyright 2025 the Blockwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property key types.
//!
//! This module provides [`PropId`] for runtime property identification and
//! [`Prop<T>`] for type-safe property keys.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

/// A runtime property identifier.
///
/// A compact handle (u16) that uniquely identifies a property within a
/// [`PropSpace`](crate::PropSpace). Records index their entries by this id,
/// keeping per-entry overhead small.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropId(u16);

impl PropId {
    /// Creates a property id from a raw index.
    ///
    /// Ids are normally allocated by [`PropSpace::register`](crate::PropSpace::register)
    /// rather than constructed directly.
    #[must_use]
    #[inline]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the raw index of this id.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u16 {
        self.0
    }
}

impl fmt::Display for PropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropId({})", self.0)
    }
}

/// A typed property key.
///
/// Wraps a [`PropId`] with a phantom value type so that record access is
/// checked at compile time: a `Prop<bool>` can only read and write `bool`
/// values.
///
/// `Prop<T>` is two bytes, the same size as its id.
///
/// # Example
///
/// ```rust
/// use blockwork_props::{Prop, PropSpace, PropsBuilder};
///
/// let mut space = PropSpace::new();
/// let primary: Prop<bool> = space.register("primary");
///
/// let props = PropsBuilder::new().set(primary, true).build();
/// assert_eq!(props.get(primary), Some(&true));
/// ```
pub struct Prop<T> {
    id: PropId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Prop<T> {
    /// Creates a typed key from a property id.
    ///
    /// The caller must use the same value type the id was registered with;
    /// a mismatched type makes lookups return `None`.
    #[must_use]
    #[inline]
    pub const fn from_id(id: PropId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// Returns the underlying property id.
    #[must_use]
    #[inline]
    pub const fn id(self) -> PropId {
        self.id
    }
}

// Manual impls so `Prop<T>` does not require bounds on `T`.

impl<T> Copy for Prop<T> {}

impl<T> Clone for Prop<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Prop<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Prop<T> {}

impl<T> Hash for Prop<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Prop<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prop")
            .field("id", &self.id)
            .field("type", &core::any::type_name::<T>())
            .finish()
    }
}
