// Copyright 2025 the Blockwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable property records.
//!
//! This module provides [`PropRecord`], an immutable mapping from property
//! key to value, [`PropsBuilder`] for constructing records, and
//! [`PropValue`] for the shared, type-erased values records store.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::key::{Prop, PropId};

/// A shared, type-erased property value.
///
/// Values are reference-counted: cloning a `PropValue` (or a record holding
/// one) shares the underlying allocation instead of copying it, which keeps
/// record merging cheap.
#[derive(Clone)]
pub struct PropValue {
    inner: Rc<dyn Any>,
}

impl PropValue {
    /// Wraps a concrete value.
    #[must_use]
    pub fn new<T: 'static>(value: T) -> Self {
        Self {
            inner: Rc::new(value),
        }
    }

    /// Returns `true` if the contained value is of type `T`.
    #[must_use]
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Attempts to downcast to a reference of type `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropValue").finish_non_exhaustive()
    }
}

/// Internal storage for a record.
#[derive(Debug, Default)]
struct RecordData {
    /// Sorted by [`PropId`] for binary search lookup.
    entries: Vec<(PropId, PropValue)>,
}

/// An immutable mapping from property key to value.
///
/// Records are created once (by a caller, or by merging other records) and
/// never mutated. Internally a record wraps an `Rc`, so cloning is cheap and
/// merged records share their values with their sources.
///
/// # Example
///
/// ```rust
/// use blockwork_props::{PropSpace, PropsBuilder};
///
/// let mut space = PropSpace::new();
/// let size = space.register::<u32>("size");
/// let label = space.register::<&str>("label");
///
/// let defaults = PropsBuilder::new().set(size, 14_u32).build();
/// let caller = PropsBuilder::new().set(label, "ok").set(size, 16_u32).build();
///
/// // Right-hand side wins per key.
/// let resolved = defaults.merged_with(&caller);
/// assert_eq!(resolved.get(size), Some(&16));
/// assert_eq!(resolved.get(label), Some(&"ok"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PropRecord {
    inner: Rc<RecordData>,
}

impl PropRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if this record has no entries.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Returns the number of entries in this record.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// Gets the value for a key, if present and of the key's type.
    #[must_use]
    pub fn get<T: 'static>(&self, prop: Prop<T>) -> Option<&T> {
        self.inner
            .entries
            .binary_search_by_key(&prop.id(), |(id, _)| *id)
            .ok()
            .and_then(|idx| self.inner.entries[idx].1.downcast_ref())
    }

    /// Returns `true` if this record has a value for the key.
    #[must_use]
    pub fn contains<T>(&self, prop: Prop<T>) -> bool {
        self.inner
            .entries
            .binary_search_by_key(&prop.id(), |(id, _)| *id)
            .is_ok()
    }

    /// Returns an iterator over the property ids set in this record.
    pub fn keys(&self) -> impl Iterator<Item = PropId> + '_ {
        self.inner.entries.iter().map(|(id, _)| *id)
    }

    /// Merges `overlay` over this record, producing a new record.
    ///
    /// Entries from `overlay` win on key collision. Values are shared, not
    /// cloned, and when either side is empty the other is returned as-is
    /// (an `Rc` clone).
    #[must_use]
    pub fn merged_with(&self, overlay: &Self) -> Self {
        if self.is_empty() {
            return overlay.clone();
        }
        if overlay.is_empty() {
            return self.clone();
        }

        let lhs = &self.inner.entries;
        let rhs = &overlay.inner.entries;
        let mut entries = Vec::with_capacity(lhs.len() + rhs.len());
        let (mut i, mut j) = (0, 0);
        while i < lhs.len() && j < rhs.len() {
            match lhs[i].0.cmp(&rhs[j].0) {
                core::cmp::Ordering::Less => {
                    entries.push(lhs[i].clone());
                    i += 1;
                }
                core::cmp::Ordering::Greater => {
                    entries.push(rhs[j].clone());
                    j += 1;
                }
                core::cmp::Ordering::Equal => {
                    entries.push(rhs[j].clone());
                    i += 1;
                    j += 1;
                }
            }
        }
        entries.extend_from_slice(&lhs[i..]);
        entries.extend_from_slice(&rhs[j..]);

        Self {
            inner: Rc::new(RecordData { entries }),
        }
    }
}

/// Builder for constructing [`PropRecord`] instances.
///
/// # Example
///
/// ```rust
/// use blockwork_props::{PropSpace, PropsBuilder};
///
/// let mut space = PropSpace::new();
/// let width = space.register::<f64>("width");
///
/// let props = PropsBuilder::new().set(width, 100.0).build();
/// assert_eq!(props.get(width), Some(&100.0));
/// ```
#[derive(Debug, Default)]
pub struct PropsBuilder {
    entries: Vec<(PropId, PropValue)>,
}

impl PropsBuilder {
    /// Creates a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value for a key. A previously set value for the same key is
    /// replaced.
    #[must_use]
    pub fn set<T: 'static>(mut self, prop: Prop<T>, value: T) -> Self {
        let id = prop.id();
        let value = PropValue::new(value);
        match self.entries.binary_search_by_key(&id, |(pid, _)| *pid) {
            Ok(idx) => self.entries[idx].1 = value,
            Err(idx) => self.entries.insert(idx, (id, value)),
        }
        self
    }

    /// Builds the record.
    #[must_use]
    pub fn build(self) -> PropRecord {
        PropRecord {
            inner: Rc::new(RecordData {
                entries: self.entries,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::PropSpace;
    use alloc::string::String;

    fn setup() -> (PropSpace, Prop<f64>, Prop<&'static str>) {
        let mut space = PropSpace::new();
        let width = space.register("width");
        let label = space.register("label");
        (space, width, label)
    }

    #[test]
    fn empty_record() {
        let record = PropRecord::new();
        assert!(record.is_empty());
        assert_eq!(record.len(), 0);
    }

    #[test]
    fn set_and_get() {
        let (_, width, label) = setup();
        let record = PropsBuilder::new().set(width, 10.0).set(label, "x").build();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get(width), Some(&10.0));
        assert_eq!(record.get(label), Some(&"x"));
    }

    #[test]
    fn set_replaces() {
        let (_, width, _) = setup();
        let record = PropsBuilder::new().set(width, 1.0).set(width, 2.0).build();
        assert_eq!(record.len(), 1);
        assert_eq!(record.get(width), Some(&2.0));
    }

    #[test]
    fn contains() {
        let (_, width, label) = setup();
        let record = PropsBuilder::new().set(width, 1.0).build();
        assert!(record.contains(width));
        assert!(!record.contains(label));
    }

    #[test]
    fn wrong_type_returns_none() {
        let (_, width, _) = setup();
        let record = PropsBuilder::new().set(width, 1.0).build();
        // Same id, wrong phantom type.
        let bogus: Prop<String> = Prop::from_id(width.id());
        assert_eq!(record.get(bogus), None);
    }

    #[test]
    fn merge_overlay_wins() {
        let (_, width, label) = setup();
        let lhs = PropsBuilder::new().set(width, 1.0).set(label, "a").build();
        let rhs = PropsBuilder::new().set(width, 2.0).build();

        let merged = lhs.merged_with(&rhs);
        assert_eq!(merged.get(width), Some(&2.0));
        assert_eq!(merged.get(label), Some(&"a"));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merge_with_empty_shares_storage() {
        let (_, width, _) = setup();
        let record = PropsBuilder::new().set(width, 1.0).build();
        let empty = PropRecord::new();

        let merged = record.merged_with(&empty);
        assert!(Rc::ptr_eq(&merged.inner, &record.inner));

        let merged = empty.merged_with(&record);
        assert!(Rc::ptr_eq(&merged.inner, &record.inner));
    }

    #[test]
    fn merge_shares_values() {
        let mut space = PropSpace::new();
        let text = space.register::<String>("text");
        let flag = space.register::<bool>("flag");

        let lhs = PropsBuilder::new()
            .set(text, String::from("shared"))
            .build();
        let rhs = PropsBuilder::new().set(flag, true).build();

        let merged = lhs.merged_with(&rhs);
        assert!(core::ptr::eq(
            merged.get(text).unwrap(),
            lhs.get(text).unwrap()
        ));
    }

    #[test]
    fn keys_are_sorted() {
        let (_, width, label) = setup();
        let record = PropsBuilder::new().set(label, "x").set(width, 1.0).build();
        let ids: Vec<_> = record.keys().collect();
        assert_eq!(ids, alloc::vec![width.id(), label.id()]);
    }
}
