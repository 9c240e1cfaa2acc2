// Copyright 2025 the Blockwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendered-description types.
//!
//! A render produces a [`RenderedNode`]: the tag name, an attribute map, and
//! the child sequence. The rendering host turns this description into actual
//! markup, DOM, or native widgets; this crate stops at the description.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// A sorted attribute name → value mapping.
///
/// Attribute maps are small; entries are kept sorted by name and looked up
/// with binary search.
///
/// # Example
///
/// ```rust
/// use blockwork_compose::AttrMap;
///
/// let attrs = AttrMap::new()
///     .with("id", "the-id")
///     .with("role", "button");
///
/// assert_eq!(attrs.get("id"), Some("the-id"));
/// assert!(attrs.get("class").is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttrMap {
    entries: Vec<(Box<str>, Box<str>)>,
}

impl AttrMap {
    /// Creates an empty attribute map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if this map has no attributes.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of attributes.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gets an attribute value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .binary_search_by(|(n, _)| (**n).cmp(name))
            .ok()
            .map(|idx| &*self.entries[idx].1)
    }

    /// Returns `true` if an attribute with this name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .binary_search_by(|(n, _)| (**n).cmp(name))
            .is_ok()
    }

    /// Sets an attribute, replacing any previous value for the name.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.entries.binary_search_by(|(n, _)| (**n).cmp(name)) {
            Ok(idx) => self.entries[idx].1 = value.into(),
            Err(idx) => self.entries.insert(idx, (name.into(), value.into())),
        }
    }

    /// Sets an attribute, consuming and returning the map.
    #[must_use]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    /// Merges `overlay` over this map, producing a new map. Entries from
    /// `overlay` win on name collision.
    #[must_use]
    pub fn merged(&self, overlay: &Self) -> Self {
        if overlay.is_empty() {
            return self.clone();
        }
        let mut out = self.clone();
        for (name, value) in &overlay.entries {
            out.set(name, value);
        }
        out
    }

    /// Returns an iterator over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(n, v)| (&**n, &**v))
    }
}

/// One item in a child sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Child {
    /// A text run.
    Text(String),
    /// A nested rendered node.
    Node(RenderedNode),
}

/// An opaque child sequence, passed through the render boundary.
///
/// The composition engine does not interpret children; the runtime floor
/// hands them through verbatim unless a content override transforms them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Children {
    items: Vec<Child>,
}

impl Children {
    /// Creates an empty child sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sequence holding a single text run.
    #[must_use]
    pub fn text(text: &str) -> Self {
        Self {
            items: alloc::vec![Child::Text(text.into())],
        }
    }

    /// Returns `true` if the sequence is empty.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Appends a child.
    pub fn push(&mut self, child: Child) {
        self.items.push(child);
    }

    /// Returns an iterator over the items.
    pub fn iter(&self) -> impl Iterator<Item = &Child> + '_ {
        self.items.iter()
    }
}

impl From<Vec<Child>> for Children {
    fn from(items: Vec<Child>) -> Self {
        Self { items }
    }
}

/// The rendered description handed to the rendering host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedNode {
    /// The effective tag name.
    pub tag: String,
    /// The effective attributes.
    pub attrs: AttrMap,
    /// The effective child sequence.
    pub children: Children,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_map_set_and_get() {
        let mut attrs = AttrMap::new();
        attrs.set("role", "button");
        attrs.set("id", "x");
        assert_eq!(attrs.get("role"), Some("button"));
        assert_eq!(attrs.get("id"), Some("x"));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn attr_map_set_replaces() {
        let attrs = AttrMap::new().with("id", "a").with("id", "b");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("id"), Some("b"));
    }

    #[test]
    fn attr_map_iter_is_name_ordered() {
        let attrs = AttrMap::new().with("z", "1").with("a", "2");
        let names: Vec<_> = attrs.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["a", "z"]);
    }

    #[test]
    fn attr_map_merged_overlay_wins() {
        let base = AttrMap::new().with("id", "a").with("role", "button");
        let overlay = AttrMap::new().with("id", "b");

        let merged = base.merged(&overlay);
        assert_eq!(merged.get("id"), Some("b"));
        assert_eq!(merged.get("role"), Some("button"));
    }

    #[test]
    fn children_passthrough_shape() {
        let children = Children::text("hello");
        assert_eq!(children.len(), 1);
        assert_eq!(
            children.iter().next(),
            Some(&Child::Text("hello".into()))
        );
    }
}
