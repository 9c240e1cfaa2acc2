// Copyright 2025 the Blockwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chain composition and delegation.
//!
//! Two ordered relations meet here. The *authoring* chain (`extends`, frozen
//! into each descriptor at definition time) says what a unit is built upon.
//! The *composition* chain is rebuilt per render from the base plus the
//! currently-active modifiers, and it is the chain delegation runs along: an
//! override's [`OpCx::delegate`] call invokes its predecessor in the
//! composed order, whatever unit that happens to be for this render — not
//! the override's static authoring parent.
//!
//! Each composed chain terminates in the runtime floor: the declared tag
//! default, the merged declared attribute defaults, and the caller-supplied
//! children passed through verbatim.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use smallvec::SmallVec;

use blockwork_props::PropRecord;

use crate::descriptor::Descriptor;
use crate::error::RenderError;
use crate::node::{AttrMap, Children};

/// An override function for an operation producing `T`.
///
/// Overrides receive an [`OpCx`] and either produce a value outright or
/// delegate to the predecessor and transform its result:
///
/// ```rust
/// use blockwork_compose::{BlockBuilder, ModifierBuilder};
///
/// let base = BlockBuilder::new("Base").tag_default("a").build();
/// let appender = ModifierBuilder::new("Base_wide")
///     .extends(&base)
///     .always_active()
///     .tag(|cx| Ok(cx.delegate()? + "side"))
///     .build();
/// assert!(appender.extends().is_some());
/// ```
pub type OverrideFn<T> = dyn Fn(&OpCx<'_, T>) -> Result<T, RenderError>;

/// Invocation context handed to an override function.
///
/// The context carries the override's position in the composed chain, the
/// render's resolved property record, and the caller-supplied children.
pub struct OpCx<'a, T> {
    chain: &'a [Rc<OverrideFn<T>>],
    index: usize,
    props: &'a PropRecord,
    children: &'a Children,
    floor: &'a dyn Fn() -> Result<T, RenderError>,
}

impl<'a, T> OpCx<'a, T> {
    /// The resolved property record for this render: composed default props
    /// with the caller's props layered on top.
    #[must_use]
    #[inline]
    pub fn props(&self) -> &'a PropRecord {
        self.props
    }

    /// The caller-supplied children, untransformed.
    #[must_use]
    #[inline]
    pub fn children(&self) -> &'a Children {
        self.children
    }

    /// Invokes the predecessor in the composed chain and returns its result.
    ///
    /// For the bottom-most override the predecessor is the runtime floor.
    ///
    /// # Errors
    ///
    /// Returns whatever the predecessor returns; for a tag chain whose
    /// composition declared no tag default, delegating past the bottom is an
    /// [`UnresolvedDelegation`](crate::UnresolvedDelegation).
    pub fn delegate(&self) -> Result<T, RenderError> {
        match self.index.checked_sub(1) {
            None => (self.floor)(),
            Some(prev) => {
                let cx = Self {
                    index: prev,
                    ..*self
                };
                (self.chain[prev])(&cx)
            }
        }
    }
}

// Manual impls so the context copies regardless of `T`.

impl<T> Copy for OpCx<'_, T> {}

impl<T> Clone for OpCx<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> fmt::Debug for OpCx<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpCx")
            .field("index", &self.index)
            .field("chain_len", &self.chain.len())
            .finish_non_exhaustive()
    }
}

/// Invokes an override chain top-down, or the floor when no unit overrides
/// the operation.
pub(crate) fn invoke<T>(
    chain: &[Rc<OverrideFn<T>>],
    props: &PropRecord,
    children: &Children,
    floor: &dyn Fn() -> Result<T, RenderError>,
) -> Result<T, RenderError> {
    match chain.len().checked_sub(1) {
        None => floor(),
        Some(top) => {
            let cx = OpCx {
                chain,
                index: top,
                props,
                children,
                floor,
            };
            (chain[top])(&cx)
        }
    }
}

/// The resolution of one composition for one active-modifier subset:
/// per-operation override chains, the runtime floor, and the composed
/// default props.
pub(crate) struct ResolvedChain {
    pub(crate) tag: SmallVec<[Rc<OverrideFn<String>>; 4]>,
    pub(crate) attrs: SmallVec<[Rc<OverrideFn<AttrMap>>; 2]>,
    pub(crate) content: SmallVec<[Rc<OverrideFn<Children>>; 2]>,
    pub(crate) tag_floor: Option<Box<str>>,
    pub(crate) attrs_floor: AttrMap,
    pub(crate) defaults: PropRecord,
}

/// Composes the base with the active modifiers, in declaration order.
///
/// The unit list is the base's authoring lineage (root first), then each
/// active modifier's lineage with units already present skipped — a shared
/// ancestor contributes once, at its first position. Override chains,
/// floors, and default props are then collected in unit order, later
/// declarations winning for floors and defaults.
pub(crate) fn compose(base: &Descriptor, active: &[&Descriptor]) -> ResolvedChain {
    let mut units: SmallVec<[Descriptor; 8]> = SmallVec::new();
    append_lineage(&mut units, base);
    for modifier in active {
        append_lineage(&mut units, modifier);
    }

    let mut chain = ResolvedChain {
        tag: SmallVec::new(),
        attrs: SmallVec::new(),
        content: SmallVec::new(),
        tag_floor: None,
        attrs_floor: AttrMap::new(),
        defaults: PropRecord::new(),
    };
    for unit in &units {
        if let Some(f) = unit.tag_override() {
            chain.tag.push(f.clone());
        }
        if let Some(f) = unit.attrs_override() {
            chain.attrs.push(f.clone());
        }
        if let Some(f) = unit.content_override() {
            chain.content.push(f.clone());
        }
        if let Some(tag) = unit.tag_default() {
            chain.tag_floor = Some(tag.into());
        }
        chain.attrs_floor = chain.attrs_floor.merged(unit.attrs_default());
        chain.defaults = chain.defaults.merged_with(unit.default_props());
    }
    chain
}

fn append_lineage(units: &mut SmallVec<[Descriptor; 8]>, unit: &Descriptor) {
    for link in unit.lineage() {
        if !units.iter().any(|seen| Descriptor::ptr_eq(seen, link)) {
            units.push(link.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{BlockBuilder, ModifierBuilder};
    use alloc::string::ToString;

    fn tag_of(chain: &ResolvedChain) -> Result<String, RenderError> {
        let floor_value = chain.tag_floor.clone();
        let floor = move || -> Result<String, RenderError> {
            Ok(floor_value
                .as_deref()
                .expect("test composition declares a tag default")
                .to_string())
        };
        invoke(&chain.tag, &PropRecord::new(), &Children::new(), &floor)
    }

    #[test]
    fn empty_chain_uses_floor() {
        let base = BlockBuilder::new("Base").tag_default("a").build();
        let chain = compose(&base, &[]);
        assert!(chain.tag.is_empty());
        assert_eq!(tag_of(&chain).unwrap(), "a");
    }

    #[test]
    fn bottom_override_delegates_to_floor() {
        let base = BlockBuilder::new("Base").tag_default("a").build();
        let appender = ModifierBuilder::new("Mod")
            .extends(&base)
            .always_active()
            .tag(|cx| Ok(cx.delegate()? + "bbr"))
            .build();

        let chain = compose(&base, &[&appender]);
        assert_eq!(chain.tag.len(), 1);
        assert_eq!(tag_of(&chain).unwrap(), "abbr");
    }

    #[test]
    fn delegation_follows_composition_order_not_authoring() {
        let base = BlockBuilder::new("Base").tag_default("a").build();
        // Both modifiers extend the base directly; neither knows the other.
        let m1 = ModifierBuilder::new("M1")
            .extends(&base)
            .always_active()
            .tag(|cx| Ok(cx.delegate()? + "bbr"))
            .build();
        let m2 = ModifierBuilder::new("M2")
            .extends(&base)
            .always_active()
            .tag(|cx| Ok(cx.delegate()? + "section"))
            .build();

        // M2's delegate resolves to M1, its predecessor in the composed
        // chain, even though M2 does not extend M1.
        let chain = compose(&base, &[&m1, &m2]);
        assert_eq!(chain.tag.len(), 2);
        assert_eq!(tag_of(&chain).unwrap(), "abbrsection");
    }

    #[test]
    fn shared_ancestor_contributes_once() {
        let root = BlockBuilder::new("Root")
            .tag_default("div")
            .tag(|cx| Ok(cx.delegate()? + "!"))
            .build();
        let base = BlockBuilder::new("Base").extends(&root).build();
        // The modifier's lineage reaches Root independently of the base.
        let modifier = ModifierBuilder::new("Mod")
            .extends(&root)
            .always_active()
            .tag(|cx| Ok(cx.delegate()? + "?"))
            .build();

        let chain = compose(&base, &[&modifier]);
        // Root's override appears once: "div" + "!" + "?", not "div!!?".
        assert_eq!(chain.tag.len(), 2);
        assert_eq!(tag_of(&chain).unwrap(), "div!?");
    }

    #[test]
    fn floors_and_defaults_take_leafmost_declaration() {
        let base = BlockBuilder::new("Base")
            .tag_default("a")
            .attr_default("role", "none")
            .build();
        let modifier = ModifierBuilder::new("Mod")
            .extends(&base)
            .always_active()
            .tag_default("b")
            .attr_default("role", "button")
            .build();

        let chain = compose(&base, &[&modifier]);
        assert_eq!(chain.tag_floor.as_deref(), Some("b"));
        assert_eq!(chain.attrs_floor.get("role"), Some("button"));
    }

    #[test]
    fn overrides_see_resolved_props() {
        use blockwork_props::{PropSpace, PropsBuilder};

        let mut space = PropSpace::new();
        let suffix = space.register::<&str>("suffix");

        let base = BlockBuilder::new("Base").tag_default("a").build();
        let modifier = ModifierBuilder::new("Mod")
            .extends(&base)
            .always_active()
            .tag(move |cx| {
                let suffix = cx.props().get(suffix).copied().unwrap_or("");
                Ok(cx.delegate()? + suffix)
            })
            .build();

        let chain = compose(&base, &[&modifier]);
        let props = PropsBuilder::new().set(suffix, "x").build();
        let floor = || -> Result<String, RenderError> { Ok("a".to_string()) };
        let tag = invoke(&chain.tag, &props, &Children::new(), &floor).unwrap();
        assert_eq!(tag, "ax");
    }
}
