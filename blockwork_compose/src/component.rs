// Copyright 2025 the Blockwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composed components.
//!
//! [`with_mods`] binds a base block and an ordered modifier list into a
//! reusable [`ComposedComponent`]. The binding is validated once, at call
//! time; each render then re-evaluates which modifiers are active for the
//! current props, composes the effective chain for that subset (memoized per
//! subset), and produces a [`RenderedNode`] for the host.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use blockwork_props::PropRecord;

use crate::chain::{ResolvedChain, compose, invoke};
use crate::descriptor::{Descriptor, Kind};
use crate::error::{InvalidComposition, Operation, RenderError, UnresolvedDelegation};
use crate::node::{AttrMap, Children, RenderedNode};

/// Bound on memoized active subsets per component. Past the limit, renders
/// compose without caching; output is unaffected.
const CHAIN_CACHE_LIMIT: usize = 64;

/// Active-modifier subset, one bit per supplied modifier.
type ActiveSet = SmallVec<[u64; 1]>;

struct ComponentData {
    base: Descriptor,
    modifiers: Box<[Descriptor]>,
    chains: RefCell<HashMap<ActiveSet, Rc<ResolvedChain>>>,
}

/// A reusable composition of a base block with an ordered modifier list.
///
/// Created by [`with_mods`]; immutable and cheap to clone (`Rc`). The
/// descriptor list is owned for the component's lifetime; only the
/// per-subset chain cache changes under the hood, and it never affects
/// output.
///
/// # Example
///
/// ```rust
/// use blockwork_compose::{BlockBuilder, Children, ModifierBuilder, with_mods};
/// use blockwork_props::{PropRecord, PropSpace, PropsBuilder};
///
/// let mut space = PropSpace::new();
/// let primary = space.register::<bool>("primary");
///
/// let button = BlockBuilder::new("Button").tag_default("button").build();
/// let primary_mod = ModifierBuilder::new("Button_primary")
///     .extends(&button)
///     .activation(move |props| props.get(primary).copied().unwrap_or(false))
///     .attrs(|cx| Ok(cx.delegate()?.with("data-primary", "true")))
///     .build();
///
/// let component = with_mods(&button, &[primary_mod]).unwrap();
///
/// let plain = component.render(&PropRecord::new(), Children::new()).unwrap();
/// assert!(!plain.attrs.contains("data-primary"));
///
/// let props = PropsBuilder::new().set(primary, true).build();
/// let highlighted = component.render(&props, Children::new()).unwrap();
/// assert_eq!(highlighted.attrs.get("data-primary"), Some("true"));
/// ```
#[derive(Clone)]
pub struct ComposedComponent {
    inner: Rc<ComponentData>,
}

/// Binds a base block and an ordered modifier list into a
/// [`ComposedComponent`].
///
/// Declaration order in `modifiers` is the composition order for every
/// render; inactive modifiers are skipped, never reordered.
///
/// # Errors
///
/// Returns [`InvalidComposition`] when `base` is not a block (or is built on
/// a modifier), or when a `modifiers` entry is not a modifier. Validation
/// happens here, never at render time.
pub fn with_mods(
    base: &Descriptor,
    modifiers: &[Descriptor],
) -> Result<ComposedComponent, InvalidComposition> {
    if base.kind() != Kind::Block {
        return Err(InvalidComposition::BaseIsModifier {
            name: base.name().into(),
        });
    }
    if let Some(ancestor) = base.ancestors().iter().find(|a| a.kind() != Kind::Block) {
        return Err(InvalidComposition::BaseLineageHasModifier {
            base: base.name().into(),
            ancestor: ancestor.name().into(),
        });
    }
    if let Some(entry) = modifiers.iter().find(|m| m.kind() != Kind::Modifier) {
        return Err(InvalidComposition::ModifierIsBlock {
            name: entry.name().into(),
        });
    }

    Ok(ComposedComponent {
        inner: Rc::new(ComponentData {
            base: base.clone(),
            modifiers: modifiers.to_vec().into_boxed_slice(),
            chains: RefCell::new(HashMap::new()),
        }),
    })
}

impl ComposedComponent {
    /// Returns the base descriptor.
    #[must_use]
    pub fn base(&self) -> &Descriptor {
        &self.inner.base
    }

    /// Returns the full modifier list, in declaration order.
    #[must_use]
    pub fn modifiers(&self) -> &[Descriptor] {
        &self.inner.modifiers
    }

    /// Renders the component for one property record.
    ///
    /// Every modifier's activation predicate is evaluated left-to-right
    /// against its own default-merged view of `props`; the active subset is
    /// composed with the base (declaration order preserved) and the
    /// operations are invoked through the effective chain. `children` are
    /// handed through verbatim unless a content override transforms them.
    ///
    /// # Errors
    ///
    /// [`RenderError::Predicate`] if an activation predicate fails;
    /// [`RenderError::Delegation`] if the tag operation resolves to a chain
    /// with no override and no declared tag default, or an override
    /// delegates past the bottom of such a chain.
    pub fn render(
        &self,
        props: &PropRecord,
        children: Children,
    ) -> Result<RenderedNode, RenderError> {
        let modifiers = &self.inner.modifiers;
        let mut key: ActiveSet = smallvec::smallvec![0_u64; modifiers.len().div_ceil(64)];
        let mut active: SmallVec<[&Descriptor; 4]> = SmallVec::new();
        for (i, modifier) in modifiers.iter().enumerate() {
            if modifier.is_active(props)? {
                key[i / 64] |= 1_u64 << (i % 64);
                active.push(modifier);
            }
        }

        let chain = self.chain_for(key, &active);
        let resolved = chain.defaults.merged_with(props);

        let block = self.inner.base.name();
        let tag_floor = || -> Result<String, RenderError> {
            match &chain.tag_floor {
                Some(tag) => Ok(String::from(&**tag)),
                None => Err(UnresolvedDelegation {
                    operation: Operation::Tag,
                    block: block.into(),
                }
                .into()),
            }
        };
        let tag = invoke(&chain.tag, &resolved, &children, &tag_floor)?;

        let attrs_floor = || -> Result<AttrMap, RenderError> { Ok(chain.attrs_floor.clone()) };
        let attrs = invoke(&chain.attrs, &resolved, &children, &attrs_floor)?;

        let content_floor = || -> Result<Children, RenderError> { Ok(children.clone()) };
        let rendered_children = invoke(&chain.content, &resolved, &children, &content_floor)?;

        Ok(RenderedNode {
            tag,
            attrs,
            children: rendered_children,
        })
    }

    /// Returns the chain for an active subset, composing on a cache miss.
    fn chain_for(&self, key: ActiveSet, active: &[&Descriptor]) -> Rc<ResolvedChain> {
        if let Some(hit) = self.inner.chains.borrow().get(&key) {
            return Rc::clone(hit);
        }
        let chain = Rc::new(compose(&self.inner.base, active));
        let mut cache = self.inner.chains.borrow_mut();
        if cache.len() < CHAIN_CACHE_LIMIT {
            cache.insert(key, Rc::clone(&chain));
        }
        chain
    }
}

impl fmt::Debug for ComposedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.inner.modifiers.iter().map(Descriptor::name).collect();
        f.debug_struct("ComposedComponent")
            .field("base", &self.inner.base.name())
            .field("modifiers", &names)
            .finish_non_exhaustive()
    }
}
