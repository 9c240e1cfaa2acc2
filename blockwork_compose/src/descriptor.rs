// Copyright 2025 the Blockwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Block and modifier descriptors.
//!
//! A [`Descriptor`] is one authored unit: a base block or a modifier. Units
//! are immutable after construction and shared by reference, so identity
//! comparison (`Descriptor::ptr_eq`) is meaningful; chain composition uses
//! it to include a shared ancestor only once.
//!
//! The authoring chain (`extends`) is flattened at definition time: each
//! descriptor precomputes its root-first ancestor list, its lineage-merged
//! default props, and its effective activation predicate. The runtime
//! composition chain is a separate, per-render structure built by
//! [`with_mods`](crate::with_mods) components.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use blockwork_props::{Prop, PropRecord, PropsBuilder};

use crate::chain::{OpCx, OverrideFn};
use crate::error::{PredicateError, RenderError};
use crate::node::{AttrMap, Children};

/// Whether a descriptor defines a base block or a conditional modifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A base unit; always active.
    Block,
    /// A conditional unit, gated by an activation predicate.
    Modifier,
}

/// A fallible activation predicate over a resolved property record.
pub type ActivationFn = dyn Fn(&PropRecord) -> Result<bool, Box<dyn core::error::Error>>;

/// Per-operation override functions carried by one unit.
#[derive(Default)]
pub(crate) struct Overrides {
    pub(crate) tag: Option<Rc<OverrideFn<String>>>,
    pub(crate) attrs: Option<Rc<OverrideFn<AttrMap>>>,
    pub(crate) content: Option<Rc<OverrideFn<Children>>>,
}

struct DescriptorData {
    name: Box<str>,
    kind: Kind,
    extends: Option<Descriptor>,
    tag_default: Option<Box<str>>,
    attrs_default: AttrMap,
    default_props: PropRecord,
    overrides: Overrides,
    /// Authoring ancestors, root first, excluding `self`.
    ancestors: Vec<Descriptor>,
    /// Default props merged along the whole authoring chain.
    resolved_defaults: PropRecord,
    /// Leaf-most activation predicate declared along the authoring chain.
    resolved_activation: Option<Rc<ActivationFn>>,
}

/// One authored unit: a base block or a modifier.
///
/// Descriptors are created by [`BlockBuilder`] and [`ModifierBuilder`] and
/// are immutable thereafter. Cloning is cheap (`Rc`).
#[derive(Clone)]
pub struct Descriptor {
    inner: Rc<DescriptorData>,
}

impl Descriptor {
    /// Returns the diagnostic name of this unit.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns whether this unit is a block or a modifier.
    #[must_use]
    #[inline]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    /// Returns the unit this one is built upon, if any.
    #[must_use]
    pub fn extends(&self) -> Option<&Self> {
        self.inner.extends.as_ref()
    }

    /// Returns the declared terminal tag default, if any.
    #[must_use]
    pub fn tag_default(&self) -> Option<&str> {
        self.inner.tag_default.as_deref()
    }

    /// Returns `true` if `a` and `b` are the same unit.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }

    /// Decides whether this unit is active for the given caller props.
    ///
    /// Blocks are always active. A modifier consults the leaf-most
    /// activation predicate declared along its authoring chain, handing it
    /// the caller props layered over the chain's own default props (caller
    /// wins); a modifier whose chain declares no predicate is never active.
    ///
    /// # Errors
    ///
    /// Returns [`PredicateError`] if the predicate itself fails.
    pub fn is_active(&self, props: &PropRecord) -> Result<bool, PredicateError> {
        match self.inner.kind {
            Kind::Block => Ok(true),
            Kind::Modifier => match &self.inner.resolved_activation {
                None => Ok(false),
                Some(predicate) => {
                    let view = self.inner.resolved_defaults.merged_with(props);
                    predicate(&view).map_err(|source| PredicateError::new(self.name(), source))
                }
            },
        }
    }

    /// Authoring ancestors, root first, excluding `self`.
    pub(crate) fn ancestors(&self) -> &[Self] {
        &self.inner.ancestors
    }

    /// The whole authoring chain, root first, including `self`.
    pub(crate) fn lineage(&self) -> impl Iterator<Item = &Self> + '_ {
        self.inner.ancestors.iter().chain(core::iter::once(self))
    }

    pub(crate) fn attrs_default(&self) -> &AttrMap {
        &self.inner.attrs_default
    }

    pub(crate) fn default_props(&self) -> &PropRecord {
        &self.inner.default_props
    }

    pub(crate) fn tag_override(&self) -> Option<&Rc<OverrideFn<String>>> {
        self.inner.overrides.tag.as_ref()
    }

    pub(crate) fn attrs_override(&self) -> Option<&Rc<OverrideFn<AttrMap>>> {
        self.inner.overrides.attrs.as_ref()
    }

    pub(crate) fn content_override(&self) -> Option<&Rc<OverrideFn<Children>>> {
        self.inner.overrides.content.as_ref()
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.inner.name)
            .field("kind", &self.inner.kind)
            .field("extends", &self.inner.extends.as_ref().map(Self::name))
            .finish_non_exhaustive()
    }
}

/// Shared state for the two descriptor builders.
struct Definition {
    name: Box<str>,
    extends: Option<Descriptor>,
    tag_default: Option<Box<str>>,
    attrs_default: AttrMap,
    default_props: PropsBuilder,
    overrides: Overrides,
}

impl Definition {
    fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            extends: None,
            tag_default: None,
            attrs_default: AttrMap::new(),
            default_props: PropsBuilder::new(),
            overrides: Overrides::default(),
        }
    }

    fn finish(self, kind: Kind, activation: Option<Rc<ActivationFn>>) -> Descriptor {
        let default_props = self.default_props.build();

        let (ancestors, inherited_defaults, inherited_activation) = match &self.extends {
            Some(parent) => {
                let mut ancestors = parent.ancestors().to_vec();
                ancestors.push(parent.clone());
                (
                    ancestors,
                    parent.inner.resolved_defaults.clone(),
                    parent.inner.resolved_activation.clone(),
                )
            }
            None => (Vec::new(), PropRecord::new(), None),
        };

        let resolved_defaults = inherited_defaults.merged_with(&default_props);
        let resolved_activation = activation.or(inherited_activation);

        Descriptor {
            inner: Rc::new(DescriptorData {
                name: self.name,
                kind,
                extends: self.extends,
                tag_default: self.tag_default,
                attrs_default: self.attrs_default,
                default_props,
                overrides: self.overrides,
                ancestors,
                resolved_defaults,
                resolved_activation,
            }),
        }
    }
}

/// Builder for base block descriptors.
///
/// # Example
///
/// ```rust
/// use blockwork_compose::BlockBuilder;
///
/// let button = BlockBuilder::new("Button")
///     .tag_default("button")
///     .attr_default("role", "button")
///     .build();
///
/// assert_eq!(button.tag_default(), Some("button"));
/// ```
pub struct BlockBuilder {
    def: Definition,
}

impl BlockBuilder {
    /// Creates a builder for a block named `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            def: Definition::new(name),
        }
    }

    /// Builds this block upon another descriptor.
    #[must_use]
    pub fn extends(mut self, parent: &Descriptor) -> Self {
        self.def.extends = Some(parent.clone());
        self
    }

    /// Declares the terminal tag default.
    #[must_use]
    pub fn tag_default(mut self, tag: &str) -> Self {
        self.def.tag_default = Some(tag.into());
        self
    }

    /// Declares a terminal attribute default.
    #[must_use]
    pub fn attr_default(mut self, name: &str, value: &str) -> Self {
        self.def.attrs_default.set(name, value);
        self
    }

    /// Contributes a default property value.
    #[must_use]
    pub fn default_prop<T: 'static>(mut self, prop: Prop<T>, value: T) -> Self {
        self.def.default_props = self.def.default_props.set(prop, value);
        self
    }

    /// Overrides the tag operation.
    #[must_use]
    pub fn tag(
        mut self,
        f: impl Fn(&OpCx<'_, String>) -> Result<String, RenderError> + 'static,
    ) -> Self {
        self.def.overrides.tag = Some(Rc::new(f));
        self
    }

    /// Overrides the attrs operation.
    #[must_use]
    pub fn attrs(
        mut self,
        f: impl Fn(&OpCx<'_, AttrMap>) -> Result<AttrMap, RenderError> + 'static,
    ) -> Self {
        self.def.overrides.attrs = Some(Rc::new(f));
        self
    }

    /// Overrides the content operation.
    #[must_use]
    pub fn content(
        mut self,
        f: impl Fn(&OpCx<'_, Children>) -> Result<Children, RenderError> + 'static,
    ) -> Self {
        self.def.overrides.content = Some(Rc::new(f));
        self
    }

    /// Builds the block descriptor.
    #[must_use]
    pub fn build(self) -> Descriptor {
        self.def.finish(Kind::Block, None)
    }
}

impl fmt::Debug for BlockBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockBuilder")
            .field("name", &self.def.name)
            .finish_non_exhaustive()
    }
}

/// Builder for modifier descriptors.
///
/// A modifier overrides part of a block's behavior when its activation
/// predicate matches the current props. A modifier that never declares a
/// predicate (anywhere along its authoring chain) is never active.
///
/// # Example
///
/// ```rust
/// use blockwork_compose::{BlockBuilder, ModifierBuilder};
/// use blockwork_props::PropSpace;
///
/// let mut space = PropSpace::new();
/// let disabled = space.register::<bool>("disabled");
///
/// let button = BlockBuilder::new("Button").tag_default("button").build();
/// let disabled_mod = ModifierBuilder::new("Button_disabled")
///     .extends(&button)
///     .activation(move |props| props.get(disabled).copied().unwrap_or(false))
///     .attrs(|cx| Ok(cx.delegate()?.with("aria-disabled", "true")))
///     .build();
///
/// assert!(disabled_mod.extends().is_some());
/// ```
pub struct ModifierBuilder {
    def: Definition,
    activation: Option<Rc<ActivationFn>>,
}

impl ModifierBuilder {
    /// Creates a builder for a modifier named `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            def: Definition::new(name),
            activation: None,
        }
    }

    /// Builds this modifier upon another descriptor (a block or another
    /// modifier). The ancestor's overrides run beneath this modifier's own,
    /// and its activation predicate is inherited when this modifier does not
    /// declare one.
    #[must_use]
    pub fn extends(mut self, parent: &Descriptor) -> Self {
        self.def.extends = Some(parent.clone());
        self
    }

    /// Declares the terminal tag default.
    #[must_use]
    pub fn tag_default(mut self, tag: &str) -> Self {
        self.def.tag_default = Some(tag.into());
        self
    }

    /// Declares a terminal attribute default.
    #[must_use]
    pub fn attr_default(mut self, name: &str, value: &str) -> Self {
        self.def.attrs_default.set(name, value);
        self
    }

    /// Contributes a default property value.
    #[must_use]
    pub fn default_prop<T: 'static>(mut self, prop: Prop<T>, value: T) -> Self {
        self.def.default_props = self.def.default_props.set(prop, value);
        self
    }

    /// Sets the activation predicate.
    #[must_use]
    pub fn activation(mut self, f: impl Fn(&PropRecord) -> bool + 'static) -> Self {
        self.activation = Some(Rc::new(move |props| Ok(f(props))));
        self
    }

    /// Sets a fallible activation predicate. A returned error aborts the
    /// render it occurs in, wrapped in
    /// [`PredicateError`](crate::PredicateError).
    #[must_use]
    pub fn try_activation(
        mut self,
        f: impl Fn(&PropRecord) -> Result<bool, Box<dyn core::error::Error>> + 'static,
    ) -> Self {
        self.activation = Some(Rc::new(f));
        self
    }

    /// Makes this modifier unconditionally active.
    #[must_use]
    pub fn always_active(mut self) -> Self {
        self.activation = Some(Rc::new(|_| Ok(true)));
        self
    }

    /// Overrides the tag operation.
    #[must_use]
    pub fn tag(
        mut self,
        f: impl Fn(&OpCx<'_, String>) -> Result<String, RenderError> + 'static,
    ) -> Self {
        self.def.overrides.tag = Some(Rc::new(f));
        self
    }

    /// Overrides the attrs operation.
    #[must_use]
    pub fn attrs(
        mut self,
        f: impl Fn(&OpCx<'_, AttrMap>) -> Result<AttrMap, RenderError> + 'static,
    ) -> Self {
        self.def.overrides.attrs = Some(Rc::new(f));
        self
    }

    /// Overrides the content operation.
    #[must_use]
    pub fn content(
        mut self,
        f: impl Fn(&OpCx<'_, Children>) -> Result<Children, RenderError> + 'static,
    ) -> Self {
        self.def.overrides.content = Some(Rc::new(f));
        self
    }

    /// Builds the modifier descriptor.
    #[must_use]
    pub fn build(self) -> Descriptor {
        self.def.finish(Kind::Modifier, self.activation)
    }
}

impl fmt::Debug for ModifierBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModifierBuilder")
            .field("name", &self.def.name)
            .field("has_activation", &self.activation.is_some())
            .finish_non_exhaustive()
    }
}
