// Copyright 2025 the Blockwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Blockwork Compose: modifier resolution and chain composition.
//!
//! This crate turns a base component ("block") and a set of
//! independently-authored, predicate-gated variants ("modifiers") into one
//! component whose rendered output — tag name, attributes, child structure —
//! depends on which modifiers match the props supplied at render time.
//! Conditional variants become small, independently testable override units
//! instead of one monolithic conditional component.
//!
//! ## Core concepts
//!
//! ### Descriptors
//!
//! [`BlockBuilder`] and [`ModifierBuilder`] produce immutable, shared
//! [`Descriptor`]s. A descriptor may declare terminal defaults (tag,
//! attributes), contribute default props, override operations, and build
//! upon another descriptor (`extends` — the *authoring* chain, flattened
//! once at definition time).
//!
//! ### Composition
//!
//! [`with_mods`] binds a base and an ordered modifier list into a
//! [`ComposedComponent`]. At each render the activation predicates are
//! evaluated against the current props, and the active subset is composed —
//! in declaration order — into one override chain per operation. An
//! override's [`OpCx::delegate`] call resolves along this *composition*
//! chain, not along the override's own authoring lineage, so a modifier
//! transforms whatever the previously-active unit produced.
//!
//! ### Rendering
//!
//! [`ComposedComponent::render`] produces a [`RenderedNode`]; turning that
//! description into markup, DOM, or native widgets is the embedding host's
//! job.
//!
//! ## Quick start
//!
//! ```rust
//! use blockwork_compose::{BlockBuilder, Children, ModifierBuilder, with_mods};
//! use blockwork_props::{PropSpace, PropsBuilder};
//!
//! let mut space = PropSpace::new();
//! let kind = space.register::<&str>("kind");
//!
//! let link = BlockBuilder::new("Link").tag_default("a").build();
//! let external = ModifierBuilder::new("Link_external")
//!     .extends(&link)
//!     .activation(move |props| props.get(kind) == Some(&"external"))
//!     .attrs(|cx| Ok(cx.delegate()?.with("rel", "noopener")))
//!     .build();
//!
//! let component = with_mods(&link, &[external]).unwrap();
//!
//! let props = PropsBuilder::new().set(kind, "external").build();
//! let node = component.render(&props, Children::text("docs")).unwrap();
//! assert_eq!(node.tag, "a");
//! assert_eq!(node.attrs.get("rel"), Some("noopener"));
//! ```
//!
//! ## Errors
//!
//! [`with_mods`] validates descriptor kinds at call time
//! ([`InvalidComposition`]); render failures ([`RenderError`]) are an
//! activation predicate failing ([`PredicateError`]) or delegation past a
//! chain with no declared terminal default ([`UnresolvedDelegation`]).
//! Composition is pure and deterministic; nothing is retried.
//!
//! ## `no_std` support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod chain;
mod component;
mod descriptor;
mod error;
mod node;

pub use chain::{OpCx, OverrideFn};
pub use component::{ComposedComponent, with_mods};
pub use descriptor::{ActivationFn, BlockBuilder, Descriptor, Kind, ModifierBuilder};
pub use error::{
    InvalidComposition, Operation, PredicateError, RenderError, UnresolvedDelegation,
};
pub use node::{AttrMap, Child, Children, RenderedNode};
