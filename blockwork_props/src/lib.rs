// Copyright 2025 the Blockwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Blockwork Props: typed property keys and immutable property records.
//!
//! This crate is the storage foundation for the blockwork composition
//! engine. It provides:
//!
//! - [`PropSpace`] — a name registry that allocates compact property ids.
//! - [`Prop<T>`] — a typed, two-byte property key.
//! - [`PropRecord`] — an immutable, `Rc`-shared mapping from key to value,
//!   with an ordered right-wins merge.
//!
//! Descriptors carry default-property records; callers supply a record per
//! render; the engine layers the two with [`PropRecord::merged_with`].
//! Records never change after construction, so merged records share their
//! values with their sources.
//!
//! ## Quick start
//!
//! ```rust
//! use blockwork_props::{PropSpace, PropsBuilder};
//!
//! let mut space = PropSpace::new();
//! let size = space.register::<u32>("size");
//! let primary = space.register::<bool>("primary");
//!
//! let defaults = PropsBuilder::new().set(size, 14_u32).build();
//! let caller = PropsBuilder::new().set(primary, true).build();
//!
//! let resolved = defaults.merged_with(&caller);
//! assert_eq!(resolved.get(size), Some(&14));
//! assert_eq!(resolved.get(primary), Some(&true));
//! ```
//!
//! ## `no_std` support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod key;
mod record;
mod space;

pub use key::{Prop, PropId};
pub use record::{PropRecord, PropValue, PropsBuilder};
pub use space::PropSpace;
