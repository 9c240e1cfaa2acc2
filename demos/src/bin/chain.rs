// Copyright 2025 the Blockwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chain demo: delegation runs along the composed chain, not the authoring
//! chain.
//!
//! Run with `cargo run -p blockwork_demos --bin chain`.

use blockwork_compose::{BlockBuilder, Children, ModifierBuilder, with_mods};
use blockwork_props::PropRecord;

fn main() {
    let base = BlockBuilder::new("Block").tag_default("a").build();

    // Both modifiers extend the base directly; neither knows the other.
    let m1 = ModifierBuilder::new("Block_m1")
        .extends(&base)
        .always_active()
        .tag(|cx| Ok(cx.delegate()? + "bbr"))
        .build();
    let m2 = ModifierBuilder::new("Block_m2")
        .extends(&base)
        .always_active()
        .tag(|cx| Ok(cx.delegate()? + "section"))
        .build();

    let props = PropRecord::new();
    for modifiers in [
        vec![m1.clone()],
        vec![m2.clone()],
        vec![m1.clone(), m2.clone()],
        vec![m2, m1],
    ] {
        let component = with_mods(&base, &modifiers).expect("valid composition");
        let node = component
            .render(&props, Children::new())
            .expect("render");
        let names: Vec<_> = modifiers.iter().map(|m| m.name()).collect();
        println!("{:<24} -> <{}>", names.join(" + "), node.tag);
    }
}
