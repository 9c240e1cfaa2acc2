// Copyright 2025 the Blockwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Button demo: one block, two modifiers, props decide the rendering.
//!
//! Run with `cargo run -p blockwork_demos --bin button`.

use blockwork_compose::{
    BlockBuilder, Child, Children, ModifierBuilder, RenderedNode, with_mods,
};
use blockwork_props::{PropRecord, PropSpace, PropsBuilder};

/// A toy rendering host: turns the rendered description into markup.
fn markup(node: &RenderedNode) -> String {
    let mut out = String::new();
    out.push('<');
    out.push_str(&node.tag);
    for (name, value) in node.attrs.iter() {
        out.push_str(&format!(" {name}=\"{value}\""));
    }
    out.push('>');
    for child in node.children.iter() {
        match child {
            Child::Text(text) => out.push_str(text),
            Child::Node(nested) => out.push_str(&markup(nested)),
        }
    }
    out.push_str(&format!("</{}>", node.tag));
    out
}

fn main() {
    let mut space = PropSpace::new();
    let primary = space.register::<bool>("primary");
    let disabled = space.register::<bool>("disabled");

    let button = BlockBuilder::new("Button")
        .tag_default("button")
        .attr_default("type", "button")
        .build();

    let primary_mod = ModifierBuilder::new("Button_primary")
        .extends(&button)
        .activation(move |props| props.get(primary).copied().unwrap_or(false))
        .attrs(|cx| Ok(cx.delegate()?.with("data-variant", "primary")))
        .build();

    let disabled_mod = ModifierBuilder::new("Button_disabled")
        .extends(&button)
        .activation(move |props| props.get(disabled).copied().unwrap_or(false))
        .attrs(|cx| Ok(cx.delegate()?.with("aria-disabled", "true")))
        .build();

    let component =
        with_mods(&button, &[primary_mod, disabled_mod]).expect("valid composition");

    let cases = [
        ("plain", PropRecord::new()),
        ("primary", PropsBuilder::new().set(primary, true).build()),
        (
            "primary + disabled",
            PropsBuilder::new()
                .set(primary, true)
                .set(disabled, true)
                .build(),
        ),
    ];

    for (label, props) in &cases {
        let node = component
            .render(props, Children::text("Save"))
            .expect("render");
        println!("{label:>18}: {}", markup(&node));
    }
}
