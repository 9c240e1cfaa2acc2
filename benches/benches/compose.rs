// Copyright 2025 the Blockwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `blockwork_props` + `blockwork_compose`.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use blockwork_compose::{BlockBuilder, Children, ModifierBuilder, with_mods};
use blockwork_props::{PropRecord, PropSpace, PropsBuilder};

fn bench_compose(c: &mut Criterion) {
    let mut space = PropSpace::new();
    let primary = space.register::<bool>("primary");
    let size = space.register::<u32>("size");

    let base = BlockBuilder::new("Button").tag_default("button").build();
    let primary_mod = ModifierBuilder::new("Button_primary")
        .extends(&base)
        .activation(move |props| props.get(primary).copied().unwrap_or(false))
        .attrs(|cx| Ok(cx.delegate()?.with("data-variant", "primary")))
        .build();
    let large_mod = ModifierBuilder::new("Button_large")
        .extends(&base)
        .activation(move |props| props.get(size).copied().unwrap_or(0) >= 32)
        .attrs(|cx| Ok(cx.delegate()?.with("data-size", "large")))
        .build();

    let component = with_mods(&base, &[primary_mod, large_mod]).unwrap();
    let props = PropsBuilder::new()
        .set(primary, true)
        .set(size, 48_u32)
        .build();

    let mut group = c.benchmark_group("compose/render");

    group.bench_function("cached_subset", |b| {
        // Warm the subset once so the loop measures the memoized path.
        let _ = component.render(&props, Children::new()).unwrap();
        b.iter(|| black_box(component.render(&props, Children::new()).unwrap()))
    });

    group.bench_function("cold_compose", |b| {
        b.iter(|| {
            let fresh = with_mods(&base, component.modifiers()).unwrap();
            black_box(fresh.render(&props, Children::new()).unwrap())
        })
    });

    group.bench_function("no_modifiers_active", |b| {
        let empty = PropRecord::new();
        b.iter(|| black_box(component.render(&empty, Children::new()).unwrap()))
    });

    group.finish();

    let mut group = c.benchmark_group("props/merge");

    let defaults = PropsBuilder::new().set(size, 16_u32).build();
    let caller = PropsBuilder::new()
        .set(primary, true)
        .set(size, 48_u32)
        .build();

    group.bench_function("merged_with", |b| {
        b.iter(|| black_box(defaults.merged_with(&caller)))
    });

    group.finish();
}

criterion_group!(benches, bench_compose);
criterion_main!(benches);
