//! Grapheme-cluster diff performance benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use textfx::cluster::clusters_from_text;
use textfx::{DiffOptions, diff, diff_with};

fn diff_small(c: &mut Criterion) {
    let old = clusters_from_text("Hello, World!");
    let new = clusters_from_text("Hello, brave new World?");

    c.bench_function("diff_identity_13", |b| {
        b.iter(|| diff(black_box(&old), black_box(&old)));
    });

    c.bench_function("diff_edit_13_to_23", |b| {
        b.iter(|| diff(black_box(&old), black_box(&new)));
    });

    let substitute = DiffOptions::default().with_substitute_in_place(true);
    c.bench_function("diff_edit_substitute", |b| {
        b.iter(|| diff_with(black_box(&old), black_box(&new), substitute));
    });
}

fn diff_emoji(c: &mut Criterion) {
    let old = clusters_from_text("👋🏽 héllo wörld 🇩🇪 café");
    let new = clusters_from_text("café 🇩🇪 wörld héllo 👋🏽");

    c.bench_function("diff_emoji_reverse_words", |b| {
        b.iter(|| diff(black_box(&old), black_box(&new)));
    });
}

fn diff_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_rotate");
    for len in [16usize, 64, 256, 1024] {
        let text: String = (0..len)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect();
        let rotated = format!("{}{}", &text[len / 2..], &text[..len / 2]);
        let old = clusters_from_text(&text);
        let new = clusters_from_text(&rotated);
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter(|| diff(black_box(&old), black_box(&new)));
        });
    }
    group.finish();
}

criterion_group!(benches, diff_small, diff_emoji, diff_scaling);
criterion_main!(benches);
