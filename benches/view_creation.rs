// Copyright (c) 2026 CyberNestSticks LLC
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Author: Lawrence (Larry) Foard

//! Criterion comparison of the two view construction paths, over both
//! corpus modes.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use viewbench::{build_corpus, BenchConfig, OwnedText, TextView, DEFAULT_SEED};

fn corpus_for(tiny: bool) -> Vec<OwnedText> {
    let config = BenchConfig {
        iterations: 2_000,
        tiny,
        seed: Some(DEFAULT_SEED),
        ..BenchConfig::default()
    };
    build_corpus(&config).expect("corpus construction")
}

fn bench_view_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_creation");

    for (mode, tiny) in [("long", false), ("tiny", true)] {
        let corpus = corpus_for(tiny);
        group.throughput(Throughput::Elements(corpus.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("from_terminated", mode),
            &corpus,
            |b, corpus| {
                b.iter(|| {
                    for text in corpus {
                        black_box(TextView::from_terminated(text));
                    }
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("from_length_aware", mode),
            &corpus,
            |b, corpus| {
                b.iter(|| {
                    for text in corpus {
                        black_box(TextView::from_length_aware(text));
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_view_creation);
criterion_main!(benches);
