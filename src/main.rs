// Copyright (c) 2026 CyberNestSticks LLC
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Author: Lawrence (Larry) Foard

//! One-shot measurement run: build the shuffled corpus once, then time
//! each view constructor over it and print the elapsed milliseconds.

use std::error::Error;
use std::hint::black_box;

use viewbench::{build_corpus, time_construction, BenchConfig, TextView};

fn main() -> Result<(), Box<dyn Error>> {
    println!("\n*** String View Creation Benchmark ***\n");

    let config = BenchConfig::default();
    let corpus = build_corpus(&config)?;

    println!("String count: {}k\n", corpus.len() / 1000);

    let (scanned, sample) = time_construction(&corpus, "TextView::from_terminated", |s| {
        TextView::from_terminated(s)
    });
    println!("{sample}");

    let (length_aware, sample) = time_construction(&corpus, "TextView::from_length_aware", |s| {
        TextView::from_length_aware(s)
    });
    println!("{sample}");

    // keep both result sets live past the second measurement
    black_box((&scanned, &length_aware));

    Ok(())
}
