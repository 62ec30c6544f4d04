// Copyright (c) 2026 CyberNestSticks LLC
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Author: Lawrence (Larry) Foard

use std::cell::Cell;

use viewbench::{
    build_corpus, BenchConfig, LengthAware, OwnedText, Terminated, TextError, TextView,
};

fn small_corpus(tiny: bool) -> Vec<OwnedText> {
    let config = BenchConfig {
        iterations: 20,
        tiny,
        seed: Some(99),
        ..BenchConfig::default()
    };
    build_corpus(&config).expect("corpus construction")
}

#[test]
fn constructors_agree_on_every_corpus_element() {
    for tiny in [false, true] {
        for text in &small_corpus(tiny) {
            let scanned = TextView::from_terminated(text);
            let direct = TextView::from_length_aware(text);

            assert_eq!(scanned.len(), direct.len());
            assert_eq!(scanned.as_str(), direct.as_str());
            assert_eq!(direct.as_str(), text.as_str());
        }
    }
}

#[test]
fn zero_length_text_yields_zero_length_views() {
    let empty = OwnedText::new("").expect("empty text");
    assert!(empty.is_empty());
    assert_eq!(empty.len(), 0);
    assert_eq!(empty, OwnedText::default());

    let scanned = TextView::from_terminated(&empty);
    let direct = TextView::from_length_aware(&empty);

    assert!(scanned.is_empty());
    assert!(direct.is_empty());
    assert_eq!(scanned, "");
    assert_eq!(direct, "");
}

/// Buffer whose recorded length disagrees with what a terminator scan
/// would find, plus a counter for recorded-length lookups.
struct DecoyBuffer {
    data: &'static str,
    recorded: usize,
    lookups: Cell<usize>,
}

impl Terminated for DecoyBuffer {
    fn terminated_str(&self) -> &str {
        self.data
    }
}

impl LengthAware for DecoyBuffer {
    fn recorded_len(&self) -> usize {
        self.lookups.set(self.lookups.get() + 1);
        self.recorded
    }
}

#[test]
fn length_aware_construction_reads_the_length_field_and_never_scans() {
    let buffer = DecoyBuffer {
        data: "ab\0cd\0",
        recorded: 5,
        lookups: Cell::new(0),
    };

    // The scan stops at the first terminator it meets.
    let scanned = TextView::from_terminated(&buffer);
    assert_eq!(scanned, "ab");
    assert_eq!(buffer.lookups.get(), 0);

    // The length-aware path trusts the recorded length instead.
    let direct = TextView::from_length_aware(&buffer);
    assert_eq!(direct.len(), 5);
    assert_eq!(direct, "ab\0cd");
    assert_eq!(buffer.lookups.get(), 1);
}

#[test]
fn length_aware_length_matches_owner_length_exactly() {
    for text in &small_corpus(false) {
        assert_eq!(TextView::from_length_aware(text).len(), text.len());
        assert_eq!(text.as_view().len(), text.len());
    }
}

#[test]
fn interior_terminator_is_rejected() {
    match OwnedText::new("lorem\0ipsum") {
        Err(TextError::InteriorTerminator { offset }) => assert_eq!(offset, 5),
        other => panic!("expected interior terminator rejection, got {other:?}"),
    }

    assert!(OwnedText::try_from("\0").is_err());
    assert!(OwnedText::try_from("plain").is_ok());
}

#[test]
fn views_alias_the_owner_buffer() {
    let text = OwnedText::new("shared storage").expect("text");
    let view = text.as_view();

    let owner_start = text.as_str().as_ptr() as usize;
    let view_start = view.as_str().as_ptr() as usize;
    assert_eq!(owner_start, view_start);
}

#[test]
fn view_behaves_like_a_string_slice() {
    let text = OwnedText::new("Fusce est").expect("text");
    let view = text.as_view();

    // Deref / AsRef surface
    assert!(view.starts_with("Fusce"));
    assert_eq!(view.as_ref(), "Fusce est");

    // comparisons in both directions
    assert_eq!(view, "Fusce est");
    assert_eq!("Fusce est", view);
    assert_eq!(view, String::from("Fusce est"));
    assert_eq!(String::from("Fusce est"), view);

    assert_eq!(format!("{view}"), "Fusce est");
    assert_eq!(format!("{view:?}"), "\"Fusce est\"");
}
