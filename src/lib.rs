// Copyright (c) 2026 CyberNestSticks LLC
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Author: Lawrence (Larry) Foard

//! # ViewBench
//!
//! `viewbench` measures the cost of turning an owned, terminator-carrying
//! string buffer into a non-owning [`TextView`]. Two construction paths are
//! compared:
//!
//! - [`TextView::from_terminated`] walks the buffer until it finds the
//!   trailing terminator byte, strlen-style. O(n) in the string length.
//! - [`TextView::from_length_aware`] reads the owner's recorded length and
//!   slices directly. O(1) regardless of string length.
//!
//! Both paths alias the owner's buffer; neither copies character data.
//!
//! ## Main Functionality
//! - **[`OwnedText`]**: an owning UTF-8 buffer with a trailing terminator
//!   byte and an O(1) recorded length.
//! - **Capability traits**: [`Terminated`] exposes the terminated character
//!   data; [`LengthAware`] additionally exposes the recorded length. The
//!   efficient constructor dispatches on [`LengthAware`]; owners that only
//!   implement [`Terminated`] fall back to scanning.
//! - **Corpus generation**: [`build_corpus`] produces a shuffled workload of
//!   [`OwnedText`] values from a [`BenchConfig`].
//! - **Timing**: [`time_construction`] runs a constructor over a corpus
//!   between two monotonic-clock readings and yields a [`TimingSample`].
//!
//! ## Crate Features
//!
//! * **`serde_json`** (default): serialization and deserialization of
//!   [`BenchConfig`] via `serde`, plus [`BenchConfig::from_json`].
//!
//! ## Example
//!
//! ```rust
//! use viewbench::{build_corpus, time_construction, BenchConfig, TextView};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BenchConfig {
//!         iterations: 50,
//!         seed: Some(7),
//!         ..BenchConfig::default()
//!     };
//!     let corpus = build_corpus(&config)?;
//!
//!     let (views, sample) =
//!         time_construction(&corpus, "from_length_aware", |s| {
//!             TextView::from_length_aware(s)
//!         });
//!
//!     assert_eq!(views.len(), corpus.len());
//!     println!("{sample}");
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

use arcstr::{literal, ArcStr};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
#[cfg(feature = "serde_json")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::time::{Duration, Instant};

/// Byte marking the end of an [`OwnedText`]'s character data.
pub const TERMINATOR: u8 = 0;

/// Per-template corpus repetitions in optimized builds.
pub const RELEASE_ITERATIONS: usize = 400_000;

/// Reduced repetition count for unoptimized builds, where the full
/// corpus would make a run take minutes.
pub const DEBUG_ITERATIONS: usize = 20;

/// Default shuffle seed, giving a reproducible corpus order.
pub const DEFAULT_SEED: u64 = 1980;

/// Error for [`OwnedText`] construction.
#[derive(thiserror::Error, Debug)]
pub enum TextError {
    #[error("Interior terminator byte at offset {offset}")]
    InteriorTerminator { offset: usize },
}

/// Error for corpus construction.
#[derive(thiserror::Error, Debug)]
pub enum CorpusError {
    #[error("No template fragments configured")]
    NoTemplates,

    #[error("Text construction failure: {0}")]
    Text(#[from] TextError),
}

/// Owning string buffers that expose their character data followed by a
/// single trailing [`TERMINATOR`] byte.
///
/// This is the minimal capability a view constructor can rely on: the
/// data itself, with the end of the string discoverable only by scanning.
pub trait Terminated {
    /// Character data including the trailing terminator.
    fn terminated_str(&self) -> &str;
}

/// Owning string buffers that also record their length, so a view can be
/// formed without scanning.
///
/// Contract: `recorded_len()` must index the trailing terminator within
/// `terminated_str()` (and therefore lie on a char boundary).
pub trait LengthAware: Terminated {
    /// Stored byte length of the character data, excluding the terminator.
    fn recorded_len(&self) -> usize;
}

/// An owning UTF-8 string buffer with a trailing terminator byte and an
/// O(1) recorded length.
///
/// The character data never contains an interior terminator; construction
/// rejects it, as [`std::ffi::CString::new`] does for interior nuls.
#[derive(Clone, PartialEq, Eq)]
pub struct OwnedText {
    /// Character data plus exactly one trailing terminator.
    inner: Box<str>,
}

impl OwnedText {
    /// Copies `s` into a fresh terminated buffer.
    ///
    /// ### Example
    /// ```
    /// # use viewbench::OwnedText;
    /// let text = OwnedText::new("lorem ipsum")?;
    /// assert_eq!(text.len(), 11);
    /// assert_eq!(text.as_str(), "lorem ipsum");
    ///
    /// assert!(OwnedText::new("lorem\0ipsum").is_err());
    /// # Ok::<(), viewbench::TextError>(())
    /// ```
    pub fn new(s: &str) -> Result<Self, TextError> {
        if let Some(offset) = s.bytes().position(|b| b == TERMINATOR) {
            return Err(TextError::InteriorTerminator { offset });
        }

        let mut buf = String::with_capacity(s.len() + 1);
        buf.push_str(s);
        buf.push(TERMINATOR as char);

        Ok(OwnedText {
            inner: buf.into_boxed_str(),
        })
    }

    /// Recorded byte length of the character data, excluding the
    /// terminator. O(1).
    pub fn len(&self) -> usize {
        self.inner.len() - 1
    }

    /// Returns `true` if the character data is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The character data without the terminator.
    pub fn as_str(&self) -> &str {
        &self.inner[..self.len()]
    }

    /// A view of this text via the O(1) recorded-length path.
    ///
    /// ### Example
    /// ```
    /// # use viewbench::OwnedText;
    /// let text = OwnedText::new("cats and dogs")?;
    /// let view = text.as_view();
    /// assert_eq!(view, "cats and dogs");
    /// # Ok::<(), viewbench::TextError>(())
    /// ```
    pub fn as_view(&self) -> TextView<'_> {
        TextView::from_length_aware(self)
    }
}

impl Default for OwnedText {
    fn default() -> Self {
        OwnedText {
            inner: Box::from("\0"),
        }
    }
}

impl Terminated for OwnedText {
    fn terminated_str(&self) -> &str {
        &self.inner
    }
}

impl LengthAware for OwnedText {
    fn recorded_len(&self) -> usize {
        self.len()
    }
}

impl TryFrom<&str> for OwnedText {
    type Error = TextError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        OwnedText::new(s)
    }
}

impl PartialEq<str> for OwnedText {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for OwnedText {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::fmt::Display for OwnedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_str(), f)
    }
}

impl std::fmt::Debug for OwnedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self.as_str(), f)
    }
}

/// A non-owning view of a run of characters: a borrowed pointer plus an
/// explicit length.
///
/// Views alias their owner's buffer and never copy character data; the
/// owner must outlive the view, which the borrow checker enforces.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextView<'a>(&'a str);

impl<'a> TextView<'a> {
    /// Creates a view by scanning the owner's buffer for the terminator.
    ///
    /// Only the terminated character data is consulted; the view's length
    /// is discovered by walking the bytes, so the cost is proportional to
    /// the string length.
    ///
    /// ### Example
    /// ```
    /// # use viewbench::{OwnedText, TextView};
    /// let text = OwnedText::new("scan me")?;
    /// let view = TextView::from_terminated(&text);
    /// assert_eq!(view.len(), 7);
    /// assert_eq!(view, "scan me");
    /// # Ok::<(), viewbench::TextError>(())
    /// ```
    pub fn from_terminated<T: Terminated + ?Sized>(owner: &'a T) -> Self {
        let data = owner.terminated_str();
        let len = data
            .as_bytes()
            .iter()
            .position(|&b| b == TERMINATOR)
            .unwrap_or(data.len());
        TextView(&data[..len])
    }

    /// Creates a view from the owner's recorded length, without scanning.
    ///
    /// ### Example
    /// ```
    /// # use viewbench::{OwnedText, TextView};
    /// let text = OwnedText::new("no scan")?;
    /// let view = TextView::from_length_aware(&text);
    /// assert_eq!(view.len(), text.len());
    /// assert_eq!(view, "no scan");
    /// # Ok::<(), viewbench::TextError>(())
    /// ```
    pub fn from_length_aware<T: LengthAware + ?Sized>(owner: &'a T) -> Self {
        TextView(&owner.terminated_str()[..owner.recorded_len()])
    }

    /// Length of the viewed character data in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the view is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The viewed characters as a plain string slice.
    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

impl PartialEq<str> for TextView<'_> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TextView<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<TextView<'_>> for &str {
    fn eq(&self, other: &TextView<'_>) -> bool {
        *self == other.0
    }
}

impl PartialEq<String> for TextView<'_> {
    fn eq(&self, other: &String) -> bool {
        self.0 == *other
    }
}

impl PartialEq<TextView<'_>> for String {
    fn eq(&self, other: &TextView<'_>) -> bool {
        *self == other.0
    }
}

impl Deref for TextView<'_> {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl AsRef<str> for TextView<'_> {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl std::borrow::Borrow<str> for TextView<'_> {
    fn borrow(&self) -> &str {
        self.0
    }
}

impl fmt::Display for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

impl fmt::Debug for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.0, f)
    }
}

/// The default template fragments: eight multi-word sentences, each long
/// enough that corpus strings never fit an inline small-string buffer.
pub fn default_templates() -> Vec<ArcStr> {
    vec![
        literal!("Lorem ipsum dolor sit amet, consectetuer adipiscing elit."),
        literal!("Maecenas porttitor congue massa. Fusce posuere, magna sed"),
        literal!("pulvinar ultricies, purus lectus malesuada libero,"),
        literal!("sit amet commodo magna eros quis urna."),
        literal!("Nunc viverra imperdiet enim. Fusce est. Vivamus a tellus."),
        literal!("Pellentesque habitant morbi tristique senectus et netus et"),
        literal!("malesuada fames ac turpis egestas. Proin pharetra nonummy pede."),
        literal!("Mauris et orci. Aenean nec lorem. In porttitor. Donec laoreet nonummy augue."),
    ]
}

/// Benchmark configuration.
///
/// Unifies the corpus-shape knobs into one structure: repetition count,
/// template set, tiny-string mode, and shuffle seeding.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde_json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_json", serde(default))]
pub struct BenchConfig {
    /// Corpus repetitions; total corpus size is
    /// `iterations * templates.len()`.
    pub iterations: usize,

    /// Template fragments. At least one is required.
    pub templates: Vec<ArcStr>,

    /// Build `"#<i>"` strings instead of `"<template> (#<i>)"`, exercising
    /// allocator paths that favor short strings.
    pub tiny: bool,

    /// `Some` seeds the shuffle deterministically; `None` draws the seed
    /// from OS entropy.
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            iterations: if cfg!(debug_assertions) {
                DEBUG_ITERATIONS
            } else {
                RELEASE_ITERATIONS
            },
            templates: default_templates(),
            tiny: false,
            seed: Some(DEFAULT_SEED),
        }
    }
}

#[cfg(feature = "serde_json")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde_json")))]
impl BenchConfig {
    /// Parses a configuration from JSON. Missing fields take their
    /// default values.
    ///
    /// **Requires the `serde_json` feature.**
    ///
    /// ### Example
    /// ```
    /// # use viewbench::BenchConfig;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = BenchConfig::from_json(r#"{"iterations": 3, "tiny": true}"#)?;
    /// assert_eq!(config.iterations, 3);
    /// assert!(config.tiny);
    /// assert_eq!(config.templates.len(), 8);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Builds the shuffled benchmark corpus described by `config`.
///
/// Every element's content is deterministic given the configuration; only
/// the order is randomized. The shuffle happens exactly once, after all
/// elements have been appended.
///
/// ### Example
/// ```
/// # use viewbench::{build_corpus, BenchConfig};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = BenchConfig {
///     iterations: 4,
///     seed: Some(42),
///     ..BenchConfig::default()
/// };
/// let corpus = build_corpus(&config)?;
/// assert_eq!(corpus.len(), 4 * config.templates.len());
/// # Ok(())
/// # }
/// ```
pub fn build_corpus(config: &BenchConfig) -> Result<Vec<OwnedText>, CorpusError> {
    if config.templates.is_empty() {
        return Err(CorpusError::NoTemplates);
    }

    let mut corpus = Vec::with_capacity(config.iterations * config.templates.len());
    for i in 0..config.iterations {
        for template in &config.templates {
            let text = if config.tiny {
                format!("#{i}")
            } else {
                format!("{template} (#{i})")
            };
            corpus.push(OwnedText::new(&text)?);
        }
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    corpus.shuffle(&mut rng);

    Ok(corpus)
}

/// One timed run: a label, the element count, and the elapsed wall time
/// between two monotonic-clock readings.
#[derive(Debug, Clone)]
pub struct TimingSample {
    label: String,
    elements: usize,
    elapsed: Duration,
}

impl TimingSample {
    /// Label of the timed constructor.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of corpus elements processed.
    pub fn elements(&self) -> usize {
        self.elements
    }

    /// Raw elapsed wall time.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed wall time in milliseconds, with sub-millisecond precision.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

impl fmt::Display for TimingSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ms", self.label, self.elapsed_ms())
    }
}

/// Runs `constructor` once per corpus element between two readings of the
/// monotonic clock, collecting every view.
///
/// The views are returned alongside the sample so the construction work
/// cannot be optimized away and the caller can keep them alive for a fair
/// comparison across runs. An empty corpus yields an empty view list and
/// an effectively zero elapsed time.
///
/// ### Example
/// ```
/// # use viewbench::{build_corpus, time_construction, BenchConfig, TextView};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = BenchConfig {
///     iterations: 2,
///     seed: Some(1),
///     ..BenchConfig::default()
/// };
/// let corpus = build_corpus(&config)?;
///
/// let (views, sample) =
///     time_construction(&corpus, "scan", |s| TextView::from_terminated(s));
///
/// assert_eq!(views.len(), corpus.len());
/// assert!(sample.elapsed_ms() >= 0.0);
/// # Ok(())
/// # }
/// ```
pub fn time_construction<'a, F>(
    corpus: &'a [OwnedText],
    label: &str,
    constructor: F,
) -> (Vec<TextView<'a>>, TimingSample)
where
    F: Fn(&'a OwnedText) -> TextView<'a>,
{
    let start = Instant::now();

    let mut views = Vec::with_capacity(corpus.len());
    for text in corpus {
        views.push(constructor(text));
    }

    let elapsed = start.elapsed();

    let sample = TimingSample {
        label: label.to_owned(),
        elements: corpus.len(),
        elapsed,
    };

    (views, sample)
}
