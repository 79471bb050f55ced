//! Text measurement
//!
//! The aligner never renders anything itself; it asks a [`TextMeasurer`]
//! for the natural box of each word. In the browser that is an off-screen
//! span (see `dom`), elsewhere a fixed-advance approximation or a table of
//! widths the host measured ahead of time.

use std::cell::RefCell;
use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

/// Natural rendered box of a piece of text
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Measurement {
    pub width: f32,
    pub height: f32,
}

impl Measurement {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Failed measurements (NaN, infinite, negative) count as zero
    pub fn sanitized(self) -> Self {
        Self {
            width: crate::models::config::non_negative(self.width),
            height: crate::models::config::non_negative(self.height),
        }
    }
}

/// Gap used between natural-spaced words when a measurer has no way of
/// knowing the width of a space
pub const DEFAULT_SPACE_WIDTH: f32 = 4.0;

/// Measures the natural, non-wrapping rendered size of text
pub trait TextMeasurer {
    fn measure(&self, text: &str) -> Measurement;

    /// Measure text rendered with a line's CSS class
    ///
    /// Measurers that cannot style text ignore the class.
    fn measure_in(&self, text: &str, class: Option<&str>) -> Measurement {
        let _ = class;
        self.measure(text)
    }

    /// Width of the gap between two words of a line with `class`
    ///
    /// A lone space is collapsed by most renderers, so the gap is taken as
    /// the difference between "a a" and "aa".
    fn space_width(&self, class: Option<&str>) -> f32 {
        let spaced = self.measure_in("a a", class).sanitized().width;
        let joined = self.measure_in("aa", class).sanitized().width;
        (spaced - joined).max(0.0)
    }
}

impl<F> TextMeasurer for F
where
    F: Fn(&str) -> Measurement,
{
    fn measure(&self, text: &str) -> Measurement {
        self(text)
    }
}

/// Fixed advance per display column
///
/// Wide (East Asian) characters take two columns, combining marks none.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    pub advance: f32,
    pub line_height: f32,
}

impl MonospaceMeasurer {
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self { advance, line_height }
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(8.0, 16.0)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str) -> Measurement {
        Measurement::new(text.width() as f32 * self.advance, self.line_height)
    }

    fn space_width(&self, _class: Option<&str>) -> f32 {
        self.advance
    }
}

/// Measurements taken ahead of time by the host, keyed by text
///
/// Text missing from the table measures as zero. The gap between words is
/// read from a `" "` entry; without one [`DEFAULT_SPACE_WIDTH`] is used.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct WidthTable {
    entries: HashMap<String, Measurement>,
}

impl WidthTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, text: impl Into<String>, measurement: Measurement) {
        self.entries.insert(text.into(), measurement);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_space_entry(&self) -> bool {
        self.entries.contains_key(" ")
    }
}

impl<S: Into<String>> FromIterator<(S, Measurement)> for WidthTable {
    fn from_iter<I: IntoIterator<Item = (S, Measurement)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl TextMeasurer for WidthTable {
    fn measure(&self, text: &str) -> Measurement {
        match self.entries.get(text) {
            Some(measurement) => *measurement,
            None => {
                log::debug!("no measurement for {:?}, using zero width", text);
                Measurement::default()
            }
        }
    }

    fn space_width(&self, _class: Option<&str>) -> f32 {
        match self.entries.get(" ") {
            Some(space) => space.sanitized().width,
            None => DEFAULT_SPACE_WIDTH,
        }
    }
}

/// Memoizes an inner measurer, per text and line class
///
/// Owned by the caller and meant to live for a single layout pass, since
/// widths depend on the current font and container state.
pub struct CachedMeasurer<M> {
    inner: M,
    cache: RefCell<HashMap<(Option<String>, String), Measurement>>,
}

impl<M: TextMeasurer> CachedMeasurer<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Number of distinct (class, text) pairs measured so far
    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<M: TextMeasurer> TextMeasurer for CachedMeasurer<M> {
    fn measure(&self, text: &str) -> Measurement {
        self.measure_in(text, None)
    }

    fn measure_in(&self, text: &str, class: Option<&str>) -> Measurement {
        let key = (class.map(str::to_string), text.to_string());
        if let Some(hit) = self.cache.borrow().get(&key) {
            return *hit;
        }
        let measurement = self.inner.measure_in(text, class);
        self.cache.borrow_mut().insert(key, measurement);
        measurement
    }

    fn space_width(&self, class: Option<&str>) -> f32 {
        self.inner.space_width(class)
    }
}
