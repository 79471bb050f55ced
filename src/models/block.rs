//! Interlinear text blocks
//!
//! A [`Block`] is one interlinear group (transcription, morpheme break,
//! gloss, ...). Each [`Line`] is split into whitespace-delimited words that
//! are meant to line up vertically with the words of the other lines.

use serde::{Deserialize, Serialize};

/// Split a line of text into words.
///
/// Words are separated by a space or by any run of two or more whitespace
/// characters. A lone tab or no-break space is part of the word it sits in.
/// Leading/trailing whitespace never yields empty words.
///
/// # Examples
/// - "les chiens" -> ["les", "chiens"]
/// - "  le-s \t chien-s " -> ["le-s", "chien-s"]
/// - "2\u{a0}km" -> ["2\u{a0}km"]
/// - "" -> []
pub fn tokenize(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut chars = text.trim().chars().peekable();

    while let Some(c) = chars.next() {
        let run = chars.peek().is_some_and(|next| next.is_whitespace());
        if c == ' ' || (c.is_whitespace() && run) {
            while chars.peek().is_some_and(|next| next.is_whitespace()) {
                chars.next();
            }
            if !word.is_empty() {
                words.push(std::mem::take(&mut word));
            }
        } else {
            word.push(c);
        }
    }

    if !word.is_empty() {
        words.push(word);
    }
    words
}

/// A single line of interlinear text
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Line {
    /// Original text as supplied by the host
    pub text: String,

    /// Words derived from `text`
    pub words: Vec<String>,

    /// Optional CSS class for the rendered line (e.g. "igt-morpheme-gloss")
    #[serde(default)]
    pub class: Option<String>,
}

impl Line {
    /// Create a line from raw text
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let words = tokenize(&text);
        Self {
            text,
            words,
            class: None,
        }
    }

    /// Create a line carrying a CSS class
    pub fn with_class(text: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            ..Self::new(text)
        }
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// An ordered group of lines to be aligned together
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Block {
    pub lines: Vec<Line>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a block from raw line texts
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: texts.into_iter().map(Line::new).collect(),
        }
    }

    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Word count of each line, in order
    pub fn word_counts(&self) -> Vec<usize> {
        self.lines.iter().map(Line::word_count).collect()
    }
}

/// A measured word: text plus its natural rendered box
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Word {
    pub text: String,
    pub width: f32,
    pub height: f32,
}
