//! Display List for IGT Rendering
//!
//! This module defines the output structure returned from the aligner to JavaScript.
//! The LayoutResult contains every width, offset, indent and class needed to
//! rebuild the IGT element without further layout calculations.

use serde::{Serialize, Deserialize};

/// Top-level result of aligning one block
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct LayoutResult {
    /// Whether column alignment was applied
    pub columnable: bool,

    /// Whether the columns were broken into more than the single natural row
    pub wrapped: bool,

    /// Maximum natural width of each column (buffer excluded)
    pub column_widths: Vec<f32>,

    /// Row groups in display order; empty when the block is not columnable
    pub row_groups: Vec<RenderRowGroup>,

    /// One entry per input line, in input order
    pub lines: Vec<RenderLine>,
}

impl LayoutResult {
    /// Words of `line_index` that belong to `row_group`
    pub fn words_in_group(&self, line_index: usize, row_group: usize) -> Vec<&RenderWord> {
        self.lines
            .get(line_index)
            .map(|line| {
                line.words
                    .iter()
                    .filter(|w| w.row_group == Some(row_group))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A wrapped visual row of columns
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderRowGroup {
    /// Position of this group (0-based)
    pub index: usize,

    /// First column in this group
    pub column_start: usize,

    /// One past the last column in this group
    pub column_end: usize,

    /// Left margin (px)
    pub indent: f32,

    /// Top margin (px); `None` for the first group
    pub margin_top: Option<f32>,

    /// Width budget the group was packed against (px)
    pub max_width: f32,

    /// Sum of the display widths of the group's columns (px)
    pub width: f32,

    /// CSS class names to apply
    pub classes: Vec<String>,
}

impl RenderRowGroup {
    pub fn column_count(&self) -> usize {
        self.column_end - self.column_start
    }

    pub fn contains(&self, column: usize) -> bool {
        (self.column_start..self.column_end).contains(&column)
    }
}

/// A single line with its positioned words
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderLine {
    /// Line index for identification
    pub line_index: usize,

    /// Original line text
    pub text: String,

    /// CSS class carried by the input line
    pub class: Option<String>,

    /// Whether this line's words were sized to the column widths
    pub columnar: bool,

    /// Natural height of the line (px)
    pub height: f32,

    pub words: Vec<RenderWord>,
}

/// A positioned word
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderWord {
    pub text: String,

    /// Position of the word within its line (0-based)
    pub column: usize,

    /// X position relative to the start of its row (or line)
    pub x: f32,

    /// Display width; `column width + buffer` for aligned words
    pub width: f32,

    /// Measured width
    pub natural_width: f32,

    /// Owning row group, for aligned words
    pub row_group: Option<usize>,
}
