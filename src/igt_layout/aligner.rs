//! Block-level alignment
//!
//! This module contains the main entry point for IGT layout, taking a block
//! and a measurer and producing a LayoutResult.

use crate::measure::TextMeasurer;
use crate::models::config::non_negative;
use crate::models::{Block, Container, LayoutConfig, Word};
use super::columns::{column_widths, columnable_lines};
use super::display_list::*;
use super::row_groups::{pack_row_groups, RowGroup};

/// Rendered heights within this distance of each other count as equal
const HEIGHT_TOLERANCE: f32 = 0.5;

/// Aligner holding its configuration
#[derive(Clone, Debug, Default)]
pub struct IgtAligner {
    config: LayoutConfig,
}

impl IgtAligner {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Align a block; see [`align`]
    pub fn align<M>(&self, block: &Block, container: impl Into<Container>, measurer: &M) -> LayoutResult
    where
        M: TextMeasurer + ?Sized,
    {
        align(block, container, &self.config, measurer)
    }
}

/// Compute the column layout of a block
///
/// Words are measured once each, columnable lines get every word sized to
/// its column's widest word plus the buffer, and if the columns overflow the
/// container (or the host-observed height says the browser wrapped them)
/// the columns are packed into indented row groups.
///
/// Never fails: empty blocks, short lines and bad measurements all degrade
/// to a natural-spacing layout.
pub fn align<M>(block: &Block, container: impl Into<Container>, config: &LayoutConfig, measurer: &M) -> LayoutResult
where
    M: TextMeasurer + ?Sized,
{
    let config = config.sanitized();
    let container = container.into();
    let container_width = container.usable_width();

    let measured: Vec<Vec<Word>> = block
        .lines
        .iter()
        .map(|line| {
            let class = line.class.as_deref();
            line.words
                .iter()
                .map(|text| {
                    let m = measurer.measure_in(text, class).sanitized();
                    Word {
                        text: text.clone(),
                        width: m.width,
                        height: m.height,
                    }
                })
                .collect()
        })
        .collect();

    let line_heights: Vec<f32> = measured
        .iter()
        .map(|words| words.iter().map(|w| w.height).fold(0.0_f32, f32::max))
        .collect();

    let natural_widths: Vec<Vec<f32>> = measured
        .iter()
        .map(|words| words.iter().map(|w| w.width).collect())
        .collect();

    let columnar = columnable_lines(&block.word_counts(), config.column_scope);
    let widths = column_widths(&natural_widths, &columnar);

    log::debug!(
        "aligning {} lines: {} columnable, {} columns",
        block.len(),
        columnar.len(),
        widths.len()
    );

    let (groups, wrapped) = if columnar.is_empty() {
        (Vec::new(), false)
    } else if needs_wrapping(&widths, &line_heights, &container, &config) {
        (pack_row_groups(&widths, container_width, &config), true)
    } else {
        (vec![single_row(&widths, container_width, &config)], false)
    };

    if wrapped {
        log::debug!("wrapped into {} row groups", groups.len());
    }

    let row_groups: Vec<RenderRowGroup> = groups
        .iter()
        .enumerate()
        .map(|(index, group)| RenderRowGroup {
            index,
            column_start: group.columns.start,
            column_end: group.columns.end,
            indent: group.indent,
            margin_top: (index > 0).then_some(config.row_group_buffer),
            max_width: group.max_width,
            width: group.width,
            classes: if wrapped {
                vec![config.row_group_class.clone()]
            } else {
                Vec::new()
            },
        })
        .collect();

    let placements = column_placements(&widths, &groups, config.buffer);
    let lines = block
        .lines
        .iter()
        .zip(measured)
        .enumerate()
        .map(|(line_index, (line, words))| {
            let is_columnar = columnar.contains(&line_index);
            let words = if is_columnar {
                columnar_words(words, &placements)
            } else if words.len() > 1 {
                let space_width = non_negative(measurer.space_width(line.class.as_deref()));
                natural_words(words, space_width)
            } else {
                natural_words(words, 0.0)
            };
            RenderLine {
                line_index,
                text: line.text.clone(),
                class: line.class.clone(),
                columnar: is_columnar,
                height: line_heights[line_index],
                words,
            }
        })
        .collect();

    LayoutResult {
        columnable: !columnar.is_empty(),
        wrapped,
        column_widths: widths,
        row_groups,
        lines,
    }
}

/// Whether the aligned columns need breaking into row groups
///
/// With a host-observed height the old heuristic applies: the lines wrapped
/// if the container is not exactly as tall as its lines. Otherwise, or when
/// the measurer reported no heights to compare against, the columns wrap
/// when their single-row width exceeds the container.
fn needs_wrapping(widths: &[f32], line_heights: &[f32], container: &Container, config: &LayoutConfig) -> bool {
    let has_heights = line_heights.iter().any(|&h| h > 0.0);
    if container.rendered_height.is_some() && !has_heights {
        log::debug!("no line heights measured, using width overflow");
    }

    match container.rendered_height {
        Some(rendered) if has_heights => {
            let expected: f32 = line_heights.iter().sum();
            (rendered - expected).abs() > HEIGHT_TOLERANCE
        }
        _ => {
            let single_row: f32 = widths.iter().map(|w| w + config.buffer).sum();
            single_row > container.usable_width()
        }
    }
}

fn single_row(widths: &[f32], container_width: f32, config: &LayoutConfig) -> RowGroup {
    RowGroup {
        columns: 0..widths.len(),
        max_width: container_width,
        width: widths.iter().map(|w| w + config.buffer).sum(),
        indent: 0.0,
    }
}

/// Row group and x offset of a column
#[derive(Clone, Copy, Debug)]
struct Placement {
    row_group: usize,
    x: f32,
    width: f32,
}

fn column_placements(widths: &[f32], groups: &[RowGroup], buffer: f32) -> Vec<Placement> {
    let mut placements = Vec::with_capacity(widths.len());
    for (index, group) in groups.iter().enumerate() {
        let mut x = 0.0;
        for column in group.columns.clone() {
            let width = widths[column] + buffer;
            placements.push(Placement { row_group: index, x, width });
            x += width;
        }
    }
    placements
}

fn columnar_words(words: Vec<Word>, placements: &[Placement]) -> Vec<RenderWord> {
    words
        .into_iter()
        .zip(placements)
        .enumerate()
        .map(|(column, (word, placement))| RenderWord {
            text: word.text,
            column,
            x: placement.x,
            width: placement.width,
            natural_width: word.width,
            row_group: Some(placement.row_group),
        })
        .collect()
}

fn natural_words(words: Vec<Word>, space_width: f32) -> Vec<RenderWord> {
    let mut x = 0.0;
    words
        .into_iter()
        .enumerate()
        .map(|(column, word)| {
            if column > 0 {
                x += space_width;
            }
            let rendered = RenderWord {
                text: word.text,
                column,
                x,
                width: word.width,
                natural_width: word.width,
                row_group: None,
            };
            x += word.width;
            rendered
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{Measurement, MonospaceMeasurer, WidthTable, DEFAULT_SPACE_WIDTH};
    use crate::models::{ColumnScope, Line};

    fn mono() -> MonospaceMeasurer {
        MonospaceMeasurer::new(10.0, 20.0)
    }

    fn chiens() -> Block {
        Block::from_texts(["les chiens", "le-s chien-s", "DET-PL dog-PL"])
    }

    #[test]
    fn test_les_chiens_columns() {
        let result = align(&chiens(), 1000.0, &LayoutConfig::default(), &mono());

        assert!(result.columnable);
        assert!(!result.wrapped);
        // "DET-PL" (60) is the widest of column 0, "chien-s" (70) of column 1
        assert_eq!(result.column_widths, vec![60.0, 70.0]);

        for line in &result.lines {
            assert!(line.columnar);
            assert_eq!(line.words[0].width, 90.0);
            assert_eq!(line.words[0].x, 0.0);
            assert_eq!(line.words[1].width, 100.0);
            assert_eq!(line.words[1].x, 90.0);
        }
        assert_eq!(result.lines[0].words[0].natural_width, 30.0);
    }

    #[test]
    fn test_single_row_group_when_not_wrapped() {
        let result = align(&chiens(), 1000.0, &LayoutConfig::default(), &mono());
        assert_eq!(result.row_groups.len(), 1);

        let group = &result.row_groups[0];
        assert_eq!((group.column_start, group.column_end), (0, 2));
        assert_eq!(group.indent, 0.0);
        assert_eq!(group.margin_top, None);
        assert_eq!(group.width, 190.0);
        assert!(group.classes.is_empty());
    }

    #[test]
    fn test_single_line_is_natural() {
        let block = Block::from_texts(["les chiens"]);
        let result = align(&block, 1000.0, &LayoutConfig::default(), &mono());

        assert!(!result.columnable);
        assert!(!result.wrapped);
        assert!(result.row_groups.is_empty());
        assert!(result.column_widths.is_empty());

        let words = &result.lines[0].words;
        assert_eq!(words[0].width, 30.0);
        assert_eq!(words[0].x, 0.0);
        // one space (10) after "les" (30)
        assert_eq!(words[1].x, 40.0);
        assert_eq!(words[1].width, 60.0);
        assert_eq!(words[1].row_group, None);
    }

    #[test]
    fn test_mismatched_counts_are_natural() {
        let block = Block::from_texts(["a b c", "a b"]);
        let result = align(&block, 1000.0, &LayoutConfig::default(), &mono());
        assert!(!result.columnable);
        assert!(result.lines.iter().all(|l| !l.columnar));
        assert!(result
            .lines
            .iter()
            .flat_map(|l| &l.words)
            .all(|w| w.width == w.natural_width));
    }

    #[test]
    fn test_empty_block() {
        let result = align(&Block::new(), 300.0, &LayoutConfig::default(), &mono());
        assert_eq!(result, LayoutResult::default());
    }

    #[test]
    fn test_empty_lines() {
        let block = Block::from_texts(["", "   "]);
        let result = align(&block, 300.0, &LayoutConfig::default(), &mono());
        assert!(!result.columnable);
        assert_eq!(result.lines.len(), 2);
        assert!(result.lines.iter().all(|l| l.words.is_empty() && l.height == 0.0));
    }

    #[test]
    fn test_overflow_wraps_into_groups() {
        // each word is 10 chars = 100px, so every column is 130 with the buffer
        let word = "abcdefghij";
        let line = vec![word; 5].join(" ");
        let block = Block::from_texts([line.clone(), line]);
        let result = align(&block, 300.0, &LayoutConfig::default(), &mono());

        assert!(result.wrapped);
        assert_eq!(result.row_groups.len(), 4);

        let second = &result.row_groups[1];
        assert_eq!((second.column_start, second.column_end), (2, 3));
        assert_eq!(second.margin_top, Some(10.0));
        assert_eq!(second.indent, 40.0);
        assert_eq!(second.classes, vec!["igt-line-group".to_string()]);

        // x restarts at the start of each row group
        let words = &result.lines[1].words;
        assert_eq!(words[1].x, 130.0);
        assert_eq!(words[2].x, 0.0);
        assert_eq!(words[2].row_group, Some(1));
        assert_eq!(result.words_in_group(0, 0).len(), 2);
    }

    #[test]
    fn test_rendered_height_matching_means_no_wrap() {
        let word = "abcdefghij";
        let line = vec![word; 5].join(" ");
        let block = Block::from_texts([line.clone(), line]);
        // two lines of 20px; the host saw exactly 40px
        let container = Container::new(300.0).with_rendered_height(40.0);
        let result = align(&block, container, &LayoutConfig::default(), &mono());

        assert!(!result.wrapped);
        assert_eq!(result.row_groups.len(), 1);
    }

    #[test]
    fn test_rendered_height_mismatch_wraps() {
        let block = chiens();
        let container = Container::new(120.0).with_rendered_height(120.0);
        let result = align(&block, container, &LayoutConfig::default(), &mono());

        assert!(result.wrapped);
        assert_eq!(result.row_groups.len(), 2);
    }

    #[test]
    fn test_trailing_lines_scope() {
        let mut block = Block::new();
        block.push(Line::new("le ʃjɛ̃ s"));
        block.push(Line::new("les chiens"));
        block.push(Line::new("DET-PL dog-PL"));

        let config = LayoutConfig::default().with_column_scope(ColumnScope::TrailingLines);
        let result = align(&block, 1000.0, &config, &mono());

        assert!(result.columnable);
        assert!(!result.lines[0].columnar);
        assert!(result.lines[1].columnar);
        assert_eq!(result.lines[1].words[0].width, result.lines[2].words[0].width);

        let whole = align(&block, 1000.0, &LayoutConfig::default(), &mono());
        assert!(!whole.columnable);
    }

    #[test]
    fn test_bad_measurement_is_zero() {
        let measure = |text: &str| {
            if text == "chiens" {
                Measurement::new(f32::NAN, f32::NAN)
            } else {
                Measurement::new(10.0, 20.0)
            }
        };
        let result = align(&Block::from_texts(["les chiens", "a b"]), 1000.0, &LayoutConfig::default(), &measure);
        assert_eq!(result.lines[0].words[1].natural_width, 0.0);
        assert_eq!(result.column_widths, vec![10.0, 10.0]);
    }

    #[test]
    fn test_natural_line_keeps_gap_with_width_table() {
        let widths: WidthTable = [
            ("le", 20.0),
            ("ʃjɛ̃", 40.0),
            ("les", 30.0),
            ("chiens", 60.0),
            ("a", 10.0),
        ]
        .into_iter()
        .map(|(word, width)| (word, Measurement::new(width, 18.0)))
        .collect();
        let block = Block::from_texts(["le ʃjɛ̃", "les chiens a", "les chiens a"]);
        let config = LayoutConfig::default().with_column_scope(ColumnScope::TrailingLines);
        let result = align(&block, 600.0, &config, &widths);

        let phonetic = &result.lines[0];
        assert!(!phonetic.columnar);
        assert_eq!(phonetic.words[0].x, 0.0);
        assert_eq!(phonetic.words[1].x, 20.0 + DEFAULT_SPACE_WIDTH);
    }

    #[test]
    fn test_natural_gap_measured_per_class() {
        struct ClassFonts;
        impl TextMeasurer for ClassFonts {
            fn measure(&self, text: &str) -> Measurement {
                self.measure_in(text, None)
            }

            fn measure_in(&self, text: &str, class: Option<&str>) -> Measurement {
                let advance = if class == Some("ipa") { 12.0 } else { 6.0 };
                Measurement::new(text.chars().count() as f32 * advance, 18.0)
            }
        }

        let mut block = Block::new();
        block.push(Line::with_class("le ʃjɛ", "ipa"));
        let result = align(&block, 600.0, &LayoutConfig::default(), &ClassFonts);

        let words = &result.lines[0].words;
        assert_eq!(words[0].natural_width, 24.0);
        // one space in the "ipa" font
        assert_eq!(words[1].x, 36.0);
    }

    #[test]
    fn test_rendered_height_ignored_without_measured_heights() {
        let measure = |text: &str| Measurement::new(text.chars().count() as f32 * 10.0, 0.0);
        let container = Container::new(1000.0).with_rendered_height(40.0);
        let result = align(&chiens(), container, &LayoutConfig::default(), &measure);

        assert!(!result.wrapped);
        assert_eq!(result.row_groups.len(), 1);
    }

    #[test]
    fn test_aligner_uses_its_config() {
        let aligner = IgtAligner::new(LayoutConfig {
            buffer: 5.0,
            ..LayoutConfig::default()
        });
        let result = aligner.align(&chiens(), 1000.0, &mono());
        assert_eq!(result.lines[0].words[0].width, 65.0);
        assert_eq!(aligner.config().buffer, 5.0);
    }
}
