//! Columnability and column widths

use crate::models::ColumnScope;

/// Minimum number of lines worth aligning
const MIN_COLUMNABLE_LINES: usize = 2;

/// Minimum word count of the last line for any alignment to happen
const MIN_TRAILING_WORDS: usize = 2;

/// Indices of the lines whose words get aligned into columns
///
/// With [`ColumnScope::WholeBlock`] either every line qualifies or none
/// does. With [`ColumnScope::TrailingLines`] a line qualifies when every
/// line from it down to the last has its word count, which selects a
/// contiguous run at the end of the block.
///
/// Either way the last line needs at least two words and fewer than two
/// qualifying lines means no alignment at all.
pub fn columnable_lines(word_counts: &[usize], scope: ColumnScope) -> Vec<usize> {
    let Some(&last) = word_counts.last() else {
        return Vec::new();
    };
    if last < MIN_TRAILING_WORDS {
        return Vec::new();
    }

    let lines: Vec<usize> = match scope {
        ColumnScope::WholeBlock => {
            if word_counts.iter().all(|&count| count == last) {
                (0..word_counts.len()).collect()
            } else {
                Vec::new()
            }
        }
        ColumnScope::TrailingLines => {
            let run = word_counts
                .iter()
                .rev()
                .take_while(|&&count| count == last)
                .count();
            (word_counts.len() - run..word_counts.len()).collect()
        }
    };

    if lines.len() < MIN_COLUMNABLE_LINES {
        return Vec::new();
    }
    lines
}

/// Maximum natural width per column over the given lines
///
/// Only lines with the same word count as the first listed line take part;
/// for columnable lines that is all of them.
pub fn column_widths(word_widths: &[Vec<f32>], lines: &[usize]) -> Vec<f32> {
    let Some(&first) = lines.first() else {
        return Vec::new();
    };
    let count = word_widths[first].len();

    (0..count)
        .map(|column| {
            lines
                .iter()
                .map(|&line| &word_widths[line])
                .filter(|widths| widths.len() == count)
                .map(|widths| widths[column])
                .fold(0.0_f32, f32::max)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_block_equal_counts() {
        assert_eq!(columnable_lines(&[2, 2, 2], ColumnScope::WholeBlock), vec![0, 1, 2]);
    }

    #[test]
    fn test_whole_block_mismatch() {
        assert!(columnable_lines(&[3, 2, 2], ColumnScope::WholeBlock).is_empty());
    }

    #[test]
    fn test_single_line_never_columnable() {
        assert!(columnable_lines(&[4], ColumnScope::WholeBlock).is_empty());
        assert!(columnable_lines(&[4], ColumnScope::TrailingLines).is_empty());
    }

    #[test]
    fn test_last_line_needs_two_words() {
        assert!(columnable_lines(&[1, 1, 1], ColumnScope::WholeBlock).is_empty());
        assert!(columnable_lines(&[0, 0], ColumnScope::WholeBlock).is_empty());
    }

    #[test]
    fn test_empty_block() {
        assert!(columnable_lines(&[], ColumnScope::WholeBlock).is_empty());
    }

    #[test]
    fn test_trailing_lines_skips_leading_mismatch() {
        assert_eq!(columnable_lines(&[3, 2, 2, 2], ColumnScope::TrailingLines), vec![1, 2, 3]);
    }

    #[test]
    fn test_trailing_lines_requires_two() {
        assert!(columnable_lines(&[2, 2, 3], ColumnScope::TrailingLines).is_empty());
    }

    #[test]
    fn test_trailing_lines_stops_at_first_mismatch_from_bottom() {
        // Line 0 matches the count but line 1 breaks the run
        assert_eq!(columnable_lines(&[2, 5, 2, 2], ColumnScope::TrailingLines), vec![2, 3]);
    }

    #[test]
    fn test_column_widths_max_per_index() {
        let widths = vec![vec![49.0, 32.0, 40.0], vec![66.0, 49.0, 40.0], vec![61.0, 99.0, 25.0]];
        assert_eq!(column_widths(&widths, &[0, 1, 2]), vec![66.0, 99.0, 40.0]);
    }

    #[test]
    fn test_column_widths_only_listed_lines() {
        let widths = vec![vec![500.0], vec![10.0, 20.0], vec![30.0, 5.0]];
        assert_eq!(column_widths(&widths, &[1, 2]), vec![30.0, 20.0]);
    }

    #[test]
    fn test_column_widths_no_lines() {
        assert!(column_widths(&[vec![1.0]], &[]).is_empty());
    }
}
