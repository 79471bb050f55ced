//! Row-group packing
//!
//! When the aligned columns do not fit on one row they are broken into
//! row groups. Each subsequent group is indented further and packed against
//! a narrower budget, down to a floor that is a fixed percentage of the
//! original container width.

use std::ops::Range;
use crate::models::LayoutConfig;

/// A run of columns sharing one visual row
#[derive(Clone, Debug, PartialEq)]
pub struct RowGroup {
    /// Column indices in this group
    pub columns: Range<usize>,

    /// Width budget the columns were packed against
    pub max_width: f32,

    /// Sum of `column width + buffer` over the group's columns
    pub width: f32,

    /// Left indent
    pub indent: f32,
}

impl RowGroup {
    fn open(first_column: usize, max_width: f32) -> Self {
        Self {
            columns: first_column..first_column,
            max_width,
            width: 0.0,
            indent: 0.0,
        }
    }

    fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn push(&mut self, span: f32) {
        self.columns.end += 1;
        self.width += span;
    }
}

/// Narrowest width any row group may be packed against
///
/// Never wider than the container itself.
pub fn min_line_width(container_width: f32, percent: f32) -> f32 {
    (percent / 100.0 * container_width).round().min(container_width)
}

/// Pack columns into row groups
///
/// Columns are taken greedily in order while the running width stays
/// strictly under the group's budget. A column that does not fit opens a
/// new group whose budget is the previous budget less one indent, but not
/// below the floor. A column wider than an empty group's budget still goes
/// into that group on its own.
///
/// Group `k` is indented by `k * indent` unless that would leave less than
/// the floor, in which case it keeps the previous group's indent.
pub fn pack_row_groups(column_widths: &[f32], container_width: f32, config: &LayoutConfig) -> Vec<RowGroup> {
    let floor = min_line_width(container_width, config.min_line_width_as_percent);
    let mut groups = vec![RowGroup::open(0, container_width)];

    for (column, width) in column_widths.iter().enumerate() {
        let span = width + config.buffer;
        let Some(current) = groups.last_mut() else {
            break;
        };

        if current.is_empty() || current.width + span < current.max_width {
            current.push(span);
        } else {
            let max_width = (current.max_width - config.indent).max(floor);
            let mut next = RowGroup::open(column, max_width);
            next.push(span);
            groups.push(next);
        }
    }

    let mut previous_indent = 0.0;
    for (index, group) in groups.iter_mut().enumerate() {
        let candidate = index as f32 * config.indent;
        group.indent = if group.max_width - candidate < floor {
            previous_indent
        } else {
            candidate
        };
        previous_indent = group.indent;
    }

    log::trace!(
        "packed {} columns into {} row groups (floor {})",
        column_widths.len(),
        groups.len(),
        floor
    );

    groups
}
