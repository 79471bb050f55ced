//! IGT Layout Engine
//!
//! This module computes column alignment for interlinear gloss text, generating a
//! LayoutResult with all widths, offsets, row groups and classes needed for
//! JavaScript to rebuild the DOM.

pub mod aligner;
pub mod columns;
pub mod row_groups;
pub mod display_list;

pub use aligner::{align, IgtAligner};
pub use columns::{column_widths, columnable_lines};
pub use row_groups::{min_line_width, pack_row_groups, RowGroup};
pub use display_list::{LayoutResult, RenderLine, RenderRowGroup, RenderWord};
