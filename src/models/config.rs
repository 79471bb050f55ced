//! Layout configuration and container metrics

use serde::{Deserialize, Serialize};
use crate::error::ConfigError;

/// Which lines of a block take part in column alignment
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColumnScope {
    /// All lines must share one word count
    #[default]
    WholeBlock,

    /// The longest run of trailing lines sharing the last line's word count
    TrailingLines,
}

/// Configuration for IGT alignment
///
/// Every field is optional when deserialized from JavaScript; missing
/// fields take the defaults below. The option names of the old jQuery
/// `igt()` widget are accepted as aliases.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal gap (px) added to every aligned word
    pub buffer: f32,

    /// Vertical gap (px) between wrapped row groups
    #[serde(alias = "rowGroupBuffer", alias = "lineGroupBuffer")]
    pub row_group_buffer: f32,

    /// Indent (px) added per wrapped row group
    pub indent: f32,

    /// Floor on row-group width, as a percentage of the container width
    #[serde(alias = "minLineWidthAsPercent", alias = "minLineWidthAsPerc")]
    pub min_line_width_as_percent: f32,

    /// CSS class given to wrapped row groups
    #[serde(alias = "rowGroupClass", alias = "lineGroupClass")]
    pub row_group_class: String,

    /// Columnability rule
    #[serde(alias = "columnScope")]
    pub column_scope: ColumnScope,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            buffer: 30.0,
            row_group_buffer: 10.0,
            indent: 40.0,
            min_line_width_as_percent: 50.0,
            row_group_class: "igt-line-group".to_string(),
            column_scope: ColumnScope::WholeBlock,
        }
    }
}

impl LayoutConfig {
    pub fn with_column_scope(mut self, scope: ColumnScope) -> Self {
        self.column_scope = scope;
        self
    }

    /// Check that every numeric option is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gaps = [
            ("buffer", self.buffer),
            ("row_group_buffer", self.row_group_buffer),
            ("indent", self.indent),
        ];
        for (field, value) in gaps {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidLength { field, value });
            }
        }

        let percent = self.min_line_width_as_percent;
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(ConfigError::InvalidPercent(percent));
        }

        Ok(())
    }

    /// Copy with every numeric option clamped into range.
    ///
    /// The layout pass itself never fails; out-of-range options are
    /// clamped here instead of rejected.
    pub fn sanitized(&self) -> Self {
        let percent = if self.min_line_width_as_percent.is_finite() {
            self.min_line_width_as_percent.clamp(0.0, 100.0)
        } else {
            LayoutConfig::default().min_line_width_as_percent
        };

        Self {
            buffer: non_negative(self.buffer),
            row_group_buffer: non_negative(self.row_group_buffer),
            indent: non_negative(self.indent),
            min_line_width_as_percent: percent,
            row_group_class: self.row_group_class.clone(),
            column_scope: self.column_scope,
        }
    }
}

/// The container a block is laid out in
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Container {
    /// Available width (px)
    pub width: f32,

    /// Height the host observed for the container with every line on a
    /// single row. When present, wrapping is inferred by comparing it with
    /// the sum of the line heights instead of by width overflow.
    #[serde(default, alias = "renderedHeight")]
    pub rendered_height: Option<f32>,
}

impl Container {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            rendered_height: None,
        }
    }

    pub fn with_rendered_height(mut self, height: f32) -> Self {
        self.rendered_height = Some(height);
        self
    }

    /// Width with non-finite and negative values treated as zero
    pub fn usable_width(&self) -> f32 {
        non_negative(self.width)
    }
}

impl From<f32> for Container {
    fn from(width: f32) -> Self {
        Container::new(width)
    }
}

pub(crate) fn non_negative(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.buffer, 30.0);
        assert_eq!(config.row_group_buffer, 10.0);
        assert_eq!(config.indent, 40.0);
        assert_eq!(config.min_line_width_as_percent, 50.0);
        assert_eq!(config.row_group_class, "igt-line-group");
        assert_eq!(config.column_scope, ColumnScope::WholeBlock);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: LayoutConfig = serde_json::from_str(r#"{"buffer": 20}"#).unwrap();
        assert_eq!(config.buffer, 20.0);
        assert_eq!(config.indent, 40.0);
    }

    #[test]
    fn test_widget_option_aliases() {
        let json = r#"{
            "buffer": 20,
            "lineGroupBuffer": 5,
            "indent": 60,
            "minLineWidthAsPerc": 75,
            "lineGroupClass": "old-form-igt-line-group",
            "columnScope": "trailing_lines"
        }"#;
        let config: LayoutConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.row_group_buffer, 5.0);
        assert_eq!(config.indent, 60.0);
        assert_eq!(config.min_line_width_as_percent, 75.0);
        assert_eq!(config.row_group_class, "old-form-igt-line-group");
        assert_eq!(config.column_scope, ColumnScope::TrailingLines);
    }

    #[test]
    fn test_validate_rejects_negative_buffer() {
        let config = LayoutConfig {
            buffer: -1.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLength { field: "buffer", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_percent_out_of_range() {
        let config = LayoutConfig {
            min_line_width_as_percent: 150.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPercent(_))));
    }

    #[test]
    fn test_sanitized_clamps() {
        let config = LayoutConfig {
            buffer: f32::NAN,
            indent: -10.0,
            min_line_width_as_percent: 250.0,
            ..LayoutConfig::default()
        }
        .sanitized();
        assert_eq!(config.buffer, 0.0);
        assert_eq!(config.indent, 0.0);
        assert_eq!(config.min_line_width_as_percent, 100.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_container_usable_width() {
        assert_eq!(Container::new(300.0).usable_width(), 300.0);
        assert_eq!(Container::new(-5.0).usable_width(), 0.0);
        assert_eq!(Container::new(f32::INFINITY).usable_width(), 0.0);
    }
}
