//! IGT alignment API
//!
//! JavaScript-facing entry points. Each call builds a fresh block from the
//! supplied lines, measures it, and returns the serialized LayoutResult.

use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::Element;
#[cfg(target_arch = "wasm32")]
use crate::dom::{DomMeasurer, JsMeasurer};
use crate::error::ApiError;
use crate::igt_layout::{align, LayoutResult};
#[cfg(target_arch = "wasm32")]
use crate::measure::{CachedMeasurer, TextMeasurer};
use crate::measure::{WidthTable, DEFAULT_SPACE_WIDTH};
#[cfg(target_arch = "wasm32")]
use crate::models::{ColumnScope, Container, FormIgt};
use crate::models::{Block, LayoutConfig};
use crate::{wasm_info, wasm_log, wasm_warn};
#[cfg(target_arch = "wasm32")]
use super::helpers::has_column_scope;
use super::helpers::{deserialize, layout_config, serialize, to_js_error};

/// Run `f` with the page-supplied measurer, or a DOM span if there is none
///
/// The span is attached inside `element` when given, so words are measured
/// with the container's font; otherwise it goes on the document body.
/// Either way measurements are memoized for this call only.
#[cfg(target_arch = "wasm32")]
fn with_measurer<R>(
    measure: Option<js_sys::Function>,
    element: Option<Element>,
    f: impl FnOnce(&dyn TextMeasurer) -> R,
) -> Result<R, ApiError> {
    match (measure, element) {
        (Some(callback), _) => {
            let measurer = CachedMeasurer::new(JsMeasurer::new(callback));
            Ok(f(&measurer))
        }
        (None, Some(element)) => {
            let measurer = CachedMeasurer::new(DomMeasurer::within(&element)?);
            Ok(f(&measurer))
        }
        (None, None) => {
            let measurer = CachedMeasurer::new(DomMeasurer::new()?);
            Ok(f(&measurer))
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn align_with(
    block: &Block,
    container: Container,
    config: &LayoutConfig,
    measure: Option<js_sys::Function>,
    element: Option<Element>,
) -> Result<JsValue, ApiError> {
    wasm_log!("  Block has {} lines, container width {}", block.len(), container.width);

    let result = with_measurer(measure, element, |measurer| align(block, container, config, measurer))?;

    wasm_info!(
        "  Layout: columnable={}, wrapped={}, {} row groups",
        result.columnable,
        result.wrapped,
        result.row_groups.len()
    );

    serialize(&result, "LayoutResult serialization error")
}

/// Align interlinear lines into columns
///
/// # Parameters
/// * `lines_js` - Array of line strings (e.g. transcription, morpheme break, gloss)
/// * `container_width` - Available width in pixels
/// * `config_js` - Optional layout configuration object
/// * `measure` - Optional `(text, className) => ({width, height})`; a hidden DOM span is used if absent
/// * `element` - Optional IGT container; the hidden span is placed inside it to pick up its font
///
/// # Returns
/// LayoutResult with per-word widths, offsets and row groups
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = alignIgt)]
pub fn align_igt(
    lines_js: JsValue,
    container_width: f32,
    config_js: JsValue,
    measure: Option<js_sys::Function>,
    element: Option<Element>,
) -> Result<JsValue, JsValue> {
    wasm_info!("alignIgt called");

    let run = || -> Result<JsValue, ApiError> {
        let lines: Vec<String> = deserialize(lines_js, "Lines deserialization error")?;
        let config = layout_config(config_js)?;
        align_with(&Block::from_texts(lines), Container::new(container_width), &config, measure, element)
    };

    run().map_err(to_js_error)
}

/// Align using the height the page observed for the unaligned container
///
/// Keeps the behaviour of the old widget: wrapping is applied when the
/// container is not exactly as tall as its lines. Measurers that report no
/// heights fall back to the width overflow rule.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = alignIgtInContainer)]
pub fn align_igt_in_container(
    lines_js: JsValue,
    container_width: f32,
    rendered_height: f32,
    config_js: JsValue,
    measure: Option<js_sys::Function>,
    element: Option<Element>,
) -> Result<JsValue, JsValue> {
    wasm_info!("alignIgtInContainer called");

    let run = || -> Result<JsValue, ApiError> {
        let lines: Vec<String> = deserialize(lines_js, "Lines deserialization error")?;
        let config = layout_config(config_js)?;
        let container = Container::new(container_width).with_rendered_height(rendered_height);
        align_with(&Block::from_texts(lines), container, &config, measure, element)
    };

    run().map_err(to_js_error)
}

/// Align with widths the page measured ahead of time
///
/// # Parameters
/// * `widths_js` - Object mapping each word to `{width, height}`, plus an
///   optional `" "` entry giving the gap between words on unaligned lines
#[wasm_bindgen(js_name = alignIgtWithWidths)]
pub fn align_igt_with_widths(
    lines_js: JsValue,
    container_width: f32,
    widths_js: JsValue,
    config_js: JsValue,
) -> Result<JsValue, JsValue> {
    wasm_info!("alignIgtWithWidths called");

    let run = || -> Result<JsValue, ApiError> {
        let lines: Vec<String> = deserialize(lines_js, "Lines deserialization error")?;
        let widths: WidthTable = deserialize(widths_js, "Widths deserialization error")?;
        let config = layout_config(config_js)?;

        wasm_log!("  {} lines, {} measured words", lines.len(), widths.len());
        if !widths.has_space_entry() {
            wasm_warn!("No \" \" width given, unaligned lines use a {}px gap", DEFAULT_SPACE_WIDTH);
        }

        let result = align(&Block::from_texts(lines), container_width, &config, &widths);
        serialize(&result, "LayoutResult serialization error")
    };

    run().map_err(to_js_error)
}

/// Align the IGT fields of a form record
///
/// Aligns the trailing lines (so a phonetic transcription with a different
/// word count does not block alignment) unless the config sets `column_scope`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = alignFormIgt)]
pub fn align_form_igt(
    form_js: JsValue,
    container_width: f32,
    config_js: JsValue,
    measure: Option<js_sys::Function>,
    element: Option<Element>,
) -> Result<JsValue, JsValue> {
    wasm_info!("alignFormIgt called");

    let run = || -> Result<JsValue, ApiError> {
        let form: FormIgt = deserialize(form_js, "Form deserialization error")?;
        let explicit_scope = has_column_scope(&config_js);
        let mut config = layout_config(config_js)?;
        if !explicit_scope {
            config.column_scope = ColumnScope::TrailingLines;
        }
        let block = form.to_block();
        if block.lines.is_empty() {
            wasm_warn!("Form has no IGT fields to align");
        }
        align_with(&block, Container::new(container_width), &config, measure, element)
    };

    run().map_err(to_js_error)
}

/// JSON-string variant of [`align_igt_with_widths`]
#[wasm_bindgen(js_name = alignIgtJson)]
pub fn align_igt_json_js(
    lines_json: &str,
    container_width: f32,
    widths_json: &str,
    config_json: &str,
) -> Result<String, JsValue> {
    wasm_info!("alignIgtJson called");
    align_igt_json(lines_json, container_width, widths_json, config_json).map_err(to_js_error)
}

/// Align lines given as JSON and return the LayoutResult as JSON
///
/// An empty `config_json` means the default configuration.
pub fn align_igt_json(
    lines_json: &str,
    container_width: f32,
    widths_json: &str,
    config_json: &str,
) -> Result<String, ApiError> {
    let lines: Vec<String> = serde_json::from_str(lines_json)
        .map_err(|e| ApiError::deserialize("Lines deserialization error", e))?;
    let widths: WidthTable = serde_json::from_str(widths_json)
        .map_err(|e| ApiError::deserialize("Widths deserialization error", e))?;
    let config = if config_json.trim().is_empty() {
        LayoutConfig::default()
    } else {
        let config: LayoutConfig = serde_json::from_str(config_json)
            .map_err(|e| ApiError::deserialize("Config deserialization error", e))?;
        config.validate()?;
        config
    };

    let result: LayoutResult = align(&Block::from_texts(lines), container_width, &config, &widths);
    serde_json::to_string(&result).map_err(|e| ApiError::serialize("LayoutResult serialization error", e))
}

/// Default layout configuration, for pages that want to tweak a copy
#[wasm_bindgen(js_name = defaultLayoutConfig)]
pub fn default_layout_config() -> Result<JsValue, JsValue> {
    serialize(&LayoutConfig::default(), "Config serialization error").map_err(to_js_error)
}
