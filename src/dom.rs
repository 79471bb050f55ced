//! Browser-side text measurement
//!
//! [`DomMeasurer`] renders each word in an off-screen, non-wrapping span and
//! reads back its box. The span keeps white space as typed, so the width of
//! a space can be measured like any other text. [`JsMeasurer`] defers to a measuring function supplied
//! by the page.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};
use crate::error::ApiError;
use crate::measure::{Measurement, TextMeasurer};

const PROBE_STYLE: &str =
    "position: absolute; visibility: hidden; left: -10000px; top: 0; white-space: pre; display: inline;";

/// Measures text with a hidden `<span>` attached to the page
///
/// The span inherits the font of the element it is attached to, so attach it
/// inside the IGT container to measure with the container's font. While a
/// line is measured the span carries that line's class, picking up any
/// per-line font rules. The span is removed when the measurer is dropped.
pub struct DomMeasurer {
    probe: HtmlElement,
}

impl DomMeasurer {
    /// Attach the probe to the document body
    pub fn new() -> Result<Self, ApiError> {
        let document = document()?;
        let body = document
            .body()
            .ok_or_else(|| ApiError::DomUnavailable("document has no body".to_string()))?;
        Self::within(&body)
    }

    /// Attach the probe inside `parent`
    pub fn within(parent: &Element) -> Result<Self, ApiError> {
        let probe = document()?
            .create_element("span")
            .map_err(|e| ApiError::DomUnavailable(format!("create span: {:?}", e)))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| ApiError::DomUnavailable("span is not an HtmlElement".to_string()))?;

        probe
            .set_attribute("style", PROBE_STYLE)
            .map_err(|e| ApiError::DomUnavailable(format!("style probe: {:?}", e)))?;
        parent
            .append_child(&probe)
            .map_err(|e| ApiError::DomUnavailable(format!("attach probe: {:?}", e)))?;

        Ok(Self { probe })
    }
}

impl TextMeasurer for DomMeasurer {
    fn measure(&self, text: &str) -> Measurement {
        self.measure_in(text, None)
    }

    fn measure_in(&self, text: &str, class: Option<&str>) -> Measurement {
        self.probe.set_class_name(class.unwrap_or(""));
        self.probe.set_text_content(Some(text));
        Measurement::new(self.probe.offset_width() as f32, self.probe.offset_height() as f32)
    }
}

impl Drop for DomMeasurer {
    fn drop(&mut self) {
        self.probe.remove();
    }
}

fn document() -> Result<web_sys::Document, ApiError> {
    web_sys::window()
        .ok_or_else(|| ApiError::DomUnavailable("no window".to_string()))?
        .document()
        .ok_or_else(|| ApiError::DomUnavailable("window has no document".to_string()))
}

/// Measures text by calling `(text, className) => ({width, height})` in JavaScript
///
/// `className` is the line's class, or `undefined`. A plain number is taken
/// as the width with no height, in which case the aligner decides wrapping
/// by width alone. Anything unusable (a throw, `undefined`, missing fields)
/// measures as zero.
pub struct JsMeasurer {
    callback: js_sys::Function,
}

impl JsMeasurer {
    pub fn new(callback: js_sys::Function) -> Self {
        Self { callback }
    }
}

impl TextMeasurer for JsMeasurer {
    fn measure(&self, text: &str) -> Measurement {
        self.measure_in(text, None)
    }

    fn measure_in(&self, text: &str, class: Option<&str>) -> Measurement {
        let class = class.map_or(JsValue::UNDEFINED, JsValue::from_str);
        let value = match self.callback.call2(&JsValue::NULL, &JsValue::from_str(text), &class) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("measure callback threw for {:?}: {:?}", text, e);
                return Measurement::default();
            }
        };

        if let Some(width) = value.as_f64() {
            return Measurement::new(width as f32, 0.0);
        }

        Measurement::new(number_field(&value, "width"), number_field(&value, "height"))
    }
}

fn number_field(value: &JsValue, field: &str) -> f32 {
    if !value.is_object() {
        return 0.0;
    }
    js_sys::Reflect::get(value, &JsValue::from_str(field))
        .ok()
        .and_then(|v| v.as_f64())
        .map(|v| v as f32)
        .unwrap_or(0.0)
}
