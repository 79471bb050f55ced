//! IGT Layout WASM Module
//!
//! Aligns interlinear gloss text (transcription, morpheme break, gloss, ...)
//! into word columns, wrapping overlong rows into indented row groups. Text is
//! measured by the host page; the result is a display list for the page to
//! render.

pub mod error;
pub mod models;
pub mod measure;
pub mod igt_layout;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod api;

// Re-export commonly used types
pub use error::{ApiError, ConfigError};
pub use igt_layout::{align, IgtAligner, LayoutResult, RenderLine, RenderRowGroup, RenderWord};
pub use measure::{CachedMeasurer, Measurement, MonospaceMeasurer, TextMeasurer, WidthTable};
pub use models::*;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if console_log::init_with_level(log::Level::Debug).is_err() {
        return;
    }

    log::info!("IGT layout WASM module initialized");
}
