//! IGT Layout WASM API
//!
//! This module provides the JavaScript-facing API for interlinear gloss text
//! alignment.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, configuration, error handling, and logging
//! - `layout`: Alignment entry points (`alignIgt`, `alignFormIgt`, ...)

pub mod helpers;
pub mod layout;

pub use layout::*;
