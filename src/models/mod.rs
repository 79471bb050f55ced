//! Models module for the IGT layout engine
//!
//! This module contains the data models for interlinear text blocks, form
//! records and layout configuration.

pub mod block;
pub mod config;
pub mod form;

// Re-export commonly used types
pub use block::{tokenize, Block, Line, Word};
pub use config::{ColumnScope, Container, LayoutConfig};
pub use form::FormIgt;
