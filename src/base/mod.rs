//! Foundation types for the model documentation toolchain.
//!
//! This module provides fundamental types used throughout the engine:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - Vocabulary constants (constructor and wrapper names)
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod position;

pub use position::{LineCol, LineIndex};

// Re-export text-size types for convenience
pub use text_size::{self, TextRange, TextSize};
