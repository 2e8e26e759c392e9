//! HIR layer tests
//!
//! Tests for the model resolution engine:
//! - Type vocabulary interpretation and projection
//! - Declaration discovery, naming and bindings
//! - Composition and cycle handling
//! - Resolution diagnostics

pub mod tests_composition;
pub mod tests_diagnostics;
pub mod tests_registry;
pub mod tests_vocabulary;
