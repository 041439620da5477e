//! Helpers shared across layers.
//!
//! - [`code_generator`] - Short code generation
//! - [`url_shape`] - Syntactic URL check for submitted links

pub mod code_generator;
pub mod url_shape;
