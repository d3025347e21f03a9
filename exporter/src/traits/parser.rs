//! Parser Trait
//!
//! This module defines the [`Parser`] trait, which provides a generic interface for parsing
//! loosely-shaped input into strongly-typed Rust structures. Implementations validate the input
//! and return a [`ExportError::MalformedRecord`] naming the offending record on failure.
//!
//! # Example
//!
//! ```rust
//! use exporter::error::ExportError;
//! use exporter::traits::parser::Parser;
//! use serde_json::Value;
//!
//! struct CountParser;
//!
//! impl<'a> Parser<&'a Value, usize> for CountParser {
//!     fn parse(&self, raw: &'a Value) -> Result<usize, ExportError> {
//!         raw.as_array()
//!             .map(|items| items.len())
//!             .ok_or_else(|| ExportError::malformed(0, "expected an array"))
//!     }
//! }
//!
//! assert_eq!(CountParser.parse(&serde_json::json!([1, 2])).unwrap(), 2);
//! ```

use crate::error::ExportError;

/// A generic trait for parsing data into a strongly-typed Rust structure.
///
/// # Type Parameters
///
/// * `Input` - The input type to be parsed.
/// * `Output` - The output type produced by the parser.
pub trait Parser<Input, Output> {
    /// Parse an input value into the target type.
    ///
    /// # Errors
    ///
    /// Returns a [`ExportError`] if the input does not conform to the expected schema.
    fn parse(&self, input: Input) -> Result<Output, ExportError>;
}
