//!
//! Traits Module
//!
//! Core traits the export manager is assembled from.
//!
//! - [`exporter`]: Defines the trait each document format implements.
//! - [`parser`]: Defines the generic trait for turning loosely-shaped input into typed records.

pub mod exporter;
pub mod parser;
