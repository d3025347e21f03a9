//! Shared configuration and logging for the export workspace.

pub mod config;
pub mod logger;
