//! Common utilities shared across the portal crates.
//!
//! This crate provides:
//! - Unified error handling mapped to HTTP responses
//! - Environment-driven configuration helpers

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
