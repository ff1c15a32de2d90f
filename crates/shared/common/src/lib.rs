//! Common utilities shared across the onboarding crates.
//!
//! This crate provides:
//! - Unified error handling for store faults and HTTP responses
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
