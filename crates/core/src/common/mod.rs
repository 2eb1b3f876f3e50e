//! Common types shared by every component of the page-replacement simulator.
//!
//! This module provides:
//! 1. **Page Types:** The page identifier and frame-slot index used across the engine.
//! 2. **Error Handling:** The crate-wide error enum and `Result` alias.

/// Error types for configuration, validation and parsing.
pub mod error;

pub use error::{Result, SimError};

/// A virtual page number.
///
/// Pages carry no structure beyond identity; any non-negative integer is a
/// valid page.
pub type Page = u64;

/// Position of a resident page inside a policy's ordered frame sequence.
pub type FrameIndex = usize;
