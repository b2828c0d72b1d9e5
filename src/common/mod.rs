//! Common utilities and shared functionality.
//!
//! Helper functions and data structures used across all other modules.
//!
//! # Utilities
//!
//! - Logging setup (`fern` + `log`)
//! - Local peer id generation
//!
//! # Data Structures
//!
//! - `CustomError` - boot-time error type

/// Common data structures.
pub mod structs;

/// Core utility functions.
#[allow(clippy::module_inception)]
pub mod common;

/// Implementation blocks for common types.
pub mod impls;
