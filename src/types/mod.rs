//! Common types and error definitions for the quoting engine.
//!
//! This module contains:
//! - Error types using `thiserror`
//! - Type aliases for domain concepts

/// Error types for the quoting engine.
pub mod error;

/// Common type aliases for symbols, prices, volumes and quantities.
pub mod primitives;
