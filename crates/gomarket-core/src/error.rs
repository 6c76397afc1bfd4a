//! # Error Types
//!
//! Codec error types for gomarket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gomarket-core errors (this file)                                      │
//! │  └── CodecError       - Persisted-representation encode/decode         │
//! │                                                                         │
//! │  gomarket-store errors (separate crate)                                │
//! │  └── StorageError     - Key-value backend failures                      │
//! │                                                                         │
//! │  Flow: CodecError ──► absorbed by CartStore (empty cart on load,       │
//! │        warn log on save) ──► never reaches the end user                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never String
//! 3. Malformed persisted data must surface as a value, never a panic

use thiserror::Error;

/// Errors produced by the cart's persisted-representation codec.
///
/// The cart is persisted as a JSON array of line-item records. Decoding
/// arbitrary stored text can fail; callers decide whether to propagate or
/// degrade (the store degrades to an empty cart on load).
#[derive(Debug, Error)]
pub enum CodecError {
    /// The persisted value is not a valid cart representation.
    ///
    /// ## When This Occurs
    /// - Stored text is not JSON at all
    /// - JSON shape does not match the line-item record layout
    /// - A field has the wrong type (e.g. quantity as string)
    #[error("invalid cart representation: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Convenience type alias for Results with CodecError.
pub type CodecResult<T> = Result<T, CodecError>;
