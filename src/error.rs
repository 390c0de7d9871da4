// In: src/error.rs

//! This module defines the single, unified error type for the entire vecpack library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Note that encode-side overflow is deliberately NOT represented here: a vector
//! whose magnitude exceeds the representable exponent range encodes to the
//! `Packed::Overflow` sentinel value, which is valid output, not a failure.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VecpackError {
    // =========================================================================
    // === Encode-side errors
    // =========================================================================
    /// A component of the input vector is NaN or infinite. The reference
    /// behavior for such input was undefined; this library rejects it up front.
    #[error("vector component {index} is not finite: {value}")]
    NonFiniteValue { index: usize, value: f64 },

    // =========================================================================
    // === Decode-side errors
    // =========================================================================
    /// A character in the packed string is outside the 64-symbol alphabet.
    #[error("invalid character {character:?} at position {position} in packed string")]
    InvalidCharacter { character: char, position: usize },

    /// The packed string's length is not of the form `1 + 3K`. A trailing
    /// partial group is rejected rather than silently dropped.
    #[error("malformed packed string length {0}: expected 1 + 3K characters")]
    MalformedLength(usize),

    /// The packed string is the one-character overflow sentinel `"-"`. The
    /// encoder that produced it saturated; there is no vector to recover.
    #[error("packed string is the overflow sentinel and carries no vector data")]
    Unrepresentable,

    // =========================================================================
    // === Internal errors
    // =========================================================================
    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),
}
