// In: src/config.rs

//! The single source of truth for encoder configuration.
//!
//! This module defines `PackConfig`, which is designed to be created once at
//! the application boundary (directly, or deserialized from a config file)
//! and passed by reference into `pack_with`. The default configuration is
//! what `pack` uses and what the wire format's test vectors assume.

use serde::{Deserialize, Serialize};

//==================================================================================
// I. Rounding Mode
//==================================================================================

/// How scaled components are mapped onto quantized integers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// **Default:** round to the nearest integer, with exact `.5` ties going
    /// toward positive infinity. Maximizes precision.
    #[default]
    Nearest,

    /// Truncate toward zero, and skip the rounding margin during exponent
    /// selection. Bit-compatible with legacy encoders that predate rounding;
    /// use only when matching their output matters more than precision.
    Truncate,
}

//==================================================================================
// II. The Unified PackConfig
//==================================================================================

/// Configuration for one pack operation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct PackConfig {
    /// The quantization rounding rule.
    #[serde(default)]
    pub rounding: RoundingMode,
}

//==================================================================================
// III. Unit Tests
//==================================================================================
