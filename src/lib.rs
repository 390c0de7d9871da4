//! This file is the root of the `vecpack` Rust crate.
//!
//! vecpack is a compact, deterministic codec that converts a fixed-precision
//! numeric vector into a URL-safe printable string and back, at three
//! characters per component plus one shared-exponent character. It is meant
//! for carrying vectors (e.g. embeddings) through text-only transports:
//! URLs, JSON, log lines.
//!
//! The crate root's responsibilities are strictly limited to declaring the
//! top-level modules and re-exporting the public API surface.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================

pub mod alphabet;
pub mod codec;
pub mod config;
pub mod kernels;

mod error;


//==================================================================================
// 2. Public API Re-exports
//==================================================================================

pub use codec::{pack, pack_with, unpack, Packed, OVERFLOW_SENTINEL};
pub use config::{PackConfig, RoundingMode};
pub use error::VecpackError;
