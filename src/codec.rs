//! This module contains the public encode/decode transforms of the codec.
//!
//! `pack` turns a numeric vector into a compact URL-safe string: one symbol
//! for the shared power-of-two exponent, then three symbols per component,
//! each component quantized to an 18-bit two's-complement integer. `unpack`
//! reverses the transform. Both are single-pass, stateless, terminating pure
//! functions; the only shared state is the constant alphabet table, so they
//! may be called concurrently from any number of threads.
//!
//! Encoding is lossy: the decoded vector can differ from the original by at
//! most the quantization step `2^(exponent - 1)` per component. A vector too
//! large for any representable exponent encodes to [`Packed::Overflow`], a
//! valid one-character output distinct from every normal encoding.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::alphabet;
use crate::config::{PackConfig, RoundingMode};
use crate::error::VecpackError;
use crate::kernels::exponent::{self, SharedExponent, EXPONENT_BIAS};
use crate::kernels::twos_complement::{self, GROUP_SYMBOLS};

//==================================================================================
// 1. The Packed Result Type
//==================================================================================

/// The one-character wire form flagging a vector whose magnitude exceeds the
/// representable range. Its character doubles as alphabet symbol 62 inside
/// normal packed strings; only the full one-character string is the sentinel.
pub const OVERFLOW_SENTINEL: &str = "-";

/// The result of a successful `pack`: either a normal packed string, or the
/// overflow sentinel for a vector whose magnitude no exponent can represent.
///
/// The two cases are kept distinct so callers can tell "valid but saturated"
/// from "malformed" without string comparisons. Both serialize to their wire
/// form, so a `Packed` drops directly into JSON payloads and URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packed {
    /// A normal encoding: exponent symbol plus three symbols per component.
    Vector(String),
    /// The saturated case, rendered as [`OVERFLOW_SENTINEL`]. The input
    /// vector was discarded; no partial data is carried.
    Overflow,
}

impl Packed {
    /// Parses a wire string into a `Packed`, validating the character set
    /// and the `1 + 3K` length form. The exact sentinel string parses to
    /// [`Packed::Overflow`].
    pub fn from_wire(packed: &str) -> Result<Self, VecpackError> {
        if packed == OVERFLOW_SENTINEL {
            return Ok(Packed::Overflow);
        }
        if packed.len() % GROUP_SYMBOLS != 1 {
            return Err(VecpackError::MalformedLength(packed.len()));
        }
        for (position, character) in packed.chars().enumerate() {
            if alphabet::index_of(character).is_none() {
                return Err(VecpackError::InvalidCharacter {
                    character,
                    position,
                });
            }
        }
        Ok(Packed::Vector(packed.to_string()))
    }

    /// The wire form of this encoding.
    pub fn as_str(&self) -> &str {
        match self {
            Packed::Vector(string) => string.as_str(),
            Packed::Overflow => OVERFLOW_SENTINEL,
        }
    }

    /// Consumes the encoding, returning the wire form as an owned string.
    pub fn into_string(self) -> String {
        match self {
            Packed::Vector(string) => string,
            Packed::Overflow => OVERFLOW_SENTINEL.to_string(),
        }
    }

    /// True if this is the saturated, unrepresentable case.
    pub fn is_overflow(&self) -> bool {
        matches!(self, Packed::Overflow)
    }
}

impl fmt::Display for Packed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Packed {
    type Err = VecpackError;

    fn from_str(packed: &str) -> Result<Self, Self::Err> {
        Packed::from_wire(packed)
    }
}

impl Serialize for Packed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Packed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PackedVisitor;

        impl<'de> Visitor<'de> for PackedVisitor {
            type Value = Packed;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a packed vector string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Packed, E> {
                Packed::from_wire(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(PackedVisitor)
    }
}

//==================================================================================
// 2. Encoding
//==================================================================================

/// Encodes a numeric vector with the default configuration.
///
/// Accepts any component type that widens losslessly to `f64` (`f32`, `f64`,
/// and the smaller integer types). The output is pure ASCII over the
/// 64-symbol alphabet: exactly `1 + 3 * values.len()` characters for a
/// normal encoding, the single exponent-index-0 character for an empty
/// vector, or the overflow sentinel.
///
/// Fails only on NaN or infinite components. Magnitudes below the exponent
/// floor are silently clamped; the precision loss is expected and unreported.
pub fn pack<T>(values: &[T]) -> Result<Packed, VecpackError>
where
    T: Copy + Into<f64>,
{
    pack_with(values, &PackConfig::default())
}

/// Encodes a numeric vector with an explicit configuration.
pub fn pack_with<T>(values: &[T], config: &PackConfig) -> Result<Packed, VecpackError>
where
    T: Copy + Into<f64>,
{
    // The empty vector has a fixed one-character encoding, independent of
    // the exponent machinery.
    if values.is_empty() {
        return Ok(Packed::Vector(alphabet::symbol_of(0).to_string()));
    }

    let widened: Vec<f64> = values.iter().map(|&value| value.into()).collect();
    let exponent = match exponent::choose(&widened, config.rounding)? {
        SharedExponent::Overflow => return Ok(Packed::Overflow),
        SharedExponent::Fits(exponent) => exponent,
    };

    let power = 2f64.powi(exponent);
    let mut out = String::with_capacity(1 + GROUP_SYMBOLS * widened.len());
    out.push(alphabet::symbol_of((exponent + EXPONENT_BIAS) as u8));
    for &value in &widened {
        let scaled = value / power;
        let quantized = match config.rounding {
            RoundingMode::Nearest => round_half_up(scaled),
            RoundingMode::Truncate => scaled.trunc(),
        };
        twos_complement::encode_group(quantized as i64, &mut out);
    }
    Ok(Packed::Vector(out))
}

/// Rounds to the nearest integer with exact `.5` ties toward positive
/// infinity, the tie rule of the wire format. `f64::round` ties away from
/// zero instead, which diverges at negative half-integers (`-0.5` must
/// become 0, not -1).
///
/// For the magnitudes quantization produces (|x| < 2^18) the subtraction
/// `x - floor(x)` is exact, so the tie comparison is exact as well; the
/// naive `(x + 0.5).floor()` would double-round just below ties.
fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

//==================================================================================
// 3. Decoding
//==================================================================================

/// Decodes a packed string into a vector of floats.
///
/// Accepts any string produced by a compliant encoder and returns a vector
/// of length `(len - 1) / 3`. Validation is strict: a length not of the form
/// `1 + 3K` or a character outside the alphabet is an error, and the exact
/// overflow sentinel string fails with [`VecpackError::Unrepresentable`]
/// rather than decoding to anything.
pub fn unpack<T: Float>(packed: &str) -> Result<Vec<T>, VecpackError> {
    if packed == OVERFLOW_SENTINEL {
        return Err(VecpackError::Unrepresentable);
    }
    if packed.len() % GROUP_SYMBOLS != 1 {
        return Err(VecpackError::MalformedLength(packed.len()));
    }

    let digits = digits_of(packed)?;
    let exponent = i32::from(digits[0]) - EXPONENT_BIAS;
    let unit = 2f64.powi(exponent);

    let mut vector = Vec::with_capacity((digits.len() - 1) / GROUP_SYMBOLS);
    for group in digits[1..].chunks_exact(GROUP_SYMBOLS) {
        let integer = twos_complement::decode_group(group[0], group[1], group[2]);
        let component = f64::from(integer) * unit;
        let value = T::from(component).ok_or_else(|| {
            VecpackError::InternalError(format!(
                "decoded component {component} is not representable in the output type"
            ))
        })?;
        vector.push(value);
    }
    Ok(vector)
}

/// Maps every character of a packed string through the inverse alphabet.
fn digits_of(packed: &str) -> Result<Vec<u8>, VecpackError> {
    packed
        .chars()
        .enumerate()
        .map(|(position, character)| {
            alphabet::index_of(character).ok_or(VecpackError::InvalidCharacter {
                character,
                position,
            })
        })
        .collect()
}
