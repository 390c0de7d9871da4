//! This module contains the pure, stateless kernel for shared-exponent
//! selection.
//!
//! Every component of a packed vector is quantized against a single
//! power-of-two exponent in `[-40, 23]`. The kernel scans the vector once,
//! applies the rounding margin, and reports either the exponent to use or an
//! overflow verdict for magnitudes no exponent can represent. Non-finite
//! components are rejected here, before any quantization happens.

use crate::config::RoundingMode;
use crate::error::VecpackError;
use crate::kernels::twos_complement::SIGN_BIT;

//==================================================================================
// 1. Constants
//==================================================================================

/// Smallest usable exponent; magnitudes below its granularity round to zero.
pub const EXPONENT_MIN: i32 = -40;

/// Largest usable exponent; anything beyond it is unrepresentable.
pub const EXPONENT_MAX: i32 = 23;

/// Offset mapping an exponent onto its alphabet index (`exponent + 40`).
pub const EXPONENT_BIAS: i32 = 40;

/// Multiplicative margin applied to magnitudes before exponent selection.
/// A value just under a power of two can round *up* to it during
/// quantization; the margin assigns such values the larger exponent so the
/// rounded integer still fits in 18 bits.
pub const ROUND_MARGIN: f64 = SIGN_BIT as f64 / (SIGN_BIT as f64 - 0.5);

//==================================================================================
// 2. Selection Outcome
//==================================================================================

/// Outcome of exponent selection for one vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharedExponent {
    /// Every scaled magnitude fits the 18-bit range at this exponent.
    Fits(i32),
    /// The vector's magnitude requires an exponent above the ceiling; the
    /// encoder must emit the overflow sentinel instead of component data.
    Overflow,
}

//==================================================================================
// 3. Selection
//==================================================================================

/// Selects the shared power-of-two exponent for `values`.
///
/// Fails with [`VecpackError::NonFiniteValue`] if any component is NaN or
/// infinite. The legacy [`RoundingMode::Truncate`] mode skips the rounding
/// margin, since truncation can never carry a value up to a power of two.
pub fn choose(values: &[f64], rounding: RoundingMode) -> Result<SharedExponent, VecpackError> {
    let mut max = 0.0f64;
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(VecpackError::NonFiniteValue { index, value });
        }
        let magnitude = match rounding {
            RoundingMode::Nearest => value.abs() * ROUND_MARGIN,
            RoundingMode::Truncate => value.abs(),
        };
        if magnitude > max {
            max = magnitude;
        }
    }

    // The margin product can saturate to infinity for magnitudes near
    // f64::MAX; those are far past the ceiling regardless.
    if !max.is_finite() {
        log::debug!("vector magnitude saturated the rounding margin; emitting overflow sentinel");
        return Ok(SharedExponent::Overflow);
    }

    let upper_bound = if max == 0.0 {
        EXPONENT_MIN
    } else {
        binary_upper_bound(max)
    };

    // Reserve 17 magnitude bits plus the sign bit of the 18-bit encoding.
    let exponent = upper_bound - 17;
    if exponent > EXPONENT_MAX {
        log::debug!(
            "vector needs exponent {exponent}, above ceiling {EXPONENT_MAX}; emitting overflow sentinel"
        );
        return Ok(SharedExponent::Overflow);
    }
    if exponent < EXPONENT_MIN {
        log::trace!("exponent {exponent} clamped to floor {EXPONENT_MIN}");
        return Ok(SharedExponent::Fits(EXPONENT_MIN));
    }
    log::trace!("selected shared exponent {exponent} (upper bound {upper_bound})");
    Ok(SharedExponent::Fits(exponent))
}

/// Exact `floor(1 + log2(x))` for finite `x > 0`: the smallest power-of-two
/// exponent `e` with `x < 2^e`, where `x == 2^(e-1)` maps to `e`.
///
/// Computed from the f64 bit pattern instead of `f64::log2`, whose rounding
/// at power-of-two boundaries would shift the chosen exponent by one and
/// change the wire output.
fn binary_upper_bound(x: f64) -> i32 {
    debug_assert!(x.is_finite() && x > 0.0);
    let (normalized, offset) = if x < f64::MIN_POSITIVE {
        // Subnormals carry no exponent bits; rescale into the normal range.
        // The scale is a power of two, so the product is exact.
        (x * 2f64.powi(64), -64)
    } else {
        (x, 0)
    };
    let biased = ((normalized.to_bits() >> 52) & 0x7ff) as i32;
    biased - 1022 + offset
}

//==================================================================================
// 4. Unit Tests
//==================================================================================
