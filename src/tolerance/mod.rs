//! # Numeric Tolerance Module
//!
//! Scaled comparison and angle normalization helpers shared by every
//! coordinate type.
//!
//! ## Decimal Rounding
//!
//! Doubles are compared by rounding them to a fixed number of digits after
//! the decimal point. Rounding works on the shortest decimal string that
//! round-trips to the same `f64` (what `{}` / `{:e}` formatting prints), and
//! ties are resolved half-up, i.e. away from zero:
//!
//! - `0.5` rounded to 0 digits is `1`
//! - `-2.5` rounded to 0 digits is `-3`
//! - `1.0000000000005` rounded to 12 digits is `1.000000000001`
//!
//! Results that round to zero never carry a sign, so `-0.0` and `1e-17`
//! both render as `0.000000000000` at scale 12.
//!
//! ## Examples
//!
//! ```rust
//! use geocoord::tolerance::{round_half_up, scaled_equal};
//!
//! assert_eq!(round_half_up(2.345, 2).unwrap(), "2.35");
//! assert!(scaled_equal(3.0, 3.0 + 1e-13, 12).unwrap());
//! assert!(!scaled_equal(3.0, 3.0 + 1.5e-12, 12).unwrap());
//! ```

use crate::{CoordinateError, Result};
use std::cmp::Ordering;

/// Returns `true` iff `d` is finite and not negative
pub fn is_positive_finite(d: f64) -> bool {
    d.is_finite() && d >= 0.0
}

/// Rounds `value` half-up to `scale` fractional digits and returns the decimal string
///
/// # Errors
///
/// `ArithmeticError` if `value` is infinite or NaN.
pub fn round_half_up(value: f64, scale: u32) -> Result<String> {
    if !value.is_finite() {
        return Err(CoordinateError::ArithmeticError(format!(
            "cannot round non-finite value {}",
            value
        )));
    }

    let (digits, point) = decimal_digits(value.abs());
    let scale = scale as usize;
    let mut int_len = point.max(0) as usize;

    // Digit at position `p` of the fixed layout (integer digits, then fraction)
    let digit_at = |p: usize| -> u8 {
        let k = p as i64 - int_len as i64 + point as i64;
        if k >= 0 && (k as usize) < digits.len() {
            digits[k as usize]
        } else {
            0
        }
    };

    let mut fixed: Vec<u8> = (0..int_len + scale).map(digit_at).collect();
    if digit_at(int_len + scale) >= 5 {
        let mut carry = true;
        for d in fixed.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            fixed.insert(0, 1);
            int_len += 1;
        }
    }

    let (int_digits, frac_digits) = fixed.split_at(int_len);
    let first_nonzero = int_digits
        .iter()
        .position(|&d| d != 0)
        .unwrap_or(int_digits.len());

    let mut out = String::with_capacity(fixed.len() + 3);
    if value < 0.0 && fixed.iter().any(|&d| d != 0) {
        out.push('-');
    }
    if first_nonzero == int_digits.len() {
        out.push('0');
    } else {
        out.extend(int_digits[first_nonzero..].iter().map(|&d| (b'0' + d) as char));
    }
    if scale > 0 {
        out.push('.');
        out.extend(frac_digits.iter().map(|&d| (b'0' + d) as char));
    }
    Ok(out)
}

/// Splits a non-negative finite double into its shortest decimal digits and
/// the number of digits in front of the decimal point (may be ≤ 0).
fn decimal_digits(magnitude: f64) -> (Vec<u8>, i32) {
    let formatted = format!("{:e}", magnitude);
    let (mantissa, exponent) = formatted
        .split_once('e')
        .unwrap_or((formatted.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    (digits, exponent + 1)
}

fn ensure_comparable(a: f64, b: f64) -> Result<()> {
    if a.is_finite() && b.is_finite() {
        Ok(())
    } else {
        Err(CoordinateError::ArithmeticError(format!(
            "can't compare infinite or NaN numbers ({}, {})",
            a, b
        )))
    }
}

/// Compares `a` and `b` after rounding both half-up to `scale` fractional digits
///
/// # Errors
///
/// `ArithmeticError` if either operand is infinite or NaN, even when both
/// are the same infinity.
pub fn scaled_cmp(a: f64, b: f64, scale: u32) -> Result<Ordering> {
    ensure_comparable(a, b)?;
    if a == b {
        return Ok(Ordering::Equal);
    }
    if round_half_up(a, scale)? == round_half_up(b, scale)? {
        return Ok(Ordering::Equal);
    }
    // Rounding is monotone, so distinct rounded values keep the operands' order
    Ok(a.total_cmp(&b))
}

/// Returns `true` if `a` and `b` agree to `scale` digits after the decimal point
///
/// # Errors
///
/// `ArithmeticError` if either operand is infinite or NaN.
pub fn scaled_equal(a: f64, b: f64, scale: u32) -> Result<bool> {
    Ok(scaled_cmp(a, b, scale)? == Ordering::Equal)
}

/// Maps `x` into `[0, y)`
///
/// Negative remainders that are scaled-equal to zero collapse to exactly `0.0`,
/// so `-2π` normalizes to `0` rather than to `2π`.
///
/// # Errors
///
/// `InvalidArgument` if `y` is not a positive finite number or `x` is not finite.
pub fn positive_remainder(x: f64, y: f64, scale: u32) -> Result<f64> {
    if !is_positive_finite(y) || y == 0.0 {
        return Err(CoordinateError::InvalidArgument(format!(
            "divisor must be positive and finite, got {}",
            y
        )));
    }
    if !x.is_finite() {
        return Err(CoordinateError::InvalidArgument(format!(
            "dividend must be finite, got {}",
            x
        )));
    }

    if x >= y {
        Ok(x % y)
    } else if x < 0.0 {
        let remainder = x % y;
        if scaled_equal(remainder, 0.0, scale)? {
            Ok(0.0)
        } else {
            Ok(y + remainder)
        }
    } else {
        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SCALE, TWO_PI};
    use std::f64::consts::PI;

    #[test]
    fn test_round_half_up_ties_go_away_from_zero() {
        assert_eq!(round_half_up(0.5, 0).unwrap(), "1");
        assert_eq!(round_half_up(2.5, 0).unwrap(), "3");
        assert_eq!(round_half_up(-2.5, 0).unwrap(), "-3");
        assert_eq!(round_half_up(2.345, 2).unwrap(), "2.35");
        assert_eq!(round_half_up(1.0000000000005, SCALE).unwrap(), "1.000000000001");
    }

    #[test]
    fn test_round_half_up_pads_and_carries() {
        assert_eq!(round_half_up(3.0, 3).unwrap(), "3.000");
        assert_eq!(round_half_up(9.9996, 3).unwrap(), "10.000");
        assert_eq!(round_half_up(999.5, 0).unwrap(), "1000");
        assert_eq!(round_half_up(1234.5678, 2).unwrap(), "1234.57");
        assert_eq!(round_half_up(12.3, 0).unwrap(), "12");
        assert_eq!(round_half_up(1e20, 1).unwrap(), "100000000000000000000.0");
    }

    #[test]
    fn test_round_half_up_small_values() {
        assert_eq!(round_half_up(1e-7, 9).unwrap(), "0.000000100");
        assert_eq!(round_half_up(6e-13, SCALE).unwrap(), "0.000000000001");
        assert_eq!(round_half_up(4e-13, SCALE).unwrap(), "0.000000000000");
    }

    #[test]
    fn test_round_half_up_unsigned_zero() {
        assert_eq!(round_half_up(-0.0, SCALE).unwrap(), "0.000000000000");
        assert_eq!(round_half_up(-1e-17, SCALE).unwrap(), "0.000000000000");
        assert_eq!(round_half_up(0.0, 0).unwrap(), "0");
    }

    #[test]
    fn test_round_half_up_rejects_non_finite() {
        assert!(round_half_up(f64::NAN, SCALE).is_err());
        assert!(round_half_up(f64::INFINITY, SCALE).is_err());
    }

    #[test]
    fn test_scaled_equal() {
        assert!(scaled_equal(3.0, 3.0, SCALE).unwrap());
        assert!(scaled_equal(3.0, 3.0 + 0.1e-12, SCALE).unwrap());
        assert!(!scaled_equal(3.0, 3.0 + 1.5e-12, SCALE).unwrap());
        assert!(scaled_equal(0.0, -0.0, SCALE).unwrap());
        assert!(scaled_equal(1.04, 1.0, 1).unwrap());
        assert!(!scaled_equal(1.05, 1.0, 1).unwrap());
    }

    #[test]
    fn test_scaled_equal_never_decides_non_finite() {
        assert!(matches!(
            scaled_equal(f64::INFINITY, f64::INFINITY, SCALE),
            Err(CoordinateError::ArithmeticError(_))
        ));
        assert!(scaled_equal(f64::NAN, 1.0, SCALE).is_err());
        assert!(scaled_equal(1.0, f64::NEG_INFINITY, SCALE).is_err());
    }

    #[test]
    fn test_scaled_cmp() {
        assert_eq!(scaled_cmp(1.0, 2.0, 3).unwrap(), Ordering::Less);
        assert_eq!(scaled_cmp(2.0, 1.0, 3).unwrap(), Ordering::Greater);
        assert_eq!(scaled_cmp(1.0001, 1.0002, 3).unwrap(), Ordering::Equal);
        assert_eq!(scaled_cmp(-1.0, 1.0, 0).unwrap(), Ordering::Less);
    }

    #[test]
    fn test_positive_remainder() {
        assert_eq!(positive_remainder(1.0, TWO_PI, SCALE).unwrap(), 1.0);
        assert!((positive_remainder(-PI, TWO_PI, SCALE).unwrap() - PI).abs() < 1e-15);
        assert!((positive_remainder(3.0 * PI, TWO_PI, SCALE).unwrap() - PI).abs() < 1e-14);
        assert!(
            (positive_remainder(-PI / 2.0, TWO_PI, SCALE).unwrap() - 3.0 * PI / 2.0).abs() < 1e-15
        );
        assert_eq!(positive_remainder(TWO_PI, TWO_PI, SCALE).unwrap(), 0.0);
        assert_eq!(positive_remainder(-TWO_PI, TWO_PI, SCALE).unwrap(), 0.0);
        assert_eq!(positive_remainder(-1e-17, TWO_PI, SCALE).unwrap(), 0.0);
    }

    #[test]
    fn test_positive_remainder_rejects_bad_arguments() {
        assert!(positive_remainder(1.0, 0.0, SCALE).is_err());
        assert!(positive_remainder(1.0, -1.0, SCALE).is_err());
        assert!(positive_remainder(1.0, f64::INFINITY, SCALE).is_err());
        assert!(positive_remainder(f64::NAN, 1.0, SCALE).is_err());
    }

    #[test]
    fn test_is_positive_finite() {
        assert!(is_positive_finite(0.0));
        assert!(is_positive_finite(1.5));
        assert!(!is_positive_finite(-1.0));
        assert!(!is_positive_finite(f64::INFINITY));
        assert!(!is_positive_finite(f64::NAN));
    }
}
