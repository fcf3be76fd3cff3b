//! Canonical (rounded) form of a Cartesian triple
//!
//! Two coordinates are equal exactly when their canonical forms are equal,
//! and the flyweight caches are keyed by it.

use crate::constants::SCALE;
use crate::tolerance::round_half_up;
use crate::Result;
use std::fmt;
use std::sync::Arc;

/// Each axis of a Cartesian point rounded half-up to [`SCALE`] fractional digits
///
/// Cloning is cheap; the rendered text is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalForm(Arc<str>);

impl CanonicalForm {
    /// Builds the canonical form of `(x, y, z)`
    ///
    /// Fails with `ArithmeticError` if any axis is not finite.
    pub fn from_axes(x: f64, y: f64, z: f64) -> Result<Self> {
        let rendered = format!(
            "({}, {}, {})",
            round_half_up(x, SCALE)?,
            round_half_up(y, SCALE)?,
            round_half_up(z, SCALE)?
        );
        Ok(CanonicalForm(rendered.into()))
    }

    /// Canonical form of the origin
    pub(crate) fn origin() -> Self {
        let zero = format!("0.{}", "0".repeat(SCALE as usize));
        CanonicalForm(format!("({zero}, {zero}, {zero})").into())
    }

    /// The rendered text, e.g. `(1.000000000000, 0.000000000000, 0.000000000000)`
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_matches_rounded_zeros() {
        assert_eq!(CanonicalForm::origin(), CanonicalForm::from_axes(0.0, 0.0, 0.0).unwrap());
        assert_eq!(
            CanonicalForm::origin(),
            CanonicalForm::from_axes(-0.0, 1e-17, -4e-13).unwrap()
        );
    }

    #[test]
    fn test_rendering() {
        let form = CanonicalForm::from_axes(3.0, -7.5, 1e-13).unwrap();
        assert_eq!(
            form.as_str(),
            "(3.000000000000, -7.500000000000, 0.000000000000)"
        );
        assert_eq!(form.to_string(), form.as_str());
    }

    #[test]
    fn test_non_finite_axis() {
        assert!(CanonicalForm::from_axes(f64::NAN, 0.0, 0.0).is_err());
    }
}
