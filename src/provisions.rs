//! Design constants used by the footing engine.
//!
//! The shear coefficients multiply `sqrt(f'c)` with `f'c` in MPa. Lengths are
//! in metres.

use serde::{Deserialize, Serialize};
use uom::si::f64::Length;
use uom::si::length::meter;

/// Strength reduction factor for flexure (ACI 318, tension-controlled sections).
pub const FLEXURE_PHI: f64 = 0.9;

/// Assumed effective depth of the footing in metres.
pub const ASSUMED_EFFECTIVE_DEPTH: f64 = 0.6;

/// Allowance added to the effective depth to obtain the overall thickness, in metres.
/// Covers bottom cover plus half a bar diameter.
pub const THICKNESS_MARGIN: f64 = 0.075;

/// One-way shear coefficient on `sqrt(f'c)` (ACI 318, `Vc = 0.17 λ sqrt(f'c) b d`).
pub const ONE_WAY_SHEAR_COEFFICIENT: f64 = 0.17;

/// Two-way (punching) shear coefficient on `sqrt(f'c)` (ACI 318, `Vc = 0.33 λ sqrt(f'c) bo d`).
pub const PUNCHING_SHEAR_COEFFICIENT: f64 = 0.33;

/// Denominator of the kern limit: eccentricity beyond `L / 6` lifts the footing edge.
pub const KERN_DIVISOR: f64 = 6.0;

/// Configurable set of design provisions.
///
/// The defaults reproduce the fixed constants above. Any field may be
/// overridden from the configuration file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignProvisions {
    /// Strength reduction factor for flexure.
    pub flexure_phi: f64,
    /// Assumed effective depth in metres.
    pub effective_depth: f64,
    /// Thickness added to the effective depth in metres.
    pub thickness_margin: f64,
    /// One-way shear coefficient.
    pub one_way_shear_coefficient: f64,
    /// Punching shear coefficient.
    pub punching_shear_coefficient: f64,
}

impl Default for DesignProvisions {
    fn default() -> Self {
        Self {
            flexure_phi: FLEXURE_PHI,
            effective_depth: ASSUMED_EFFECTIVE_DEPTH,
            thickness_margin: THICKNESS_MARGIN,
            one_way_shear_coefficient: ONE_WAY_SHEAR_COEFFICIENT,
            punching_shear_coefficient: PUNCHING_SHEAR_COEFFICIENT,
        }
    }
}

impl DesignProvisions {
    /// Overall footing thickness implied by the effective depth, in metres.
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.effective_depth + self.thickness_margin
    }

    /// Effective depth as a length.
    #[must_use]
    pub fn depth(&self) -> Length {
        Length::new::<meter>(self.effective_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_named_constants() {
        let provisions = DesignProvisions::default();
        assert_eq!(provisions.flexure_phi, 0.9);
        assert_eq!(provisions.effective_depth, 0.6);
        assert_eq!(provisions.thickness_margin, 0.075);
        assert_eq!(provisions.one_way_shear_coefficient, 0.17);
        assert_eq!(provisions.punching_shear_coefficient, 0.33);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let provisions: DesignProvisions =
            serde_json::from_str(r#"{"effective_depth": 0.5}"#).expect("valid json");
        assert_eq!(provisions.effective_depth, 0.5);
        assert_eq!(provisions.flexure_phi, FLEXURE_PHI);
        assert!((provisions.thickness() - 0.575).abs() < 1.0e-12);
    }

    #[test]
    fn depth_converts_to_millimetres() {
        use uom::si::length::millimeter;

        let provisions = DesignProvisions::default();
        assert!((provisions.depth().get::<millimeter>() - 600.0).abs() < 1.0e-9);
    }
}
