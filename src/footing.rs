//! Closed-form design of a square footing under a shear wall.

use std::fmt;

use serde::{Deserialize, Serialize};
use uom::si::area::{square_meter, square_millimeter};
use uom::si::energy::kilojoule;
use uom::si::f64::{Area, Energy, Force, Length, Pressure};
use uom::si::force::{kilonewton, newton};
use uom::si::length::meter;
use uom::si::pressure::{kilopascal, megapascal};

use crate::errors::DesignError;
use crate::provisions::{DesignProvisions, KERN_DIVISOR};

/// Factored loads, soil and material data for one footing.
///
/// Units are fixed: kN, kN·m, kN/m², MPa and metres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FootingInputs {
    /// Factored axial load in kN.
    pub pu: f64,
    /// Factored moment in kN·m.
    pub mu: f64,
    /// Allowable soil bearing capacity in kN/m².
    pub sbc: f64,
    /// Concrete compressive strength f'c in MPa.
    pub fc: f64,
    /// Reinforcement yield strength fy in MPa.
    pub fy: f64,
    /// Wall length in metres.
    pub wall_length: f64,
    /// Wall thickness in metres.
    pub wall_thickness: f64,
}

impl FootingInputs {
    /// Factored axial load as a force.
    #[must_use]
    pub fn axial_load(&self) -> Force {
        Force::new::<kilonewton>(self.pu)
    }

    /// Allowable soil bearing as a pressure.
    #[must_use]
    pub fn soil_bearing(&self) -> Pressure {
        Pressure::new::<kilopascal>(self.sbc)
    }

    /// Concrete compressive strength as a pressure.
    #[must_use]
    pub fn concrete_strength(&self) -> Pressure {
        Pressure::new::<megapascal>(self.fc)
    }

    /// Reinforcement yield strength as a pressure.
    #[must_use]
    pub fn steel_yield(&self) -> Pressure {
        Pressure::new::<megapascal>(self.fy)
    }

    /// Wall plan dimensions, length then thickness.
    #[must_use]
    pub fn wall(&self) -> (Length, Length) {
        (
            Length::new::<meter>(self.wall_length),
            Length::new::<meter>(self.wall_thickness),
        )
    }
}

/// Outcome of the kern check on the load eccentricity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EccentricityStatus {
    /// The resultant lies inside the middle third.
    Ok,
    /// The resultant lies outside the kern and part of the base would be in tension.
    TensionDevelops,
}

/// Outcome of the one-way shear check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShearStatus {
    /// Demand below capacity.
    Ok,
    /// The effective depth must grow.
    IncreaseDepth,
}

/// Outcome of the punching shear check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PunchingStatus {
    /// Demand below capacity.
    Ok,
    /// The footing must be thicker.
    IncreaseThickness,
}

impl fmt::Display for EccentricityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ok => "OK",
            Self::TensionDevelops => "Tension Develops",
        })
    }
}

impl fmt::Display for ShearStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ok => "OK",
            Self::IncreaseDepth => "Increase Depth",
        })
    }
}

impl fmt::Display for PunchingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ok => "OK",
            Self::IncreaseThickness => "Increase Thickness",
        })
    }
}

/// Every quantity derived by [`design_footing`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FootingDesign {
    /// Required bearing area in m².
    pub area_required: f64,
    /// Plan length in metres.
    pub length: f64,
    /// Plan width in metres. Always equal to `length`.
    pub width: f64,
    /// Overall thickness in metres.
    pub thickness: f64,
    /// Effective depth used by the checks in metres.
    pub effective_depth: f64,
    /// Load eccentricity `Mu / Pu` in metres.
    pub eccentricity: f64,
    /// Kern check result.
    pub eccentricity_status: EccentricityStatus,
    /// Average bearing pressure in kN/m².
    pub q_avg: f64,
    /// Peak bearing pressure in kN/m².
    pub q_max: f64,
    /// Minimum bearing pressure in kN/m². Negative when tension develops.
    pub q_min: f64,
    /// One-way shear demand in kN.
    pub one_way_shear_demand: f64,
    /// One-way shear capacity in kN.
    pub one_way_shear_capacity: f64,
    /// One-way shear check result.
    pub shear_status: ShearStatus,
    /// Critical punching perimeter in metres.
    pub punching_perimeter: f64,
    /// Punching shear capacity in kN.
    pub punching_capacity: f64,
    /// Punching shear check result.
    pub punching_status: PunchingStatus,
    /// Flexural design moment in kN·m.
    pub flexural_moment: f64,
    /// Required steel area in mm².
    pub steel_area: f64,
}

impl FootingDesign {
    /// Whether every check passes.
    #[must_use]
    pub fn is_adequate(&self) -> bool {
        self.eccentricity_status == EccentricityStatus::Ok
            && self.shear_status == ShearStatus::Ok
            && self.punching_status == PunchingStatus::Ok
    }
}

/// Parse a free-text form field into a number.
///
/// # Errors
///
/// Returns [`DesignError::InvalidInput`] when `text` is not a decimal number.
pub fn parse_number(field: &'static str, text: &str) -> Result<f64, DesignError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| DesignError::InvalidInput {
            field,
            value: text.to_string(),
        })
}

/// Reject values the design formulas cannot evaluate.
fn validate(inputs: &FootingInputs) -> Result<(), DesignError> {
    let fields = [
        ("Pu", inputs.pu),
        ("Mu", inputs.mu),
        ("SBC", inputs.sbc),
        ("f'c", inputs.fc),
        ("fy", inputs.fy),
        ("wall length", inputs.wall_length),
        ("wall thickness", inputs.wall_thickness),
    ];
    for (quantity, value) in fields {
        if !value.is_finite() {
            return Err(DesignError::Domain {
                quantity,
                reason: "must be finite",
                value,
            });
        }
    }

    let positive = [
        ("Pu", inputs.pu),
        ("SBC", inputs.sbc),
        ("fy", inputs.fy),
        ("wall length", inputs.wall_length),
        ("wall thickness", inputs.wall_thickness),
    ];
    for (quantity, value) in positive {
        if value <= 0.0 {
            return Err(DesignError::Domain {
                quantity,
                reason: "must be positive",
                value,
            });
        }
    }

    if inputs.fc < 0.0 {
        return Err(DesignError::Domain {
            quantity: "f'c",
            reason: "must not be negative",
            value: inputs.fc,
        });
    }
    Ok(())
}

/// Guard against overflow turning a result into infinity or NaN.
fn finite(quantity: &'static str, value: f64) -> Result<f64, DesignError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DesignError::Domain {
            quantity,
            reason: "evaluates to a non-finite value",
            value,
        })
    }
}

/// Size and check a square footing.
///
/// The footing is square (`L = B = sqrt(Pu / SBC)`). Bearing pressures use the
/// trapezoidal formula `q_avg (1 ± 6e / L)` even when the eccentricity leaves
/// the kern; in that case the status reports the tension and `q_min` goes
/// negative, but the pressure distribution is not recomputed.
///
/// # Errors
///
/// Returns [`DesignError::Domain`] when `pu`, `sbc`, `fy` or a wall dimension is not
/// positive, when `fc` is negative, or when any value is not finite.
///
/// # Examples
/// ```
/// use footingx::{design_footing, DesignProvisions, FootingInputs};
///
/// let inputs = FootingInputs {
///     pu: 500.0,
///     mu: 50.0,
///     sbc: 200.0,
///     fc: 25.0,
///     fy: 415.0,
///     wall_length: 2.0,
///     wall_thickness: 0.3,
/// };
/// let design = design_footing(&inputs, &DesignProvisions::default()).expect("valid inputs");
/// assert!((design.area_required - 2.5).abs() < 1.0e-12);
/// assert_eq!(design.length, design.width);
/// ```
pub fn design_footing(
    inputs: &FootingInputs,
    provisions: &DesignProvisions,
) -> Result<FootingDesign, DesignError> {
    validate(inputs)?;
    let pu = inputs.axial_load();
    let (wall_length, wall_thickness) = inputs.wall();

    // Plan size from allowable bearing.
    let area: Area = pu / inputs.soil_bearing();
    let area_required = finite("required area", area.get::<square_meter>())?;
    let width = Length::new::<meter>(area_required.sqrt());
    let length = width;

    // Bearing pressure. Mu / Pu in kN·m / kN is already metres.
    let eccentricity = inputs.mu / inputs.pu;
    let q_avg: Pressure = pu / (length * width);
    let spread = KERN_DIVISOR * eccentricity / length.get::<meter>();
    let q_max = q_avg * (1.0 + spread);
    let q_min = q_avg * (1.0 - spread);
    finite("q_max", q_max.get::<kilopascal>())?;
    finite("q_min", q_min.get::<kilopascal>())?;
    let kern = length.get::<meter>() / KERN_DIVISOR;
    let eccentricity_status = if eccentricity.abs() <= kern {
        EccentricityStatus::Ok
    } else {
        log::warn!("eccentricity {eccentricity:.3} m exceeds kern limit {kern:.3} m");
        EccentricityStatus::TensionDevelops
    };

    let d = provisions.depth();
    let thickness = provisions.thickness();
    // Shear strengths are empirical in sqrt(MPa).
    let root_fc = inputs.concrete_strength().get::<megapascal>().sqrt();

    // One-way shear. The demand in N is held against the capacity in kN.
    let projection = length - wall_length;
    let one_way_demand: Force = q_max * projection * width / 2.0;
    let one_way_capacity: Force =
        Pressure::new::<megapascal>(provisions.one_way_shear_coefficient * root_fc) * width * d;
    let shear_status = if one_way_demand.get::<newton>() < one_way_capacity.get::<kilonewton>() {
        ShearStatus::Ok
    } else {
        ShearStatus::IncreaseDepth
    };

    // Punching shear, compared the same way.
    let punching_perimeter = (wall_length + wall_thickness + d * 2.0) * 2.0;
    let punching_capacity: Force =
        Pressure::new::<megapascal>(provisions.punching_shear_coefficient * root_fc)
            * punching_perimeter
            * d;
    let punching_status = if pu.get::<newton>() < punching_capacity.get::<kilonewton>() {
        PunchingStatus::Ok
    } else {
        PunchingStatus::IncreaseThickness
    };

    // Flexure, singly reinforced.
    let flexural_moment: Energy = q_max * projection * projection * width / 8.0;
    let steel: Area = flexural_moment / (inputs.steel_yield() * d * provisions.flexure_phi);
    let steel_area = finite("required steel area", steel.get::<square_millimeter>())?;

    let length = length.get::<meter>();
    let width = width.get::<meter>();
    log::info!(
        "footing {length:.2} x {width:.2} m: eccentricity {eccentricity_status}, \
         shear {shear_status}, punching {punching_status}, As = {steel_area:.0} mm²"
    );

    Ok(FootingDesign {
        area_required,
        length,
        width,
        thickness,
        effective_depth: provisions.effective_depth,
        eccentricity,
        eccentricity_status,
        q_avg: q_avg.get::<kilopascal>(),
        q_max: q_max.get::<kilopascal>(),
        q_min: q_min.get::<kilopascal>(),
        one_way_shear_demand: one_way_demand.get::<kilonewton>(),
        one_way_shear_capacity: one_way_capacity.get::<kilonewton>(),
        shear_status,
        punching_perimeter: punching_perimeter.get::<meter>(),
        punching_capacity: punching_capacity.get::<kilonewton>(),
        punching_status,
        // kN·m, read through the kilojoule unit of the same dimension.
        flexural_moment: flexural_moment.get::<kilojoule>(),
        steel_area,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn wall_footing() -> FootingInputs {
        FootingInputs {
            pu: 500.0,
            mu: 50.0,
            sbc: 200.0,
            fc: 25.0,
            fy: 415.0,
            wall_length: 2.0,
            wall_thickness: 0.3,
        }
    }

    #[test]
    fn reference_footing_matches_hand_calculation() {
        let design =
            design_footing(&wall_footing(), &DesignProvisions::default()).expect("valid inputs");

        assert_relative_eq!(design.area_required, 2.5, epsilon = 1.0e-12);
        assert_relative_eq!(design.length, 1.581_138_830_084_19, epsilon = 1.0e-12);
        assert_eq!(design.length, design.width);
        assert_relative_eq!(design.thickness, 0.675, epsilon = 1.0e-12);

        assert_relative_eq!(design.eccentricity, 0.1, epsilon = 1.0e-12);
        assert_eq!(design.eccentricity_status, EccentricityStatus::Ok);
        assert_relative_eq!(design.q_avg, 200.0, epsilon = 1.0e-9);
        assert_relative_eq!(design.q_max, 275.894_663_844_041, epsilon = 1.0e-6);
        assert_relative_eq!(design.q_min, 124.105_336_155_959, epsilon = 1.0e-6);

        // The wall is longer than the footing, so the projection is negative.
        assert!(design.one_way_shear_demand < 0.0);
        assert_eq!(design.shear_status, ShearStatus::Ok);

        assert_relative_eq!(design.punching_perimeter, 7.0, epsilon = 1.0e-12);
        assert_relative_eq!(design.punching_capacity, 6_930.0, epsilon = 1.0e-6);
        assert_eq!(design.punching_status, PunchingStatus::IncreaseThickness);
        assert!(!design.is_adequate());

        let projection: f64 = 1.581_138_830_084_19 - 2.0;
        let moment = design.q_max * projection.powi(2) * design.width / 8.0;
        assert_relative_eq!(design.flexural_moment, moment, epsilon = 1.0e-9);
        assert_relative_eq!(
            design.steel_area,
            moment * 1.0e6 / (0.9 * 415.0 * 0.6 * 1_000.0),
            epsilon = 1.0e-9
        );
    }

    #[test]
    fn concentric_load_gives_uniform_pressure() {
        let inputs = FootingInputs {
            mu: 0.0,
            ..wall_footing()
        };
        let design = design_footing(&inputs, &DesignProvisions::default()).expect("valid inputs");
        assert_eq!(design.q_max, design.q_avg);
        assert_eq!(design.q_min, design.q_avg);
    }

    #[test]
    fn large_moment_flags_tension_without_redistribution() {
        let inputs = FootingInputs {
            mu: 200.0,
            ..wall_footing()
        };
        let design = design_footing(&inputs, &DesignProvisions::default()).expect("valid inputs");
        assert_eq!(
            design.eccentricity_status,
            EccentricityStatus::TensionDevelops
        );
        assert!(design.q_min < 0.0);
        assert_relative_eq!(
            design.q_min,
            design.q_avg * (1.0 - 6.0 * design.eccentricity / design.length),
            epsilon = 1.0e-9
        );
    }

    #[test]
    fn zero_axial_load_is_a_domain_error() {
        let inputs = FootingInputs {
            pu: 0.0,
            ..wall_footing()
        };
        let error =
            design_footing(&inputs, &DesignProvisions::default()).expect_err("pu = 0 rejected");
        assert!(matches!(error, DesignError::Domain { quantity: "Pu", .. }));
    }

    #[test]
    fn negative_concrete_strength_is_a_domain_error() {
        let inputs = FootingInputs {
            fc: -1.0,
            ..wall_footing()
        };
        let error = design_footing(&inputs, &DesignProvisions::default())
            .expect_err("negative f'c rejected");
        assert!(matches!(error, DesignError::Domain { quantity: "f'c", .. }));
    }

    #[test]
    fn nan_input_is_rejected() {
        let inputs = FootingInputs {
            mu: f64::NAN,
            ..wall_footing()
        };
        assert!(design_footing(&inputs, &DesignProvisions::default()).is_err());
    }

    #[test]
    fn inputs_convert_to_base_units() {
        let inputs = wall_footing();
        assert_relative_eq!(inputs.axial_load().get::<newton>(), 500_000.0);
        assert_relative_eq!(inputs.soil_bearing().get::<kilopascal>(), 200.0);
        assert_relative_eq!(inputs.steel_yield().get::<megapascal>(), 415.0);
        let (wall_length, wall_thickness) = inputs.wall();
        assert_relative_eq!((wall_length + wall_thickness).get::<meter>(), 2.3);
    }

    #[test]
    fn steel_area_is_reported_in_square_millimetres() {
        let inputs = FootingInputs {
            wall_length: 0.3,
            ..wall_footing()
        };
        let design = design_footing(&inputs, &DesignProvisions::default()).expect("valid inputs");
        // As = M / (phi fy d) with M in N·mm, fy in N/mm² and d in mm.
        let expected = design.flexural_moment * 1.0e6 / (0.9 * 415.0 * 600.0);
        assert_relative_eq!(design.steel_area, expected, max_relative = 1.0e-12);
        assert!(design.steel_area > 100.0);
    }

    #[test]
    fn parse_number_reports_the_field() {
        assert_eq!(parse_number("Pu", " 12.5 "), Ok(12.5));
        let error = parse_number("Pu", "abc").expect_err("text rejected");
        assert_eq!(
            error,
            DesignError::InvalidInput {
                field: "Pu",
                value: "abc".to_string()
            }
        );
    }

    #[test]
    fn status_labels() {
        assert_eq!(EccentricityStatus::Ok.to_string(), "OK");
        assert_eq!(
            EccentricityStatus::TensionDevelops.to_string(),
            "Tension Develops"
        );
        assert_eq!(ShearStatus::IncreaseDepth.to_string(), "Increase Depth");
        assert_eq!(
            PunchingStatus::IncreaseThickness.to_string(),
            "Increase Thickness"
        );
    }
}
