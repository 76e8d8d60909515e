#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use footingx::{
    design_footing, DesignError, DesignProvisions, EccentricityStatus, FootingInputs,
    PunchingStatus, ShearStatus,
};
use proptest::prelude::*;

fn reference_inputs() -> FootingInputs {
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

fn shear_rank(status: ShearStatus) -> u8 {
    match status {
        ShearStatus::IncreaseDepth => 0,
        ShearStatus::Ok => 1,
    }
}

fn punching_rank(status: PunchingStatus) -> u8 {
    match status {
        PunchingStatus::IncreaseThickness => 0,
        PunchingStatus::Ok => 1,
    }
}

prop_compose! {
    fn valid_inputs()(
        pu in 1.0_f64..5_000.0,
        mu in -500.0_f64..500.0,
        sbc in 50.0_f64..600.0,
        fc in 15.0_f64..60.0,
        fy in 250.0_f64..550.0,
        wall_length in 0.2_f64..6.0,
        wall_thickness in 0.1_f64..0.6,
    ) -> FootingInputs {
        FootingInputs { pu, mu, sbc, fc, fy, wall_length, wall_thickness }
    }
}

#[test]
fn reference_footing_size() {
    let design =
        design_footing(&reference_inputs(), &DesignProvisions::default()).expect("valid inputs");
    assert_relative_eq!(design.area_required, 2.5, epsilon = 1.0e-12);
    assert_relative_eq!(design.length, 2.5_f64.sqrt(), epsilon = 1.0e-12);
    assert_eq!(design.eccentricity_status, EccentricityStatus::Ok);
}

#[test]
fn custom_provisions_change_the_checks() {
    let provisions = DesignProvisions {
        effective_depth: 1.5,
        ..DesignProvisions::default()
    };
    let design = design_footing(&reference_inputs(), &provisions).expect("valid inputs");
    assert_relative_eq!(design.thickness, 1.575, epsilon = 1.0e-12);
    // bo = 2 (2 + 0.3 + 3) = 10.6
    assert_relative_eq!(design.punching_perimeter, 10.6, epsilon = 1.0e-12);
}

#[test]
fn zero_and_negative_axial_loads_are_rejected() {
    for pu in [0.0, -10.0] {
        let inputs = FootingInputs {
            pu,
            ..reference_inputs()
        };
        let error = design_footing(&inputs, &DesignProvisions::default())
            .expect_err("non-positive Pu rejected");
        assert!(matches!(error, DesignError::Domain { quantity: "Pu", .. }));
    }
}

proptest! {
    #[test]
    fn footing_is_square_and_sized_for_bearing(inputs in valid_inputs()) {
        let design = design_footing(&inputs, &DesignProvisions::default()).unwrap();
        prop_assert_eq!(design.length, design.width);
        prop_assert!((design.length - (inputs.pu / inputs.sbc).sqrt()).abs() < 1.0e-9);
    }

    #[test]
    fn kern_check_matches_eccentricity(inputs in valid_inputs()) {
        let design = design_footing(&inputs, &DesignProvisions::default()).unwrap();
        let e = inputs.mu / inputs.pu;
        prop_assert!((design.eccentricity - e).abs() < 1.0e-12);
        let expected = if e.abs() <= design.length / 6.0 {
            EccentricityStatus::Ok
        } else {
            EccentricityStatus::TensionDevelops
        };
        prop_assert_eq!(design.eccentricity_status, expected);
    }

    #[test]
    fn pressures_bracket_the_average(inputs in valid_inputs()) {
        let design = design_footing(&inputs, &DesignProvisions::default()).unwrap();
        let spread = 6.0 * design.eccentricity / design.length;
        let tolerance = 1.0e-6 * design.q_avg.max(1.0);
        prop_assert!((design.q_max - design.q_avg * (1.0 + spread)).abs() < tolerance);
        prop_assert!((design.q_min - design.q_avg * (1.0 - spread)).abs() < tolerance);
        prop_assert!(((design.q_max + design.q_min) / 2.0 - design.q_avg).abs() < tolerance);
    }

    #[test]
    fn stronger_concrete_never_worsens_shear(inputs in valid_inputs(), extra in 0.0_f64..40.0) {
        let weaker = design_footing(&inputs, &DesignProvisions::default()).unwrap();
        let stronger_inputs = FootingInputs { fc: inputs.fc + extra, ..inputs };
        let stronger = design_footing(&stronger_inputs, &DesignProvisions::default()).unwrap();
        prop_assert!(shear_rank(stronger.shear_status) >= shear_rank(weaker.shear_status));
        prop_assert!(
            punching_rank(stronger.punching_status) >= punching_rank(weaker.punching_status)
        );
    }

    #[test]
    fn steel_area_is_inverse_in_fy(inputs in valid_inputs(), ratio in 1.1_f64..3.0) {
        let base = design_footing(&inputs, &DesignProvisions::default()).unwrap();
        let stronger_steel = FootingInputs { fy: inputs.fy * ratio, ..inputs };
        let scaled = design_footing(&stronger_steel, &DesignProvisions::default()).unwrap();
        let tolerance = 1.0e-9 * base.steel_area.abs().max(1.0);
        prop_assert!((scaled.steel_area * ratio - base.steel_area).abs() <= tolerance);
    }

    #[test]
    fn steel_area_is_linear_in_design_moment(inputs in valid_inputs()) {
        let design = design_footing(&inputs, &DesignProvisions::default()).unwrap();
        let expected = design.flexural_moment * 1.0e6 / (0.9 * inputs.fy * 0.6 * 1_000.0);
        prop_assert!((design.steel_area - expected).abs() <= 1.0e-9 * expected.abs().max(1.0));
    }
}
