//! Text rendering of design results and build summaries.

use std::fmt::Write;

use crate::builder::BuildSummary;
use crate::footing::{FootingDesign, FootingInputs};
use crate::reactions::ImportedLoads;

/// Render the design report shown under the form.
///
/// Sections follow the order of the checks: size, eccentricity, shear and steel.
#[must_use]
pub fn render_design(inputs: &FootingInputs, design: &FootingDesign) -> String {
    let mut output = String::new();

    // Echo the loads first so the numbers below can be traced back to the
    // reaction they came from.
    writeln!(
        &mut output,
        "DESIGN LOADS\nPu = {:.2} kN, Mu = {:.2} kN·m, SBC = {:.1} kN/m²\n",
        inputs.pu, inputs.mu, inputs.sbc
    )
    .expect("writing to string cannot fail");

    // The plan is sized for allowable bearing alone, A = Pu / SBC, and kept square.
    // See https://en.wikipedia.org/wiki/Bearing_capacity.
    writeln!(
        &mut output,
        "FOOTING SIZE\nL = {:.2} m\nB = {:.2} m\nThickness ≈ {:.2} m\n",
        design.length, design.width, design.thickness
    )
    .expect("writing to string cannot fail");

    // Pressures follow the trapezoidal distribution q = P/A (1 ± 6e/L). Outside
    // the middle third q_min turns negative and the status says so.
    writeln!(
        &mut output,
        "ECCENTRICITY\ne = {:.3} m → {}\nq_max = {:.1} kN/m²\nq_min = {:.1} kN/m²\n",
        design.eccentricity, design.eccentricity_status, design.q_max, design.q_min
    )
    .expect("writing to string cannot fail");

    // Both shear checks use the ACI 318 concrete strength terms with the
    // assumed effective depth.
    writeln!(
        &mut output,
        "ONE-WAY SHEAR → {}\nPUNCHING SHEAR → {}\n",
        design.shear_status, design.punching_status
    )
    .expect("writing to string cannot fail");

    // Whole square millimetres are enough to pick bars from a table.
    writeln!(
        &mut output,
        "REQUIRED STEEL\nAs = {:.0} mm²",
        design.steel_area
    )
    .expect("writing to string cannot fail");

    output
}

/// Render one imported reaction.
#[must_use]
pub fn render_reaction(loads: &ImportedLoads) -> String {
    let r = &loads.reaction;
    let mut output = String::new();

    // All six components, signed as the host reports them.
    writeln!(
        &mut output,
        "Reaction at node {} (load case {}):\n  FX = {:+.3}  FY = {:+.3}  FZ = {:+.3}\n  MX = {:+.3}  MY = {:+.3}  MZ = {:+.3}",
        loads.node, loads.case, r.fx, r.fy, r.fz, r.mx, r.my, r.mz
    )
    .expect("writing to string cannot fail");

    // The design only takes magnitudes: Pu from FY and Mu from MZ.
    writeln!(
        &mut output,
        "  |F| = {:.3}\nPu = {:.2}, Mu = {:.2}",
        r.force_magnitude(),
        loads.pu,
        loads.mu
    )
    .expect("writing to string cannot fail");
    output
}

/// Render the console summary printed after the frame is built.
#[must_use]
pub fn render_build_summary(summary: &BuildSummary) -> String {
    format!(
        "Model created.\nNodes: {}, Members: {}\n",
        summary.nodes, summary.members
    )
}
