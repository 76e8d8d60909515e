//! Sends a [`FrameModel`] to the analysis host and runs the analysis.
//!
//! The sequence is linear. The first failing command aborts it and leaves
//! whatever was already created in the host; there is no rollback.

use crate::errors::SessionError;
use crate::frame::{FrameModel, Load, Release, SectionShape, SupportKind};
use crate::session::{Command, ForceUnit, LengthUnit, Session, Transport};

/// Counts reported after a successful build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Nodes created.
    pub nodes: usize,
    /// Members created.
    pub members: usize,
    /// Section properties created.
    pub sections: usize,
    /// Primary load cases created.
    pub load_cases: usize,
    /// Load combinations created.
    pub combinations: usize,
    /// Host commands sent.
    pub commands: usize,
}

fn release_flag(released: bool) -> u8 {
    u8::from(released)
}

/// Create every entity of `model` in the host, save it and run the analysis.
///
/// Expects an empty model open in the host. Running it against a populated
/// model produces duplicate-id failures or an inconsistent model.
///
/// # Errors
///
/// Returns the first [`SessionError`] reported by the transport.
pub fn build_in_host<T: Transport>(
    model: &FrameModel,
    session: &mut Session<T>,
) -> Result<BuildSummary, SessionError> {
    let start_calls = session.calls();
    let (length_unit, force_unit) = model.units();

    session.set_input_units(length_unit, force_unit)?;
    session.save_model()?;

    log::info!("creating {} nodes", model.node_count());
    for (id, position) in model.nodes() {
        session.create_node(id, position)?;
    }

    log::info!("creating {} members", model.member_count());
    for (id, start, end) in model.members() {
        session.create_beam(id, start, end)?;
    }

    log::info!("assigning {} sections", model.sections().len());
    let mut property_ids = Vec::with_capacity(model.sections().len());
    for section in model.sections() {
        let property = match section.shape {
            SectionShape::Beam => {
                session.create_beam_property(section.country, &section.designation)?
            }
            SectionShape::Angle => {
                session.create_angle_property(section.country, &section.designation)?
            }
        };
        property_ids.push(property);
    }
    for (section, property) in model.sections().iter().zip(property_ids) {
        session.execute(Command::AssignBeamProperty {
            members: section.members.clone(),
            property,
        })?;
    }

    for (material, members) in model.materials() {
        session.execute(Command::AssignMaterialToMember {
            material: material.clone(),
            members: members.clone(),
        })?;
    }

    for (members, angle) in model.beta_angles() {
        session.execute(Command::AssignBetaAngle {
            members: members.clone(),
            angle: *angle,
        })?;
    }

    log::info!("creating {} release specs", model.releases().len());
    let mut spec_ids = Vec::with_capacity(model.releases().len());
    for assignment in model.releases() {
        let spec = match assignment.release {
            Release::Full {
                end,
                released,
                springs,
            } => session.create_release_spec(end.code(), released.map(release_flag), springs)?,
            Release::Partial {
                end,
                released,
                factors,
            } => session.create_partial_release_spec(
                end.code(),
                released.map(release_flag),
                factors,
            )?,
        };
        spec_ids.push(spec);
    }
    for (assignment, spec) in model.releases().iter().zip(spec_ids) {
        session.execute(Command::AssignMemberSpecToBeam {
            members: assignment.members.clone(),
            spec,
        })?;
    }

    // Material constants are defined in inch-kip in the host.
    session.set_input_units(LengthUnit::Inch, ForceUnit::Kip)?;
    session.set_input_units(length_unit, force_unit)?;

    let mut support_ids = Vec::with_capacity(model.supports().len());
    for (kind, _) in model.supports() {
        let support = match kind {
            SupportKind::Fixed => session.create_support_fixed()?,
            SupportKind::Pinned => session.create_support_pinned()?,
        };
        support_ids.push(support);
    }
    for ((_, nodes), support) in model.supports().iter().zip(support_ids) {
        session.execute(Command::AssignSupportToNode {
            nodes: nodes.clone(),
            support,
        })?;
    }

    for case in model.load_cases() {
        log::info!("load case {} \"{}\"", case.number, case.title);
        let number = session.open_load_case(&case.title, case.kind.code(), case.number)?;
        if number != case.number {
            log::warn!(
                "host numbered load case \"{}\" as {number} instead of {}",
                case.title,
                case.number
            );
        }
        for load in &case.loads {
            let command = match load {
                Load::SelfWeight { direction, factor } => Command::AddSelfWeightInXyz {
                    direction: direction.code(),
                    factor: *factor,
                },
                Load::Nodal { nodes, load } => Command::AddNodalLoad {
                    nodes: nodes.clone(),
                    load: *load,
                },
                Load::MemberUniform {
                    members,
                    direction,
                    intensity,
                } => Command::AddMemberUniformForce {
                    members: members.clone(),
                    direction: direction.code(),
                    force: *intensity,
                    d1: 0.0,
                    d2: 0.0,
                    d3: 0.0,
                },
            };
            session.execute(command)?;
        }
    }

    for combination in model.combinations() {
        log::info!(
            "load combination {} \"{}\"",
            combination.number,
            combination.title
        );
        session.create_load_combination(&combination.title, combination.number)?;
        for &(case, factor) in &combination.factors {
            session.execute(Command::AddLoadAndFactorToCombination {
                combination: combination.number,
                case,
                factor,
            })?;
        }
    }

    session.save_model()?;
    log::info!("running analysis");
    session.perform_analysis()?;

    Ok(BuildSummary {
        nodes: model.node_count(),
        members: model.member_count(),
        sections: model.sections().len(),
        load_cases: model.load_cases().len(),
        combinations: model.combinations().len(),
        commands: session.calls() - start_calls,
    })
}
