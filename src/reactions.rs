//! Import of support reactions from the analysis host.

use crate::errors::ImportError;
use crate::geometry::Wrench;
use crate::session::{Session, Transport};

/// Design loads derived from one support reaction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImportedLoads {
    /// Support node.
    pub node: u32,
    /// Load case.
    pub case: u32,
    /// All six reaction components.
    pub reaction: Wrench,
    /// Axial load for the footing, `|FY|`.
    pub pu: f64,
    /// Moment for the footing, `|MZ|` (bending in the frame plane).
    pub mu: f64,
}

impl ImportedLoads {
    /// Derive footing loads from a reaction.
    #[must_use]
    pub fn from_reaction(node: u32, case: u32, reaction: Wrench) -> Self {
        Self {
            node,
            case,
            reaction,
            pu: reaction.fy.abs(),
            mu: reaction.mz.abs(),
        }
    }
}

/// Parse a node or load case identifier typed into the form.
///
/// # Errors
///
/// Returns [`ImportError::InvalidInput`] unless `text` is a positive integer.
pub fn parse_identifier(field: &'static str, text: &str) -> Result<u32, ImportError> {
    match text.trim().parse::<u32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ImportError::InvalidInput {
            field,
            value: text.to_string(),
        }),
    }
}

/// Read the reaction at `node_text` under `case_text` and derive `Pu` and `Mu`.
///
/// # Errors
///
/// Returns [`ImportError::InvalidInput`] for malformed identifiers,
/// [`ImportError::ConnectionUnavailable`] when the host cannot be reached and
/// [`ImportError::Session`] when it rejects the query.
pub fn import_reactions<T: Transport>(
    session: &mut Session<T>,
    node_text: &str,
    case_text: &str,
) -> Result<ImportedLoads, ImportError> {
    let node = parse_identifier("support node", node_text)?;
    let case = parse_identifier("load case", case_text)?;
    let reaction = session.node_reaction(node, case)?;
    let loads = ImportedLoads::from_reaction(node, case, reaction);
    log::info!(
        "node {node}, case {case}: Pu = {:.2}, Mu = {:.2}",
        loads.pu,
        loads.mu
    );
    Ok(loads)
}
