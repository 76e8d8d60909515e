#![warn(clippy::all)]
#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod bridge;
mod builder;
mod config;
mod errors;
mod footing;
mod form;
mod frame;
mod geometry;
mod plan;
mod provisions;
mod reactions;
mod recording;
mod report;
mod session;

pub use bridge::BridgeTransport;
pub use builder::{build_in_host, BuildSummary};
pub use config::{BridgeConfig, Config, BRIDGE_URL_VAR, TIMEOUT_VAR};
pub use errors::{ConfigError, DesignError, FrameEditError, ImportError, SessionError};
pub use footing::{
    design_footing, parse_number, EccentricityStatus, FootingDesign, FootingInputs,
    PunchingStatus, ShearStatus,
};
pub use form::{FormFields, FormState, Status};
pub use frame::{
    Axis, FrameModel, Load, LoadCase, LoadCombination, LoadKind, MemberEnd, MemberLoadDirection,
    Release, ReleaseAssignment, SectionAssignment, SectionShape, SupportKind,
    AMERICAN_SHAPES_TABLE,
};
pub use geometry::{point, vertical_load, Point, Wrench};
pub use plan::{LineStyle, Outline, PlanView, PLAN_TITLE};
pub use provisions::{
    DesignProvisions, ASSUMED_EFFECTIVE_DEPTH, FLEXURE_PHI, KERN_DIVISOR,
    ONE_WAY_SHEAR_COEFFICIENT, PUNCHING_SHEAR_COEFFICIENT, THICKNESS_MARGIN,
};
pub use reactions::{import_reactions, parse_identifier, ImportedLoads};
pub use recording::{ReactionRecord, RecordingTransport};
pub use report::{render_build_summary, render_design, render_reaction};
pub use session::{Command, ForceUnit, LengthUnit, Session, Transport};
