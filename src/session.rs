//! Command vocabulary of the analysis host and a typed session over any transport.
//!
//! The host is an external structural-analysis application. It is never
//! reimplemented here; every interaction is one [`Command`] sent through a
//! [`Transport`] and answered with a JSON value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::SessionError;
use crate::geometry::{Point, Wrench};

/// Length unit codes understood by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum LengthUnit {
    /// Inches.
    Inch = 0,
    /// Feet.
    Foot = 1,
    /// Centimetres.
    Centimetre = 3,
    /// Metres.
    Metre = 4,
    /// Millimetres.
    Millimetre = 5,
}

/// Force unit codes understood by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ForceUnit {
    /// Kips.
    Kip = 0,
    /// Pounds.
    Pound = 1,
    /// Kilograms force.
    Kilogram = 2,
    /// Metric tonnes force.
    MetricTon = 3,
    /// Newtons.
    Newton = 4,
    /// Kilonewtons.
    Kilonewton = 5,
}

impl From<LengthUnit> for u8 {
    fn from(value: LengthUnit) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for LengthUnit {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Inch),
            1 => Ok(Self::Foot),
            3 => Ok(Self::Centimetre),
            4 => Ok(Self::Metre),
            5 => Ok(Self::Millimetre),
            other => Err(format!("unknown length unit code {other}")),
        }
    }
}

impl From<ForceUnit> for u8 {
    fn from(value: ForceUnit) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for ForceUnit {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Kip),
            1 => Ok(Self::Pound),
            2 => Ok(Self::Kilogram),
            3 => Ok(Self::MetricTon),
            4 => Ok(Self::Newton),
            5 => Ok(Self::Kilonewton),
            other => Err(format!("unknown force unit code {other}")),
        }
    }
}

/// A single call on the host's remote interface.
///
/// Serialises as `{"method": "CreateNode", "params": {...}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum Command {
    /// Set the units used to interpret subsequent input.
    SetInputUnits {
        /// Length unit.
        length: LengthUnit,
        /// Force unit.
        force: ForceUnit,
    },
    /// Save the open model.
    SaveModel {
        /// Save without prompting.
        silent: bool,
    },
    /// Create a node with an explicit id.
    CreateNode {
        /// Node id.
        id: u32,
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
        /// Z coordinate.
        z: f64,
    },
    /// Create a beam member between two nodes.
    CreateBeam {
        /// Member id.
        id: u32,
        /// Start node id.
        start: u32,
        /// End node id.
        end: u32,
    },
    /// Create a beam property from the host's standard shapes table. Returns the property id.
    CreateBeamPropertyFromTable {
        /// Shapes table country code.
        country: u32,
        /// Section designation, e.g. `W14X90`.
        section: String,
        /// Type specification code.
        type_spec: u32,
        /// First additional specification.
        add_spec_1: f64,
        /// Second additional specification.
        add_spec_2: f64,
    },
    /// Create an angle property from the host's standard shapes table. Returns the property id.
    CreateAnglePropertyFromTable {
        /// Shapes table country code.
        country: u32,
        /// Section designation, e.g. `L40404`.
        section: String,
        /// Type specification code.
        type_spec: u32,
        /// Additional specification.
        add_spec: f64,
    },
    /// Assign a property to members.
    AssignBeamProperty {
        /// Target members.
        members: Vec<u32>,
        /// Property id returned by the host.
        property: u32,
    },
    /// Assign a named material to members.
    AssignMaterialToMember {
        /// Material name.
        material: String,
        /// Target members.
        members: Vec<u32>,
    },
    /// Rotate members about their longitudinal axis.
    AssignBetaAngle {
        /// Target members.
        members: Vec<u32>,
        /// Angle in degrees.
        angle: f64,
    },
    /// Create a full release specification. Returns the spec id.
    CreateMemberReleaseSpec {
        /// 0 for the start of the member, 1 for the end.
        location: u8,
        /// Release flags for FX, FY, FZ, MX, MY, MZ.
        releases: [u8; 6],
        /// Spring constants for the same directions.
        springs: [f64; 6],
    },
    /// Create a partial moment release specification. Returns the spec id.
    CreateMemberPartialReleaseSpec {
        /// 0 for the start of the member, 1 for the end.
        location: u8,
        /// Partial release flags for MX, MY, MZ.
        releases: [u8; 3],
        /// Release factors for the same directions.
        factors: [f64; 3],
    },
    /// Attach a release spec to members.
    AssignMemberSpecToBeam {
        /// Target members.
        members: Vec<u32>,
        /// Spec id returned by the host.
        spec: u32,
    },
    /// Create a fixed support definition. Returns the support id.
    CreateSupportFixed,
    /// Create a pinned support definition. Returns the support id.
    CreateSupportPinned,
    /// Attach a support definition to nodes.
    AssignSupportToNode {
        /// Target nodes.
        nodes: Vec<u32>,
        /// Support id returned by the host.
        support: u32,
    },
    /// Create a primary load case. Returns the case number.
    #[serde(rename = "CreateNewPrimaryLoadEx2")]
    CreateNewPrimaryLoad {
        /// Case title.
        title: String,
        /// Load type code.
        kind: u32,
        /// Requested case number.
        number: u32,
    },
    /// Make a load case the target of subsequent load commands.
    SetLoadActive {
        /// Case number.
        case: u32,
    },
    /// Add self-weight to the active case.
    #[serde(rename = "AddSelfWeightInXYZ")]
    AddSelfWeightInXyz {
        /// 1 = X, 2 = Y, 3 = Z.
        direction: u8,
        /// Multiplier on the self-weight.
        factor: f64,
    },
    /// Add a nodal load to the active case.
    AddNodalLoad {
        /// Target nodes.
        nodes: Vec<u32>,
        /// Force and moment components.
        load: Wrench,
    },
    /// Add a uniform member load to the active case.
    AddMemberUniformForce {
        /// Target members.
        members: Vec<u32>,
        /// Direction code.
        direction: u8,
        /// Load intensity.
        force: f64,
        /// Start distance.
        d1: f64,
        /// End distance.
        d2: f64,
        /// Perpendicular offset.
        d3: f64,
    },
    /// Create a load combination. Returns the combination number.
    CreateNewLoadCombination {
        /// Combination title.
        title: String,
        /// Requested combination number.
        number: u32,
    },
    /// Add a factored load case to a combination.
    AddLoadAndFactorToCombination {
        /// Combination number.
        combination: u32,
        /// Case number.
        case: u32,
        /// Factor.
        factor: f64,
    },
    /// Run the analysis.
    PerformAnalysis {
        /// Output verbosity; 0 is minimal.
        print_option: u32,
    },
    /// Read one support reaction component.
    GetNodeReaction {
        /// Node id.
        node: u32,
        /// Load case number.
        case: u32,
        /// Degree of freedom, 0 to 5 (FX, FY, FZ, MX, MY, MZ).
        dof: u8,
    },
}

impl Command {
    /// Name of the method on the host interface. Matches the serialised `method` tag.
    #[must_use]
    pub fn method(&self) -> &'static str {
        match self {
            Self::SetInputUnits { .. } => "SetInputUnits",
            Self::SaveModel { .. } => "SaveModel",
            Self::CreateNode { .. } => "CreateNode",
            Self::CreateBeam { .. } => "CreateBeam",
            Self::CreateBeamPropertyFromTable { .. } => "CreateBeamPropertyFromTable",
            Self::CreateAnglePropertyFromTable { .. } => "CreateAnglePropertyFromTable",
            Self::AssignBeamProperty { .. } => "AssignBeamProperty",
            Self::AssignMaterialToMember { .. } => "AssignMaterialToMember",
            Self::AssignBetaAngle { .. } => "AssignBetaAngle",
            Self::CreateMemberReleaseSpec { .. } => "CreateMemberReleaseSpec",
            Self::CreateMemberPartialReleaseSpec { .. } => "CreateMemberPartialReleaseSpec",
            Self::AssignMemberSpecToBeam { .. } => "AssignMemberSpecToBeam",
            Self::CreateSupportFixed => "CreateSupportFixed",
            Self::CreateSupportPinned => "CreateSupportPinned",
            Self::AssignSupportToNode { .. } => "AssignSupportToNode",
            Self::CreateNewPrimaryLoad { .. } => "CreateNewPrimaryLoadEx2",
            Self::SetLoadActive { .. } => "SetLoadActive",
            Self::AddSelfWeightInXyz { .. } => "AddSelfWeightInXYZ",
            Self::AddNodalLoad { .. } => "AddNodalLoad",
            Self::AddMemberUniformForce { .. } => "AddMemberUniformForce",
            Self::CreateNewLoadCombination { .. } => "CreateNewLoadCombination",
            Self::AddLoadAndFactorToCombination { .. } => "AddLoadAndFactorToCombination",
            Self::PerformAnalysis { .. } => "PerformAnalysis",
            Self::GetNodeReaction { .. } => "GetNodeReaction",
        }
    }
}

/// A channel to the analysis host.
pub trait Transport {
    /// Send one command and return the host's answer.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the host cannot be reached or reports a failure.
    fn call(&mut self, command: &Command) -> Result<Value, SessionError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn call(&mut self, command: &Command) -> Result<Value, SessionError> {
        (**self).call(command)
    }
}

/// Typed wrapper turning host calls into Rust methods.
#[derive(Debug)]
pub struct Session<T> {
    transport: T,
    calls: usize,
}

impl<T: Transport> Session<T> {
    /// Wrap a transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            calls: 0,
        }
    }

    /// Number of commands sent so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Borrow the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Unwrap the session.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Send a command whose result is ignored.
    ///
    /// # Errors
    ///
    /// Propagates the transport's [`SessionError`].
    pub fn execute(&mut self, command: Command) -> Result<(), SessionError> {
        self.send(&command).map(|_| ())
    }

    fn send(&mut self, command: &Command) -> Result<Value, SessionError> {
        log::debug!("host <- {}", command.method());
        self.calls += 1;
        self.transport.call(command)
    }

    /// Send a command that returns an entity id.
    fn create(&mut self, command: Command) -> Result<u32, SessionError> {
        let value = self.send(&command)?;
        value
            .as_u64()
            .and_then(|id| u32::try_from(id).ok())
            .ok_or(SessionError::UnexpectedResponse {
                method: command.method(),
                value,
            })
    }

    /// Set the input units.
    ///
    /// # Errors
    ///
    /// Propagates the transport's [`SessionError`].
    pub fn set_input_units(
        &mut self,
        length: LengthUnit,
        force: ForceUnit,
    ) -> Result<(), SessionError> {
        self.execute(Command::SetInputUnits { length, force })
    }

    /// Save the model without prompting.
    ///
    /// # Errors
    ///
    /// Propagates the transport's [`SessionError`].
    pub fn save_model(&mut self) -> Result<(), SessionError> {
        self.execute(Command::SaveModel { silent: true })
    }

    /// Create a node.
    ///
    /// # Errors
    ///
    /// Propagates the transport's [`SessionError`].
    pub fn create_node(&mut self, id: u32, position: Point) -> Result<(), SessionError> {
        self.execute(Command::CreateNode {
            id,
            x: position.x,
            y: position.y,
            z: position.z,
        })
    }

    /// Create a beam between two nodes.
    ///
    /// # Errors
    ///
    /// Propagates the transport's [`SessionError`].
    pub fn create_beam(&mut self, id: u32, start: u32, end: u32) -> Result<(), SessionError> {
        self.execute(Command::CreateBeam { id, start, end })
    }

    /// Create a wide-flange or other beam property from the shapes table.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnexpectedResponse`] when the host does not answer with an id.
    pub fn create_beam_property(
        &mut self,
        country: u32,
        section: &str,
    ) -> Result<u32, SessionError> {
        self.create(Command::CreateBeamPropertyFromTable {
            country,
            section: section.to_string(),
            type_spec: 0,
            add_spec_1: 0.0,
            add_spec_2: 0.0,
        })
    }

    /// Create an angle property from the shapes table.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnexpectedResponse`] when the host does not answer with an id.
    pub fn create_angle_property(
        &mut self,
        country: u32,
        section: &str,
    ) -> Result<u32, SessionError> {
        self.create(Command::CreateAnglePropertyFromTable {
            country,
            section: section.to_string(),
            type_spec: 0,
            add_spec: 0.0,
        })
    }

    /// Create a full release spec and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnexpectedResponse`] when the host does not answer with an id.
    pub fn create_release_spec(
        &mut self,
        location: u8,
        releases: [u8; 6],
        springs: [f64; 6],
    ) -> Result<u32, SessionError> {
        self.create(Command::CreateMemberReleaseSpec {
            location,
            releases,
            springs,
        })
    }

    /// Create a partial release spec and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnexpectedResponse`] when the host does not answer with an id.
    pub fn create_partial_release_spec(
        &mut self,
        location: u8,
        releases: [u8; 3],
        factors: [f64; 3],
    ) -> Result<u32, SessionError> {
        self.create(Command::CreateMemberPartialReleaseSpec {
            location,
            releases,
            factors,
        })
    }

    /// Create a fixed support and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnexpectedResponse`] when the host does not answer with an id.
    pub fn create_support_fixed(&mut self) -> Result<u32, SessionError> {
        self.create(Command::CreateSupportFixed)
    }

    /// Create a pinned support and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnexpectedResponse`] when the host does not answer with an id.
    pub fn create_support_pinned(&mut self) -> Result<u32, SessionError> {
        self.create(Command::CreateSupportPinned)
    }

    /// Create a primary load case and make it active.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnexpectedResponse`] when the host does not answer with a
    /// case number.
    pub fn open_load_case(
        &mut self,
        title: &str,
        kind: u32,
        number: u32,
    ) -> Result<u32, SessionError> {
        let case = self.create(Command::CreateNewPrimaryLoad {
            title: title.to_string(),
            kind,
            number,
        })?;
        self.execute(Command::SetLoadActive { case })?;
        Ok(case)
    }

    /// Create a load combination.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnexpectedResponse`] when the host does not answer with a number.
    pub fn create_load_combination(
        &mut self,
        title: &str,
        number: u32,
    ) -> Result<u32, SessionError> {
        self.create(Command::CreateNewLoadCombination {
            title: title.to_string(),
            number,
        })
    }

    /// Run the analysis with minimal output.
    ///
    /// # Errors
    ///
    /// Propagates the transport's [`SessionError`].
    pub fn perform_analysis(&mut self) -> Result<(), SessionError> {
        self.execute(Command::PerformAnalysis { print_option: 0 })
    }

    /// Read all six reaction components for a node under a load case.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnexpectedResponse`] when a component is not a number.
    pub fn node_reaction(&mut self, node: u32, case: u32) -> Result<Wrench, SessionError> {
        let mut components = [0.0; 6];
        for (dof, component) in (0_u8..).zip(components.iter_mut()) {
            let command = Command::GetNodeReaction { node, case, dof };
            let value = self.send(&command)?;
            *component = value.as_f64().ok_or(SessionError::UnexpectedResponse {
                method: command.method(),
                value,
            })?;
        }
        Ok(Wrench::from_components(components))
    }
}
