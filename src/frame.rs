//! Frame model entities sent to the analysis host.

use std::collections::BTreeMap;

use petgraph::graph::{EdgeIndex, Graph, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::errors::FrameEditError;
use crate::geometry::{point, vertical_load, Point, Wrench};
use crate::session::{ForceUnit, LengthUnit};

/// Country code of the American standard shapes table.
pub const AMERICAN_SHAPES_TABLE: u32 = 1;

/// Internal representation of a frame node.
#[derive(Clone, Debug)]
struct FrameNode {
    /// Host id.
    id: u32,
    /// Coordinates in the model length unit.
    position: Point,
}

/// Internal representation of a frame member.
#[derive(Clone, Debug)]
struct FrameMember {
    /// Host id.
    id: u32,
}

/// Family of a table section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionShape {
    /// Wide flange, channel and other beam shapes.
    Beam,
    /// Single angle.
    Angle,
}

/// A standard section assigned to a group of members.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionAssignment {
    /// Shapes table country code.
    pub country: u32,
    /// Table designation, e.g. `W14X90`.
    pub designation: String,
    /// Section family.
    pub shape: SectionShape,
    /// Members receiving the section.
    pub members: Vec<u32>,
}

/// End of a member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberEnd {
    /// Start node end.
    Start,
    /// End node end.
    End,
}

impl MemberEnd {
    /// Location code used by the host.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Start => 0,
            Self::End => 1,
        }
    }
}

/// A member end release.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Release {
    /// Release any of FX, FY, FZ, MX, MY, MZ, optionally with springs.
    Full {
        /// Released end.
        end: MemberEnd,
        /// Release flags in degree-of-freedom order.
        released: [bool; 6],
        /// Spring constants in degree-of-freedom order.
        springs: [f64; 6],
    },
    /// Partially release the moments MX, MY, MZ.
    Partial {
        /// Released end.
        end: MemberEnd,
        /// Partial release flags.
        released: [bool; 3],
        /// Release factors.
        factors: [f64; 3],
    },
}

impl Release {
    /// Release only the in-plane moment at one end.
    #[must_use]
    pub fn moment_z(end: MemberEnd) -> Self {
        Self::Full {
            end,
            released: [false, false, false, false, false, true],
            springs: [0.0; 6],
        }
    }

    /// Partially release MY and MZ by the same factor.
    #[must_use]
    pub fn partial_my_mz(end: MemberEnd, factor: f64) -> Self {
        Self::Partial {
            end,
            released: [false, true, true],
            factors: [0.0, factor, factor],
        }
    }
}

/// A release attached to a group of members.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReleaseAssignment {
    /// Release definition.
    pub release: Release,
    /// Members receiving the release.
    pub members: Vec<u32>,
}

/// Support condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportKind {
    /// All six degrees of freedom restrained.
    Fixed,
    /// Translations restrained, rotations free.
    Pinned,
}

/// Load type of a primary case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadKind {
    /// Dead load.
    Dead,
    /// Live load.
    Live,
    /// Wind load.
    Wind,
}

impl LoadKind {
    /// Load type code used by the host.
    #[must_use]
    pub fn code(self) -> u32 {
        match self {
            Self::Dead => 0,
            Self::Live => 1,
            Self::Wind => 3,
        }
    }
}

/// Global axis for self-weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Global X.
    X,
    /// Global Y.
    Y,
    /// Global Z.
    Z,
}

impl Axis {
    /// Direction code used by the host.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::X => 1,
            Self::Y => 2,
            Self::Z => 3,
        }
    }
}

/// Direction of a member load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberLoadDirection {
    /// Member local x.
    LocalX,
    /// Member local y.
    LocalY,
    /// Member local z.
    LocalZ,
    /// Global X.
    GlobalX,
    /// Global Y.
    GlobalY,
    /// Global Z.
    GlobalZ,
}

impl MemberLoadDirection {
    /// Direction code used by the host.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::LocalX => 1,
            Self::LocalY => 2,
            Self::LocalZ => 3,
            Self::GlobalX => 4,
            Self::GlobalY => 5,
            Self::GlobalZ => 6,
        }
    }
}

/// One entry of a load case.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Load {
    /// Self-weight multiplied by `factor` along `direction`.
    SelfWeight {
        /// Axis of action.
        direction: Axis,
        /// Multiplier, negative for gravity.
        factor: f64,
    },
    /// Concentrated forces and moments at nodes.
    Nodal {
        /// Loaded nodes.
        nodes: Vec<u32>,
        /// Load components.
        load: Wrench,
    },
    /// Full-length uniform load on members.
    MemberUniform {
        /// Loaded members.
        members: Vec<u32>,
        /// Direction of the load.
        direction: MemberLoadDirection,
        /// Load per unit length.
        intensity: f64,
    },
}

/// A primary load case.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    /// Case number.
    pub number: u32,
    /// Case title.
    pub title: String,
    /// Load type.
    pub kind: LoadKind,
    /// Loads in application order.
    pub loads: Vec<Load>,
}

/// A factored combination of primary cases.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadCombination {
    /// Combination number.
    pub number: u32,
    /// Combination title.
    pub title: String,
    /// `(case number, factor)` pairs.
    pub factors: Vec<(u32, f64)>,
}

/// Container for a frame model before it is sent to the host.
#[derive(Clone, Debug)]
pub struct FrameModel {
    /// Nodes and members.
    graph: Graph<FrameNode, FrameMember>,
    /// Host node id to graph index.
    node_ids: BTreeMap<u32, NodeIndex>,
    /// Host member id to graph index.
    member_ids: BTreeMap<u32, EdgeIndex>,
    /// Length unit of coordinates and member loads.
    length_unit: LengthUnit,
    /// Force unit of all loads.
    force_unit: ForceUnit,
    /// Section assignments in creation order.
    sections: Vec<SectionAssignment>,
    /// `(material name, members)` assignments.
    materials: Vec<(String, Vec<u32>)>,
    /// `(members, angle in degrees)` assignments.
    beta_angles: Vec<(Vec<u32>, f64)>,
    /// Release assignments in creation order.
    releases: Vec<ReleaseAssignment>,
    /// `(support, nodes)` assignments.
    supports: Vec<(SupportKind, Vec<u32>)>,
    /// Primary load cases.
    load_cases: Vec<LoadCase>,
    /// Load combinations.
    combinations: Vec<LoadCombination>,
}

impl FrameModel {
    /// Create an empty model in the given units.
    ///
    /// # Examples
    /// ```
    /// use footingx::{FrameModel, ForceUnit, LengthUnit};
    ///
    /// let model = FrameModel::new(LengthUnit::Foot, ForceUnit::Kip);
    /// assert_eq!(model.node_count(), 0);
    /// ```
    #[must_use]
    pub fn new(length_unit: LengthUnit, force_unit: ForceUnit) -> Self {
        Self {
            graph: Graph::new(),
            node_ids: BTreeMap::new(),
            member_ids: BTreeMap::new(),
            length_unit,
            force_unit,
            sections: Vec::new(),
            materials: Vec::new(),
            beta_angles: Vec::new(),
            releases: Vec::new(),
            supports: Vec::new(),
            load_cases: Vec::new(),
            combinations: Vec::new(),
        }
    }

    /// Return the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of members.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Model units.
    #[must_use]
    pub fn units(&self) -> (LengthUnit, ForceUnit) {
        (self.length_unit, self.force_unit)
    }

    /// Add a node with a host id.
    ///
    /// # Errors
    ///
    /// Returns [`FrameEditError::DuplicateNode`] when `id` is already used.
    pub fn add_node(&mut self, id: u32, position: Point) -> Result<(), FrameEditError> {
        if self.node_ids.contains_key(&id) {
            return Err(FrameEditError::DuplicateNode(id));
        }
        let index = self.graph.add_node(FrameNode { id, position });
        self.node_ids.insert(id, index);
        Ok(())
    }

    /// Connect two existing nodes with a member.
    ///
    /// # Errors
    ///
    /// Returns [`FrameEditError::DuplicateMember`] when `id` is already used,
    /// [`FrameEditError::UnknownNode`] when an endpoint is missing and
    /// [`FrameEditError::DegenerateMember`] when both endpoints are the same node.
    pub fn add_member(&mut self, id: u32, start: u32, end: u32) -> Result<(), FrameEditError> {
        if self.member_ids.contains_key(&id) {
            return Err(FrameEditError::DuplicateMember(id));
        }
        let start_index = self.node_index(start)?;
        let end_index = self.node_index(end)?;
        if start == end {
            return Err(FrameEditError::DegenerateMember {
                member: id,
                node: start,
            });
        }
        let index = self
            .graph
            .add_edge(start_index, end_index, FrameMember { id });
        self.member_ids.insert(id, index);
        Ok(())
    }

    fn node_index(&self, id: u32) -> Result<NodeIndex, FrameEditError> {
        self.node_ids
            .get(&id)
            .copied()
            .ok_or(FrameEditError::UnknownNode(id))
    }

    fn check_members(&self, members: &[u32]) -> Result<(), FrameEditError> {
        match members.iter().find(|id| !self.member_ids.contains_key(id)) {
            Some(&missing) => Err(FrameEditError::UnknownMember(missing)),
            None => Ok(()),
        }
    }

    fn check_nodes(&self, nodes: &[u32]) -> Result<(), FrameEditError> {
        match nodes.iter().find(|id| !self.node_ids.contains_key(id)) {
            Some(&missing) => Err(FrameEditError::UnknownNode(missing)),
            None => Ok(()),
        }
    }

    /// Position of a node.
    #[must_use]
    pub fn node_position(&self, id: u32) -> Option<Point> {
        self.node_ids
            .get(&id)
            .map(|&index| self.graph[index].position)
    }

    /// Endpoint node ids of a member.
    #[must_use]
    pub fn member_nodes(&self, id: u32) -> Option<(u32, u32)> {
        let &index = self.member_ids.get(&id)?;
        let (start, end) = self.graph.edge_endpoints(index)?;
        Some((self.graph[start].id, self.graph[end].id))
    }

    /// Length of a member in the model length unit.
    #[must_use]
    pub fn member_length(&self, id: u32) -> Option<f64> {
        let &index = self.member_ids.get(&id)?;
        let (start, end) = self.graph.edge_endpoints(index)?;
        Some(self.graph[start].position.distance_to(self.graph[end].position))
    }

    /// Nodes ordered by id.
    pub fn nodes(&self) -> impl Iterator<Item = (u32, Point)> + '_ {
        self.node_ids
            .iter()
            .map(|(&id, &index)| (id, self.graph[index].position))
    }

    /// Members ordered by id, as `(id, start node, end node)`.
    pub fn members(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        self.member_ids.values().filter_map(|&index| {
            let (start, end) = self.graph.edge_endpoints(index)?;
            Some((
                self.graph[index].id,
                self.graph[start].id,
                self.graph[end].id,
            ))
        })
    }

    /// Number of members framing into a node.
    #[must_use]
    pub fn node_degree(&self, id: u32) -> Option<usize> {
        let &index = self.node_ids.get(&id)?;
        Some(self.graph.neighbors_undirected(index).count())
    }

    /// Assign a standard table section to members.
    ///
    /// # Errors
    ///
    /// Returns [`FrameEditError::UnknownMember`] when a member is missing.
    pub fn assign_section(
        &mut self,
        shape: SectionShape,
        designation: &str,
        members: Vec<u32>,
    ) -> Result<(), FrameEditError> {
        self.check_members(&members)?;
        self.sections.push(SectionAssignment {
            country: AMERICAN_SHAPES_TABLE,
            designation: designation.to_string(),
            shape,
            members,
        });
        Ok(())
    }

    /// Assign a named material to members.
    ///
    /// # Errors
    ///
    /// Returns [`FrameEditError::UnknownMember`] when a member is missing.
    pub fn assign_material(
        &mut self,
        material: &str,
        members: Vec<u32>,
    ) -> Result<(), FrameEditError> {
        self.check_members(&members)?;
        self.materials.push((material.to_string(), members));
        Ok(())
    }

    /// Rotate members about their axis by `angle` degrees.
    ///
    /// # Errors
    ///
    /// Returns [`FrameEditError::UnknownMember`] when a member is missing.
    pub fn assign_beta_angle(
        &mut self,
        members: Vec<u32>,
        angle: f64,
    ) -> Result<(), FrameEditError> {
        self.check_members(&members)?;
        self.beta_angles.push((members, angle));
        Ok(())
    }

    /// Attach an end release to members.
    ///
    /// # Errors
    ///
    /// Returns [`FrameEditError::UnknownMember`] when a member is missing.
    pub fn assign_release(
        &mut self,
        release: Release,
        members: Vec<u32>,
    ) -> Result<(), FrameEditError> {
        self.check_members(&members)?;
        self.releases.push(ReleaseAssignment { release, members });
        Ok(())
    }

    /// Attach a support condition to nodes.
    ///
    /// # Errors
    ///
    /// Returns [`FrameEditError::UnknownNode`] when a node is missing.
    pub fn assign_support(
        &mut self,
        kind: SupportKind,
        nodes: Vec<u32>,
    ) -> Result<(), FrameEditError> {
        self.check_nodes(&nodes)?;
        self.supports.push((kind, nodes));
        Ok(())
    }

    /// Create an empty primary load case.
    ///
    /// # Errors
    ///
    /// Returns [`FrameEditError::DuplicateLoadCase`] when `number` is already used
    /// by a case or a combination.
    pub fn add_load_case(
        &mut self,
        number: u32,
        title: &str,
        kind: LoadKind,
    ) -> Result<(), FrameEditError> {
        if self.load_number_taken(number) {
            return Err(FrameEditError::DuplicateLoadCase(number));
        }
        self.load_cases.push(LoadCase {
            number,
            title: title.to_string(),
            kind,
            loads: Vec::new(),
        });
        Ok(())
    }

    fn load_number_taken(&self, number: u32) -> bool {
        self.load_cases.iter().any(|case| case.number == number)
            || self
                .combinations
                .iter()
                .any(|combination| combination.number == number)
    }

    /// Append a load to an existing case.
    ///
    /// # Errors
    ///
    /// Returns [`FrameEditError::UnknownLoadCase`] when the case is missing and
    /// [`FrameEditError::UnknownNode`] or [`FrameEditError::UnknownMember`] when
    /// the load targets a missing entity.
    pub fn add_load(&mut self, case: u32, load: Load) -> Result<(), FrameEditError> {
        match &load {
            Load::SelfWeight { .. } => {}
            Load::Nodal { nodes, .. } => self.check_nodes(nodes)?,
            Load::MemberUniform { members, .. } => self.check_members(members)?,
        }
        let target = self
            .load_cases
            .iter_mut()
            .find(|candidate| candidate.number == case)
            .ok_or(FrameEditError::UnknownLoadCase(case))?;
        target.loads.push(load);
        Ok(())
    }

    /// Create a combination of existing cases.
    ///
    /// # Errors
    ///
    /// Returns [`FrameEditError::DuplicateLoadCase`] when `number` is already used and
    /// [`FrameEditError::UnknownLoadCase`] when a referenced case is missing.
    pub fn add_combination(
        &mut self,
        number: u32,
        title: &str,
        factors: Vec<(u32, f64)>,
    ) -> Result<(), FrameEditError> {
        if self.load_number_taken(number) {
            return Err(FrameEditError::DuplicateLoadCase(number));
        }
        if let Some(&(missing, _)) = factors
            .iter()
            .find(|(case, _)| !self.load_cases.iter().any(|c| c.number == *case))
        {
            return Err(FrameEditError::UnknownLoadCase(missing));
        }
        self.combinations.push(LoadCombination {
            number,
            title: title.to_string(),
            factors,
        });
        Ok(())
    }

    /// Section assignments in creation order.
    #[must_use]
    pub fn sections(&self) -> &[SectionAssignment] {
        &self.sections
    }

    /// Material assignments.
    #[must_use]
    pub fn materials(&self) -> &[(String, Vec<u32>)] {
        &self.materials
    }

    /// Beta angle assignments.
    #[must_use]
    pub fn beta_angles(&self) -> &[(Vec<u32>, f64)] {
        &self.beta_angles
    }

    /// Release assignments.
    #[must_use]
    pub fn releases(&self) -> &[ReleaseAssignment] {
        &self.releases
    }

    /// Support assignments.
    #[must_use]
    pub fn supports(&self) -> &[(SupportKind, Vec<u32>)] {
        &self.supports
    }

    /// Primary load cases.
    #[must_use]
    pub fn load_cases(&self) -> &[LoadCase] {
        &self.load_cases
    }

    /// Load combinations.
    #[must_use]
    pub fn combinations(&self) -> &[LoadCombination] {
        &self.combinations
    }

    /// The two-storey steel frame with a trussed gable roof used to exercise the host.
    ///
    /// Units are feet and kips. The frame spans 30 ft with columns to 35 ft and an
    /// angle-braced roof rising to 44 ft, a fixed base at node 1 and a pin at node 2.
    ///
    /// # Errors
    ///
    /// Never fails for the literal data; the result type reports any edit error.
    pub fn demonstration() -> Result<Self, FrameEditError> {
        let mut model = Self::new(LengthUnit::Foot, ForceUnit::Kip);

        let nodes = [
            (1, point(0.0, 0.0, 0.0)),
            (2, point(30.0, 0.0, 0.0)),
            (3, point(0.0, 20.0, 0.0)),
            (4, point(10.0, 20.0, 0.0)),
            (5, point(20.0, 20.0, 0.0)),
            (6, point(30.0, 20.0, 0.0)),
            (7, point(0.0, 35.0, 0.0)),
            (8, point(30.0, 35.0, 0.0)),
            (9, point(7.5, 35.0, 0.0)),
            (10, point(22.5, 35.0, 0.0)),
            (11, point(15.0, 35.0, 0.0)),
            (12, point(5.0, 38.0, 0.0)),
            (13, point(25.0, 38.0, 0.0)),
            (14, point(10.0, 41.0, 0.0)),
            (15, point(20.0, 41.0, 0.0)),
            (16, point(15.0, 44.0, 0.0)),
        ];
        for (id, position) in nodes {
            model.add_node(id, position)?;
        }

        let members = [
            (1, 1, 3),
            (2, 3, 7),
            (3, 2, 6),
            (4, 6, 8),
            (5, 3, 4),
            (6, 4, 5),
            (7, 5, 6),
            (8, 7, 12),
            (9, 12, 14),
            (10, 14, 16),
            (11, 15, 16),
            (12, 13, 15),
            (13, 8, 13),
            (14, 9, 12),
            (15, 9, 14),
            (16, 11, 14),
            (17, 11, 15),
            (18, 10, 15),
            (19, 10, 13),
            (20, 7, 9),
            (21, 9, 11),
            (22, 10, 11),
            (23, 8, 10),
        ];
        for (id, start, end) in members {
            model.add_member(id, start, end)?;
        }

        model.assign_section(SectionShape::Beam, "W14X90", vec![1, 3, 4])?;
        model.assign_section(SectionShape::Beam, "W10X49", vec![2])?;
        model.assign_section(SectionShape::Beam, "W21X50", vec![5, 6, 7])?;
        model.assign_section(SectionShape::Beam, "W18X35", (8..=13).collect())?;
        model.assign_section(SectionShape::Angle, "L40404", (14..=23).collect())?;
        model.assign_material("STEEL", (1..=23).collect())?;
        model.assign_beta_angle(vec![3, 4], 90.0)?;

        model.assign_release(Release::moment_z(MemberEnd::Start), vec![5])?;
        model.assign_release(
            Release::partial_my_mz(MemberEnd::Start, 0.99),
            (14..=23).collect(),
        )?;
        model.assign_release(
            Release::partial_my_mz(MemberEnd::End, 0.99),
            (14..=23).collect(),
        )?;

        model.assign_support(SupportKind::Fixed, vec![1])?;
        model.assign_support(SupportKind::Pinned, vec![2])?;

        model.add_load_case(1, "DEAD AND LIVE LOAD", LoadKind::Dead)?;
        model.add_load(
            1,
            Load::SelfWeight {
                direction: Axis::Y,
                factor: -1.0,
            },
        )?;
        for (node, fy) in [(4, -15.0), (5, -15.0), (11, -35.0)] {
            model.add_load(
                1,
                Load::Nodal {
                    nodes: vec![node],
                    load: vertical_load(fy),
                },
            )?;
        }
        model.add_load(
            1,
            Load::MemberUniform {
                members: (8..=13).collect(),
                direction: MemberLoadDirection::LocalY,
                intensity: -0.9,
            },
        )?;
        model.add_load(
            1,
            Load::MemberUniform {
                members: vec![6],
                direction: MemberLoadDirection::LocalY,
                intensity: -1.2,
            },
        )?;

        model.add_load_case(2, "WIND FROM LEFT", LoadKind::Wind)?;
        model.add_load(
            2,
            Load::MemberUniform {
                members: vec![1, 2],
                direction: MemberLoadDirection::GlobalX,
                intensity: 0.6,
            },
        )?;
        model.add_load(
            2,
            Load::MemberUniform {
                members: (8..=10).collect(),
                direction: MemberLoadDirection::LocalY,
                intensity: -1.0,
            },
        )?;

        model.add_combination(3, "75 PERCENT DL LL WL", vec![(1, 0.75), (2, 0.75)])?;

        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn two_node_model() -> FrameModel {
        let mut model = FrameModel::new(LengthUnit::Metre, ForceUnit::Kilonewton);
        model.add_node(1, point(0.0, 0.0, 0.0)).expect("node added");
        model.add_node(2, point(3.0, 4.0, 0.0)).expect("node added");
        model.add_member(1, 1, 2).expect("member added");
        model
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut model = two_node_model();
        assert_eq!(
            model.add_node(1, point(9.0, 9.0, 9.0)),
            Err(FrameEditError::DuplicateNode(1))
        );
        assert_eq!(
            model.add_member(1, 2, 1),
            Err(FrameEditError::DuplicateMember(1))
        );
    }

    #[test]
    fn members_require_existing_distinct_nodes() {
        let mut model = two_node_model();
        assert_eq!(
            model.add_member(2, 1, 7),
            Err(FrameEditError::UnknownNode(7))
        );
        assert_eq!(
            model.add_member(2, 2, 2),
            Err(FrameEditError::DegenerateMember { member: 2, node: 2 })
        );
        assert_eq!(model.member_count(), 1);
    }

    #[test]
    fn assignments_validate_targets() {
        let mut model = two_node_model();
        assert_eq!(
            model.assign_section(SectionShape::Beam, "W8X10", vec![1, 2]),
            Err(FrameEditError::UnknownMember(2))
        );
        assert_eq!(
            model.assign_support(SupportKind::Fixed, vec![3]),
            Err(FrameEditError::UnknownNode(3))
        );
        assert_eq!(
            model.add_load(
                1,
                Load::SelfWeight {
                    direction: Axis::Y,
                    factor: -1.0
                }
            ),
            Err(FrameEditError::UnknownLoadCase(1))
        );
    }

    #[test]
    fn combination_numbers_share_case_namespace() {
        let mut model = two_node_model();
        model
            .add_load_case(1, "DEAD", LoadKind::Dead)
            .expect("case added");
        assert_eq!(
            model.add_combination(1, "COMBO", vec![(1, 1.0)]),
            Err(FrameEditError::DuplicateLoadCase(1))
        );
        assert_eq!(
            model.add_combination(2, "COMBO", vec![(5, 1.0)]),
            Err(FrameEditError::UnknownLoadCase(5))
        );
        model
            .add_combination(2, "COMBO", vec![(1, 1.4)])
            .expect("combination added");
        assert_eq!(
            model.add_load_case(2, "LIVE", LoadKind::Live),
            Err(FrameEditError::DuplicateLoadCase(2))
        );
    }

    #[test]
    fn member_queries() {
        let model = two_node_model();
        assert_eq!(model.member_nodes(1), Some((1, 2)));
        assert_relative_eq!(model.member_length(1).expect("member exists"), 5.0);
        assert_eq!(model.member_length(9), None);
    }

    #[test]
    fn demonstration_frame_topology() {
        let model = FrameModel::demonstration().expect("literal model is valid");
        assert_eq!(model.node_count(), 16);
        assert_eq!(model.member_count(), 23);
        assert_eq!(model.units(), (LengthUnit::Foot, ForceUnit::Kip));
        assert_eq!(model.sections().len(), 5);
        assert_eq!(model.releases().len(), 3);
        assert_eq!(model.load_cases().len(), 2);
        assert_eq!(model.combinations()[0].factors, vec![(1, 0.75), (2, 0.75)]);

        // Every section group together covers all 23 members exactly once.
        let mut assigned: Vec<u32> = model
            .sections()
            .iter()
            .flat_map(|section| section.members.iter().copied())
            .collect();
        assigned.sort_unstable();
        assert_eq!(assigned, (1..=23).collect::<Vec<_>>());

        // Apex node joins two rafters.
        assert_eq!(model.node_degree(16), Some(2));
        assert_relative_eq!(model.member_length(1).expect("column"), 20.0);
    }
}
