//! Structural model capability and the in-crate frame model container
//!
//! The generator never solves anything itself. It hands its node/member
//! graph to any [`StructuralModel`]; an analysis engine implements the trait
//! to receive the graph. [`FrameModel`] is the reference container: it keeps
//! the graph, enforces referential integrity, and its `analyze` runs the
//! pre-solve checks (resolvable references, no zero-length members) and
//! records member lengths without solving for equilibrium.

use std::collections::{BTreeMap, HashMap, HashSet};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::elements::{Material, Member, MemberRole, Node, Section};
use crate::error::{LayoutError, LayoutResult};

/// Capability of a structural analysis engine to receive a frame model
pub trait StructuralModel {
    type Error: std::error::Error + Send + Sync + 'static;

    fn add_node(&mut self, node: &Node) -> Result<(), Self::Error>;

    fn add_material(&mut self, name: &str, material: &Material) -> Result<(), Self::Error>;

    fn add_section(&mut self, name: &str, section: &Section) -> Result<(), Self::Error>;

    /// Add a member; both end nodes, its material and its section must already exist.
    fn add_member(&mut self, member: &Member) -> Result<(), Self::Error>;

    fn analyze(&mut self) -> Result<(), Self::Error>;
}

/// Outcome of the pre-solve checks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub num_nodes: usize,
    pub num_members: usize,
    pub total_length: f64,
    pub length_by_role: BTreeMap<MemberRole, f64>,
}

/// Named frame model: nodes, materials, sections and members
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameModel {
    /// Nodes in the model
    pub nodes: HashMap<String, Node>,
    /// Materials in the model
    pub materials: HashMap<String, Material>,
    /// Sections in the model
    pub sections: HashMap<String, Section>,
    /// Members (frame elements) in the model
    pub members: HashMap<String, Member>,

    /// Member lengths from the last successful check
    #[serde(skip)]
    lengths: HashMap<String, f64>,
    #[serde(skip)]
    summary: Option<ModelSummary>,
}

impl FrameModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Length of a member, available after [`StructuralModel::analyze`]
    pub fn member_length(&self, name: &str) -> LayoutResult<f64> {
        if !self.members.contains_key(name) {
            return Err(LayoutError::MemberNotFound(name.to_string()));
        }
        self.lengths
            .get(name)
            .copied()
            .ok_or_else(|| {
                LayoutError::InvalidGeometry("model not checked - run analyze() first".into())
            })
    }

    /// Summary of the last successful check
    pub fn summary(&self) -> Option<&ModelSummary> {
        self.summary.as_ref()
    }

    /// Check if model has passed the pre-solve checks
    pub fn is_analyzed(&self) -> bool {
        self.summary.is_some()
    }

    fn invalidate(&mut self) {
        self.lengths.clear();
        self.summary = None;
    }
}

impl StructuralModel for FrameModel {
    type Error = LayoutError;

    fn add_node(&mut self, node: &Node) -> LayoutResult<()> {
        if self.nodes.contains_key(&node.name) {
            return Err(LayoutError::DuplicateName(node.name.clone()));
        }
        self.nodes.insert(node.name.clone(), node.clone());
        self.invalidate();
        Ok(())
    }

    fn add_material(&mut self, name: &str, material: &Material) -> LayoutResult<()> {
        if self.materials.contains_key(name) {
            return Err(LayoutError::DuplicateName(name.to_string()));
        }
        self.materials.insert(name.to_string(), material.clone());
        Ok(())
    }

    fn add_section(&mut self, name: &str, section: &Section) -> LayoutResult<()> {
        if self.sections.contains_key(name) {
            return Err(LayoutError::DuplicateName(name.to_string()));
        }
        self.sections.insert(name.to_string(), section.clone());
        Ok(())
    }

    fn add_member(&mut self, member: &Member) -> LayoutResult<()> {
        // Validate references
        if !self.nodes.contains_key(&member.i_node) {
            return Err(LayoutError::NodeNotFound(member.i_node.clone()));
        }
        if !self.nodes.contains_key(&member.j_node) {
            return Err(LayoutError::NodeNotFound(member.j_node.clone()));
        }
        if !self.materials.contains_key(&member.material) {
            return Err(LayoutError::MaterialNotFound(member.material.clone()));
        }
        if !self.sections.contains_key(&member.section) {
            return Err(LayoutError::SectionNotFound(member.section.clone()));
        }
        if self.members.contains_key(&member.name) {
            return Err(LayoutError::DuplicateName(member.name.clone()));
        }

        self.members.insert(member.name.clone(), member.clone());
        self.invalidate();
        Ok(())
    }

    fn analyze(&mut self) -> LayoutResult<()> {
        let mut summary = ModelSummary {
            num_nodes: self.nodes.len(),
            num_members: self.members.len(),
            ..ModelSummary::default()
        };
        let mut lengths = HashMap::with_capacity(self.members.len());
        let mut connected: HashSet<&str> = HashSet::new();

        for (name, member) in &self.members {
            let i_node = self
                .nodes
                .get(&member.i_node)
                .ok_or_else(|| LayoutError::NodeNotFound(member.i_node.clone()))?;
            let j_node = self
                .nodes
                .get(&member.j_node)
                .ok_or_else(|| LayoutError::NodeNotFound(member.j_node.clone()))?;
            let length = i_node.distance_to(j_node);

            if length < 1e-10 {
                return Err(LayoutError::InvalidGeometry(format!(
                    "Member has zero length: i={}, j={}",
                    member.i_node, member.j_node
                )));
            }

            connected.insert(member.i_node.as_str());
            connected.insert(member.j_node.as_str());
            *summary.length_by_role.entry(member.role).or_insert(0.0) += length;
            summary.total_length += length;
            lengths.insert(name.clone(), length);
        }

        let orphans = self.nodes.len() - connected.len();
        if orphans > 0 {
            warn!("{} node(s) are not connected to any member", orphans);
        }
        info!(
            "Frame model checked: {} nodes, {} members, {:.3} total member length",
            summary.num_nodes, summary.num_members, summary.total_length
        );

        self.lengths = lengths;
        self.summary = Some(summary);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn portal() -> FrameModel {
        let mut model = FrameModel::new();
        for role in MemberRole::ALL {
            model
                .add_material(role.material_name(), &role.default_material())
                .unwrap();
            model
                .add_section(role.section_name(), &role.default_section())
                .unwrap();
        }
        model.add_node(&Node::new("N1", 0.0, 0.0, 0.0)).unwrap();
        model.add_node(&Node::new("N2", 0.0, 0.0, 4.0)).unwrap();
        model.add_node(&Node::new("N3", 6.0, 0.0, 4.0)).unwrap();
        model
            .add_member(&Member::new("N1", "N2", MemberRole::Column))
            .unwrap();
        model
            .add_member(&Member::new("N2", "N3", MemberRole::Rafter))
            .unwrap();
        model
    }

    #[test]
    fn test_member_needs_existing_nodes() {
        let mut model = portal();
        let err = model
            .add_member(&Member::new("N1", "N9", MemberRole::Purlin))
            .unwrap_err();
        assert!(matches!(err, LayoutError::NodeNotFound(name) if name == "N9"));
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut model = portal();
        let err = model.add_node(&Node::new("N1", 1.0, 1.0, 1.0)).unwrap_err();
        assert!(matches!(err, LayoutError::DuplicateName(_)));
    }

    #[test]
    fn test_member_needs_material() {
        let mut model = FrameModel::new();
        model.add_node(&Node::new("A", 0.0, 0.0, 0.0)).unwrap();
        model.add_node(&Node::new("B", 1.0, 0.0, 0.0)).unwrap();
        let err = model
            .add_member(&Member::new("A", "B", MemberRole::Purlin))
            .unwrap_err();
        assert!(matches!(err, LayoutError::MaterialNotFound(_)));
    }

    #[test]
    fn test_analyze_records_lengths() {
        let mut model = portal();
        assert!(!model.is_analyzed());
        model.analyze().unwrap();
        assert_relative_eq!(model.member_length("M_N1_N2").unwrap(), 4.0);
        assert_relative_eq!(model.member_length("M_N2_N3").unwrap(), 6.0);
        let summary = model.summary().unwrap();
        assert_eq!(summary.num_members, 2);
        assert_relative_eq!(summary.total_length, 10.0);
        assert_relative_eq!(summary.length_by_role[&MemberRole::Column], 4.0);
    }

    #[test]
    fn test_zero_length_member_fails_check() {
        let mut model = portal();
        model.add_node(&Node::new("N4", 6.0, 0.0, 4.0)).unwrap();
        model
            .add_member(&Member::new("N3", "N4", MemberRole::Purlin))
            .unwrap();
        assert!(matches!(model.analyze(), Err(LayoutError::InvalidGeometry(_))));
    }

    #[test]
    fn test_edit_invalidates_check() {
        let mut model = portal();
        model.analyze().unwrap();
        model.add_node(&Node::new("N5", 9.0, 0.0, 0.0)).unwrap();
        assert!(!model.is_analyzed());
    }
}
