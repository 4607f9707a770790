//! FE topology builder
//!
//! Converts intersection sets into a deduplicated node/member graph.
//! Every point becomes a node through [`NodeRegistry::insert_or_get`], so a
//! purlin crossing derived on the purlin side and the same crossing derived
//! on the rafter side always land on one node. Each physical beam becomes a
//! chain of members split at every node along it.

mod registry;

pub use registry::NodeRegistry;

use std::collections::HashSet;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::elements::{Material, Member, MemberRole, Node, Section};
use crate::error::{LayoutError, LayoutResult};
use crate::geometry::{NodeKey, Point3};
use crate::intersect::Intersections;
use crate::model::StructuralModel;

/// Axis along which a chain's nodes must strictly increase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainAxis {
    X,
    Y,
    Z,
}

impl ChainAxis {
    fn component(&self, key: &NodeKey) -> i64 {
        let m = key.millis();
        match self {
            ChainAxis::X => m[0],
            ChainAxis::Y => m[1],
            ChainAxis::Z => m[2],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedMaterial {
    pub name: String,
    #[serde(flatten)]
    pub material: Material,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSection {
    pub name: String,
    #[serde(flatten)]
    pub section: Section,
}

/// Node/member graph ready for a structural analysis engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeaTopology {
    pub nodes: Vec<Node>,
    pub materials: Vec<NamedMaterial>,
    pub sections: Vec<NamedSection>,
    pub members: Vec<Member>,
    /// Purlin nodes under panel edges, where panel loads apply
    pub load_nodes: Vec<String>,
    /// Column bases, where supports apply
    pub support_nodes: Vec<String>,
}

impl FeaTopology {
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn members_of(&self, role: MemberRole) -> impl Iterator<Item = &Member> + '_ {
        self.members.iter().filter(move |m| m.role == role)
    }

    pub fn node_points(&self) -> Vec<Point3> {
        self.nodes.iter().map(Node::point).collect()
    }

    /// Hand the graph to a structural model: materials, sections, nodes, then members.
    pub fn apply_to<M: StructuralModel>(&self, model: &mut M) -> LayoutResult<()> {
        let solver = |e: M::Error| LayoutError::Solver(Box::new(e));
        for m in &self.materials {
            model.add_material(&m.name, &m.material).map_err(solver)?;
        }
        for s in &self.sections {
            model.add_section(&s.name, &s.section).map_err(solver)?;
        }
        for node in &self.nodes {
            model.add_node(node).map_err(solver)?;
        }
        for member in &self.members {
            model.add_member(member).map_err(solver)?;
        }
        Ok(())
    }
}

/// Builds an [`FeaTopology`] from intersection sets
#[derive(Debug)]
pub struct TopologyBuilder {
    tilt_deg: f64,
    registry: NodeRegistry,
    members: Vec<Member>,
    member_names: HashSet<String>,
}

impl TopologyBuilder {
    /// `tilt_deg` sets the purlin orientation angle.
    pub fn new(tilt_deg: f64) -> Self {
        Self {
            tilt_deg,
            registry: NodeRegistry::new(),
            members: Vec::new(),
            member_names: HashSet::new(),
        }
    }

    pub fn build(mut self, sets: &Intersections) -> LayoutResult<FeaTopology> {
        let mut load_nodes = Vec::new();
        let mut seen_loads = HashSet::new();

        for purlin in &sets.purlins {
            let mut points = Vec::with_capacity(
                2 + purlin.rafter_points.len() + purlin.panel_points.len(),
            );
            points.extend_from_slice(&purlin.endpoints);
            points.extend_from_slice(&purlin.rafter_points);
            points.extend_from_slice(&purlin.panel_points);
            self.chain(&purlin.label(), &points, MemberRole::Purlin, ChainAxis::X)?;

            for p in &purlin.panel_points {
                let key = p.key();
                if seen_loads.insert(key) {
                    load_nodes.push(key.to_string());
                }
            }
        }

        for rafter in &sets.rafters {
            let mut points =
                Vec::with_capacity(rafter.purlin_points.len() + rafter.column_points.len());
            points.extend_from_slice(&rafter.purlin_points);
            points.extend_from_slice(&rafter.column_points);
            self.chain(&rafter.label(), &points, MemberRole::Rafter, ChainAxis::Y)?;
        }

        let mut support_nodes = Vec::with_capacity(sets.columns.len());
        for column in &sets.columns {
            self.chain(
                &column.label(),
                &[column.base, column.top],
                MemberRole::Column,
                ChainAxis::Z,
            )?;
            support_nodes.push(column.base.key().to_string());
        }

        let topology = FeaTopology {
            nodes: self.registry.into_nodes(),
            materials: MemberRole::ALL
                .iter()
                .map(|r| NamedMaterial {
                    name: r.material_name().to_string(),
                    material: r.default_material(),
                })
                .collect(),
            sections: MemberRole::ALL
                .iter()
                .map(|r| NamedSection {
                    name: r.section_name().to_string(),
                    section: r.default_section(),
                })
                .collect(),
            members: self.members,
            load_nodes,
            support_nodes,
        };
        info!(
            "Topology built: {} nodes, {} members ({} load nodes, {} support nodes)",
            topology.nodes.len(),
            topology.members.len(),
            topology.load_nodes.len(),
            topology.support_nodes.len()
        );
        Ok(topology)
    }

    /// Register `points` as nodes ordered along `axis` and join consecutive nodes with members.
    ///
    /// Points sharing a node key collapse into one node. Returns the chained node names.
    pub fn chain(
        &mut self,
        component: &str,
        points: &[Point3],
        role: MemberRole,
        axis: ChainAxis,
    ) -> LayoutResult<Vec<String>> {
        let mut keyed: Vec<(NodeKey, &Point3)> = points.iter().map(|p| (p.key(), p)).collect();
        keyed.sort_by(|a, b| {
            axis.component(&a.0)
                .cmp(&axis.component(&b.0))
                .then_with(|| a.0.cmp(&b.0))
        });
        keyed.dedup_by_key(|(key, _)| *key);

        if keyed.len() < 2 {
            return Err(LayoutError::topology(
                component,
                format!("needs at least two distinct nodes, found {}", keyed.len()),
            ));
        }
        for pair in keyed.windows(2) {
            if axis.component(&pair[0].0) == axis.component(&pair[1].0) {
                return Err(LayoutError::topology(
                    component,
                    format!(
                        "nodes {} and {} do not advance along the member axis",
                        pair[0].0, pair[1].0
                    ),
                ));
            }
        }

        let names: Vec<String> = keyed
            .iter()
            .map(|(_, p)| self.registry.insert_or_get(p).name.clone())
            .collect();
        for pair in names.windows(2) {
            self.add_member(component, &pair[0], &pair[1], role)?;
        }
        debug!("{}: {} nodes, {} members", component, names.len(), names.len() - 1);
        Ok(names)
    }

    fn add_member(
        &mut self,
        component: &str,
        i_node: &str,
        j_node: &str,
        role: MemberRole,
    ) -> LayoutResult<()> {
        if i_node == j_node {
            return Err(LayoutError::topology(
                component,
                format!("member endpoints are identical ({})", i_node),
            ));
        }
        let member =
            Member::new(i_node, j_node, role).with_rotation(role.orientation(self.tilt_deg));
        if !self.member_names.insert(member.name.clone()) {
            return Err(LayoutError::topology(
                component,
                format!("member {} already exists", member.name),
            ));
        }
        self.members.push(member);
        Ok(())
    }
}
