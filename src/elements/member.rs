//! Member element - 3D frame element (purlin, rafter or column)

use serde::{Deserialize, Serialize};

use super::{Material, Section};

/// Structural role of a member. Each role owns one material and one section record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemberRole {
    Purlin,
    Rafter,
    Column,
}

impl MemberRole {
    pub const ALL: [MemberRole; 3] = [MemberRole::Purlin, MemberRole::Rafter, MemberRole::Column];

    pub fn material_name(&self) -> &'static str {
        match self {
            MemberRole::Purlin => "purlin_mat",
            MemberRole::Rafter => "rafter_mat",
            MemberRole::Column => "column_mat",
        }
    }

    pub fn section_name(&self) -> &'static str {
        match self {
            MemberRole::Purlin => "purlin_sec",
            MemberRole::Rafter => "rafter_sec",
            MemberRole::Column => "column_sec",
        }
    }

    /// Rotation about the member's own axis, in degrees, for a roof tilted by `tilt_deg`
    pub fn orientation(&self, tilt_deg: f64) -> f64 {
        match self {
            MemberRole::Purlin => tilt_deg + 90.0,
            MemberRole::Rafter | MemberRole::Column => 0.0,
        }
    }

    pub fn default_material(&self) -> Material {
        Material::steel_kip_inch()
    }

    pub fn default_section(&self) -> Section {
        Section::default_frame()
    }
}

/// A 3D frame member between two named nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    /// Name of the i-node (start)
    pub i_node: String,
    /// Name of the j-node (end)
    pub j_node: String,
    pub role: MemberRole,
    /// Name of the material
    pub material: String,
    /// Name of the section
    pub section: String,
    /// Rotation about longitudinal axis (degrees)
    pub rotation: f64,
}

impl Member {
    /// Create a member named after its end nodes, with the role's material and section
    pub fn new(i_node: &str, j_node: &str, role: MemberRole) -> Self {
        Self {
            name: format!("M_{}_{}", i_node, j_node),
            i_node: i_node.to_string(),
            j_node: j_node.to_string(),
            role,
            material: role.material_name().to_string(),
            section: role.section_name().to_string(),
            rotation: 0.0,
        }
    }

    /// Set member rotation about its longitudinal axis
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }
}
