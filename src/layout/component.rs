//! Positioned component descriptors

use serde::{Deserialize, Serialize};

use crate::geometry::{Point3, Rotation};

/// Role of a structural or cladding component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Column,
    Block,
    Rafter,
    Purlin,
    Panel,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Column,
        ComponentKind::Block,
        ComponentKind::Rafter,
        ComponentKind::Purlin,
        ComponentKind::Panel,
    ];

    /// Display colour used by the dashboard
    pub fn color(&self) -> &'static str {
        match self {
            ComponentKind::Panel => "#e0b14b",
            ComponentKind::Column => "#C44646",
            ComponentKind::Purlin => "#379c09",
            ComponentKind::Rafter => "#2292DD",
            ComponentKind::Block => "#00AB8F",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Column => "Column",
            ComponentKind::Block => "Block",
            ComponentKind::Rafter => "Rafter",
            ComponentKind::Purlin => "Purlin",
            ComponentKind::Panel => "Panel",
        }
    }
}

/// Cross-section shape requested from the solid kernel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Profile {
    /// Solid box
    Box,
    /// Open C-channel with the given wall thickness
    Channel { thickness: f64 },
}

/// Principal dimensions before rotation.
///
/// `width` runs along local X, `length` along local Y and `height` along
/// local Z. For channels `length` is the profile depth, `width` the flange
/// and `height` the extrusion (member length).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

/// Index of a structure copy within the farm array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CopyIndex {
    pub i: usize,
    pub j: usize,
}

/// A fully positioned component. Rotations apply in order about the
/// component's own centre, then the component moves to `center`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    pub kind: ComponentKind,
    pub name: String,
    pub copy: CopyIndex,
    pub center: Point3,
    pub extents: Extents,
    pub profile: Profile,
    pub rotations: Vec<Rotation>,
}
