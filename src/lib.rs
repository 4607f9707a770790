//! Solar Mount - parametric layout of solar panel mounting structures
//!
//! This library turns a small set of design parameters into:
//! - Positioned solids for every column, ground block, rafter, purlin and panel
//! - A deduplicated node/member graph for downstream structural analysis
//!
//! Solid modelling and structural analysis stay behind two capabilities,
//! [`solid::SolidBuilder`] and [`model::StructuralModel`], with in-crate
//! reference implementations ([`solid::MeshKernel`], [`model::FrameModel`]).
//!
//! ## Example
//! ```rust
//! use solar_mount::prelude::*;
//!
//! let params = ParameterSet {
//!     rows: 2,
//!     cols: 3,
//!     angle: 30.0,
//!     ..ParameterSet::default()
//! };
//!
//! // Geometry and topology
//! let mut kernel = MeshKernel::new();
//! let structure = generate(&params, &mut kernel).unwrap();
//! assert_eq!(structure.layout.count(ComponentKind::Panel), 6);
//!
//! // Hand the graph to a structural model
//! let mut model = FrameModel::new();
//! structure.topology.apply_to(&mut model).unwrap();
//! model.analyze().unwrap();
//! ```

pub mod elements;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod intersect;
pub mod layout;
pub mod model;
pub mod params;
pub mod solid;
pub mod topology;

// Re-export common types
pub mod prelude {
    pub use crate::elements::{Material, Member, MemberRole, Node, Section};
    pub use crate::error::{LayoutError, LayoutResult};
    pub use crate::generator::{generate, generate_topology, Skeleton, Structure};
    pub use crate::geometry::{Axis, NodeKey, Point3, Rotation};
    pub use crate::intersect::{IntersectionTracker, Intersections};
    pub use crate::layout::{ComponentDescriptor, ComponentKind, Layout, LayoutCalculator};
    pub use crate::model::{FrameModel, ModelSummary, StructuralModel};
    pub use crate::params::ParameterSet;
    pub use crate::solid::{MeshKernel, RenderPrimitive, SolidBuilder, SolidEmitter, TriangleMesh};
    pub use crate::topology::{FeaTopology, NodeRegistry, TopologyBuilder};
}
