//! End-to-end generation: parameters to render primitives and FE topology

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::LayoutResult;
use crate::intersect::{IntersectionTracker, Intersections};
use crate::layout::{Layout, LayoutCalculator};
use crate::params::ParameterSet;
use crate::solid::{RenderPrimitive, SolidBuilder, SolidEmitter};
use crate::topology::{FeaTopology, TopologyBuilder};

/// Geometry and topology of one parameter set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub layout: Layout,
    /// One mesh per component in layout order, then the FE node cloud
    pub primitives: Vec<RenderPrimitive>,
    pub topology: FeaTopology,
}

/// Layout, intersections and topology without touching a solid kernel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skeleton {
    pub layout: Layout,
    pub intersections: Intersections,
    pub topology: FeaTopology,
}

/// Compute the layout and FE topology only.
pub fn generate_topology(params: &ParameterSet) -> LayoutResult<Skeleton> {
    let layout = LayoutCalculator::new(params)?.calculate()?;
    let intersections = IntersectionTracker::new(&layout).track()?;
    let topology = TopologyBuilder::new(params.angle).build(&intersections)?;
    Ok(Skeleton {
        layout,
        intersections,
        topology,
    })
}

/// Run the whole pipeline for one parameter set.
///
/// All parameter and topology checks complete before the kernel receives
/// its first request, so a bad configuration never yields partial geometry.
pub fn generate<K: SolidBuilder>(params: &ParameterSet, kernel: &mut K) -> LayoutResult<Structure> {
    let Skeleton {
        layout, topology, ..
    } = generate_topology(params)?;

    let mut primitives = SolidEmitter::new(kernel).emit(&layout)?;
    primitives.push(RenderPrimitive::node_cloud(&topology));

    info!(
        "Generated {} components across {} copies, {} FE nodes",
        layout.components.len(),
        params.copies(),
        topology.nodes.len()
    );
    Ok(Structure {
        layout,
        primitives,
        topology,
    })
}
