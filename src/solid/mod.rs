//! Solid modelling capability and render primitive emission
//!
//! The layout never touches a kernel's internal representation. It hands
//! each descriptor's extents, profile, rotations and centre to a
//! [`SolidBuilder`] and collects the tessellated result.

mod mesh;

pub use mesh::{MeshKernel, TriangleMesh};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::geometry::{Axis, Point3};
use crate::layout::{ComponentDescriptor, ComponentKind, Layout, Profile};
use crate::topology::FeaTopology;

/// Colour of the FE node cloud
pub const NODE_CLOUD_COLOR: &str = "red";

/// Capability of a solid modelling kernel
pub trait SolidBuilder {
    type Solid;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Box centred on the origin: `width` along X, `length` along Y, `height` along Z.
    fn make_box(&mut self, width: f64, length: f64, height: f64) -> Result<Self::Solid, Self::Error>;

    /// Open C-channel centred on the origin, extruded along Z by `height`.
    fn make_channel(
        &mut self,
        width: f64,
        length: f64,
        height: f64,
        thickness: f64,
    ) -> Result<Self::Solid, Self::Error>;

    /// Rotate about the origin.
    fn rotate(&mut self, solid: Self::Solid, axis: Axis, degrees: f64) -> Result<Self::Solid, Self::Error>;

    fn translate(&mut self, solid: Self::Solid, offset: Point3) -> Result<Self::Solid, Self::Error>;

    fn tessellate(&mut self, solid: &Self::Solid) -> Result<TriangleMesh, Self::Error>;
}

/// One renderable item handed to the visualisation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderPrimitive {
    Mesh {
        kind: ComponentKind,
        name: String,
        color: String,
        mesh: TriangleMesh,
    },
    NodeCloud {
        points: Vec<Point3>,
        color: String,
    },
}

impl RenderPrimitive {
    /// Point cloud of every FE node
    pub fn node_cloud(topology: &FeaTopology) -> Self {
        RenderPrimitive::NodeCloud {
            points: topology.node_points(),
            color: NODE_CLOUD_COLOR.to_string(),
        }
    }

    pub fn kind(&self) -> Option<ComponentKind> {
        match self {
            RenderPrimitive::Mesh { kind, .. } => Some(*kind),
            RenderPrimitive::NodeCloud { .. } => None,
        }
    }
}

fn kernel_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> LayoutError {
    LayoutError::Kernel(Box::new(e))
}

/// Turns component descriptors into kernel requests
pub struct SolidEmitter<'k, K: SolidBuilder> {
    kernel: &'k mut K,
}

impl<'k, K: SolidBuilder> SolidEmitter<'k, K> {
    pub fn new(kernel: &'k mut K) -> Self {
        Self { kernel }
    }

    /// Build one primitive per component, in layout order.
    pub fn emit(&mut self, layout: &Layout) -> LayoutResult<Vec<RenderPrimitive>> {
        let primitives = layout
            .components
            .iter()
            .map(|c| self.emit_component(c))
            .collect::<LayoutResult<Vec<_>>>()?;
        info!("Emitted {} solids", primitives.len());
        Ok(primitives)
    }

    /// Build a component: profile, rotations about its own centre, then the move to its centre.
    pub fn emit_component(&mut self, component: &ComponentDescriptor) -> LayoutResult<RenderPrimitive> {
        let e = &component.extents;
        let mut solid = match component.profile {
            Profile::Box => self.kernel.make_box(e.width, e.length, e.height),
            Profile::Channel { thickness } => {
                self.kernel
                    .make_channel(e.width, e.length, e.height, thickness)
            }
        }
        .map_err(kernel_error)?;

        for rot in &component.rotations {
            solid = self
                .kernel
                .rotate(solid, rot.axis, rot.degrees)
                .map_err(kernel_error)?;
        }
        let solid = self
            .kernel
            .translate(solid, component.center)
            .map_err(kernel_error)?;
        let mesh = self.kernel.tessellate(&solid).map_err(kernel_error)?;
        debug!(
            "{} at ({:.3}, {:.3}, {:.3}): {} triangles",
            component.name,
            component.center.x,
            component.center.y,
            component.center.z,
            mesh.triangles.len()
        );

        Ok(RenderPrimitive::Mesh {
            kind: component.kind,
            name: component.name.clone(),
            color: component.kind.color().to_string(),
            mesh,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutCalculator;
    use crate::params::ParameterSet;
    use approx::assert_relative_eq;

    #[derive(Debug, thiserror::Error)]
    #[error("kernel refused channel")]
    struct Refused;

    /// Builds boxes but refuses channels
    struct BoxOnly(MeshKernel);

    impl SolidBuilder for BoxOnly {
        type Solid = TriangleMesh;
        type Error = Refused;

        fn make_box(&mut self, w: f64, l: f64, h: f64) -> Result<TriangleMesh, Refused> {
            Ok(self.0.make_box(w, l, h).unwrap_or_default())
        }

        fn make_channel(&mut self, _: f64, _: f64, _: f64, _: f64) -> Result<TriangleMesh, Refused> {
            Err(Refused)
        }

        fn rotate(&mut self, s: TriangleMesh, axis: Axis, deg: f64) -> Result<TriangleMesh, Refused> {
            Ok(self.0.rotate(s, axis, deg).unwrap_or_default())
        }

        fn translate(&mut self, s: TriangleMesh, offset: Point3) -> Result<TriangleMesh, Refused> {
            Ok(self.0.translate(s, offset).unwrap_or_default())
        }

        fn tessellate(&mut self, s: &TriangleMesh) -> Result<TriangleMesh, Refused> {
            Ok(s.clone())
        }
    }

    fn default_layout() -> Layout {
        LayoutCalculator::new(&ParameterSet::default())
            .unwrap()
            .calculate()
            .unwrap()
    }

    #[test]
    fn test_one_primitive_per_component() {
        let layout = default_layout();
        let mut kernel = MeshKernel::new();
        let prims = SolidEmitter::new(&mut kernel).emit(&layout).unwrap();
        assert_eq!(prims.len(), layout.components.len());
        for (prim, comp) in prims.iter().zip(&layout.components) {
            assert_eq!(prim.kind(), Some(comp.kind));
        }
    }

    #[test]
    fn test_mesh_lands_on_component_center() {
        let layout = default_layout();
        let mut kernel = MeshKernel::new();
        let mut emitter = SolidEmitter::new(&mut kernel);
        for comp in &layout.components {
            match emitter.emit_component(comp).unwrap() {
                RenderPrimitive::Mesh { mesh, color, .. } => {
                    assert_eq!(color, comp.kind.color());
                    // boxes are symmetric, so their bounds centre is the placement centre
                    if comp.profile == Profile::Box {
                        let c = mesh.center().unwrap();
                        assert_relative_eq!(c.x, comp.center.x, epsilon = 1e-9);
                        assert_relative_eq!(c.y, comp.center.y, epsilon = 1e-9);
                        assert_relative_eq!(c.z, comp.center.z, epsilon = 1e-9);
                    }
                }
                other => panic!("unexpected primitive {:?}", other),
            }
        }
    }

    #[test]
    fn test_kernel_error_is_propagated() {
        let layout = default_layout();
        let mut kernel = BoxOnly(MeshKernel::new());
        let err = SolidEmitter::new(&mut kernel).emit(&layout).unwrap_err();
        assert!(matches!(err, LayoutError::Kernel(_)));
        assert!(err.to_string().contains("kernel refused channel"));
    }
}
