//! Triangle-mesh solid kernel
//!
//! A minimal [`SolidBuilder`] that represents every solid directly as its
//! tessellation. Boxes and open channels are prisms: a planar outline in
//! local XY extruded along local Z and centred on the origin.

use std::convert::Infallible;

use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use super::SolidBuilder;
use crate::geometry::{Axis, Point3};

/// Indexed triangle mesh
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<[f64; 3]>,
    pub triangles: Vec<[usize; 3]>,
}

impl TriangleMesh {
    /// Axis-aligned bounds as (min, max)
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        let first = self.vertices.first()?;
        let mut min = *first;
        let mut max = *first;
        for v in &self.vertices {
            for k in 0..3 {
                min[k] = min[k].min(v[k]);
                max[k] = max[k].max(v[k]);
            }
        }
        Some((min.into(), max.into()))
    }

    /// Centre of the bounding box
    pub fn center(&self) -> Option<Point3> {
        let (min, max) = self.bounds()?;
        Some(Point3::new(
            (min.x + max.x) / 2.0,
            (min.y + max.y) / 2.0,
            (min.z + max.z) / 2.0,
        ))
    }
}

/// Extrude a closed outline along Z by `height`, then centre the prism on the origin.
///
/// `cap` triangulates the outline by vertex index.
fn prism(outline: &[[f64; 2]], cap: &[[usize; 3]], height: f64) -> TriangleMesh {
    let n = outline.len();
    let (mut cx, mut cy) = (f64::INFINITY, f64::INFINITY);
    let (mut mx, mut my) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in outline {
        cx = cx.min(p[0]);
        cy = cy.min(p[1]);
        mx = mx.max(p[0]);
        my = my.max(p[1]);
    }
    let (dx, dy, dz) = ((cx + mx) / 2.0, (cy + my) / 2.0, height / 2.0);

    let mut vertices = Vec::with_capacity(2 * n);
    for z in [0.0, height] {
        for p in outline {
            vertices.push([p[0] - dx, p[1] - dy, z - dz]);
        }
    }

    let mut triangles = Vec::with_capacity(2 * cap.len() + 2 * n);
    for t in cap {
        // bottom faces down, top faces up
        triangles.push([t[0], t[2], t[1]]);
        triangles.push([t[0] + n, t[1] + n, t[2] + n]);
    }
    for i in 0..n {
        let j = (i + 1) % n;
        triangles.push([i, j, j + n]);
        triangles.push([i, j + n, i + n]);
    }
    TriangleMesh {
        vertices,
        triangles,
    }
}

/// Solid kernel whose solids are triangle meshes
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshKernel;

impl MeshKernel {
    pub fn new() -> Self {
        Self
    }
}

impl SolidBuilder for MeshKernel {
    type Solid = TriangleMesh;
    type Error = Infallible;

    fn make_box(&mut self, width: f64, length: f64, height: f64) -> Result<TriangleMesh, Infallible> {
        let outline = [[0.0, 0.0], [width, 0.0], [width, length], [0.0, length]];
        Ok(prism(&outline, &[[0, 1, 2], [0, 2, 3]], height))
    }

    fn make_channel(
        &mut self,
        width: f64,
        length: f64,
        height: f64,
        thickness: f64,
    ) -> Result<TriangleMesh, Infallible> {
        let (w, l, t) = (width, length, thickness);
        let outline = [
            [0.0, 0.0],
            [w, 0.0],
            [w, t],
            [t, t],
            [t, l - t],
            [w, l - t],
            [w, l],
            [0.0, l],
            [0.0, l - t],
            [0.0, t],
        ];
        // bottom flange, web, top flange
        let cap = [
            [0, 1, 2],
            [0, 2, 3],
            [0, 3, 9],
            [9, 3, 4],
            [9, 4, 8],
            [8, 4, 5],
            [8, 5, 6],
            [8, 6, 7],
        ];
        Ok(prism(&outline, &cap, height))
    }

    fn rotate(
        &mut self,
        mut solid: TriangleMesh,
        axis: Axis,
        degrees: f64,
    ) -> Result<TriangleMesh, Infallible> {
        let rot = Rotation3::from_axis_angle(&axis.unit(), degrees.to_radians());
        for v in &mut solid.vertices {
            let r = rot * Vector3::new(v[0], v[1], v[2]);
            *v = [r.x, r.y, r.z];
        }
        Ok(solid)
    }

    fn translate(&mut self, mut solid: TriangleMesh, offset: Point3) -> Result<TriangleMesh, Infallible> {
        for v in &mut solid.vertices {
            v[0] += offset.x;
            v[1] += offset.y;
            v[2] += offset.z;
        }
        Ok(solid)
    }

    fn tessellate(&mut self, solid: &TriangleMesh) -> Result<TriangleMesh, Infallible> {
        Ok(solid.clone())
    }
}
