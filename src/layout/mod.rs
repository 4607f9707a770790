//! Layout calculator: parameters to positioned components
//!
//! Turns a [`ParameterSet`] into component descriptors for every column,
//! ground block, rafter, purlin and panel of a `copies_in_x × copies_in_y`
//! array of identical structures, together with the local coordinate
//! lists the intersection tracker needs.

mod component;
mod dimensions;

pub use component::{ComponentDescriptor, ComponentKind, CopyIndex, Extents, Profile};
pub use dimensions::{Dimensions, PANEL_CLEARANCE};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::geometry::{Axis, Point3, Rotation};
use crate::params::ParameterSet;

/// Ground position and height of one line of support columns.
///
/// One record per column line along Y, shared by every column in that line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnSupport {
    pub y_position: f64,
    pub height: f64,
}

/// Which of the two purlins of a panel row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurlinSide {
    /// Purlin inset by `purlin_offset` from the row's front edge
    Upper,
    /// Purlin inset by `purlin_offset` from the row's rear edge
    Lower,
}

/// Centreline of one purlin in the local frame of a copy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PurlinLine {
    pub row: usize,
    pub side: PurlinSide,
    pub y: f64,
    pub z: f64,
}

/// Everything the layout calculator produces for one parameter set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub params: ParameterSet,
    pub dimensions: Dimensions,
    pub components: Vec<ComponentDescriptor>,
    /// Column lines, ordered by ascending ground Y
    pub supports: Vec<ColumnSupport>,
    /// Rafter X positions in the local frame, ascending
    pub rafter_xs: Vec<f64>,
    /// Left and right edge X of every panel column in the local frame, ascending
    pub panel_edges: Vec<f64>,
    /// Purlin centrelines in the local frame, row by row
    pub purlin_lines: Vec<PurlinLine>,
}

impl Layout {
    /// Array copies in generation order
    pub fn copies(&self) -> impl Iterator<Item = CopyIndex> + '_ {
        let ny = self.params.copies_in_y;
        (0..self.params.copies_in_x).flat_map(move |i| (0..ny).map(move |j| CopyIndex { i, j }))
    }

    /// Translation of a copy relative to copy (0, 0)
    pub fn copy_offset(&self, copy: CopyIndex) -> (f64, f64) {
        (
            copy.i as f64 * self.params.x_gap,
            copy.j as f64 * self.params.y_gap,
        )
    }

    /// Components of the given kind
    pub fn components_of(
        &self,
        kind: ComponentKind,
    ) -> impl Iterator<Item = &ComponentDescriptor> + '_ {
        self.components.iter().filter(move |c| c.kind == kind)
    }

    pub fn count(&self, kind: ComponentKind) -> usize {
        self.components_of(kind).count()
    }
}

/// Computes component placement from a validated parameter set
#[derive(Debug, Clone)]
pub struct LayoutCalculator {
    params: ParameterSet,
    dims: Dimensions,
}

impl LayoutCalculator {
    /// Validate the parameters and derive all dimensions.
    pub fn new(params: &ParameterSet) -> LayoutResult<Self> {
        let dims = Dimensions::derive(params)?;
        Ok(Self {
            params: params.clone(),
            dims,
        })
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dims
    }

    /// Compute every component of every copy.
    pub fn calculate(&self) -> LayoutResult<Layout> {
        let supports = self.column_supports()?;
        let rafter_xs: Vec<f64> = (0..self.params.columns_x)
            .map(|x_i| self.dims.rafter_x(&self.params, x_i))
            .collect();
        let panel_edges = self.panel_edges();
        let purlin_lines = self.purlin_lines();

        let mut layout = Layout {
            params: self.params.clone(),
            dimensions: self.dims,
            components: Vec::new(),
            supports,
            rafter_xs,
            panel_edges,
            purlin_lines,
        };

        let copies: Vec<CopyIndex> = layout.copies().collect();
        let mut components = Vec::new();
        for &copy in &copies {
            self.columns_and_blocks(&layout, copy, &mut components);
        }
        for &copy in &copies {
            self.rafters(&layout, copy, &mut components);
        }
        for &copy in &copies {
            self.panels(&layout, copy, &mut components);
        }
        for &copy in &copies {
            self.purlins(&layout, copy, &mut components);
        }
        layout.components = components;

        info!(
            "Layout computed: {} components across {} copies",
            layout.components.len(),
            copies.len()
        );
        for kind in ComponentKind::ALL {
            debug!("  {}: {}", kind.name(), layout.count(kind));
        }
        Ok(layout)
    }

    fn column_supports(&self) -> LayoutResult<Vec<ColumnSupport>> {
        (0..self.params.columns_y)
            .map(|y_i| {
                let y_position = self.dims.column_y(&self.params, y_i);
                let height = self.dims.roof_height(&self.params, y_position);
                if !(height > 0.0) {
                    return Err(LayoutError::configuration(
                        "column_height",
                        height,
                        "must be positive",
                    ));
                }
                Ok(ColumnSupport { y_position, height })
            })
            .collect()
    }

    fn panel_edges(&self) -> Vec<f64> {
        let p = &self.params;
        let mut edges = Vec::with_capacity(p.cols * 2);
        for c in 0..p.cols {
            let left = c as f64 * self.dims.horiz_spacing;
            edges.push(left);
            edges.push(left + p.panel_width);
        }
        edges
    }

    fn purlin_lines(&self) -> Vec<PurlinLine> {
        let p = &self.params;
        let cos = self.dims.angle_rad.cos();
        let mut lines = Vec::with_capacity(p.rows * 2);
        for row in 0..p.rows {
            let upper_y = row as f64 * self.dims.vert_spacing * cos + p.purlin_offset * cos;
            let lower_y = upper_y + self.dims.purlin_spacing;
            for (side, y) in [(PurlinSide::Upper, upper_y), (PurlinSide::Lower, lower_y)] {
                lines.push(PurlinLine {
                    row,
                    side,
                    y,
                    z: self.dims.roof_height(p, y) + self.dims.purlin_lift,
                });
            }
        }
        lines
    }

    fn columns_and_blocks(
        &self,
        layout: &Layout,
        copy: CopyIndex,
        out: &mut Vec<ComponentDescriptor>,
    ) {
        let p = &self.params;
        let (ox, oy) = layout.copy_offset(copy);
        for support in &layout.supports {
            for x_i in 0..p.columns_x {
                let cx = self.dims.column_x(p, x_i) + ox;
                let cy = support.y_position + oy;
                out.push(ComponentDescriptor {
                    kind: ComponentKind::Column,
                    name: ComponentKind::Column.name().to_string(),
                    copy,
                    center: Point3::new(cx, cy, support.height / 2.0),
                    extents: Extents {
                        width: p.column_width,
                        length: p.column_length,
                        height: support.height,
                    },
                    profile: Profile::Channel {
                        thickness: p.column_thickness,
                    },
                    rotations: vec![Rotation::new(Axis::Z, 180.0)],
                });
                out.push(ComponentDescriptor {
                    kind: ComponentKind::Block,
                    name: ComponentKind::Block.name().to_string(),
                    copy,
                    center: Point3::new(cx, cy, -p.block_height / 2.0),
                    extents: Extents {
                        width: p.block_width,
                        length: p.block_length,
                        height: p.block_height,
                    },
                    profile: Profile::Box,
                    rotations: Vec::new(),
                });
            }
        }
    }

    fn rafters(&self, layout: &Layout, copy: CopyIndex, out: &mut Vec<ComponentDescriptor>) {
        let p = &self.params;
        let (ox, oy) = layout.copy_offset(copy);
        for &rx in &layout.rafter_xs {
            out.push(ComponentDescriptor {
                kind: ComponentKind::Rafter,
                name: ComponentKind::Rafter.name().to_string(),
                copy,
                center: Point3::new(rx + ox, self.dims.rafter_mid_y + oy, self.dims.rafter_mid_z),
                extents: Extents {
                    width: p.rafter_width,
                    length: p.rafter_length,
                    height: self.dims.rafter_span,
                },
                profile: Profile::Channel {
                    thickness: p.rafter_thickness,
                },
                rotations: vec![Rotation::new(Axis::X, 90.0 + p.angle)],
            });
        }
    }

    fn panels(&self, layout: &Layout, copy: CopyIndex, out: &mut Vec<ComponentDescriptor>) {
        let p = &self.params;
        let (ox, oy) = layout.copy_offset(copy);
        let (sin, cos) = self.dims.angle_rad.sin_cos();
        for c in 0..p.cols {
            for r in 0..p.rows {
                let local_y = r as f64 * self.dims.vert_spacing + p.panel_length / 2.0;
                let local_x = c as f64 * self.dims.horiz_spacing + p.panel_width / 2.0;
                let z = p.column_min_height + local_y * sin + self.dims.panel_stack_height;
                out.push(ComponentDescriptor {
                    kind: ComponentKind::Panel,
                    name: format!("Panel R{}C{}", r + 1, c + 1),
                    copy,
                    center: Point3::new(local_x + ox, local_y * cos + oy, z),
                    extents: Extents {
                        width: p.panel_width,
                        length: p.panel_length,
                        height: p.panel_thickness,
                    },
                    profile: Profile::Box,
                    rotations: vec![Rotation::new(Axis::X, p.angle)],
                });
            }
        }
    }

    fn purlins(&self, layout: &Layout, copy: CopyIndex, out: &mut Vec<ComponentDescriptor>) {
        let p = &self.params;
        let (ox, oy) = layout.copy_offset(copy);
        for line in &layout.purlin_lines {
            out.push(ComponentDescriptor {
                kind: ComponentKind::Purlin,
                name: ComponentKind::Purlin.name().to_string(),
                copy,
                center: Point3::new(self.dims.purlin_center_x + ox, line.y + oy, line.z),
                extents: Extents {
                    width: p.purlin_width,
                    length: p.purlin_length,
                    height: self.dims.purlin_span,
                },
                profile: Profile::Channel {
                    thickness: p.purlin_thickness,
                },
                rotations: vec![
                    Rotation::new(Axis::Y, 90.0),
                    Rotation::new(Axis::X, p.angle + 90.0),
                ],
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn layout(params: &ParameterSet) -> Layout {
        LayoutCalculator::new(params).unwrap().calculate().unwrap()
    }

    #[test]
    fn test_component_counts() {
        let p = ParameterSet::default();
        let l = layout(&p);
        assert_eq!(l.count(ComponentKind::Panel), 6);
        assert_eq!(l.count(ComponentKind::Column), 4);
        assert_eq!(l.count(ComponentKind::Block), 4);
        assert_eq!(l.count(ComponentKind::Rafter), 2);
        assert_eq!(l.count(ComponentKind::Purlin), 4);
    }

    #[test]
    fn test_column_height_follows_roof() {
        let p = ParameterSet::default();
        let l = layout(&p);
        let tan = p.angle_rad().tan();
        for s in &l.supports {
            assert_relative_eq!(s.height, p.column_min_height + s.y_position * tan, epsilon = 1e-12);
        }
        let col = l.components_of(ComponentKind::Column).next().unwrap();
        assert_relative_eq!(col.center.z, col.extents.height / 2.0);
    }

    #[test]
    fn test_blocks_sit_below_ground() {
        let p = ParameterSet::default();
        let l = layout(&p);
        for block in l.components_of(ComponentKind::Block) {
            assert_relative_eq!(block.center.z + block.extents.height / 2.0, 0.0);
        }
    }

    #[test]
    fn test_panels_clear_their_supports() {
        let p = ParameterSet::default();
        let l = layout(&p);
        let cos = p.angle_rad().cos();
        for panel in l.components_of(ComponentKind::Panel) {
            let local_y = panel.center.y / cos;
            let roof = p.column_min_height + local_y * p.angle_rad().sin();
            let underside = panel.center.z - p.panel_thickness / 2.0;
            assert!(underside - roof >= p.rafter_length + p.purlin_length + PANEL_CLEARANCE - 1e-12);
        }
    }

    #[test]
    fn test_panel_names() {
        let p = ParameterSet::default();
        let l = layout(&p);
        let names: Vec<&str> = l
            .components_of(ComponentKind::Panel)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names[0], "Panel R1C1");
        assert_eq!(names[1], "Panel R2C1");
        assert_eq!(names[5], "Panel R2C3");
    }

    #[test]
    fn test_purlin_pairs_are_inset() {
        let p = ParameterSet::default();
        let l = layout(&p);
        let cos = p.angle_rad().cos();
        assert_eq!(l.purlin_lines.len(), 2 * p.rows);
        let first = &l.purlin_lines[0];
        let second = &l.purlin_lines[1];
        assert_eq!(first.side, PurlinSide::Upper);
        assert_eq!(second.side, PurlinSide::Lower);
        assert_relative_eq!(first.y, p.purlin_offset * cos, epsilon = 1e-12);
        assert_relative_eq!(
            second.y,
            (p.panel_length - p.purlin_offset) * cos,
            epsilon = 1e-12
        );
        assert!(second.z > first.z);
    }

    #[test]
    fn test_panel_edges_ascend() {
        let p = ParameterSet::default();
        let l = layout(&p);
        assert_eq!(l.panel_edges.len(), 2 * p.cols);
        assert!(l.panel_edges.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_rafter_rotation_follows_tilt() {
        let p = ParameterSet {
            angle: 20.0,
            ..ParameterSet::default()
        };
        let l = layout(&p);
        let rafter = l.components_of(ComponentKind::Rafter).next().unwrap();
        assert_eq!(rafter.rotations, vec![Rotation::new(Axis::X, 110.0)]);
        assert_relative_eq!(rafter.extents.height, l.dimensions.rafter_span);
    }
}
