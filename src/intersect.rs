//! Intersection tracking between purlins, rafters, panels and columns
//!
//! Collects, in global coordinates, every point where structural members
//! meet. Points are gathered unsorted; ordering along each member is the
//! topology builder's job.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::geometry::Point3;
use crate::layout::{ColumnSupport, CopyIndex, Layout, PurlinLine, PurlinSide};

/// Slack allowed when testing whether a crossing lies on a purlin
const EXTENT_TOLERANCE: f64 = 1e-9;

/// Points collected along one purlin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurlinIntersections {
    pub copy: CopyIndex,
    pub row: usize,
    pub side: PurlinSide,
    /// Left and right physical ends
    pub endpoints: [Point3; 2],
    /// Crossings with every rafter of the copy
    pub rafter_points: Vec<Point3>,
    /// Crossings with every panel edge
    pub panel_points: Vec<Point3>,
}

impl PurlinIntersections {
    pub fn label(&self) -> String {
        format!(
            "purlin (copy {},{} row {} {:?})",
            self.copy.i, self.copy.j, self.row, self.side
        )
    }
}

/// Points collected along one rafter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RafterIntersections {
    pub copy: CopyIndex,
    pub index: usize,
    pub x: f64,
    /// Crossings with the upper and lower purlin of every row
    pub purlin_points: Vec<Point3>,
    /// Where each supporting column meets the rafter soffit
    pub column_points: Vec<Point3>,
}

impl RafterIntersections {
    pub fn label(&self) -> String {
        format!(
            "rafter (copy {},{} index {})",
            self.copy.i, self.copy.j, self.index
        )
    }
}

/// Vertical FE column from ground to the rafter above it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnSegment {
    pub copy: CopyIndex,
    pub rafter: usize,
    pub line: usize,
    pub base: Point3,
    pub top: Point3,
}

impl ColumnSegment {
    pub fn label(&self) -> String {
        format!(
            "column (copy {},{} rafter {} line {})",
            self.copy.i, self.copy.j, self.rafter, self.line
        )
    }
}

/// Roof line `z = slope·y + intercept` in the local frame of a copy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoffitLine {
    pub slope: f64,
    pub intercept: f64,
}

impl SoffitLine {
    /// Line through two purlin crossings on the same rafter.
    pub fn through(a: &PurlinLine, b: &PurlinLine) -> LayoutResult<Self> {
        let dy = b.y - a.y;
        if dy.abs() < EXTENT_TOLERANCE {
            return Err(LayoutError::configuration(
                "purlin_spacing",
                dy,
                "purlins of a row coincide, roof line is undefined",
            ));
        }
        let slope = (b.z - a.z) / dy;
        Ok(Self {
            slope,
            intercept: b.z - slope * b.y,
        })
    }

    pub fn at(&self, y: f64) -> f64 {
        self.slope * y + self.intercept
    }
}

/// All intersection sets for one layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intersections {
    pub purlins: Vec<PurlinIntersections>,
    pub rafters: Vec<RafterIntersections>,
    pub columns: Vec<ColumnSegment>,
}

/// Computes intersection sets from a finished layout
#[derive(Debug, Clone, Copy)]
pub struct IntersectionTracker<'a> {
    layout: &'a Layout,
}

impl<'a> IntersectionTracker<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        Self { layout }
    }

    pub fn track(&self) -> LayoutResult<Intersections> {
        let soffits = self.column_soffits()?;
        let mut out = Intersections::default();
        for copy in self.layout.copies() {
            self.purlins(copy, &mut out.purlins);
            self.rafters(copy, &soffits, &mut out.rafters);
            self.columns(copy, &soffits, &mut out.columns);
        }
        debug!(
            "Tracked {} purlins, {} rafters, {} columns",
            out.purlins.len(),
            out.rafters.len(),
            out.columns.len()
        );
        Ok(out)
    }

    /// Roof line through the purlin pair of the row nearest `y`
    fn soffit_line(&self, y: f64) -> LayoutResult<SoffitLine> {
        let lines = &self.layout.purlin_lines;
        let nearest = lines
            .chunks(2)
            .filter(|pair| pair.len() == 2)
            .min_by(|a, b| {
                let da = ((a[0].y + a[1].y) / 2.0 - y).abs();
                let db = ((b[0].y + b[1].y) / 2.0 - y).abs();
                da.total_cmp(&db)
            })
            .ok_or_else(|| LayoutError::topology("roof", "no purlin rows to fit a soffit line"))?;
        SoffitLine::through(&nearest[0], &nearest[1])
    }

    /// Soffit height above every column line, local frame
    fn column_soffits(&self) -> LayoutResult<Vec<(ColumnSupport, f64)>> {
        self.layout
            .supports
            .iter()
            .map(|support| {
                let top = self.soffit_line(support.y_position)?.at(support.y_position);
                if !(top > 0.0) {
                    return Err(LayoutError::configuration(
                        "column_soffit",
                        top,
                        "rafter soffit must be above ground",
                    ));
                }
                Ok((*support, top))
            })
            .collect()
    }

    fn purlins(&self, copy: CopyIndex, out: &mut Vec<PurlinIntersections>) {
        let dims = &self.layout.dimensions;
        let (ox, oy) = self.layout.copy_offset(copy);
        let left = dims.purlin_center_x - dims.purlin_span / 2.0;
        let right = dims.purlin_center_x + dims.purlin_span / 2.0;
        let on_purlin = |x: f64| x >= left - EXTENT_TOLERANCE && x <= right + EXTENT_TOLERANCE;

        for line in &self.layout.purlin_lines {
            let at = |x: f64| Point3::new(x + ox, line.y + oy, line.z);
            let crossings = |xs: &[f64], what: &str| -> Vec<Point3> {
                xs.iter()
                    .copied()
                    .filter(|&x| {
                        let keep = on_purlin(x);
                        if !keep {
                            warn!(
                                "{} at x={:.3} lies beyond purlin extent [{:.3}, {:.3}], skipped",
                                what, x, left, right
                            );
                        }
                        keep
                    })
                    .map(|x| at(x))
                    .collect()
            };
            let rafter_points = crossings(&self.layout.rafter_xs, "Rafter crossing");
            let panel_points = crossings(&self.layout.panel_edges, "Panel edge");
            out.push(PurlinIntersections {
                copy,
                row: line.row,
                side: line.side,
                endpoints: [at(left), at(right)],
                rafter_points,
                panel_points,
            });
        }
    }

    fn rafters(
        &self,
        copy: CopyIndex,
        soffits: &[(ColumnSupport, f64)],
        out: &mut Vec<RafterIntersections>,
    ) {
        let (ox, oy) = self.layout.copy_offset(copy);
        for (index, &x) in self.layout.rafter_xs.iter().enumerate() {
            let purlin_points = self
                .layout
                .purlin_lines
                .iter()
                .map(|line| Point3::new(x + ox, line.y + oy, line.z))
                .collect();
            let column_points = soffits
                .iter()
                .map(|(support, top)| Point3::new(x + ox, support.y_position + oy, *top))
                .collect();
            out.push(RafterIntersections {
                copy,
                index,
                x: x + ox,
                purlin_points,
                column_points,
            });
        }
    }

    fn columns(
        &self,
        copy: CopyIndex,
        soffits: &[(ColumnSupport, f64)],
        out: &mut Vec<ColumnSegment>,
    ) {
        let (ox, oy) = self.layout.copy_offset(copy);
        for (rafter, &x) in self.layout.rafter_xs.iter().enumerate() {
            for (line, (support, top)) in soffits.iter().enumerate() {
                let y = support.y_position + oy;
                out.push(ColumnSegment {
                    copy,
                    rafter,
                    line,
                    base: Point3::new(x + ox, y, 0.0),
                    top: Point3::new(x + ox, y, *top),
                });
            }
        }
    }
}
