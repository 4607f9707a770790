//! Derived dimensions of one structure copy

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::params::ParameterSet;

/// Clearance between the top of a purlin and the underside of a panel
pub const PANEL_CLEARANCE: f64 = 0.02;

/// Quantities derived from the tilt angle and the panel grid.
///
/// All lengths are in the local frame of one copy: X across the width,
/// Y along the ground projection of the slope, Z up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub angle_rad: f64,
    /// Panel pitch across the width
    pub horiz_spacing: f64,
    /// Panel pitch along the slope
    pub vert_spacing: f64,
    pub total_width: f64,
    pub total_slope_length: f64,
    pub total_ground_length: f64,
    /// Ground distance between support columns along Y
    pub column_spacing_y: f64,
    /// Distance between support columns along X
    pub column_spacing_x: f64,
    /// Inset of the rafter ends from the slope ends, along the slope
    pub rafter_offset: f64,
    pub rafter_span: f64,
    pub rafter_mid_y: f64,
    pub rafter_mid_z: f64,
    /// Ground distance between the two purlins of a row
    pub purlin_spacing: f64,
    pub purlin_span: f64,
    pub purlin_center_x: f64,
    /// Height of a purlin centreline above the roof line
    pub purlin_lift: f64,
    /// Height of a panel centre above the roof line
    pub panel_stack_height: f64,
}

fn require_positive(quantity: &str, value: f64) -> LayoutResult<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(LayoutError::configuration(quantity, value, "must be positive"))
    }
}

impl Dimensions {
    /// Derive every spacing, span and height, rejecting any that collapses.
    pub fn derive(p: &ParameterSet) -> LayoutResult<Self> {
        p.validate()?;

        let angle_rad = p.angle_rad();
        let (cos, tan) = (angle_rad.cos(), angle_rad.tan());

        let horiz_spacing = p.panel_width + p.h_gap;
        let vert_spacing = p.panel_length + p.v_gap;
        let total_width = require_positive(
            "total_width",
            p.cols as f64 * horiz_spacing - p.h_gap - 2.0 * p.hor_panel_overhang,
        )?;
        let total_slope_length = require_positive(
            "total_slope_length",
            p.rows as f64 * vert_spacing - p.v_gap,
        )?;
        let total_ground_length = total_slope_length * cos;

        let column_span_y = require_positive(
            "column_span_y",
            total_ground_length - (p.front_offset + p.rear_offset) * cos,
        )?;
        let div_y = p.columns_y.saturating_sub(1).max(1) as f64;
        let div_x = p.columns_x.saturating_sub(1).max(1) as f64;
        let column_spacing_y = require_positive("column_spacing_y", column_span_y / div_y)?;
        let column_spacing_x = require_positive("column_spacing_x", total_width / div_x)?;

        let rafter_offset = p.purlin_offset - p.rafter_purlin_offset;
        let rafter_span = require_positive(
            "rafter_span",
            total_slope_length - 2.0 * rafter_offset,
        )?;
        let rafter_mid_y = total_ground_length / 2.0;
        let rafter_mid_z =
            p.column_min_height + total_ground_length * tan / 2.0 + p.rafter_length / 2.0;

        let purlin_spacing = require_positive(
            "purlin_spacing",
            (p.panel_length - 2.0 * p.purlin_offset) * cos,
        )?;
        let purlin_span = total_width + 2.0 * p.hor_purlin_overhang;
        let purlin_center_x = p.hor_panel_overhang + total_width / 2.0;

        let dims = Self {
            angle_rad,
            horiz_spacing,
            vert_spacing,
            total_width,
            total_slope_length,
            total_ground_length,
            column_spacing_y,
            column_spacing_x,
            rafter_offset,
            rafter_span,
            rafter_mid_y,
            rafter_mid_z,
            purlin_spacing,
            purlin_span,
            purlin_center_x,
            purlin_lift: p.rafter_length * 1.5,
            panel_stack_height: p.rafter_length
                + p.purlin_length
                + p.panel_thickness / 2.0
                + PANEL_CLEARANCE,
        };
        debug!(
            "Derived dimensions: width={:.3} slope={:.3} ground={:.3} rafter_span={:.3}",
            dims.total_width, dims.total_slope_length, dims.total_ground_length, dims.rafter_span
        );
        dims.check_copy_gaps(p)?;
        Ok(dims)
    }

    /// Ground footprint of one copy as `(min_x, max_x, min_y, max_y)`, local frame.
    ///
    /// Covers panels, purlins, and the blocks and columns at the ground.
    pub fn footprint(&self, p: &ParameterSet) -> (f64, f64, f64, f64) {
        let base_x = p.block_width.max(p.column_width) / 2.0;
        let base_y = p.block_length.max(p.column_length) / 2.0;
        let purlin_left = self.purlin_center_x - self.purlin_span / 2.0;
        let purlin_right = self.purlin_center_x + self.purlin_span / 2.0;
        let panel_right = p.cols as f64 * self.horiz_spacing - p.h_gap;
        let last_x = p.columns_x - 1;
        let last_y = p.columns_y - 1;

        let min_x = purlin_left.min(0.0).min(self.column_x(p, 0) - base_x);
        let max_x = purlin_right
            .max(panel_right)
            .max(self.column_x(p, last_x) + base_x);
        let min_y = (self.column_y(p, 0) - base_y).min(0.0);
        let max_y = (self.column_y(p, last_y) + base_y).max(self.total_ground_length);
        (min_x, max_x, min_y, max_y)
    }

    /// Array copies must not overlap: each gap has to clear the footprint along its axis.
    fn check_copy_gaps(&self, p: &ParameterSet) -> LayoutResult<()> {
        let (min_x, max_x, min_y, max_y) = self.footprint(p);
        if p.copies_in_x > 1 && !(p.x_gap > max_x - min_x) {
            return Err(LayoutError::configuration(
                "x_gap",
                p.x_gap,
                &format!("copies overlap, gap must exceed the footprint width {:.3}", max_x - min_x),
            ));
        }
        if p.copies_in_y > 1 && !(p.y_gap > max_y - min_y) {
            return Err(LayoutError::configuration(
                "y_gap",
                p.y_gap,
                &format!("copies overlap, gap must exceed the footprint depth {:.3}", max_y - min_y),
            ));
        }
        Ok(())
    }

    /// Height of the roof line above ground at ground position `y`
    pub fn roof_height(&self, p: &ParameterSet, y: f64) -> f64 {
        p.column_min_height + y * self.angle_rad.tan()
    }

    /// X of the rafter (and FE column line) with index `x_i`
    pub fn rafter_x(&self, p: &ParameterSet, x_i: usize) -> f64 {
        if p.columns_x > 1 {
            p.hor_panel_overhang + x_i as f64 * self.column_spacing_x
        } else {
            self.total_width / 2.0
        }
    }

    /// X of the rendered support column with index `x_i`; it sits beside the rafter web
    pub fn column_x(&self, p: &ParameterSet, x_i: usize) -> f64 {
        if p.columns_x > 1 {
            self.rafter_x(p, x_i) - p.rafter_width
        } else {
            self.total_width / 2.0
        }
    }

    /// Ground Y of the support column line with index `y_i`
    pub fn column_y(&self, p: &ParameterSet, y_i: usize) -> f64 {
        let front = p.front_offset * self.angle_rad.cos();
        if p.columns_y > 1 {
            front + y_i as f64 * self.column_spacing_y
        } else {
            front + self.column_spacing_y / 2.0
        }
    }
}
