//! Points, node identity and rotation instructions

use std::fmt;

use nalgebra::{Unit, Vector3};
use serde::{Deserialize, Serialize};

/// Decimal places kept when deciding whether two points are the same structural node
pub const NODE_PRECISION: i32 = 3;

/// A point in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Point shifted by the given offsets
    pub fn offset(&self, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Calculate distance to another point
    pub fn distance_to(&self, other: &Point3) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Rounded-coordinate identity of this point
    pub fn key(&self) -> NodeKey {
        NodeKey::from_point(self)
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(c: [f64; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// Identity of a structural node: coordinates in integer thousandths.
///
/// Independently derived formulas for the same physical intersection can
/// differ in the last bits, so node identity never uses exact float equality.
/// Displays as `N_{x}_{y}_{z}` with three decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey([i64; 3]);

impl NodeKey {
    pub fn from_point(p: &Point3) -> Self {
        Self([quantize(p.x), quantize(p.y), quantize(p.z)])
    }

    /// Rounded coordinates in integer thousandths
    pub fn millis(&self) -> [i64; 3] {
        self.0
    }

    /// The rounded point this key stands for
    pub fn point(&self) -> Point3 {
        let scale = 10f64.powi(NODE_PRECISION);
        Point3::new(
            self.0[0] as f64 / scale,
            self.0[1] as f64 / scale,
            self.0[2] as f64 / scale,
        )
    }
}

fn quantize(v: f64) -> i64 {
    (v * 10f64.powi(NODE_PRECISION)).round() as i64
}

fn write_millis(f: &mut fmt::Formatter<'_>, v: i64) -> fmt::Result {
    let sign = if v < 0 { "-" } else { "" };
    let abs = v.unsigned_abs();
    write!(f, "{}{}.{:03}", sign, abs / 1000, abs % 1000)
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("N")?;
        for v in self.0 {
            f.write_str("_")?;
            write_millis(f, v)?;
        }
        Ok(())
    }
}

/// Principal axis of the local frame of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(&self) -> Unit<Vector3<f64>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }
}

/// A single rotation about one of the component's own axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub axis: Axis,
    pub degrees: f64,
}

impl Rotation {
    pub fn new(axis: Axis, degrees: f64) -> Self {
        Self { axis, degrees }
    }
}
