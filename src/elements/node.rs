//! Node element - a named point of the structural graph

use serde::{Deserialize, Serialize};

use crate::geometry::{NodeKey, Point3};

/// A named node in the structural model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Node {
    /// Create a new node at the given coordinates
    pub fn new(name: &str, x: f64, y: f64, z: f64) -> Self {
        Self {
            name: name.to_string(),
            x,
            y,
            z,
        }
    }

    /// Node for a rounded-coordinate key, placed at the rounded coordinates
    pub fn from_key(key: &NodeKey) -> Self {
        let p = key.point();
        Self::new(&key.to_string(), p.x, p.y, p.z)
    }

    pub fn point(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        self.point().distance_to(&other.point())
    }
}
