//! Deduplicating node table keyed by rounded coordinates

use std::collections::HashMap;

use crate::elements::Node;
use crate::geometry::{NodeKey, Point3};

/// Insert-or-get table of structural nodes.
///
/// Nodes keep their first-registration order so repeated builds from the
/// same points produce identical node lists.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    nodes: Vec<Node>,
    index: HashMap<NodeKey, usize>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node for `point`, creating it if no node shares its key.
    pub fn insert_or_get(&mut self, point: &Point3) -> &Node {
        let key = point.key();
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                self.nodes.push(Node::from_key(&key));
                let idx = self.nodes.len() - 1;
                self.index.insert(key, idx);
                idx
            }
        };
        &self.nodes[idx]
    }

    pub fn get(&self, key: &NodeKey) -> Option<&Node> {
        self.index.get(key).map(|&idx| &self.nodes[idx])
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}
