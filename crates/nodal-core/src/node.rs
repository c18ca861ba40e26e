//! Node representation for circuit graphs.

use std::fmt;

/// Handle to a node registered with a [`CircuitBuilder`](crate::CircuitBuilder).
///
/// Handles are issued in registration order and are only meaningful for the
/// builder (and finalized circuit) that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Create a NodeId from a raw value.
    pub fn new(id: u32) -> Self {
        NodeId(id)
    }

    /// Get the raw node ID value.
    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A node in the circuit graph.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    /// User-facing label (from the circuit description).
    label: String,
    /// Whether this node is the reference node, fixed at 0 V.
    is_ground: bool,
}

impl Node {
    pub(crate) fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            is_ground: false,
        }
    }

    pub(crate) fn set_ground(&mut self) {
        self.is_ground = true;
    }

    /// Get the node's handle.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the node's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Check if this is the reference (ground) node.
    pub fn is_ground(&self) -> bool {
        self.is_ground
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(42);
        assert_eq!(id.as_u32(), 42);
        assert_eq!(id.to_string(), "n42");
    }

    #[test]
    fn test_node_label() {
        let node = Node::new(NodeId::new(1), "vdd");
        assert_eq!(node.id().as_u32(), 1);
        assert_eq!(node.label(), "vdd");
        assert!(!node.is_ground());
    }

    #[test]
    fn test_set_ground() {
        let mut node = Node::new(NodeId::new(0), "0");
        node.set_ground();
        assert!(node.is_ground());
    }
}
