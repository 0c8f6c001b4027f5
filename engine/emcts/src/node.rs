//! Sequence-tree node representation.
//!
//! Unlike the action tree, a node's payload is a whole genome and its
//! children are a growable collection bounded by the branching cap, not
//! a pre-allocated slot array.

use engine_core::NodeId;

use crate::genome::Genome;

/// A node in the sequence tree.
#[derive(Debug, Clone)]
pub struct EvoNode {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Distance from the root (root = 0)
    pub depth: u32,

    /// Evaluation passes for leaves; sum of children's for inner nodes
    pub visit_count: u32,

    /// Accumulated replay value for leaves; renormalized to a running
    /// mean for inner nodes after each backup
    pub total_value: f32,

    /// This node's candidate plan
    pub genome: Genome,

    /// Live children, appended up to the branching cap
    pub children: Vec<NodeId>,
}

impl EvoNode {
    pub fn new_root(genome: Genome) -> Self {
        Self {
            parent: NodeId::NONE,
            depth: 0,
            visit_count: 0,
            total_value: 0.0,
            genome,
            children: Vec::new(),
        }
    }

    pub fn new_child(parent: NodeId, parent_depth: u32, genome: Genome) -> Self {
        Self {
            parent,
            depth: parent_depth + 1,
            visit_count: 0,
            total_value: 0.0,
            genome,
            children: Vec::new(),
        }
    }

    /// Mean value with an additive guard on the visit count. Leaves
    /// store raw accumulated sums, so they divide; inner nodes already
    /// hold a running mean after backup and return it as-is.
    #[inline]
    pub fn mean_value(&self, epsilon: f32) -> f32 {
        if self.children.is_empty() {
            self.total_value / (self.visit_count as f32 + epsilon)
        } else {
            self.total_value
        }
    }

    /// Whether the node has reached the branching cap.
    #[inline]
    pub fn is_fully_expanded(&self, branch_factor: usize) -> bool {
        self.children.len() >= branch_factor
    }
}
