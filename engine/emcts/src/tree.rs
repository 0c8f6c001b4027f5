//! Sequence tree with arena allocation.

use engine_core::NodeId;

use crate::genome::Genome;
use crate::node::EvoNode;

/// Sequence tree with arena-based node storage.
#[derive(Debug)]
pub struct EvoTree {
    nodes: Vec<EvoNode>,
    root: NodeId,
}

impl EvoTree {
    /// Create a tree holding only a root carrying `genome`.
    pub fn new(genome: Genome) -> Self {
        Self {
            nodes: vec![EvoNode::new_root(genome)],
            root: NodeId(0),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &EvoNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut EvoNode {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a new child carrying `genome` to `parent_id`.
    pub fn add_child(&mut self, parent_id: NodeId, genome: Genome) -> NodeId {
        let parent_depth = self.get(parent_id).depth;
        let child = EvoNode::new_child(parent_id, parent_depth, genome);

        let child_id = NodeId(self.nodes.len() as u32);
        self.nodes.push(child);
        self.get_mut(parent_id).children.push(child_id);

        child_id
    }

    /// Backpropagate from `node_id` to the root. Each inner node's
    /// statistics become the sums of its children's, with the total
    /// then renormalized to a running mean.
    pub fn backup(&mut self, node_id: NodeId) {
        let mut current = node_id;

        while current.is_some() {
            let children = self.get(current).children.clone();
            if !children.is_empty() {
                let mut total = 0.0f32;
                let mut visits = 0u32;
                for child_id in &children {
                    let child = self.get(*child_id);
                    total += child.total_value;
                    visits += child.visit_count;
                }

                let node = self.get_mut(current);
                node.visit_count = visits;
                node.total_value = if visits > 0 {
                    total / visits as f32
                } else {
                    0.0
                };
            }
            current = self.get(current).parent;
        }
    }

    /// The child of `node_id` with the greatest mean value, or `None`
    /// when the node has no children.
    pub fn best_child(&self, node_id: NodeId, epsilon: f32) -> Option<NodeId> {
        self.get(node_id)
            .children
            .iter()
            .copied()
            .max_by(|a, b| {
                let va = self.get(*a).mean_value(epsilon);
                let vb = self.get(*b).mean_value(epsilon);
                va.partial_cmp(&vb).unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}
