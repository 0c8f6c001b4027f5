//! MCTS tree node representation.
//!
//! Each node represents the game state reached by taking one action
//! from its parent. Children live in a fixed slot array indexed by
//! action id; `NodeId::NONE` marks an unexpanded slot.

use engine_core::NodeId;

/// A node in the action tree.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Action id that led to this node from the parent
    pub action: u8,

    /// Distance from the root (root = 0)
    pub depth: u32,

    /// Number of backpropagation passes through this node
    pub visit_count: u32,

    /// Sum of values backpropagated through this node
    pub value_sum: f32,

    /// `[min, max]` of every result ever backed up through this node,
    /// used to normalize child values during selection
    pub bounds: [f32; 2],

    /// Child slot array indexed by action id; NONE = unexpanded
    pub children: Vec<NodeId>,
}

impl MctsNode {
    /// Create a new root node with `num_actions` empty child slots.
    pub fn new_root(num_actions: usize) -> Self {
        Self {
            parent: NodeId::NONE,
            action: 0,
            depth: 0,
            visit_count: 0,
            value_sum: 0.0,
            bounds: [f32::INFINITY, f32::NEG_INFINITY],
            children: vec![NodeId::NONE; num_actions],
        }
    }

    /// Create a new child node one level below `parent_depth`.
    pub fn new_child(parent: NodeId, action: u8, parent_depth: u32, num_actions: usize) -> Self {
        Self {
            parent,
            action,
            depth: parent_depth + 1,
            visit_count: 0,
            value_sum: 0.0,
            bounds: [f32::INFINITY, f32::NEG_INFINITY],
            children: vec![NodeId::NONE; num_actions],
        }
    }

    /// Mean value with an additive guard on the visit count.
    #[inline]
    pub fn mean_value(&self, epsilon: f32) -> f32 {
        self.value_sum / (self.visit_count as f32 + epsilon)
    }

    /// Record one backed-up result: bump visits, accumulate the sum,
    /// widen the observed bounds.
    pub fn record(&mut self, result: f32) {
        self.visit_count += 1;
        self.value_sum += result;
        if result < self.bounds[0] {
            self.bounds[0] = result;
        }
        if result > self.bounds[1] {
            self.bounds[1] = result;
        }
    }

    /// Whether every child slot is occupied.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.children.iter().all(|id| id.is_some())
    }

    /// Action ids of the empty child slots.
    pub fn empty_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter(|(_, id)| id.is_none())
            .map(|(i, _)| i)
    }

    /// Occupied `(action, child)` pairs.
    pub fn expanded_children(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter(|(_, id)| id.is_some())
            .map(|(i, id)| (i, *id))
    }
}
