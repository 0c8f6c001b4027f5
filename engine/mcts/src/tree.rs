//! MCTS tree structure with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId
//! indices, so parent back-references are plain indices and
//! backpropagation is an index walk with no ownership cycles.

use engine_core::NodeId;

use crate::node::MctsNode;

/// Action tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree {
    /// Arena storing all nodes
    nodes: Vec<MctsNode>,

    /// Root node index (always 0 after initialization)
    root: NodeId,

    /// Child slots per node (one per action)
    num_actions: usize,
}

impl MctsTree {
    /// Create a new tree holding only a root with `num_actions` slots.
    pub fn new(num_actions: usize) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(num_actions)],
            root: NodeId(0),
            num_actions,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.index()]
    }

    /// Total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attach a new child in the parent's slot for `action`.
    /// The slot must be empty.
    pub fn add_child(&mut self, parent_id: NodeId, action: u8) -> NodeId {
        debug_assert!(
            self.get(parent_id).children[action as usize].is_none(),
            "child slot already occupied"
        );

        let parent_depth = self.get(parent_id).depth;
        let child = MctsNode::new_child(parent_id, action, parent_depth, self.num_actions);

        let child_id = NodeId(self.nodes.len() as u32);
        self.nodes.push(child);
        self.get_mut(parent_id).children[action as usize] = child_id;

        child_id
    }

    /// Backpropagate a rollout result from a leaf to the root:
    /// every node on the path gets a visit, the result added to its
    /// sum, and its bounds widened.
    pub fn backpropagate(&mut self, leaf_id: NodeId, result: f32) {
        let mut current = leaf_id;
        while current.is_some() {
            let node = self.get_mut(current);
            node.record(result);
            current = node.parent;
        }
    }

    /// Statistics about the tree for logging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            max_depth: self.nodes.iter().map(|n| n.depth).max().unwrap_or(0),
        }
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub max_depth: u32,
}
