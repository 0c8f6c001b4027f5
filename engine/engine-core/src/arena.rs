//! Arena node handles.
//!
//! Tree nodes in both search engines live in a contiguous `Vec` owned
//! by the tree and reference each other by index. `parent` links are
//! plain `NodeId`s, so there are no ownership cycles and backpropagation
//! is an index walk.

/// Index into a node arena. Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel for "no node" (empty child slot, root's parent).
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
