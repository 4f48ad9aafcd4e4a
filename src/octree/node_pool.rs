use std::ops::{Index, IndexMut};

use crate::octree::{NodeId, OctreeNode};

/// Arena of octree nodes reused across tree builds.
///
/// Nodes are handed out in order from a growable backing store. `reset`
/// rewinds the cursor without freeing anything, so after the first few builds
/// a new tree costs no heap allocation at all.
///
/// # Examples
///
/// ```
/// use rs_layout::octree::NodePool;
///
/// let mut pool = NodePool::new();
/// pool.reset(4);
/// let a = pool.get();
/// let b = pool.get();
/// assert_eq!((a, b), (0, 1));
/// assert_eq!(pool.len(), 2);
///
/// pool.reset(4);
/// assert_eq!(pool.len(), 0);
/// assert_eq!(pool.get(), 0);
/// ```
#[derive(Debug, Default)]
pub struct NodePool {
    nodes: Vec<OctreeNode>,
    in_use: usize,
}

impl NodePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties the pool, growing the backing store to at least `capacity` nodes.
    pub fn reset(&mut self, capacity: usize) {
        if self.nodes.len() < capacity {
            self.nodes.resize_with(capacity, OctreeNode::default);
        }
        self.in_use = 0;
    }

    /// Hands out the next node, cleared, allocating only when the store is exhausted.
    pub fn get(&mut self) -> NodeId {
        let id = self.in_use;
        if id == self.nodes.len() {
            self.nodes.push(OctreeNode::default());
        } else {
            self.nodes[id].reset();
        }
        self.in_use += 1;
        id
    }

    /// Number of nodes handed out since the last reset.
    pub fn len(&self) -> usize {
        self.in_use
    }

    pub fn is_empty(&self) -> bool {
        self.in_use == 0
    }

    /// Number of node records held by the backing store.
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// The nodes of the current build.
    pub fn as_slice(&self) -> &[OctreeNode] {
        &self.nodes[..self.in_use]
    }
}

impl Index<NodeId> for NodePool {
    type Output = OctreeNode;

    fn index(&self, id: NodeId) -> &OctreeNode {
        &self.as_slice()[id]
    }
}

impl IndexMut<NodeId> for NodePool {
    fn index_mut(&mut self, id: NodeId) -> &mut OctreeNode {
        &mut self.nodes[..self.in_use][id]
    }
}
