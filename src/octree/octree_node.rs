use crate::models::{Body, Vector3};

/// Index of a node inside a [`NodePool`](crate::octree::NodePool).
pub type NodeId = usize;

/// A cube-shaped region of the Barnes-Hut octree.
///
/// A node is either a leaf holding exactly one body, or an internal node with
/// `body == None` whose `mass` and `mass_vector` aggregate every body below it.
/// Children are indices into the pool that owns the node, never pointers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OctreeNode {
    /// Lower corner of the cube.
    pub start: Vector3,
    /// Upper corner of the cube.
    pub end: Vector3,
    /// Octant children; bit 0 of the slot index is x, bit 1 is y, bit 2 is z.
    pub children: [Option<NodeId>; 8],
    pub body: Option<usize>,
    pub mass: f64,
    /// Mass-weighted sum of the positions of every body below this node.
    pub mass_vector: Vector3,
}

impl OctreeNode {
    pub fn reset(&mut self) {
        *self = OctreeNode::default();
    }

    pub fn is_leaf(&self) -> bool {
        self.body.is_some()
    }

    /// Side length of the cube. All three axes share it.
    pub fn width(&self) -> f64 {
        self.end.x - self.start.x
    }

    pub fn center(&self) -> Vector3 {
        (self.start + self.end) / 2.0
    }

    /// Center of mass of everything below this node.
    pub fn centroid(&self) -> Vector3 {
        self.mass_vector / self.mass
    }

    pub fn child_count(&self) -> usize {
        self.children.iter().flatten().count()
    }

    pub fn contains(&self, point: &Vector3) -> bool {
        (0..3).all(|axis| self.start[axis] <= point[axis] && point[axis] <= self.end[axis])
    }

    /// True while halving the cube still produces a strictly smaller cube on every axis.
    pub fn can_subdivide(&self) -> bool {
        let mid = self.center();
        (0..3).all(|axis| self.start[axis] < mid[axis] && mid[axis] < self.end[axis])
    }

    /// Turns this node into a leaf holding `body`.
    pub(crate) fn place(&mut self, index: usize, body: &Body) {
        self.body = Some(index);
        self.mass = body.mass;
        self.mass_vector = body.position * body.mass;
    }

    /// Adds `body` to this node's aggregate mass and center-of-mass sum.
    pub(crate) fn aggregate(&mut self, body: &Body) {
        self.mass += body.mass;
        self.mass_vector += body.position * body.mass;
    }

    /// Octant slot for `point` and the bounds of that octant's sub-cube.
    ///
    /// A bit is set when the point lies strictly past the midpoint on that axis,
    /// so points exactly on the midpoint fall into the lower half.
    pub fn octant(&self, point: &Vector3) -> (usize, Vector3, Vector3) {
        let mid = self.center();
        let mut index = 0;
        let mut start = self.start;
        let mut end = mid;

        if point.x > mid.x {
            index |= 1;
            start.x = mid.x;
            end.x = self.end.x;
        }
        if point.y > mid.y {
            index |= 2;
            start.y = mid.y;
            end.y = self.end.y;
        }
        if point.z > mid.z {
            index |= 4;
            start.z = mid.z;
            end.z = self.end.z;
        }

        (index, start, end)
    }
}
