//! Barnes-Hut octree over the current body positions.
//!
//! The tree is rebuilt from scratch every layout step. Nodes live in a
//! [`NodePool`] and refer to each other and to bodies by index, so a rebuild
//! only rewinds the pool.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use rs_layout::models::{Body, Vector3};
//! use rs_layout::octree::Octree;
//!
//! let mut bodies = vec![
//!     Body::new(Vector3::new(0.0, 0.0, 0.0), 1.0).unwrap(),
//!     Body::new(Vector3::new(10.0, 0.0, 0.0), 1.0).unwrap(),
//! ];
//! let mut tree = Octree::new(1984);
//! assert!(tree.build(&mut bodies));
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let force = tree.force_on(0, &bodies, -1.0, 1.2, &mut rng);
//! // Negative gravity pushes body 0 away from body 1.
//! assert!(force.x < 0.0);
//! ```
use log::debug;
use rand::distr::Open01;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::forces::{pair_force, separation};
use crate::models::{Body, Vector3};
use crate::octree::{NodeId, NodePool, OctreeNode};
use crate::utils::{DEGENERATE_SIDE_PER_BODY, MAX_JITTER_RETRIES};

/// Spatial index answering "net force on body X" queries in O(log n).
#[derive(Debug)]
pub struct Octree {
    pool: NodePool,
    root: Option<NodeId>,
    rng: StdRng,
    complete: bool,
    /// Reused by `insert` so rebuilding the tree does not allocate.
    path: Vec<NodeId>,
}

impl Octree {
    /// Creates an empty tree whose coincident-body jitter is seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Octree {
            pool: NodePool::new(),
            root: None,
            rng: StdRng::seed_from_u64(seed),
            complete: true,
            path: Vec::new(),
        }
    }

    /// Rebuilds the tree over `bodies`.
    ///
    /// Bodies that share a position with a body already in the tree are
    /// nudged to a random point inside the node they collide in. If they still
    /// cannot be told apart after a few attempts, the build stops early and
    /// returns `false`; every body inserted so far stays valid, the rest are
    /// simply missing from this build.
    pub fn build(&mut self, bodies: &mut [Body]) -> bool {
        self.pool.reset(bodies.len() * 2);
        self.root = None;
        self.complete = true;

        if bodies.is_empty() {
            return true;
        }

        let root = self.create_root(bodies);
        self.pool[root].place(0, &bodies[0]);
        self.root = Some(root);

        for index in 1..bodies.len() {
            if !self.insert(index, bodies) {
                debug!(
                    "Octree build stopped at body {} of {}: coincident bodies could not be separated",
                    index,
                    bodies.len()
                );
                self.complete = false;
                break;
            }
        }

        self.complete
    }

    /// Net interaction force exerted on body `source` by every other body.
    ///
    /// Distant subtrees whose `width / distance` falls below `theta` are
    /// treated as a single mass at their centroid. With `theta == 0` the
    /// traversal reaches every leaf and the result is the exact pairwise sum.
    /// Zero distances are replaced by jitter drawn from `rng`.
    ///
    /// Allocates a traversal stack per call; use [`Octree::force_on_with`] to
    /// query many bodies with one stack.
    pub fn force_on<R: Rng + ?Sized>(
        &self,
        source: usize,
        bodies: &[Body],
        gravity: f64,
        theta: f64,
        rng: &mut R,
    ) -> Vector3 {
        let mut stack = Vec::new();
        self.force_on_with(source, bodies, gravity, theta, rng, &mut stack)
    }

    /// Same as [`Octree::force_on`], traversing with the caller's `stack`.
    ///
    /// The stack is cleared on entry and keeps its capacity, so repeated
    /// queries stop allocating once it has grown to the tree depth.
    pub fn force_on_with<R: Rng + ?Sized>(
        &self,
        source: usize,
        bodies: &[Body],
        gravity: f64,
        theta: f64,
        rng: &mut R,
        stack: &mut Vec<NodeId>,
    ) -> Vector3 {
        let mut total = Vector3::zero();
        stack.clear();
        let Some(root) = self.root else {
            return total;
        };

        let body = &bodies[source];
        stack.push(root);

        while let Some(id) = stack.pop() {
            let node = &self.pool[id];
            match node.body {
                Some(other) if other == source => {}
                Some(other) => {
                    let other = &bodies[other];
                    let (d, r) = separation(body.position, other.position, rng);
                    total += pair_force(gravity, body.mass, other.mass, d, r);
                }
                None => {
                    if node.mass <= 0.0 {
                        continue;
                    }
                    let (d, r) = separation(body.position, node.centroid(), rng);
                    // Every node is a cube, so the x extent is the node width.
                    if node.width() / r < theta {
                        total += pair_force(gravity, body.mass, node.mass, d, r);
                    } else {
                        stack.extend(node.children.iter().flatten().copied());
                    }
                }
            }
        }

        total
    }

    pub fn root(&self) -> Option<&OctreeNode> {
        self.root.map(|id| &self.pool[id])
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &OctreeNode {
        &self.pool[id]
    }

    /// Every node of the current build, in allocation order.
    pub fn nodes(&self) -> &[OctreeNode] {
        self.pool.as_slice()
    }

    /// False if the last build stopped before inserting every body.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Allocates the root cube enclosing every body.
    fn create_root(&mut self, bodies: &[Body]) -> NodeId {
        let first = bodies[0].position;
        let (min, max) = bodies.iter().fold((first, first), |(min, max), body| {
            (min.min(&body.position), max.max(&body.position))
        });

        let max_side = (max - min).max_element();
        let (start, end) = if max_side == 0.0 {
            let side = bodies.len() as f64 * DEGENERATE_SIDE_PER_BODY;
            (min - Vector3::splat(side), max + Vector3::splat(side))
        } else {
            // Squarify so a single width describes every axis. The max keeps the
            // far corner from rounding inside the outermost body.
            (min, (min + Vector3::splat(max_side)).max(&max))
        };

        let root = self.pool.get();
        self.pool[root].start = start;
        self.pool[root].end = end;
        root
    }

    /// Inserts body `index` below the root.
    ///
    /// On failure the tree is left exactly as it was before the call, apart
    /// from any jitter already applied to the colliding resident body.
    fn insert(&mut self, index: usize, bodies: &mut [Body]) -> bool {
        let Some(node) = self.root else {
            return false;
        };
        // Internal nodes that have already aggregated the incoming body.
        let mut path = std::mem::take(&mut self.path);
        path.clear();
        let inserted = self.descend(node, index, bodies, &mut path);
        self.path = path;
        inserted
    }

    fn descend(&mut self, mut node: NodeId, index: usize, bodies: &mut [Body], path: &mut Vec<NodeId>) -> bool {
        loop {
            if let Some(resident) = self.pool[node].body {
                if !self.separate(node, resident, index, bodies, path) {
                    let resident_body = &bodies[resident];
                    self.pool[node].place(resident, resident_body);
                    self.rollback(path, &bodies[index]);
                    return false;
                }

                // The leaf becomes internal; its resident moves into a fresh child.
                let target = &mut self.pool[node];
                target.body = None;
                target.mass = 0.0;
                target.mass_vector = Vector3::zero();
                self.route(node, resident, bodies);
                continue;
            }

            path.push(node);
            match self.route(node, index, bodies) {
                Some(child) => node = child,
                None => return true,
            }
        }
    }

    /// Makes sure the resident of leaf `node` can be split from the incoming body.
    ///
    /// Coincident residents are moved to a random point inside the leaf's cube,
    /// at most `MAX_JITTER_RETRIES` times.
    fn separate(
        &mut self,
        node: NodeId,
        resident: usize,
        incoming: usize,
        bodies: &mut [Body],
        path: &[NodeId],
    ) -> bool {
        let (start, end) = (self.pool[node].start, self.pool[node].end);
        if !self.pool[node].can_subdivide() {
            return false;
        }

        let target = bodies[incoming].position;
        let before = bodies[resident].position;
        let mut retries = MAX_JITTER_RETRIES;
        while retries > 0 && bodies[resident].position.same_as(&target) {
            bodies[resident].position = self.random_point(start, end);
            retries -= 1;
        }

        // Ancestors aggregated the resident at its old position.
        let shift = (bodies[resident].position - before) * bodies[resident].mass;
        if !shift.is_zero() {
            for &id in path {
                self.pool[id].mass_vector += shift;
            }
        }

        !bodies[resident].position.same_as(&target)
    }

    /// Aggregates body `index` into internal `node` and moves it one level down.
    ///
    /// Returns the occupied child to continue in, or `None` once the body has
    /// been placed in a new leaf.
    fn route(&mut self, node: NodeId, index: usize, bodies: &[Body]) -> Option<NodeId> {
        let body = &bodies[index];
        let parent = &mut self.pool[node];
        parent.aggregate(body);
        let (octant, start, end) = parent.octant(&body.position);

        if let Some(child) = parent.children[octant] {
            return Some(child);
        }

        let child = self.pool.get();
        let leaf = &mut self.pool[child];
        leaf.start = start;
        leaf.end = end;
        leaf.place(index, body);
        self.pool[node].children[octant] = Some(child);
        None
    }

    /// Removes a partially inserted body from the aggregates along `path`.
    fn rollback(&mut self, path: &[NodeId], body: &Body) {
        for &id in path {
            let node = &mut self.pool[id];
            node.mass -= body.mass;
            node.mass_vector -= body.position * body.mass;
        }
    }

    fn random_point(&mut self, start: Vector3, end: Vector3) -> Vector3 {
        let offset = Vector3::new(
            self.rng.sample(Open01),
            self.rng.sample(Open01),
            self.rng.sample(Open01),
        );
        start + (end - start) * offset
    }
}
