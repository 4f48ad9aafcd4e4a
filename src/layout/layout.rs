//! Force-directed layout engine.
//!
//! Every call to [`Layout::step`] runs one iteration of the pipeline:
//!
//! 1. rebuild the octree and accumulate repulsion plus drag on every body (in parallel),
//! 2. add the spring force of every edge to both of its ends,
//! 3. integrate velocities and positions (in parallel),
//! 4. report whether the total movement fell below the stability threshold.
//!
//! # Example
//!
//! ```
//! use rs_layout::layout::Layout;
//!
//! // A triangle: 1 -> 2, 2 -> 3, 3 -> 1
//! let mut layout = Layout::builder(&[-1, 2, -2, 3, -3, 1])
//!     .seed(7)
//!     .build()
//!     .expect("valid graph");
//!
//! for _ in 0..10 {
//!     if layout.step() {
//!         break;
//!     }
//! }
//! assert_eq!(layout.positions().len(), 3);
//! ```
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::forces::{drag_force, separation, spring_force};
use crate::layout::Graph;
use crate::models::{Body, Vector3};
use crate::octree::Octree;
use crate::utils::{sub_seed, LayoutConfig, LayoutError, LazyRng, DEFAULT_SEED};

/// Stream id reserved for the octree's jitter generator.
const TREE_STREAM: u64 = u64::MAX;
const TREE_SEED: u64 = 1984;

/// Collects the inputs of a layout and checks them before anything is built.
#[derive(Debug, Clone)]
pub struct LayoutBuilder<'a> {
    links: &'a [i32],
    positions: Option<&'a [i32]>,
    weights: Option<&'a [i32]>,
    config: LayoutConfig,
    seed: u64,
}

impl<'a> LayoutBuilder<'a> {
    /// Initial positions as `x, y, z` triplets, one per body.
    pub fn positions(mut self, positions: &'a [i32]) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Body masses, one per body, replacing the degree-derived defaults.
    pub fn weights(mut self, weights: &'a [i32]) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Decodes the graph, applies weights and positions, and creates the engine.
    ///
    /// Bodies without given positions are scattered with the engine's own
    /// generator, so two builds with the same inputs start identically.
    ///
    /// # Errors
    ///
    /// Any precondition violation of the configuration, links, weights or
    /// positions is returned before the engine exists.
    pub fn build(self) -> Result<Layout, LayoutError> {
        self.config.validate()?;

        let mut graph = Graph::from_links(self.links)?;
        if let Some(weights) = self.weights {
            graph.apply_weights(weights)?;
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        match self.positions {
            Some(positions) => graph.apply_positions(positions)?,
            None => graph.init_positions(&mut rng, self.config.spring_length),
        }

        Layout::with_rng(graph.into_bodies(), self.config, self.seed, rng)
    }
}

/// A 3D force-directed layout over a fixed set of bodies.
#[derive(Debug)]
pub struct Layout {
    bodies: Vec<Body>,
    tree: Octree,
    config: LayoutConfig,
    seed: u64,
    rng: StdRng,
    iteration: u64,
    last_movement: f64,
}

impl Layout {
    /// Starts a builder over a signed edge list with the default configuration and seed.
    pub fn builder(links: &[i32]) -> LayoutBuilder<'_> {
        LayoutBuilder {
            links,
            positions: None,
            weights: None,
            config: LayoutConfig::default(),
            seed: DEFAULT_SEED,
        }
    }

    /// Creates a layout over bodies that are already placed.
    ///
    /// # Errors
    ///
    /// `EmptyEdgeList` if there are no bodies, `InvalidMass` for a body whose
    /// mass is not positive and finite, `EdgeOutOfRange` for an edge naming a
    /// missing body, and `InvalidConfig` for an invalid configuration.
    pub fn from_bodies(bodies: Vec<Body>, config: LayoutConfig, seed: u64) -> Result<Self, LayoutError> {
        config.validate()?;
        Self::with_rng(bodies, config, seed, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bodies: Vec<Body>, config: LayoutConfig, seed: u64, rng: StdRng) -> Result<Self, LayoutError> {
        if bodies.is_empty() {
            return Err(LayoutError::EmptyEdgeList);
        }

        let count = bodies.len();
        for (index, body) in bodies.iter().enumerate() {
            if !(body.mass > 0.0 && body.mass.is_finite()) {
                return Err(LayoutError::InvalidMass { body: index, mass: body.mass });
            }
            if let Some(&target) = body.outgoing.iter().find(|&&target| target >= count) {
                return Err(LayoutError::EdgeOutOfRange { from: index, target, count });
            }
        }

        Ok(Layout {
            bodies,
            tree: Octree::new(sub_seed(seed, TREE_STREAM, TREE_SEED)),
            config,
            seed,
            rng,
            iteration: 0,
            last_movement: f64::INFINITY,
        })
    }

    /// Runs one iteration and returns `true` once the layout has converged.
    pub fn step(&mut self) -> bool {
        self.accumulate_forces();
        self.apply_springs();
        let movement = self.integrate();

        self.iteration += 1;
        self.last_movement = movement;
        debug!("Iteration {}: movement {:.6}", self.iteration, movement);

        movement < self.config.stable_threshold
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// A copy of every body position, in body order.
    pub fn positions(&self) -> Vec<Vector3> {
        self.bodies.iter().map(|body| body.position).collect()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of completed steps.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Movement metric of the last step, infinite before the first one.
    pub fn last_movement(&self) -> f64 {
        self.last_movement
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Resets every force to repulsion from all other bodies plus drag.
    fn accumulate_forces(&mut self) {
        self.tree.build(&mut self.bodies);

        let LayoutConfig { gravity, theta, drag_coeff, .. } = self.config;
        let (seed, iteration) = (self.seed, self.iteration);
        let tree = &self.tree;
        let bodies = &self.bodies;

        let forces: Vec<Vector3> = (0..bodies.len())
            .into_par_iter()
            .map_init(Vec::new, |stack, index| {
                let mut rng = LazyRng::new(sub_seed(seed, iteration, index as u64));
                tree.force_on_with(index, bodies, gravity, theta, &mut rng, stack)
            })
            .collect();

        self.bodies
            .par_iter_mut()
            .zip(forces.par_iter())
            .for_each(|(body, &force)| {
                body.reset_force();
                body.force += force + drag_force(drag_coeff, body.velocity);
            });
    }

    /// Adds the spring force of every edge, equal and opposite on its two ends.
    fn apply_springs(&mut self) {
        let LayoutConfig { spring_coeff, spring_length, .. } = self.config;

        for source in 0..self.bodies.len() {
            for k in 0..self.bodies[source].outgoing.len() {
                let target = self.bodies[source].outgoing[k];
                let (d, r) = separation(
                    self.bodies[source].position,
                    self.bodies[target].position,
                    &mut self.rng,
                );
                let force = spring_force(spring_coeff, spring_length, d, r);
                self.bodies[source].force += force;
                self.bodies[target].force -= force;
            }
        }
    }

    /// Moves every body and returns the movement metric of the step.
    fn integrate(&mut self) -> f64 {
        let time_step = self.config.time_step;
        let displacements: Vec<Vector3> = self
            .bodies
            .par_iter_mut()
            .map(|body| body.integrate(time_step))
            .collect();

        // Summed in body order so the metric does not depend on scheduling.
        let total = displacements
            .iter()
            .fold(Vector3::zero(), |acc, d| acc + d.abs());
        total.squared().sum() / self.bodies.len() as f64
    }
}
