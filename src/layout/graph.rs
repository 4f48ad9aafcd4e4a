use log::info;
use rand::Rng;

use crate::models::{Body, Vector3};
use crate::utils::LayoutError;

/// Bodies decoded from a signed edge list, before a layout is built over them.
///
/// The edge list is a flat sequence of integers: `-k` makes vertex `k - 1` the
/// current source, and every positive `m` adds an edge from the current source
/// to vertex `m - 1`. The vertex count is the largest absolute value seen.
///
/// # Examples
///
/// ```
/// use rs_layout::layout::Graph;
///
/// // 1 -> 2, 1 -> 3, 3 -> 2
/// let graph = Graph::from_links(&[-1, 2, 3, -3, 2]).expect("valid links");
/// assert_eq!(graph.body_count(), 3);
/// assert_eq!(graph.edge_count(), 3);
/// assert_eq!(graph.bodies()[0].outgoing, vec![1, 2]);
/// assert_eq!(graph.bodies()[1].incoming, 2);
/// ```
#[derive(Debug, Clone)]
pub struct Graph {
    bodies: Vec<Body>,
    edge_count: usize,
}

impl Graph {
    /// Decodes `links` and gives every body its degree-derived default mass.
    ///
    /// Edges listed before the first negative marker start at vertex 0.
    ///
    /// # Errors
    ///
    /// `EmptyEdgeList` if `links` is empty, `InvalidEdgeValue` for a `0` entry.
    pub fn from_links(links: &[i32]) -> Result<Self, LayoutError> {
        if links.is_empty() {
            return Err(LayoutError::EmptyEdgeList);
        }
        if let Some(index) = links.iter().position(|&value| value == 0) {
            return Err(LayoutError::InvalidEdgeValue(index));
        }

        let count = links.iter().map(|value| value.unsigned_abs() as usize).max().unwrap_or(0);
        let mut bodies = vec![Body::default(); count];
        let mut edge_count = 0;

        let mut from = 0;
        for &value in links {
            if value < 0 {
                from = value.unsigned_abs() as usize - 1;
            } else {
                let to = value as usize - 1;
                bodies[from].outgoing.push(to);
                bodies[to].incoming += 1;
                edge_count += 1;
            }
        }

        for body in bodies.iter_mut() {
            body.mass = body.degree_mass();
        }

        info!("Loaded graph with {} bodies and {} edges", count, edge_count);
        Ok(Graph { bodies, edge_count })
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn into_bodies(self) -> Vec<Body> {
        self.bodies
    }

    /// Replaces the default masses with one weight per body.
    ///
    /// # Errors
    ///
    /// `WeightCountMismatch` when the lengths differ, `InvalidMass` for a
    /// weight that is not positive. No mass is changed on error.
    pub fn apply_weights(&mut self, weights: &[i32]) -> Result<(), LayoutError> {
        if weights.len() != self.bodies.len() {
            return Err(LayoutError::WeightCountMismatch {
                expected: self.bodies.len(),
                found: weights.len(),
            });
        }
        if let Some(body) = weights.iter().position(|&w| w <= 0) {
            return Err(LayoutError::InvalidMass { body, mass: weights[body] as f64 });
        }

        for (body, &weight) in self.bodies.iter_mut().zip(weights) {
            body.mass = weight as f64;
        }
        Ok(())
    }

    /// Places every body from a flat `x, y, z` triplet array.
    ///
    /// # Errors
    ///
    /// `PositionCountMismatch` unless `positions` holds exactly three values per body.
    pub fn apply_positions(&mut self, positions: &[i32]) -> Result<(), LayoutError> {
        let expected = self.bodies.len() * 3;
        if positions.len() != expected {
            return Err(LayoutError::PositionCountMismatch { expected, found: positions.len() });
        }

        for (body, p) in self.bodies.iter_mut().zip(positions.chunks_exact(3)) {
            body.position = Vector3::new(p[0] as f64, p[1] as f64, p[2] as f64);
        }
        Ok(())
    }

    /// Scatters bodies that are still at the origin.
    ///
    /// A body at the origin is moved to a random point whose coordinates are
    /// uniform in `[0, ln(n) * 100)`. Its outgoing neighbours that are still at
    /// the origin are then dropped within half a spring length of it, so
    /// connected vertices start close together.
    pub fn init_positions<R: Rng + ?Sized>(&mut self, rng: &mut R, spring_length: f64) {
        let scale = (self.bodies.len() as f64).ln() * 100.0;

        for index in 0..self.bodies.len() {
            if self.bodies[index].position.is_zero() {
                self.bodies[index].position = Vector3::new(
                    rng.random::<f64>() * scale,
                    rng.random::<f64>() * scale,
                    rng.random::<f64>() * scale,
                );
            }

            let source = self.bodies[index].position;
            for k in 0..self.bodies[index].outgoing.len() {
                let target = self.bodies[index].outgoing[k];
                if !self.bodies[target].position.is_zero() {
                    continue;
                }
                let offset = Vector3::new(
                    rng.random::<f64>() * spring_length,
                    rng.random::<f64>() * spring_length,
                    rng.random::<f64>() * spring_length,
                ) - Vector3::splat(spring_length / 2.0);
                self.bodies[target].position = source + offset;
            }
        }
    }
}
