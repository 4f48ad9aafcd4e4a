use crate::models::Vector3;
use crate::utils::{LayoutError, MAX_SPEED};

/// Per-vertex simulation state.
///
/// `outgoing` holds the target index of every edge leaving this vertex. Edge
/// direction only matters for initialization; the spring force is symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vector3,
    pub velocity: Vector3,
    /// Rebuilt from scratch every step.
    pub force: Vector3,
    pub mass: f64,
    pub outgoing: Vec<usize>,
    /// Number of edges pointing at this vertex.
    pub incoming: usize,
}

impl Default for Body {
    fn default() -> Self {
        Body {
            position: Vector3::zero(),
            velocity: Vector3::zero(),
            force: Vector3::zero(),
            mass: 1.0,
            outgoing: Vec::new(),
            incoming: 0,
        }
    }
}

impl Body {
    /// Creates a resting body at `position`.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidMass` if `mass` is not a positive finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_layout::models::{Body, Vector3};
    ///
    /// let body = Body::new(Vector3::new(1.0, 2.0, 3.0), 2.0).expect("valid body");
    /// assert_eq!(body.mass, 2.0);
    /// assert!(body.velocity.is_zero());
    /// assert!(Body::new(Vector3::zero(), 0.0).is_err());
    /// ```
    pub fn new(position: Vector3, mass: f64) -> Result<Self, LayoutError> {
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(LayoutError::InvalidMass { body: 0, mass });
        }
        Ok(Body { position, mass, ..Body::default() })
    }

    /// Mass derived from the vertex degree: `1 + (outgoing + incoming) / 3`.
    ///
    /// Always at least 1, so isolated vertices keep a positive mass.
    pub fn degree_mass(&self) -> f64 {
        1.0 + (self.outgoing.len() + self.incoming) as f64 / 3.0
    }

    pub fn reset_force(&mut self) {
        self.force = Vector3::zero();
    }

    /// Advances the body one semi-implicit Euler step and returns its displacement.
    ///
    /// The velocity is updated from the accumulated force first, clamped to unit
    /// speed, and the clamped velocity is then used to move the body.
    pub fn integrate(&mut self, time_step: f64) -> Vector3 {
        self.velocity += self.force * (time_step / self.mass);

        let speed = self.velocity.length();
        if speed > MAX_SPEED {
            self.velocity *= MAX_SPEED / speed;
        }

        let displacement = self.velocity * time_step;
        self.position += displacement;
        displacement
    }
}
