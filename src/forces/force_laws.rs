use rand::Rng;

use crate::models::Vector3;
use crate::utils::jitter_vector;

/// Displacement from `from` to `to` together with its length.
///
/// When the two points coincide the displacement is replaced by a small random
/// jitter, so the returned distance is always strictly positive.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use rs_layout::forces::separation;
/// use rs_layout::models::Vector3;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let (d, r) = separation(Vector3::zero(), Vector3::new(3.0, 4.0, 0.0), &mut rng);
/// assert_eq!(d, Vector3::new(3.0, 4.0, 0.0));
/// assert_eq!(r, 5.0);
///
/// let (_, r) = separation(Vector3::zero(), Vector3::zero(), &mut rng);
/// assert!(r > 0.0);
/// ```
pub fn separation<R: Rng + ?Sized>(from: Vector3, to: Vector3, rng: &mut R) -> (Vector3, f64) {
    let d = to - from;
    let r = d.length();
    if r == 0.0 {
        let d = jitter_vector(rng);
        return (d, d.length());
    }
    (d, r)
}

/// Inverse-square interaction between two masses separated by `d` (length `r`).
///
/// The magnitude is `gravity * m1 * m2 / r^2` along `d`; dividing by `r^3`
/// folds the normalization of `d` into the same operation. A negative
/// `gravity` pushes the source away from the other mass.
#[inline]
pub fn pair_force(gravity: f64, source_mass: f64, other_mass: f64, d: Vector3, r: f64) -> Vector3 {
    d * (gravity * other_mass * source_mass / (r * r * r))
}

/// Hooke spring along `d` (length `r`) acting on the spring's source end.
///
/// Positive when stretched past `spring_length`, pulling the source toward the
/// target. The target end receives the negation.
#[inline]
pub fn spring_force(spring_coeff: f64, spring_length: f64, d: Vector3, r: f64) -> Vector3 {
    d * (spring_coeff * (r - spring_length) / r)
}

/// Linear drag opposing `velocity`.
#[inline]
pub fn drag_force(drag_coeff: f64, velocity: Vector3) -> Vector3 {
    velocity * -drag_coeff
}
