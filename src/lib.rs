//! 3D force-directed graph layout built on a Barnes-Hut octree.
//!
//! Vertices are simulated as bodies that repel each other, edges as springs
//! pulling their ends toward a rest length, and drag slows everything down
//! until the total movement of a step falls below a threshold.
pub mod utils;
pub mod models;
pub mod forces;
pub mod octree;
pub mod layout;
pub mod io;

/// ### General helper function
/// - Asserts that two floating point numbers are approximately equal.
///
/// ### Arguments
///
/// * `a` - The first floating point number.
/// * `b` - The second floating point number.
/// * `epsilon` - The maximum difference between `a` and `b` for them to be considered equal.
/// * `optional_message` - An optional message to display if the assertion fails.
///
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64, optional_message: Option<&str>) {
    match optional_message {
        Some(message) => assert!((a - b).abs() < epsilon, "a: {:?},\nb: {:?},\nepsilon: {:?},\n message: {:?}", a, b, epsilon, message),
        None => assert!((a - b).abs() < epsilon, "Expected {} to be approximately equal to {} (epsilon: {})", a, b, epsilon),
    }
}
