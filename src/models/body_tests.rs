use approx::assert_relative_eq;

use crate::models::{Body, Vector3};
use crate::utils::LayoutError;

#[test]
fn test_new_body_rejects_non_positive_mass() {
    assert!(Body::new(Vector3::zero(), 1.0).is_ok());
    for mass in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        match Body::new(Vector3::zero(), mass) {
            Err(LayoutError::InvalidMass { .. }) => {}
            other => panic!("Expected InvalidMass for {}, got {:?}", mass, other),
        }
    }
}

#[test]
fn test_degree_mass() {
    let mut body = Body::default();
    assert_eq!(body.degree_mass(), 1.0);

    body.outgoing = vec![1, 2];
    body.incoming = 4;
    assert_relative_eq!(body.degree_mass(), 3.0);
}

#[test]
fn test_integrate_below_speed_cap() {
    let mut body = Body::new(Vector3::zero(), 2.0).expect("valid body");
    body.force = Vector3::new(0.1, 0.0, 0.0);

    let displacement = body.integrate(1.0);

    // v = (1 / 2) * 0.1 = 0.05, well under the cap.
    assert_relative_eq!(body.velocity.x, 0.05);
    assert_relative_eq!(displacement.x, 0.05);
    assert_relative_eq!(body.position.x, 0.05);
    assert_eq!(body.position.y, 0.0);
}

#[test]
fn test_integrate_clamps_to_unit_speed() {
    let mut body = Body::new(Vector3::new(1.0, 1.0, 1.0), 1.0).expect("valid body");
    body.force = Vector3::new(3.0, 4.0, 0.0);

    let displacement = body.integrate(2.0);

    assert_relative_eq!(body.velocity.length(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(body.velocity.x, 0.6, epsilon = 1e-12);
    assert_relative_eq!(body.velocity.y, 0.8, epsilon = 1e-12);
    assert_relative_eq!(displacement.length(), 2.0, epsilon = 1e-12);
    assert_relative_eq!(body.position.x, 2.2, epsilon = 1e-12);
    assert_relative_eq!(body.position.y, 2.6, epsilon = 1e-12);
}

#[test]
fn test_reset_force() {
    let mut body = Body::default();
    body.force = Vector3::splat(3.0);
    body.reset_force();
    assert!(body.force.is_zero());
}
