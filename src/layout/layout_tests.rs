use approx::assert_relative_eq;

use crate::layout::Layout;
use crate::models::{Body, Vector3};
use crate::utils::{LayoutConfig, LayoutError, DEFAULT_SEED};

fn no_gravity() -> LayoutConfig {
    LayoutConfig { gravity: 0.0, ..LayoutConfig::default() }
}

#[test]
fn test_two_body_spring_step() {
    let mut layout = Layout::builder(&[-1, 2])
        .positions(&[0, 0, 0, 100, 0, 0])
        .weights(&[1, 1])
        .config(no_gravity())
        .build()
        .expect("valid layout");

    assert!(!layout.step());

    let bodies = layout.bodies();
    // k * (r - L) = 0.0008 * (100 - 30)
    assert_relative_eq!(bodies[0].force.x, 0.056, epsilon = 1e-12);
    assert_relative_eq!(bodies[1].force.x, -0.056, epsilon = 1e-12);
    assert_eq!(bodies[0].force.y, 0.0);
    assert_eq!(bodies[0].force.z, 0.0);

    // 0.056 * 20 exceeds the speed cap, so both bodies move at unit speed.
    assert_relative_eq!(bodies[0].velocity.x, 1.0, epsilon = 1e-12);
    assert_relative_eq!(bodies[1].velocity.x, -1.0, epsilon = 1e-12);
    assert_relative_eq!(bodies[0].position.x, 20.0, epsilon = 1e-9);
    assert_relative_eq!(bodies[1].position.x, 80.0, epsilon = 1e-9);

    // Total |displacement| is 40 along x: 40^2 / 2.
    assert_relative_eq!(layout.last_movement(), 800.0, epsilon = 1e-6);
    assert_eq!(layout.iteration(), 1);
}

#[test]
fn test_two_body_spring_step_below_speed_cap() {
    let config = LayoutConfig { spring_coeff: 0.0001, ..no_gravity() };
    let mut layout = Layout::builder(&[-1, 2])
        .positions(&[0, 0, 0, 100, 0, 0])
        .weights(&[1, 1])
        .config(config)
        .build()
        .expect("valid layout");

    layout.step();

    // f = 0.0001 * 70 = 0.007, v = 0.007 * 20 = 0.14, disp = 0.14 * 20 = 2.8
    let bodies = layout.bodies();
    assert_relative_eq!(bodies[0].velocity.x, 0.14, epsilon = 1e-12);
    assert_relative_eq!(bodies[0].position.x, 2.8, epsilon = 1e-9);
    assert_relative_eq!(bodies[1].position.x, 97.2, epsilon = 1e-9);
}

#[test]
fn test_spring_forces_are_symmetric() {
    // 1 -> 2, 1 -> 3, 2 -> 4, 3 -> 4, 4 -> 5
    let mut layout = Layout::builder(&[-1, 2, 3, -2, 4, -3, 4, -4, 5])
        .config(no_gravity())
        .seed(3)
        .build()
        .expect("valid layout");
    layout.step();

    // With no repulsion and resting bodies, only springs act, and they cancel in sum.
    let total = layout
        .bodies()
        .iter()
        .fold(Vector3::zero(), |acc, b| acc + b.force);
    assert!(total.length() < 1e-12, "Net spring force should vanish, got {:?}", total);
}

#[test]
fn test_single_edge_pushes_both_ends_equally_and_oppositely() {
    let positions = [0, 0, 0, 40, -20, 10];
    let step_forces = |links: &[i32]| {
        let mut layout = Layout::builder(links)
            .positions(&positions)
            .weights(&[1, 1])
            .config(no_gravity())
            .build()
            .expect("valid layout");
        layout.step();
        (layout.bodies()[0].force, layout.bodies()[1].force)
    };

    let (first, second) = step_forces(&[-1, 2]);
    assert_eq!(first, -second);

    let d = Vector3::new(40.0, -20.0, 10.0);
    let r = d.length();
    let expected = d * (0.0008 * (r - 30.0) / r);
    assert_relative_eq!(first.x, expected.x, epsilon = 1e-15);
    assert_relative_eq!(first.y, expected.y, epsilon = 1e-15);
    assert_relative_eq!(first.z, expected.z, epsilon = 1e-15);

    // Edge direction does not change the pair of updates.
    let (reversed_first, reversed_second) = step_forces(&[-2, 1]);
    assert_relative_eq!(reversed_first.x, first.x, epsilon = 1e-15);
    assert_relative_eq!(reversed_first.y, first.y, epsilon = 1e-15);
    assert_relative_eq!(reversed_first.z, first.z, epsilon = 1e-15);
    assert_eq!(reversed_second, -reversed_first);
}

#[test]
fn test_same_seed_gives_identical_layouts() {
    let links = [-1, 2, 3, 4, -2, 5, -3, 6, -6, 7, 8, -8, 1];
    let run = || {
        let mut layout = Layout::builder(&links).seed(11).build().expect("valid layout");
        for _ in 0..25 {
            layout.step();
        }
        (layout.positions(), layout.last_movement())
    };

    let (a, movement_a) = run();
    let (b, movement_b) = run();
    assert_eq!(a, b);
    assert_eq!(movement_a.to_bits(), movement_b.to_bits());
}

#[test]
fn test_different_seeds_give_different_starts() {
    let links = [-1, 2, 3, -3, 4];
    let a = Layout::builder(&links).seed(1).build().expect("valid layout");
    let b = Layout::builder(&links).seed(2).build().expect("valid layout");
    assert_ne!(a.positions(), b.positions());
}

#[test]
fn test_coincident_bodies_are_separated() {
    let mut layout = Layout::builder(&[-1, 2, -3])
        .positions(&[5, 5, 5, 5, 5, 5, 5, 5, 5])
        .build()
        .expect("valid layout");
    layout.step();

    let positions = layout.positions();
    assert!(positions.iter().all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite()));
    assert!(!positions[0].same_as(&positions[1]));
    assert!(!positions[1].same_as(&positions[2]));
}

#[test]
fn test_edgeless_graph_settles_under_drag() {
    let bodies: Vec<Body> = (0..5)
        .map(|i| {
            let mut body = Body::new(Vector3::new(i as f64 * 50.0, 0.0, 0.0), 1.0).expect("valid body");
            body.velocity = Vector3::new(1.0, 0.0, 0.0);
            body
        })
        .collect();
    let mut layout = Layout::from_bodies(bodies, no_gravity(), DEFAULT_SEED).expect("valid layout");

    // Drag scales the velocity by 1 - 0.02 * 20 = 0.6 every step.
    let steps = (0..50).position(|_| layout.step()).expect("layout should converge");
    assert!(steps < 20, "Converged after {} steps", steps + 1);
    assert!(layout.last_movement() < layout.config().stable_threshold);
}

#[test]
fn test_connected_pair_settles_near_equilibrium() {
    let mut layout = Layout::builder(&[-1, 2])
        .positions(&[0, 0, 0, 10, 0, 0])
        .build()
        .expect("valid layout");

    for _ in 0..300 {
        layout.step();
    }
    assert!(layout.last_movement() < layout.config().stable_threshold);

    // 0.0008 * (r - 30) balances 1.2 * (4/3)^2 / r^2 at r ~ 32.5.
    let positions = layout.positions();
    let distance = (positions[1] - positions[0]).length();
    assert!(distance > 32.0 && distance < 33.0, "Settled at distance {}", distance);
    assert_eq!(positions[0].y, 0.0);
    assert_eq!(positions[1].z, 0.0);
}

#[test]
fn test_builder_uses_defaults() {
    let layout = Layout::builder(&[-1, 2]).build().expect("valid layout");
    assert_eq!(*layout.config(), LayoutConfig::default());
    assert_eq!(layout.seed(), DEFAULT_SEED);
    assert_eq!(layout.body_count(), 2);
    assert_eq!(layout.iteration(), 0);
    assert!(layout.last_movement().is_infinite());
}

#[test]
fn test_builder_reports_preconditions() {
    assert!(matches!(Layout::builder(&[]).build(), Err(LayoutError::EmptyEdgeList)));
    assert!(matches!(
        Layout::builder(&[-1, 2]).positions(&[0, 0, 0]).build(),
        Err(LayoutError::PositionCountMismatch { .. })
    ));
    assert!(matches!(
        Layout::builder(&[-1, 2]).weights(&[1, 2, 3]).build(),
        Err(LayoutError::WeightCountMismatch { .. })
    ));
    let config = LayoutConfig { time_step: 0.0, ..LayoutConfig::default() };
    assert!(matches!(
        Layout::builder(&[-1, 2]).config(config).build(),
        Err(LayoutError::InvalidConfig(_))
    ));
}

#[test]
fn test_from_bodies_reports_preconditions() {
    let config = LayoutConfig::default();
    assert!(matches!(
        Layout::from_bodies(Vec::new(), config, 1),
        Err(LayoutError::EmptyEdgeList)
    ));

    let mut light = Body::default();
    light.mass = 0.0;
    assert!(matches!(
        Layout::from_bodies(vec![Body::default(), light], config, 1),
        Err(LayoutError::InvalidMass { body: 1, .. })
    ));

    let mut dangling = Body::default();
    dangling.outgoing.push(4);
    match Layout::from_bodies(vec![dangling, Body::default()], config, 1) {
        Err(LayoutError::EdgeOutOfRange { from, target, count }) => {
            assert_eq!((from, target, count), (0, 4, 2));
        }
        other => panic!("Expected EdgeOutOfRange, got {:?}", other),
    }
}
