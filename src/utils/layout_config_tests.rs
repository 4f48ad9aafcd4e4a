use crate::utils::{LayoutConfig, LayoutError, DEFAULT_LAYOUT_CONFIG};

#[test]
fn test_default_matches_constant() {
    let config = LayoutConfig::default();
    assert_eq!(config, DEFAULT_LAYOUT_CONFIG);
    assert_eq!(config.gravity, -1.2);
    assert_eq!(config.theta, 1.2);
    assert_eq!(config.drag_coeff, 0.02);
    assert_eq!(config.spring_coeff, 0.0008);
    assert_eq!(config.spring_length, 30.0);
    assert_eq!(config.time_step, 20.0);
    assert_eq!(config.stable_threshold, 0.009);
}

#[test]
fn test_new_fills_missing_values_from_defaults() {
    let config = LayoutConfig::new(None, Some(0.5), None, None, None, Some(1.0), None);
    assert_eq!(config.theta, 0.5);
    assert_eq!(config.time_step, 1.0);
    assert_eq!(config.gravity, DEFAULT_LAYOUT_CONFIG.gravity);
    assert_eq!(config.stable_threshold, DEFAULT_LAYOUT_CONFIG.stable_threshold);
}

#[test]
fn test_default_config_is_valid() {
    assert!(LayoutConfig::default().validate().is_ok());
}

#[test]
fn test_zero_gravity_and_zero_theta_are_valid() {
    let config = LayoutConfig { gravity: 0.0, theta: 0.0, ..LayoutConfig::default() };
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_bad_values() {
    let bad = [
        LayoutConfig { theta: -0.1, ..LayoutConfig::default() },
        LayoutConfig { time_step: 0.0, ..LayoutConfig::default() },
        LayoutConfig { drag_coeff: -1.0, ..LayoutConfig::default() },
        LayoutConfig { spring_coeff: -1.0, ..LayoutConfig::default() },
        LayoutConfig { spring_length: -5.0, ..LayoutConfig::default() },
        LayoutConfig { stable_threshold: 0.0, ..LayoutConfig::default() },
        LayoutConfig { gravity: f64::NAN, ..LayoutConfig::default() },
        LayoutConfig { spring_length: f64::INFINITY, ..LayoutConfig::default() },
    ];
    for config in bad {
        match config.validate() {
            Err(LayoutError::InvalidConfig(_)) => {}
            other => panic!("Expected InvalidConfig for {:?}, got {:?}", config, other),
        }
    }
}
