// src/utils/layout_config.rs
use crate::utils::{
    DEFAULT_LAYOUT_CONFIG,
    errors::LayoutError
};

/// Constants driving the force model and the integrator.
///
/// A `LayoutConfig` is built once and handed to the layout engine by value;
/// nothing reads these settings from global state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Strength of the body-body interaction. Negative values repel.
    pub gravity: f64,
    /// Barnes-Hut opening threshold (node width / distance).
    pub theta: f64,
    /// Linear drag applied against velocity.
    pub drag_coeff: f64,
    /// Hooke constant of every edge spring.
    pub spring_coeff: f64,
    /// Rest length of every edge spring.
    pub spring_length: f64,
    pub time_step: f64,
    /// Movement below this value reports the layout as converged.
    pub stable_threshold: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        DEFAULT_LAYOUT_CONFIG
    }
}

impl LayoutConfig {
    /// Creates a configuration, taking every unspecified value from the defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_layout::utils::LayoutConfig;
    ///
    /// let config = LayoutConfig::new(Some(0.0), None, None, None, Some(50.0), None, None);
    /// assert_eq!(config.gravity, 0.0);
    /// assert_eq!(config.spring_length, 50.0);
    /// assert_eq!(config.theta, LayoutConfig::default().theta);
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        gravity: Option<f64>,
        theta: Option<f64>,
        drag_coeff: Option<f64>,
        spring_coeff: Option<f64>,
        spring_length: Option<f64>,
        time_step: Option<f64>,
        stable_threshold: Option<f64>,
    ) -> Self {
        let default = DEFAULT_LAYOUT_CONFIG;
        Self {
            gravity: gravity.unwrap_or(default.gravity),
            theta: theta.unwrap_or(default.theta),
            drag_coeff: drag_coeff.unwrap_or(default.drag_coeff),
            spring_coeff: spring_coeff.unwrap_or(default.spring_coeff),
            spring_length: spring_length.unwrap_or(default.spring_length),
            time_step: time_step.unwrap_or(default.time_step),
            stable_threshold: stable_threshold.unwrap_or(default.stable_threshold),
        }
    }

    /// Checks that every constant is finite and inside its valid range.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let fields = [
            ("gravity", self.gravity),
            ("theta", self.theta),
            ("drag_coeff", self.drag_coeff),
            ("spring_coeff", self.spring_coeff),
            ("spring_length", self.spring_length),
            ("time_step", self.time_step),
            ("stable_threshold", self.stable_threshold),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(LayoutError::InvalidConfig(format!("{} must be finite, got {}", name, value)));
        }

        if self.theta < 0.0 { return Err(LayoutError::InvalidConfig("theta must be non-negative".to_string())); }
        if self.drag_coeff < 0.0 { return Err(LayoutError::InvalidConfig("drag_coeff must be non-negative".to_string())); }
        if self.spring_coeff < 0.0 { return Err(LayoutError::InvalidConfig("spring_coeff must be non-negative".to_string())); }
        if self.spring_length < 0.0 { return Err(LayoutError::InvalidConfig("spring_length must be non-negative".to_string())); }
        if self.time_step <= 0.0 { return Err(LayoutError::InvalidConfig("time_step must be positive".to_string())); }
        if self.stable_threshold <= 0.0 { return Err(LayoutError::InvalidConfig("stable_threshold must be positive".to_string())); }

        Ok(())
    }
}
