/*
 * Simulation Parameters Module
 *
 * This module defines the configuration for individual particles and for the
 * interactive playground that drives them. Per-particle behavior is a set of
 * named, orthogonal toggles so that every combination is valid and the
 * interactions are spelled out in one place. The playground parameters can be
 * modified through the UI, loaded from JSON, and carry change detection.
 */

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::{DEFAULT_FRICTION, DEFAULT_MAX_SPEED};

/// Bounds particles bounce inside of, in particle space (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1024.0, 768.0)
    }
}

/// Optional behaviors a particle can switch on. All default to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Behavior {
    /// Clamp into the viewport and reflect velocity at the edges.
    pub bounces: bool,
    /// Radius shrinks linearly to zero over the lifetime.
    pub size_age: bool,
    /// Opacity fades linearly to zero over the lifetime.
    pub opacity_age: bool,
    /// Saturation drops and hue drifts over the lifetime.
    pub color_age: bool,
    /// Randomly dims during the last few percent of the lifetime.
    pub flickers_age: bool,
    /// Draw an outline instead of a filled disc.
    pub hollow: bool,
    /// Draw a trail segment from the previous drawn position instead of a disc.
    pub draw_line: bool,
    /// Never ages, so never dies on its own.
    pub immortal: bool,
}

/// Neighbor radius and steering strength of one flocking rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlockRuleParams {
    pub radius: f32,
    pub strength: f32,
}

impl FlockRuleParams {
    pub fn new(radius: f32, strength: f32) -> Self {
        Self { radius, strength }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockingParams {
    pub separation: FlockRuleParams,
    pub cohesion: FlockRuleParams,
    pub alignment: FlockRuleParams,
}

impl Default for FlockingParams {
    fn default() -> Self {
        Self {
            separation: FlockRuleParams::new(25.0, 1.5),
            cohesion: FlockRuleParams::new(50.0, 0.5),
            alignment: FlockRuleParams::new(50.0, 0.5),
        }
    }
}

/// Everything a particle needs besides its per-instance setup values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub behavior: Behavior,
    /// Velocity multiplier applied every step. 1.0 means no damping.
    pub friction: f32,
    pub max_speed: f32,
    pub flocking: FlockingParams,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            behavior: Behavior::default(),
            friction: DEFAULT_FRICTION,
            max_speed: DEFAULT_MAX_SPEED,
            flocking: FlockingParams::default(),
        }
    }
}

impl ParticleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(ConfigError::invalid(
                "friction",
                format!("{} is outside 0.0..=1.0", self.friction),
            ));
        }
        if !(self.max_speed > 0.0) {
            return Err(ConfigError::invalid(
                "max_speed",
                format!("{} must be positive", self.max_speed),
            ));
        }
        let rules = [
            ("flocking.separation.radius", self.flocking.separation.radius),
            ("flocking.cohesion.radius", self.flocking.cohesion.radius),
            ("flocking.alignment.radius", self.flocking.alignment.radius),
        ];
        for (field, radius) in rules {
            if radius < 0.0 {
                return Err(ConfigError::invalid(field, format!("{} is negative", radius)));
            }
        }
        Ok(())
    }
}

// Parameters for the playground that can be adjusted via UI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub num_particles: usize,
    pub particle: ParticleConfig,
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_lifetime: f32,
    pub max_lifetime: f32,
    pub initial_speed: f32,
    pub base_hue: f32,
    pub hue_spread: f32,
    // Field forces
    pub enable_flocking: bool,
    pub enable_collisions: bool,
    pub collision_strength: f32,
    pub noise_angle: f32,
    pub turbulence: f32,
    pub pointer_radius: f32,
    pub pointer_strength: f32,
    pub respawn_dead: bool,
    pub show_debug: bool,
    pub pause_simulation: bool,

    // Internal state for tracking changes
    #[serde(skip)]
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
#[derive(Debug, Clone, PartialEq)]
struct ParamSnapshot {
    num_particles: usize,
    particle: ParticleConfig,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_particles: 300,
            particle: ParticleConfig {
                behavior: Behavior {
                    bounces: true,
                    size_age: true,
                    opacity_age: false,
                    color_age: true,
                    flickers_age: true,
                    ..Behavior::default()
                },
                friction: 0.98,
                ..ParticleConfig::default()
            },
            min_radius: 2.0,
            max_radius: 8.0,
            min_lifetime: 4.0,
            max_lifetime: 12.0,
            initial_speed: 40.0,
            base_hue: 150.0,
            hue_spread: 40.0,
            enable_flocking: true,
            enable_collisions: false,
            collision_strength: 0.5,
            noise_angle: 6.0,
            turbulence: 0.5,
            pointer_radius: 150.0,
            pointer_strength: 3.0,
            respawn_dead: true,
            show_debug: false,
            pause_simulation: false,
            previous_values: None,
        }
    }
}

impl SimulationParams {
    /// Default parameters with a different particle count.
    pub fn with_num_particles(num_particles: usize) -> Self {
        Self {
            num_particles,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let params = Self::from_json_str(&json)?;
        log::info!("loaded simulation config from {}", path.display());
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.particle.validate()?;
        if !(self.min_radius > 0.0) || self.max_radius < self.min_radius {
            return Err(ConfigError::invalid(
                "min_radius",
                format!("radius range {}..{} is empty or non-positive", self.min_radius, self.max_radius),
            ));
        }
        if !(self.min_lifetime > 0.0) || self.max_lifetime < self.min_lifetime {
            return Err(ConfigError::invalid(
                "min_lifetime",
                format!("lifetime range {}..{} is empty or non-positive", self.min_lifetime, self.max_lifetime),
            ));
        }
        if self.pointer_radius < 0.0 {
            return Err(ConfigError::invalid("pointer_radius", "must not be negative"));
        }
        Ok(())
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(self.snapshot());
    }

    fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            num_particles: self.num_particles,
            particle: self.particle,
        }
    }

    // Check if any parameters have changed since the last snapshot
    // Returns a tuple of (num_particles_changed, particle_config_changed)
    pub fn detect_changes(&self) -> (bool, bool) {
        // If we don't have previous values, nothing has changed
        let Some(prev) = &self.previous_values else {
            return (false, false);
        };

        (self.num_particles != prev.num_particles, self.particle != prev.particle)
    }

    // Get parameter ranges for UI sliders
    pub fn get_num_particles_range() -> RangeInclusive<usize> {
        1..=2000
    }

    pub fn get_max_speed_range() -> RangeInclusive<f32> {
        1.0..=200.0
    }

    pub fn get_friction_range() -> RangeInclusive<f32> {
        0.8..=1.0
    }

    pub fn get_strength_range() -> RangeInclusive<f32> {
        0.0..=5.0
    }

    pub fn get_radius_range() -> RangeInclusive<f32> {
        0.0..=150.0
    }

    pub fn get_turbulence_range() -> RangeInclusive<f32> {
        0.0..=5.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SimulationParams::default().validate().is_ok());
        assert!(ParticleConfig::default().validate().is_ok());
    }

    #[test]
    fn particle_config_defaults_to_no_damping() {
        let config = ParticleConfig::default();
        assert_eq!(config.friction, 1.0);
        assert_eq!(config.max_speed, 50.0);
        assert_eq!(config.behavior, Behavior::default());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let params = SimulationParams::from_json_str(
            r#"{ "num_particles": 12, "particle": { "behavior": { "bounces": true } } }"#,
        )
        .unwrap();
        assert_eq!(params.num_particles, 12);
        assert!(params.particle.behavior.bounces);
        assert!(!params.particle.behavior.size_age);
        assert_eq!(params.particle.max_speed, DEFAULT_MAX_SPEED);
    }

    #[test]
    fn rejects_out_of_range_friction() {
        let err = SimulationParams::from_json_str(r#"{ "particle": { "friction": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "friction", .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SimulationParams::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SimulationParams::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn with_num_particles_keeps_other_defaults() {
        let params = SimulationParams::with_num_particles(12);
        let defaults = SimulationParams::default();
        assert_eq!(params.num_particles, 12);
        assert_eq!(params.particle, defaults.particle);
        assert_eq!(params.turbulence, defaults.turbulence);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn detects_particle_config_changes() {
        let mut params = SimulationParams::default();
        assert_eq!(params.detect_changes(), (false, false));

        params.take_snapshot();
        params.particle.behavior.hollow = true;
        assert_eq!(params.detect_changes(), (false, true));

        params.take_snapshot();
        params.num_particles += 1;
        assert_eq!(params.detect_changes(), (true, false));

        params.take_snapshot();
        params.turbulence += 1.0;
        assert_eq!(params.detect_changes(), (false, false));
    }
}
