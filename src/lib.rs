/*
 * Particle Simulation - Module Definitions
 *
 * This file defines the module structure for the particle library and the
 * interactive playground built on top of it. The particle itself only
 * depends on the color, flocking, forces, field and render modules; the
 * app, renderer, ui and input modules make up the playground.
 */

// Re-export key components for easier access
pub use color::HsbColor;
pub use debug::DebugInfo;
pub use error::ConfigError;
pub use field::{ConstantField, NoiseField, PerlinField};
pub use flocking::{Flock, FlockRule};
pub use forces::ForcePair;
pub use params::{Behavior, FlockRuleParams, FlockingParams, ParticleConfig, SimulationParams, Viewport};
pub use particle::Particle;
pub use physics::{Pointer, PointerMode, StepStats, Swarm};
pub use render::{Fill, ScreenDraw, Surface};

// Define modules
pub mod app;
pub mod color;
pub mod debug;
pub mod error;
pub mod field;
pub mod flocking;
pub mod forces;
pub mod input;
pub mod params;
pub mod particle;
pub mod physics;
pub mod render;
pub mod renderer;
pub mod ui;

// Constants
pub const DEFAULT_MAX_SPEED: f32 = 50.0;
pub const DEFAULT_FRICTION: f32 = 1.0;
pub const MASS_FACTOR: f32 = 0.005;
