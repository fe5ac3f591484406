/*
 * Particle Module
 *
 * This module defines the Particle struct: a physical body with a force
 * accumulator, a visual actor whose size, opacity and color can evolve with
 * age, and a flocking participant.
 *
 * A driver calls into a particle in a fixed order each frame:
 * 1. reset_flocking
 * 2. pairwise calls (add_for_flocking, repulsion/attraction) once per pair
 * 3. add_flocking_forces and field forces (noise, points)
 * 4. update
 * 5. draw
 */

use nannou::prelude::*;
use rand::{Rng, RngCore};

use crate::color::{HsbColor, CHANNEL_LIMIT};
use crate::field::NoiseField;
use crate::flocking::{neighbor_contributions, Flock, Member, NeighborContribution};
use crate::forces::{apply_pair, radial_push, ForcePair};
use crate::params::{Behavior, ParticleConfig, Viewport};
use crate::render::{Fill, Surface};
use crate::MASS_FACTOR;

/// Life fraction after which a flickering particle may dim.
const FLICKER_START: f32 = 0.94;
/// A flicker happens when a uniform draw in [0, 1) exceeds this.
const FLICKER_THRESHOLD: f32 = 0.3;
const FLICKER_DIM: f32 = 0.2;
/// Velocity damping applied on a vertical bounce.
const BOUNCE_DAMPING: f32 = 0.9;
/// Saturation at the end of the lifetime when aging changes color.
const AGED_SATURATION: f32 = 128.0;
/// Hue shift over the full lifetime when aging changes color.
const AGED_HUE_SHIFT: f32 = 100.0;
const NOISE_SCALE: f32 = 0.005;
const NOISE_TIME_SCALE: f32 = 0.1;
const NOISE_AGE_GAIN: f32 = 0.1;
const MIN_RESOLUTION: f32 = 6.0;
const MAX_RESOLUTION: f32 = 22.0;
const RESOLUTION_RADIUS: f32 = 10.0;
const STROKE_WEIGHT: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u32,
    pub position: Point2,
    pub previous_position: Point2,
    pub initial_position: Point2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub force: Vec2,
    pub mass: f32,
    pub lifetime: f32,
    pub color: HsbColor,
    pub opacity: f32,
    pub radius: f32,
    pub initial_radius: f32,
    pub behavior: Behavior,
    pub is_touched: bool,
    pub flock: Flock,
    pub viewport: Viewport,
    pub friction: f32,
    pub max_speed: f32,
    age: f32,
    is_alive: bool,
    original_hue: f32,
}

impl Particle {
    pub fn new(config: &ParticleConfig, viewport: Viewport) -> Self {
        Self {
            id: 0,
            position: Vec2::ZERO,
            previous_position: Vec2::ZERO,
            initial_position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            force: Vec2::ZERO,
            mass: 0.0,
            lifetime: 0.0,
            color: HsbColor::default(),
            opacity: CHANNEL_LIMIT,
            radius: 0.0,
            initial_radius: 0.0,
            behavior: config.behavior,
            is_touched: false,
            flock: Flock::new(&config.flocking),
            viewport,
            friction: config.friction,
            max_speed: config.max_speed,
            age: 0.0,
            is_alive: true,
            original_hue: 0.0,
        }
    }

    /// Assign per-instance values. Mass follows from the radius.
    pub fn setup(
        &mut self,
        id: u32,
        position: Point2,
        velocity: Vec2,
        color: HsbColor,
        initial_radius: f32,
        lifetime: f32,
    ) {
        if initial_radius <= 0.0 {
            log::warn!("particle {} set up with non-positive radius {}", id, initial_radius);
        }
        if lifetime <= 0.0 {
            log::warn!("particle {} set up with non-positive lifetime {}, it dies on first update", id, lifetime);
        }

        let initial_radius = initial_radius.max(0.0);

        self.id = id;
        self.position = position;
        self.previous_position = position;
        self.initial_position = position;
        self.velocity = velocity;
        self.color = color;
        self.original_hue = color.hue();
        self.initial_radius = initial_radius;
        self.radius = initial_radius;
        self.mass = initial_radius * initial_radius * MASS_FACTOR;
        self.lifetime = lifetime;
    }

    /// Apply new configuration without touching per-instance state.
    pub fn configure(&mut self, config: &ParticleConfig) {
        self.behavior = config.behavior;
        self.friction = config.friction;
        self.max_speed = config.max_speed;
        self.flock.configure(&config.flocking);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn is_alive(&self) -> bool {
        self.is_alive
    }

    pub fn age(&self) -> f32 {
        self.age
    }

    pub fn original_hue(&self) -> f32 {
        self.original_hue
    }

    pub fn kill(&mut self) {
        if self.is_alive {
            log::debug!("particle {} killed at age {:.2}s", self.id, self.age);
        }
        self.is_alive = false;
    }

    // Share of the lifetime already used, clamped to [0, 1]
    #[inline]
    pub fn life_fraction(&self) -> f32 {
        if self.lifetime <= 0.0 {
            return 1.0;
        }
        (self.age / self.lifetime).clamp(0.0, 1.0)
    }

    /// Advance one step using the thread-local random generator for flicker.
    pub fn update(&mut self, dt: f32) {
        self.update_with(dt, &mut rand::thread_rng());
    }

    /// Advance one step. `rng` is only consulted for flicker draws.
    pub fn update_with<R: RngCore + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        if !self.is_alive {
            return;
        }

        // Integrate forces
        self.acceleration += self.force;
        self.velocity += self.acceleration;
        self.velocity *= self.friction;
        self.limit_velocity();
        self.position += self.velocity * dt;
        self.acceleration = Vec2::ZERO;
        self.force = Vec2::ZERO;

        // Age and check if the particle has to die
        if !self.behavior.immortal {
            self.age += dt;
            if self.lifetime <= 0.0 || self.age >= self.lifetime {
                self.is_alive = false;
                log::debug!("particle {} expired at age {:.2}s", self.id, self.age);
            }
        }

        let life = self.life_fraction();

        if self.behavior.size_age {
            self.radius = self.initial_radius * (1.0 - life);
        }

        self.opacity = CHANNEL_LIMIT;
        if self.behavior.opacity_age {
            self.opacity *= 1.0 - life;
        }
        if self.behavior.flickers_age && life > FLICKER_START && rng.gen::<f32>() > FLICKER_THRESHOLD {
            self.opacity *= FLICKER_DIM;
        }

        if self.behavior.color_age {
            let saturation = CHANNEL_LIMIT + life * (AGED_SATURATION - CHANNEL_LIMIT);
            let hue = self.original_hue - life * AGED_HUE_SHIFT;
            self.color.set_saturation(saturation);
            self.color.set_hue(hue);
        }

        if self.behavior.bounces {
            self.bounce();
        }
    }

    // Keep the particle inside the viewport, reflecting velocity at the edges.
    // Only vertical bounces lose energy.
    fn bounce(&mut self) {
        let Viewport { width, height } = self.viewport;
        let radius = self.radius;
        let mut is_bouncing = false;

        if self.position.x > width - radius {
            self.position.x = width - radius;
            self.velocity.x *= -1.0;
        } else if self.position.x < radius {
            self.position.x = radius;
            self.velocity.x *= -1.0;
        }

        if self.position.y > height - radius {
            self.position.y = height - radius;
            self.velocity.y *= -1.0;
            is_bouncing = true;
        } else if self.position.y < radius {
            self.position.y = radius;
            self.velocity.y *= -1.0;
            is_bouncing = true;
        }

        if is_bouncing {
            self.velocity *= BOUNCE_DAMPING;
        }
    }

    fn limit_velocity(&mut self) {
        let max_speed_sqrd = self.max_speed * self.max_speed;
        if self.velocity.length_squared() > max_speed_sqrd {
            self.velocity = self.velocity.normalize() * self.max_speed;
        }
    }

    // Number of segments used to approximate the disc
    pub fn resolution(&self) -> u32 {
        map_range(self.radius, 0.0, RESOLUTION_RADIUS, MIN_RESOLUTION, MAX_RESOLUTION)
            .clamp(MIN_RESOLUTION, MAX_RESOLUTION) as u32
    }

    /// Draw as a disc, or as a trail segment in line mode. Line mode moves
    /// `previous_position` up to the current position.
    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if !self.is_alive {
            return;
        }

        let color = self.color.to_hsva(self.opacity);

        if self.behavior.draw_line {
            surface.line(self.previous_position, self.position, color, STROKE_WEIGHT);
            self.previous_position = self.position;
        } else {
            let fill = if self.behavior.hollow {
                Fill::Outline { weight: STROKE_WEIGHT }
            } else {
                Fill::Solid
            };
            surface.disc(self.position, self.radius, self.resolution(), color, fill);
        }
    }

    /// Accumulate a force scaled by inverse mass. Massless particles ignore it.
    pub fn add_force(&mut self, force: Vec2) {
        if self.mass > 0.0 {
            self.force += force / self.mass;
        }
    }

    /// Drift along a coherent noise field. Influence grows with age.
    /// `time` is the field's third coordinate, usually elapsed seconds.
    pub fn add_noise_force<F: NoiseField + ?Sized>(&mut self, field: &F, angle: f32, turbulence: f32, time: f32) {
        let noise = field.sample(
            self.position.x * NOISE_SCALE,
            self.position.y * NOISE_SCALE,
            time * NOISE_TIME_SCALE,
        ) * angle;
        let direction = vec2(noise.cos(), noise.sin());
        self.force += direction * turbulence * self.age * NOISE_AGE_GAIN;
    }

    // Pairwise repulsion as a pair of deltas (this particle pushed away from other)
    pub fn repulsion_from(&self, other: &Particle, radius_sqrd: f32, scale: f32) -> ForcePair {
        ForcePair::opposed(radial_push(self.position, other.position, radius_sqrd, scale))
    }

    // Pairwise repulsion acting within the sum of both radii
    pub fn contact_repulsion_from(&self, other: &Particle, scale: f32) -> ForcePair {
        let reach = self.radius + other.radius;
        if reach <= 0.0 {
            return ForcePair::ZERO;
        }
        self.repulsion_from(other, reach * reach, scale)
    }

    // Pairwise attraction as a pair of deltas (this particle pulled toward other)
    pub fn attraction_to(&self, other: &Particle, radius_sqrd: f32, scale: f32) -> ForcePair {
        ForcePair::opposed(-radial_push(self.position, other.position, radius_sqrd, scale))
    }

    pub fn add_repulsion_force(&mut self, other: &mut Particle, radius_sqrd: f32, scale: f32) {
        let pair = self.repulsion_from(other, radius_sqrd, scale);
        apply_pair(self, other, pair);
    }

    pub fn add_contact_repulsion_force(&mut self, other: &mut Particle, scale: f32) {
        let pair = self.contact_repulsion_from(other, scale);
        apply_pair(self, other, pair);
    }

    pub fn add_attraction_force(&mut self, other: &mut Particle, radius_sqrd: f32, scale: f32) {
        let pair = self.attraction_to(other, radius_sqrd, scale);
        apply_pair(self, other, pair);
    }

    pub fn add_repulsion_from_point(&mut self, point: Point2, radius_sqrd: f32, scale: f32) {
        self.force += radial_push(self.position, point, radius_sqrd, scale);
    }

    pub fn add_attraction_to_point(&mut self, point: Point2, radius_sqrd: f32, scale: f32) {
        self.force -= radial_push(self.position, point, radius_sqrd, scale);
    }

    fn as_member(&self) -> Member {
        Member {
            position: self.position,
            velocity: self.velocity,
        }
    }

    /// Flocking contributions for this particle and `other`, using this
    /// particle's neighbor radii.
    pub fn flocking_contributions(&self, other: &Particle) -> [NeighborContribution; 2] {
        neighbor_contributions(&self.flock, self.as_member(), other.as_member())
    }

    /// Accumulate flocking sums for both particles. Call once per unordered pair.
    pub fn add_for_flocking(&mut self, other: &mut Particle) {
        let [mine, theirs] = self.flocking_contributions(other);
        self.flock.apply(&mine);
        other.flock.apply(&theirs);
    }

    /// Turn this frame's flocking sums into force.
    pub fn add_flocking_forces(&mut self) {
        self.force += self.flock.steering();
    }

    pub fn reset_flocking(&mut self) {
        self.flock.reset();
    }

    // Desired velocity points from target to this particle, so this steers away from it
    pub fn seek(&mut self, target: Point2, max_speed: f32) {
        let desired = (self.position - target).normalize_or_zero() * max_speed;
        self.add_force(desired - self.velocity);
    }

    /// Move `fraction` of the remaining way back to the initial position.
    pub fn move_toward_origin(&mut self, fraction: f32) {
        self.position = self.initial_position * fraction + self.position * (1.0 - fraction);
    }
}
