/*
 * Physics Module
 *
 * This module drives a collection of particles through one frame:
 * 1. Reset every flocking accumulator
 * 2. Visit each unordered pair once for flocking sums and contact repulsion
 * 3. Turn sums into forces and add field forces (noise, pointer)
 * 4. Integrate
 * 5. Replace dead particles with fresh ones
 *
 * Pairs are visited brute force; the swarm sizes the playground uses do not
 * need spatial partitioning.
 */

use std::f32::consts::TAU;

use nannou::prelude::*;
use rand::Rng;

use crate::color::HsbColor;
use crate::field::NoiseField;
use crate::forces::pair_mut;
use crate::params::{SimulationParams, Viewport};
use crate::particle::Particle;
use crate::render::Surface;

/// What a pointer does to nearby particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerMode {
    Attract,
    Repel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub position: Point2,
    pub mode: PointerMode,
}

/// Counters from one call to `Swarm::step`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    pub alive: usize,
    pub pairs_visited: usize,
    pub respawned: usize,
}

pub struct Swarm {
    pub particles: Vec<Particle>,
    viewport: Viewport,
    next_id: u32,
}

impl Swarm {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            particles: Vec::new(),
            viewport,
            next_id: 0,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn alive_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_alive()).count()
    }

    // Create a particle at a random spot inside the viewport
    pub fn spawn<R: Rng + ?Sized>(&mut self, params: &SimulationParams, rng: &mut R) -> Particle {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        let radius = rng.gen_range(params.min_radius..=params.max_radius);
        let lifetime = rng.gen_range(params.min_lifetime..=params.max_lifetime);
        let x = rng.gen_range(0.0..=self.viewport.width.max(0.0));
        let y = rng.gen_range(0.0..=self.viewport.height.max(0.0));

        let heading = rng.gen_range(0.0..TAU);
        let speed = params.initial_speed * rng.gen_range(0.5f32..=1.0);
        let velocity = vec2(heading.cos(), heading.sin()) * speed;

        let hue = params.base_hue + rng.gen_range(-1.0f32..=1.0) * params.hue_spread;
        let color = HsbColor::new(hue, 255.0, 255.0);

        let mut particle = Particle::new(&params.particle, self.viewport);
        particle.setup(id, pt2(x, y), velocity, color, radius, lifetime);
        particle
    }

    // Replace every particle with a fresh one
    pub fn reset<R: Rng + ?Sized>(&mut self, params: &SimulationParams, rng: &mut R) {
        self.particles.clear();
        self.resize(params, rng);
        log::info!("swarm reset with {} particles", self.particles.len());
    }

    // Grow or shrink to the configured particle count
    pub fn resize<R: Rng + ?Sized>(&mut self, params: &SimulationParams, rng: &mut R) {
        let target = params.num_particles;
        if self.particles.len() > target {
            self.particles.truncate(target);
        }
        while self.particles.len() < target {
            let particle = self.spawn(params, rng);
            self.particles.push(particle);
        }
    }

    // Push new per-particle configuration to every particle
    pub fn configure(&mut self, params: &SimulationParams) {
        for particle in &mut self.particles {
            particle.configure(&params.particle);
        }
    }

    // Resizing is explicit: particles keep their old bounds until told otherwise
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        for particle in &mut self.particles {
            particle.set_viewport(viewport);
        }
        log::debug!("viewport set to {:.0}x{:.0}", viewport.width, viewport.height);
    }

    /// Run one frame. `time` feeds the noise field; `dt` integrates.
    pub fn step<F, R>(
        &mut self,
        params: &SimulationParams,
        field: &F,
        pointer: Option<Pointer>,
        time: f32,
        dt: f32,
        rng: &mut R,
    ) -> StepStats
    where
        F: NoiseField + ?Sized,
        R: Rng + ?Sized,
    {
        let mut stats = StepStats::default();

        for particle in &mut self.particles {
            particle.reset_flocking();
        }

        if params.enable_flocking || params.enable_collisions {
            let count = self.particles.len();
            for i in 0..count {
                for j in (i + 1)..count {
                    let Some((a, b)) = pair_mut(&mut self.particles, i, j) else {
                        continue;
                    };
                    if !a.is_alive() || !b.is_alive() {
                        continue;
                    }
                    if params.enable_flocking {
                        a.add_for_flocking(b);
                    }
                    if params.enable_collisions {
                        a.add_contact_repulsion_force(b, params.collision_strength);
                    }
                    stats.pairs_visited += 1;
                }
            }
        }

        let pointer_radius_sqrd = params.pointer_radius * params.pointer_radius;

        for particle in self.particles.iter_mut().filter(|p| p.is_alive()) {
            if params.enable_flocking {
                particle.add_flocking_forces();
            }
            if params.turbulence > 0.0 {
                particle.add_noise_force(field, params.noise_angle, params.turbulence, time);
            }
            if let Some(pointer) = pointer {
                particle.is_touched =
                    particle.position.distance_squared(pointer.position) <= pointer_radius_sqrd;
                match pointer.mode {
                    PointerMode::Attract => particle.add_attraction_to_point(
                        pointer.position,
                        pointer_radius_sqrd,
                        params.pointer_strength,
                    ),
                    PointerMode::Repel => particle.add_repulsion_from_point(
                        pointer.position,
                        pointer_radius_sqrd,
                        params.pointer_strength,
                    ),
                }
            } else {
                particle.is_touched = false;
            }
            particle.update_with(dt, rng);
        }

        if params.respawn_dead {
            for index in 0..self.particles.len() {
                if !self.particles[index].is_alive() {
                    let fresh = self.spawn(params, rng);
                    self.particles[index] = fresh;
                    stats.respawned += 1;
                }
            }
        }

        stats.alive = self.alive_count();
        log::trace!(
            "step: {} alive, {} pairs, {} respawned",
            stats.alive,
            stats.pairs_visited,
            stats.respawned
        );
        stats
    }

    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        for particle in &mut self.particles {
            particle.draw(surface);
        }
    }
}
