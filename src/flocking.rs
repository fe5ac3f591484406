/*
 * Flocking Module
 *
 * Each particle carries three running accumulators, one per rule:
 * 1. Separation: sum of unit directions to close neighbors, weighted by 1/d²
 * 2. Cohesion: sum of neighbor positions
 * 3. Alignment: sum of neighbor velocities
 *
 * One pairwise pass fills the accumulators for both members of a pair at
 * once, then each particle turns its sums into a single steering force.
 * Sums and counts must be reset before every pairwise pass.
 */

use nannou::prelude::*;

use crate::params::{FlockRuleParams, FlockingParams};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockRule {
    pub sum: Vec2,
    pub count: u32,
    /// Squared neighbor radius. Neighbors at or beyond it are ignored.
    pub dist_sqrd: f32,
    pub strength: f32,
}

impl FlockRule {
    pub fn new(params: FlockRuleParams) -> Self {
        Self {
            sum: Vec2::ZERO,
            count: 0,
            dist_sqrd: params.radius * params.radius,
            strength: params.strength,
        }
    }

    pub fn reset(&mut self) {
        self.sum = Vec2::ZERO;
        self.count = 0;
    }

    #[inline]
    pub fn in_range(&self, dist_sqrd: f32) -> bool {
        dist_sqrd > 0.0 && dist_sqrd < self.dist_sqrd
    }

    #[inline]
    pub fn accumulate(&mut self, value: Vec2) {
        self.sum += value;
        self.count += 1;
    }

    /// Averaged, normalized sum scaled by strength. Zero with no neighbors.
    pub fn steering(&self) -> Vec2 {
        if self.count == 0 {
            return Vec2::ZERO;
        }
        let average = self.sum / self.count as f32;
        average.normalize_or_zero() * self.strength
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flock {
    pub separation: FlockRule,
    pub cohesion: FlockRule,
    pub alignment: FlockRule,
}

impl Flock {
    pub fn new(params: &FlockingParams) -> Self {
        Self {
            separation: FlockRule::new(params.separation),
            cohesion: FlockRule::new(params.cohesion),
            alignment: FlockRule::new(params.alignment),
        }
    }

    /// Replace radii and strengths, keeping the current sums.
    pub fn configure(&mut self, params: &FlockingParams) {
        let fresh = Self::new(params);
        self.separation.dist_sqrd = fresh.separation.dist_sqrd;
        self.separation.strength = fresh.separation.strength;
        self.cohesion.dist_sqrd = fresh.cohesion.dist_sqrd;
        self.cohesion.strength = fresh.cohesion.strength;
        self.alignment.dist_sqrd = fresh.alignment.dist_sqrd;
        self.alignment.strength = fresh.alignment.strength;
    }

    pub fn reset(&mut self) {
        self.separation.reset();
        self.cohesion.reset();
        self.alignment.reset();
    }

    /// Combined steering force: away from crowding, toward the averaged
    /// neighbor position, against the averaged neighbor velocity.
    pub fn steering(&self) -> Vec2 {
        -self.separation.steering() + self.cohesion.steering() - self.alignment.steering()
    }

    pub fn apply(&mut self, contribution: &NeighborContribution) {
        if let Some(value) = contribution.separation {
            self.separation.accumulate(value);
        }
        if let Some(value) = contribution.cohesion {
            self.cohesion.accumulate(value);
        }
        if let Some(value) = contribution.alignment {
            self.alignment.accumulate(value);
        }
    }
}

/// What one neighbor adds to each rule of a particle's flock.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NeighborContribution {
    pub separation: Option<Vec2>,
    pub cohesion: Option<Vec2>,
    pub alignment: Option<Vec2>,
}

/// A flock member as seen by its neighbor.
#[derive(Debug, Clone, Copy)]
pub struct Member {
    pub position: Point2,
    pub velocity: Vec2,
}

/// Contributions for both members of an unordered pair, using the radii in
/// `rules`. Call once per pair; both results must be applied.
pub fn neighbor_contributions(rules: &Flock, a: Member, b: Member) -> [NeighborContribution; 2] {
    let offset = b.position - a.position;
    let dist_sqrd = offset.length_squared();
    let direction = offset.normalize_or_zero();

    let mut for_a = NeighborContribution::default();
    let mut for_b = NeighborContribution::default();

    if rules.separation.in_range(dist_sqrd) {
        let weighted = direction / dist_sqrd;
        for_a.separation = Some(weighted);
        for_b.separation = Some(-weighted);
    }

    if rules.cohesion.in_range(dist_sqrd) {
        for_a.cohesion = Some(b.position);
        for_b.cohesion = Some(a.position);
    }

    if rules.alignment.in_range(dist_sqrd) {
        for_a.alignment = Some(b.velocity);
        for_b.alignment = Some(a.velocity);
    }

    [for_a, for_b]
}
