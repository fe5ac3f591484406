/*
 * Radial Forces Module
 *
 * Repulsion and attraction between a particle and a force source share one
 * rule: the push runs along the line from the source to the particle and
 * falls off linearly from full strength at the source to zero at the edge
 * of its radius. Distances stay squared; no square root is needed until the
 * direction is normalized.
 *
 * Pairwise variants return a `ForcePair` instead of mutating two particles
 * at once. The caller applies it, which keeps iteration over a collection
 * free of aliasing.
 */

use nannou::prelude::*;

use crate::particle::Particle;

/// Equal and opposite force deltas for the two members of a pair.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForcePair {
    pub on_self: Vec2,
    pub on_other: Vec2,
}

impl ForcePair {
    pub const ZERO: Self = Self {
        on_self: Vec2::ZERO,
        on_other: Vec2::ZERO,
    };

    /// Reaction force `delta` on `self`, the opposite on the other.
    pub fn opposed(delta: Vec2) -> Self {
        Self {
            on_self: delta,
            on_other: -delta,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.on_self == Vec2::ZERO && self.on_other == Vec2::ZERO
    }
}

/// Push on a particle at `position` away from `source`.
///
/// With a positive `radius_sqrd` the force is zero beyond that squared
/// distance and scales by `1 - dist_sqrd / radius_sqrd` inside it. A zero or
/// negative `radius_sqrd` means unbounded range at full strength. Coincident
/// points have no defined direction and produce no force.
pub fn radial_push(position: Point2, source: Point2, radius_sqrd: f32, scale: f32) -> Vec2 {
    let offset = position - source;
    let dist_sqrd = offset.length_squared();

    if dist_sqrd == 0.0 {
        return Vec2::ZERO;
    }

    let pct = if radius_sqrd > 0.0 {
        if dist_sqrd > radius_sqrd {
            return Vec2::ZERO;
        }
        1.0 - dist_sqrd / radius_sqrd
    } else {
        1.0
    };

    offset.normalize() * scale * pct
}

/// Apply a pairwise result to both particles.
pub fn apply_pair(particle: &mut Particle, other: &mut Particle, pair: ForcePair) {
    particle.force += pair.on_self;
    other.force += pair.on_other;
}

/// Borrow two distinct elements of a slice mutably.
pub fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> Option<(&mut T, &mut T)> {
    if i == j || i >= items.len() || j >= items.len() {
        return None;
    }
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        Some((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = items.split_at_mut(i);
        Some((&mut tail[0], &mut head[j]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_strength_falls_off_linearly() {
        // dist_sqrd = 25, radius_sqrd = 100 -> pct = 0.75
        let push = radial_push(pt2(5.0, 0.0), pt2(0.0, 0.0), 100.0, 2.0);
        assert!((push - vec2(1.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn out_of_range_has_no_effect() {
        let push = radial_push(pt2(20.0, 0.0), pt2(0.0, 0.0), 100.0, 2.0);
        assert_eq!(push, Vec2::ZERO);
    }

    #[test]
    fn boundary_is_in_range_with_zero_falloff() {
        let push = radial_push(pt2(10.0, 0.0), pt2(0.0, 0.0), 100.0, 2.0);
        assert!(push.length() < 1e-6);
    }

    #[test]
    fn non_positive_radius_is_unbounded() {
        let push = radial_push(pt2(0.0, 1000.0), pt2(0.0, 0.0), 0.0, 3.0);
        assert!((push - vec2(0.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn coincident_points_produce_no_force() {
        let push = radial_push(pt2(4.0, 4.0), pt2(4.0, 4.0), 0.0, 3.0);
        assert_eq!(push, Vec2::ZERO);
    }

    #[test]
    fn pair_mut_handles_both_orders() {
        let mut values = [1, 2, 3];
        {
            let (a, b) = pair_mut(&mut values, 0, 2).unwrap();
            std::mem::swap(a, b);
        }
        assert_eq!(values, [3, 2, 1]);
        let (a, b) = pair_mut(&mut values, 2, 1).unwrap();
        assert_eq!((*a, *b), (1, 2));
        assert!(pair_mut(&mut values, 1, 1).is_none());
        assert!(pair_mut(&mut values, 0, 3).is_none());
    }
}
