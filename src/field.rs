/*
 * Noise Field Module
 *
 * Coherent 3D noise used to push particles around. Samples are normalized
 * to [0, 1] so callers can scale them into angles directly.
 */

pub trait NoiseField {
    /// Sample the field at a point. Result is in [0, 1].
    fn sample(&self, x: f32, y: f32, z: f32) -> f32;
}

/// Perlin noise backed by nannou's noise module.
pub struct PerlinField {
    perlin: nannou::noise::Perlin,
}

impl PerlinField {
    pub fn new() -> Self {
        Self {
            perlin: nannou::noise::Perlin::new(),
        }
    }
}

impl Default for PerlinField {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseField for PerlinField {
    fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        let raw = nannou::noise::NoiseFn::get(&self.perlin, [x as f64, y as f64, z as f64]);
        // Perlin output is roughly in [-1, 1]
        ((raw as f32 + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

/// A field that returns the same value everywhere.
#[derive(Debug, Clone, Copy)]
pub struct ConstantField(pub f32);

impl NoiseField for ConstantField {
    fn sample(&self, _x: f32, _y: f32, _z: f32) -> f32 {
        self.0.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perlin_samples_stay_in_unit_range() {
        let field = PerlinField::new();
        for i in 0..200 {
            let t = i as f32 * 0.37;
            let v = field.sample(t, t * 1.3, t * 0.1);
            assert!((0.0..=1.0).contains(&v), "sample {} out of range", v);
        }
    }

    #[test]
    fn perlin_is_deterministic() {
        let a = PerlinField::new();
        let b = PerlinField::new();
        assert_eq!(a.sample(1.5, 2.5, 0.3), b.sample(1.5, 2.5, 0.3));
    }

    #[test]
    fn constant_field_clamps() {
        assert_eq!(ConstantField(2.0).sample(0.0, 0.0, 0.0), 1.0);
    }
}
