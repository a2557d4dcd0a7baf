//! Lightweight xorshift32 PRNG seeded from instance identity

use pyro_core::Vec3;
use std::f32::consts::{PI, TAU};

/// Deterministic generator. Two generators built from the same seed yield
/// the same sequence, which is what makes effects reproducible per instance.
#[derive(Clone, Debug)]
pub struct ParticleRng {
    state: u32,
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Symmetric jitter in [-amount, amount)
    pub fn jitter(&mut self, amount: f32) -> f32 {
        self.range(-amount, amount)
    }

    /// Uniform unit direction on the sphere
    pub fn random_direction(&mut self) -> Vec3 {
        // Marsaglia method for uniform sphere sampling
        loop {
            let x = self.range(-1.0, 1.0);
            let y = self.range(-1.0, 1.0);
            let s = x * x + y * y;
            if s < 1.0 {
                let factor = 2.0 * (1.0 - s).sqrt();
                return Vec3::new(x * factor, 1.0 - 2.0 * s, y * factor);
            }
        }
    }

    /// Uniform unit direction whose vertical component lies in `[min_y, 1]`.
    /// `min_y = 0` gives the upper hemisphere, `-1` the full sphere.
    pub fn capped_direction(&mut self, min_y: f32) -> Vec3 {
        let y = self.range(min_y.clamp(-1.0, 1.0), 1.0);
        let radius = (1.0 - y * y).max(0.0).sqrt();
        let theta = self.range(0.0, TAU);
        Vec3::new(radius * theta.cos(), y, radius * theta.sin())
    }

    /// Direction within a cone around `base_dir` with half-angle `angle_deg`
    pub fn cone_direction(&mut self, base_dir: Vec3, angle_deg: f32) -> Vec3 {
        if angle_deg <= 0.0 {
            return base_dir.normalized();
        }
        if angle_deg >= 180.0 {
            return self.random_direction();
        }

        let cos_angle = (angle_deg * PI / 180.0).cos();

        // Uniform cos_theta in [cos_angle, 1], uniform phi in [0, 2pi]
        let cos_theta = self.range(cos_angle, 1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        let phi = self.range(0.0, TAU);

        let local = Vec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta);
        rotate_to_basis(base_dir, local)
    }
}

/// Rotates `local` (expressed around +Z) to align with `forward`
pub fn rotate_to_basis(forward: Vec3, local: Vec3) -> Vec3 {
    let fwd = forward.normalized();
    let fwd = if fwd == Vec3::ZERO { Vec3::UP } else { fwd };
    let (right, up) = perpendicular_basis(fwd);
    right * local.x + up * local.y + fwd * local.z
}

/// Two unit vectors perpendicular to `forward` and to each other
pub fn perpendicular_basis(forward: Vec3) -> (Vec3, Vec3) {
    let reference = if forward.y.abs() > 0.99 {
        Vec3::new(1.0, 0.0, 0.0)
    } else {
        Vec3::UP
    };
    let right = reference.cross(&forward).normalized();
    let up = forward.cross(&right);
    (right, up)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_range_bounds() {
        let mut rng = ParticleRng::new(42);
        for _ in 0..1000 {
            let v = rng.range(0.0, 10.0);
            assert!((0.0..10.0).contains(&v));
        }
    }

    #[test]
    fn rng_is_reproducible() {
        let mut a = ParticleRng::new(7);
        let mut b = ParticleRng::new(7);
        for _ in 0..50 {
            assert_eq!(a.next_f32().to_bits(), b.next_f32().to_bits());
        }
    }

    #[test]
    fn rng_direction_unit_length() {
        let mut rng = ParticleRng::new(123);
        for _ in 0..100 {
            let d = rng.random_direction();
            assert!((d.length() - 1.0).abs() < 0.01);
        }
    }

    #[test]
    fn capped_direction_stays_above_cap() {
        let mut rng = ParticleRng::new(5);
        for _ in 0..200 {
            let d = rng.capped_direction(0.0);
            assert!(d.y >= 0.0);
            assert!((d.length() - 1.0).abs() < 0.01);
        }
    }

    #[test]
    fn cone_direction_zero_spread() {
        let mut rng = ParticleRng::new(99);
        let dir = rng.cone_direction(Vec3::UP, 0.0);
        assert!(dir.x.abs() < 0.01);
        assert!((dir.y - 1.0).abs() < 0.01);
        assert!(dir.z.abs() < 0.01);
    }

    #[test]
    fn cone_direction_within_half_angle() {
        let mut rng = ParticleRng::new(11);
        let min_cos = (45.0f32).to_radians().cos() - 1e-4;
        for _ in 0..200 {
            let d = rng.cone_direction(Vec3::UP, 45.0);
            assert!(d.dot(&Vec3::UP) >= min_cos);
        }
    }
}
