//! Deterministic, near-equal-area point distribution on a sphere.
//!
//! Points follow a single spiral from the south pole to the north pole
//! (Saff–Kuijlaars style). Unlike latitude/longitude grids there is no
//! clustering at the poles, and there is no randomness: the same
//! `(count, radius, k)` always yields the same positions in the same order.

use glam::Vec3;
use std::f64::consts::TAU;

use crate::constants::DEFAULT_SPIRAL_K;

#[derive(Clone, Copy, Debug)]
pub struct SphereSampler {
    /// Spiral winding constant; only affects how the spiral looks.
    pub spiral_k: f32,
}

impl Default for SphereSampler {
    fn default() -> Self {
        Self {
            spiral_k: DEFAULT_SPIRAL_K,
        }
    }
}

impl SphereSampler {
    pub fn new(spiral_k: f32) -> Self {
        Self { spiral_k }
    }

    /// Generate `count` positions on the sphere of `radius` centred at the origin.
    pub fn generate(&self, count: usize, radius: f32) -> Vec<Vec3> {
        (0..count)
            .map(|i| self.position(i, count, radius))
            .collect()
    }

    /// Position of the `i`-th of `count` points.
    #[inline]
    pub fn position(&self, i: usize, count: usize, radius: f32) -> Vec3 {
        // Computed in f64 so large counts keep |p| == radius within f32 tolerance.
        let t = (2.0 * i as f64 / count as f64 - 1.0).clamp(-1.0, 1.0);
        let phi = t.acos();
        let theta = (self.spiral_k as f64 * phi).rem_euclid(TAU);
        let r = radius as f64;
        Vec3::new(
            (r * theta.cos() * phi.sin()) as f32,
            (r * phi.cos()) as f32,
            (r * theta.sin() * phi.sin()) as f32,
        )
    }
}

/// Shorthand for `SphereSampler::default().generate(count, radius)`.
pub fn generate(count: usize, radius: f32) -> Vec<Vec3> {
    SphereSampler::default().generate(count, radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_count_yields_no_points() {
        assert!(generate(0, 100.0).is_empty());
    }

    #[test]
    fn single_point_sits_on_south_pole() {
        let pts = generate(1, 10.0);
        assert_eq!(pts.len(), 1);
        assert!((pts[0].y + 10.0).abs() < 1e-4);
    }
}
