// Host-side tests for the sphere point distribution.

use approx::assert_abs_diff_eq;
use sphere_core::sampler::generate;
use sphere_core::SphereSampler;

#[test]
fn generate_returns_exact_count_on_sphere_surface() {
    for &n in &[1usize, 2, 3, 7, 64, 513, 4000] {
        for &r in &[1.0_f32, 100.0, 250.5] {
            let pts = generate(n, r);
            assert_eq!(pts.len(), n);
            for p in &pts {
                assert_abs_diff_eq!(p.length(), r, epsilon = r * 1e-5);
            }
        }
    }
}

#[test]
fn first_point_is_south_pole() {
    let pts = generate(4, 100.0);
    assert_abs_diff_eq!(pts[0].y, -100.0, epsilon = 1e-4);
    assert_abs_diff_eq!(pts[0].x, 0.0, epsilon = 1e-4);
    assert_abs_diff_eq!(pts[0].z, 0.0, epsilon = 1e-4);
}

#[test]
fn generation_is_deterministic() {
    let a = generate(1000, 42.0);
    let b = generate(1000, 42.0);
    assert_eq!(a, b);
}

#[test]
fn latitude_rises_monotonically_with_index() {
    let pts = generate(500, 10.0);
    for w in pts.windows(2) {
        assert!(w[1].y > w[0].y, "y should increase along the spiral");
    }
}

#[test]
fn points_cover_both_hemispheres_evenly() {
    let pts = generate(4000, 1.0);
    let north = pts.iter().filter(|p| p.y > 0.0).count();
    let south = pts.len() - north;
    assert!((north as i64 - south as i64).abs() <= 2);
}

#[test]
fn spiral_constant_changes_azimuth_only() {
    let a = SphereSampler::new(120.0).generate(50, 5.0);
    let b = SphereSampler::new(125.0).generate(50, 5.0);
    for (pa, pb) in a.iter().zip(&b) {
        assert_abs_diff_eq!(pa.y, pb.y, epsilon = 1e-5);
    }
    assert!(a.iter().zip(&b).any(|(pa, pb)| (pa.x - pb.x).abs() > 1e-3));
}

#[test]
fn position_matches_formula_for_middle_index() {
    let s = SphereSampler::new(120.0);
    // i = 2 of 4 -> t = 0, phi = pi/2
    let p = s.position(2, 4, 100.0);
    let theta = (120.0_f64 * std::f64::consts::FRAC_PI_2).rem_euclid(2.0 * std::f64::consts::PI);
    assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-4);
    assert_abs_diff_eq!(p.x, (100.0 * theta.cos()) as f32, epsilon = 1e-3);
    assert_abs_diff_eq!(p.z, (100.0 * theta.sin()) as f32, epsilon = 1e-3);
}
