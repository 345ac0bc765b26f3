// Host-side tests for orbit camera maths and key mapping.

use approx::assert_abs_diff_eq;
use glam::{Vec3, Vec4};
use sphere_core::constants::*;
use sphere_core::{action_for_key, KeyAction, OrbitCamera};

#[test]
fn default_orbit_starts_at_configured_eye() {
    let orbit = OrbitCamera::default();
    let eye = orbit.eye();
    assert_abs_diff_eq!(eye.x, CAMERA_EYE[0], epsilon = 1e-3);
    assert_abs_diff_eq!(eye.y, CAMERA_EYE[1], epsilon = 1e-3);
    assert_abs_diff_eq!(eye.z, CAMERA_EYE[2], epsilon = 1e-3);
}

#[test]
fn origin_projects_to_screen_centre() {
    let cam = OrbitCamera::default().camera(16.0 / 9.0);
    let clip = cam.view_projection() * Vec4::new(0.0, 0.0, 0.0, 1.0);
    let ndc = clip.truncate() / clip.w;
    assert_abs_diff_eq!(ndc.x, 0.0, epsilon = 1e-5);
    assert_abs_diff_eq!(ndc.y, 0.0, epsilon = 1e-5);
    assert!((0.0..=1.0).contains(&ndc.z));
}

#[test]
fn displaced_far_side_stays_inside_depth_range_at_max_zoom() {
    let mut orbit = OrbitCamera::default();
    for _ in 0..100 {
        orbit.zoom(5000.0);
    }
    assert_abs_diff_eq!(orbit.distance(), ORBIT_MAX_DISTANCE, epsilon = 1e-3);

    let reach = DEFAULT_RADIUS * (1.0 + DEFAULT_GAIN.max(DEFAULT_BASS_GAIN));
    let far_point = -orbit.eye().normalize() * reach;
    let cam = orbit.camera(1.0);
    let clip = cam.view_projection() * far_point.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    assert!((0.0..=1.0).contains(&ndc.z), "depth {} clipped", ndc.z);
}

#[test]
fn drag_is_applied_gradually_and_converges() {
    let mut orbit = OrbitCamera::default();
    let yaw0 = orbit.yaw();
    orbit.drag(100.0, 0.0);
    orbit.update();
    let first_step = (orbit.yaw() - yaw0).abs();
    let total = 100.0 * ORBIT_RADIANS_PER_PX;
    assert!(first_step > 0.0 && first_step < total);
    for _ in 0..500 {
        orbit.update();
    }
    assert_abs_diff_eq!((orbit.yaw() - yaw0).abs(), total, epsilon = 1e-4);
}

#[test]
fn pitch_and_distance_are_clamped() {
    let mut orbit = OrbitCamera::default();
    orbit.drag(0.0, 1e6);
    for _ in 0..200 {
        orbit.update();
    }
    assert!(orbit.pitch() <= ORBIT_PITCH_LIMIT);
    for _ in 0..100 {
        orbit.zoom(-1000.0);
    }
    assert_abs_diff_eq!(orbit.distance(), ORBIT_MIN_DISTANCE, epsilon = 1e-3);
    for _ in 0..100 {
        orbit.zoom(5000.0);
    }
    assert_abs_diff_eq!(orbit.distance(), ORBIT_MAX_DISTANCE, epsilon = 1e-3);
}

#[test]
fn orbit_keeps_distance_to_target() {
    let mut orbit = OrbitCamera::looking_from(Vec3::new(0.0, 0.0, 300.0), Vec3::ZERO);
    orbit.drag(250.0, -80.0);
    for _ in 0..50 {
        orbit.update();
        assert_abs_diff_eq!(orbit.eye().length(), 300.0, epsilon = 1e-2);
    }
}

#[test]
fn degenerate_aspect_is_replaced() {
    let cam = OrbitCamera::default().camera(f32::NAN);
    assert_eq!(cam.aspect, 1.0);
    let cam = OrbitCamera::default().camera(0.0);
    assert_eq!(cam.aspect, 1.0);
}

#[test]
fn key_mapping() {
    assert_eq!(action_for_key("Enter"), Some(KeyAction::Start));
    assert_eq!(action_for_key(" "), Some(KeyAction::Start));
    assert_eq!(action_for_key("n"), Some(KeyAction::Next));
    assert_eq!(action_for_key("N"), Some(KeyAction::Next));
    assert_eq!(action_for_key("ArrowRight"), Some(KeyAction::Next));
    assert_eq!(action_for_key("h"), Some(KeyAction::ToggleHud));
    assert_eq!(action_for_key("H"), Some(KeyAction::ToggleHud));
    assert_eq!(action_for_key("x"), None);
    assert_eq!(action_for_key("ArrowLeft"), None);
}
