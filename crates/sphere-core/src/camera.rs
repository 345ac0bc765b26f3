//! Camera description and damped orbit controls.
//!
//! These types avoid referencing platform-specific APIs; the web front-end
//! feeds pointer deltas into [`OrbitCamera`] and turns the resulting
//! [`Camera`] into a view-projection matrix for the point renderer.

use glam::{Mat4, Vec3};

use crate::constants::*;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Orbit around `target`, easing towards pointer input like a damped
/// trackball. Call [`OrbitCamera::update`] once per frame.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    yaw_delta: f32,
    pitch_delta: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_from(Vec3::from_array(CAMERA_EYE), Vec3::ZERO)
    }
}

impl OrbitCamera {
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(f32::EPSILON);
        Self {
            target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance)
                .clamp(-1.0, 1.0)
                .asin()
                .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT),
            distance,
            yaw_delta: 0.0,
            pitch_delta: 0.0,
        }
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Queue rotation from a pointer drag of `(dx, dy)` pixels.
    pub fn drag(&mut self, dx_px: f32, dy_px: f32) {
        self.yaw_delta -= dx_px * ORBIT_RADIANS_PER_PX;
        self.pitch_delta += dy_px * ORBIT_RADIANS_PER_PX;
    }

    /// Dolly in (negative) or out (positive) by a wheel delta.
    pub fn zoom(&mut self, wheel_delta: f32) {
        let scale = (1.0 + wheel_delta * ORBIT_ZOOM_PER_WHEEL).max(0.1);
        self.distance = (self.distance * scale).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    /// Apply a damped share of the queued rotation.
    pub fn update(&mut self) {
        self.yaw += self.yaw_delta * ORBIT_DAMPING;
        self.pitch = (self.pitch + self.pitch_delta * ORBIT_DAMPING)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
        self.yaw_delta *= 1.0 - ORBIT_DAMPING;
        self.pitch_delta *= 1.0 - ORBIT_DAMPING;
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(cp * sy, sp, cp * cy) * self.distance
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.target,
            up: Vec3::Y,
            aspect: if aspect.is_finite() && aspect > 0.0 {
                aspect
            } else {
                1.0
            },
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}
