//! Per-frame driver: spectrum → field → rotation → renderer.

use glam::{EulerRot, Mat4};

use crate::constants::{SPIN_X_PER_FRAME, SPIN_Y_PER_FRAME};
use crate::field::{ParticleField, PointInstance};
use crate::spectrum::SpectrumSnapshot;

/// Anything that can hand out the current analyser frame.
///
/// `read` is a synchronous copy of analyser state, never a suspension point.
pub trait SpectrumSource {
    fn read(&mut self) -> Option<SpectrumSnapshot<'_>>;
}

/// The drawing side of the loop.
pub trait FrameRenderer {
    /// Replace the point geometry. Called only on frames where it changed.
    fn upload(&mut self, instances: &[PointInstance]);
    /// Draw one frame with `model` applied to every point.
    fn draw(&mut self, model: Mat4) -> anyhow::Result<()>;
}

/// Constant rotation applied every frame, in radians, independent of audio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinRate {
    pub x: f32,
    pub y: f32,
}

impl Default for SpinRate {
    fn default() -> Self {
        Self {
            x: SPIN_X_PER_FRAME,
            y: SPIN_Y_PER_FRAME,
        }
    }
}

pub struct RenderLoop {
    field: ParticleField,
    spin: SpinRate,
    rot_x: f32,
    rot_y: f32,
    instances: Vec<PointInstance>,
    reacting: bool,
    frames: u64,
    render_errors: u64,
}

impl RenderLoop {
    pub fn new(field: ParticleField, spin: SpinRate) -> Self {
        let capacity = field.len();
        Self {
            field,
            spin,
            rot_x: 0.0,
            rot_y: 0.0,
            instances: Vec::with_capacity(capacity),
            reacting: false,
            frames: 0,
            render_errors: 0,
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Frames ticked so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn render_errors(&self) -> u64 {
        self.render_errors
    }

    /// Current whole-field rotation as `(x, y)` radians.
    pub fn rotation(&self) -> (f32, f32) {
        (self.rot_x, self.rot_y)
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.rot_x, self.rot_y, 0.0)
    }

    /// Run one frame. Never fails: renderer errors are logged and counted.
    pub fn tick(
        &mut self,
        source: Option<&mut dyn SpectrumSource>,
        renderer: &mut dyn FrameRenderer,
    ) {
        self.frames += 1;

        match source.and_then(|s| s.read()) {
            Some(snapshot) => {
                self.field.update(&snapshot);
                self.reacting = true;
            }
            None if self.reacting => {
                // Source went away; settle back onto the rest sphere once.
                self.field.rest();
                self.reacting = false;
            }
            None => {}
        }

        self.rot_x += self.spin.x;
        self.rot_y += self.spin.y;

        if self.field.take_dirty() {
            self.field.write_instances(&mut self.instances);
            renderer.upload(&self.instances);
        }
        if let Err(e) = renderer.draw(self.model_matrix()) {
            self.render_errors += 1;
            // Avoid flooding the console when every frame fails.
            if self.render_errors.is_power_of_two() {
                log::error!("[render] frame {} failed: {e:?}", self.frames);
            }
        }
    }
}
