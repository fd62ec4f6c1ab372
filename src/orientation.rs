//! Per-frame model orientation accumulation.
//!
//! The UI exposes three Euler sliders (pitch/yaw/roll, degrees), but the
//! sliders are a per-frame *delta* source, not an absolute pose. Each frame
//! the slider movement since the previous frame is converted into three
//! single-axis quaternions and pre-multiplied onto a persistent orientation
//! quaternion. Rebuilding the rotation from absolute Euler angles every
//! frame would reintroduce gimbal lock; accumulating deltas does not.

use glam::{Mat4, Quat, Vec3};

/// Model transform state carried across frames.
///
/// `rotation` and `scale` are the UI-editable values; the accumulated
/// orientation quaternion is the authoritative rotation state.
#[derive(Debug, Clone)]
pub struct ModelTransform {
    /// Slider values in degrees (pitch X, yaw Y, roll Z).
    pub rotation: Vec3,
    /// Per-axis model scale.
    pub scale: Vec3,
    /// Slider values captured at the end of the previous frame.
    rotation_prev: Vec3,
    /// Accumulated unit orientation quaternion.
    orientation: Quat,
}

impl ModelTransform {
    /// Identity orientation with zeroed sliders and unit scale.
    pub fn new() -> Self {
        Self {
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation_prev: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }

    /// Apply this frame's slider deltas to the accumulated orientation.
    ///
    /// Composition order is yaw, then pitch, then roll, pre-multiplied onto
    /// the previous orientation. The result is renormalized every frame to
    /// bound floating-point drift.
    pub fn update(&mut self) {
        let delta = self.rotation - self.rotation_prev;

        let q_pitch = Quat::from_rotation_x(delta.x.to_radians());
        let q_yaw = Quat::from_rotation_y(delta.y.to_radians());
        let q_roll = Quat::from_rotation_z(delta.z.to_radians());

        self.orientation = (q_yaw * q_pitch * q_roll * self.orientation).normalize();
        self.rotation_prev = self.rotation;
    }

    /// The accumulated orientation quaternion (unit norm).
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Model matrix: accumulated rotation times scale.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.orientation) * Mat4::from_scale(self.scale)
    }
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self::new()
    }
}
