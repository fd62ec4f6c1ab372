//! Camera session state for the demo.
//!
//! Camera behavior is selected through a closed [`CameraMode`] enum, and
//! switching modes runs an explicit reinitialization transition back to
//! the initial pose.

use glam::Vec3;

/// Initial camera position used at start-up and on mode reinitialization.
pub const INITIAL_CAMERA_POS: Vec3 = Vec3::new(0.0, 1.0, -1.5);

/// Initial camera angles (pitch/yaw/roll, degrees).
pub const INITIAL_CAMERA_ANGLES: Vec3 = Vec3::new(-18.5, 180.0, 0.0);

/// Camera behavior selected in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Keyboard/mouse driven first-person camera (input handled by the
    /// windowing collaborator).
    #[default]
    FirstPerson,
    /// Camera that eases toward a UI-edited target pose.
    MoveTo,
}

/// Positioner that eases position and angles toward desired values.
#[derive(Debug, Clone)]
pub struct MoveToPositioner {
    position: Vec3,
    /// Pitch/yaw/roll in degrees.
    angles: Vec3,
    desired_position: Vec3,
    desired_angles: Vec3,
    /// Damping coefficient, in 1/seconds. Higher converges faster.
    pub damping: f32,
}

impl MoveToPositioner {
    pub fn new(position: Vec3, angles: Vec3) -> Self {
        Self {
            position,
            angles,
            desired_position: position,
            desired_angles: angles,
            damping: 10.0,
        }
    }

    /// Set the pose the positioner eases toward.
    pub fn set_desired_position(&mut self, position: Vec3) {
        self.desired_position = position;
    }

    /// Set the angles (degrees) the positioner eases toward.
    pub fn set_desired_angles(&mut self, angles: Vec3) {
        self.desired_angles = angles;
    }

    /// Current eased position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current eased angles (degrees).
    pub fn angles(&self) -> Vec3 {
        self.angles
    }

    /// Advance the easing by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let t = (self.damping * dt).min(1.0);

        self.position += (self.desired_position - self.position) * t;

        // Angles ease along the shortest arc, so a 350 -> 0 degree edit
        // moves 10 degrees forward instead of 350 backward.
        let d = self.desired_angles - self.angles;
        let delta = Vec3::new(wrap_angle_deg(d.x), wrap_angle_deg(d.y), wrap_angle_deg(d.z));
        self.angles += delta * t;
    }
}

/// Wrap a degree delta into (-180, 180].
fn wrap_angle_deg(a: f32) -> f32 {
    let a = a.rem_euclid(360.0);
    if a > 180.0 {
        a - 360.0
    } else {
        a
    }
}

/// Per-session camera state shared across frames.
#[derive(Debug, Clone)]
pub struct CameraState {
    mode: CameraMode,
    positioner: MoveToPositioner,
}

impl CameraState {
    /// Camera at the initial demo pose, in first-person mode.
    pub fn new() -> Self {
        Self {
            mode: CameraMode::default(),
            positioner: MoveToPositioner::new(INITIAL_CAMERA_POS, INITIAL_CAMERA_ANGLES),
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Switch camera mode, reinitializing the pose.
    ///
    /// Selecting the already-active mode is a no-op; an actual switch
    /// resets position, angles, and the desired pose to the initial
    /// constants.
    pub fn set_mode(&mut self, mode: CameraMode) {
        if mode == self.mode {
            return;
        }
        log::info!("camera mode switched to {mode:?}");
        self.mode = mode;
        self.positioner = MoveToPositioner::new(INITIAL_CAMERA_POS, INITIAL_CAMERA_ANGLES);
    }

    /// The move-to positioner (desired-pose edits go through this).
    pub fn positioner_mut(&mut self) -> &mut MoveToPositioner {
        &mut self.positioner
    }

    pub fn position(&self) -> Vec3 {
        self.positioner.position()
    }

    /// Pitch/yaw/roll in degrees.
    pub fn angles(&self) -> Vec3 {
        self.positioner.angles()
    }

    /// Per-frame update. Only the move-to mode runs the easing; the
    /// first-person mode is driven by the input collaborator.
    pub fn update(&mut self, dt: f32) {
        if self.mode == CameraMode::MoveTo {
            self.positioner.update(dt);
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new()
    }
}
