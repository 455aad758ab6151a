use glam::Vec3;

use crate::camera::ProjectionConfig;
use crate::controls::ControlsConfig;

/// Initial eye position and look target.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO)
    }
}

/// Everything a stage needs besides its host elements.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StageConfig {
    pub projection: ProjectionConfig,
    pub pose: CameraPose,
    pub controls: ControlsConfig,

    /// Register the frame loop as soon as the stage becomes ready.
    pub autostart: bool,
}

impl StageConfig {
    pub fn perspective(fov_y_deg: f32, near: f32, far: f32) -> Self {
        Self {
            projection: ProjectionConfig::perspective(fov_y_deg, near, far),
            ..Self::default()
        }
    }

    pub fn orthographic(near: f32, far: f32) -> Self {
        Self {
            projection: ProjectionConfig::orthographic(near, far),
            ..Self::default()
        }
    }

    pub fn with_pose(mut self, position: Vec3, target: Vec3) -> Self {
        self.pose = CameraPose::looking_at(position, target);
        self
    }

    pub fn with_controls(mut self, controls: ControlsConfig) -> Self {
        self.controls = controls;
        self
    }

    pub fn with_autostart(mut self, autostart: bool) -> Self {
        self.autostart = autostart;
        self
    }
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionConfig::default(),
            pose: CameraPose::default(),
            controls: ControlsConfig::default(),
            autostart: true,
        }
    }
}
