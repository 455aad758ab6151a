use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::camera::{Camera, Projection};
use crate::coords::Viewport;
use crate::input::{InputFrame, InputState, MouseButton};

/// Keeps the camera off the poles where the look-at basis degenerates.
const POLAR_EPS: f32 = 1e-6;

/// Orbit behavior switches and limits.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ControlsConfig {
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,

    /// Allowed camera zoom for orthographic projections, `(min, max)`.
    pub zoom_range: (f32, f32),

    /// Allowed eye-to-target distance for perspective projections, `(min, max)`.
    pub distance_range: (f32, f32),

    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl ControlsConfig {
    pub fn with_rotate(mut self, enable: bool) -> Self {
        self.enable_rotate = enable;
        self
    }

    pub fn with_zoom_range(mut self, min: f32, max: f32) -> Self {
        debug_assert!(min <= max);
        self.zoom_range = (min, max);
        self
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
            zoom_range: (0.0, f32::INFINITY),
            distance_range: (0.0, f32::INFINITY),
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
        }
    }
}

/// Orbits the camera around its target on a sphere.
///
/// Input is accumulated with [`handle_input`](Self::handle_input) and applied to the camera
/// by [`update`](Self::update).
#[derive(Debug, Clone)]
pub struct OrbitControls {
    config: ControlsConfig,

    /// Pending azimuth change in radians.
    rotate_left: f32,
    /// Pending polar change in radians.
    rotate_up: f32,
    /// Pending distance multiplier (< 1 moves closer).
    dolly: f32,
    /// Pending pan in pixels.
    pan: Vec2,
}

impl OrbitControls {
    pub fn new(config: ControlsConfig) -> Self {
        Self {
            config,
            rotate_left: 0.0,
            rotate_up: 0.0,
            dolly: 1.0,
            pan: Vec2::ZERO,
        }
    }

    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }

    /// Left drag rotates, right or middle drag pans, wheel zooms.
    pub fn handle_input(&mut self, state: &InputState, frame: &InputFrame, viewport: Viewport) {
        if viewport.is_degenerate() {
            return;
        }

        let delta = Vec2::new(frame.pointer_delta.0, frame.pointer_delta.1);

        if state.button_down(MouseButton::Left) {
            // A drag across the full height is one full turn.
            let per_px = TAU / viewport.height as f32;
            self.rotate_by(delta.x * per_px, delta.y * per_px);
        } else if state.button_down(MouseButton::Right) || state.button_down(MouseButton::Middle) {
            self.pan_by(delta);
        }

        if frame.wheel_lines != 0.0 {
            self.zoom_by(frame.wheel_lines);
        }
    }

    pub fn rotate_by(&mut self, left: f32, up: f32) {
        if !self.config.enable_rotate {
            return;
        }
        self.rotate_left += left * self.config.rotate_speed;
        self.rotate_up += up * self.config.rotate_speed;
    }

    /// Positive `steps` zoom in.
    pub fn zoom_by(&mut self, steps: f32) {
        if !self.config.enable_zoom {
            return;
        }
        self.dolly *= 0.95f32.powf(self.config.zoom_speed * steps);
    }

    pub fn pan_by(&mut self, pixels: Vec2) {
        if !self.config.enable_pan {
            return;
        }
        self.pan += pixels * self.config.pan_speed;
    }

    /// Applies pending input to `camera`. Returns whether the pose or zoom changed.
    pub fn update(&mut self, camera: &mut Camera, viewport: Viewport) -> bool {
        let before = (camera.position, camera.target, camera.zoom());

        let mut offset = camera.position - camera.target;
        let mut radius = offset.length();
        let (mut theta, mut phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI * 0.5)
        };

        let (dmin, dmax) = self.config.distance_range;
        let (zmin, zmax) = self.config.zoom_range;

        // Nothing pending and nothing out of range: leave the pose bit-identical.
        let idle = self.rotate_left == 0.0
            && self.rotate_up == 0.0
            && self.dolly == 1.0
            && self.pan == Vec2::ZERO;
        let in_limits = (POLAR_EPS..=PI - POLAR_EPS).contains(&phi)
            && match &camera.projection {
                Projection::Perspective(_) => (dmin..=dmax).contains(&radius),
                Projection::Orthographic(o) => (zmin..=zmax).contains(&o.zoom),
            };
        if idle && in_limits {
            return false;
        }

        theta -= self.rotate_left;
        phi = (phi - self.rotate_up).clamp(POLAR_EPS, PI - POLAR_EPS);

        match &mut camera.projection {
            Projection::Perspective(_) => {
                radius = (radius * self.dolly).clamp(dmin, dmax);
            }
            Projection::Orthographic(o) => {
                o.zoom = (o.zoom / self.dolly).clamp(zmin, zmax);
            }
        }

        let pan = self.pan_world(camera, viewport, radius);
        camera.target += pan;

        offset = Vec3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        camera.position = camera.target + offset;

        self.rotate_left = 0.0;
        self.rotate_up = 0.0;
        self.dolly = 1.0;
        self.pan = Vec2::ZERO;

        let after = (camera.position, camera.target, camera.zoom());
        let tolerance = 1e-6 * (1.0 + radius);
        let changed = !before.0.abs_diff_eq(after.0, tolerance)
            || !before.1.abs_diff_eq(after.1, tolerance)
            || (before.2 - after.2).abs() > f32::EPSILON;

        if changed && matches!(camera.projection, Projection::Orthographic(_)) {
            log::debug!("orthographic zoom {}", camera.zoom());
        }

        changed
    }

    /// Converts the pending pixel pan into a world-space target offset.
    fn pan_world(&self, camera: &Camera, viewport: Viewport, radius: f32) -> Vec3 {
        if self.pan == Vec2::ZERO || viewport.is_degenerate() {
            return Vec3::ZERO;
        }

        let view = camera.view_matrix();
        let right = view.row(0).truncate();
        let up = view.row(1).truncate();

        let (sx, sy) = match &camera.projection {
            Projection::Perspective(p) => {
                let visible_h = 2.0 * radius * (p.effective_fov_y() * 0.5).tan();
                let per_px = visible_h / viewport.height as f32;
                (per_px, per_px)
            }
            Projection::Orthographic(o) => (
                o.width() / o.zoom / viewport.width as f32,
                o.height() / o.zoom / viewport.height as f32,
            ),
        };

        // Dragging right moves the scene right, so the target moves left.
        -right * self.pan.x * sx + up * self.pan.y * sy
    }
}
