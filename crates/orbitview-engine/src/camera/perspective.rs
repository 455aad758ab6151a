use glam::Mat4;

use crate::coords::Viewport;

/// Perspective frustum parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveProjection {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Width over height of the viewport this projection was fitted to.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Narrows the effective field of view; `1.0` is no zoom.
    pub zoom: f32,
}

impl PerspectiveProjection {
    /// Returns `None` for a degenerate viewport.
    pub fn fitted(fov_y_deg: f32, near: f32, far: f32, viewport: Viewport) -> Option<Self> {
        Some(Self {
            fov_y_deg,
            aspect: viewport.aspect()?,
            near,
            far,
            zoom: 1.0,
        })
    }

    /// Refits the aspect ratio. A degenerate viewport leaves the projection untouched.
    pub fn fit(&mut self, viewport: Viewport) -> bool {
        match viewport.aspect() {
            Some(aspect) => {
                self.aspect = aspect;
                true
            }
            None => false,
        }
    }

    /// Field of view after zoom, in radians.
    pub fn effective_fov_y(&self) -> f32 {
        let half = (self.fov_y_deg.to_radians() * 0.5).tan() / self.zoom.max(f32::EPSILON);
        2.0 * half.atan()
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.effective_fov_y(), self.aspect, self.near, self.far)
    }
}
