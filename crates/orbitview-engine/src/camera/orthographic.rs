use glam::Mat4;

use crate::coords::Viewport;

/// Orthographic box whose extents are one world unit per pixel at zoom `1.0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrthographicProjection {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
    /// Shrinks the visible box around its center; `1.0` is no zoom.
    pub zoom: f32,
}

impl OrthographicProjection {
    /// Returns `None` for a degenerate viewport.
    pub fn fitted(near: f32, far: f32, viewport: Viewport) -> Option<Self> {
        if viewport.is_degenerate() {
            return None;
        }
        let mut p = Self {
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
            near,
            far,
            zoom: 1.0,
        };
        p.fit(viewport);
        Some(p)
    }

    /// Recenters the bounds on the viewport. A degenerate viewport leaves them untouched.
    pub fn fit(&mut self, viewport: Viewport) -> bool {
        if viewport.is_degenerate() {
            return false;
        }
        let (hw, hh) = viewport.half_extents();
        self.left = -hw;
        self.right = hw;
        self.top = hh;
        self.bottom = -hh;
        true
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn matrix(&self) -> Mat4 {
        let zoom = self.zoom.max(f32::EPSILON);
        let cx = (self.right + self.left) * 0.5;
        let cy = (self.top + self.bottom) * 0.5;
        let dx = self.width() / (2.0 * zoom);
        let dy = self.height() / (2.0 * zoom);
        Mat4::orthographic_rh(cx - dx, cx + dx, cy - dy, cy + dy, self.near, self.far)
    }
}
