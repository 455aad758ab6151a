use glam::{Mat4, Vec3};

use crate::coords::Viewport;

use super::{OrthographicProjection, PerspectiveProjection};

/// Projection settings independent of any viewport.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ProjectionConfig {
    Perspective { fov_y_deg: f32, near: f32, far: f32 },
    Orthographic { near: f32, far: f32 },
}

impl ProjectionConfig {
    pub const fn perspective(fov_y_deg: f32, near: f32, far: f32) -> Self {
        Self::Perspective { fov_y_deg, near, far }
    }

    pub const fn orthographic(near: f32, far: f32) -> Self {
        Self::Orthographic { near, far }
    }

    pub fn is_orthographic(&self) -> bool {
        matches!(self, Self::Orthographic { .. })
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self::perspective(75.0, 0.1, 1000.0)
    }
}

/// Projection fitted to a concrete viewport.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Projection {
    Perspective(PerspectiveProjection),
    Orthographic(OrthographicProjection),
}

impl Projection {
    pub fn matrix(&self) -> Mat4 {
        match self {
            Self::Perspective(p) => p.matrix(),
            Self::Orthographic(o) => o.matrix(),
        }
    }

    pub fn zoom(&self) -> f32 {
        match self {
            Self::Perspective(p) => p.zoom,
            Self::Orthographic(o) => o.zoom,
        }
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        match self {
            Self::Perspective(p) => p.zoom = zoom,
            Self::Orthographic(o) => o.zoom = zoom,
        }
    }
}

/// A fitted projection plus a look-at pose.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub projection: Projection,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Camera {
    /// Builds a camera matching `viewport`, or `None` when the viewport is degenerate.
    pub fn for_viewport(config: ProjectionConfig, viewport: Viewport) -> Option<Self> {
        let projection = match config {
            ProjectionConfig::Perspective { fov_y_deg, near, far } => {
                Projection::Perspective(PerspectiveProjection::fitted(fov_y_deg, near, far, viewport)?)
            }
            ProjectionConfig::Orthographic { near, far } => {
                Projection::Orthographic(OrthographicProjection::fitted(near, far, viewport)?)
            }
        };

        Some(Self {
            projection,
            position: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        })
    }

    /// Refits aspect or bounds to `viewport`.
    ///
    /// Returns `false` and leaves the projection untouched for a degenerate viewport.
    pub fn fit_viewport(&mut self, viewport: Viewport) -> bool {
        match &mut self.projection {
            Projection::Perspective(p) => p.fit(viewport),
            Projection::Orthographic(o) => o.fit(viewport),
        }
    }

    pub fn look_at(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
    }

    pub fn aspect(&self) -> Option<f32> {
        match &self.projection {
            Projection::Perspective(p) => Some(p.aspect),
            Projection::Orthographic(_) => None,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.projection.zoom()
    }

    pub fn view_matrix(&self) -> Mat4 {
        let forward = (self.target - self.position).normalize_or_zero();

        // Looking straight along `up` leaves the basis undefined; fall back to -Z.
        let up = if forward.cross(self.up).length_squared() < 1e-12 {
            Vec3::NEG_Z
        } else {
            self.up
        };

        Mat4::look_at_rh(self.position, self.target, up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection.matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perspective_800x600() {
        let cam = Camera::for_viewport(ProjectionConfig::perspective(75.0, 0.001, 1000.0), Viewport::new(800, 600))
            .unwrap();
        assert_relative_eq!(cam.aspect().unwrap(), 800.0 / 600.0);
    }

    #[test]
    fn degenerate_viewport_builds_nothing() {
        let cfg = ProjectionConfig::perspective(75.0, 0.1, 100.0);
        assert!(Camera::for_viewport(cfg, Viewport::new(0, 0)).is_none());
        assert!(Camera::for_viewport(ProjectionConfig::orthographic(0.1, 10.0), Viewport::new(10, 0)).is_none());
    }

    #[test]
    fn refit_keeps_aspect_in_sync() {
        let mut cam = Camera::for_viewport(ProjectionConfig::default(), Viewport::new(800, 600)).unwrap();
        for (w, h) in [(400, 300), (1920, 1080), (1, 1000), (333, 7)] {
            assert!(cam.fit_viewport(Viewport::new(w, h)));
            assert_relative_eq!(cam.aspect().unwrap(), w as f32 / h as f32);
        }
    }

    #[test]
    fn orthographic_refit_tracks_extent() {
        let mut cam = Camera::for_viewport(ProjectionConfig::orthographic(0.1, 10.0), Viewport::new(1000, 500)).unwrap();
        cam.fit_viewport(Viewport::new(640, 480));
        let Projection::Orthographic(o) = cam.projection else { panic!("expected orthographic") };
        assert_eq!(o.width(), 640.0);
        assert_eq!(o.height(), 480.0);
    }

    #[test]
    fn top_down_view_matrix_is_finite() {
        let mut cam = Camera::for_viewport(ProjectionConfig::orthographic(0.1, 4000.0), Viewport::new(100, 100)).unwrap();
        cam.look_at(Vec3::new(0.0, 2000.0, 0.0), Vec3::ZERO);
        assert!(cam.view_matrix().is_finite());
    }
}
