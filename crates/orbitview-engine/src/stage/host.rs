use crate::camera::Camera;
use crate::coords::Viewport;
use crate::scene::Scene;

/// Host element whose laid-out size drives the viewport.
pub trait Container {
    /// Current measured size in physical pixels. Re-read on every call.
    fn measure(&self) -> Viewport;
}

/// Result of presenting one frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawOutcome {
    Presented,
    /// Transient failure; the next frame may succeed.
    Skipped,
    /// The surface cannot present anymore.
    Fatal,
}

/// Drawing surface bound to a graphics context.
///
/// Sizing calls arrive in a fixed order on resize: `release_display_size`,
/// then the container is measured, then `set_size`, then `draw`.
pub trait DrawSurface {
    /// Drops any size the surface imposes on its container's layout.
    ///
    /// Drawing after a release without a following `set_size` must still work
    /// at the last applied size.
    fn release_display_size(&mut self);

    /// Resizes the drawable to exactly `viewport`. Never called with a zero dimension.
    fn set_size(&mut self, viewport: Viewport);

    /// Size applied by the last `set_size`.
    fn size(&self) -> Viewport;

    fn draw(&mut self, scene: &Scene, camera: &Camera) -> DrawOutcome;
}
