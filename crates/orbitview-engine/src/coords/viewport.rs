/// Measured size of a container in physical pixels.
///
/// A viewport with a zero dimension is degenerate: it has no aspect ratio and
/// must never reach camera or surface sizing.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub const fn is_degenerate(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height, or `None` for a degenerate viewport.
    #[inline]
    pub fn aspect(self) -> Option<f32> {
        if self.is_degenerate() {
            return None;
        }
        Some(self.width as f32 / self.height as f32)
    }

    /// Half extents `(w / 2, h / 2)` as floats.
    #[inline]
    pub fn half_extents(self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for Viewport {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

impl From<Viewport> for winit::dpi::PhysicalSize<u32> {
    fn from(vp: Viewport) -> Self {
        winit::dpi::PhysicalSize::new(vp.width, vp.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_dimension_is_degenerate() {
        assert!(Viewport::new(0, 0).is_degenerate());
        assert!(Viewport::new(800, 0).is_degenerate());
        assert!(Viewport::new(0, 600).is_degenerate());
        assert!(!Viewport::new(1, 1).is_degenerate());
    }

    #[test]
    fn aspect_is_width_over_height() {
        assert_relative_eq!(Viewport::new(800, 600).aspect().unwrap(), 4.0 / 3.0);
        assert_relative_eq!(Viewport::new(1000, 500).aspect().unwrap(), 2.0);
    }

    #[test]
    fn degenerate_viewport_has_no_aspect() {
        // Never Infinity or NaN.
        assert_eq!(Viewport::new(800, 0).aspect(), None);
        assert_eq!(Viewport::new(0, 0).aspect(), None);
    }

    #[test]
    fn physical_size_round_trip() {
        let vp = Viewport::new(1280, 720);
        let size: winit::dpi::PhysicalSize<u32> = vp.into();
        assert_eq!(Viewport::from(size), vp);
    }
}
