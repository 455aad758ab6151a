use crate::coords::ColorRgba;

/// Lighting model applied in the fragment stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Shading {
    /// Flat color, ignores lights.
    Basic,
    /// Diffuse term against the scene's ambient and directional light.
    Lambert,
}

/// Which triangle faces are rasterized.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Side {
    Front,
    Double,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub color: ColorRgba,
    pub shading: Shading,
    pub side: Side,
    /// Draws triangle edges as lines instead of filled faces.
    pub wireframe: bool,
}

impl Material {
    pub fn basic(color: ColorRgba) -> Self {
        Self {
            color,
            shading: Shading::Basic,
            side: Side::Front,
            wireframe: false,
        }
    }

    pub fn lambert(color: ColorRgba) -> Self {
        Self {
            shading: Shading::Lambert,
            ..Self::basic(color)
        }
    }

    /// Unlit white; per-vertex colors pass through unchanged.
    pub fn vertex_colors() -> Self {
        Self::basic(ColorRgba::white())
    }

    pub fn double_sided(mut self) -> Self {
        self.side = Side::Double;
        self
    }

    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::basic(ColorRgba::white())
    }
}
