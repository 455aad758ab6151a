use std::borrow::Cow;

use glam::{EulerRot, Mat4, Quat, Vec3};

use super::{Geometry, Material};

/// Translation, XYZ Euler rotation (radians) and scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    pub fn from_rotation(rotation: Vec3) -> Self {
        Self { rotation, ..Self::IDENTITY }
    }

    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, q, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One drawable entry of the scene.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub geometry: Geometry,
    pub material: Material,
    pub transform: Transform,
    pub visible: bool,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, geometry: Geometry, material: Material) -> Self {
        Self {
            name: name.into(),
            geometry,
            material,
            transform: Transform::IDENTITY,
            visible: true,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Geometry as it should reach the GPU, with wireframe conversion applied.
    pub fn render_geometry(&self) -> Cow<'_, Geometry> {
        if self.material.wireframe {
            Cow::Owned(self.geometry.wireframe())
        } else {
            Cow::Borrowed(&self.geometry)
        }
    }
}
