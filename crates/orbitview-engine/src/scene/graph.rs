use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::coords::ColorRgba;

use super::{Geometry, Material, SceneObject, Transform};

/// Index of an object inside its [`Scene`]. Stable for the scene's lifetime.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ObjectId(pub(crate) usize);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Single light shining along `direction`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub color: ColorRgba,
    pub intensity: f32,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, color: ColorRgba, intensity: f32) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            color,
            intensity,
        }
    }
}

/// Append-only list of objects plus global lighting.
///
/// Without a light, Lambert surfaces only receive `ambient`, which defaults to
/// black.
#[derive(Debug, Clone)]
pub struct Scene {
    objects: Vec<SceneObject>,
    pub background: ColorRgba,
    pub ambient: ColorRgba,
    pub light: Option<DirectionalLight>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            background: ColorRgba::black(),
            ambient: ColorRgba::black(),
            light: None,
        }
    }

    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId(self.objects.len());
        log::trace!("scene add #{} '{}'", id.0, object.name);
        self.objects.push(object);
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter().enumerate().map(|(i, o)| (ObjectId(i), o))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    // ── stock primitives ──────────────────────────────────────────────────

    /// Axes of length `axes_size` and a `grid_size` grid with `divisions` cells per side.
    pub fn add_helpers(&mut self, axes_size: f32, grid_size: f32, divisions: u32) -> (ObjectId, ObjectId) {
        let axes = self.add(SceneObject::new("axes", Geometry::axes(axes_size), Material::vertex_colors()));
        let grid = self.add(SceneObject::new(
            "grid",
            Geometry::grid(
                grid_size,
                divisions,
                ColorRgba::from_hex(0x444444),
                ColorRgba::from_hex(0x888888),
            ),
            Material::vertex_colors(),
        ));
        (axes, grid)
    }

    /// Green unit cube at the origin.
    pub fn add_box(&mut self) -> ObjectId {
        self.add(SceneObject::new(
            "box",
            Geometry::cuboid(1.0, 1.0, 1.0),
            Material::basic(ColorRgba::from_hex(0x00ff00)),
        ))
    }

    /// White Lambert sphere of radius 1 floating at `(0, 2, 0)`.
    pub fn add_sphere(&mut self) -> ObjectId {
        self.add(
            SceneObject::new(
                "sphere",
                Geometry::sphere(1.0, 50, 50),
                Material::lambert(ColorRgba::white()).with_wireframe(false),
            )
            .with_transform(Transform::from_position(Vec3::new(0.0, 2.0, 0.0))),
        )
    }

    /// Double-sided white square of side `size`, laid flat on the XZ plane.
    pub fn add_plane(&mut self, size: f32) -> ObjectId {
        self.add(
            SceneObject::new(
                "plane",
                Geometry::plane(size, size),
                Material::basic(ColorRgba::white()).double_sided(),
            )
            .with_transform(Transform::from_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0))),
        )
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
