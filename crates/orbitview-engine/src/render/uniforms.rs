//! Uniform blocks shared with `shaders/scene.wgsl`.

use bytemuck::{Pod, Zeroable};

use crate::camera::Camera;
use crate::scene::{Scene, SceneObject, Shading};

/// Group 0. Per frame (112 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// xyz: direction the light travels.
    pub light_dir: [f32; 4],
    /// rgb premultiplied by intensity; zero without a light.
    pub light_color: [f32; 4],
    pub ambient: [f32; 4],
}

impl CameraUniform {
    pub fn new(scene: &Scene, camera: &Camera) -> Self {
        let (light_dir, light_color) = match scene.light {
            Some(light) => {
                let [r, g, b] = light.color.rgb();
                let i = light.intensity;
                (light.direction.extend(0.0).to_array(), [r * i, g * i, b * i, 1.0])
            }
            None => ([0.0, -1.0, 0.0, 0.0], [0.0; 4]),
        };

        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            light_dir,
            light_color,
            ambient: scene.ambient.to_array(),
        }
    }
}

/// Group 1. Per object (96 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// x: 1.0 for Lambert shading.
    pub flags: [f32; 4],
}

impl ObjectUniform {
    pub fn new(object: &SceneObject) -> Self {
        let lambert = match object.material.shading {
            Shading::Basic => 0.0,
            Shading::Lambert => 1.0,
        };
        Self {
            model: object.transform.matrix().to_cols_array_2d(),
            color: object.material.color.to_array(),
            flags: [lambert, 0.0, 0.0, 0.0],
        }
    }
}
