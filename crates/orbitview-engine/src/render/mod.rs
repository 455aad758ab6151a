//! wgpu scene rendering.
//!
//! [`GpuSurface`] is the window-backed [`DrawSurface`](crate::stage::DrawSurface):
//! it owns the [`Gpu`](crate::device::Gpu) context, a depth buffer and the
//! [`SceneRenderer`], which draws every object with one of three pipelines
//! sharing `shaders/scene.wgsl`.
//!
//! Conventions: right-handed world, +Y up, counter-clockwise front faces,
//! depth cleared to 1.0 with `Less` comparison.

mod ctx;
mod depth;
mod scene_renderer;
mod surface;
mod uniforms;

pub use ctx::{RenderCtx, RenderTarget};
pub use depth::DepthTarget;
pub use scene_renderer::SceneRenderer;
pub use surface::GpuSurface;
