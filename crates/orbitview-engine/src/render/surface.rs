use anyhow::Result;
use winit::window::Window;

use crate::camera::Camera;
use crate::coords::Viewport;
use crate::device::{Gpu, GpuInit};
use crate::render::{DepthTarget, RenderCtx, RenderTarget, SceneRenderer};
use crate::scene::Scene;
use crate::stage::{DrawOutcome, DrawSurface};

/// Window-backed drawing surface: swapchain, depth buffer and scene renderer.
pub struct GpuSurface<'w> {
    window: &'w Window,
    gpu: Gpu<'w>,
    depth: DepthTarget,
    renderer: SceneRenderer,
}

impl<'w> GpuSurface<'w> {
    /// Blocks on adapter and device acquisition.
    pub fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let gpu = pollster::block_on(Gpu::new(window, init))?;
        Ok(Self {
            window,
            gpu,
            depth: DepthTarget::new(),
            renderer: SceneRenderer::new(),
        })
    }

    pub fn gpu(&self) -> &Gpu<'w> {
        &self.gpu
    }

    pub fn renderer(&self) -> &SceneRenderer {
        &self.renderer
    }
}

impl DrawSurface for GpuSurface<'_> {
    /// The window owns its own layout; only the size-bound depth buffer is dropped.
    fn release_display_size(&mut self) {
        self.depth.release();
    }

    fn set_size(&mut self, viewport: Viewport) {
        self.gpu.resize(viewport);
    }

    fn size(&self) -> Viewport {
        self.gpu.size()
    }

    fn draw(&mut self, scene: &Scene, camera: &Camera) -> DrawOutcome {
        if !self.gpu.is_configured() {
            return DrawOutcome::Skipped;
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => return self.gpu.handle_surface_error(err).into(),
        };

        let size = self.gpu.size();
        let Some(depth_view) = self.depth.ensure(self.gpu.device(), size) else {
            return DrawOutcome::Skipped;
        };

        let ctx = RenderCtx::new(self.gpu.device(), self.gpu.queue(), self.gpu.surface_format(), size);
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view, depth_view);
            self.renderer.render(&ctx, &mut target, scene, camera);
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);

        DrawOutcome::Presented
    }
}
