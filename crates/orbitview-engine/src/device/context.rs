use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::window::Window;

use crate::coords::Viewport;

use super::surface;
use super::{GpuFrame, GpuInit, SurfaceErrorAction};

/// wgpu core objects plus the surface bound to one window.
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    /// `false` until the window first reports a non-zero size.
    configured: bool,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context for `window`.
    ///
    /// A zero-sized window is accepted; the surface stays unconfigured until
    /// [`resize`](Self::resize) receives a real size.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let GpuInit {
            prefer_srgb,
            present_mode,
            alpha_mode,
            power_preference,
            required_features,
            required_limits,
            desired_maximum_frame_latency,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("orbitview device"),
                required_features,
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps, prefer_srgb).context("no supported surface formats")?;

        let size = window.inner_size();
        let mut config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: 1,
            height: 1,
            present_mode,
            alpha_mode: surface::choose_alpha_mode(&caps, alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        let configured = surface::resize_config(&mut config, Viewport::from(size));
        if configured {
            surface.configure(&device, &config);
        }

        let info = adapter.get_info();
        log::info!("gpu: {} ({:?}), surface {:?}", info.name, info.backend, format);

        Ok(Self {
            surface,
            adapter,
            device,
            queue,
            config,
            configured,
        })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Size of the configured swapchain. Meaningless while unconfigured.
    pub fn size(&self) -> Viewport {
        Viewport::new(self.config.width, self.config.height)
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the swapchain. Degenerate sizes are ignored.
    pub fn resize(&mut self, viewport: Viewport) {
        if !surface::resize_config(&mut self.config, viewport) {
            return;
        }
        self.surface.configure(&self.device, &self.config);
        self.configured = true;
    }

    /// Acquires the next swapchain image and creates an encoder.
    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("orbitview frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the frame's commands and presents it.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    /// Recovers from `err` where possible and says what to do with the current frame.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        let action = surface::classify_surface_error(&err);
        match action {
            SurfaceErrorAction::Reconfigured if self.configured => {
                self.surface.configure(&self.device, &self.config);
            }
            SurfaceErrorAction::Fatal => log::error!("surface error: {err}"),
            _ => log::warn!("surface error: {err}"),
        }
        action
    }
}
