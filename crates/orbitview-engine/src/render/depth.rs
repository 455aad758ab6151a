use crate::coords::Viewport;

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Depth buffer kept at the swapchain size.
#[derive(Default)]
pub struct DepthTarget {
    current: Option<(Viewport, wgpu::TextureView)>,
}

impl DepthTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of exactly `size`, reallocating when the size changed.
    pub fn ensure(&mut self, device: &wgpu::Device, size: Viewport) -> Option<&wgpu::TextureView> {
        if size.is_degenerate() {
            return None;
        }

        let stale = !matches!(&self.current, Some((s, _)) if *s == size);
        if stale {
            let texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("orbitview depth"),
                size: wgpu::Extent3d {
                    width: size.width,
                    height: size.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });
            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            log::trace!("depth target {}x{}", size.width, size.height);
            self.current = Some((size, view));
        }

        self.current.as_ref().map(|(_, view)| view)
    }

    /// Frees the texture; the next `ensure` reallocates.
    pub fn release(&mut self) {
        self.current = None;
    }

    pub fn size(&self) -> Option<Viewport> {
        self.current.as_ref().map(|(size, _)| *size)
    }
}
