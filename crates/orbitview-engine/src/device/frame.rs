/// One acquired swapchain image and the encoder recording into it.
///
/// Hand it back to [`Gpu::submit`](super::Gpu::submit) promptly; holding the texture
/// blocks acquisition of the next one.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
