//! wgpu device and window surface.
//!
//! [`Gpu`] owns the adapter, device, queue and the configured surface. It tolerates a
//! zero-sized window by leaving the surface unconfigured until the first real size.

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
