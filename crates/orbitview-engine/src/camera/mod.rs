//! Cameras whose projection is derived from the current viewport.
//!
//! Aspect (perspective) and bounds (orthographic) are only ever written from a
//! non-degenerate [`Viewport`](crate::coords::Viewport); user zoom is kept
//! separate so the viewport-derived fields stay an exact function of the size.

mod orthographic;
mod perspective;
mod rig;

pub use orthographic::OrthographicProjection;
pub use perspective::PerspectiveProjection;
pub use rig::{Camera, Projection, ProjectionConfig};
