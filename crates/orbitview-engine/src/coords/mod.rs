//! Pixel-space and color types shared by the stage, camera and renderer.
//!
//! Pixel space:
//! - Physical pixels of the drawing surface
//! - Origin top-left
//! - +X right, +Y down
//!
//! World space is handled with `glam` types directly.

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
