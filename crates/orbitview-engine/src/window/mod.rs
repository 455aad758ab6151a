//! winit event loop driving one window and its stage.

mod host;
mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
