//! Camera controls driven by pointer input.

mod orbit;

pub use orbit::{ControlsConfig, OrbitControls};
