//! orbitview engine.
//!
//! A small 3D viewer core: a [`scene::Scene`] of stock primitives, a
//! [`stage::Stage`] that keeps the camera projection and drawing surface sized to
//! their container, orbit controls, and a wgpu + winit runtime hosting it all in a
//! native window.

pub mod camera;
pub mod controls;
pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod scene;
pub mod stage;
pub mod time;
pub mod window;
