//! Viewport sizing and render loop.
//!
//! A [`Stage`] binds a scene to a drawing surface sized by its container. It
//! keeps the camera projection and the surface size in lockstep with the
//! container's measured size and drives one redraw per registered frame tick.
//!
//! Lifecycle:
//! - `Unattached`: scene construction only
//! - `Pending`: surface attached, container measured zero; sizing deferred
//! - `Ready`: camera, controls and a sized surface exist; frames draw
//! - `Detached`: loop deregistered, surface handed back

mod config;
mod error;
mod host;
mod stage;

pub use config::{CameraPose, StageConfig};
pub use error::{Element, StageError, StageResult};
pub use host::{Container, DrawOutcome, DrawSurface};
pub use stage::{Phase, Stage, TickOutcome};
