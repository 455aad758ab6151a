//! Flat, append-only scene description.
//!
//! Objects are pushed once during setup and addressed by [`ObjectId`]. The
//! renderer uploads geometry on first sight and only refreshes transforms and
//! material uniforms afterwards.

mod geometry;
mod graph;
mod material;
mod object;

pub use geometry::{Geometry, Topology, Vertex};
pub use graph::{DirectionalLight, Scene, ObjectId};
pub use material::{Material, Shading, Side};
pub use object::{SceneObject, Transform};
