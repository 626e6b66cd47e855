//! CPU skeleton pose pipeline and linear-blend skinning for 3D meshes.
//!
//! This crate is renderer-agnostic: it resolves skeleton poses, samples keyframed
//! animations and deforms mesh vertices in place. Uploading the results is left to
//! the caller (see [`MeshBuffers`] and [`BoneLines`]).

#![forbid(unsafe_code)]

mod error;
mod geometry;
mod math;
mod model;
mod render;
mod runtime;
mod version;

#[cfg(feature = "json")]
pub mod json;

pub use error::*;
pub use math::*;
pub use model::*;
pub use render::*;
pub use runtime::*;
pub use version::*;

#[cfg(test)]
mod math_tests;

#[cfg(test)]
mod geometry_tests;
