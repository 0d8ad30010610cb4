//! Synthetic surfaces used to visualise the roughness being simulated.
//!
//! Two kinds of surfaces are produced from the arithmetic mean roughness Ra:
//!
//! + [`SurfaceProfile`]: a correlated 1-D height sequence (a profilometer
//!   trace along the plane of incidence).
//! + [`HeightField`]: a smoothed 2-D grid of heights, suitable for building
//!   a mesh.
//!
//! Both are regenerated from scratch on every call. The generators take the
//! random source as a parameter so that callers needing reproducible output
//! can pass a seeded generator.
#![warn(missing_docs)]

mod field;
mod profile;

pub use field::*;
pub use profile::*;
