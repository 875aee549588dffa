//! Core types: domain bounds, grid storage and vector alias

pub mod domain;
pub mod scalar_field;
pub mod vec2;

pub use domain::{linspace, Domain};
pub use scalar_field::{CoordinateMesh, ScalarField};
pub use vec2::Vec2;
