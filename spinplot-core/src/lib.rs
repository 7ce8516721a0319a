//! Core data structures and projection math for spinplot
//!
//! This crate provides the fundamental types for the 3D chart projector:
//! samples, dataset snapshots, the scene-to-screen projection, and the
//! shared error type.

pub mod error;
pub mod projection;
pub mod sample;

pub use error::*;
pub use projection::*;
pub use sample::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point2, Point3, Vector3};

/// Common result type for spinplot operations
pub type Result<T> = std::result::Result<T, Error>;
