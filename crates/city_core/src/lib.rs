//! Core city types shared across the workspace.
//!
//! This crate provides the foundational types used by the generator and the app:
//! - Footprints and the axis-aligned overlap test
//! - Building placements and their categories
//! - Colors and GPU instance records

pub mod color;
pub mod footprint;
pub mod placement;

pub use color::*;
pub use footprint::*;
pub use placement::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
