//! Coordinate mapping for a plot-image data picker.
//!
//! Digitizing a plotted curve starts from three user-picked reference
//! points, each pairing a pixel position on the image with the data
//! coordinate it represents. This crate:
//! - linearizes those reference points under the plot's axis mapping
//!   (linear, logarithmic, polar, ternary),
//! - solves for the rotation + anisotropic-scale map between pixel space
//!   and the linearized plane,
//! - projects picked pixels back into data coordinates, folding the axis
//!   mapping's nonlinearity back in.

/// Calibration data types.
pub mod calibration;
/// Linear algebra type aliases.
pub mod math;
/// The scene-to-logical transform engine.
pub mod transform;

pub use calibration::*;
pub use math::*;
pub use transform::*;
