//! folio-transform - Geometric transformations for folio
//!
//! This crate provides the orthogonal operations used by the layout
//! engine:
//!
//! - Orthogonal rotations (90, 180, 270 degrees)
//! - Horizontal and vertical flips
//!
//! The column pass of the boundary scanner reuses the row-pass logic on a
//! rotated copy of the band instead of carrying a second scan loop.

mod error;
pub mod rotate;

pub use error::{TransformError, TransformResult};
pub use rotate::{flip_lr, flip_tb, rotate_90, rotate_180, rotate_orth};
