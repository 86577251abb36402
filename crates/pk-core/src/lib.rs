//! Bordered sample planes for convolution and resampling.
//!
//! ## Planes, Borders and Stride
//! A [`Plane`] owns one contiguous buffer holding `height + 2*border` rows of
//! `stride` samples. `stride` is measured in elements (not bytes), is at least
//! `width + 2*border` and is rounded up to a multiple of [`PLANE_ALIGN`] so
//! that batched kernels can walk whole 4-sample groups along a row.
//!
//! ## Signed Addressing
//! Rows and columns are signed. `(0, 0)` is the first interior sample and
//! every `(row, col)` with `row in [-border, height + border)` and
//! `col in [-border, width + border)` is addressable. Filters rely on this to
//! read neighborhoods near the edge without per-sample bounds logic.
//!
//! ## Boundary Extension
//! The border is populated from the interior by
//! [`Plane::extend_boundary`] using zero padding, zero-order hold or
//! symmetric (reflect-101) extension. Extension always runs top, bottom,
//! then a left/right sweep across every row, so corners are filled by the
//! horizontal pass.

mod border;
mod error;
mod image;
mod plane;
mod sample;

pub use border::{BoundaryExtension, map_index};
pub use error::Error;
pub use image::Image;
pub use plane::{PLANE_ALIGN, Plane};
pub use sample::{Sample, SampleRange};
