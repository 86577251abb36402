//! Umbrella crate for the `planekit` workspace.
//!
//! Re-exports the plane model, filters, resamplers, and the BMP adapter so a
//! pipeline can be written against one crate.

pub use pk_bmp::*;
pub use pk_core::*;
pub use pk_filter::*;
pub use pk_resample::*;
