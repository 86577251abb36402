//! Integer-factor upscaling of bordered planes.
//!
//! Output sample `(x, y)` maps back to input position `(x / scale, y / scale)`,
//! so output samples at multiples of `scale` land exactly on input samples.
//! Outputs must be exactly `scale` times the input extent on both axes.
//!
//! - [`upscale_bilinear`] blends the four surrounding input samples. The
//!   right/bottom neighbour is clamped to the last addressable column/row, so
//!   any border (including none) works; extend the boundary first to control
//!   what the last row and column blend towards.
//! - [`upscale_sinc`] applies a Hann-windowed sinc of half-width `H`
//!   vertically, then horizontally, normalizing by the weights used. The input
//!   border must be at least `H`.

mod bilinear;
mod sinc;

use pk_core::{Plane, Sample};

pub use bilinear::upscale_bilinear;
pub use sinc::{hann_sinc, upscale_sinc};

/// Output extent for an integer upscale.
#[inline]
pub fn upscaled_dims(width: usize, height: usize, scale: usize) -> (usize, usize) {
    (width * scale, height * scale)
}

pub(crate) fn assert_upscaled<T: Sample, U: Sample>(input: &Plane<T>, out: &Plane<U>, scale: usize) {
    assert!(scale > 0, "scale must be positive");
    let expected = upscaled_dims(input.width(), input.height(), scale);
    assert_eq!(
        (out.width(), out.height()),
        expected,
        "output must be exactly {scale}x the input extent"
    );
}
