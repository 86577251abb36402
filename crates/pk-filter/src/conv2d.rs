use pk_core::{Plane, Sample, SampleRange};

use crate::batched;
use crate::kernel::Kernel2D;

/// Loop used to evaluate a convolution. Both produce identical samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConvolutionPath {
    #[default]
    Scalar,
    /// Four adjacent outputs per tap multiply-add, scalar tail.
    Batched,
}

/// Non-separable 2-D convolution of `input` into every interior sample of
/// `out`, saturated into `range`.
///
/// # Panics
/// Panics if `input.border() < kernel.extent()` or `out` is larger than
/// `input` in either dimension.
pub fn convolve<T: Sample>(
    input: &Plane<f32>,
    out: &mut Plane<T>,
    kernel: &Kernel2D,
    range: SampleRange,
) {
    assert_fits(input, out.width(), out.height(), kernel.extent());

    for r in 0..out.height() as isize {
        for c in 0..out.width() as isize {
            let v = correlate_at(input, kernel, r, c);
            out.set(r, c, T::from_f32(range.saturate(v)));
        }
    }

    log::debug!(
        "convolved {}x{} plane with {}x{} kernel",
        out.width(),
        out.height(),
        kernel.dim(),
        kernel.dim()
    );
}

pub fn convolve_with<T: Sample>(
    path: ConvolutionPath,
    input: &Plane<f32>,
    out: &mut Plane<T>,
    kernel: &Kernel2D,
    range: SampleRange,
) {
    match path {
        ConvolutionPath::Scalar => convolve(input, out, kernel, range),
        ConvolutionPath::Batched => batched::convolve_batched(input, out, kernel, range),
    }
}

/// `sum k[dy, dx] * in[r + dy, c + dx]`, rows outer, columns inner.
#[inline]
pub(crate) fn correlate_at(input: &Plane<f32>, kernel: &Kernel2D, r: isize, c: isize) -> f32 {
    let e = kernel.extent() as isize;
    let dim = kernel.dim();
    let data = input.data();

    let mut sum = 0.0f32;
    for dy in -e..=e {
        let start = input.index(r + dy, c - e);
        let window = &data[start..start + dim];
        for (&x, &t) in window.iter().zip(kernel.row(dy)) {
            sum += x * t;
        }
    }
    sum
}

pub(crate) fn assert_fits(input: &Plane<f32>, out_w: usize, out_h: usize, extent: usize) {
    assert!(
        input.border() >= extent,
        "input border {} is smaller than kernel extent {}",
        input.border(),
        extent
    );
    assert!(
        out_h <= input.height() && out_w <= input.width(),
        "output {}x{} exceeds input {}x{}",
        out_w,
        out_h,
        input.width(),
        input.height()
    );
}
