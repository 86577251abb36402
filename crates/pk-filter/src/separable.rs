use pk_core::{Plane, Sample, SampleRange};

use crate::batched;
use crate::conv2d::{ConvolutionPath, assert_fits};
use crate::kernels1d::Kernel1D;

/// Separable convolution: `vertical` along rows, then `horizontal` along
/// columns.
///
/// For each output row the vertical taps are applied into a temporary line
/// covering columns `[-h_ext, width + h_ext)`, which the horizontal taps then
/// read. Results are saturated into `range`.
///
/// # Panics
/// Panics if `input.border()` is smaller than either kernel extent, or `out`
/// is larger than `input`.
pub fn convolve_separable<T: Sample>(
    input: &Plane<f32>,
    out: &mut Plane<T>,
    vertical: &Kernel1D,
    horizontal: &Kernel1D,
    range: SampleRange,
) {
    let he = horizontal.extent();
    assert_fits(input, out.width(), out.height(), vertical.extent().max(he));

    let w = out.width();
    let first_col = -(he as isize);
    let mut line = vec![0.0f32; w + 2 * he];

    for r in 0..out.height() as isize {
        for (i, v) in line.iter_mut().enumerate() {
            *v = vertical_at(input, r, first_col + i as isize, vertical);
        }
        for (c, dst) in out.row_mut(r).iter_mut().enumerate() {
            *dst = T::from_f32(range.saturate(horizontal_at(&line, c, horizontal)));
        }
    }

    log::debug!(
        "separable {}x{} pass over {}x{} plane",
        vertical.taps().len(),
        horizontal.taps().len(),
        out.width(),
        out.height()
    );
}

pub fn convolve_separable_with<T: Sample>(
    path: ConvolutionPath,
    input: &Plane<f32>,
    out: &mut Plane<T>,
    vertical: &Kernel1D,
    horizontal: &Kernel1D,
    range: SampleRange,
) {
    match path {
        ConvolutionPath::Scalar => convolve_separable(input, out, vertical, horizontal, range),
        ConvolutionPath::Batched => {
            batched::convolve_separable_batched(input, out, vertical, horizontal, range)
        }
    }
}

#[inline]
pub(crate) fn vertical_at(input: &Plane<f32>, r: isize, col: isize, kernel: &Kernel1D) -> f32 {
    let e = kernel.extent() as isize;
    let mut sum = 0.0f32;
    for (k, &t) in kernel.taps().iter().enumerate() {
        sum += input.get(r - e + k as isize, col) * t;
    }
    sum
}

/// `line[c + k]` holds column `c + k - extent`.
#[inline]
pub(crate) fn horizontal_at(line: &[f32], c: usize, kernel: &Kernel1D) -> f32 {
    let mut sum = 0.0f32;
    for (&x, &t) in line[c..].iter().zip(kernel.taps()) {
        sum += x * t;
    }
    sum
}
