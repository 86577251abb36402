//! Four-lane convolution loops.
//!
//! Each lane accumulates exactly the products the scalar loop would, in the
//! same order, so results are bit-identical. Widths that are not a multiple
//! of [`LANES`] finish with a scalar tail.

use pk_core::{Plane, Sample, SampleRange};

use crate::conv2d::{assert_fits, correlate_at};
use crate::kernel::Kernel2D;
use crate::kernels1d::Kernel1D;
use crate::separable::{horizontal_at, vertical_at};

pub const LANES: usize = 4;

type Lanes = [f32; LANES];

/// Batched counterpart of [`crate::convolve`].
pub fn convolve_batched<T: Sample>(
    input: &Plane<f32>,
    out: &mut Plane<T>,
    kernel: &Kernel2D,
    range: SampleRange,
) {
    assert_fits(input, out.width(), out.height(), kernel.extent());

    let e = kernel.extent() as isize;
    let dim = kernel.dim();
    let w = out.width();
    let data = input.data();

    for r in 0..out.height() as isize {
        let mut c = 0usize;
        while c + LANES <= w {
            let mut acc: Lanes = [0.0; LANES];
            for dy in -e..=e {
                let start = input.index(r + dy, c as isize - e);
                let window = &data[start..start + dim + LANES - 1];
                for (k, &t) in kernel.row(dy).iter().enumerate() {
                    mul_add(&mut acc, &window[k..k + LANES], t);
                }
            }
            store(out, r, c, &acc, range);
            c += LANES;
        }
        for c in c..w {
            let v = correlate_at(input, kernel, r, c as isize);
            out.set(r, c as isize, T::from_f32(range.saturate(v)));
        }
    }

    log::debug!(
        "convolved {}x{} plane with {}x{} kernel (batched)",
        out.width(),
        out.height(),
        dim,
        dim
    );
}

/// Batched counterpart of [`crate::convolve_separable`].
pub fn convolve_separable_batched<T: Sample>(
    input: &Plane<f32>,
    out: &mut Plane<T>,
    vertical: &Kernel1D,
    horizontal: &Kernel1D,
    range: SampleRange,
) {
    let he = horizontal.extent();
    assert_fits(input, out.width(), out.height(), vertical.extent().max(he));

    let w = out.width();
    let mut line = vec![0.0f32; w + 2 * he];

    for r in 0..out.height() as isize {
        vertical_pass(input, r, vertical, -(he as isize), &mut line);

        let mut c = 0usize;
        while c + LANES <= w {
            let mut acc: Lanes = [0.0; LANES];
            for (k, &t) in horizontal.taps().iter().enumerate() {
                mul_add(&mut acc, &line[c + k..c + k + LANES], t);
            }
            store(out, r, c, &acc, range);
            c += LANES;
        }
        for c in c..w {
            let v = horizontal_at(&line, c, horizontal);
            out.set(r, c as isize, T::from_f32(range.saturate(v)));
        }
    }

    log::debug!(
        "separable {}x{} pass over {}x{} plane (batched)",
        vertical.taps().len(),
        horizontal.taps().len(),
        out.width(),
        out.height()
    );
}

/// Vertical taps for `line.len()` columns starting at `first_col`.
fn vertical_pass(
    input: &Plane<f32>,
    r: isize,
    kernel: &Kernel1D,
    first_col: isize,
    line: &mut [f32],
) {
    let e = kernel.extent() as isize;
    let data = input.data();
    let n = line.len();

    let mut i = 0usize;
    while i + LANES <= n {
        let col = first_col + i as isize;
        let mut acc: Lanes = [0.0; LANES];
        for (k, &t) in kernel.taps().iter().enumerate() {
            let start = input.index(r - e + k as isize, col);
            mul_add(&mut acc, &data[start..start + LANES], t);
        }
        line[i..i + LANES].copy_from_slice(&acc);
        i += LANES;
    }
    for (i, v) in line.iter_mut().enumerate().skip(i) {
        *v = vertical_at(input, r, first_col + i as isize, kernel);
    }
}

#[inline(always)]
fn mul_add(acc: &mut Lanes, src: &[f32], t: f32) {
    for (a, &x) in acc.iter_mut().zip(src) {
        *a += x * t;
    }
}

#[inline]
fn store<T: Sample>(out: &mut Plane<T>, r: isize, c: usize, acc: &Lanes, range: SampleRange) {
    for (dst, &v) in out.row_mut(r)[c..c + LANES].iter_mut().zip(acc) {
        *dst = T::from_f32(range.saturate(v));
    }
}
