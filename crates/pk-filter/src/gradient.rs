//! Gradient magnitude and direction.
//!
//! `fx` is the derivative along columns (increasing `col`), `fy` along rows
//! (increasing `row`). `direction = atan2(fy, fx)` lies in `[-pi, pi]`.

use pk_core::{Plane, SampleRange};

use crate::kernels1d::{DoGKernel1D, Kernel1D};
use crate::separable::{convolve_separable, vertical_at};

/// Border-less magnitude and direction planes sharing the input's extent.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientField {
    pub magnitude: Plane<f32>,
    pub direction: Plane<f32>,
}

impl GradientField {
    pub fn width(&self) -> usize {
        self.magnitude.width()
    }

    pub fn height(&self) -> usize {
        self.magnitude.height()
    }

    fn from_components(fx: &Plane<f32>, fy: &Plane<f32>) -> Self {
        let (w, h) = (fx.width(), fx.height());
        let mut magnitude = Plane::new(w, h, 0);
        let mut direction = Plane::new(w, h, 0);
        for r in 0..h as isize {
            for c in 0..w as isize {
                let (gx, gy) = (fx.get(r, c), fy.get(r, c));
                magnitude.set(r, c, (gy * gy + gx * gx).sqrt());
                direction.set(r, c, gy.atan2(gx));
            }
        }
        Self {
            magnitude,
            direction,
        }
    }
}

/// Central-difference gradient (`[-0.5, 0, 0.5]` on each axis).
///
/// # Panics
/// Panics if `input.border() < 1`.
pub fn gradient_field(input: &Plane<f32>) -> GradientField {
    assert!(input.border() >= 1, "gradient requires a border of at least 1");

    let k = Kernel1D::central_difference();
    let (w, h) = (input.width(), input.height());
    let mut fx = Plane::new(w, h, 0);
    let mut fy = Plane::new(w, h, 0);
    for r in 0..h as isize {
        for c in 0..w as isize {
            fy.set(r, c, vertical_at(input, r, c, &k));
            fx.set(r, c, horizontal_at(input, r, c, &k));
        }
    }

    log::debug!("central-difference gradient over {w}x{h} plane");
    GradientField::from_components(&fx, &fy)
}

/// Derivative-of-Gaussian gradient: `fx` smooths along rows with `g` and
/// differentiates along columns with `dg`; `fy` the other way round.
///
/// # Panics
/// Panics if `input.border() < kernel.radius`.
pub fn gradient_field_dog(input: &Plane<f32>, kernel: &DoGKernel1D) -> GradientField {
    assert!(
        input.border() >= kernel.radius,
        "gradient requires a border of at least {} for sigma {}",
        kernel.radius,
        kernel.sigma
    );

    let (w, h) = (input.width(), input.height());
    let mut fx = Plane::new(w, h, 0);
    let mut fy = Plane::new(w, h, 0);
    convolve_separable(input, &mut fx, &kernel.g, &kernel.dg, SampleRange::UNBOUNDED);
    convolve_separable(input, &mut fy, &kernel.dg, &kernel.g, SampleRange::UNBOUNDED);

    log::debug!(
        "DoG gradient over {w}x{h} plane, sigma {} radius {}",
        kernel.sigma,
        kernel.radius
    );
    GradientField::from_components(&fx, &fy)
}

#[inline]
fn horizontal_at(input: &Plane<f32>, r: isize, c: isize, kernel: &Kernel1D) -> f32 {
    let e = kernel.extent() as isize;
    let mut sum = 0.0f32;
    for (k, &t) in kernel.taps().iter().enumerate() {
        sum += input.get(r, c - e + k as isize) * t;
    }
    sum
}
