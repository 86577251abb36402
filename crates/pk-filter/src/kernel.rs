//! Square 2-D kernels addressed by signed offset from the center tap.
//!
//! Taps are stored row-major in a `(2*extent + 1)^2` table; `(dy, dx)` maps to
//! `(dy + extent) * dim + (dx + extent)`. The named stencils below all use a
//! 9x9 table ([`FILTER_EXTENT`] = 4), even when their support is smaller.

/// Extent of the named 9x9 stencils.
pub const FILTER_EXTENT: usize = 4;

const FILTER_DIM: usize = 2 * FILTER_EXTENT + 1;

/// 5x5 blur template subtracted by the unsharp-mask stencil.
const UNSHARP_TEMPLATE: [[f32; 5]; 5] = [
    [0.0, 1.0 / 3.0, 0.5, 1.0 / 3.0, 0.0],
    [1.0 / 3.0, 0.5, 1.0, 0.5, 1.0 / 3.0],
    [0.5, 1.0, 1.0, 1.0, 0.5],
    [1.0 / 3.0, 0.5, 1.0, 0.5, 1.0 / 3.0],
    [0.0, 1.0 / 3.0, 0.5, 1.0 / 3.0, 0.0],
];

/// Sparse 4x4 pattern placed off-center by the shifted blur stencils.
const BLUR_PATTERN: [[f32; 4]; 4] = [
    [0.25, 0.5, 0.5, 0.25],
    [0.5, 1.0, 1.0, 0.5],
    [0.5, 1.0, 1.0, 0.5],
    [0.25, 0.5, 0.5, 0.25],
];

#[derive(Debug, Clone, PartialEq)]
pub enum KernelKind {
    /// Uniform average over a `(2*extent + 1)^2` window.
    Box { extent: usize },
    /// `(1 + alpha) * delta - alpha * normalize(template)`; sums to 1.
    Unsharp { alpha: f32 },
    /// Blur pattern occupying offsets `-4..=-1` on both axes.
    BlurUpperLeft,
    /// Blur pattern occupying offsets `+1..=+4` on both axes.
    BlurLowerRight,
    /// Caller-supplied 9x9 stencil in row-major order, normalized to unit sum.
    Custom(Vec<f32>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Kernel2D {
    extent: usize,
    taps: Vec<f32>,
}

impl Kernel2D {
    pub fn zeros(extent: usize) -> Self {
        let dim = 2 * extent + 1;
        Self {
            extent,
            taps: vec![0.0; dim * dim],
        }
    }

    pub fn from_taps(extent: usize, taps: Vec<f32>) -> Self {
        let dim = 2 * extent + 1;
        assert_eq!(taps.len(), dim * dim, "kernel taps must be (2*extent+1)^2");
        Self { extent, taps }
    }

    pub fn build(kind: &KernelKind) -> Self {
        match kind {
            KernelKind::Box { extent } => {
                let dim = 2 * extent + 1;
                let w = 1.0 / (dim * dim) as f32;
                Self::from_taps(*extent, vec![w; dim * dim])
            }
            KernelKind::Unsharp { alpha } => unsharp(*alpha),
            KernelKind::BlurUpperLeft => shifted_blur(-(FILTER_EXTENT as isize)),
            KernelKind::BlurLowerRight => shifted_blur(1),
            KernelKind::Custom(taps) => {
                assert_eq!(
                    taps.len(),
                    FILTER_DIM * FILTER_DIM,
                    "custom stencil must be 9x9"
                );
                let mut k = Self::from_taps(FILTER_EXTENT, taps.clone());
                k.normalize();
                k
            }
        }
    }

    pub fn extent(&self) -> usize {
        self.extent
    }

    pub fn dim(&self) -> usize {
        2 * self.extent + 1
    }

    pub fn taps(&self) -> &[f32] {
        &self.taps
    }

    /// Taps of kernel row `dy`, ordered `dx = -extent..=extent`.
    pub fn row(&self, dy: isize) -> &[f32] {
        let dim = self.dim();
        let start = (dy + self.extent as isize) as usize * dim;
        &self.taps[start..start + dim]
    }

    #[inline]
    fn index(&self, dy: isize, dx: isize) -> usize {
        let e = self.extent as isize;
        debug_assert!(dy.abs() <= e && dx.abs() <= e, "tap outside kernel");
        ((dy + e) as usize) * self.dim() + (dx + e) as usize
    }

    #[inline]
    pub fn at(&self, dy: isize, dx: isize) -> f32 {
        self.taps[self.index(dy, dx)]
    }

    pub fn set(&mut self, dy: isize, dx: isize, v: f32) {
        let idx = self.index(dy, dx);
        self.taps[idx] = v;
    }

    pub fn sum(&self) -> f32 {
        self.taps.iter().sum()
    }

    /// Scales every tap so the kernel sums to 1.
    ///
    /// # Panics
    /// Panics if the tap sum is not positive.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        assert!(sum > 0.0, "filter kernel sum must be positive");
        let inv = 1.0 / sum;
        for t in &mut self.taps {
            *t *= inv;
        }
    }
}

fn unsharp(alpha: f32) -> Kernel2D {
    let mut k = Kernel2D::zeros(FILTER_EXTENT);

    let sum: f32 = UNSHARP_TEMPLATE.iter().flatten().sum();
    let a = 1.0 / sum;

    k.set(0, 0, 1.0 + alpha);
    for (i, row) in UNSHARP_TEMPLATE.iter().enumerate() {
        for (j, &t) in row.iter().enumerate() {
            let dy = i as isize - 2;
            let dx = j as isize - 2;
            let v = k.at(dy, dx) - alpha * (a * t);
            k.set(dy, dx, v);
        }
    }
    k
}

fn shifted_blur(first: isize) -> Kernel2D {
    let mut k = Kernel2D::zeros(FILTER_EXTENT);
    for (i, row) in BLUR_PATTERN.iter().enumerate() {
        for (j, &t) in row.iter().enumerate() {
            k.set(first + i as isize, first + j as isize, t);
        }
    }
    k.normalize();
    k
}

#[cfg(test)]
mod tests {
    use super::{FILTER_EXTENT, Kernel2D, KernelKind};

    #[test]
    fn box_kernel_is_uniform_and_normalized() {
        let k = Kernel2D::build(&KernelKind::Box { extent: 4 });
        assert_eq!(k.dim(), 9);
        assert!((k.sum() - 1.0).abs() < 1e-5);
        assert!(k.taps().iter().all(|&t| t == 1.0 / 81.0));
    }

    #[test]
    fn unsharp_kernel_sums_to_one_and_boosts_center() {
        let alpha = 0.75;
        let k = Kernel2D::build(&KernelKind::Unsharp { alpha });
        assert!((k.sum() - 1.0).abs() < 1e-5);
        assert!(k.at(0, 0) > 1.0);
        // Template corners are zero, so those taps stay untouched.
        assert_eq!(k.at(-2, -2), 0.0);
        // Outside the 5x5 support.
        assert_eq!(k.at(3, 0), 0.0);
        assert!(k.at(0, 1) < 0.0);
    }

    #[test]
    fn zero_alpha_unsharp_is_identity() {
        let k = Kernel2D::build(&KernelKind::Unsharp { alpha: 0.0 });
        assert_eq!(k.at(0, 0), 1.0);
        assert_eq!(k.sum(), 1.0);
    }

    #[test]
    fn shifted_blurs_live_in_opposite_quadrants() {
        let ul = Kernel2D::build(&KernelKind::BlurUpperLeft);
        let lr = Kernel2D::build(&KernelKind::BlurLowerRight);
        assert!((ul.sum() - 1.0).abs() < 1e-6);
        assert!((lr.sum() - 1.0).abs() < 1e-6);

        let e = FILTER_EXTENT as isize;
        for dy in -e..=e {
            for dx in -e..=e {
                let in_ul = dy < 0 && dx < 0;
                let in_lr = dy > 0 && dx > 0;
                assert_eq!(ul.at(dy, dx) != 0.0, in_ul, "ul tap ({dy},{dx})");
                assert_eq!(lr.at(dy, dx) != 0.0, in_lr, "lr tap ({dy},{dx})");
            }
        }
        // Pattern sum is 9, so the heaviest tap is 1/9.
        assert!((ul.at(-3, -3) - 1.0 / 9.0).abs() < 1e-6);
        assert!((lr.at(2, 3) - 1.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn custom_stencil_is_normalized() {
        let mut taps = vec![0.0; 81];
        taps[40] = 2.0;
        taps[41] = 2.0;
        let k = Kernel2D::build(&KernelKind::Custom(taps));
        assert_eq!(k.at(0, 0), 0.5);
        assert_eq!(k.at(0, 1), 0.5);
        assert_eq!(k.row(0)[4], 0.5);
    }

    #[test]
    #[should_panic(expected = "filter kernel sum must be positive")]
    fn custom_stencil_with_zero_sum_panics() {
        let _ = Kernel2D::build(&KernelKind::Custom(vec![0.0; 81]));
    }
}
