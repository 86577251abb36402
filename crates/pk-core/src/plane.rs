use crate::border::{BoundaryExtension, map_index};
use crate::sample::Sample;
use crate::Error;

/// Row pitch granularity, in samples.
pub const PLANE_ALIGN: usize = 4;

/// A 2-D sample grid surrounded by a guard border.
///
/// The backing buffer holds `stride * (height + 2*border)` samples and is only
/// ever replaced as a whole. Any `(row, col)` inside
/// `[-border, height + border) x [-border, width + border)` is addressable;
/// columns past `width + border` that exist only because of stride rounding
/// are not.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane<T> {
    width: usize,
    height: usize,
    border: usize,
    stride: usize,
    origin: usize,
    data: Vec<T>,
}

impl<T: Sample> Plane<T> {
    /// Allocates a zeroed plane.
    ///
    /// # Panics
    /// Panics if `width` or `height` is zero.
    pub fn new(width: usize, height: usize, border: usize) -> Self {
        assert!(width > 0, "plane width must be positive");
        assert!(height > 0, "plane height must be positive");

        let stride = aligned_stride(width + 2 * border);
        let rows = height + 2 * border;
        let len = stride.checked_mul(rows).expect("plane size overflow");

        Self {
            width,
            height,
            border,
            stride,
            origin: border * stride + border,
            data: vec![T::default(); len],
        }
    }

    /// Builds a plane from `width * height` interior samples in row-major
    /// order. The border is zero until extended.
    pub fn from_vec(
        width: usize,
        height: usize,
        border: usize,
        interior: Vec<T>,
    ) -> Result<Self, Error> {
        if interior.len() != width * height {
            return Err(Error::RowLength {
                expected: width * height,
                actual: interior.len(),
            });
        }

        let mut plane = Self::new(width, height, border);
        for (r, src) in interior.chunks_exact(width).enumerate() {
            plane.row_mut(r as isize).copy_from_slice(src);
        }
        Ok(plane)
    }

    /// Discards the current buffer and reallocates for new dimensions.
    ///
    /// # Panics
    /// Panics if `width` or `height` is zero.
    pub fn init(&mut self, height: usize, width: usize, border: usize) {
        *self = Self::new(width, height, border);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn border(&self) -> usize {
        self.border
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whether `(row, col)` lies inside the interior or the border.
    pub fn contains(&self, row: isize, col: isize) -> bool {
        let b = self.border as isize;
        row >= -b
            && row < self.height as isize + b
            && col >= -b
            && col < self.width as isize + b
    }

    #[inline]
    pub fn index(&self, row: isize, col: isize) -> usize {
        debug_assert!(
            self.contains(row, col),
            "sample ({row}, {col}) outside plane border"
        );
        (self.origin as isize + row * self.stride as isize + col) as usize
    }

    #[inline]
    pub fn get(&self, row: isize, col: isize) -> T {
        self.data[self.index(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: isize, col: isize, value: T) {
        let idx = self.index(row, col);
        self.data[idx] = value;
    }

    #[inline]
    pub fn get_mut(&mut self, row: isize, col: isize) -> &mut T {
        let idx = self.index(row, col);
        &mut self.data[idx]
    }

    /// Interior samples of row `r` (which may be a border row).
    pub fn row(&self, r: isize) -> &[T] {
        let start = self.index(r, 0);
        &self.data[start..start + self.width]
    }

    pub fn row_mut(&mut self, r: isize) -> &mut [T] {
        let start = self.index(r, 0);
        let w = self.width;
        &mut self.data[start..start + w]
    }

    /// Row `r` from column `-border` through `width + border - 1`.
    pub fn padded_row(&self, r: isize) -> &[T] {
        let start = self.index(r, -(self.border as isize));
        &self.data[start..start + self.width + 2 * self.border]
    }

    /// Raw backing buffer, including border and stride padding.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Sets every sample, border included.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Interior rows, top to bottom.
    pub fn interior(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.height as isize).map(move |r| self.row(r))
    }

    /// Copies the interior into a contiguous row-major vector.
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.width * self.height);
        for row in self.interior() {
            out.extend_from_slice(row);
        }
        out
    }

    /// Converts the interior into another sample type, with a fresh border.
    pub fn convert<U: Sample>(&self, border: usize) -> Plane<U> {
        let mut out = Plane::new(self.width, self.height, border);
        for r in 0..self.height as isize {
            for (d, &s) in out.row_mut(r).iter_mut().zip(self.row(r)) {
                *d = U::from_f32(s.to_f32());
            }
        }
        out
    }

    /// Populates the border from the interior.
    ///
    /// Top rows first, then bottom rows, then a left/right sweep over all
    /// `height + 2*border` rows.
    pub fn extend_boundary(&mut self, policy: BoundaryExtension) {
        if self.border == 0 {
            return;
        }
        log::trace!(
            "extending {}x{} plane, border {} ({policy})",
            self.width,
            self.height,
            self.border
        );

        let b = self.border as isize;
        let h = self.height as isize;

        for r in 1..=b {
            self.extend_row(-r, policy);
        }
        for r in 1..=b {
            self.extend_row(h - 1 + r, policy);
        }

        let w = self.width as isize;
        for r in -b..(h + b) {
            let base = self.index(r, 0);
            for c in 1..=b {
                let left = match map_index(-c, self.width, policy) {
                    Some(src) => self.data[base + src],
                    None => T::default(),
                };
                let right = match map_index(w - 1 + c, self.width, policy) {
                    Some(src) => self.data[base + src],
                    None => T::default(),
                };
                self.data[base - c as usize] = left;
                self.data[base + (w - 1 + c) as usize] = right;
            }
        }
    }

    fn extend_row(&mut self, r: isize, policy: BoundaryExtension) {
        let dst = self.index(r, 0);
        match map_index(r, self.height, policy) {
            Some(src_row) => {
                let src = self.index(src_row as isize, 0);
                self.data.copy_within(src..src + self.width, dst);
            }
            None => self.data[dst..dst + self.width].fill(T::default()),
        }
    }
}

#[inline]
fn aligned_stride(min_stride: usize) -> usize {
    min_stride.next_multiple_of(PLANE_ALIGN)
}
