use core::fmt;

/// Numeric range a filter result is saturated into before it is stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRange {
    pub lo: f32,
    pub hi: f32,
}

impl SampleRange {
    /// Range of samples that will be re-encoded as bytes.
    pub const BYTE: Self = Self { lo: 0.0, hi: 255.0 };
    pub const UNBOUNDED: Self = Self {
        lo: f32::NEG_INFINITY,
        hi: f32::INFINITY,
    };

    pub fn new(lo: f32, hi: f32) -> Self {
        assert!(lo <= hi, "sample range must satisfy lo <= hi");
        Self { lo, hi }
    }

    #[inline]
    pub fn saturate(self, v: f32) -> f32 {
        v.clamp(self.lo, self.hi)
    }
}

/// Element type stored in a [`crate::Plane`].
///
/// Integral samples round half up when converted from `f32`; every sample
/// type clamps into `[0, 255]` with rounding when converted to a byte.
pub trait Sample: Copy + Default + PartialEq + fmt::Debug {
    fn to_f32(self) -> f32;
    fn from_f32(v: f32) -> Self;
    fn from_byte(v: u8) -> Self;
    fn to_byte(self) -> u8;
    fn offset(self, delta: Self) -> Self;
}

impl Sample for f32 {
    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        v
    }

    #[inline]
    fn from_byte(v: u8) -> Self {
        v as f32
    }

    #[inline]
    fn to_byte(self) -> u8 {
        (self + 0.5).clamp(0.0, 255.0) as u8
    }

    #[inline]
    fn offset(self, delta: Self) -> Self {
        self + delta
    }
}

impl Sample for i32 {
    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        (v + 0.5).floor() as i32
    }

    #[inline]
    fn from_byte(v: u8) -> Self {
        v as i32
    }

    #[inline]
    fn to_byte(self) -> u8 {
        self.clamp(0, 255) as u8
    }

    #[inline]
    fn offset(self, delta: Self) -> Self {
        self.saturating_add(delta)
    }
}

impl Sample for u8 {
    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        (v + 0.5).floor().clamp(0.0, 255.0) as u8
    }

    #[inline]
    fn from_byte(v: u8) -> Self {
        v
    }

    #[inline]
    fn to_byte(self) -> u8 {
        self
    }

    #[inline]
    fn offset(self, delta: Self) -> Self {
        self.saturating_add(delta)
    }
}
