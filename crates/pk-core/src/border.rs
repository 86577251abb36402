use core::fmt;

/// Policy used to populate a plane's guard border from its interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryExtension {
    /// Every border sample is zero.
    Zero,
    /// Border samples replicate the nearest edge sample.
    ZeroOrderHold,
    /// Border samples mirror the interior about the edge sample, without
    /// repeating the edge sample itself (reflect-101).
    Symmetric,
}

impl fmt::Display for BoundaryExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => f.write_str("zero"),
            Self::ZeroOrderHold => f.write_str("zero-order-hold"),
            Self::Symmetric => f.write_str("symmetric"),
        }
    }
}

/// Maps a signed index along an axis of length `len` to the interior index
/// whose value the border sample takes. `None` means the sample is zero.
pub fn map_index(i: isize, len: usize, mode: BoundaryExtension) -> Option<usize> {
    let last = len.checked_sub(1)? as isize;
    let inside = (0..=last).contains(&i);

    match mode {
        BoundaryExtension::Zero => inside.then_some(i as usize),
        BoundaryExtension::ZeroOrderHold => Some(i.clamp(0, last) as usize),
        // Reflection about both edges repeats every 2*last samples.
        BoundaryExtension::Symmetric if last == 0 => Some(0),
        BoundaryExtension::Symmetric => {
            let folded = i.rem_euclid(2 * last);
            Some(if folded > last { 2 * last - folded } else { folded } as usize)
        }
    }
}
