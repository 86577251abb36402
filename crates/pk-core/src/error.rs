use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    InvalidComponents(usize),
    RowLength {
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => write!(
                f,
                "plane size mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            Self::InvalidComponents(n) => {
                write!(f, "unsupported component count {n}, expected 1 or 3")
            }
            Self::RowLength { expected, actual } => {
                write!(f, "row length mismatch: expected {expected}, got {actual}")
            }
        }
    }
}

impl std::error::Error for Error {}
