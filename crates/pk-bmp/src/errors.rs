use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BmpError {
    #[error("cannot open supplied input or output file {}", path.display())]
    NoFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error encountered while parsing BMP file header: {0}")]
    FileHeader(&'static str),

    #[error(
        "unsupported BMP file format ({0}); only uncompressed 8-bit and 24-bit data is supported"
    )]
    Unsupported(String),

    #[error("input or output file truncated unexpectedly")]
    Truncated,

    #[error("trying to access a file which is not open")]
    NotOpen,

    #[error("cannot encode an image with {0} planes; expected 1 or 3")]
    Components(usize),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl BmpError {
    /// Maps a short read to [`BmpError::Truncated`].
    pub(crate) fn from_read(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::Truncated
        } else {
            Self::Io(err)
        }
    }
}
