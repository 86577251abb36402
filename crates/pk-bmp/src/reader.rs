use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::BmpError;
use crate::header::BmpHeader;

/// Streams scanlines out of an uncompressed BMP file, bottom row first.
#[derive(Debug)]
pub struct BmpReader {
    file: Option<BufReader<File>>,
    header: BmpHeader,
    lines_left: usize,
}

impl BmpReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BmpError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| BmpError::NoFile {
            path: path.to_path_buf(),
            source,
        })?;
        let mut file = BufReader::new(file);

        let header = BmpHeader::parse(&mut file)?;
        let available = file.get_ref().metadata()?.len();
        match header.file_len() {
            Some(needed) if needed <= available => {}
            needed => {
                log::debug!(
                    "{}: header claims {}x{} ({needed:?} bytes), file has {available}",
                    path.display(),
                    header.width,
                    header.height
                );
                return Err(BmpError::Truncated);
            }
        }
        // Skips the palette of 8-bit files along with any extended header.
        file.seek(SeekFrom::Start(header.data_offset))?;

        log::debug!(
            "opened {}: {}x{}, {} component(s)",
            path.display(),
            header.width,
            header.height,
            header.num_components
        );

        Ok(Self {
            file: Some(file),
            lines_left: header.height,
            header,
        })
    }

    pub fn width(&self) -> usize {
        self.header.width
    }

    pub fn height(&self) -> usize {
        self.header.height
    }

    /// 1 for 8-bit files, 3 (B, G, R) for 24-bit files.
    pub fn num_components(&self) -> usize {
        self.header.num_components
    }

    /// Bytes [`Self::next_line`] writes per call.
    pub fn line_bytes(&self) -> usize {
        self.header.line_bytes()
    }

    /// Reads the next scanline (bottom row first) into `line`, without its
    /// padding.
    ///
    /// # Panics
    /// Panics if `line` is shorter than [`Self::line_bytes`].
    pub fn next_line(&mut self, line: &mut [u8]) -> Result<(), BmpError> {
        let file = self.file.as_mut().ok_or(BmpError::NotOpen)?;
        let n = self.header.line_bytes();
        assert!(line.len() >= n, "line buffer shorter than scanline ({n} bytes)");

        if self.lines_left == 0 {
            return Err(BmpError::Truncated);
        }
        file.read_exact(&mut line[..n]).map_err(BmpError::from_read)?;

        let mut pad = [0u8; 3];
        let pad_len = self.header.padded_line_bytes() - n;
        file.read_exact(&mut pad[..pad_len]).map_err(BmpError::from_read)?;

        self.lines_left -= 1;
        Ok(())
    }

    pub fn close(&mut self) -> Result<(), BmpError> {
        self.file.take().map(drop).ok_or(BmpError::NotOpen)
    }
}
