use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::BmpError;
use crate::header::BmpHeader;

/// Writes an uncompressed BMP file one scanline at a time, bottom row first.
#[derive(Debug)]
pub struct BmpWriter {
    file: Option<BufWriter<File>>,
    header: BmpHeader,
    lines_left: usize,
}

impl BmpWriter {
    /// Creates `path` and writes the headers. `num_components` must be 1
    /// (8-bit gray, with a gray palette) or 3 (24-bit B, G, R). Images too
    /// large for the BMP size fields are [`BmpError::Unsupported`] and no file
    /// is created.
    ///
    /// # Panics
    /// Panics if `width` or `height` is zero.
    pub fn create(
        path: impl AsRef<Path>,
        width: usize,
        height: usize,
        num_components: usize,
    ) -> Result<Self, BmpError> {
        assert!(width > 0 && height > 0, "BMP dimensions must be positive");
        if num_components != 1 && num_components != 3 {
            return Err(BmpError::Components(num_components));
        }

        let header = BmpHeader::for_image(width, height, num_components);
        header.encoded_lens()?;

        let path = path.as_ref();
        let file = File::create(path).map_err(|source| BmpError::NoFile {
            path: path.to_path_buf(),
            source,
        })?;
        let mut file = BufWriter::new(file);

        header.write(&mut file)?;

        log::debug!(
            "created {}: {width}x{height}, {num_components} component(s)",
            path.display()
        );

        Ok(Self {
            file: Some(file),
            lines_left: height,
            header,
        })
    }

    pub fn line_bytes(&self) -> usize {
        self.header.line_bytes()
    }

    /// Writes the next scanline (bottom row first) plus its padding.
    ///
    /// # Panics
    /// Panics if `line` is shorter than [`Self::line_bytes`] or every
    /// scanline has already been written.
    pub fn put_line(&mut self, line: &[u8]) -> Result<(), BmpError> {
        let file = self.file.as_mut().ok_or(BmpError::NotOpen)?;
        let n = self.header.line_bytes();
        assert!(line.len() >= n, "line buffer shorter than scanline ({n} bytes)");
        assert!(self.lines_left > 0, "all {} scanlines already written", self.header.height);

        file.write_all(&line[..n])?;
        let pad = [0u8; 3];
        file.write_all(&pad[..self.header.padded_line_bytes() - n])?;

        self.lines_left -= 1;
        Ok(())
    }

    /// Flushes the file. Scanlines never written are filled with zeros.
    pub fn close(&mut self) -> Result<(), BmpError> {
        let mut file = self.file.take().ok_or(BmpError::NotOpen)?;
        if self.lines_left > 0 {
            log::warn!("closing BMP with {} unwritten scanlines", self.lines_left);
            let blank = vec![0u8; self.header.padded_line_bytes()];
            for _ in 0..self.lines_left {
                file.write_all(&blank)?;
            }
            self.lines_left = 0;
        }
        file.flush()?;
        Ok(())
    }
}
