use std::io::{self, Read, Write};

use crate::BmpError;

const FILE_HEADER_LEN: usize = 14;
const INFO_HEADER_LEN: usize = 40;
const HEADERS_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;
const GRAY_PALETTE_LEN: usize = 256 * 4;

/// BITMAPFILEHEADER + BITMAPINFOHEADER fields planekit cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BmpHeader {
    pub width: usize,
    pub height: usize,
    pub num_components: usize,
    pub data_offset: u64,
}

impl BmpHeader {
    pub fn for_image(width: usize, height: usize, num_components: usize) -> Self {
        let palette = if num_components == 1 { GRAY_PALETTE_LEN } else { 0 };
        Self {
            width,
            height,
            num_components,
            data_offset: (HEADERS_LEN + palette) as u64,
        }
    }

    /// Sample bytes per scanline, without padding.
    pub fn line_bytes(&self) -> usize {
        self.width * self.num_components
    }

    /// Scanline length on disk, padded to a multiple of 4 bytes.
    pub fn padded_line_bytes(&self) -> usize {
        self.line_bytes().next_multiple_of(4)
    }

    /// Pixel data length on disk, `None` if it overflows.
    pub fn image_len(&self) -> Option<u64> {
        let line = self
            .width
            .checked_mul(self.num_components)?
            .checked_next_multiple_of(4)?;
        (line as u64).checked_mul(self.height as u64)
    }

    /// Headers, palette and pixel data, `None` if it overflows.
    pub fn file_len(&self) -> Option<u64> {
        self.data_offset.checked_add(self.image_len()?)
    }

    /// `(file_len, image_len)` as stored in the headers.
    pub fn encoded_lens(&self) -> Result<(u32, u32), BmpError> {
        let too_large = || {
            BmpError::Unsupported(format!(
                "{}x{} image exceeds the 4 GiB BMP limit",
                self.width, self.height
            ))
        };
        i32::try_from(self.width).map_err(|_| too_large())?;
        i32::try_from(self.height).map_err(|_| too_large())?;
        let image_len = self.image_len().and_then(|n| u32::try_from(n).ok());
        let file_len = self.file_len().and_then(|n| u32::try_from(n).ok());
        file_len.zip(image_len).ok_or_else(too_large)
    }

    pub fn parse<R: Read>(r: &mut R) -> Result<Self, BmpError> {
        let mut buf = [0u8; HEADERS_LEN];
        r.read_exact(&mut buf).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => BmpError::FileHeader("file shorter than its headers"),
            _ => BmpError::Io(e),
        })?;

        if &buf[0..2] != b"BM" {
            return Err(BmpError::FileHeader("missing BM signature"));
        }
        let data_offset = le_u32(&buf, 10);
        let info_len = le_u32(&buf, 14);
        let width = le_i32(&buf, 18);
        let height = le_i32(&buf, 22);
        let planes = le_u16(&buf, 26);
        let bits = le_u16(&buf, 28);
        let compression = le_u32(&buf, 30);

        if (info_len as usize) < INFO_HEADER_LEN {
            return Err(BmpError::FileHeader("info header too short"));
        }
        if planes != 1 {
            return Err(BmpError::FileHeader("plane count must be 1"));
        }
        if width <= 0 || height == 0 {
            return Err(BmpError::FileHeader("image dimensions must be positive"));
        }
        if height < 0 {
            return Err(BmpError::Unsupported("top-down row order".to_owned()));
        }
        if compression != 0 {
            return Err(BmpError::Unsupported(format!("compression type {compression}")));
        }
        let num_components = match bits {
            8 => 1,
            24 => 3,
            other => return Err(BmpError::Unsupported(format!("{other}-bit samples"))),
        };
        if (data_offset as usize) < HEADERS_LEN {
            return Err(BmpError::FileHeader("pixel data overlaps headers"));
        }

        Ok(Self {
            width: width as usize,
            height: height as usize,
            num_components,
            data_offset: data_offset as u64,
        })
    }

    /// Writes both headers, followed by a gray palette for 8-bit files.
    pub fn write<W: Write>(&self, w: &mut W) -> Result<(), BmpError> {
        let (file_len, image_len) = self.encoded_lens()?;

        w.write_all(b"BM")?;
        w.write_all(&file_len.to_le_bytes())?;
        w.write_all(&0u32.to_le_bytes())?;
        w.write_all(&(self.data_offset as u32).to_le_bytes())?;

        w.write_all(&(INFO_HEADER_LEN as u32).to_le_bytes())?;
        w.write_all(&(self.width as i32).to_le_bytes())?;
        w.write_all(&(self.height as i32).to_le_bytes())?;
        w.write_all(&1u16.to_le_bytes())?;
        w.write_all(&((8 * self.num_components) as u16).to_le_bytes())?;
        w.write_all(&0u32.to_le_bytes())?; // BI_RGB
        w.write_all(&image_len.to_le_bytes())?;
        w.write_all(&0i32.to_le_bytes())?;
        w.write_all(&0i32.to_le_bytes())?;
        let colors: u32 = if self.num_components == 1 { 256 } else { 0 };
        w.write_all(&colors.to_le_bytes())?;
        w.write_all(&0u32.to_le_bytes())?;

        if self.num_components == 1 {
            for i in 0..=255u8 {
                w.write_all(&[i, i, i, 0])?;
            }
        }
        Ok(())
    }
}

#[inline]
fn le_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

#[inline]
fn le_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

#[inline]
fn le_i32(buf: &[u8], at: usize) -> i32 {
    le_u32(buf, at) as i32
}

#[cfg(test)]
mod tests {
    use super::BmpHeader;
    use crate::BmpError;

    fn encoded(h: &BmpHeader) -> Vec<u8> {
        let mut out = Vec::new();
        h.write(&mut out).expect("write to vec");
        out
    }

    #[test]
    fn written_header_parses_back() {
        for (w, h, n) in [(5, 3, 1), (7, 2, 3)] {
            let hdr = BmpHeader::for_image(w, h, n);
            let bytes = encoded(&hdr);
            assert_eq!(bytes.len() as u64, hdr.data_offset);
            assert_eq!(BmpHeader::parse(&mut bytes.as_slice()).expect("parse"), hdr);
        }
    }

    #[test]
    fn padding_rounds_rows_to_four_bytes() {
        assert_eq!(BmpHeader::for_image(5, 1, 1).padded_line_bytes(), 8);
        assert_eq!(BmpHeader::for_image(7, 1, 3).padded_line_bytes(), 24);
        assert_eq!(BmpHeader::for_image(4, 1, 3).padded_line_bytes(), 12);
    }

    #[test]
    fn rejects_bad_signature_and_depth() {
        let mut bytes = encoded(&BmpHeader::for_image(2, 2, 3));
        bytes[0] = b'X';
        assert!(matches!(
            BmpHeader::parse(&mut bytes.as_slice()),
            Err(BmpError::FileHeader(_))
        ));

        let mut bytes = encoded(&BmpHeader::for_image(2, 2, 3));
        bytes[28] = 32;
        assert!(matches!(
            BmpHeader::parse(&mut bytes.as_slice()),
            Err(BmpError::Unsupported(_))
        ));
    }

    #[test]
    fn lengths_cover_headers_palette_and_padded_rows() {
        assert_eq!(BmpHeader::for_image(5, 3, 1).file_len(), Some(54 + 1024 + 24));
        assert_eq!(BmpHeader::for_image(7, 2, 3).image_len(), Some(48));
        assert_eq!(BmpHeader::for_image(usize::MAX, 2, 3).image_len(), None);
    }

    #[test]
    fn images_past_the_u32_size_fields_are_unsupported() {
        let hdr = BmpHeader::for_image(70_000, 70_000, 3);
        let mut out = Vec::new();
        assert!(matches!(hdr.write(&mut out), Err(BmpError::Unsupported(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn short_input_is_a_header_error() {
        let bytes = encoded(&BmpHeader::for_image(2, 2, 1));
        assert!(matches!(
            BmpHeader::parse(&mut &bytes[..20]),
            Err(BmpError::FileHeader(_))
        ));
    }
}
