use std::path::Path;

use pk_core::{Image, Sample};

use crate::{BmpError, BmpReader, BmpWriter};

/// Decodes a BMP file into planes with the given `border`.
///
/// Rows are flipped to top-to-bottom order. Gray files yield one plane;
/// 24-bit files yield R, G, B planes. The border is left zeroed.
pub fn read_image<T: Sample>(path: impl AsRef<Path>, border: usize) -> Result<Image<T>, BmpError> {
    let mut reader = BmpReader::open(path)?;
    let (w, h, n) = (reader.width(), reader.height(), reader.num_components());

    let mut image = Image::with_planes(n, w, h, border);
    let mut line = vec![0u8; reader.line_bytes()];

    for r in (0..h as isize).rev() {
        reader.next_line(&mut line)?;
        let planes = image.planes_mut();
        if n == 1 {
            for (d, &s) in planes[0].row_mut(r).iter_mut().zip(&line) {
                *d = T::from_byte(s);
            }
        } else {
            for (c, bgr) in line.chunks_exact(3).enumerate() {
                let c = c as isize;
                planes[0].set(r, c, T::from_byte(bgr[2]));
                planes[1].set(r, c, T::from_byte(bgr[1]));
                planes[2].set(r, c, T::from_byte(bgr[0]));
            }
        }
    }

    reader.close()?;
    Ok(image)
}

/// Encodes a 1- or 3-plane image, clamping samples into `[0, 255]` with
/// rounding.
pub fn write_image<T: Sample>(path: impl AsRef<Path>, image: &Image<T>) -> Result<(), BmpError> {
    let n = image.num_components();
    if n != 1 && n != 3 {
        return Err(BmpError::Components(n));
    }
    let Some((w, h)) = image.dimensions() else {
        return Err(BmpError::Components(0));
    };

    let mut writer = BmpWriter::create(path, w, h, n)?;
    let mut line = vec![0u8; writer.line_bytes()];
    let planes = image.planes();

    for r in (0..h as isize).rev() {
        if n == 1 {
            for (d, &s) in line.iter_mut().zip(planes[0].row(r)) {
                *d = s.to_byte();
            }
        } else {
            let (red, green, blue) = (planes[0].row(r), planes[1].row(r), planes[2].row(r));
            for (c, bgr) in line.chunks_exact_mut(3).enumerate() {
                bgr[0] = blue[c].to_byte();
                bgr[1] = green[c].to_byte();
                bgr[2] = red[c].to_byte();
            }
        }
        writer.put_line(&line)?;
    }

    writer.close()
}
