//! Row-oriented BMP codec and the adapter between BMP files and planes.
//!
//! Only uncompressed, bottom-up files with 8-bit (gray, palette ignored) or
//! 24-bit (B, G, R) samples are supported. [`BmpReader`] and [`BmpWriter`]
//! move one scanline at a time, bottom row first, with the 4-byte row padding
//! stripped or added. [`read_image`] and [`write_image`] convert between
//! whole files and an [`pk_core::Image`] whose planes are top-to-bottom and
//! ordered R, G, B.

mod errors;
mod header;
mod planes;
mod reader;
mod writer;

pub use errors::BmpError;
pub use planes::{read_image, write_image};
pub use reader::BmpReader;
pub use writer::BmpWriter;
