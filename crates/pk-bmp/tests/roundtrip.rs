use std::fs::OpenOptions;
use std::path::Path;

use pk_bmp::{BmpError, BmpReader, BmpWriter, read_image, write_image};
use pk_core::{Image, Plane};
use tempfile::tempdir;

fn gray(width: usize, height: usize) -> Image<u8> {
    let data = (0..width * height).map(|i| (i * 17 % 256) as u8).collect();
    let plane = Plane::from_vec(width, height, 0, data).expect("valid plane");
    Image::from_planes(vec![plane]).expect("one plane")
}

fn rgb(width: usize, height: usize) -> Image<u8> {
    let planes = (0..3)
        .map(|k| {
            let data = (0..width * height)
                .map(|i| ((i * 31 + k * 80) % 256) as u8)
                .collect();
            Plane::from_vec(width, height, 0, data).expect("valid plane")
        })
        .collect();
    Image::from_planes(planes).expect("three planes")
}

fn assert_same(a: &Image<u8>, b: &Image<u8>) {
    assert_eq!(a.num_components(), b.num_components());
    for (pa, pb) in a.planes().iter().zip(b.planes()) {
        assert_eq!(pa.to_vec(), pb.to_vec());
    }
}

#[test]
fn gray_round_trip_with_row_padding() {
    let dir = tempdir().expect("tempdir");
    for width in [1, 3, 5, 8] {
        let path = dir.path().join(format!("gray{width}.bmp"));
        let image = gray(width, 3);
        write_image(&path, &image).expect("write");
        let back: Image<u8> = read_image(&path, 2).expect("read");
        assert_same(&image, &back);
    }
}

#[test]
fn rgb_round_trip_with_row_padding() {
    let dir = tempdir().expect("tempdir");
    for width in [1, 2, 7, 12] {
        let path = dir.path().join(format!("rgb{width}.bmp"));
        let image = rgb(width, 4);
        write_image(&path, &image).expect("write");
        let back: Image<u8> = read_image(&path, 0).expect("read");
        assert_same(&image, &back);
    }
}

#[test]
fn written_files_decode_with_independent_decoder() {
    let dir = tempdir().expect("tempdir");

    let path = dir.path().join("rgb.bmp");
    let src = rgb(7, 5);
    write_image(&path, &src).expect("write");
    let decoded = image::open(&path).expect("decode").to_rgb8();
    assert_eq!(decoded.dimensions(), (7, 5));
    for (x, y, px) in decoded.enumerate_pixels() {
        let (r, c) = (y as isize, x as isize);
        assert_eq!(px.0[0], src.planes()[0].get(r, c), "red at ({x},{y})");
        assert_eq!(px.0[1], src.planes()[1].get(r, c), "green at ({x},{y})");
        assert_eq!(px.0[2], src.planes()[2].get(r, c), "blue at ({x},{y})");
    }

    let path = dir.path().join("gray.bmp");
    let src = gray(5, 3);
    write_image(&path, &src).expect("write");
    let decoded = image::open(&path).expect("decode").to_rgb8();
    assert_eq!(decoded.dimensions(), (5, 3));
    for (x, y, px) in decoded.enumerate_pixels() {
        let v = src.planes()[0].get(y as isize, x as isize);
        assert_eq!(px.0, [v, v, v], "gray at ({x},{y})");
    }
}

#[test]
fn scanlines_stream_bottom_row_first() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("rows.bmp");

    let mut w = BmpWriter::create(&path, 3, 2, 1).expect("create");
    w.put_line(&[1, 2, 3]).expect("bottom");
    w.put_line(&[4, 5, 6]).expect("top");
    w.close().expect("close");

    let mut r = BmpReader::open(&path).expect("open");
    assert_eq!((r.width(), r.height(), r.num_components()), (3, 2, 1));
    let mut line = [0u8; 3];
    r.next_line(&mut line).expect("first line");
    assert_eq!(line, [1, 2, 3]);
    r.next_line(&mut line).expect("second line");
    assert_eq!(line, [4, 5, 6]);
    r.close().expect("close");

    let top: Image<u8> = read_image(&path, 0).expect("read");
    assert_eq!(top.planes()[0].row(0), &[4, 5, 6]);
}

#[test]
fn access_after_close_is_not_open() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("closed.bmp");
    write_image(&path, &gray(2, 2)).expect("write");

    let mut r = BmpReader::open(&path).expect("open");
    r.close().expect("close");
    let mut line = [0u8; 2];
    assert!(matches!(r.next_line(&mut line), Err(BmpError::NotOpen)));
    assert!(matches!(r.close(), Err(BmpError::NotOpen)));

    let mut w = BmpWriter::create(dir.path().join("w.bmp"), 2, 1, 3).expect("create");
    w.close().expect("close");
    assert!(matches!(w.put_line(&[0; 6]), Err(BmpError::NotOpen)));
}

#[test]
fn missing_file_is_no_file() {
    let dir = tempdir().expect("tempdir");
    let err = read_image::<u8>(dir.path().join("absent.bmp"), 0).unwrap_err();
    assert!(matches!(err, BmpError::NoFile { .. }));
}

#[test]
fn short_pixel_data_is_truncated() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("short.bmp");
    write_image(&path, &rgb(4, 4)).expect("write");
    shorten(&path, 20);

    let err = read_image::<u8>(&path, 0).unwrap_err();
    assert!(matches!(err, BmpError::Truncated), "{err}");
}

#[test]
fn header_claiming_more_than_the_file_holds_is_truncated() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("huge.bmp");
    write_image(&path, &rgb(1, 1)).expect("write");

    let mut bytes = std::fs::read(&path).expect("read back");
    bytes.truncate(54);
    bytes[18..22].copy_from_slice(&i32::MAX.to_le_bytes());
    bytes[22..26].copy_from_slice(&i32::MAX.to_le_bytes());
    std::fs::write(&path, &bytes).expect("rewrite");

    let err = read_image::<f32>(&path, 4).unwrap_err();
    assert!(matches!(err, BmpError::Truncated), "{err}");
    assert!(matches!(BmpReader::open(&path), Err(BmpError::Truncated)));
}

#[test]
fn oversized_image_is_rejected_before_creating_the_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("big.bmp");
    let err = BmpWriter::create(&path, 70_000, 70_000, 3).unwrap_err();
    assert!(matches!(err, BmpError::Unsupported(_)), "{err}");
    assert!(!path.exists());
}

#[test]
fn non_bmp_input_is_header_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("text.bmp");
    std::fs::write(&path, b"definitely not a bitmap, just some text bytes here.....")
        .expect("write");
    let err = read_image::<u8>(&path, 0).unwrap_err();
    assert!(matches!(err, BmpError::FileHeader(_)), "{err}");
}

#[test]
fn unsupported_depth_is_reported() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("deep.bmp");
    write_image(&path, &rgb(2, 2)).expect("write");

    let mut bytes = std::fs::read(&path).expect("read back");
    bytes[28] = 32;
    std::fs::write(&path, &bytes).expect("rewrite");

    let err = read_image::<u8>(&path, 0).unwrap_err();
    assert!(matches!(err, BmpError::Unsupported(_)), "{err}");
}

fn shorten(path: &Path, by: u64) {
    let f = OpenOptions::new().write(true).open(path).expect("open for truncation");
    let len = f.metadata().expect("metadata").len();
    f.set_len(len - by).expect("truncate");
}
