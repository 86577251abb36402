use std::path::Path;

use pk_bmp::{read_image, write_image};
use pk_cli::{Execution, Extension, FilterKernel, FrameOutcome, Operation, expand, frame_name, run};
use pk_core::{Image, Plane};
use tempfile::tempdir;

fn write_gray(path: &Path, width: usize, height: usize, value: u8) {
    let plane =
        Plane::from_vec(width, height, 0, vec![value; width * height]).expect("valid plane");
    write_image(path, &Image::from_planes(vec![plane]).expect("one plane")).expect("write fixture");
}

fn write_rgb(path: &Path, width: usize, height: usize) {
    let planes = (0..3u8)
        .map(|k| {
            let data = (0..width * height)
                .map(|i| (i as u8).wrapping_mul(7).wrapping_add(k * 50))
                .collect();
            Plane::from_vec(width, height, 0, data).expect("valid plane")
        })
        .collect();
    write_image(path, &Image::from_planes(planes).expect("three planes")).expect("write fixture");
}

#[test]
fn brighten_frames_continue_past_missing_input() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("in.bmp");
    let output = dir.path().join("out.bmp");
    let (input, output) = (input.to_str().expect("utf-8"), output.to_str().expect("utf-8"));

    write_gray(Path::new(&frame_name(input, 1)), 5, 3, 100);
    write_gray(Path::new(&frame_name(input, 3)), 5, 3, 220);

    let frames = expand(input, output, Some(3));
    let report = run(&Operation::Brighten { delta: 60 }, &frames);

    assert_eq!(report.failed, 1);
    assert_eq!(report.succeeded(), 2);
    assert!(matches!(report.frames[1].outcome, FrameOutcome::Error { .. }));

    let first: Image<u8> = read_image(frame_name(output, 1), 0).expect("frame 1");
    assert!(first.planes()[0].to_vec().iter().all(|&v| v == 160));
    // 220 + 60 saturates on encode.
    let third: Image<u8> = read_image(frame_name(output, 3), 0).expect("frame 3");
    assert!(third.planes()[0].to_vec().iter().all(|&v| v == 255));
}

#[test]
fn oversized_header_fails_only_its_frame() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("in.bmp");
    let output = dir.path().join("out.bmp");
    let (input, output) = (input.to_str().expect("utf-8"), output.to_str().expect("utf-8"));

    for n in 1..=3 {
        write_gray(Path::new(&frame_name(input, n)), 4, 4, 10);
    }
    let bad = frame_name(input, 2);
    let mut bytes = std::fs::read(&bad).expect("read fixture");
    bytes.truncate(54);
    bytes[18..22].copy_from_slice(&i32::MAX.to_le_bytes());
    bytes[22..26].copy_from_slice(&i32::MAX.to_le_bytes());
    std::fs::write(&bad, &bytes).expect("rewrite fixture");

    let report = run(&Operation::Brighten { delta: 5 }, &expand(input, output, Some(3)));

    assert_eq!(report.failed, 1);
    assert!(matches!(report.frames[1].outcome, FrameOutcome::Error { .. }));
    let last: Image<u8> = read_image(frame_name(output, 3), 0).expect("frame 3");
    assert!(last.planes()[0].to_vec().iter().all(|&v| v == 15));
}

#[test]
fn filter_keeps_geometry_and_components() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("rgb.bmp");
    let output = dir.path().join("sharp.bmp");
    write_rgb(&input, 9, 6);

    for path in [Execution::Scalar, Execution::Batched] {
        let op = Operation::Filter {
            kernel: FilterKernel::Unsharp,
            alpha: 0.5,
            extension: Extension::Symmetric,
            path,
        };
        let report = run(&op, &expand(input.to_str().unwrap(), output.to_str().unwrap(), None));
        assert_eq!(report.failed, 0);
        match &report.frames[0].outcome {
            FrameOutcome::Ok(stats) => {
                assert_eq!((stats.out_width, stats.out_height, stats.out_components), (9, 6, 3));
            }
            FrameOutcome::Error { message } => panic!("filter failed: {message}"),
        }
    }
}

#[test]
fn gradient_of_gray_input_is_color() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("flat.bmp");
    let output = dir.path().join("grad.bmp");
    write_gray(&input, 6, 4, 90);

    let op = Operation::Gradient {
        gain: 4.0,
        thin: false,
        extension: Extension::Hold,
    };
    let report = run(&op, &expand(input.to_str().unwrap(), output.to_str().unwrap(), None));
    assert_eq!(report.failed, 0);

    let rgb: Image<u8> = read_image(&output, 0).expect("read gradient");
    assert_eq!(rgb.num_components(), 3);
    for p in rgb.planes() {
        assert!(p.to_vec().iter().all(|&v| v == 0));
    }
}

#[test]
fn sinc_upscales_every_plane() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("small.bmp");
    let output = dir.path().join("big.bmp");
    write_gray(&input, 4, 3, 64);

    let op = Operation::Sinc {
        scale: 3,
        half_width: 5,
        extension: Extension::Hold,
    };
    let report = run(&op, &expand(input.to_str().unwrap(), output.to_str().unwrap(), None));
    assert_eq!(report.failed, 0);

    let big: Image<u8> = read_image(&output, 0).expect("read upscaled");
    assert_eq!(big.dimensions(), Some((12, 9)));
    assert!(big.planes()[0].to_vec().iter().all(|&v| v == 64));
}

#[test]
fn report_serializes_operation_and_frame_status() {
    let dir = tempdir().expect("tempdir");
    let frames = expand(
        dir.path().join("none.bmp").to_str().unwrap(),
        dir.path().join("out.bmp").to_str().unwrap(),
        None,
    );
    let report = run(
        &Operation::Bilinear {
            scale: 2,
            extension: Extension::Hold,
        },
        &frames,
    );

    let json = serde_json::to_value(&report).expect("serialize report");
    assert_eq!(json["operation"], "bilinear");
    assert_eq!(json["scale"], 2);
    assert_eq!(json["border"], 1);
    assert_eq!(json["failed"], 1);
    assert_eq!(json["frames"][0]["status"], "error");
    assert!(json["frames"][0]["message"].as_str().unwrap().contains("none.bmp"));
}
