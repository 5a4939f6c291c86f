use grayedit_core::PixelBuffer;
use grayedit_io::{read, read_from_memory, save_bytes, write, Format, IoError};
use tempfile::tempdir;

fn gradient(width: u32, height: u32) -> PixelBuffer {
    let mut image = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let v = ((x + y) * 255 / (width + height - 2)) as u8;
            image.set_pixel(x, y, [v, v, v, 255]);
        }
    }
    image
}

#[test]
fn gb7_file_roundtrip_reports_depth() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ramp.gb7");
    let image = gradient(9, 5);

    write(&path, &image).unwrap();
    let loaded = read(&path).unwrap();

    assert_eq!(loaded.format, Format::Gb7);
    assert_eq!(loaded.bit_depth, 7);
    assert_eq!(loaded.buffer.dimensions(), (9, 5));
    for (a, b) in image.pixels().zip(loaded.buffer.pixels()) {
        assert!((a[0] as i32 - b[0] as i32).abs() <= 2);
        assert_eq!(b[3], 255);
    }
}

#[test]
fn png_file_roundtrip_is_lossless() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ramp.png");
    let mut image = gradient(6, 6);
    image.set_pixel(2, 3, [10, 20, 30, 40]);

    write(&path, &image).unwrap();
    let loaded = read(&path).unwrap();

    assert_eq!(loaded.format, Format::Png);
    assert_eq!(loaded.bit_depth, 8);
    assert_eq!(loaded.buffer, image);
}

#[test]
fn content_wins_over_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mislabelled.png");
    let bytes = grayedit_io::gb7::encode(&gradient(3, 3)).unwrap();
    save_bytes(&path, &bytes).unwrap();

    let loaded = read(&path).unwrap();
    assert_eq!(loaded.format, Format::Gb7);
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("image.tiff");
    let err = write(&path, &gradient(2, 2)).unwrap_err();
    assert!(matches!(err, IoError::UnsupportedFormat(ext) if ext == "tiff"));
}

#[test]
fn truncated_gb7_in_memory_fails_cleanly() {
    let mut bytes = grayedit_io::gb7::encode(&gradient(4, 4)).unwrap();
    bytes.truncate(bytes.len() - 1);
    let err = read_from_memory(&bytes).unwrap_err();
    assert!(matches!(
        err,
        IoError::Gb7(grayedit_io::Gb7Error::Truncated { expected: 16, actual: 15 })
    ));
}
