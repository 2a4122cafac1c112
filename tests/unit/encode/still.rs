use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_still").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn tone_mapped_frame_writes_rgba8_png() {
    let dir = scratch_dir("png");
    let frame = Frame::new(2, 1, vec![1.0, 0.0, 0.5, 1.0, 0.0, 1.0, 0.0, 0.0]).unwrap();
    let path = export_still(&frame, ToneMode::Reinhard, &dir, 0.1).unwrap();
    assert_eq!(path, dir.join(SCREENSHOT_PNG));

    let img = image::open(&path).unwrap().into_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 128, 255]);
    assert_eq!(img.get_pixel(1, 0).0, [0, 255, 0, 0]);
}

#[test]
fn raw_frame_writes_rgb16_tiff() {
    let dir = scratch_dir("tiff");
    let frame = Frame::filled(3, 2, [1.0, 1.0, 1.0, 1.0]);
    let path = export_still(&frame, ToneMode::Raw, &dir, 0.1).unwrap();
    assert_eq!(path, dir.join(SCREENSHOT_TIFF));

    let img = image::open(&path).unwrap();
    assert_eq!(img.color(), image::ColorType::Rgb16);
    let img = img.into_rgb16();
    assert!(img.pixels().all(|p| p.0 == [6554, 6554, 6554]));
}

#[test]
fn empty_frame_is_rejected_before_writing() {
    let dir = scratch_dir("empty");
    let frame = Frame {
        width: 0,
        height: 0,
        data: vec![],
    };
    assert!(matches!(
        export_still(&frame, ToneMode::Linear, &dir, 0.1),
        Err(RtnprError::InvalidFrame(_))
    ));
    assert!(!dir.join(SCREENSHOT_PNG).exists());
}
