use super::*;

#[test]
fn defaults_validate() {
    RenderOptions::default().validate().unwrap();
}

#[test]
fn zero_samples_are_rejected() {
    let opts = RenderOptions {
        spp_frame: 0,
        ..RenderOptions::default()
    };
    assert!(opts.validate().is_err());

    let opts = RenderOptions {
        spp: 0,
        ..RenderOptions::default()
    };
    assert!(opts.validate().is_err());
}

#[test]
fn oversized_canvas_is_rejected() {
    let opts = RenderOptions {
        width: MAX_DIMENSION + 1,
        height: 1,
        ..RenderOptions::default()
    };
    assert!(matches!(opts.validate(), Err(RtnprError::Validation(_))));

    let opts = RenderOptions {
        width: 70_000,
        height: 70_000,
        ..RenderOptions::default()
    };
    assert!(opts.validate().is_err());

    let opts = RenderOptions {
        width: MAX_DIMENSION,
        height: 1,
        ..RenderOptions::default()
    };
    opts.validate().unwrap();
}

#[test]
fn tone_mode_uses_snake_case_names() {
    let m: ToneMode = serde_json::from_str("\"raw\"").unwrap();
    assert_eq!(m, ToneMode::Raw);
    assert_eq!(serde_json::to_string(&ToneMode::Reinhard).unwrap(), "\"reinhard\"");
}
