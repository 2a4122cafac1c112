use super::*;

#[test]
fn raw_is_identity_even_above_one() {
    assert_eq!(map_rgb([2.0, 0.5, 0.0], ToneMode::Raw, 1), [2.0, 0.5, 0.0]);
}

#[test]
fn linear_clips_into_theme_range() {
    assert_eq!(map_rgb([2.0, -1.0, 0.5], ToneMode::Linear, 0), [1.0, 0.0, 0.5]);
}

#[test]
fn reinhard_compresses_and_hits_one_at_burn_point() {
    assert_eq!(reinhard(0.0, 4.0), 0.0);
    assert!(reinhard(1.0, 4.0) < 1.0);
    assert!((reinhard(4.0, 4.0) - 1.0).abs() < 1e-6);
    // Past the burn point values exceed 1 and clip in `map_rgb`.
    assert!(reinhard(16.0, 4.0) > 1.0);
}

#[test]
fn theme_one_interpolates_between_pastels() {
    let lo = map_rgb([0.0; 3], ToneMode::Linear, 1);
    let hi = map_rgb([1.0; 3], ToneMode::Linear, 1);
    assert_eq!(lo, THEMES[1].lo);
    assert_eq!(hi, THEMES[1].hi);
    assert_eq!(theme(99), THEMES[0]);
}
