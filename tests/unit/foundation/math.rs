use super::*;

#[test]
fn luma_covers_full_range() {
    assert_eq!(luma601(Rgba16::BLACK), 0);
    assert_eq!(luma601(Rgba16::WHITE), CHANNEL_MAX);
}

#[test]
fn luma_weights_green_over_blue() {
    let green = Rgba16::new(0, CHANNEL_MAX, 0, CHANNEL_MAX);
    let blue = Rgba16::new(0, 0, CHANNEL_MAX, CHANNEL_MAX);
    assert!(luma601(green) > luma601(blue));
}

#[test]
fn transparent_reads_as_black() {
    assert_eq!(luma601(Rgba16::new(CHANNEL_MAX, CHANNEL_MAX, CHANNEL_MAX, 0)), 0);
}

#[test]
fn even_step_starts_at_zero_and_stays_below_range() {
    for n in 1..=300 {
        assert_eq!(even_step(0, n, 255), 0);
        assert!(even_step(n - 1, n, 255) < 255);
    }
    assert_eq!(even_step(1, 2, 255), 127);
}

#[test]
fn widen_maps_extremes() {
    assert_eq!(widen_u8(0), 0);
    assert_eq!(widen_u8(255), 0xffff);
}

#[test]
fn over_opaque_copies_opaque_and_mixes_partial_alpha() {
    let red = Rgba16::new(CHANNEL_MAX, 0, 0, CHANNEL_MAX);
    assert_eq!(over_opaque(red, Rgba16::WHITE), red);
    let half_black = Rgba16::new(0, 0, 0, 32_768);
    assert_eq!(
        over_opaque(half_black, Rgba16::WHITE),
        Rgba16::new(32_767, 32_767, 32_767, CHANNEL_MAX)
    );
}
