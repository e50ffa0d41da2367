use super::*;

fn glyphs_of(n: usize) -> Vec<char> {
    (0..n)
        .map(|i| char::from_u32(0x1_0000 + i as u32).unwrap())
        .collect()
}

#[test]
fn extremes_map_to_first_and_last_glyph() {
    for n in (1..=300).chain([1000, 4096, Palette::MAX_GLYPHS]) {
        let chars = glyphs_of(n);
        let p = Palette::new(chars.iter().copied()).unwrap();
        assert_eq!(p.quantize(Rgba16::BLACK).ch, chars[0], "n={n}");
        assert_eq!(p.quantize(Rgba16::WHITE).ch, chars[n - 1], "n={n}");
    }
}

#[test]
fn levels_start_at_zero_and_are_strictly_increasing() {
    for n in [1, 2, 3, 8, 70, 255, 256, 1000] {
        let p = Palette::new(glyphs_of(n)).unwrap();
        assert_eq!(p.glyphs()[0].luminance, 0);
        assert!(p.glyphs().windows(2).all(|w| w[0].luminance < w[1].luminance));
    }
}

#[test]
fn two_glyph_palette_splits_at_midpoint() {
    let p = Palette::from_chars(" #").unwrap();
    assert_eq!(p.glyphs()[1].luminance, 0x7fff);
    assert_eq!(p.nearest_index(0x3fff), 0);
    assert_eq!(p.nearest_index(0x4000), 1);
}

#[test]
fn ties_break_toward_lower_index() {
    let p = Palette::from_chars("abcd").unwrap();
    let (l1, l2) = (p.glyphs()[1].luminance, p.glyphs()[2].luminance);
    assert_eq!((l2 - l1) % 2, 0);
    let midpoint = l1 + (l2 - l1) / 2;
    assert_eq!(p.nearest_index(midpoint), 1);
    assert_eq!(p.nearest_index(midpoint + 1), 2);
}

#[test]
fn reverse_round_trips_glyph_order() {
    let p = Palette::named("default").unwrap();
    let back = p.reversed().reversed();
    assert_eq!(back.chars().collect::<String>(), p.chars().collect::<String>());
    assert_eq!(back, p);
}

#[test]
fn reverse_reassigns_luminance() {
    let p = Palette::from_chars(" .#").unwrap();
    let r = p.reversed();
    assert_eq!(r.chars().collect::<String>(), "#. ");
    assert_eq!(r.glyphs()[0].luminance, 0);
    assert_eq!(r.quantize(Rgba16::BLACK).ch, '#');
    assert_eq!(r.quantize(Rgba16::WHITE).ch, ' ');
}

#[test]
fn palettes_of_different_sizes_do_not_share_levels() {
    let small = Palette::from_chars(" #").unwrap();
    let big = Palette::named("sci").unwrap();
    let small_before = small.clone();
    let _ = big.reversed();
    assert_eq!(small, small_before);
    assert_eq!(small.glyphs()[1].luminance, 0x7fff);
    assert_ne!(big.glyphs()[1].luminance, small.glyphs()[1].luminance);
}

#[test]
fn empty_palette_is_rejected() {
    assert!(matches!(Palette::from_chars(""), Err(GlyphError::EmptyPalette)));
}

#[test]
fn unknown_named_set_lists_known_names() {
    let err = Palette::named("nope").unwrap_err();
    assert!(err.to_string().contains("default"));
}

#[test]
fn oversized_palette_is_rejected() {
    let err = Palette::new(std::iter::repeat_n('x', Palette::MAX_GLYPHS + 1)).unwrap_err();
    assert!(matches!(err, GlyphError::Validation(_)));
}
