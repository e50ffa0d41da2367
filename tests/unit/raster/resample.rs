use super::*;
use crate::foundation::core::Rgba16;

/// Raster whose pixel at local `(x, y)` encodes its own coordinates.
fn coord_raster(w: u32, h: u32) -> Raster {
    let mut px = Vec::with_capacity((w * h) as usize);
    for y in 0..h {
        for x in 0..w {
            px.push(Rgba16::new(x as u16, y as u16, 0, u16::MAX));
        }
    }
    Raster::from_pixels(Bounds::from_size(w, h), px).unwrap()
}

struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next() % u64::from(hi - lo + 1)) as u32
    }
}

#[test]
fn output_has_exact_size_and_samples_stay_in_bounds() {
    let mut rng = XorShift(0x9e37_79b9_7f4a_7c15);
    let mut cases = vec![(1, 1, 1, 1), (1, 1, 7, 5), (3, 2, 40, 30), (50, 40, 1, 1)];
    for _ in 0..200 {
        cases.push((
            rng.range(1, 64),
            rng.range(1, 64),
            rng.range(1, 96),
            rng.range(1, 96),
        ));
    }

    for (sw, sh, tw, th) in cases {
        let src = coord_raster(sw, sh);
        let out = resample_nearest(&src, tw, th, (0, 0)).unwrap();
        assert_eq!(out.width(), tw);
        assert_eq!(out.height(), th);
        assert_eq!(out.pixels().len(), (tw * th) as usize);
        for p in out.pixels() {
            assert!(u32::from(p.r) < sw, "x {} out of {sw}", p.r);
            assert!(u32::from(p.g) < sh, "y {} out of {sh}", p.g);
        }
    }
}

#[test]
fn sampling_follows_floor_formula() {
    let src = coord_raster(4, 4);
    let out = resample_nearest(&src, 2, 2, (0, 0)).unwrap();
    let got: Vec<(u16, u16)> = out.pixels().iter().map(|p| (p.r, p.g)).collect();
    assert_eq!(got, vec![(0, 0), (2, 0), (0, 2), (2, 2)]);
}

#[test]
fn upscaling_repeats_source_pixels() {
    let src = coord_raster(2, 1);
    let out = resample_nearest(&src, 4, 2, (0, 0)).unwrap();
    let xs: Vec<u16> = out.row(0).iter().map(|p| p.r).collect();
    assert_eq!(xs, vec![0, 0, 1, 1]);
    assert_eq!(out.row(0), out.row(1));
}

#[test]
fn output_is_placed_at_origin() {
    let src = coord_raster(3, 3).with_origin(7, 9);
    let out = resample_nearest(&src, 2, 2, (-4, 5)).unwrap();
    assert_eq!(out.bounds(), Bounds::new(-4, 5, 2, 2));
    // Source offset does not shift sampling: local (0, 0) is always the first pixel.
    assert_eq!(out.at(-4, 5).map(|p| (p.r, p.g)), Some((0, 0)));
}

#[test]
fn zero_target_is_invalid_dimension() {
    let src = coord_raster(2, 2);
    for (w, h) in [(0, 3), (3, 0), (0, 0)] {
        let err = resample_nearest(&src, w, h, (0, 0)).unwrap_err();
        assert!(matches!(err, GlyphError::InvalidDimension(_)));
    }
}

#[test]
fn empty_source_is_invalid_dimension() {
    let src = Raster::filled(Bounds::from_size(0, 4), Rgba16::BLACK);
    let err = resample_nearest(&src, 2, 2, (0, 0)).unwrap_err();
    assert!(matches!(err, GlyphError::InvalidDimension(_)));
}
