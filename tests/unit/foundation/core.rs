use super::*;

#[test]
fn intersect_clips_to_overlap() {
    let a = Bounds::new(0, 0, 4, 4);
    let b = Bounds::new(2, -1, 5, 2);
    assert_eq!(a.intersect(b), Bounds::new(2, 0, 2, 1));
}

#[test]
fn intersect_of_disjoint_rects_is_empty() {
    let a = Bounds::new(0, 0, 2, 2);
    let b = Bounds::new(5, 5, 2, 2);
    assert!(a.intersect(b).is_empty());
    assert_eq!(a.intersect(b).area(), 0);
}

#[test]
fn contains_is_exclusive_at_far_edges() {
    let r = Bounds::new(1, 1, 2, 2);
    assert!(r.contains(1, 1));
    assert!(r.contains(2, 2));
    assert!(!r.contains(3, 2));
    assert!(!r.contains(0, 1));
}

#[test]
fn raster_at_uses_absolute_coordinates() {
    let bounds = Bounds::new(10, 20, 2, 1);
    let raster =
        Raster::from_pixels(bounds, vec![Rgba16::BLACK, Rgba16::WHITE]).unwrap();
    assert_eq!(raster.at(10, 20), Some(Rgba16::BLACK));
    assert_eq!(raster.at(11, 20), Some(Rgba16::WHITE));
    assert_eq!(raster.at(0, 0), None);
    assert_eq!(raster.row(0), &[Rgba16::BLACK, Rgba16::WHITE]);
}

#[test]
fn from_pixels_rejects_length_mismatch() {
    let err = Raster::from_pixels(Bounds::from_size(2, 2), vec![Rgba16::BLACK]).unwrap_err();
    assert!(err.to_string().contains("expects 4 pixels"));
}

#[test]
fn eight_bit_channels_widen_to_full_range() {
    let c = Rgba16::from_rgba8(255, 0, 128, 255);
    assert_eq!(c, Rgba16::new(0xffff, 0, 0x8080, 0xffff));
}

#[test]
fn from_rgba8_image_keeps_offset() {
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([0, 255, 0, 255]));
    let raster = Raster::from_rgba8_image(&img, 4, 5);
    assert_eq!(raster.bounds(), Bounds::new(4, 5, 3, 2));
    assert_eq!(raster.at(6, 6), Some(Rgba16::new(0, 0xffff, 0, 0xffff)));
}
