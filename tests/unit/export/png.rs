use super::*;
use crate::foundation::core::Canvas;

#[test]
fn encodes_rgb_flattened_over_black() {
    let mut s = Surface::new(Canvas::new(3, 2).unwrap()).unwrap();
    s.fill([100, 50, 0, 128]);
    let png = encode_png(&s).unwrap();
    assert_eq!(&png[1..4], b"PNG");

    let img = image::load_from_memory(&png).unwrap();
    assert_eq!(img.color(), image::ColorType::Rgb8);
    let rgb = img.to_rgb8();
    assert_eq!((rgb.width(), rgb.height()), (3, 2));
    assert_eq!(rgb.get_pixel(2, 1).0, [100, 50, 0]);
}

#[test]
fn transparent_surface_becomes_black() {
    let s = Surface::new(Canvas::new(1, 1).unwrap()).unwrap();
    let rgb = image::load_from_memory(&encode_png(&s).unwrap())
        .unwrap()
        .to_rgb8();
    assert_eq!(rgb.get_pixel(0, 0).0, [0, 0, 0]);
}
