use super::*;
use crate::style::color::Rgb;
use crate::style::transform::FrameStyle;
use kurbo::{Point, Shape};

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

fn plain_transform() -> Transform {
    let mut t = Transform::default();
    t.shadow.enabled = false;
    t.corner_radius = 0.0;
    t
}

#[test]
fn image_fills_its_placement_rect() {
    let mut s = Surface::new(canvas(100, 200)).unwrap();
    let img = RasterImage::solid(50, 100, [255, 0, 0]).unwrap();
    let mut t = plain_transform();
    t.scale = 50.0;
    t.x = 50.0;
    t.y = 50.0;
    let p = render_screenshot(&mut s, &mut Painter::new(), &t, &img).unwrap();
    assert_eq!(p.rect, Rect::new(25.0, 50.0, 75.0, 150.0));
    assert_eq!(s.pixel(50, 100), Some([255, 0, 0, 255]));
    assert_eq!(s.pixel(10, 100), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(50, 20), Some([0, 0, 0, 0]));
}

#[test]
fn rounded_corners_clip_the_image() {
    let mut s = Surface::new(canvas(100, 100)).unwrap();
    let img = RasterImage::solid(10, 10, [0, 255, 0]).unwrap();
    let mut t = plain_transform();
    t.scale = 100.0;
    t.corner_radius = 200.0;
    render_screenshot(&mut s, &mut Painter::new(), &t, &img).unwrap();
    assert_eq!(s.pixel(1, 1).map(|p| p[3]), Some(0));
    assert_eq!(s.pixel(50, 50), Some([0, 255, 0, 255]));
}

#[test]
fn shadow_lands_below_the_image() {
    let mut s = Surface::new(canvas(100, 200)).unwrap();
    let img = RasterImage::solid(50, 100, [255, 255, 255]).unwrap();
    let mut t = plain_transform();
    t.scale = 50.0;
    t.shadow = Shadow {
        enabled: true,
        color: Rgb::BLACK,
        blur: 4.0,
        opacity: 100.0,
        offset_x: 0.0,
        offset_y: 20.0,
    };
    let p = render_screenshot(&mut s, &mut Painter::new(), &t, &img).unwrap();
    let below = s.pixel(50, (p.rect.y1 + 10.0) as u32).unwrap();
    assert!(below[3] > 0, "shadow should show under the image");
    let inside = s.pixel(50, 100).unwrap();
    assert_eq!(inside, [255, 255, 255, 255]);
}

#[test]
fn disabled_shadow_paints_nothing_outside() {
    let mut s = Surface::new(canvas(100, 200)).unwrap();
    let img = RasterImage::solid(50, 100, [255, 255, 255]).unwrap();
    let mut t = plain_transform();
    t.scale = 50.0;
    let p = render_screenshot(&mut s, &mut Painter::new(), &t, &img).unwrap();
    assert_eq!(s.pixel(50, (p.rect.y1 + 10.0) as u32), Some([0, 0, 0, 0]));
}

#[test]
fn frame_strokes_outside_the_rect() {
    let mut s = Surface::new(canvas(200, 200)).unwrap();
    let img = RasterImage::solid(100, 100, [255, 255, 255]).unwrap();
    let mut t = plain_transform();
    t.scale = 50.0;
    t.frame = Frame {
        enabled: true,
        style: FrameStyle::Simple,
        color: Rgb::new(255, 0, 0),
        width: 10.0,
        opacity: 100.0,
    };
    let p = render_screenshot(&mut s, &mut Painter::new(), &t, &img).unwrap();
    let edge = s.pixel(p.rect.x0 as u32 - 3, 100).unwrap();
    assert_eq!(edge, [255, 0, 0, 255]);
}

#[test]
fn island_and_notch_sit_inside_the_top_of_the_rect() {
    let placement = Placement {
        rect: Rect::new(0.0, 0.0, 400.0, 800.0),
        radius: 24.0,
        affine: Affine::IDENTITY,
    };
    let island = cutout_path(&placement, NotchKind::Island).bounding_box();
    assert!((island.width() - 112.0).abs() < 1e-9);
    assert!((island.height() - 32.0).abs() < 1e-9);
    assert!((island.y0 - 10.0).abs() < 1e-9);
    assert!((island.center().x - 200.0).abs() < 1e-9);

    let notch = cutout_path(&placement, NotchKind::Notch);
    let bb = notch.bounding_box();
    assert!((bb.y0).abs() < 1e-9);
    assert!((bb.width() - 200.0).abs() < 1e-9);
    assert!(notch.contains(Point::new(101.0, 1.0)));
}

#[test]
fn frame_outline_grows_by_half_stroke() {
    let placement = Placement {
        rect: Rect::new(10.0, 10.0, 110.0, 210.0),
        radius: 8.0,
        affine: Affine::IDENTITY,
    };
    let bb = frame_outline(&placement, 12.0).bounding_box();
    assert_eq!(bb, Rect::new(4.0, 4.0, 116.0, 216.0));
}

#[test]
fn rotation_keeps_frame_and_image_registered() {
    let mut t = plain_transform();
    t.rotation = 30.0;
    t.perspective = 10.0;
    let p = Placement::compute(&t, 0.5, canvas(1000, 2000));
    let c = p.affine * p.rect.center();
    assert!((c.x - p.rect.center().x).abs() < 1e-9);
    assert!((c.y - p.rect.center().y).abs() < 1e-9);
}
