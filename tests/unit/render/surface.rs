use super::*;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

#[test]
fn new_surface_is_transparent() {
    let s = Surface::new(canvas(3, 2)).unwrap();
    assert_eq!(s.data().len(), 24);
    assert!(s.data().iter().all(|&b| b == 0));
    assert_eq!(s.pixel(3, 0), None);
}

#[test]
fn fill_and_clear() {
    let mut s = Surface::new(canvas(2, 2)).unwrap();
    s.fill([1, 2, 3, 255]);
    assert_eq!((s.width(), s.height()), (2, 2));
    assert_eq!(&s.data()[12..16], &[1, 2, 3, 255]);
    s.clear();
    assert_eq!(s.pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn painter_fills_rect_into_layer() {
    let mut p = Painter::new();
    let mut s = Surface::new(canvas(8, 8)).unwrap();
    s.fill([0, 0, 0, 255]);
    p.paint(&mut s, 1.0, |ctx| {
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 0, 0, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 4.0, 8.0));
        Ok(())
    })
    .unwrap();
    assert_eq!(s.pixel(1, 1), Some([255, 0, 0, 255]));
    assert_eq!(s.pixel(6, 6), Some([0, 0, 0, 255]));
}

#[test]
fn painter_error_leaves_surface_untouched() {
    let mut p = Painter::new();
    let mut s = Surface::new(canvas(4, 4)).unwrap();
    let r = p.paint(&mut s, 1.0, |_| Err(ShotframeError::render("boom")));
    assert!(r.is_err());
    assert!(s.data().iter().all(|&b| b == 0));
}

#[test]
fn bezpath_conversion_preserves_elements() {
    let mut bp = BezPath::new();
    bp.move_to((0.0, 0.0));
    bp.quad_to((1.0, 0.0), (1.0, 1.0));
    bp.close_path();
    assert_eq!(bezpath_to_cpu(&bp).elements().len(), 3);
}
