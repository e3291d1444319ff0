use kurbo::{BezPath, Rect};

/// Closed rounded rectangle with quadratic corners.
///
/// `radius` is clamped to half the shorter side; zero yields a plain rectangle.
pub fn rounded_rect_path(rect: Rect, radius: f64) -> BezPath {
    let rect = rect.abs();
    let r = if radius.is_finite() {
        radius.clamp(0.0, rect.width().min(rect.height()) / 2.0)
    } else {
        0.0
    };
    let (x0, y0, x1, y1) = (rect.x0, rect.y0, rect.x1, rect.y1);

    let mut p = BezPath::new();
    p.move_to((x0 + r, y0));
    p.line_to((x1 - r, y0));
    p.quad_to((x1, y0), (x1, y0 + r));
    p.line_to((x1, y1 - r));
    p.quad_to((x1, y1), (x1 - r, y1));
    p.line_to((x0 + r, y1));
    p.quad_to((x0, y1), (x0, y1 - r));
    p.line_to((x0, y0 + r));
    p.quad_to((x0, y0), (x0 + r, y0));
    p.close_path();
    p
}

/// Rectangle with only the bottom corners rounded, used for the classic notch.
pub(crate) fn bottom_rounded_rect_path(rect: Rect, radius: f64) -> BezPath {
    let rect = rect.abs();
    let r = radius.clamp(0.0, rect.width().min(rect.height()) / 2.0);
    let (x0, y0, x1, y1) = (rect.x0, rect.y0, rect.x1, rect.y1);

    let mut p = BezPath::new();
    p.move_to((x0, y0));
    p.line_to((x1, y0));
    p.line_to((x1, y1 - r));
    p.quad_to((x1, y1), (x1 - r, y1));
    p.line_to((x0 + r, y1));
    p.quad_to((x0, y1), (x0, y1 - r));
    p.close_path();
    p
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/path.rs"]
mod tests;
