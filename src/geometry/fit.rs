use kurbo::{Affine, Point, Rect, Vec2};

use crate::foundation::core::Canvas;
use crate::style::transform::Transform;

/// Reference width the corner radius is authored against.
pub const CORNER_REFERENCE_WIDTH: f64 = 400.0;

/// Place an image of `image_aspect` (w/h) on the canvas.
///
/// Width is `scale_percent` of the canvas width; if the resulting height exceeds `scale_percent`
/// of the canvas height, height binds instead. The anchors interpolate the top-left corner across
/// the remaining free space, so values outside 0..=100 push the image off-canvas.
pub fn fit_rect(
    image_aspect: f64,
    canvas: Canvas,
    scale_percent: f64,
    anchor_x: f64,
    anchor_y: f64,
) -> Rect {
    let aspect = if image_aspect.is_finite() && image_aspect > 0.0 {
        image_aspect
    } else {
        1.0
    };
    let s = if scale_percent.is_finite() {
        scale_percent.max(0.0) / 100.0
    } else {
        0.0
    };
    let (cw, ch) = (canvas.w(), canvas.h());

    let mut w = cw * s;
    let mut h = w / aspect;
    let max_h = ch * s;
    if h > max_h {
        h = max_h;
        w = h * aspect;
    }

    let ax = finite_or(anchor_x, 50.0) / 100.0;
    let ay = finite_or(anchor_y, 50.0) / 100.0;
    let x = (cw - w) * ax;
    let y = (ch - h) * ay;
    Rect::new(x, y, x + w, y + h)
}

/// Rotation plus perspective shear about `center`.
///
/// Translate to the centre, rotate, shear `y` by `perspective * 0.01 * x`, translate back.
/// The same affine must drive the screenshot fill, its shadow and its frame.
pub fn compose_transform(center: Point, rotation_deg: f64, perspective: f64) -> Affine {
    let k = finite_or(perspective, 0.0) * 0.01;
    let shear = Affine::new([1.0, k, 0.0, 1.0, 0.0, 0.0]);
    Affine::translate(center.to_vec2())
        * Affine::rotate(finite_or(rotation_deg, 0.0).to_radians())
        * shear
        * Affine::translate(-center.to_vec2())
}

/// Corner radius in canvas pixels for a placement `rect`.
pub fn corner_radius_px(corner_radius: f64, rect: Rect) -> f64 {
    let r = finite_or(corner_radius, 0.0).max(0.0) * rect.width() / CORNER_REFERENCE_WIDTH;
    r.min(rect.width().min(rect.height()) / 2.0).max(0.0)
}

/// Everything the screenshot layer needs to know about where it goes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Untransformed placement rectangle.
    pub rect: Rect,
    /// Scaled corner radius.
    pub radius: f64,
    /// Rotation/perspective about the rect centre.
    pub affine: Affine,
}

impl Placement {
    /// Placement for an image of `image_aspect` under `transform`.
    pub fn compute(transform: &Transform, image_aspect: f64, canvas: Canvas) -> Self {
        let rect = fit_rect(image_aspect, canvas, transform.scale, transform.x, transform.y);
        Self {
            rect,
            radius: corner_radius_px(transform.corner_radius, rect),
            affine: compose_transform(rect.center(), transform.rotation, transform.perspective),
        }
    }

    /// Affine with an additional canvas-space offset applied after rotation/shear.
    pub fn offset_affine(&self, offset: Vec2) -> Affine {
        Affine::translate(offset) * self.affine
    }
}

fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/fit.rs"]
mod tests;
