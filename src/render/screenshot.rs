use kurbo::{Affine, BezPath, Rect, Vec2};

use crate::assets::library::RasterImage;
use crate::effects::blur::{blur_region_in_place, radius_for_sigma};
use crate::foundation::core::Canvas;
use crate::foundation::error::ShotframeResult;
use crate::foundation::math::percent_to_alpha;
use crate::geometry::fit::Placement;
use crate::geometry::path::{bottom_rounded_rect_path, rounded_rect_path};
use crate::render::surface::{Painter, Surface, affine_to_cpu, bezpath_to_cpu};
use crate::style::transform::{Frame, NotchKind, Shadow, Transform};

/// Paint shadow, clipped screenshot and frame, in that order.
pub(crate) fn render_screenshot(
    surface: &mut Surface,
    painter: &mut Painter,
    transform: &Transform,
    image: &RasterImage,
) -> ShotframeResult<Placement> {
    let canvas = surface.canvas();
    let placement = Placement::compute(transform, image.aspect(), canvas);
    if placement.rect.width() <= 0.0 || placement.rect.height() <= 0.0 {
        return Ok(placement);
    }

    if transform.shadow.enabled {
        paint_shadow(surface, painter, &placement, &transform.shadow)?;
    }
    paint_clipped_image(surface, painter, &placement, image)?;
    if transform.frame.enabled {
        paint_frame(surface, painter, &placement, &transform.frame)?;
    }
    Ok(placement)
}

fn paint_shadow(
    surface: &mut Surface,
    painter: &mut Painter,
    placement: &Placement,
    shadow: &Shadow,
) -> ShotframeResult<()> {
    let alpha = percent_to_alpha(shadow.opacity);
    if alpha == 0 {
        return Ok(());
    }
    let canvas = surface.canvas();
    let offset = Vec2::new(finite(shadow.offset_x), finite(shadow.offset_y));
    let tr = placement.offset_affine(offset);
    let path = bezpath_to_cpu(&rounded_rect_path(placement.rect, placement.radius));

    let mut layer = painter.paint_layer(canvas, |ctx| {
        ctx.set_transform(affine_to_cpu(tr));
        ctx.set_paint(shadow.color.to_cpu(alpha));
        ctx.fill_path(&path);
        Ok(())
    })?;

    let sigma = (finite(shadow.blur).max(0.0) / 2.0) as f32;
    let radius = radius_for_sigma(sigma);
    if radius > 0 {
        let region = pixel_region(canvas, tr.transform_rect_bbox(placement.rect), radius);
        blur_region_in_place(&mut layer, canvas.width, canvas.height, region, radius, sigma)?;
    }
    surface.composite(&layer, 1.0)
}

fn paint_clipped_image(
    surface: &mut Surface,
    painter: &mut Painter,
    placement: &Placement,
    image: &RasterImage,
) -> ShotframeResult<()> {
    let (iw, ih) = (f64::from(image.width()), f64::from(image.height()));
    let s = placement.rect.width() / iw;
    // Aspect is preserved by placement, so one scale maps image space to the rect.
    let tr = placement.affine
        * Affine::translate((placement.rect.x0, placement.rect.y0))
        * Affine::scale(s);
    let clip = bezpath_to_cpu(&rounded_rect_path(
        Rect::new(0.0, 0.0, iw, ih),
        placement.radius / s,
    ));

    painter.paint(surface, 1.0, |ctx| {
        ctx.set_transform(affine_to_cpu(tr));
        ctx.set_paint(image.paint());
        ctx.fill_path(&clip);
        Ok(())
    })
}

/// Outline around the placement rect, centred half a stroke outside it.
pub(crate) fn frame_outline(placement: &Placement, stroke_width: f64) -> BezPath {
    let half = stroke_width / 2.0;
    rounded_rect_path(placement.rect.inflate(half, half), placement.radius + half)
}

/// Cutout shape for `kind`, sized from the placement rect.
pub(crate) fn cutout_path(placement: &Placement, kind: NotchKind) -> BezPath {
    let r = placement.rect;
    let w = r.width();
    let cx = r.center().x;
    match kind {
        NotchKind::Island => {
            let (iw, ih) = (w * 0.28, w * 0.08);
            let top = r.y0 + w * 0.025;
            rounded_rect_path(
                Rect::new(cx - iw / 2.0, top, cx + iw / 2.0, top + ih),
                ih / 2.0,
            )
        }
        NotchKind::Notch => {
            let (nw, nh) = (w * 0.5, w * 0.065);
            bottom_rounded_rect_path(
                Rect::new(cx - nw / 2.0, r.y0, cx + nw / 2.0, r.y0 + nh),
                nh * 0.6,
            )
        }
    }
}

fn paint_frame(
    surface: &mut Surface,
    painter: &mut Painter,
    placement: &Placement,
    frame: &Frame,
) -> ShotframeResult<()> {
    let opacity = (finite(frame.opacity).clamp(0.0, 100.0) / 100.0) as f32;
    if opacity <= 0.0 {
        return Ok(());
    }
    let stroke_width = finite(frame.width).max(0.0);
    let outline = bezpath_to_cpu(&frame_outline(placement, stroke_width));
    let cutout = frame
        .style
        .notch()
        .map(|kind| bezpath_to_cpu(&cutout_path(placement, kind)));

    // Separate draw with the same affine keeps the frame registered to the image.
    painter.paint(surface, opacity, |ctx| {
        ctx.set_transform(affine_to_cpu(placement.affine));
        if stroke_width > 0.0 {
            ctx.set_paint(frame.color.to_cpu(255));
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(stroke_width));
            ctx.stroke_path(&outline);
        }
        if let Some(cutout) = &cutout {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 0, 255));
            ctx.fill_path(cutout);
        }
        Ok(())
    })
}

fn pixel_region(canvas: Canvas, bbox: Rect, margin: u32) -> [u32; 4] {
    let m = f64::from(margin) + 1.0;
    let clamp_x = |v: f64| v.clamp(0.0, canvas.w()) as u32;
    let clamp_y = |v: f64| v.clamp(0.0, canvas.h()) as u32;
    [
        clamp_x((bbox.x0 - m).floor()),
        clamp_y((bbox.y0 - m).floor()),
        clamp_x((bbox.x1 + m).ceil()),
        clamp_y((bbox.y1 + m).ceil()),
    ]
}

fn finite(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/render/screenshot.rs"]
mod tests;
