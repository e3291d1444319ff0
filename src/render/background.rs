use kurbo::{Affine, Rect, Vec2};
use rayon::prelude::*;

use crate::assets::library::{ImageLibrary, RasterImage};
use crate::effects::blur::{blur_rgba8_premul, radius_for_sigma};
use crate::foundation::core::Canvas;
use crate::foundation::error::ShotframeResult;
use crate::foundation::math::percent_to_alpha;
use crate::render::surface::{Painter, Surface, affine_to_cpu, rect_to_cpu};
use crate::style::background::{Background, BackgroundKind, Gradient, GradientStop, ImageFit};
use crate::style::color::Rgb;

/// Paint the base layer.
///
/// Gradient and solid backgrounds are opaque. An image background with no resolvable raster
/// leaves the surface as it was.
pub(crate) fn render_background(
    surface: &mut Surface,
    painter: &mut Painter,
    bg: &Background,
    images: &ImageLibrary,
) -> ShotframeResult<()> {
    match bg.kind {
        BackgroundKind::Gradient => {
            paint_gradient(surface, &bg.gradient);
            Ok(())
        }
        BackgroundKind::Solid => {
            surface.fill(bg.solid.with_alpha(255).to_array());
            Ok(())
        }
        BackgroundKind::Image => {
            let Some(raster) = bg.image.as_ref().and_then(|r| images.get(r)) else {
                tracing::debug!(image = ?bg.image, "background image unavailable, skipping");
                return Ok(());
            };
            paint_image(surface, painter, raster, bg.image_fit, bg.image_blur)?;
            if bg.overlay_opacity > 0.0 {
                let a = percent_to_alpha(bg.overlay_opacity);
                let wash = bg.overlay_color.with_alpha(a).to_array();
                let layer = wash.repeat(surface.canvas().rgba_len() / 4);
                surface.composite(&layer, 1.0)?;
            }
            Ok(())
        }
    }
}

/// Gradient direction for a CSS-style angle (0° up, clockwise).
pub(crate) fn gradient_direction(angle_deg: f64) -> Vec2 {
    let a = angle_deg.to_radians();
    Vec2::new(a.sin(), -a.cos())
}

/// Parametric offset of point `(x, y)` along the gradient line.
///
/// The line passes through the canvas centre and is as long as the canvas diagonal.
pub(crate) fn gradient_t(canvas: Canvas, dir: Vec2, x: f64, y: f64) -> f64 {
    let (w, h) = (canvas.w(), canvas.h());
    let diag = w.hypot(h);
    let d = Vec2::new(x - w / 2.0, y - h / 2.0);
    d.dot(dir) / diag + 0.5
}

/// Colour at offset `t`. Stops are taken in slice order.
pub(crate) fn sample_stops(stops: &[GradientStop], t: f64) -> Option<[f64; 3]> {
    let first = stops.first()?;
    let t = t * 100.0;
    if t <= first.position {
        return Some(first.color.channels_f64());
    }
    for pair in stops.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if t <= b.position {
            let span = b.position - a.position;
            let f = if span > 0.0 {
                ((t - a.position) / span).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let ca = a.color.channels_f64();
            let cb = b.color.channels_f64();
            return Some([
                ca[0] + (cb[0] - ca[0]) * f,
                ca[1] + (cb[1] - ca[1]) * f,
                ca[2] + (cb[2] - ca[2]) * f,
            ]);
        }
    }
    stops.last().map(|s| s.color.channels_f64())
}

fn paint_gradient(surface: &mut Surface, gradient: &Gradient) {
    let sorted = gradient.sorted_stops();
    let stops: &[GradientStop] = &sorted;
    if stops.is_empty() {
        tracing::debug!("gradient has no stops, skipping");
        return;
    }
    let canvas = surface.canvas();
    let dir = gradient_direction(if gradient.angle.is_finite() {
        gradient.angle
    } else {
        0.0
    });
    let stride = (canvas.width as usize) * 4;
    surface
        .data_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let py = y as f64 + 0.5;
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let t = gradient_t(canvas, dir, x as f64 + 0.5, py);
                let c = sample_stops(stops, t).unwrap_or([0.0; 3]);
                px[0] = c[0].round().clamp(0.0, 255.0) as u8;
                px[1] = c[1].round().clamp(0.0, 255.0) as u8;
                px[2] = c[2].round().clamp(0.0, 255.0) as u8;
                px[3] = 255;
            }
        });
}

/// Destination rect for an image of `iw`×`ih` under `fit`, centred on the canvas.
///
/// `Cover` overflows the canvas on the longer axis (the overflow is cropped); `Contain`
/// letterboxes.
pub(crate) fn fit_background(canvas: Canvas, iw: f64, ih: f64, fit: ImageFit) -> Rect {
    let (cw, ch) = (canvas.w(), canvas.h());
    let s = match fit {
        ImageFit::Cover => (cw / iw).max(ch / ih),
        ImageFit::Contain => (cw / iw).min(ch / ih),
    };
    let (w, h) = (iw * s, ih * s);
    let x = (cw - w) / 2.0;
    let y = (ch - h) / 2.0;
    Rect::new(x, y, x + w, y + h)
}

fn paint_image(
    surface: &mut Surface,
    painter: &mut Painter,
    raster: &RasterImage,
    fit: ImageFit,
    blur: f64,
) -> ShotframeResult<()> {
    let canvas = surface.canvas();
    if fit == ImageFit::Contain {
        surface.fill(Rgb::BLACK.with_alpha(255).to_array());
    }
    let (iw, ih) = (f64::from(raster.width()), f64::from(raster.height()));
    let dst = fit_background(canvas, iw, ih, fit);
    let tr = Affine::translate((dst.x0, dst.y0)) * Affine::scale(dst.width() / iw);

    let layer = painter.paint_layer(canvas, |ctx| {
        ctx.set_transform(affine_to_cpu(tr));
        ctx.set_paint(raster.paint());
        ctx.fill_rect(&rect_to_cpu(Rect::new(0.0, 0.0, iw, ih)));
        Ok(())
    })?;

    let sigma = if blur.is_finite() { blur.max(0.0) as f32 } else { 0.0 };
    let radius = radius_for_sigma(sigma);
    let layer = if radius > 0 {
        blur_rgba8_premul(&layer, canvas.width, canvas.height, radius, sigma)?
    } else {
        layer
    };
    surface.composite(&layer, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
