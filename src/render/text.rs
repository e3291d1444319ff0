use kurbo::Affine;

use crate::assets::fonts::{FontBook, TextBrushRgba8};
use crate::foundation::core::Canvas;
use crate::foundation::error::ShotframeResult;
use crate::render::surface::{Painter, Surface, affine_to_cpu, rect_to_cpu};
use crate::style::text::{TextBlock, TextLayer};
use crate::text::layout::{
    Decoration, LinePlan, available_width, decoration_rect, place_headline, place_subheadline,
};
use crate::text::wrap::wrap_text;

/// A wrapped block ready to paint.
struct ShapedBlock {
    face: usize,
    plan: LinePlan,
    lines: Vec<parley::Layout<TextBrushRgba8>>,
    layer: TextLayer,
}

/// Paint headline then subheadline.
///
/// Layers with empty text are skipped. With no fonts registered at all, text is skipped with a
/// warning; an unknown family falls back to the book's fallback family.
pub(crate) fn render_text(
    surface: &mut Surface,
    painter: &mut Painter,
    text: &TextBlock,
    fonts: &mut FontBook,
) -> ShotframeResult<()> {
    let canvas = surface.canvas();
    let headline = &text.headline;

    let head = shape_layer(fonts, &headline.layer, canvas, |n| {
        place_headline(n, headline, canvas)
    })?;
    let head_plan = head.as_ref().map(|b| b.plan.clone());
    let sub = shape_layer(fonts, &text.subheadline.layer, canvas, |n| {
        place_subheadline(n, &text.subheadline, headline, head_plan.as_ref(), canvas)
    })?;

    if let Some(block) = head {
        paint_block(surface, painter, fonts, &block, 1.0)?;
    }
    if let Some(block) = sub {
        let opacity = (text.subheadline.opacity.clamp(0.0, 100.0) / 100.0) as f32;
        paint_block(surface, painter, fonts, &block, opacity)?;
    }
    Ok(())
}

fn shape_layer(
    fonts: &mut FontBook,
    layer: &TextLayer,
    canvas: Canvas,
    place: impl FnOnce(usize) -> LinePlan,
) -> ShotframeResult<Option<ShapedBlock>> {
    let text = layer.resolved_text();
    if text.trim().is_empty() {
        return Ok(None);
    }
    if !layer.size_px.is_finite() || layer.size_px <= 0.0 {
        tracing::debug!(size = layer.size_px, "text size not drawable, skipping");
        return Ok(None);
    }
    let Some(face) = fonts.resolve_index(&layer.font, layer.weight, layer.italic) else {
        tracing::warn!(family = %layer.font, "no fonts registered, skipping text layer");
        return Ok(None);
    };
    if !fonts.has_family(&layer.font) {
        tracing::debug!(family = %layer.font, "font family not loaded, using fallback");
    }

    let size = layer.size_px as f32;
    let max_width = available_width(canvas) as f32;
    let wrapped = wrap_text(text, max_width, |s| {
        fonts.measure(face, s, size).unwrap_or(0.0)
    });

    let brush = TextBrushRgba8 {
        r: layer.color.r,
        g: layer.color.g,
        b: layer.color.b,
        a: 255,
    };
    let lines = wrapped
        .iter()
        .map(|line| fonts.layout_line(face, line, size, brush))
        .collect::<ShotframeResult<Vec<_>>>()?;

    Ok(Some(ShapedBlock {
        face,
        plan: place(lines.len()),
        lines,
        layer: layer.clone(),
    }))
}

fn paint_block(
    surface: &mut Surface,
    painter: &mut Painter,
    fonts: &FontBook,
    block: &ShapedBlock,
    opacity: f32,
) -> ShotframeResult<()> {
    let Some(face) = fonts.face(block.face) else {
        return Ok(());
    };
    let font = face.data.clone();
    let center_x = surface.canvas().w() / 2.0;
    let layer = &block.layer;
    let deco_color = layer.color.to_cpu(255);

    painter.paint(surface, opacity, |ctx| {
        for (i, layout) in block.lines.iter().enumerate() {
            let width = f64::from(layout.width());
            let x = center_x - width / 2.0;
            let top = block.plan.line_top(i, f64::from(layout.height()));
            ctx.set_transform(affine_to_cpu(Affine::translate((x, top))));
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));
                    // Absolute positions: advances and baseline already applied.
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }

            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(deco_color);
            let decorations = [
                (layer.underline, Decoration::Underline),
                (layer.strikethrough, Decoration::Strikethrough),
            ];
            for (on, kind) in decorations {
                if !on {
                    continue;
                }
                if let Some(r) = decoration_rect(&block.plan, i, width, center_x, kind) {
                    ctx.fill_rect(&rect_to_cpu(r));
                }
            }
        }
        Ok(())
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
