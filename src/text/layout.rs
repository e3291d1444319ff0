use kurbo::Rect;

use crate::foundation::core::Canvas;
use crate::style::text::{Headline, Subheadline, TextPosition};

/// Symmetric side padding as a fraction of canvas width.
pub const SIDE_PADDING_FRACTION: f64 = 0.08;
/// Gap between a top-anchored headline's last line and the subheadline.
pub const SUBHEADLINE_GAP: f64 = 20.0;
/// Subheadline offset from the text anchor when it does not follow a headline.
pub const SUBHEADLINE_ANCHOR_OFFSET: f64 = 30.0;
/// Fixed subheadline line-height multiplier.
pub const SUBHEADLINE_LINE_HEIGHT: f64 = 1.4;

/// Width available to wrapped text.
pub fn available_width(canvas: Canvas) -> f64 {
    canvas.w() - 2.0 * canvas.w() * SIDE_PADDING_FRACTION
}

/// Y of the text anchor for `headline.position` and `headline.offset_y`.
pub fn text_anchor(headline: &Headline, canvas: Canvas) -> f64 {
    let off = headline.offset_y / 100.0;
    match headline.position {
        TextPosition::Top => canvas.h() * off,
        TextPosition::Bottom => canvas.h() * (1.0 - off),
    }
}

/// Vertical placement of one wrapped text block.
///
/// With `edge == Top` each `ys[i]` is the top of line `i`; with `edge == Bottom` it is the bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct LinePlan {
    /// Which edge of each line `ys` refers to.
    pub edge: TextPosition,
    /// Font size in px.
    pub size: f64,
    /// Distance between consecutive lines.
    pub line_height: f64,
    /// Per-line anchor y.
    pub ys: Vec<f64>,
}

impl LinePlan {
    fn stacked(edge: TextPosition, start: f64, size: f64, line_height: f64, count: usize) -> Self {
        Self {
            edge,
            size,
            line_height,
            ys: (0..count).map(|i| start + i as f64 * line_height).collect(),
        }
    }

    /// Lower end of the block: last line start plus font size.
    pub fn end_y(&self) -> f64 {
        match self.ys.last() {
            Some(&y) => match self.edge {
                TextPosition::Top => y + self.size,
                TextPosition::Bottom => y,
            },
            None => 0.0,
        }
    }

    /// Top of line `i` for a line box `layout_height` tall.
    pub fn line_top(&self, i: usize, layout_height: f64) -> f64 {
        let y = self.ys.get(i).copied().unwrap_or(0.0);
        match self.edge {
            TextPosition::Top => y,
            TextPosition::Bottom => y - layout_height,
        }
    }
}

/// Headline lines laid out from the anchor.
///
/// Bottom-anchored blocks are shifted up by `(count - 1) * line_height` so the last line sits on
/// the anchor.
pub fn place_headline(count: usize, headline: &Headline, canvas: Canvas) -> LinePlan {
    let size = headline.layer.size_px;
    let lh = size * headline.line_height_percent / 100.0;
    let anchor = text_anchor(headline, canvas);
    let start = match headline.position {
        TextPosition::Top => anchor,
        TextPosition::Bottom => anchor - count.saturating_sub(1) as f64 * lh,
    };
    LinePlan::stacked(headline.position, start, size, lh, count)
}

/// Subheadline lines; they always hang down from their start.
///
/// `headline_plan` is the placed headline when it has text.
pub fn place_subheadline(
    count: usize,
    sub: &Subheadline,
    headline: &Headline,
    headline_plan: Option<&LinePlan>,
    canvas: Canvas,
) -> LinePlan {
    let size = sub.layer.size_px;
    let start = match (headline.position, headline_plan) {
        (TextPosition::Top, Some(plan)) if !plan.ys.is_empty() => plan.end_y() + SUBHEADLINE_GAP,
        _ => text_anchor(headline, canvas) + SUBHEADLINE_ANCHOR_OFFSET,
    };
    LinePlan::stacked(
        TextPosition::Top,
        start,
        size,
        size * SUBHEADLINE_LINE_HEIGHT,
        count,
    )
}

/// Which decoration to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoration {
    /// Line under the glyphs.
    Underline,
    /// Line through the glyphs.
    Strikethrough,
}

/// Decoration bar for line `i` of `plan`, `width` wide and centred on `center_x`.
///
/// The vertical offset depends on whether `ys` marks the top or the bottom of the line.
pub fn decoration_rect(
    plan: &LinePlan,
    i: usize,
    width: f64,
    center_x: f64,
    kind: Decoration,
) -> Option<Rect> {
    let y = *plan.ys.get(i)?;
    if width <= 0.0 {
        return None;
    }
    let s = plan.size;
    let thickness = (s / 20.0).max(1.0);
    let top = match (plan.edge, kind) {
        (TextPosition::Top, Decoration::Underline) => y + s * 0.95,
        (TextPosition::Top, Decoration::Strikethrough) => y + s * 0.55,
        (TextPosition::Bottom, Decoration::Underline) => y - s * 0.08,
        (TextPosition::Bottom, Decoration::Strikethrough) => y - s * 0.45,
    };
    let x0 = center_x - width / 2.0;
    Some(Rect::new(x0, top, x0 + width, top + thickness))
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
