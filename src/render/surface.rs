use kurbo::{Affine, BezPath};

use crate::effects::composite::over_in_place;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ShotframeError, ShotframeResult};

/// The raster target layers accumulate into: premultiplied RGBA8 at fixed dimensions.
///
/// Surfaces never resize; a canvas change allocates a new one.
#[derive(Clone, Debug)]
pub struct Surface {
    canvas: Canvas,
    data: Vec<u8>,
}

impl Surface {
    /// Transparent surface of `canvas` size.
    pub fn new(canvas: Canvas) -> ShotframeResult<Self> {
        canvas.validate()?;
        Ok(Self {
            canvas,
            data: vec![0u8; canvas.rgba_len()],
        })
    }

    /// Dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable premultiplied RGBA8 bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let i = ((y as usize) * (self.canvas.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Fill the whole surface with one premultiplied colour.
    pub(crate) fn fill(&mut self, px: [u8; 4]) {
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Composite a same-sized premultiplied layer on top.
    pub(crate) fn composite(&mut self, layer: &[u8], opacity: f32) -> ShotframeResult<()> {
        over_in_place(&mut self.data, layer, opacity)
    }
}

/// Cached `vello_cpu` context plus scratch pixmap for drawing isolated layers.
#[derive(Default)]
pub(crate) struct Painter {
    ctx: Option<vello_cpu::RenderContext>,
    scratch: Option<vello_cpu::Pixmap>,
}

impl Painter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Draw into a fresh transparent layer and return its premultiplied bytes.
    pub(crate) fn paint_layer(
        &mut self,
        canvas: Canvas,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> ShotframeResult<()>,
    ) -> ShotframeResult<Vec<u8>> {
        let (w, h) = cpu_dims(canvas)?;
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        let drawn = f(&mut ctx);
        let out = drawn.map(|()| {
            let pixmap = match self.scratch.take() {
                Some(p) if p.width() == w && p.height() == h => p,
                _ => vello_cpu::Pixmap::new(w, h),
            };
            let mut pixmap = pixmap;
            pixmap.data_as_u8_slice_mut().fill(0);
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            let bytes = pixmap.data_as_u8_slice().to_vec();
            self.scratch = Some(pixmap);
            bytes
        });
        self.ctx = Some(ctx);
        out
    }

    /// Draw a layer and composite it over `surface` at `opacity`.
    pub(crate) fn paint(
        &mut self,
        surface: &mut Surface,
        opacity: f32,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> ShotframeResult<()>,
    ) -> ShotframeResult<()> {
        let layer = self.paint_layer(surface.canvas(), f)?;
        surface.composite(&layer, opacity)
    }
}

fn cpu_dims(canvas: Canvas) -> ShotframeResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| ShotframeError::render("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| ShotframeError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn rect_to_cpu(r: kurbo::Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
