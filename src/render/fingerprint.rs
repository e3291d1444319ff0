use xxhash_rust::xxh3::Xxh3;

use crate::foundation::core::Canvas;
use crate::style::background::Background;
use crate::style::color::Rgb;
use crate::style::style_set::StyleSet;
use crate::style::text::TextLayer;
use crate::style::transform::Transform;

const XXH3_SEED: u64 = 0x5f0c_2a71_93e4_d6b8;

/// Stable fingerprint of everything that determines one composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct RenderFingerprint {
    pub(crate) hi: u64,
    pub(crate) lo: u64,
}

/// Inputs that are not part of the style itself.
pub(crate) struct FingerprintInputs<'a> {
    pub(crate) image_id: &'a str,
    pub(crate) screenshot: Option<&'a str>,
    pub(crate) canvas: Canvas,
    pub(crate) library_generation: u64,
    pub(crate) font_count: usize,
    pub(crate) noise_seed: u64,
}

pub(crate) fn fingerprint_render(style: &StyleSet, inputs: &FingerprintInputs<'_>) -> RenderFingerprint {
    let mut h = StableHasher::new();
    h.write_str(inputs.image_id);
    h.write_opt_str(inputs.screenshot);
    h.write_u32(inputs.canvas.width);
    h.write_u32(inputs.canvas.height);
    h.write_u64(inputs.library_generation);
    h.write_u64(inputs.font_count as u64);
    h.write_u64(inputs.noise_seed);
    write_background(&mut h, &style.background);
    write_transform(&mut h, &style.transform);
    write_text_layer(&mut h, &style.text.headline.layer);
    h.write_u8(style.text.headline.position as u8);
    h.write_f64(style.text.headline.offset_y);
    h.write_f64(style.text.headline.line_height_percent);
    write_text_layer(&mut h, &style.text.subheadline.layer);
    h.write_f64(style.text.subheadline.opacity);
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn write_opt_str(&mut self, s: Option<&str>) {
        match s {
            Some(s) => {
                self.write_u8(1);
                self.write_str(s);
            }
            None => self.write_u8(0),
        }
    }

    fn write_rgb(&mut self, c: Rgb) {
        self.write_bytes(&[c.r, c.g, c.b]);
    }

    fn finish(self) -> RenderFingerprint {
        let v = self.inner.digest128();
        RenderFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_background(h: &mut StableHasher, bg: &Background) {
    h.write_u8(bg.kind as u8);
    h.write_f64(bg.gradient.angle);
    h.write_u32(bg.gradient.stops.len() as u32);
    for s in &bg.gradient.stops {
        h.write_rgb(s.color);
        h.write_f64(s.position);
    }
    h.write_rgb(bg.solid);
    h.write_opt_str(bg.image.as_ref().map(|r| r.as_str()));
    h.write_u8(bg.image_fit as u8);
    h.write_f64(bg.image_blur);
    h.write_rgb(bg.overlay_color);
    h.write_f64(bg.overlay_opacity);
    h.write_bool(bg.noise);
    h.write_f64(bg.noise_intensity);
}

fn write_transform(h: &mut StableHasher, t: &Transform) {
    for v in [t.scale, t.x, t.y, t.rotation, t.perspective, t.corner_radius] {
        h.write_f64(v);
    }
    let s = &t.shadow;
    h.write_bool(s.enabled);
    h.write_rgb(s.color);
    for v in [s.blur, s.opacity, s.offset_x, s.offset_y] {
        h.write_f64(v);
    }
    let f = &t.frame;
    h.write_bool(f.enabled);
    h.write_u8(f.style as u8);
    h.write_rgb(f.color);
    h.write_f64(f.width);
    h.write_f64(f.opacity);
    h.write_bool(t.use_3d);
    for v in [t.rotation_3d.x, t.rotation_3d.y, t.rotation_3d.z] {
        h.write_f64(v);
    }
}

fn write_text_layer(h: &mut StableHasher, l: &TextLayer) {
    // Only the shown language affects pixels.
    h.write_str(l.resolved_text());
    h.write_str(&l.font);
    h.write_f64(l.size_px);
    h.write_u32(u32::from(l.weight));
    h.write_bool(l.italic);
    h.write_bool(l.underline);
    h.write_bool(l.strikethrough);
    h.write_rgb(l.color);
}

#[cfg(test)]
#[path = "../../tests/unit/render/fingerprint.rs"]
mod tests;
