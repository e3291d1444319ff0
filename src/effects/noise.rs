use rayon::prelude::*;

use crate::foundation::math::Fnv1a64;

/// Uniform value in `[0, 1)` for one channel of one pixel.
pub(crate) fn noise01(seed: u64, x: u32, y: u32, channel: u32) -> f64 {
    let mut h = Fnv1a64::new(seed ^ Fnv1a64::OFFSET_BASIS);
    h.write_u32(x);
    h.write_u32(y);
    h.write_u32(channel);
    let v = h.finish() >> 11;
    (v as f64) / ((1u64 << 53) as f64)
}

/// Perturb each colour channel by `(u - 0.5) * intensity`, leaving alpha alone.
///
/// Works in premultiplied space, so channels clamp to `[0, alpha]`; for the opaque background this
/// is the plain `[0, 255]` clamp.
pub(crate) fn apply_noise_in_place(buf: &mut [u8], width: u32, seed: u64, intensity: f64) {
    if !intensity.is_finite() || intensity <= 0.0 || width == 0 {
        return;
    }
    let intensity = intensity.min(100.0);
    let stride = (width as usize) * 4;
    buf.par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let a = f64::from(px[3]);
                for c in 0..3 {
                    let u = noise01(seed, x as u32, y as u32, c as u32);
                    let v = f64::from(px[c]) + (u - 0.5) * intensity;
                    px[c] = v.round().clamp(0.0, a) as u8;
                }
            }
        });
}

#[cfg(test)]
#[path = "../../tests/unit/effects/noise.rs"]
mod tests;
