use rayon::prelude::*;

use crate::foundation::error::{ShotframeError, ShotframeResult};

/// Kernel radius covering three standard deviations.
pub(crate) fn radius_for_sigma(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (sigma * 3.0).ceil() as u32
}

/// Separable gaussian blur over premultiplied RGBA8, Q16 fixed-point weights.
///
/// Edges clamp. Rows of each pass are processed in parallel.
pub(crate) fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> ShotframeResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| ShotframeError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(ShotframeError::render(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 || width == 0 || height == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

/// Blur only the pixels inside `[x0, x1) × [y0, y1)`, in place.
///
/// Exact when everything outside the region is transparent and the region already includes a
/// `radius` margin around the content.
pub(crate) fn blur_region_in_place(
    buf: &mut [u8],
    width: u32,
    height: u32,
    region: [u32; 4],
    radius: u32,
    sigma: f32,
) -> ShotframeResult<()> {
    let [x0, y0, x1, y1] = [
        region[0].min(width),
        region[1].min(height),
        region[2].min(width),
        region[3].min(height),
    ];
    if x1 <= x0 || y1 <= y0 || radius == 0 {
        return Ok(());
    }
    let (rw, rh) = (x1 - x0, y1 - y0);
    let stride = (width as usize) * 4;
    let rstride = (rw as usize) * 4;

    let mut crop = Vec::with_capacity(rstride * rh as usize);
    for y in y0..y1 {
        let start = (y as usize) * stride + (x0 as usize) * 4;
        crop.extend_from_slice(&buf[start..start + rstride]);
    }
    let blurred = blur_rgba8_premul(&crop, rw, rh, radius, sigma)?;
    for (i, y) in (y0..y1).enumerate() {
        let start = (y as usize) * stride + (x0 as usize) * 4;
        buf[start..start + rstride].copy_from_slice(&blurred[i * rstride..(i + 1) * rstride]);
    }
    Ok(())
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> ShotframeResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ShotframeError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights_f = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect::<Vec<_>>();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(ShotframeError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let stride = (width as usize) * 4;
    dst.par_chunks_mut(stride)
        .zip(src.par_chunks(stride))
        .for_each(|(drow, srow)| {
            for x in 0..w {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = (x + ki as i32 - radius).clamp(0, w - 1) as usize;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(srow[sx * 4 + c]);
                    }
                }
                let o = (x as usize) * 4;
                for c in 0..4 {
                    drow[o + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let h = height as i32;
    let stride = (width as usize) * 4;
    dst.par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, drow)| {
            for x in 0..width as usize {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sy = (y as i32 + ki as i32 - radius).clamp(0, h - 1) as usize;
                    let idx = sy * stride + x * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                    }
                }
                for c in 0..4 {
                    drow[x * 4 + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
