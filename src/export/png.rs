use image::ImageEncoder;
use image::codecs::png::PngEncoder;

use crate::effects::composite::flatten_over_black;
use crate::foundation::error::{ShotframeError, ShotframeResult};
use crate::render::surface::Surface;

/// Encode the surface as an RGB8 PNG, flattened over opaque black.
pub fn encode_png(surface: &Surface) -> ShotframeResult<Vec<u8>> {
    let rgb = flatten_over_black(surface.data());
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            &rgb,
            surface.width(),
            surface.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ShotframeError::export(format!("PNG encoding failed: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
