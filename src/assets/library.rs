use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::assets::decode::{
    decode_image, image_paint, pixmap_from_premul_bytes, premultiply_rgba8_in_place,
};
use crate::foundation::error::{ShotframeError, ShotframeResult};

/// Reference to a raster asset: a project-relative path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Build a validated, normalized reference.
    pub fn new(path: &str) -> ShotframeResult<Self> {
        normalize_rel_path(path).map(Self)
    }

    /// Path text as stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize and validate project-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> ShotframeResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(ShotframeError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(ShotframeError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ShotframeError::validation(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ShotframeError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

/// Decoded raster in premultiplied RGBA8, cheap to clone.
#[derive(Clone, Debug)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixmap: Arc<vello_cpu::Pixmap>,
}

impl RasterImage {
    /// Build from straight-alpha RGBA8 bytes.
    pub fn from_rgba8_straight(width: u32, height: u32, mut rgba: Vec<u8>) -> ShotframeResult<Self> {
        premultiply_rgba8_in_place(&mut rgba);
        Self::from_rgba8_premul(width, height, &rgba)
    }

    /// Build from premultiplied RGBA8 bytes.
    pub fn from_rgba8_premul(width: u32, height: u32, rgba: &[u8]) -> ShotframeResult<Self> {
        if width == 0 || height == 0 {
            return Err(ShotframeError::validation("raster image must be non-empty"));
        }
        let pixmap = pixmap_from_premul_bytes(rgba, width, height)?;
        Ok(Self {
            width,
            height,
            pixmap: Arc::new(pixmap),
        })
    }

    /// Uniform opaque image, handy for placeholders and tests.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> ShotframeResult<Self> {
        let px = [rgb[0], rgb[1], rgb[2], 255];
        let bytes = px.repeat((width as usize) * (height as usize));
        Self::from_rgba8_premul(width, height, &bytes)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Row-major premultiplied RGBA8 bytes.
    pub fn premul_bytes(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    pub(crate) fn paint(&self) -> vello_cpu::Image {
        image_paint(Arc::clone(&self.pixmap))
    }
}

/// Decoded rasters keyed by [`ImageRef`].
///
/// `generation` increases on every change so render fingerprints notice replaced pixels.
#[derive(Clone, Debug, Default)]
pub struct ImageLibrary {
    root: Option<PathBuf>,
    images: HashMap<ImageRef, RasterImage>,
    generation: u64,
}

impl ImageLibrary {
    /// Empty in-memory library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Library that lazily loads references relative to `root` via [`ImageLibrary::load`].
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }

    /// Register a decoded raster.
    pub fn insert(&mut self, r: ImageRef, image: RasterImage) {
        self.images.insert(r, image);
        self.generation += 1;
    }

    /// Decode and register encoded bytes.
    pub fn insert_encoded(&mut self, r: ImageRef, bytes: &[u8]) -> ShotframeResult<()> {
        let image = decode_image(bytes)?;
        self.insert(r, image);
        Ok(())
    }

    /// Read, decode and register `r` from the library root.
    pub fn load(&mut self, r: &ImageRef) -> ShotframeResult<&RasterImage> {
        if !self.images.contains_key(r) {
            let root = self.root.as_deref().ok_or_else(|| {
                ShotframeError::validation(format!("no asset root to load '{r}' from"))
            })?;
            let p = root.join(Path::new(r.as_str()));
            let bytes = std::fs::read(&p).map_err(|e| {
                ShotframeError::validation(format!("failed to read asset '{}': {e}", p.display()))
            })?;
            self.insert_encoded(r.clone(), &bytes)?;
        }
        self.images
            .get(r)
            .ok_or_else(|| ShotframeError::validation(format!("asset '{r}' missing")))
    }

    /// Already-loaded raster for `r`.
    pub fn get(&self, r: &ImageRef) -> Option<&RasterImage> {
        self.images.get(r)
    }

    /// Drop a raster.
    pub fn remove(&mut self, r: &ImageRef) -> Option<RasterImage> {
        let out = self.images.remove(r);
        if out.is_some() {
            self.generation += 1;
        }
        out
    }

    /// Change counter.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/library.rs"]
mod tests;
