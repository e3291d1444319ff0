use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::foundation::error::{ShotframeError, ShotframeResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Declared identity of a registered face.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceKey {
    /// Family name as requested by styles (e.g. `Inter`).
    pub family: String,
    /// CSS-style weight, 100..=900.
    pub weight: u16,
    /// Italic face.
    pub italic: bool,
}

/// A registered face: its key, the name Parley knows it by, and drawable font data.
pub(crate) struct FontFace {
    pub(crate) key: FaceKey,
    stack_name: String,
    pub(crate) data: vello_cpu::peniko::FontData,
}

/// Registered fonts plus the Parley contexts used to shape and measure with them.
pub struct FontBook {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    faces: Vec<FontFace>,
    fallback: Option<String>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("faces", &self.faces.iter().map(|x| &x.key).collect::<Vec<_>>())
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl FontBook {
    /// Empty book with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            faces: Vec::new(),
            fallback: None,
        }
    }

    /// Register one face from raw TTF/OTF bytes under a declared family/weight/style.
    pub fn register_face(
        &mut self,
        family: &str,
        weight: u16,
        italic: bool,
        bytes: Vec<u8>,
    ) -> ShotframeResult<()> {
        if family.trim().is_empty() {
            return Err(ShotframeError::validation("font family must be non-empty"));
        }
        let key = FaceKey {
            family: family.to_owned(),
            weight: weight.clamp(1, 1000),
            italic,
        };
        if self.faces.iter().any(|f| same_key(&f.key, &key)) {
            return Ok(());
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            ShotframeError::validation(format!("no font families registered for '{family}'"))
        })?;
        let stack_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ShotframeError::validation("registered font family has no name"))?
            .to_string();

        let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        tracing::debug!(family, weight, italic, stack_name, "registered font face");
        if self.fallback.is_none() {
            self.fallback = Some(family.to_owned());
        }
        self.faces.push(FontFace {
            key,
            stack_name,
            data,
        });
        Ok(())
    }

    /// Family used when a requested family has no registered faces.
    pub fn set_fallback(&mut self, family: impl Into<String>) {
        self.fallback = Some(family.into());
    }

    /// Whether any face of `family` is registered.
    pub fn has_family(&self, family: &str) -> bool {
        let k = family_key(family);
        self.faces.iter().any(|f| family_key(&f.key.family) == k)
    }

    /// Whether `family` at exactly `weight` is registered.
    pub fn has_weight(&self, family: &str, weight: u16) -> bool {
        let k = family_key(family);
        self.faces
            .iter()
            .any(|f| f.key.weight == weight && family_key(&f.key.family) == k)
    }

    /// Number of registered faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// True when no face is registered.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Face best matching the request, falling back to the generic family.
    pub fn resolve(&self, family: &str, weight: u16, italic: bool) -> Option<&FaceKey> {
        self.resolve_index(family, weight, italic)
            .map(|i| &self.faces[i].key)
    }

    pub(crate) fn resolve_index(&self, family: &str, weight: u16, italic: bool) -> Option<usize> {
        let keys = self.faces.iter().map(|f| &f.key).collect::<Vec<_>>();
        pick_face(&keys, family, weight, italic)
            .or_else(|| {
                let fb = self.fallback.as_deref()?;
                pick_face(&keys, fb, weight, italic)
            })
            .or_else(|| {
                let first = keys.first()?;
                pick_face(&keys, &first.family, weight, italic)
            })
    }

    pub(crate) fn face(&self, index: usize) -> Option<&FontFace> {
        self.faces.get(index)
    }

    /// Shape a single unwrapped line of text with face `index`.
    pub(crate) fn layout_line(
        &mut self,
        index: usize,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> ShotframeResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ShotframeError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let face = self
            .faces
            .get(index)
            .ok_or_else(|| ShotframeError::render(format!("font face {index} out of range")))?;
        let stack_name = face.stack_name.clone();
        let weight = f32::from(face.key.weight);
        let style = if face.key.italic {
            parley::style::FontStyle::Italic
        } else {
            parley::style::FontStyle::Normal
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(stack_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(weight),
        ));
        builder.push_default(parley::style::StyleProperty::FontStyle(style));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Advance width of `text` set in face `index` at `size_px`.
    pub(crate) fn measure(&mut self, index: usize, text: &str, size_px: f32) -> ShotframeResult<f32> {
        if text.is_empty() {
            return Ok(0.0);
        }
        Ok(self
            .layout_line(index, text, size_px, TextBrushRgba8::default())?
            .width())
    }
}

fn family_key(family: &str) -> String {
    family
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

fn same_key(a: &FaceKey, b: &FaceKey) -> bool {
    a.weight == b.weight && a.italic == b.italic && family_key(&a.family) == family_key(&b.family)
}

/// Nearest-weight face of `family`; a matching italic flag beats weight distance.
pub(crate) fn pick_face(keys: &[&FaceKey], family: &str, weight: u16, italic: bool) -> Option<usize> {
    let k = family_key(family);
    keys.iter()
        .enumerate()
        .filter(|(_, f)| family_key(&f.family) == k)
        .min_by_key(|(_, f)| {
            let style_miss = u16::from(f.italic != italic);
            // Ties go to the heavier face, like CSS matching above 500.
            let dist = f.weight.abs_diff(weight);
            (style_miss, dist, u16::MAX - f.weight)
        })
        .map(|(i, _)| i)
}

/// Font-loading collaborator.
///
/// Loading happens before a render is triggered; text drawn with a family that is not loaded yet
/// uses the fallback face until the next render.
pub trait FontLoader {
    /// Make `family` available in `book` at `weights`. Returns whether every weight is present.
    fn ensure_loaded(
        &mut self,
        book: &mut FontBook,
        family: &str,
        weights: &[u16],
    ) -> ShotframeResult<bool>;
}

/// Loads `.ttf`/`.otf` files from a directory, named `<Family>-<Style>.<ext>`.
#[derive(Clone, Debug)]
pub struct DirFontLoader {
    root: PathBuf,
}

impl DirFontLoader {
    /// Loader reading from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Register every font file under the root. Returns the number of faces added.
    pub fn load_all(&self, book: &mut FontBook) -> ShotframeResult<usize> {
        let mut added = 0;
        for (path, key) in self.scan()? {
            if book.has_weight(&key.family, key.weight) {
                continue;
            }
            match read_and_register(book, &path, &key) {
                Ok(()) => added += 1,
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping font file"),
            }
        }
        Ok(added)
    }

    fn scan(&self) -> ShotframeResult<Vec<(PathBuf, FaceKey)>> {
        let rd = std::fs::read_dir(&self.root).map_err(|e| {
            ShotframeError::validation(format!(
                "failed to read font dir '{}': {e}",
                self.root.display()
            ))
        })?;
        let mut out = Vec::new();
        for entry in rd.flatten() {
            let path = entry.path();
            let is_font = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"));
            if !is_font {
                continue;
            }
            if let Some(key) = path.file_stem().and_then(|s| s.to_str()).map(parse_font_stem) {
                out.push((path, key));
            }
        }
        out.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(out)
    }
}

impl FontLoader for DirFontLoader {
    fn ensure_loaded(
        &mut self,
        book: &mut FontBook,
        family: &str,
        weights: &[u16],
    ) -> ShotframeResult<bool> {
        let want = family_key(family);
        for (path, key) in self.scan()? {
            if family_key(&key.family) != want || book.has_weight(&key.family, key.weight) {
                continue;
            }
            if !weights.is_empty() && !weights.contains(&key.weight) {
                continue;
            }
            if let Err(e) = read_and_register(book, &path, &key) {
                tracing::warn!(path = %path.display(), error = %e, "font load failed");
            }
        }
        Ok(weights.iter().all(|w| book.has_weight(family, *w)))
    }
}

fn read_and_register(book: &mut FontBook, path: &Path, key: &FaceKey) -> ShotframeResult<()> {
    let bytes = std::fs::read(path).map_err(|e| {
        ShotframeError::validation(format!("failed to read font '{}': {e}", path.display()))
    })?;
    book.register_face(&key.family, key.weight, key.italic, bytes)
}

/// Map a file stem like `Inter-SemiBoldItalic` to its face key.
pub(crate) fn parse_font_stem(stem: &str) -> FaceKey {
    let (family, style) = match stem.rsplit_once('-') {
        Some((f, s)) if !f.is_empty() => (f, s),
        _ => (stem, "Regular"),
    };
    let lower = style.to_ascii_lowercase();
    let (base, italic) = match lower.strip_suffix("italic") {
        Some(b) => (b, true),
        None => (lower.as_str(), false),
    };
    let weight = match base {
        "thin" | "hairline" => Some(100),
        "extralight" | "ultralight" => Some(200),
        "light" => Some(300),
        "" | "regular" | "normal" | "book" => Some(400),
        "medium" => Some(500),
        "semibold" | "demibold" => Some(600),
        "bold" => Some(700),
        "extrabold" | "ultrabold" => Some(800),
        "black" | "heavy" => Some(900),
        _ => None,
    };
    match weight {
        Some(weight) => FaceKey {
            family: family.to_owned(),
            weight,
            italic,
        },
        None => FaceKey {
            family: stem.to_owned(),
            weight: 400,
            italic: false,
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
