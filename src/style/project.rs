use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assets::library::ImageRef;
use crate::foundation::error::{ShotframeError, ShotframeResult};
use crate::style::command::StyleCommand;
use crate::style::output::OutputSize;
use crate::style::style_set::StyleSet;
use crate::style::text::DEFAULT_LANGUAGE;

/// Stable identity of an image within a project.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub String);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One screenshot in a project together with its own style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectImage {
    /// Identity.
    pub id: ImageId,
    /// Display name.
    pub name: String,
    /// Screenshot raster, if one was loaded.
    pub screenshot: Option<ImageRef>,
    /// Style owned by this image.
    pub style: StyleSet,
}

/// An ordered set of styled screenshots plus the style that seeds new images.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    /// Images in display/export order.
    pub images: Vec<ProjectImage>,
    /// Style deep-copied into newly added images.
    pub default_style: StyleSet,
    /// Index of the image shown in the editor.
    pub selected: usize,
    /// Output raster size.
    pub output: OutputSize,
    next_id: u64,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            default_style: StyleSet::default(),
            selected: 0,
            output: OutputSize::default(),
            next_id: 1,
        }
    }
}

impl Project {
    /// Empty project with default styling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an image styled with a copy of the default style and select it.
    pub fn add_image(&mut self, name: impl Into<String>, screenshot: Option<ImageRef>) -> ImageId {
        let id = self.fresh_id();
        self.images.push(ProjectImage {
            id: id.clone(),
            name: name.into(),
            screenshot,
            style: self.default_style.clone(),
        });
        self.selected = self.images.len() - 1;
        id
    }

    /// Remove an image; the selection is kept in range.
    pub fn remove_image(&mut self, id: &ImageId) -> Option<ProjectImage> {
        let idx = self.index_of(id)?;
        let removed = self.images.remove(idx);
        if self.selected > idx || self.selected >= self.images.len() {
            self.selected = self.selected.saturating_sub(1);
        }
        Some(removed)
    }

    /// Select the image at `index`.
    pub fn select(&mut self, index: usize) -> ShotframeResult<()> {
        if index >= self.images.len() {
            return Err(ShotframeError::validation(format!(
                "image index {index} out of range (have {})",
                self.images.len()
            )));
        }
        self.selected = index;
        Ok(())
    }

    /// Currently selected image.
    pub fn selected_image(&self) -> Option<&ProjectImage> {
        self.images.get(self.selected)
    }

    /// Position of `id` in the image list.
    pub fn index_of(&self, id: &ImageId) -> Option<usize> {
        self.images.iter().position(|img| &img.id == id)
    }

    /// Apply a style edit to the image at `index`.
    pub fn apply(&mut self, index: usize, cmd: StyleCommand) -> ShotframeResult<()> {
        let img = self
            .images
            .get_mut(index)
            .ok_or_else(|| ShotframeError::validation(format!("no image at index {index}")))?;
        img.style.apply(cmd)
    }

    /// Overwrite the default style with a copy of the selected image's style.
    pub fn set_current_as_default(&mut self) -> ShotframeResult<()> {
        let style = self
            .selected_image()
            .map(|img| img.style.clone())
            .ok_or_else(|| ShotframeError::validation("no image selected"))?;
        self.default_style = style;
        Ok(())
    }

    /// Copy the style of image `from` onto image `to`, keeping the target's text content.
    pub fn transfer_style(&mut self, from: usize, to: usize) -> ShotframeResult<()> {
        if from == to {
            return Ok(());
        }
        let src = self
            .images
            .get(from)
            .map(|img| img.style.clone())
            .ok_or_else(|| ShotframeError::validation(format!("no image at index {from}")))?;
        let dst = self
            .images
            .get_mut(to)
            .ok_or_else(|| ShotframeError::validation(format!("no image at index {to}")))?;
        dst.style.transfer_from(&src);
        Ok(())
    }

    /// Languages of the project, in display order.
    pub fn languages(&self) -> Vec<String> {
        self.default_style
            .text
            .headline
            .layer
            .text_by_language
            .languages()
            .map(str::to_owned)
            .collect()
    }

    /// Add a language to every image and to the default style.
    pub fn add_language(&mut self, lang: &str) {
        self.default_style.text.add_language(lang);
        for img in &mut self.images {
            img.style.text.add_language(lang);
        }
    }

    /// Remove a language everywhere; the default language is kept.
    pub fn remove_language(&mut self, lang: &str) -> bool {
        if lang == DEFAULT_LANGUAGE {
            return false;
        }
        let mut removed = self.default_style.text.remove_language(lang);
        for img in &mut self.images {
            removed |= img.style.text.remove_language(lang);
        }
        removed
    }

    /// Restore invariants after loading stored data.
    pub fn ensure_invariants(&mut self) {
        self.default_style.ensure_invariants();
        for img in &mut self.images {
            img.style.ensure_invariants();
        }
        if self.selected >= self.images.len() {
            self.selected = self.images.len().saturating_sub(1);
        }
        let max_seen = self
            .images
            .iter()
            .filter_map(|img| img.id.0.strip_prefix("img-")?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        self.next_id = self.next_id.max(max_seen.saturating_add(1));

        let mut seen = HashSet::new();
        for i in 0..self.images.len() {
            if self.images[i].id.0.is_empty() || !seen.insert(self.images[i].id.clone()) {
                let id = self.fresh_id();
                seen.insert(id.clone());
                self.images[i].id = id;
            }
        }
    }

    fn fresh_id(&mut self) -> ImageId {
        loop {
            let id = ImageId(format!("img-{}", self.next_id));
            // Past u64::MAX, restart at 1; taken ids are skipped below.
            self.next_id = self.next_id.checked_add(1).unwrap_or(1);
            if self.index_of(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/project.rs"]
mod tests;
