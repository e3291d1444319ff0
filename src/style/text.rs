use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{ShotframeError, ShotframeResult};
use crate::style::color::Rgb;

/// Language every text layer always carries.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Per-language strings in display order.
///
/// Serialized as a JSON object whose key order is the insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageText {
    entries: Vec<(String, String)>,
}

impl Default for LanguageText {
    fn default() -> Self {
        Self {
            entries: vec![(DEFAULT_LANGUAGE.to_owned(), String::new())],
        }
    }
}

impl LanguageText {
    /// Text for `lang`, if the language is present.
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == lang)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `lang` is a key.
    pub fn contains(&self, lang: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == lang)
    }

    /// Set the text for `lang`, appending the language if it is new.
    pub fn set(&mut self, lang: &str, text: impl Into<String>) {
        let text = text.into();
        match self.entries.iter_mut().find(|(k, _)| k == lang) {
            Some((_, v)) => *v = text,
            None => self.entries.push((lang.to_owned(), text)),
        }
    }

    /// Append `lang` with empty text; returns `false` if it was already present.
    pub fn insert_language(&mut self, lang: &str) -> bool {
        if self.contains(lang) {
            return false;
        }
        self.entries.push((lang.to_owned(), String::new()));
        true
    }

    /// Remove `lang` and return its text.
    pub fn remove(&mut self, lang: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == lang)?;
        Some(self.entries.remove(idx).1)
    }

    /// Language codes in display order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of languages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no languages are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for LanguageText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LanguageText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = LanguageText;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of language code to text")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut out = LanguageText {
                    entries: Vec::with_capacity(access.size_hint().unwrap_or(1)),
                };
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    out.set(&k, v);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Shared styling and content of one text sub-block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextLayer {
    /// Content per language.
    pub text_by_language: LanguageText,
    /// Language currently shown; always a key of `text_by_language`.
    pub active_language: String,
    /// Font family name.
    pub font: String,
    /// Font size in px.
    pub size_px: f64,
    /// CSS-style weight (100..=900).
    pub weight: u16,
    /// Italic face.
    pub italic: bool,
    /// Underline decoration.
    pub underline: bool,
    /// Strikethrough decoration.
    pub strikethrough: bool,
    /// Fill color.
    pub color: Rgb,
}

impl Default for TextLayer {
    fn default() -> Self {
        Self {
            text_by_language: LanguageText::default(),
            active_language: DEFAULT_LANGUAGE.to_owned(),
            font: "Inter".to_owned(),
            size_px: 100.0,
            weight: 600,
            italic: false,
            underline: false,
            strikethrough: false,
            color: Rgb::WHITE,
        }
    }
}

impl TextLayer {
    /// Text in the active language, empty when missing.
    pub fn resolved_text(&self) -> &str {
        self.text_by_language
            .get(&self.active_language)
            .unwrap_or("")
    }

    /// Set the text for `lang`.
    pub fn set_text(&mut self, lang: &str, text: impl Into<String>) {
        self.text_by_language.set(lang, text);
    }

    /// Add an empty entry for `lang`.
    pub fn add_language(&mut self, lang: &str) -> bool {
        self.text_by_language.insert_language(lang)
    }

    /// Remove `lang`. The default language is never removed; removing the active language
    /// resets the active language to the default.
    pub fn remove_language(&mut self, lang: &str) -> bool {
        if lang == DEFAULT_LANGUAGE {
            return false;
        }
        let removed = self.text_by_language.remove(lang).is_some();
        if self.active_language == lang || !self.text_by_language.contains(&self.active_language)
        {
            self.active_language = DEFAULT_LANGUAGE.to_owned();
        }
        removed
    }

    /// Switch the shown language; it must already be a key.
    pub fn set_active_language(&mut self, lang: &str) -> ShotframeResult<()> {
        if !self.text_by_language.contains(lang) {
            return Err(ShotframeError::validation(format!(
                "language '{lang}' is not part of this text layer"
            )));
        }
        self.active_language = lang.to_owned();
        Ok(())
    }

    /// Restore the language invariants after loading untrusted data.
    pub fn ensure_invariants(&mut self) {
        self.text_by_language.insert_language(DEFAULT_LANGUAGE);
        if !self.text_by_language.contains(&self.active_language) {
            self.active_language = DEFAULT_LANGUAGE.to_owned();
        }
    }

    fn copy_style_from(&mut self, other: &Self) {
        self.font.clone_from(&other.font);
        self.size_px = other.size_px;
        self.weight = other.weight;
        self.italic = other.italic;
        self.underline = other.underline;
        self.strikethrough = other.strikethrough;
        self.color = other.color;
    }
}

/// Edge the headline is anchored to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    /// Anchored `offset_y` percent from the top.
    #[default]
    Top,
    /// Anchored `offset_y` percent from the bottom.
    Bottom,
}

/// Headline sub-block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Headline {
    /// Content and styling.
    #[serde(flatten)]
    pub layer: TextLayer,
    /// Anchor edge.
    pub position: TextPosition,
    /// Distance from the anchor edge in percent of canvas height.
    pub offset_y: f64,
    /// Line spacing in percent of the font size.
    pub line_height_percent: f64,
}

impl Default for Headline {
    fn default() -> Self {
        Self {
            layer: TextLayer::default(),
            position: TextPosition::Top,
            offset_y: 12.0,
            line_height_percent: 110.0,
        }
    }
}

/// Subheadline sub-block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Subheadline {
    /// Content and styling.
    #[serde(flatten)]
    pub layer: TextLayer,
    /// Opacity in percent.
    pub opacity: f64,
}

impl Default for Subheadline {
    fn default() -> Self {
        Self {
            layer: TextLayer {
                size_px: 50.0,
                weight: 400,
                ..TextLayer::default()
            },
            opacity: 70.0,
        }
    }
}

/// Which text sub-block a command addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextLayerId {
    /// The headline.
    Headline,
    /// The subheadline.
    Subheadline,
}

/// Headline plus subheadline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextBlock {
    /// Headline.
    pub headline: Headline,
    /// Subheadline.
    pub subheadline: Subheadline,
}

impl TextBlock {
    /// Borrow a sub-block's layer.
    pub fn layer(&self, id: TextLayerId) -> &TextLayer {
        match id {
            TextLayerId::Headline => &self.headline.layer,
            TextLayerId::Subheadline => &self.subheadline.layer,
        }
    }

    /// Mutably borrow a sub-block's layer.
    pub fn layer_mut(&mut self, id: TextLayerId) -> &mut TextLayer {
        match id {
            TextLayerId::Headline => &mut self.headline.layer,
            TextLayerId::Subheadline => &mut self.subheadline.layer,
        }
    }

    /// Add `lang` to both sub-blocks.
    pub fn add_language(&mut self, lang: &str) {
        self.headline.layer.add_language(lang);
        self.subheadline.layer.add_language(lang);
    }

    /// Remove `lang` from both sub-blocks (never the default language).
    pub fn remove_language(&mut self, lang: &str) -> bool {
        let a = self.headline.layer.remove_language(lang);
        let b = self.subheadline.layer.remove_language(lang);
        a || b
    }

    /// Show `lang` in both sub-blocks; it must be a key of both.
    pub fn set_active_language(&mut self, lang: &str) -> ShotframeResult<()> {
        if !self.subheadline.layer.text_by_language.contains(lang) {
            return Err(ShotframeError::validation(format!(
                "language '{lang}' is not part of the subheadline"
            )));
        }
        self.headline.layer.set_active_language(lang)?;
        self.subheadline.layer.set_active_language(lang)
    }

    /// Restore language invariants on both sub-blocks; both end up with the same language keys.
    pub fn ensure_invariants(&mut self) {
        let head: Vec<String> = self
            .headline
            .layer
            .text_by_language
            .languages()
            .map(str::to_owned)
            .collect();
        for lang in &head {
            self.subheadline.layer.add_language(lang);
        }
        let sub: Vec<String> = self
            .subheadline
            .layer
            .text_by_language
            .languages()
            .map(str::to_owned)
            .collect();
        for lang in &sub {
            self.headline.layer.add_language(lang);
        }
        self.headline.layer.ensure_invariants();
        self.subheadline.layer.ensure_invariants();
    }

    /// Copy styling from `other`, keeping this block's own text content and active language.
    pub fn copy_style_from(&mut self, other: &Self) {
        self.headline.layer.copy_style_from(&other.headline.layer);
        self.headline.position = other.headline.position;
        self.headline.offset_y = other.headline.offset_y;
        self.headline.line_height_percent = other.headline.line_height_percent;
        self.subheadline
            .layer
            .copy_style_from(&other.subheadline.layer);
        self.subheadline.opacity = other.subheadline.opacity;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/text.rs"]
mod tests;
