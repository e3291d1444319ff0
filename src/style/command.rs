use serde::{Deserialize, Serialize};

use crate::assets::library::ImageRef;
use crate::foundation::error::{ShotframeError, ShotframeResult};
use crate::style::background::{BackgroundKind, Gradient, GradientStop, ImageFit};
use crate::style::color::Rgb;
use crate::style::style_set::StyleSet;
use crate::style::text::{TextLayerId, TextPosition};
use crate::style::transform::{FrameStyle, Rotation3d};

/// A single structured edit to a [`StyleSet`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "camelCase")]
pub enum StyleCommand {
    /// Switch between gradient, solid and image backgrounds.
    SetBackgroundKind(BackgroundKind),
    /// Gradient angle in degrees, CSS convention.
    SetGradientAngle(f64),
    /// Recolour and move an existing stop.
    SetGradientStop {
        index: usize,
        color: Rgb,
        position: f64,
    },
    /// Append a stop.
    AddGradientStop(GradientStop),
    /// Remove a stop; at least two remain.
    RemoveGradientStop(usize),
    /// Solid background colour.
    SetSolidColor(Rgb),
    /// Background image, or none.
    SetBackgroundImage(Option<ImageRef>),
    /// Cover or contain.
    SetImageFit(ImageFit),
    /// Background image blur in px.
    SetImageBlur(f64),
    /// Overlay tint over the background image.
    SetOverlayColor(Rgb),
    /// Overlay opacity percent.
    SetOverlayOpacity(f64),
    /// Toggle grain.
    SetNoise(bool),
    /// Grain intensity percent.
    SetNoiseIntensity(f64),

    /// Screenshot size, percent of the canvas.
    SetScale(f64),
    /// Horizontal position, percent of free space.
    SetPositionX(f64),
    /// Vertical position, percent of free space.
    SetPositionY(f64),
    /// In-plane rotation in degrees.
    SetRotation(f64),
    /// Perspective shear, -100..=100.
    SetPerspective(f64),
    /// Corner radius at the 400 px reference width.
    SetCornerRadius(f64),
    /// Toggle the drop shadow.
    SetShadowEnabled(bool),
    SetShadowColor(Rgb),
    /// Shadow blur radius in px.
    SetShadowBlur(f64),
    /// Shadow opacity percent.
    SetShadowOpacity(f64),
    /// Shadow offset in px.
    SetShadowOffsetX(f64),
    SetShadowOffsetY(f64),
    /// Toggle the device frame.
    SetFrameEnabled(bool),
    SetFrameStyle(FrameStyle),
    SetFrameColor(Rgb),
    /// Frame stroke width in px.
    SetFrameWidth(f64),
    /// Frame opacity percent.
    SetFrameOpacity(f64),
    /// Draw through the 3D mockup renderer when one is loaded.
    SetUse3d(bool),
    /// Mockup rotation in degrees.
    SetRotation3d(Rotation3d),

    /// Text of `layer` in `language`.
    SetText {
        layer: TextLayerId,
        language: String,
        text: String,
    },
    /// Add a language key to both layers.
    AddLanguage(String),
    /// Remove a language key; the default language stays.
    RemoveLanguage(String),
    /// Language drawn by both layers.
    SetActiveLanguage(String),
    /// Font family of `layer`.
    SetFont {
        layer: TextLayerId,
        family: String,
    },
    SetFontSize {
        layer: TextLayerId,
        size_px: f64,
    },
    /// Weight, clamped to 1..=1000.
    SetFontWeight {
        layer: TextLayerId,
        weight: u16,
    },
    SetItalic {
        layer: TextLayerId,
        on: bool,
    },
    SetUnderline {
        layer: TextLayerId,
        on: bool,
    },
    SetStrikethrough {
        layer: TextLayerId,
        on: bool,
    },
    SetTextColor {
        layer: TextLayerId,
        color: Rgb,
    },
    /// Anchor the text block at the top or bottom.
    SetHeadlinePosition(TextPosition),
    /// Anchor offset, percent of canvas height.
    SetHeadlineOffsetY(f64),
    /// Headline line height percent.
    SetLineHeight(f64),
    /// Subheadline opacity percent.
    SetSubheadlineOpacity(f64),
}

fn percent(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 100.0) } else { 0.0 }
}

fn finite(v: f64, what: &str) -> ShotframeResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ShotframeError::validation(format!("{what} must be finite")))
    }
}

fn non_negative(v: f64, what: &str) -> ShotframeResult<f64> {
    Ok(finite(v, what)?.max(0.0))
}

impl StyleSet {
    /// Apply one edit. Percent fields are clamped into 0..=100 and perspective into
    /// -100..=100; non-finite numbers are rejected.
    pub fn apply(&mut self, cmd: StyleCommand) -> ShotframeResult<()> {
        let bg = &mut self.background;
        let tr = &mut self.transform;
        let text = &mut self.text;
        match cmd {
            StyleCommand::SetBackgroundKind(k) => bg.kind = k,
            StyleCommand::SetGradientAngle(a) => bg.gradient.angle = finite(a, "gradient angle")?,
            StyleCommand::SetGradientStop {
                index,
                color,
                position,
            } => {
                let stop = bg.gradient.stops.get_mut(index).ok_or_else(|| {
                    ShotframeError::validation(format!("gradient stop {index} does not exist"))
                })?;
                stop.color = color;
                stop.position = percent(position);
            }
            StyleCommand::AddGradientStop(stop) => bg
                .gradient
                .stops
                .push(GradientStop::new(stop.color, percent(stop.position))),
            StyleCommand::RemoveGradientStop(index) => {
                if bg.gradient.stops.len() <= Gradient::MIN_STOPS {
                    return Err(ShotframeError::validation(format!(
                        "a gradient keeps at least {} stops",
                        Gradient::MIN_STOPS
                    )));
                }
                if index >= bg.gradient.stops.len() {
                    return Err(ShotframeError::validation(format!(
                        "gradient stop {index} does not exist"
                    )));
                }
                bg.gradient.stops.remove(index);
            }
            StyleCommand::SetSolidColor(c) => bg.solid = c,
            StyleCommand::SetBackgroundImage(img) => bg.image = img,
            StyleCommand::SetImageFit(f) => bg.image_fit = f,
            StyleCommand::SetImageBlur(v) => bg.image_blur = non_negative(v, "image blur")?,
            StyleCommand::SetOverlayColor(c) => bg.overlay_color = c,
            StyleCommand::SetOverlayOpacity(v) => bg.overlay_opacity = percent(v),
            StyleCommand::SetNoise(on) => bg.noise = on,
            StyleCommand::SetNoiseIntensity(v) => bg.noise_intensity = percent(v),

            StyleCommand::SetScale(v) => tr.scale = non_negative(v, "scale")?,
            StyleCommand::SetPositionX(v) => tr.x = finite(v, "x")?,
            StyleCommand::SetPositionY(v) => tr.y = finite(v, "y")?,
            StyleCommand::SetRotation(v) => tr.rotation = finite(v, "rotation")?,
            StyleCommand::SetPerspective(v) => {
                tr.perspective = finite(v, "perspective")?.clamp(-100.0, 100.0)
            }
            StyleCommand::SetCornerRadius(v) => {
                tr.corner_radius = non_negative(v, "corner radius")?
            }
            StyleCommand::SetShadowEnabled(on) => tr.shadow.enabled = on,
            StyleCommand::SetShadowColor(c) => tr.shadow.color = c,
            StyleCommand::SetShadowBlur(v) => tr.shadow.blur = non_negative(v, "shadow blur")?,
            StyleCommand::SetShadowOpacity(v) => tr.shadow.opacity = percent(v),
            StyleCommand::SetShadowOffsetX(v) => tr.shadow.offset_x = finite(v, "shadow x")?,
            StyleCommand::SetShadowOffsetY(v) => tr.shadow.offset_y = finite(v, "shadow y")?,
            StyleCommand::SetFrameEnabled(on) => tr.frame.enabled = on,
            StyleCommand::SetFrameStyle(s) => tr.frame.style = s,
            StyleCommand::SetFrameColor(c) => tr.frame.color = c,
            StyleCommand::SetFrameWidth(v) => tr.frame.width = non_negative(v, "frame width")?,
            StyleCommand::SetFrameOpacity(v) => tr.frame.opacity = percent(v),
            StyleCommand::SetUse3d(on) => tr.use_3d = on,
            StyleCommand::SetRotation3d(r) => {
                tr.rotation_3d = Rotation3d {
                    x: finite(r.x, "rotation x")?,
                    y: finite(r.y, "rotation y")?,
                    z: finite(r.z, "rotation z")?,
                }
            }

            StyleCommand::SetText {
                layer,
                language,
                text: s,
            } => text.layer_mut(layer).set_text(&language, s),
            StyleCommand::AddLanguage(lang) => text.add_language(&lang),
            StyleCommand::RemoveLanguage(lang) => {
                text.remove_language(&lang);
            }
            StyleCommand::SetActiveLanguage(lang) => text.set_active_language(&lang)?,
            StyleCommand::SetFont { layer, family } => text.layer_mut(layer).font = family,
            StyleCommand::SetFontSize { layer, size_px } => {
                text.layer_mut(layer).size_px = non_negative(size_px, "font size")?
            }
            StyleCommand::SetFontWeight { layer, weight } => {
                text.layer_mut(layer).weight = weight.clamp(1, 1000)
            }
            StyleCommand::SetItalic { layer, on } => text.layer_mut(layer).italic = on,
            StyleCommand::SetUnderline { layer, on } => text.layer_mut(layer).underline = on,
            StyleCommand::SetStrikethrough { layer, on } => {
                text.layer_mut(layer).strikethrough = on
            }
            StyleCommand::SetTextColor { layer, color } => text.layer_mut(layer).color = color,
            StyleCommand::SetHeadlinePosition(p) => text.headline.position = p,
            StyleCommand::SetHeadlineOffsetY(v) => text.headline.offset_y = percent(v),
            StyleCommand::SetLineHeight(v) => {
                text.headline.line_height_percent = non_negative(v, "line height")?
            }
            StyleCommand::SetSubheadlineOpacity(v) => text.subheadline.opacity = percent(v),
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/command.rs"]
mod tests;
