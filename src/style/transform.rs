use serde::{Deserialize, Serialize};

use crate::style::color::Rgb;

/// Drop shadow painted under the screenshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Shadow {
    /// Whether the shadow is painted.
    pub enabled: bool,
    /// Shadow color.
    pub color: Rgb,
    /// Blur amount in px (canvas convention, sigma = blur / 2).
    pub blur: f64,
    /// Opacity in percent.
    pub opacity: f64,
    /// Horizontal offset in px.
    pub offset_x: f64,
    /// Vertical offset in px.
    pub offset_y: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            enabled: true,
            color: Rgb::BLACK,
            blur: 40.0,
            opacity: 30.0,
            offset_x: 0.0,
            offset_y: 20.0,
        }
    }
}

/// Device frame outline style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameStyle {
    /// Plain rounded outline.
    #[serde(rename = "simple")]
    Simple,
    /// iPhone 15 Pro, dynamic island.
    #[default]
    #[serde(rename = "iphone-15-pro")]
    Iphone15Pro,
    /// iPhone 14 Pro, dynamic island.
    #[serde(rename = "iphone-14-pro")]
    Iphone14Pro,
    /// iPhone 13, classic notch.
    #[serde(rename = "iphone-13")]
    Iphone13,
    /// iPhone X, classic notch.
    #[serde(rename = "iphone-x")]
    IphoneX,
    /// Pixel, no cutout.
    #[serde(rename = "pixel")]
    Pixel,
}

/// Cutout painted at the top of a framed screenshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotchKind {
    /// Pill-shaped dynamic island.
    Island,
    /// Classic notch attached to the top edge.
    Notch,
}

impl FrameStyle {
    /// Cutout this style carries, if any.
    pub fn notch(self) -> Option<NotchKind> {
        match self {
            Self::Iphone15Pro | Self::Iphone14Pro => Some(NotchKind::Island),
            Self::Iphone13 | Self::IphoneX => Some(NotchKind::Notch),
            Self::Simple | Self::Pixel => None,
        }
    }
}

/// Device frame stroked around the screenshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Frame {
    /// Whether the frame is painted.
    pub enabled: bool,
    /// Frame style id.
    pub style: FrameStyle,
    /// Stroke color.
    pub color: Rgb,
    /// Stroke width in px.
    pub width: f64,
    /// Opacity in percent.
    pub opacity: f64,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            enabled: false,
            style: FrameStyle::default(),
            color: Rgb::new(0x1d, 0x1d, 0x1f),
            width: 12.0,
            opacity: 100.0,
        }
    }
}

/// Euler angles for the 3D mockup path, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rotation3d {
    /// Rotation around x.
    pub x: f64,
    /// Rotation around y.
    pub y: f64,
    /// Rotation around z.
    pub z: f64,
}

/// Screenshot placement and shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Transform {
    /// Size in percent of the canvas width (bound by height, see `fit_rect`).
    pub scale: f64,
    /// Horizontal anchor in percent of the free space.
    pub x: f64,
    /// Vertical anchor in percent of the free space.
    pub y: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Shear proxy for perspective, -100..=100.
    pub perspective: f64,
    /// Corner radius in px at a 400 px reference width.
    pub corner_radius: f64,
    /// Drop shadow.
    pub shadow: Shadow,
    /// Device frame.
    pub frame: Frame,
    /// Route the screenshot through the 3D mockup collaborator.
    #[serde(rename = "use3D")]
    pub use_3d: bool,
    /// Mockup rotation used when `use_3d` is set.
    #[serde(rename = "rotation3D")]
    pub rotation_3d: Rotation3d,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 70.0,
            x: 50.0,
            y: 60.0,
            rotation: 0.0,
            perspective: 0.0,
            corner_radius: 24.0,
            shadow: Shadow::default(),
            frame: Frame::default(),
            use_3d: false,
            rotation_3d: Rotation3d::default(),
        }
    }
}
