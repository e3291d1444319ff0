use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::assets::library::ImageRef;
use crate::style::color::Rgb;

/// Which of the background payloads is painted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    /// Linear multi-stop gradient.
    #[default]
    Gradient,
    /// Flat fill.
    Solid,
    /// Raster image with overlay wash.
    Image,
}

/// How a background image maps onto the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    /// Fill the canvas, cropping the longer axis.
    #[default]
    Cover,
    /// Show the whole image, letterboxed in black.
    Contain,
}

/// One gradient color stop; `position` is in 0..=100.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Stop color.
    pub color: Rgb,
    /// Offset along the gradient line in percent.
    pub position: f64,
}

impl GradientStop {
    /// Build a stop.
    pub fn new(color: Rgb, position: f64) -> Self {
        Self { color, position }
    }
}

/// Linear gradient parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gradient {
    /// Direction in degrees, CSS convention (0 points up, 90 points right).
    pub angle: f64,
    /// Color stops in the user's order; duplicates allowed.
    pub stops: Vec<GradientStop>,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            angle: 135.0,
            stops: vec![
                GradientStop::new(Rgb::new(0x66, 0x7e, 0xea), 0.0),
                GradientStop::new(Rgb::new(0x76, 0x4b, 0xa2), 100.0),
            ],
        }
    }
}

impl Gradient {
    /// Minimum number of stops a gradient keeps through editing.
    pub const MIN_STOPS: usize = 2;

    /// Stops stably sorted by position, the order the background renderer expects.
    pub fn sorted_stops(&self) -> SmallVec<[GradientStop; 4]> {
        let mut stops: SmallVec<[GradientStop; 4]> = self.stops.iter().copied().collect();
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        stops
    }
}

/// Background layer specification.
///
/// Only the payload selected by [`Background::kind`] is painted; the others are kept so that
/// switching kinds back and forth does not lose settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Background {
    /// Active payload.
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    /// Gradient payload.
    pub gradient: Gradient,
    /// Solid payload.
    pub solid: Rgb,
    /// Image payload.
    pub image: Option<ImageRef>,
    /// Image fit mode.
    pub image_fit: ImageFit,
    /// Gaussian blur applied to the drawn image, in px.
    pub image_blur: f64,
    /// Wash painted over the image.
    pub overlay_color: Rgb,
    /// Wash opacity in percent.
    pub overlay_opacity: f64,
    /// Whether the noise post-process runs after the background.
    pub noise: bool,
    /// Noise strength in percent.
    pub noise_intensity: f64,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Gradient,
            gradient: Gradient::default(),
            solid: Rgb::new(0x1a, 0x1a, 0x2e),
            image: None,
            image_fit: ImageFit::Cover,
            image_blur: 0.0,
            overlay_color: Rgb::BLACK,
            overlay_opacity: 0.0,
            noise: false,
            noise_intensity: 10.0,
        }
    }
}
