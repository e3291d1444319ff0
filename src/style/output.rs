use serde::{Deserialize, Serialize};

use crate::foundation::core::Canvas;
use crate::foundation::error::ShotframeResult;

/// Output raster size: a store device preset or custom dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "device")]
pub enum OutputSize {
    /// iPhone 6.9" display.
    Iphone69,
    /// iPhone 6.7" display.
    #[default]
    Iphone67,
    /// iPhone 6.5" display.
    Iphone65,
    /// iPhone 5.5" display.
    Iphone55,
    /// iPad 13" display.
    Ipad13,
    /// iPad Pro 12.9" display.
    Ipad129,
    /// Typical Android phone.
    AndroidPhone,
    /// Typical Android tablet.
    AndroidTablet,
    /// Arbitrary dimensions.
    Custom {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
}

impl OutputSize {
    /// Every named preset, in menu order.
    pub const PRESETS: [OutputSize; 8] = [
        Self::Iphone69,
        Self::Iphone67,
        Self::Iphone65,
        Self::Iphone55,
        Self::Ipad13,
        Self::Ipad129,
        Self::AndroidPhone,
        Self::AndroidTablet,
    ];

    /// Pixel dimensions (unvalidated for `Custom`).
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Iphone69 => (1320, 2868),
            Self::Iphone67 => (1290, 2796),
            Self::Iphone65 => (1284, 2778),
            Self::Iphone55 => (1242, 2208),
            Self::Ipad13 => (2064, 2752),
            Self::Ipad129 => (2048, 2732),
            Self::AndroidPhone => (1080, 1920),
            Self::AndroidTablet => (1600, 2560),
            Self::Custom { width, height } => (width, height),
        }
    }

    /// Validated canvas for this size.
    pub fn canvas(self) -> ShotframeResult<Canvas> {
        let (w, h) = self.dimensions();
        Canvas::new(w, h)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/output.rs"]
mod tests;
