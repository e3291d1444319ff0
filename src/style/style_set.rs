use serde::{Deserialize, Serialize};

use crate::style::background::Background;
use crate::style::text::TextBlock;
use crate::style::transform::Transform;

/// Complete style of one image: background, screenshot transform and text.
///
/// Every image owns its style by value; copying between images is always a deep copy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSet {
    /// Background layer.
    pub background: Background,
    /// Screenshot placement.
    pub transform: Transform,
    /// Text overlays.
    pub text: TextBlock,
}

impl StyleSet {
    /// Copy every style field from `src` while keeping this set's own text content.
    pub fn transfer_from(&mut self, src: &StyleSet) {
        self.background.clone_from(&src.background);
        self.transform.clone_from(&src.transform);
        self.text.copy_style_from(&src.text);
    }

    /// Restore invariants that serialized data cannot enforce.
    pub fn ensure_invariants(&mut self) {
        self.text.ensure_invariants();
    }
}
