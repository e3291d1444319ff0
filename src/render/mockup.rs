use crate::assets::library::RasterImage;
use crate::foundation::error::ShotframeResult;
use crate::render::surface::Surface;

/// Whether the mockup's screen texture reflects the last `update_screen_texture` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextureState {
    /// Texture is current.
    #[default]
    Ready,
    /// An upload/decode is still in flight.
    Pending,
}

/// External 3D phone-mockup renderer used in place of the 2D screenshot layer.
///
/// The compositor only asks for a frame when [`MockupRenderer::has_model_loaded`] is true.
/// Texture refresh may be asynchronous; callers that read the surface back poll
/// [`MockupRenderer::poll_texture`] until it reports [`TextureState::Ready`].
pub trait MockupRenderer {
    /// A phone model is loaded and can be drawn.
    fn has_model_loaded(&self) -> bool;

    /// Set model rotation in degrees.
    fn set_rotation(&mut self, x: f64, y: f64, z: f64);

    /// Replace the screen texture. `corner_radius_fraction` is the corner radius relative to the
    /// 400 px reference width. Called on every render; an unchanged image should not restart a
    /// pending upload.
    fn update_screen_texture(&mut self, image: &RasterImage, corner_radius_fraction: f64);

    /// Current texture state, without advancing anything.
    fn texture_state(&self) -> TextureState {
        TextureState::Ready
    }

    /// Give pending texture work a chance to finish and report the resulting state.
    fn poll_texture(&mut self) -> TextureState {
        self.texture_state()
    }

    /// Paint the mockup on a transparent background into `target`, sized `width`×`height`.
    fn render_to_composite_surface(
        &mut self,
        target: &mut Surface,
        width: u32,
        height: u32,
    ) -> ShotframeResult<()>;
}
