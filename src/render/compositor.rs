use std::cell::Cell;
use std::rc::Rc;

use crate::assets::fonts::FontBook;
use crate::assets::library::{ImageLibrary, ImageRef, RasterImage};
use crate::effects::noise::apply_noise_in_place;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ShotframeError, ShotframeResult};
use crate::geometry::fit::CORNER_REFERENCE_WIDTH;
use crate::render::background::render_background;
use crate::render::fingerprint::{FingerprintInputs, RenderFingerprint, fingerprint_render};
use crate::render::mockup::MockupRenderer;
use crate::render::screenshot::render_screenshot;
use crate::render::surface::{Painter, Surface};
use crate::render::text::render_text;
use crate::style::project::{ImageId, Project};
use crate::style::style_set::StyleSet;

/// Environment variable overriding [`CompositorOpts::noise_seed`].
pub const NOISE_SEED_ENV: &str = "SHOTFRAME_NOISE_SEED";

/// Compositor configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositorOpts {
    /// Seed for the background grain. Equal seeds give bit-identical grain.
    pub noise_seed: u64,
    /// Skip a render whose inputs fingerprint equal to the surface's current contents.
    pub skip_unchanged: bool,
}

impl CompositorOpts {
    /// Seed used when neither the caller nor the environment provides one.
    pub const DEFAULT_NOISE_SEED: u64 = 0x5407_f2a3_9e1b_c6d5;

    /// Override the noise seed.
    pub fn with_noise_seed(mut self, seed: u64) -> Self {
        self.noise_seed = seed;
        self
    }

    /// Enable or disable fingerprint-based skipping.
    pub fn with_skip_unchanged(mut self, skip: bool) -> Self {
        self.skip_unchanged = skip;
        self
    }
}

impl Default for CompositorOpts {
    fn default() -> Self {
        let noise_seed = std::env::var(NOISE_SEED_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(Self::DEFAULT_NOISE_SEED);
        Self {
            noise_seed,
            skip_unchanged: true,
        }
    }
}

/// One composite to produce: which image, its style, its screenshot and the canvas.
#[derive(Clone, Copy, Debug)]
pub struct RenderJob<'a> {
    /// Identity of the image being rendered.
    pub image_id: &'a ImageId,
    /// Style to render.
    pub style: &'a StyleSet,
    /// Screenshot raster reference, if any.
    pub screenshot: Option<&'a ImageRef>,
    /// Output dimensions.
    pub canvas: Canvas,
}

impl<'a> RenderJob<'a> {
    /// Job for image `index` of `project` at the project's output size.
    pub fn for_project(project: &'a Project, index: usize) -> ShotframeResult<Self> {
        let image = project.images.get(index).ok_or_else(|| {
            ShotframeError::validation(format!(
                "image index {index} out of range ({} images)",
                project.images.len()
            ))
        })?;
        Ok(Self {
            image_id: &image.id,
            style: &image.style,
            screenshot: image.screenshot.as_ref(),
            canvas: project.output.canvas()?,
        })
    }
}

/// Collaborators a render reads from.
pub struct RenderResources<'a> {
    /// Decoded rasters.
    pub images: &'a ImageLibrary,
    /// Registered fonts.
    pub fonts: &'a mut FontBook,
    /// Optional 3D mockup renderer.
    pub mockup: Option<&'a mut dyn MockupRenderer>,
}

impl<'a> RenderResources<'a> {
    /// Resources without a mockup renderer.
    pub fn new(images: &'a ImageLibrary, fonts: &'a mut FontBook) -> Self {
        Self {
            images,
            fonts,
            mockup: None,
        }
    }

    /// Attach a mockup renderer.
    pub fn with_mockup(mut self, mockup: &'a mut dyn MockupRenderer) -> Self {
        self.mockup = Some(mockup);
        self
    }
}

/// Compositor lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderState {
    /// No render in progress.
    #[default]
    Idle,
    /// A render is running.
    Rendering,
}

/// What happened to a render request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The next pump will render.
    Scheduled,
    /// Folded into an already pending (or trailing) render.
    Coalesced,
}

/// What a render call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Layers were painted.
    Rendered,
    /// Inputs were unchanged; the surface was left as is.
    Skipped,
}

#[derive(Debug, Default)]
struct TriggerCell {
    pending: Cell<bool>,
    rendering: Cell<bool>,
}

/// Cloneable handle used to ask for a re-render.
///
/// Requests made while a render runs (for example from a collaborator callback) collapse into a
/// single trailing render.
#[derive(Clone, Debug, Default)]
pub struct RenderTrigger {
    inner: Rc<TriggerCell>,
}

impl RenderTrigger {
    /// Ask for a render.
    pub fn request(&self) -> RequestOutcome {
        let was_pending = self.inner.pending.replace(true);
        if was_pending || self.inner.rendering.get() {
            RequestOutcome::Coalesced
        } else {
            RequestOutcome::Scheduled
        }
    }

    /// A render has been requested and not yet served.
    pub fn is_pending(&self) -> bool {
        self.inner.pending.get()
    }

    /// Current compositor state.
    pub fn state(&self) -> RenderState {
        if self.inner.rendering.get() {
            RenderState::Rendering
        } else {
            RenderState::Idle
        }
    }
}

/// Resets the rendering flag even when a render bails out early.
struct RenderingGuard<'a>(&'a TriggerCell);

impl<'a> RenderingGuard<'a> {
    fn enter(cell: &'a TriggerCell) -> Self {
        cell.pending.set(false);
        cell.rendering.set(true);
        Self(cell)
    }
}

impl Drop for RenderingGuard<'_> {
    fn drop(&mut self) {
        self.0.rendering.set(false);
    }
}

/// Paints background, grain, screenshot (or 3D mockup) and text onto one owned surface.
pub struct Compositor {
    opts: CompositorOpts,
    surface: Option<Surface>,
    mockup_layer: Option<Surface>,
    painter: Painter,
    trigger: RenderTrigger,
    last_fingerprint: Option<RenderFingerprint>,
    last_image: Option<ImageId>,
    render_count: u64,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(CompositorOpts::default())
    }
}

impl Compositor {
    /// Compositor with no surface yet; the first render allocates it.
    pub fn new(opts: CompositorOpts) -> Self {
        Self {
            opts,
            surface: None,
            mockup_layer: None,
            painter: Painter::new(),
            trigger: RenderTrigger::default(),
            last_fingerprint: None,
            last_image: None,
            render_count: 0,
        }
    }

    /// Active options.
    pub fn opts(&self) -> CompositorOpts {
        self.opts
    }

    /// Handle for requesting renders.
    pub fn trigger(&self) -> RenderTrigger {
        self.trigger.clone()
    }

    /// Idle or rendering.
    pub fn state(&self) -> RenderState {
        self.trigger.state()
    }

    /// The raster target, once a render has allocated it.
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Image the surface currently shows.
    pub fn last_image(&self) -> Option<&ImageId> {
        self.last_image.as_ref()
    }

    /// Number of renders that actually painted.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Forget the last fingerprint so the next render paints.
    pub fn invalidate(&mut self) {
        self.last_fingerprint = None;
    }

    /// Render `job`, skipping when nothing changed and skipping is enabled.
    #[tracing::instrument(skip(self, job, res), fields(image = %job.image_id, w = job.canvas.width, h = job.canvas.height))]
    pub fn render(
        &mut self,
        job: &RenderJob<'_>,
        res: &mut RenderResources<'_>,
    ) -> ShotframeResult<RenderOutcome> {
        self.render_impl(job, res, false)
    }

    /// Render `job` unconditionally.
    pub fn force_render(
        &mut self,
        job: &RenderJob<'_>,
        res: &mut RenderResources<'_>,
    ) -> ShotframeResult<RenderOutcome> {
        self.render_impl(job, res, true)
    }

    /// Serve pending requests: one render, plus one trailing render if a request arrived while it
    /// ran. `job` is called before each render so it sees the latest state.
    pub fn pump<'j>(
        &mut self,
        mut job: impl FnMut() -> Option<RenderJob<'j>>,
        res: &mut RenderResources<'_>,
    ) -> ShotframeResult<usize> {
        let mut rendered = 0;
        for _ in 0..2 {
            if !self.trigger.is_pending() {
                break;
            }
            let Some(j) = job() else {
                self.trigger.inner.pending.set(false);
                break;
            };
            if self.render_impl(&j, res, false)? == RenderOutcome::Rendered {
                rendered += 1;
            }
        }
        Ok(rendered)
    }

    fn render_impl(
        &mut self,
        job: &RenderJob<'_>,
        res: &mut RenderResources<'_>,
        force: bool,
    ) -> ShotframeResult<RenderOutcome> {
        job.canvas.validate()?;
        let trigger = Rc::clone(&self.trigger.inner);
        let _guard = RenderingGuard::enter(&trigger);

        if self.surface.as_ref().map(Surface::canvas) != Some(job.canvas) {
            tracing::debug!(
                w = job.canvas.width,
                h = job.canvas.height,
                "allocating raster target"
            );
            self.surface = Some(Surface::new(job.canvas)?);
            self.last_fingerprint = None;
        }

        let style = job.style;
        let transform = &style.transform;
        let mockup_active = transform.use_3d
            && res
                .mockup
                .as_deref()
                .is_some_and(|m| m.has_model_loaded());
        if transform.use_3d && !mockup_active {
            tracing::debug!("3D mockup requested without a loaded model, using 2D path");
        }

        let fp = fingerprint_render(
            style,
            &FingerprintInputs {
                image_id: &job.image_id.0,
                screenshot: job.screenshot.map(ImageRef::as_str),
                canvas: job.canvas,
                library_generation: res.images.generation(),
                font_count: res.fonts.len(),
                noise_seed: self.opts.noise_seed,
            },
        );
        if !force
            && !mockup_active
            && self.opts.skip_unchanged
            && self.last_fingerprint == Some(fp)
        {
            tracing::debug!("inputs unchanged, skipping render");
            return Ok(RenderOutcome::Skipped);
        }

        let Some(surface) = self.surface.as_mut() else {
            return Err(ShotframeError::render("raster target missing"));
        };
        let painter = &mut self.painter;
        let images: &ImageLibrary = res.images;
        surface.clear();

        isolate(
            "background",
            render_background(surface, painter, &style.background, images),
        );
        if style.background.noise {
            apply_noise_in_place(
                surface.data_mut(),
                job.canvas.width,
                self.opts.noise_seed,
                style.background.noise_intensity,
            );
        }

        let screenshot = job.screenshot.and_then(|r| {
            let raster = images.get(r);
            if raster.is_none() {
                tracing::debug!(screenshot = %r, "screenshot not in library");
            }
            raster
        });
        if mockup_active {
            if let Some(mockup) = res.mockup.as_deref_mut() {
                let layer = mockup_layer(&mut self.mockup_layer, job.canvas)?;
                isolate(
                    "mockup",
                    render_mockup(surface, layer, mockup, style, screenshot),
                );
            }
        } else if let Some(raster) = screenshot {
            isolate(
                "screenshot",
                render_screenshot(surface, painter, transform, raster).map(|_| ()),
            );
        }

        isolate("text", render_text(surface, painter, &style.text, res.fonts));

        self.last_fingerprint = (!mockup_active).then_some(fp);
        self.last_image = Some(job.image_id.clone());
        self.render_count += 1;
        Ok(RenderOutcome::Rendered)
    }
}

fn isolate(layer: &str, r: ShotframeResult<()>) {
    if let Err(e) = r {
        tracing::warn!(layer, error = %e, "layer failed, continuing with remaining layers");
    }
}

fn mockup_layer(slot: &mut Option<Surface>, canvas: Canvas) -> ShotframeResult<&mut Surface> {
    if slot.as_ref().map(Surface::canvas) != Some(canvas) {
        *slot = Some(Surface::new(canvas)?);
    }
    let layer = slot
        .as_mut()
        .ok_or_else(|| ShotframeError::render("mockup layer missing"))?;
    layer.clear();
    Ok(layer)
}

fn render_mockup(
    surface: &mut Surface,
    layer: &mut Surface,
    mockup: &mut dyn MockupRenderer,
    style: &StyleSet,
    screenshot: Option<&RasterImage>,
) -> ShotframeResult<()> {
    let r = style.transform.rotation_3d;
    mockup.set_rotation(r.x, r.y, r.z);
    if let Some(image) = screenshot {
        mockup.update_screen_texture(
            image,
            style.transform.corner_radius / CORNER_REFERENCE_WIDTH,
        );
    }
    let canvas = surface.canvas();
    mockup.render_to_composite_surface(layer, canvas.width, canvas.height)?;
    surface.composite(layer.data(), 1.0)
}
