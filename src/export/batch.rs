use crate::export::archive::ExportArchive;
use crate::export::png::encode_png;
use crate::foundation::error::{ShotframeError, ShotframeResult};
use crate::render::compositor::{Compositor, RenderJob, RenderResources};
use crate::render::mockup::TextureState;
use crate::style::project::Project;

/// Export configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOpts {
    /// Archive entries are named `<file_stem>-<n>.png`, `n` starting at 1.
    pub file_stem: String,
    /// Maximum texture polls per frame while a 3D mockup finishes its screen texture.
    pub settle_polls: u32,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            file_stem: "screenshot".to_owned(),
            settle_polls: 8,
        }
    }
}

impl ExportOpts {
    /// Override the entry name stem.
    pub fn with_file_stem(mut self, stem: impl Into<String>) -> Self {
        self.file_stem = stem.into();
        self
    }

    /// Override the settle poll bound.
    pub fn with_settle_polls(mut self, polls: u32) -> Self {
        self.settle_polls = polls;
        self
    }

    /// Archive entry name for zero-based frame `index`.
    pub fn entry_name(&self, index: usize) -> String {
        format!("{}-{}.png", self.file_stem, index + 1)
    }
}

/// Render `job` unconditionally and return it as PNG bytes.
#[tracing::instrument(skip(compositor, job, res), fields(image = %job.image_id))]
pub fn export_one(
    compositor: &mut Compositor,
    job: &RenderJob<'_>,
    res: &mut RenderResources<'_>,
) -> ShotframeResult<Vec<u8>> {
    render_settled(compositor, job, res, ExportOpts::default().settle_polls)?;
    let surface = compositor
        .surface()
        .ok_or_else(|| ShotframeError::export("no rendered surface"))?;
    encode_png(surface)
}

/// Render every image of `project` in order and return a zip of the PNGs.
///
/// The selection is moved to each image while it renders and restored (and re-rendered)
/// afterwards, also when a frame fails.
#[tracing::instrument(skip_all, fields(images = project.images.len()))]
pub fn export_all(
    compositor: &mut Compositor,
    project: &mut Project,
    res: &mut RenderResources<'_>,
    opts: &ExportOpts,
) -> ShotframeResult<Vec<u8>> {
    let mut archive = ExportArchive::new();
    export_all_into(compositor, project, res, opts, &mut archive)?;
    archive.finish()
}

/// Like [`export_all`] but appends into a caller-owned archive. On error the frames produced so
/// far stay in `archive`.
pub fn export_all_into(
    compositor: &mut Compositor,
    project: &mut Project,
    res: &mut RenderResources<'_>,
    opts: &ExportOpts,
    archive: &mut ExportArchive,
) -> ShotframeResult<usize> {
    let original = project.selected;
    let result = export_frames(compositor, project, res, opts, archive);

    if project.select(original).is_ok() {
        let restored = RenderJob::for_project(project, original)
            .and_then(|job| compositor.force_render(&job, res).map(|_| ()));
        if let Err(e) = restored {
            tracing::warn!(error = %e, "failed to re-render the original selection");
        }
    }
    result
}

fn export_frames(
    compositor: &mut Compositor,
    project: &mut Project,
    res: &mut RenderResources<'_>,
    opts: &ExportOpts,
    archive: &mut ExportArchive,
) -> ShotframeResult<usize> {
    for index in 0..project.images.len() {
        project.select(index)?;
        let job = RenderJob::for_project(project, index)?;
        render_settled(compositor, &job, res, opts.settle_polls)?;
        let surface = compositor
            .surface()
            .ok_or_else(|| ShotframeError::export("no rendered surface"))?;
        let png = encode_png(surface)?;
        archive.add(&opts.entry_name(index), &png)?;
        tracing::debug!(index, bytes = png.len(), "frame exported");
    }
    Ok(project.images.len())
}

/// Force a render; when a 3D mockup is drawing, wait for its texture and render again so the
/// surface shows the current screenshot.
fn render_settled(
    compositor: &mut Compositor,
    job: &RenderJob<'_>,
    res: &mut RenderResources<'_>,
    settle_polls: u32,
) -> ShotframeResult<()> {
    compositor.force_render(job, res)?;
    if !job.style.transform.use_3d {
        return Ok(());
    }
    let Some(mockup) = res.mockup.as_deref_mut() else {
        return Ok(());
    };
    if !mockup.has_model_loaded() || mockup.texture_state() == TextureState::Ready {
        return Ok(());
    }
    let mut state = TextureState::Pending;
    for _ in 0..settle_polls {
        state = mockup.poll_texture();
        if state == TextureState::Ready {
            break;
        }
    }
    if state != TextureState::Ready {
        tracing::warn!(
            polls = settle_polls,
            "mockup texture still pending, exporting current frame"
        );
    }
    compositor.force_render(job, res)?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/batch.rs"]
mod tests;
