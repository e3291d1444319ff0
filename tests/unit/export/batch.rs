use std::io::Cursor;

use super::*;
use crate::assets::fonts::FontBook;
use crate::assets::library::ImageLibrary;
use crate::render::compositor::CompositorOpts;
use crate::style::background::BackgroundKind;
use crate::style::color::Rgb;
use crate::style::command::StyleCommand;
use crate::style::output::OutputSize;

fn project(colors: &[Rgb]) -> Project {
    let mut p = Project::new();
    p.output = OutputSize::Custom {
        width: 8,
        height: 12,
    };
    for (i, c) in colors.iter().enumerate() {
        p.add_image(format!("shot {i}"), None);
        p.apply(i, StyleCommand::SetBackgroundKind(BackgroundKind::Solid))
            .unwrap();
        p.apply(i, StyleCommand::SetSolidColor(*c)).unwrap();
    }
    p
}

fn first_pixel(png: &[u8]) -> [u8; 3] {
    image::load_from_memory(png)
        .unwrap()
        .to_rgb8()
        .get_pixel(0, 0)
        .0
}

#[test]
fn entry_names_are_one_based() {
    let o = ExportOpts::default().with_file_stem("shot");
    assert_eq!(o.entry_name(0), "shot-1.png");
    assert_eq!(o.entry_name(9), "shot-10.png");
}

#[test]
fn export_all_restores_selection() {
    let colors = [Rgb::new(255, 0, 0), Rgb::new(0, 255, 0), Rgb::new(0, 0, 255)];
    let mut p = project(&colors);
    p.select(1).unwrap();
    let images = ImageLibrary::new();
    let mut fonts = FontBook::new();
    let mut res = RenderResources::new(&images, &mut fonts);
    let mut c = Compositor::new(CompositorOpts::default());

    let zip_bytes = export_all(&mut c, &mut p, &mut res, &ExportOpts::default()).unwrap();
    assert_eq!(p.selected, 1);
    assert_eq!(c.last_image(), Some(&p.images[1].id));
    assert_eq!(c.surface().unwrap().pixel(0, 0), Some([0, 255, 0, 255]));

    let mut zip = zip::ZipArchive::new(Cursor::new(zip_bytes)).unwrap();
    assert_eq!(zip.len(), 3);
    for (i, c) in colors.iter().enumerate() {
        let mut entry = zip.by_index(i).unwrap();
        assert_eq!(entry.name(), format!("screenshot-{}.png", i + 1));
        let mut png = Vec::new();
        std::io::Read::read_to_end(&mut entry, &mut png).unwrap();
        assert_eq!(first_pixel(&png), [c.r, c.g, c.b]);
    }
}

#[test]
fn empty_project_exports_empty_archive() {
    let mut p = Project::new();
    let images = ImageLibrary::new();
    let mut fonts = FontBook::new();
    let mut res = RenderResources::new(&images, &mut fonts);
    let mut c = Compositor::default();
    let mut archive = ExportArchive::new();
    let n = export_all_into(&mut c, &mut p, &mut res, &ExportOpts::default(), &mut archive)
        .unwrap();
    assert_eq!(n, 0);
    assert!(archive.is_empty());
}

#[test]
fn export_one_ignores_skip_cache() {
    let p = project(&[Rgb::new(10, 20, 30)]);
    let images = ImageLibrary::new();
    let mut fonts = FontBook::new();
    let mut res = RenderResources::new(&images, &mut fonts);
    let mut c = Compositor::new(CompositorOpts::default().with_skip_unchanged(true));
    let job = RenderJob::for_project(&p, 0).unwrap();
    c.render(&job, &mut res).unwrap();
    let before = c.render_count();
    let png = export_one(&mut c, &job, &mut res).unwrap();
    assert_eq!(c.render_count(), before + 1);
    assert_eq!(first_pixel(&png), [10, 20, 30]);
}

struct SlowTexture {
    pending_polls: u32,
    polls: u32,
    frames: u32,
}

impl SlowTexture {
    fn new(pending_polls: u32) -> Self {
        Self {
            pending_polls,
            polls: 0,
            frames: 0,
        }
    }
}

impl crate::render::mockup::MockupRenderer for SlowTexture {
    fn has_model_loaded(&self) -> bool {
        true
    }

    fn set_rotation(&mut self, _x: f64, _y: f64, _z: f64) {}

    fn update_screen_texture(
        &mut self,
        _image: &crate::assets::library::RasterImage,
        _corner_radius_fraction: f64,
    ) {
    }

    fn texture_state(&self) -> TextureState {
        if self.polls >= self.pending_polls {
            TextureState::Ready
        } else {
            TextureState::Pending
        }
    }

    fn poll_texture(&mut self) -> TextureState {
        self.polls += 1;
        self.texture_state()
    }

    fn render_to_composite_surface(
        &mut self,
        target: &mut crate::render::surface::Surface,
        _width: u32,
        _height: u32,
    ) -> ShotframeResult<()> {
        self.frames += 1;
        let px = match self.texture_state() {
            TextureState::Ready => [0, 0, 255, 255],
            TextureState::Pending => [255, 0, 0, 255],
        };
        target.fill(px);
        Ok(())
    }
}

fn mockup_project() -> Project {
    let mut p = project(&[Rgb::new(0, 0, 0)]);
    p.apply(0, StyleCommand::SetUse3d(true)).unwrap();
    p
}

#[test]
fn export_waits_for_pending_mockup_texture() {
    let p = mockup_project();
    let images = ImageLibrary::new();
    let mut fonts = FontBook::new();
    let mut mockup = SlowTexture::new(3);
    let mut c = Compositor::default();
    let png = {
        let mut res = RenderResources::new(&images, &mut fonts).with_mockup(&mut mockup);
        let job = RenderJob::for_project(&p, 0).unwrap();
        export_one(&mut c, &job, &mut res).unwrap()
    };
    assert_eq!(mockup.polls, 3);
    assert_eq!(mockup.frames, 2);
    assert_eq!(first_pixel(&png), [0, 0, 255]);
}

#[test]
fn export_gives_up_after_settle_polls() {
    let mut p = mockup_project();
    let images = ImageLibrary::new();
    let mut fonts = FontBook::new();
    let mut mockup = SlowTexture::new(u32::MAX);
    let mut c = Compositor::default();
    let zip_bytes = {
        let mut res = RenderResources::new(&images, &mut fonts).with_mockup(&mut mockup);
        let opts = ExportOpts::default().with_settle_polls(2);
        export_all(&mut c, &mut p, &mut res, &opts).unwrap()
    };
    assert_eq!(mockup.polls, 2);
    // Two renders for the frame, one for restoring the selection.
    assert_eq!(mockup.frames, 3);

    let mut zip = zip::ZipArchive::new(Cursor::new(zip_bytes)).unwrap();
    let mut entry = zip.by_index(0).unwrap();
    let mut png = Vec::new();
    std::io::Read::read_to_end(&mut entry, &mut png).unwrap();
    assert_eq!(first_pixel(&png), [255, 0, 0]);
}
