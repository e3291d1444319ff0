//! Shotframe composes app-store marketing screenshots.
//!
//! A [`Project`] holds an ordered list of screenshots, each with its own [`StyleSet`]
//! (background, device transform, headline and subheadline text). The [`Compositor`] paints one
//! image at a time into a premultiplied RGBA8 [`Surface`]:
//!
//! - background (gradient, solid or image), then optional grain
//! - the screenshot with shadow and device frame, or a pluggable [`MockupRenderer`]
//! - headline and subheadline text
//!
//! [`export_one`] and [`export_all`] turn renders into PNG files and zip archives, and the
//! `persist` layer reads every historical project layout through one upgrade chain.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod assets;
pub(crate) mod effects;
pub(crate) mod export;
pub(crate) mod geometry;
pub(crate) mod persist;
pub(crate) mod render;
pub(crate) mod style;
pub(crate) mod text;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{ShotframeError, ShotframeResult};

pub use crate::style::background::{Background, BackgroundKind, Gradient, GradientStop, ImageFit};
pub use crate::style::color::Rgb;
pub use crate::style::command::StyleCommand;
pub use crate::style::output::OutputSize;
pub use crate::style::project::{ImageId, Project, ProjectImage};
pub use crate::style::style_set::StyleSet;
pub use crate::style::text::{
    DEFAULT_LANGUAGE, Headline, LanguageText, Subheadline, TextBlock, TextLayer, TextLayerId,
    TextPosition,
};
pub use crate::style::transform::{Frame, FrameStyle, NotchKind, Rotation3d, Shadow, Transform};

pub use crate::assets::decode::decode_image;
pub use crate::assets::fonts::{DirFontLoader, FaceKey, FontBook, FontLoader};
pub use crate::assets::library::{ImageLibrary, ImageRef, RasterImage};

pub use crate::geometry::fit::{
    CORNER_REFERENCE_WIDTH, Placement, compose_transform, corner_radius_px, fit_rect,
};
pub use crate::geometry::path::rounded_rect_path;

pub use crate::text::layout::{
    Decoration, LinePlan, SIDE_PADDING_FRACTION, SUBHEADLINE_ANCHOR_OFFSET, SUBHEADLINE_GAP,
    SUBHEADLINE_LINE_HEIGHT, available_width, decoration_rect, place_headline, place_subheadline,
    text_anchor,
};
pub use crate::text::wrap::wrap_text;

pub use crate::render::compositor::{
    Compositor, CompositorOpts, NOISE_SEED_ENV, RenderJob, RenderOutcome, RenderResources,
    RenderState, RenderTrigger, RequestOutcome,
};
pub use crate::render::mockup::{MockupRenderer, TextureState};
pub use crate::render::surface::Surface;

pub use crate::persist::schema::{
    CURRENT_SCHEMA_VERSION, LoadedProject, SchemaVersion, load_project_str, load_project_value,
    project_to_json,
};
pub use crate::persist::store::{DirStore, MemoryStore, PersistenceAdapter, ProjectStore};

pub use crate::export::archive::ExportArchive;
pub use crate::export::batch::{ExportOpts, export_all, export_all_into, export_one};
pub use crate::export::png::encode_png;
