//! Stored project documents and their upgrade chain.
//!
//! * v0 (no `version` key): one project-wide style plus a bare image list.
//! * v1: per-image style fields stored inline on each image, any of them possibly missing.
//! * v2: every image carries a complete `style`; also carries the default style.
//!
//! Each version has one upgrade function to the next; loading chains them up to the current
//! version.

use serde::{Deserialize, Serialize};

use crate::assets::library::ImageRef;
use crate::foundation::error::{ShotframeError, ShotframeResult};
use crate::style::background::Background;
use crate::style::output::OutputSize;
use crate::style::project::{ImageId, Project, ProjectImage};
use crate::style::style_set::StyleSet;
use crate::style::text::TextBlock;
use crate::style::transform::Transform;

/// Schema version written by this crate.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// Known stored schema versions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SchemaVersion {
    /// Project-wide style, no version marker.
    V0,
    /// Inline, optional per-image style fields.
    V1,
    /// Complete per-image styles.
    V2,
}

impl SchemaVersion {
    /// Version stored in a document; a missing marker means v0.
    pub fn detect(doc: &serde_json::Value) -> ShotframeResult<Self> {
        let obj = doc
            .as_object()
            .ok_or_else(|| ShotframeError::serde("project document must be a JSON object"))?;
        match obj.get("version") {
            None | Some(serde_json::Value::Null) => Ok(Self::V0),
            Some(v) => match v.as_u64() {
                Some(0) => Ok(Self::V0),
                Some(1) => Ok(Self::V1),
                Some(2) => Ok(Self::V2),
                _ => Err(ShotframeError::serde(format!(
                    "unsupported project schema version {v}"
                ))),
            },
        }
    }

    /// Numeric marker.
    pub fn number(self) -> u32 {
        match self {
            Self::V0 => 0,
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ImageDocV0 {
    name: String,
    screenshot: Option<ImageRef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectDocV0 {
    images: Vec<ImageDocV0>,
    background: Option<Background>,
    transform: Option<Transform>,
    text: Option<TextBlock>,
    selected: usize,
    output: OutputSize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ImageDocV1 {
    id: Option<ImageId>,
    name: String,
    screenshot: Option<ImageRef>,
    background: Option<Background>,
    transform: Option<Transform>,
    text: Option<TextBlock>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectDocV1 {
    images: Vec<ImageDocV1>,
    default_style: Option<StyleSet>,
    selected: usize,
    output: OutputSize,
}

#[derive(Debug, Deserialize)]
struct ProjectDocV2 {
    version: u32,
    #[serde(flatten)]
    project: Project,
}

/// Result of loading a stored project.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedProject {
    /// The project at the current schema.
    pub project: Project,
    /// Version the document was stored at.
    pub from_version: SchemaVersion,
    /// The document was upgraded; the host should persist it again.
    pub migrated: bool,
}

fn upgrade_v0(doc: ProjectDocV0) -> ProjectDocV1 {
    let project_style = StyleSet {
        background: doc.background.unwrap_or_default(),
        transform: doc.transform.unwrap_or_default(),
        text: doc.text.unwrap_or_default(),
    };
    ProjectDocV1 {
        images: doc
            .images
            .into_iter()
            .map(|img| ImageDocV1 {
                id: None,
                name: img.name,
                screenshot: img.screenshot,
                background: None,
                transform: None,
                text: None,
            })
            .collect(),
        default_style: Some(project_style),
        selected: doc.selected,
        output: doc.output,
    }
}

fn upgrade_v1(doc: ProjectDocV1) -> ProjectDocV2 {
    let defaults = doc.default_style.unwrap_or_default();
    let mut project = Project::new();
    project.output = doc.output;
    project.selected = doc.selected;
    // Missing fields are deep copies of the defaults; missing ids are assigned on load.
    project.images = doc
        .images
        .into_iter()
        .map(|img| ProjectImage {
            id: img.id.unwrap_or_else(|| ImageId(String::new())),
            name: img.name,
            screenshot: img.screenshot,
            style: StyleSet {
                background: img.background.unwrap_or_else(|| defaults.background.clone()),
                transform: img.transform.unwrap_or_else(|| defaults.transform.clone()),
                text: img.text.unwrap_or_else(|| defaults.text.clone()),
            },
        })
        .collect();
    project.default_style = defaults;
    ProjectDocV2 {
        version: SchemaVersion::V2.number(),
        project,
    }
}

/// Load a stored project, upgrading older schemas.
#[tracing::instrument(skip(json), fields(len = json.len()))]
pub fn load_project_str(json: &str) -> ShotframeResult<LoadedProject> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| ShotframeError::serde(e.to_string()))?;
    load_project_value(value)
}

/// Like [`load_project_str`], from an already parsed document.
pub fn load_project_value(value: serde_json::Value) -> ShotframeResult<LoadedProject> {
    let from_version = SchemaVersion::detect(&value)?;
    let parse_err = |e: serde_json::Error| {
        ShotframeError::serde(format!(
            "invalid v{} project document: {e}",
            from_version.number()
        ))
    };

    let v2 = match from_version {
        SchemaVersion::V0 => {
            let v0: ProjectDocV0 = serde_json::from_value(value).map_err(parse_err)?;
            upgrade_v1(upgrade_v0(v0))
        }
        SchemaVersion::V1 => {
            let v1: ProjectDocV1 = serde_json::from_value(value).map_err(parse_err)?;
            upgrade_v1(v1)
        }
        SchemaVersion::V2 => {
            let doc: ProjectDocV2 = serde_json::from_value(value).map_err(parse_err)?;
            tracing::debug!(version = doc.version, "project at current schema");
            doc
        }
    };

    let mut project = v2.project;
    project.ensure_invariants();
    let migrated = from_version != SchemaVersion::V2;
    if migrated {
        tracing::info!(
            from = from_version.number(),
            to = CURRENT_SCHEMA_VERSION,
            images = project.images.len(),
            "migrated stored project"
        );
    }
    Ok(LoadedProject {
        project,
        from_version,
        migrated,
    })
}

/// Serialize `project` at the current schema version.
pub fn project_to_json(project: &Project) -> ShotframeResult<String> {
    let doc = ProjectDocV2Ref {
        version: CURRENT_SCHEMA_VERSION,
        project,
    };
    serde_json::to_string_pretty(&doc).map_err(|e| ShotframeError::serde(e.to_string()))
}

#[derive(Serialize)]
struct ProjectDocV2Ref<'a> {
    version: u32,
    #[serde(flatten)]
    project: &'a Project,
}

#[cfg(test)]
#[path = "../../tests/unit/persist/schema.rs"]
mod tests;
