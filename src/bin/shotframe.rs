use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "shotframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one image of a project as a PNG.
    Render(RenderArgs),
    /// Export every image of a project into a zip of PNGs.
    Export(ExportArgs),
    /// Upgrade a stored project to the current schema.
    Migrate(MigrateArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Project JSON (any schema version).
    #[arg(long)]
    project: PathBuf,

    /// Image index (0-based). Defaults to the project's selection.
    #[arg(long)]
    image: Option<usize>,

    /// Directory of `.ttf`/`.otf` files named `<Family>-<Style>`.
    #[arg(long)]
    fonts: Option<PathBuf>,

    /// Family drawn when a text layer asks for one that is not loaded.
    #[arg(long)]
    fallback_font: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Project JSON (any schema version).
    #[arg(long)]
    project: PathBuf,

    /// Directory of `.ttf`/`.otf` files named `<Family>-<Style>`.
    #[arg(long)]
    fonts: Option<PathBuf>,

    /// Family drawn when a text layer asks for one that is not loaded.
    #[arg(long)]
    fallback_font: Option<String>,

    /// Archive entry name stem.
    #[arg(long, default_value = "screenshot")]
    stem: String,

    /// Output zip path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct MigrateArgs {
    /// Project JSON (any schema version).
    #[arg(long)]
    project: PathBuf,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Export(args) => cmd_export(args),
        Command::Migrate(args) => cmd_migrate(args),
    }
}

fn read_project(path: &Path) -> anyhow::Result<shotframe::LoadedProject> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read project '{}'", path.display()))?;
    let loaded = shotframe::load_project_str(&raw)
        .with_context(|| format!("parse project '{}'", path.display()))?;
    if loaded.migrated {
        eprintln!(
            "note: project upgraded from schema v{}",
            loaded.from_version.number()
        );
    }
    Ok(loaded)
}

/// Decode every raster the project references, relative to the project file.
fn load_images(project_path: &Path, project: &shotframe::Project) -> shotframe::ImageLibrary {
    let root = project_path.parent().unwrap_or_else(|| Path::new("."));
    let mut library = shotframe::ImageLibrary::with_root(root);
    let styles =
        std::iter::once(&project.default_style).chain(project.images.iter().map(|i| &i.style));
    let refs = project
        .images
        .iter()
        .filter_map(|i| i.screenshot.clone())
        .chain(styles.filter_map(|s| s.background.image.clone()))
        .collect::<Vec<_>>();
    for r in refs {
        if let Err(e) = library.load(&r) {
            tracing::warn!(asset = %r, error = %e, "asset not loaded");
        }
    }
    library
}

fn load_fonts(
    dir: Option<&Path>,
    fallback: Option<&str>,
) -> anyhow::Result<shotframe::FontBook> {
    let mut book = shotframe::FontBook::new();
    if let Some(dir) = dir {
        let n = shotframe::DirFontLoader::new(dir)
            .load_all(&mut book)
            .with_context(|| format!("load fonts from '{}'", dir.display()))?;
        tracing::debug!(faces = n, "fonts registered");
    }
    if let Some(family) = fallback {
        if !book.has_family(family) {
            tracing::warn!(family, "fallback font family is not loaded");
        }
        book.set_fallback(family);
    }
    Ok(book)
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let loaded = read_project(&args.project)?;
    let project = loaded.project;
    let index = args.image.unwrap_or(project.selected);

    let images = load_images(&args.project, &project);
    let mut fonts = load_fonts(args.fonts.as_deref(), args.fallback_font.as_deref())?;
    let mut res = shotframe::RenderResources::new(&images, &mut fonts);
    let mut compositor = shotframe::Compositor::default();

    let job = shotframe::RenderJob::for_project(&project, index)?;
    let png = shotframe::export_one(&mut compositor, &job, &mut res)?;
    write_output(&args.out, &png)
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let loaded = read_project(&args.project)?;
    let mut project = loaded.project;

    let images = load_images(&args.project, &project);
    let mut fonts = load_fonts(args.fonts.as_deref(), args.fallback_font.as_deref())?;
    let mut res = shotframe::RenderResources::new(&images, &mut fonts);
    let mut compositor = shotframe::Compositor::default();

    let opts = shotframe::ExportOpts::default().with_file_stem(args.stem);
    let zip = shotframe::export_all(&mut compositor, &mut project, &mut res, &opts)?;
    write_output(&args.out, &zip)
}

fn cmd_migrate(args: MigrateArgs) -> anyhow::Result<()> {
    let loaded = read_project(&args.project)?;
    let json = shotframe::project_to_json(&loaded.project)?;
    match args.out {
        Some(out) => write_output(&out, json.as_bytes()),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
