use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "playmat", version)]
struct Cli {
    /// Log layer decisions and asset fallbacks to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a document and write a PNG.
    Render(RenderArgs),
    /// Write the vector preview markup of a document.
    Preview(PreviewArgs),
    /// Create a document from a preset.
    New(NewArgs),
    /// Add a catalog logo to a document.
    AddLogo(AddLogoArgs),
    /// List preset and logo names.
    Presets(PresetsArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Export resolution profile.
    #[arg(long, value_enum, default_value_t = ProfileChoice::Preview)]
    profile: ProfileChoice,

    /// Custom export width; requires `--height` and overrides `--profile`.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Custom export height; requires `--width`.
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Directory asset paths are resolved against. Defaults to the document's directory.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Editor config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    /// Leave out background, overlay and logos.
    #[arg(long)]
    shapes_only: bool,
}

#[derive(Parser, Debug)]
struct NewArgs {
    /// Preset name.
    #[arg(long)]
    preset: String,

    /// Extra catalog JSON merged over the built-in one.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Background image reference.
    #[arg(long)]
    background: Option<String>,

    /// Editor config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output document JSON.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct AddLogoArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Logo name in the catalog.
    #[arg(long)]
    logo: String,

    /// Catalog JSON providing the logo.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Directory asset paths are resolved against. Defaults to the document's directory.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Editor config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output document JSON. Defaults to overwriting `--in`.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PresetsArgs {
    /// Extra catalog JSON merged over the built-in one.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProfileChoice {
    Preview,
    Print,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Preview(args) => cmd_preview(args),
        Command::New(args) => cmd_new(args),
        Command::AddLogo(args) => cmd_add_logo(args),
        Command::Presets(args) => cmd_presets(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<playmat::EditorConfig> {
    let cfg = match path {
        Some(p) => playmat::EditorConfig::from_json_file(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => playmat::EditorConfig::default(),
    };
    Ok(cfg.with_env_overrides())
}

fn load_catalog(
    path: Option<&Path>,
    cfg: &playmat::EditorConfig,
) -> anyhow::Result<playmat::Catalog> {
    let builtin = playmat::Catalog::builtin(cfg.design);
    Ok(match path {
        Some(p) => builtin.merged(
            playmat::Catalog::from_json_file(p)
                .with_context(|| format!("load catalog '{}'", p.display()))?,
        ),
        None => builtin,
    })
}

fn read_document(path: &Path) -> anyhow::Result<playmat::Document> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read document '{}'", path.display()))?;
    playmat::Document::from_json_str(&text)
        .with_context(|| format!("parse document '{}'", path.display()))
}

fn open_assets(
    root: Option<&Path>,
    doc_path: &Path,
    cfg: &playmat::EditorConfig,
) -> playmat::AssetStore {
    let root = root
        .or_else(|| doc_path.parent())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    playmat::AssetStore::new(root).with_advisory_limit(cfg.advisory_asset_bytes)
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
    let cfg = load_config(args.config.as_deref())?;
    let mut doc = read_document(&args.in_path)?;
    doc.apply_config(&cfg);

    let profile = match (args.width, args.height) {
        (Some(width), Some(height)) => {
            playmat::ExportProfile::Custom(playmat::Canvas::new(width, height)?)
        }
        _ => match args.profile {
            ProfileChoice::Preview => playmat::ExportProfile::Preview,
            ProfileChoice::Print => playmat::ExportProfile::Print,
        },
    };

    let mut assets = open_assets(args.assets.as_deref(), &args.in_path, &cfg);
    let failed = assets.prepare(&doc);
    if failed > 0 {
        eprintln!("{failed} asset(s) failed to load and will be skipped");
    }

    let exported = playmat::export_png(&doc, &assets, profile, &cfg)?;
    write_output(&args.out, &exported.png)
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let doc = read_document(&args.in_path)?;
    let opts = if args.shapes_only {
        playmat::PreviewOptions::shapes_only()
    } else {
        playmat::PreviewOptions::default()
    };
    let svg = playmat::render_preview_svg(&doc, &opts);
    write_output(&args.out, svg.as_bytes())
}

fn cmd_new(args: NewArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let catalog = load_catalog(args.catalog.as_deref(), &cfg)?;
    let preset = catalog.preset(&args.preset)?;

    let mut doc = playmat::Document::with_config(&cfg)?;
    if let Some(bg) = args.background {
        doc.set_background(playmat::AssetRef::new(bg));
    }
    doc.apply_preset(preset);

    let json = doc.to_json_string()?;
    write_output(&args.out, json.as_bytes())
}

fn cmd_add_logo(args: AddLogoArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let catalog = load_catalog(args.catalog.as_deref(), &cfg)?;
    let entry = catalog.logo(&args.logo)?;

    let mut doc = read_document(&args.in_path)?;
    doc.apply_config(&cfg);
    let mut assets = open_assets(args.assets.as_deref(), &args.in_path, &cfg);
    let id = doc.add_logo_from_catalog(entry, &mut assets);
    eprintln!("added {id} from '{}'", entry.src);

    let json = doc.to_json_string()?;
    write_output(args.out.as_deref().unwrap_or(&args.in_path), json.as_bytes())
}

fn cmd_presets(args: PresetsArgs) -> anyhow::Result<()> {
    let cfg = load_config(None)?;
    let catalog = load_catalog(args.catalog.as_deref(), &cfg)?;
    println!("presets:");
    for name in catalog.presets.keys() {
        println!("  {name}");
    }
    println!("logos:");
    for name in catalog.logos.keys() {
        println!("  {name}");
    }
    Ok(())
}
