use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "screencraft", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a beautified screenshot as a PNG.
    Render(RenderArgs),
    /// List built-in canvas-size and gradient presets.
    Presets,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input screenshot (PNG or JPG). Omit for a background-only canvas.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Settings JSON file; defaults apply when omitted.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Canvas-size preset name (overrides width/height from settings).
    #[arg(long)]
    preset: Option<String>,

    /// Canvas width override in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height override in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Frame chrome override.
    #[arg(long, value_enum)]
    frame: Option<FrameChoice>,

    /// Output PNG path; defaults to a timestamped name in the working dir.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FrameChoice {
    None,
    Browser,
    Desktop,
    Mobile,
}

impl From<FrameChoice> for screencraft::FrameType {
    fn from(c: FrameChoice) -> Self {
        match c {
            FrameChoice::None => screencraft::FrameType::None,
            FrameChoice::Browser => screencraft::FrameType::Browser,
            FrameChoice::Desktop => screencraft::FrameType::Desktop,
            FrameChoice::Mobile => screencraft::FrameType::Mobile,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Presets => cmd_presets(),
    }
}

fn read_settings_json(path: &Path) -> anyhow::Result<screencraft::CanvasSettings> {
    let f = File::open(path).with_context(|| format!("open settings '{}'", path.display()))?;
    let r = BufReader::new(f);
    let settings: screencraft::CanvasSettings =
        serde_json::from_reader(r).context("parse settings JSON")?;
    Ok(settings)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut settings = match &args.settings {
        Some(path) => read_settings_json(path)?,
        None => screencraft::CanvasSettings::default(),
    };

    if let Some(name) = &args.preset {
        let preset = screencraft::canvas_preset(name)
            .with_context(|| format!("unknown canvas preset '{name}'"))?;
        settings.apply_canvas_preset(preset);
    }
    if let Some(w) = args.width {
        settings.width = w;
    }
    if let Some(h) = args.height {
        settings.height = h;
    }
    if let Some(frame) = args.frame {
        settings.frame_type = frame.into();
    }
    settings.validate()?;

    let source = match &args.image {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read image '{}'", path.display()))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Some(screencraft::decode_source(&bytes, &name)?)
        }
        None => None,
    };

    let frame = screencraft::render_frame(&settings, source.as_ref())?;
    let png = screencraft::encode_png(&frame)?;

    let out = match args.out {
        Some(out) => out,
        None => PathBuf::from(screencraft::export_file_name(epoch_ms()?)),
    };
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&out, &png).with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    println!("canvas presets:");
    for p in screencraft::CANVAS_PRESETS {
        println!("  {:<30} {}x{} ({:?})", p.name, p.width, p.height, p.category);
    }
    println!("gradient presets:");
    for p in screencraft::GRADIENT_PRESETS {
        println!("  {:<16} {} -> {}", p.name, p.start, p.end);
    }
    Ok(())
}

fn epoch_ms() -> anyhow::Result<u64> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before unix epoch")?;
    Ok(now.as_millis() as u64)
}
