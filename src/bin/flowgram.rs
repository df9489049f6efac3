use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sha2::Digest as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flowgram", version, about = "Render vertical process-flow infographics")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `FLOWGRAM_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the animated GIF and the static PNG.
    Render(RenderArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct DiagramArgs {
    /// Diagram description JSON. The built-in reference diagram is used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bold font face (labels, title, badges).
    #[arg(long)]
    font_bold: Option<PathBuf>,

    /// Medium font face (descriptions, subtitle, footer).
    #[arg(long)]
    font_medium: Option<PathBuf>,

    /// Print diagnostics about font resolution (family name + SHA-256 of font bytes).
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    diagram: DiagramArgs,

    /// Output directory; created if missing.
    #[arg(long)]
    out_dir: PathBuf,

    /// Artifact name prefix.
    #[arg(long, default_value = flowgram::DEFAULT_PREFIX)]
    prefix: String,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    diagram: DiagramArgs,

    /// Number of revealed cards.
    #[arg(long)]
    visible: usize,

    /// Omit the arrows between cards.
    #[arg(long)]
    no_connectors: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env("FLOWGRAM_LOG")
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(args: &DiagramArgs) -> anyhow::Result<flowgram::DiagramConfig> {
    let mut cfg = match &args.config {
        Some(path) => flowgram::DiagramConfig::from_path(path)
            .with_context(|| format!("load diagram config '{}'", path.display()))?,
        None => flowgram::DiagramConfig::default(),
    };
    if let Some(bold) = &args.font_bold {
        cfg.fonts.bold = bold.clone();
    }
    if let Some(medium) = &args.font_medium {
        cfg.fonts.medium = medium.clone();
    }
    Ok(cfg)
}

fn build_composer(args: &DiagramArgs) -> anyhow::Result<flowgram::FrameComposer> {
    let cfg = load_config(args)?;
    let composer = flowgram::FrameComposer::from_config(cfg)?;
    if args.dump_fonts {
        dump_font_diagnostics(composer.text_engine());
    }
    Ok(composer)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut composer = build_composer(&args.diagram)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let paths = flowgram::OutputPaths::new(&args.out_dir, &args.prefix)?;

    let report = flowgram::generate_with(&mut composer, &paths)?;

    eprintln!(
        "wrote {} ({} bytes, {} frames, {} ms)",
        report.gif_path.display(),
        report.gif_bytes,
        report.gif_frames,
        report.total_duration_ms
    );
    eprintln!(
        "wrote {} ({} bytes)",
        report.png_path.display(),
        report.png_bytes
    );
    eprintln!(
        "rendered {} distinct frames at {}x{}, output {}x{}",
        report.rendered_frames,
        report.working.width,
        report.working.height,
        report.output.width,
        report.output.height
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut composer = build_composer(&args.diagram)?;
    let frame = composer.compose(args.visible, !args.no_connectors)?;

    ensure_parent(&args.out)?;
    flowgram::write_png(&frame, &args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn dump_font_diagnostics(text: &flowgram::TextEngine) {
    eprintln!("font diagnostics:");
    for (role, weight) in [
        ("bold", flowgram::FontWeight::Bold),
        ("medium", flowgram::FontWeight::Medium),
    ] {
        let face = text.face(weight);
        eprintln!("  {role}:");
        eprintln!("    path:   {}", face.path().display());
        eprintln!("    family: {}", face.family());
        eprintln!("    sha256: {}", sha256_hex(face.bytes()));
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
