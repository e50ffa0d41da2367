use std::fs::File;
use std::io::{self, BufWriter, Read as _, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use glyphreel::{
    Animation, GlyphError, LoopMode, Palette, PaletteChoice, PipelineMode, PlaybackOpts, Player,
    RenderConfig, Source, TerminalSink, TextFrame,
};

#[derive(Parser, Debug)]
#[command(
    name = "glyphreel",
    version,
    about = "Render PNG, JPEG and GIF images as text, or play GIFs in the terminal"
)]
struct Cli {
    /// Input image; stdin when omitted.
    input: Option<PathBuf>,

    /// Output text file; stdout when omitted. Ignored with --animate.
    output: Option<PathBuf>,

    /// Output width in columns (0 derives it from --height).
    #[arg(short = 'w', long)]
    width: Option<u32>,

    /// Output height in rows before pixel-ratio correction (0 derives it from --width).
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Glyph width divided by glyph height.
    #[arg(long)]
    pxr: Option<f64>,

    /// Glyphs to use, from empty to solid.
    #[arg(long, conflicts_with = "set")]
    chars: Option<String>,

    /// Built-in character set (see --list-sets).
    #[arg(long)]
    set: Option<String>,

    /// Reverse the character set for dark-on-light output.
    #[arg(long)]
    invert: bool,

    /// Play animated GIFs in the terminal instead of printing every frame.
    #[arg(long)]
    animate: bool,

    /// Stop after one pass (with --animate).
    #[arg(long, requires = "animate")]
    once: bool,

    /// Render animation frames on a worker pool.
    #[arg(long)]
    staged: bool,

    /// Worker threads for --staged.
    #[arg(long)]
    threads: Option<usize>,

    /// Render config JSON; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the built-in character sets and exit.
    #[arg(long)]
    list_sets: bool,

    /// Log progress and timing to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list_sets {
        return list_sets();
    }

    let config = build_config(&cli)?;
    match read_source(cli.input.as_deref())? {
        Source::Animated(animation) if cli.animate => cmd_animate(&cli, &animation, &config),
        Source::Animated(animation) => {
            let frames = glyphreel::render_animation(&animation, &config)?;
            write_output(cli.output.as_deref(), &frames)
        }
        Source::Still(raster) => {
            if cli.animate {
                tracing::warn!("input is not animated; printing it as a still");
            }
            let frame = glyphreel::render_still(&raster, &config)?;
            write_output(cli.output.as_deref(), &[frame])
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn list_sets() -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    for name in glyphreel::charset_names() {
        let glyphs: String = Palette::named(name)?.chars().collect();
        writeln!(out, "{name:>8}  \"{glyphs}\"")?;
    }
    Ok(())
}

fn build_config(cli: &Cli) -> anyhow::Result<RenderConfig> {
    let mut config = match &cli.config {
        Some(path) => RenderConfig::from_path(path)?,
        None => RenderConfig::default(),
    };
    if let Some(w) = cli.width {
        config.target_width = w;
    }
    if let Some(h) = cli.height {
        config.target_height = h;
    }
    if let Some(pxr) = cli.pxr {
        config.pixel_ratio = pxr;
    }
    if let Some(chars) = &cli.chars {
        config.palette = PaletteChoice::Glyphs(chars.clone());
    }
    if let Some(set) = &cli.set {
        config.palette = PaletteChoice::Named(set.clone());
    }
    config.invert |= cli.invert;
    if cli.staged {
        config.pipeline = PipelineMode::Staged;
    }
    if cli.threads.is_some() {
        config.threads = cli.threads;
    }
    config.validate()?;
    Ok(config)
}

fn read_source(input: Option<&Path>) -> anyhow::Result<Source> {
    let source = match input {
        Some(path) => glyphreel::load_path(path)?,
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .context("read image from stdin")?;
            glyphreel::decode(&bytes)?
        }
    };
    let first = source.first_raster();
    tracing::debug!(
        width = first.width(),
        height = first.height(),
        animated = matches!(source, Source::Animated(_)),
        "decoded input"
    );
    Ok(source)
}

fn write_output(output: Option<&Path>, frames: &[TextFrame]) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let file = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            glyphreel::write_text_frames(&mut BufWriter::new(file), frames)
                .with_context(|| format!("write text '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => glyphreel::write_text_frames(&mut io::stdout().lock(), frames)
            .context("write text to stdout")?,
    }
    Ok(())
}

fn cmd_animate(cli: &Cli, animation: &Animation, config: &RenderConfig) -> anyhow::Result<()> {
    let frames = glyphreel::render_animation(animation, config)?;
    let opts = PlaybackOpts {
        loop_mode: if cli.once {
            LoopMode::Once
        } else {
            LoopMode::from(animation.loop_count())
        },
        ..PlaybackOpts::default()
    };
    let mut sink = TerminalSink::new(BufWriter::new(io::stdout()));
    let mut player = Player::new(opts);

    match player.play(&mut sink, &frames, &animation.delays()) {
        Ok(report) => {
            tracing::debug!(?report, "playback report");
            Ok(())
        }
        Err(e @ GlyphError::SinkWrite(_)) => {
            tracing::warn!(error = %e, "playback failed; printing the first frame instead");
            write_output(None, &frames[..1])
        }
        Err(e) => Err(e.into()),
    }
}
