use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dither_render::{
    DrawCommand, GlyphRamp, Preset, RasterSurface, RecordingSurface, Registry, RenderConfig,
    Rgb, Surface, TextSurface,
};
use log::debug;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render radial ASCII dithering backgrounds")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the pattern to stdout as a character grid
    Preview(PreviewArgs),
    /// Render the pattern and write it to a PNG file
    Export(ExportArgs),
    /// Print the draw calls issued for one render as JSON lines
    Trace(TraceArgs),
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    viewport: Viewport,
    /// Pixel width of one preview column (defaults to the grid spacing)
    #[arg(long)]
    cell_width: Option<u32>,
    /// Pixel height of one preview row (defaults to the grid spacing)
    #[arg(long)]
    cell_height: Option<u32>,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Output PNG path
    #[arg(short, long)]
    output: PathBuf,
    #[command(flatten)]
    viewport: Viewport,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Args, Debug)]
struct TraceArgs {
    #[command(flatten)]
    viewport: Viewport,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Args, Debug, Clone, Copy)]
struct Viewport {
    /// Surface width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Surface height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[derive(Args, Debug, Clone)]
struct RenderSettings {
    /// TOML file with render settings
    #[arg(short, long, conflicts_with = "preset")]
    config: Option<PathBuf>,
    /// Built-in configuration to start from
    #[arg(long, value_enum)]
    preset: Option<PresetChoice>,
    /// Glyph ramp, sparsest first
    #[arg(long)]
    chars: Option<String>,
    /// Glyph color as #rgb, #rrggbb or 0xrrggbb
    #[arg(long)]
    color: Option<Rgb>,
    /// Grid pitch in pixels
    #[arg(long)]
    spacing: Option<f64>,
    /// Glyph size in pixels
    #[arg(long)]
    glyph_size: Option<f64>,
    /// Overlay opacity (0.0 - 1.0)
    #[arg(long)]
    opacity: Option<f32>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PresetChoice {
    Default,
    Blocks,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Preview(args) => preview(args),
        Commands::Export(args) => export(args),
        Commands::Trace(args) => trace(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn preview(args: PreviewArgs) -> Result<()> {
    let config = args.settings.to_config()?;
    let pitch = config.spacing.round().max(1.0) as u32;
    let surface = TextSurface::new(
        args.cell_width.unwrap_or(pitch),
        args.cell_height.unwrap_or(pitch),
    );
    let surface = render_once(surface, config, args.viewport)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for line in surface.lines() {
        writeln!(out, "{}", line.trim_end())?;
    }
    out.flush()?;
    Ok(())
}

fn export(args: ExportArgs) -> Result<()> {
    let config = args.settings.to_config()?;
    let surface = render_once(RasterSurface::default(), config, args.viewport)?;
    surface
        .save_png(&args.output)
        .with_context(|| format!("failed to write {:?}", args.output))?;
    debug!("wrote {}x{} pattern to {:?}", surface.width(), surface.height(), args.output);
    Ok(())
}

fn trace(args: TraceArgs) -> Result<()> {
    let config = args.settings.to_config()?;
    let mut surface = render_once(RecordingSurface::new(0, 0), config, args.viewport)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_trace(&mut out, &surface.take_commands())?;
    out.flush()?;
    Ok(())
}

/// Installs an overlay on `surface`, paints it once and tears it down again.
fn render_once<S: Surface>(surface: S, config: RenderConfig, viewport: Viewport) -> Result<S> {
    let mut registry = Registry::new();
    let overlay = registry
        .install(surface, config, viewport.width, viewport.height)
        .context("failed to set up dithering background")?;
    debug!("painted {} glyphs", overlay.drawn());

    registry.remove().context("dithering background vanished before teardown")
}

fn write_trace<W: Write>(out: &mut W, commands: &[DrawCommand]) -> Result<()> {
    for command in commands {
        serde_json::to_writer(&mut *out, command)?;
        writeln!(out)?;
    }
    Ok(())
}

impl RenderSettings {
    fn to_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {:?}", path))?;
                toml::from_str(&text).with_context(|| format!("failed to parse {:?}", path))?
            },
            None => self.preset.unwrap_or(PresetChoice::Default).to_preset().config(),
        };

        if let Some(chars) = &self.chars {
            config.characters = GlyphRamp::new(chars.chars()).context("invalid --chars")?;
        }
        if let Some(color) = self.color {
            config.color = color;
        }
        if let Some(spacing) = self.spacing {
            config.spacing = spacing;
        }
        if let Some(glyph_size) = self.glyph_size {
            config.glyph_size = glyph_size;
        }
        if let Some(opacity) = self.opacity {
            config.overlay_opacity = opacity;
        }

        config.normalized().context("invalid render settings")
    }
}

impl PresetChoice {
    fn to_preset(self) -> Preset {
        match self {
            PresetChoice::Default => Preset::Default,
            PresetChoice::Blocks => Preset::Blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(args: &[&str]) -> RenderSettings {
        let mut argv = vec!["ascii-dither", "trace"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Trace(args) => args.settings,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let config = settings(&["--preset", "blocks", "--spacing", "6", "--color", "#f00"])
            .to_config()
            .unwrap();
        assert_eq!(config.characters, GlyphRamp::blocks());
        assert_eq!(config.spacing, 6.0);
        assert_eq!(config.color, Rgb::new(0xff, 0, 0));
        assert_eq!(config.overlay_opacity, 0.25);
    }

    #[test]
    fn initial_opacity_is_clamped() {
        let config = settings(&["--opacity", "3"]).to_config().unwrap();
        assert_eq!(config.overlay_opacity, 1.0);
    }

    #[test]
    fn rejects_invalid_settings() {
        assert!(settings(&["--chars", ""]).to_config().is_err());
        assert!(settings(&["--spacing", "0"]).to_config().is_err());
        assert!(Cli::try_parse_from(["ascii-dither", "trace", "--color", "red"]).is_err());
    }

    #[test]
    fn config_file_and_preset_conflict() {
        let parsed = Cli::try_parse_from([
            "ascii-dither",
            "preview",
            "--config",
            "a.toml",
            "--preset",
            "blocks",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn loads_toml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dither.toml");
        fs::write(&path, "characters = \" X\"\nspacing = 20\n").unwrap();

        let config = settings(&["--config", path.to_str().unwrap()]).to_config().unwrap();
        assert_eq!(config.characters.chars(), &[' ', 'X']);
        assert_eq!(config.spacing, 20.0);
    }

    #[test]
    fn trace_lists_background_fill_then_glyphs() {
        let config = settings(&["--chars", " X", "--spacing", "20"]).to_config().unwrap();
        let viewport = Viewport { width: 160, height: 120 };
        let mut surface = render_once(RecordingSurface::new(0, 0), config, viewport).unwrap();

        let mut out = Vec::new();
        write_trace(&mut out, &surface.take_commands()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines.iter().any(|line| line.contains(r#""op":"fill_rect""#)));
        assert_eq!(
            lines.last().copied(),
            Some(r#"{"op":"draw_text","glyph":"X","x":80.0,"y":60.0}"#)
        );
    }
}
