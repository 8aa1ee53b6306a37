mod logging;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use image::RgbaImage;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use sprite_render::{
    BatchObserver, BatchPipeline, ColorModel, ColorPair, FontRegistry, PaletteSpec,
    PipelineConfig, SpriteRenderer, TextLayout, Vocabulary, Word, BUILTIN_FAMILY,
    DEFAULT_OUTPUT_ROOT,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Batch-render pixel-art label sprites")]
struct Cli {
    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Decrease log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    quiet: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render every word of the vocabulary in every palette color
    Generate(GenerateArgs),
    /// Print one sprite to the terminal
    Preview(PreviewArgs),
    /// List the palette colors
    Palette(PaletteArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// YAML file with a top-level `words` list
    #[arg(long, default_value = "words.yml")]
    words: PathBuf,
    /// Output root directory
    #[arg(short, long, default_value = DEFAULT_OUTPUT_ROOT)]
    out: PathBuf,
    /// Registered font family to draw with
    #[arg(long, default_value = BUILTIN_FAMILY)]
    font: String,
    /// Keep sprites that already exist instead of re-rendering them
    #[arg(long, default_value_t = false)]
    skip_existing: bool,
    #[command(flatten)]
    palette: PaletteArgs,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// Word to render
    word: String,
    /// 1-based palette index of the colors
    #[arg(long, default_value_t = 1)]
    index: usize,
    /// Also write the sprite as PNG to this path
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[command(flatten)]
    palette: PaletteArgs,
}

#[derive(Args, Debug, Clone)]
struct PaletteArgs {
    /// Number of hues sampled around the color wheel
    #[arg(long, default_value_t = 64)]
    hues: usize,
    /// Color model used to derive main and shadow colors
    #[arg(long, value_enum, default_value = "oklch")]
    model: ModelChoice,
    /// Lightness tiers per hue (defaults to every tier of the model)
    #[arg(long)]
    tiers: Option<usize>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ModelChoice {
    Hsl,
    Oklch,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(logging::level_from_flags(cli.verbose, cli.quiet))
        .context("failed to initialize logging")?;

    match cli.command {
        Commands::Generate(args) => generate(args),
        Commands::Preview(args) => preview(args),
        Commands::Palette(args) => palette(args),
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    let config = PipelineConfig {
        font_family: args.font,
        output_root: args.out,
        palette: args.palette.to_spec()?,
        skip_existing: args.skip_existing,
    };

    let vocabulary = Vocabulary::load(&args.words)
        .with_context(|| format!("failed to load vocabulary {:?}", args.words))?;
    let pipeline = BatchPipeline::new(&config, &FontRegistry::with_builtin())
        .context("invalid render configuration")?;

    let (words, rejected) = BatchPipeline::prepare_words(&vocabulary.words);
    let progress = ProgressBar::new(pipeline.sprite_count(words.len()) as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sprites {msg}",
        )?
        .progress_chars("=> "),
    );

    let mut sink = config.sink();
    let report = pipeline.run_words(&words, &mut sink, &mut ProgressObserver(&progress));
    progress.finish_with_message(format!("written to {:?}", sink.root()));

    info!(
        "{} words, {} sprites written, {} skipped, {} failed, {} entries rejected",
        report.words,
        report.written,
        report.skipped,
        report.failures.len(),
        rejected.len()
    );
    for failure in &report.failures {
        error!("{}-{}: {}", failure.word, failure.index, failure.error);
    }

    if !report.failures.is_empty() {
        anyhow::bail!("{} sprites could not be written", report.failures.len());
    }
    Ok(())
}

fn preview(args: PreviewArgs) -> Result<()> {
    let spec = args.palette.to_spec()?;
    let palette = spec.generate().context("invalid palette")?;
    let colors = palette.get(args.index).with_context(|| {
        format!("palette index {} is outside 1..={}", args.index, palette.len())
    })?;

    let word = Word::new(&args.word)?;
    let font = FontRegistry::with_builtin().resolve(BUILTIN_FAMILY)?;
    let renderer = SpriteRenderer::new(font);
    let layout = TextLayout::new(&word);

    print_sprite(&renderer.render_image(&layout, colors));
    println!(
        "{}x{} main {} shadow {}",
        layout.geometry.width, layout.geometry.height, colors.main, colors.shadow
    );

    if let Some(output) = args.output {
        let bytes = renderer.render(&layout, colors)?;
        fs::write(&output, bytes).with_context(|| format!("failed to write {:?}", output))?;
    }
    Ok(())
}

fn palette(args: PaletteArgs) -> Result<()> {
    let palette = args.to_spec()?.generate().context("invalid palette")?;
    for colors in &palette {
        println!("{}\t{}\t{}", colors.index, colors.main, colors.shadow);
    }
    Ok(())
}

/// Two terminal cells per pixel, drawn with 24-bit color escapes.
fn print_sprite(image: &RgbaImage) {
    for row in image.rows() {
        let line: String = row
            .map(|pixel| {
                let [r, g, b, _] = pixel.0;
                format!("\x1b[38;2;{r};{g};{b}m██")
            })
            .collect();
        println!("{line}\x1b[0m");
    }
}

struct ProgressObserver<'a>(&'a ProgressBar);

impl BatchObserver for ProgressObserver<'_> {
    fn sprite_finished(&mut self, _word: &Word, _colors: &ColorPair) {
        self.0.inc(1);
    }

    fn word_finished(&mut self, word: &Word) {
        self.0.set_message(word.to_string());
    }
}

impl PaletteArgs {
    fn to_spec(&self) -> Result<PaletteSpec> {
        let spec = PaletteSpec::new(self.hues, self.model.to_model());
        match self.tiers {
            Some(count) => Ok(spec.with_tier_count(count)?),
            None => Ok(spec),
        }
    }
}

impl ModelChoice {
    fn to_model(self) -> ColorModel {
        match self {
            ModelChoice::Hsl => ColorModel::Hsl,
            ModelChoice::Oklch => ColorModel::Oklch,
        }
    }
}
