//! reflow CLI - rebuild flow documents from extraction dumps

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use reflow::{
    DocumentBuilder, Engine, EngineOptions, MarkdownBuilder, MemorySource, ReconstructionStats,
    RecordingBuilder,
};

#[derive(Parser)]
#[command(name = "reflow")]
#[command(author = "iyulab")]
#[command(version)]
#[command(
    about = "Rebuild paragraphs, headings, images and tables from extracted PDF primitives",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Reject flag combinations clap cannot express declaratively.
    fn validate(&self) -> Result<(), clap::Error> {
        if let Commands::Convert {
            format: OutputFormat::Events,
            image_dir: Some(_),
            ..
        } = &self.command
        {
            return Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "--image-dir only applies to --format markdown",
            ));
        }
        Ok(())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct an extraction dump into a document
    Convert {
        /// Extraction dump (JSON)
        #[arg(value_name = "DUMP")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "markdown")]
        format: OutputFormat,

        /// Directory to write referenced images to (Markdown only)
        #[arg(long, value_name = "DIR")]
        image_dir: Option<PathBuf>,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Show reconstruction statistics for an extraction dump
    Stats {
        /// Extraction dump (JSON)
        #[arg(value_name = "DUMP")]
        input: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct EngineArgs {
    /// Skip pages whose extraction failed instead of aborting
    #[arg(long)]
    lenient: bool,

    /// Compose pages one at a time
    #[arg(long)]
    sequential: bool,

    /// Same-block paragraph continuation gap, in multiples of the font size
    #[arg(long, value_name = "K", env = "REFLOW_GAP_FACTOR")]
    gap_factor: Option<f32>,
}

impl EngineArgs {
    fn engine(&self) -> Engine {
        let mut options = EngineOptions::new();
        if self.lenient {
            options = options.lenient();
        }
        if self.sequential {
            options = options.sequential();
        }
        if let Some(k) = self.gap_factor {
            options = options.with_continuation_gap_factor(k);
        }
        Engine::new(options)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Markdown document
    Markdown,
    /// JSON list of builder calls
    Events,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = cli.validate() {
        e.exit();
    }

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            format,
            image_dir,
            engine,
        } => cmd_convert(
            &input,
            output.as_deref(),
            format,
            image_dir.as_deref(),
            &engine,
        ),
        Commands::Stats {
            input,
            json,
            engine,
        } => cmd_stats(&input, json, &engine),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    image_dir: Option<&Path>,
    args: &EngineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = MemorySource::open(input)?;
    log::debug!("Loaded {} pages from {}", source.document().pages.len(), input.display());
    let engine = args.engine();

    let pb = spinner("Reconstructing...");
    let (content, stats) = match format {
        OutputFormat::Markdown => {
            let mut builder = MarkdownBuilder::new();
            let stats = engine.reconstruct(&source, &mut builder)?;
            if let Some(dir) = image_dir {
                write_images(dir, &builder)?;
            }
            (builder.finalize()?, stats)
        }
        OutputFormat::Events => {
            let (events, stats) = engine.reconstruct_into(&source, RecordingBuilder::new())?;
            (serde_json::to_string_pretty(&events)?, stats)
        }
    };
    pb.finish_and_clear();

    if stats.skipped_pages > 0 {
        eprintln!(
            "{} {} page(s) skipped",
            "Warning:".yellow().bold(),
            stats.skipped_pages
        );
    }

    if let Some(path) = output {
        fs::write(path, &content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}

fn write_images(dir: &Path, builder: &MarkdownBuilder) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    for (name, data) in builder.images() {
        fs::write(dir.join(name), data)?;
    }
    Ok(())
}

fn cmd_stats(
    input: &Path,
    json: bool,
    args: &EngineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = MemorySource::open(input)?;
    let mut builder = RecordingBuilder::new();
    let stats = args.engine().reconstruct(&source, &mut builder)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    print_stats(input, &stats);
    Ok(())
}

fn print_stats(input: &Path, stats: &ReconstructionStats) {
    println!("{}", "Reconstruction Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), stats.pages);
    println!("{}: {}", "Page breaks".bold(), stats.page_breaks);
    println!("{}: {}", "Headings".bold(), stats.headings);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraphs);
    println!("{}: {}", "Runs".bold(), stats.runs);
    println!("{}: {}", "Images".bold(), stats.images);
    println!("{}: {}", "Tables".bold(), stats.tables);
    println!("{}: {}", "Cells".bold(), stats.cells);

    if stats.has_skips() {
        println!();
        println!("{}", "Skipped".yellow().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}: {}", "Pages".bold(), stats.skipped_pages);
        println!("{}: {}", "Items".bold(), stats.skipped_items);
        println!("{}: {}", "Cells".bold(), stats.skipped_cells);
    }
}

fn cmd_version() {
    println!("{} {}", "reflow".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Flow document reconstruction from extracted PDF primitives");
    println!();
    println!("License: MIT");
}
