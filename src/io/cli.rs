//! Command-line interface and run orchestration for both puzzle variants

use crate::io::configuration::{
    DEFAULT_COLOR_CELL_HEIGHT, DEFAULT_COLOR_CELL_WIDTH, DEFAULT_COLOR_WORKERS, DEFAULT_LOG_FILTER,
    DEFAULT_MOSAIC_CELL_HEIGHT, DEFAULT_MOSAIC_CELL_WIDTH, DEFAULT_MOSAIC_WORKERS,
    DEFAULT_SUB_IMAGE_HEIGHT, DEFAULT_SUB_IMAGE_WIDTH, QUIET_LOG_FILTER,
};
use crate::io::driver::{BatchReport, Job, run_jobs};
use crate::io::error::{PuzzleError, Result, invalid_parameter, require_positive};
use crate::io::evaluate::{CategoryScore, compare_files, evaluate_color_run};
use crate::io::image::{load_rgb, save_atomic};
use crate::io::jobs::{category_from_folder, color_jobs, mosaic_jobs, require_dir};
use crate::io::progress::ProgressManager;
use crate::pool::{CandidatePool, PaletteSet, TilePool};
use crate::signature::MatchMode;
use crate::spatial::{TileLayout, composite};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "puzzletile")]
#[command(
    author,
    version,
    about = "Rebuild images from palette colors or tile thumbnails"
)]
/// Command-line arguments for the puzzle tool
pub struct Cli {
    /// Puzzle variant to run
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output and informational logging
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Replace each cell with the closest color from its category palette
    Color(ColorArgs),
    /// Replace each cell with the closest thumbnail from a tile library
    Mosaic(MosaicArgs),
    /// Report reconstruction error of finished color puzzles
    Evaluate(EvaluateArgs),
}

/// Arguments for color puzzles
#[derive(Args, Debug, Clone)]
pub struct ColorArgs {
    /// Directory of palette files named `<prefix>_<category>.txt`
    #[arg(value_name = "PALETTES")]
    pub palettes: PathBuf,

    /// Target image, or directory of `<name>_<category>` folders
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output image (file target) or output directory (directory target)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Cell width in source pixels
    #[arg(long, default_value_t = DEFAULT_COLOR_CELL_WIDTH)]
    pub cell_width: u32,

    /// Cell height in source pixels
    #[arg(long, default_value_t = DEFAULT_COLOR_CELL_HEIGHT)]
    pub cell_height: u32,

    /// Number of parallel workers
    #[arg(short, long, default_value_t = DEFAULT_COLOR_WORKERS)]
    pub workers: usize,
}

/// Arguments for mosaics
#[derive(Args, Debug, Clone)]
pub struct MosaicArgs {
    /// Directory of candidate tile images
    #[arg(value_name = "TILES")]
    pub tiles: PathBuf,

    /// Target image, or directory of target images
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output image (file target) or output directory (directory target)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Cell width in source pixels
    #[arg(long, default_value_t = DEFAULT_MOSAIC_CELL_WIDTH)]
    pub cell_width: u32,

    /// Cell height in source pixels
    #[arg(long, default_value_t = DEFAULT_MOSAIC_CELL_HEIGHT)]
    pub cell_height: u32,

    /// Thumbnail width in output pixels
    #[arg(long, default_value_t = DEFAULT_SUB_IMAGE_WIDTH)]
    pub sub_width: u32,

    /// Thumbnail height in output pixels
    #[arg(long, default_value_t = DEFAULT_SUB_IMAGE_HEIGHT)]
    pub sub_height: u32,

    /// Match mode: rgb, gray or hash
    #[arg(short, long, default_value = "rgb")]
    pub mode: MatchMode,

    /// Number of parallel workers for loading tiles and compositing
    #[arg(short, long, default_value_t = DEFAULT_MOSAIC_WORKERS)]
    pub workers: usize,
}

/// Arguments for scoring finished puzzles
#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    /// Source image, or the directory of category folders given to `color`
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Puzzle image, or the output directory written by `color`
    #[arg(value_name = "PUZZLE")]
    pub puzzle: PathBuf,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Install the global tracing subscriber
    ///
    /// `RUST_LOG` takes precedence over the built-in filter. Calling this more
    /// than once is harmless.
    pub fn init_logging(&self) {
        let fallback = if self.quiet {
            QUIET_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .without_time()
            .try_init();
    }
}

/// Runs the selected subcommand end to end
pub struct PuzzleRunner {
    cli: Cli,
}

impl PuzzleRunner {
    /// Create a runner for parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Execute the selected subcommand
    ///
    /// # Errors
    ///
    /// Returns configuration errors before any work starts, and `BatchFailed`
    /// after a batch in which at least one job failed
    pub fn run(&self) -> Result<()> {
        let show_progress = self.cli.should_show_progress();
        let report = match &self.cli.command {
            Command::Color(args) => run_color(args, show_progress)?,
            Command::Mosaic(args) => run_mosaic(args, show_progress)?,
            Command::Evaluate(args) => {
                report_scores(args)?;
                return Ok(());
            }
        };

        if report.is_clean() {
            Ok(())
        } else {
            Err(PuzzleError::BatchFailed {
                failed: report.failed.len(),
                total: report.total(),
            })
        }
    }
}

/// Build every color puzzle described by `args`
///
/// # Errors
///
/// Fails fast on a zero dimension or worker count, a missing palette
/// directory, a directory with no usable palettes, or a missing target.
/// Per-image failures are collected in the returned report instead.
pub fn run_color(args: &ColorArgs, show_progress: bool) -> Result<BatchReport> {
    let layout = TileLayout::color(args.cell_width, args.cell_height);
    layout.validate()?;
    require_positive("workers", args.workers)?;
    require_dir(&args.palettes)?;

    let start = Instant::now();
    info!(palettes = %args.palettes.display(), "reading palettes");
    let palettes = PaletteSet::load_dir(&args.palettes)?;
    if palettes.is_empty() {
        return Err(invalid_parameter(
            "palettes",
            &args.palettes.display(),
            &"no palette files could be loaded",
        ));
    }
    info!(
        categories = palettes.len(),
        cost = start.elapsed().as_secs_f64(),
        "palettes ready"
    );

    let jobs = color_jobs(&args.target, &args.output)?;
    run_stage("Color puzzling", jobs, args.workers, show_progress, |job| {
        let category = category_from_folder(&job.input).ok_or_else(|| {
            invalid_parameter("target", &job.input.display(), &"no containing category folder")
        })?;
        let palette = palettes.get(&category)?;
        puzzle_file(job, palette, layout)
    })
}

/// Build the tile pool and every mosaic described by `args`
///
/// # Errors
///
/// Fails fast on a zero dimension or worker count, a missing tile library,
/// a library with no decodable images, or a missing target. Per-image
/// failures are collected in the returned report instead.
pub fn run_mosaic(args: &MosaicArgs, show_progress: bool) -> Result<BatchReport> {
    let layout = TileLayout::mosaic(
        args.cell_width,
        args.cell_height,
        args.sub_width,
        args.sub_height,
    );
    layout.validate()?;
    require_positive("workers", args.workers)?;
    require_dir(&args.tiles)?;

    let start = Instant::now();
    info!(tiles = %args.tiles.display(), mode = %args.mode, "reading tile library");
    let pool = TilePool::load_dir(
        &args.tiles,
        args.mode,
        args.sub_width,
        args.sub_height,
        args.workers,
    )?;
    if pool.is_empty() {
        return Err(PuzzleError::EmptyPool);
    }
    info!(cost = start.elapsed().as_secs_f64(), "tile library ready");

    let jobs = mosaic_jobs(&args.target, &args.output)?;
    run_stage("Mosaic puzzling", jobs, args.workers, show_progress, |job| {
        puzzle_file(job, &pool, layout)
    })
}

/// Score finished puzzles and print the results
///
/// # Errors
///
/// Returns an error if the inputs are missing or, for a single pair, cannot
/// be compared
// Allow print for the report itself
#[allow(clippy::print_stdout)]
pub fn report_scores(args: &EvaluateArgs) -> Result<Vec<CategoryScore>> {
    if args.source.is_file() {
        let rmse = compare_files(&args.source, &args.puzzle)?;
        println!(
            "RMSE between {} and {} is {rmse:.4}",
            args.source.display(),
            args.puzzle.display()
        );
        return Ok(Vec::new());
    }

    let scores = evaluate_color_run(&args.source, &args.puzzle)?;
    for score in &scores {
        println!(
            "{} (No.{}) RMSE: {:.4} ({} images)",
            score.folder, score.category, score.mean_rmse, score.images
        );
    }
    Ok(scores)
}

fn puzzle_file<P>(job: &Job, pool: &P, layout: TileLayout) -> Result<()>
where
    P: CandidatePool,
    P::Candidate: crate::spatial::Paste,
{
    let target = load_rgb(&job.input)?;
    let result = composite(&target, pool, layout)?;
    save_atomic(&result.canvas, &job.output)
}

fn run_stage<F>(
    stage: &str,
    jobs: Vec<Job>,
    workers: usize,
    show_progress: bool,
    process: F,
) -> Result<BatchReport>
where
    F: Fn(&Job) -> Result<()> + Sync,
{
    let start = Instant::now();
    info!(jobs = jobs.len(), workers, "{stage}");

    let progress = show_progress.then(|| ProgressManager::new(stage, jobs.len()));
    let report = run_jobs(jobs, workers, progress.as_ref(), process)?;
    if let Some(progress) = &progress {
        progress.finish("done");
    }

    if !report.is_clean() {
        warn!(
            failed = report.failed.len(),
            total = report.total(),
            "some images could not be puzzled"
        );
    }
    info!(
        succeeded = report.succeeded.len(),
        cost = start.elapsed().as_secs_f64(),
        "{stage} finished"
    );
    Ok(report)
}

