//! Puzzle constants and runtime configuration defaults

// Perceptual hash geometry
/// Side length of the downsampled hash grid
pub const HASH_SIDE: u32 = 8;
/// Number of bits in a perceptual hash (`HASH_SIDE` squared)
pub const HASH_BITS: usize = 64;

// Color puzzle defaults
/// Default cell width in source pixels for color puzzles
pub const DEFAULT_COLOR_CELL_WIDTH: u32 = 1;
/// Default cell height in source pixels for color puzzles
pub const DEFAULT_COLOR_CELL_HEIGHT: u32 = 1;
/// Default number of parallel workers for color puzzles
pub const DEFAULT_COLOR_WORKERS: usize = 10;

// Mosaic puzzle defaults
/// Default cell width in source pixels for mosaics
pub const DEFAULT_MOSAIC_CELL_WIDTH: u32 = 5;
/// Default cell height in source pixels for mosaics
pub const DEFAULT_MOSAIC_CELL_HEIGHT: u32 = 5;
/// Default thumbnail width in output pixels
pub const DEFAULT_SUB_IMAGE_WIDTH: u32 = 50;
/// Default thumbnail height in output pixels
pub const DEFAULT_SUB_IMAGE_HEIGHT: u32 = 50;
/// Default number of parallel workers for mosaics and tile loading
pub const DEFAULT_MOSAIC_WORKERS: usize = 6;

// Output settings
/// Suffix appended to color puzzle output names
pub const COLOR_OUTPUT_SUFFIX: &str = "-colorPuzzle";
/// Suffix appended to mosaic output names
pub const MOSAIC_OUTPUT_SUFFIX: &str = "-puzzle";
/// Extension (and therefore encoding) of generated files
pub const OUTPUT_EXTENSION: &str = "jpg";

// Logging
/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "puzzletile=info";
/// Filter used with `--quiet` when `RUST_LOG` is not set
pub const QUIET_LOG_FILTER: &str = "puzzletile=warn";

// Progress display
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
