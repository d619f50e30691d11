//! CLI entry point for color and mosaic puzzle generation

use clap::Parser;
use puzzletile::io::cli::{Cli, PuzzleRunner};

fn main() -> puzzletile::Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    PuzzleRunner::new(cli).run()
}
