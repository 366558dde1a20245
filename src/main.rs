//! CLI entry point for the level generator

use clap::Parser;
use levelforge::io::cli::{Cli, LevelProcessor};

fn main() -> levelforge::Result<()> {
    let cli = Cli::parse();
    let mut processor = LevelProcessor::new(cli);
    processor.process()
}
