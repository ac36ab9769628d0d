//! CLI entry point for wave function collapse generation

use clap::Parser;
use wavecollapse::io::cli::{Cli, FileProcessor};

fn main() -> wavecollapse::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
