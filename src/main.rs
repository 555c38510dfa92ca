//! CLI entry point for tile grid aggregation, stitching and tiling

use clap::Parser;
use tilegrid::io::cli::{Cli, JobRunner};

fn main() -> tilegrid::Result<()> {
    let cli = Cli::parse();
    let runner = JobRunner::new(cli);
    runner.run()
}
