//! docscan CLI binary entry point.

use clap::Parser;
use docscan::cli::Cli;

fn main() {
    docscan::logging::init_tracing();
    let cli = Cli::parse();
    std::process::exit(docscan::app::run(cli));
}
