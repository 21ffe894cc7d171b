//! `extract-helps` generates per-command help text from the `## Commands` section of a markdown
//! reference.

use clap::Parser;
use extract_helps::cli;

fn main() -> miette::Result<()> {
    miette::set_panic_hook();
    let opts = cli::Opts::parse();
    extract_helps::install_tracing(&opts.logging.log_filter)?;
    extract_helps::run(&opts)
}
