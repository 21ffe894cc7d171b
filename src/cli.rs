//! Command-line argument parser and argument access.

use camino::Utf8Path;
use camino::Utf8PathBuf;
use clap::Parser;

use crate::formatter::Rustfmt;
use crate::formatter::SourceFormatter;
use crate::formatter::Verbatim;

/// Extract per-command help text from the `## Commands` section of a markdown reference and
/// generate Rust source from it.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
#[command(max_term_width = 100)]
pub struct Opts {
    /// The markdown reference to read.
    ///
    /// If absent or empty, the reference is read from standard input.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<Utf8PathBuf>,

    /// Where to write the generated source.
    ///
    /// If absent or empty, output is written to standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// The column to wrap paragraphs at.
    #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u16).range(1..))]
    pub width: u16,

    /// Write a human-readable listing of the extracted help text instead of Rust source.
    #[arg(long)]
    pub debug: bool,

    /// How to format the generated source. Ignored with `--debug`.
    #[arg(long, value_enum, default_value_t = FormatterKind::Rustfmt)]
    pub formatter: FormatterKind,

    /// The `rustfmt` executable to run when `--formatter rustfmt` is used.
    #[arg(long, env = "RUSTFMT", default_value = "rustfmt", value_name = "PROGRAM")]
    pub rustfmt: String,

    /// Options to modify logging and error-handling behavior.
    #[command(flatten)]
    pub logging: LoggingOpts,
}

/// Options to modify logging and error-handling behavior.
#[derive(Debug, Clone, clap::Args)]
#[command(next_help_heading = "Logging options")]
pub struct LoggingOpts {
    /// Log message filter.
    ///
    /// Can be any of "error", "warn", "info", "debug", or "trace". Supports more granular
    /// filtering, as well.
    ///
    /// A nice value is `extract_helps=debug`.
    #[arg(long, env = "EXTRACT_HELPS_LOG", default_value = "extract_helps=warn")]
    pub log_filter: String,
}

/// A formatter to run over generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatterKind {
    /// Format with `rustfmt`.
    Rustfmt,
    /// Write the source unformatted.
    #[value(name = "none")]
    Verbatim,
}

impl Opts {
    /// The input path, or `None` for standard input.
    pub fn input_path(&self) -> Option<&Utf8Path> {
        non_empty(&self.input)
    }

    /// The output path, or `None` for standard output.
    pub fn output_path(&self) -> Option<&Utf8Path> {
        non_empty(&self.output)
    }

    /// The formatter selected by `--formatter`.
    pub fn source_formatter(&self) -> Box<dyn SourceFormatter> {
        match self.formatter {
            FormatterKind::Rustfmt => Box::new(Rustfmt::new(&self.rustfmt)),
            FormatterKind::Verbatim => Box::new(Verbatim),
        }
    }
}

fn non_empty(path: &Option<Utf8PathBuf>) -> Option<&Utf8Path> {
    path.as_deref().filter(|path| !path.as_str().is_empty())
}
