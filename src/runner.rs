//! Running the extraction from the command line: reading input, generating, writing output.

use std::io::Read;
use std::io::Write;

use camino::Utf8Path;
use miette::Context;
use miette::IntoDiagnostic;
use tracing::instrument;

use crate::cli::Opts;
use crate::emit::Helps;
use crate::Generator;

/// Extract help text as configured by `opts` and write the result.
///
/// Nothing is written unless extraction and formatting both succeed.
#[instrument(level = "debug", skip_all)]
pub fn run(opts: &Opts) -> miette::Result<()> {
    let input = opts.input_path();
    let output = opts.output_path();

    let markdown = read_input(input)?;
    let table = Generator::new(usize::from(opts.width))
        .extract_markdown(&markdown)
        .wrap_err_with(|| {
            format!(
                "Failed to extract help text from {}",
                describe(input, "standard input")
            )
        })?;

    let helps = Helps::new(
        table,
        input.map(Utf8Path::as_str).unwrap_or_default(),
        output.map(Utf8Path::as_str).unwrap_or_default(),
    );

    let text = if opts.debug {
        helps.debug_dump().to_string()
    } else {
        opts.source_formatter()
            .format(helps.source().to_string())
            .wrap_err("Failed to format generated source")?
    };

    write_output(output, &text)
}

fn describe<'a>(path: Option<&'a Utf8Path>, stream: &'a str) -> &'a str {
    path.map(Utf8Path::as_str).unwrap_or(stream)
}

fn read_input(path: Option<&Utf8Path>) -> miette::Result<String> {
    let bytes = match path {
        Some(path) => std::fs::read(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {path}"))?,
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .into_diagnostic()
                .wrap_err("Failed to read standard input")?;
            bytes
        }
    };
    tracing::debug!(bytes = bytes.len(), "Read input");
    String::from_utf8(bytes)
        .into_diagnostic()
        .wrap_err_with(|| format!("{} is not valid UTF-8", describe(path, "Standard input")))
}

fn write_output(path: Option<&Utf8Path>, text: &str) -> miette::Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to write {path}")),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .into_diagnostic()
                .wrap_err("Failed to write to standard output")
        }
    }
}
