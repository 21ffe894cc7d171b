//! Formatting generated source before it's written.

use std::io::ErrorKind;
use std::io::Write;
use std::process::Command;
use std::process::Stdio;

use miette::miette;
use miette::Context;
use miette::IntoDiagnostic;

use crate::command_ext::CommandExt;

/// A formatting pass applied to generated source.
pub trait SourceFormatter {
    /// Format `source`, returning the formatted text.
    fn format(&self, source: String) -> miette::Result<String>;
}

/// A [`SourceFormatter`] which leaves source as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl SourceFormatter for Verbatim {
    fn format(&self, source: String) -> miette::Result<String> {
        Ok(source)
    }
}

/// A [`SourceFormatter`] which pipes source through `rustfmt`.
#[derive(Debug, Clone)]
pub struct Rustfmt {
    program: String,
}

impl Rustfmt {
    /// Construct a formatter which runs the given `rustfmt` executable.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(["--edition", "2021"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

impl Default for Rustfmt {
    fn default() -> Self {
        Self::new("rustfmt")
    }
}

impl SourceFormatter for Rustfmt {
    fn format(&self, source: String) -> miette::Result<String> {
        let mut command = self.command();
        tracing::debug!(command = %command.display(), "Formatting generated source");

        let mut child = command
            .spawn()
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to start `{}`", command.display()))?;

        // `rustfmt` reads all of its input before writing anything, so this won't deadlock.
        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(source.as_bytes()) {
                // The exit status and stderr below say why it stopped reading.
                Err(err) if err.kind() == ErrorKind::BrokenPipe => {
                    tracing::debug!("`{}` closed its input early", command.display());
                }
                result => result
                    .into_diagnostic()
                    .wrap_err_with(|| format!("Failed to write to `{}`", command.display()))?,
            }
        }

        let output = child
            .wait_with_output()
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to wait for `{}`", command.display()))?;

        if !output.status.success() {
            return Err(miette!(
                "`{}` failed with {}:\n{}",
                command.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim_end()
            ));
        }

        String::from_utf8(output.stdout)
            .into_diagnostic()
            .wrap_err_with(|| format!("`{}` wrote invalid UTF-8", command.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_verbatim() {
        assert_eq!(
            Verbatim.format("fn main() {}\n".to_owned()).unwrap(),
            "fn main() {}\n"
        );
    }

    #[test]
    fn test_rustfmt_command() {
        assert_eq!(
            Rustfmt::default().command().display(),
            "rustfmt --edition 2021"
        );
    }

    #[test]
    fn test_rustfmt_missing_program() {
        let err = Rustfmt::new("/nonexistent/rustfmt")
            .format("fn main() {}\n".to_owned())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to start `/nonexistent/rustfmt --edition 2021`"
        );
    }

    #[test]
    fn test_rustfmt_exits_without_reading() {
        // Larger than a pipe buffer, so the write fails once `false` exits.
        let source = "fn main() {}\n".repeat(100_000);
        let err = Rustfmt::new("false").format(source).unwrap_err();
        let message = err.to_string();
        assert!(
            message.starts_with("`false --edition 2021` failed with"),
            "{message}"
        );
    }
}
