//! Assembling extracted help text into generated Rust source or a debug dump.

use std::fmt;
use std::fmt::Display;
use std::fmt::Write;

use indoc::indoc;

use crate::HelpTable;

/// The name of the generating program, used in the generated file's header.
const PROGRAM: &str = "extract-helps";

/// Indentation for string pieces in the generated source.
const PIECE_INDENT: &str = "                ";

/// Extracted help text together with where it came from and where it's going.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Helps {
    /// Help entries by command name.
    pub table: HelpTable,
    /// The input path, empty for standard input.
    pub input: String,
    /// The output path, empty for standard output.
    pub output: String,
}

impl Helps {
    /// Assemble extracted help text with the input and output paths.
    pub fn new(table: HelpTable, input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            table,
            input: input.into(),
            output: output.into(),
        }
    }

    /// Generated Rust source declaring the help text for each command.
    pub fn source(&self) -> RustSource<'_> {
        RustSource(self)
    }

    /// A human-readable listing of the help text for each command.
    pub fn debug_dump(&self) -> DebugDump<'_> {
        DebugDump(self)
    }

    /// The command line that regenerates the output.
    fn command_line(&self) -> String {
        let mut tokens = vec![PROGRAM];
        if !self.input.is_empty() {
            tokens.extend(["-i", self.input.as_str()]);
        }
        if !self.output.is_empty() {
            tokens.extend(["-o", self.output.as_str()]);
        }
        shell_words::join(tokens)
    }
}

/// [`Display`]s [`Helps`] as Rust source.
///
/// The source declares a `Help` struct and a `HELPS` slice of `(command, Help)` pairs sorted by
/// command name.
#[derive(Debug, Clone, Copy)]
pub struct RustSource<'a>(&'a Helps);

impl<'a> Display for RustSource<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// Code generated by {PROGRAM}. DO NOT EDIT.")?;
        writeln!(f, "// To regenerate, run: {}", self.0.command_line())?;
        writeln!(f)?;
        f.write_str(indoc!(
            r#"
            /// Help text for a command.
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct Help {
                /// The long description.
                pub long: &'static str,
                /// Usage examples.
                pub example: &'static str,
            }

            impl Help {
                /// Help with no text.
                pub const EMPTY: Help = Help {
                    long: "",
                    example: "",
                };
            }

            /// Help text for each command, sorted by command name.
            pub static HELPS: &[(&str, Help)] = &[
            "#
        ))?;
        for (command, help) in &self.0.table {
            writeln!(f, "    (")?;
            writeln!(f, "        {command:?},")?;
            writeln!(f, "        Help {{")?;
            writeln!(f, "            long: {},", string_expr(&help.long))?;
            if help.example.is_empty() {
                writeln!(f, "            ..Help::EMPTY")?;
            } else {
                writeln!(f, "            example: {},", string_expr(&help.example))?;
            }
            writeln!(f, "        }},")?;
            writeln!(f, "    ),")?;
        }
        writeln!(f, "];")
    }
}

/// Format `text` as a Rust string expression, splitting it after each newline.
///
/// Multi-line text becomes a `concat!` of one literal per line.
fn string_expr(text: &str) -> String {
    let pieces = text.split_inclusive('\n').collect::<Vec<_>>();
    match pieces.as_slice() {
        [] => "\"\"".to_owned(),
        [piece] => format!("{piece:?}"),
        pieces => {
            let mut expr = String::from("concat!(\n");
            for piece in pieces {
                // Writing to a `String` can't fail.
                let _ = writeln!(expr, "{PIECE_INDENT}{piece:?},");
            }
            expr.push_str(&PIECE_INDENT[4..]);
            expr.push(')');
            expr
        }
    }
}

/// [`Display`]s [`Helps`] as a human-readable listing, for checking what was extracted.
///
/// The `Examples:` heading is only written for commands which have examples.
#[derive(Debug, Clone, Copy)]
pub struct DebugDump<'a>(&'a Helps);

impl<'a> Display for DebugDump<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Helps {
            table,
            input,
            output,
        } = self.0;
        writeln!(f, "InputFile: {}", or_stream(input, "(stdin)"))?;
        writeln!(f, "OutputFile: {}", or_stream(output, "(stdout)"))?;
        for (command, help) in table {
            writeln!(f)?;
            writeln!(f, "# {command}")?;
            write!(f, "{}", help.long)?;
            if !help.example.is_empty() {
                writeln!(f)?;
                writeln!(f, "Examples:")?;
                write!(f, "{}", help.example)?;
            }
        }
        Ok(())
    }
}

fn or_stream<'a>(path: &'a str, stream: &'a str) -> &'a str {
    if path.is_empty() {
        stream
    } else {
        path
    }
}
