//! `extract-helps` reads a markdown reference document, finds its `## Commands` section, and
//! splits it into help text for each command.
//!
//! Each command's section is introduced by a level-3 heading naming the command in a code span,
//! like ``### `add` ``, and may be followed by a level-4 heading like ``#### `add` examples``.
//! The prose, code blocks, and tables under those headings are rendered as plain text and emitted
//! as Rust source for embedding in a command-line tool's help output.
//!
//! ```text
//! markdown -> Document -> CommandsSection -> HelpTable -> Helps -> SourceFormatter -> output
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod cli;
mod command_ext;
pub mod document;
pub mod emit;
mod error;
mod extract;
pub mod flatten;
pub mod formatter;
mod generator;
pub mod render;
mod runner;
pub mod section;
mod table;
mod textwrap;
mod tracing;

pub use error::ExtractError;
pub use extract::extract_helps;
pub use extract::HelpEntry;
pub use extract::HelpTable;
pub use generator::Generator;
pub use generator::DEFAULT_WIDTH;
pub use runner::run;

pub use crate::tracing::install_tracing;
