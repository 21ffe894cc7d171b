//! The [`ExtractError`] type.

use std::error::Error;
use std::fmt::Display;

use crate::document::NodeKind;

/// An error encountered while extracting help text from a document.
///
/// All of these are fatal: no help table is produced if any of them occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The document has no `## Commands` heading.
    SectionNotFound,
    /// No heading of level 2 or higher follows the `## Commands` heading.
    SectionEndNotFound,
    /// A node with no renderer was found in a command's help text.
    UnsupportedNodeType(NodeKind),
    /// A level-3 heading in the `Commands` section doesn't name a command in a code span.
    MissingCommandName {
        /// The heading's text.
        heading: String,
    },
}

impl Error for ExtractError {}

impl Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::SectionNotFound => write!(f, "Cannot find \"Commands\" heading"),
            ExtractError::SectionEndNotFound => {
                write!(f, "Cannot find the end of the \"Commands\" section")
            }
            ExtractError::UnsupportedNodeType(kind) => write!(f, "Unsupported node type: {kind}"),
            ExtractError::MissingCommandName { heading } => {
                write!(f, "Command heading has no command name: {heading:?}")
            }
        }
    }
}

impl miette::Diagnostic for ExtractError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        let code = match self {
            ExtractError::SectionNotFound => "extract_helps::section_not_found",
            ExtractError::SectionEndNotFound => "extract_helps::section_end_not_found",
            ExtractError::UnsupportedNodeType(_) => "extract_helps::unsupported_node_type",
            ExtractError::MissingCommandName { .. } => "extract_helps::missing_command_name",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        let help = match self {
            ExtractError::SectionNotFound => "Add a `## Commands` heading to the document",
            ExtractError::SectionEndNotFound => {
                "Add a level-2 heading after the commands, like `## See also`"
            }
            ExtractError::UnsupportedNodeType(_) => {
                "Help text may only contain headings, paragraphs, code blocks and tables"
            }
            ExtractError::MissingCommandName { .. } => {
                "Level-3 headings must name a command in a code span, like ### `add`"
            }
        };
        Some(Box::new(help))
    }
}
