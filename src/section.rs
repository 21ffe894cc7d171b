//! Locating the `Commands` section of a document.

use crate::document::Document;
use crate::document::NodeId;
use crate::flatten::flatten;
use crate::ExtractError;

/// The text of the heading that starts the commands section.
pub const COMMANDS_HEADING: &str = "Commands";

/// The boundaries of the `## Commands` section among the document's top-level nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandsSection {
    /// The `## Commands` heading itself.
    pub heading: NodeId,
    /// The first heading of level 2 or higher after `heading`; not part of the section.
    pub end: NodeId,
}

impl CommandsSection {
    /// Find the `## Commands` section in a document.
    pub fn locate(document: &Document) -> Result<Self, ExtractError> {
        let heading = document
            .children(Document::ROOT)
            .find(|&node| {
                document[node].heading_level() == Some(2)
                    && flatten(document, node) == COMMANDS_HEADING
            })
            .ok_or(ExtractError::SectionNotFound)?;

        let end = document
            .range(document[heading].next_sibling, None)
            .find(|&node| matches!(document[node].heading_level(), Some(level) if level <= 2))
            .ok_or(ExtractError::SectionEndNotFound)?;

        Ok(Self { heading, end })
    }

    /// The first node in the section, if the section isn't empty.
    pub fn start(&self, document: &Document) -> Option<NodeId> {
        document[self.heading]
            .next_sibling
            .filter(|&node| node != self.end)
    }
}
