//! The [`Generator`] configuration, the entry point for extraction.

use crate::document::Document;
use crate::extract::extract_helps;
use crate::render::Renderer;
use crate::ExtractError;
use crate::HelpTable;

/// The default column to wrap paragraphs at.
pub const DEFAULT_WIDTH: usize = 80;

/// Settings for extracting help text from a markdown document.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    renderer: Renderer,
}

impl Generator {
    /// Construct a generator which wraps paragraphs at `width` columns.
    pub fn new(width: usize) -> Self {
        Self {
            renderer: Renderer::new(width),
        }
    }

    /// Extract help text for each command in a parsed document.
    pub fn extract(&self, document: &Document) -> Result<HelpTable, ExtractError> {
        extract_helps(document, &self.renderer)
    }

    /// Parse a markdown document and extract help text for each command in it.
    pub fn extract_markdown(&self, markdown: &str) -> Result<HelpTable, ExtractError> {
        self.extract(&Document::parse(markdown))
    }
}
