//! [`textwrap`] helpers.

use itertools::Itertools;
use textwrap::Options;
use textwrap::WordSeparator;
use textwrap::WordSplitter;

/// Get [`textwrap`] options with our settings, wrapping at `width` columns.
///
/// Words are never broken or hyphenated, so a word longer than `width` gets a line to itself.
pub fn options(width: usize) -> Options<'static> {
    Options::new(width)
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
}

/// Extension trait adding methods to [`textwrap::Options`].
pub trait TextWrapOptionsExt {
    /// Collapse runs of whitespace to single spaces, then wrap the text and join the lines.
    fn fill_words(&self, text: &str) -> String;
}

impl<'a> TextWrapOptionsExt for Options<'a> {
    fn fill_words(&self, text: &str) -> String {
        let words = text.split_whitespace().join(" ");
        textwrap::fill(&words, self)
    }
}
