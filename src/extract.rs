//! Splitting the `Commands` section into per-command help text.

use std::collections::btree_map;
use std::collections::BTreeMap;

use tracing::instrument;

use crate::document::Document;
use crate::document::NodeId;
use crate::document::NodeKind;
use crate::flatten::flatten;
use crate::render::Renderer;
use crate::section::CommandsSection;
use crate::ExtractError;

/// The text following the code span in an examples heading.
const EXAMPLES_SUFFIX: &str = " examples";

/// Help text for a single command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpEntry {
    /// The long description.
    pub long: String,
    /// Usage examples.
    pub example: String,
}

/// Help entries keyed by command name, iterated in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpTable {
    entries: BTreeMap<String, HelpEntry>,
}

impl HelpTable {
    /// Get the help for a command.
    pub fn get(&self, command: &str) -> Option<&HelpEntry> {
        self.entries.get(command)
    }

    /// Iterate over commands and their help, sorted by command name.
    pub fn iter(&self) -> btree_map::Iter<'_, String, HelpEntry> {
        self.entries.iter()
    }

    /// Iterate over command names in sorted order.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The number of commands.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no commands.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, HelpEntry)> for HelpTable {
    fn from_iter<T: IntoIterator<Item = (String, HelpEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a HelpTable {
    type Item = (&'a String, &'a HelpEntry);
    type IntoIter = btree_map::Iter<'a, String, HelpEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A run of nodes belonging to one command, waiting to be rendered.
#[derive(Debug)]
struct Segment {
    command: String,
    /// The node after the heading which started the segment.
    start: Option<NodeId>,
}

#[derive(Debug)]
enum State {
    Idle,
    CollectingLong(Segment),
    CollectingExample(Segment),
}

/// Walks the `Commands` section, rendering each segment into the table as it ends.
struct Extractor<'a> {
    document: &'a Document,
    renderer: &'a Renderer,
    helps: BTreeMap<String, HelpEntry>,
    state: State,
}

impl<'a> Extractor<'a> {
    /// Render the pending segment up to `end` and store it in its command's entry.
    fn flush(&mut self, end: NodeId) -> Result<(), ExtractError> {
        let (segment, is_example) = match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => return Ok(()),
            State::CollectingLong(segment) => (segment, false),
            State::CollectingExample(segment) => (segment, true),
        };

        let text = if is_example {
            self.renderer
                .render_example(self.document, segment.start, Some(end))?
        } else {
            self.renderer
                .render_long(self.document, segment.start, Some(end))?
        };

        let entry = self.helps.entry(segment.command.clone()).or_default();
        let field = if is_example {
            &mut entry.example
        } else {
            &mut entry.long
        };
        if !field.is_empty() {
            tracing::warn!(
                command = %segment.command,
                field = if is_example { "example" } else { "long" },
                "Command is documented twice; the later text replaces the earlier"
            );
        }
        tracing::debug!(
            command = %segment.command,
            bytes = text.len(),
            is_example,
            "Rendered segment"
        );
        *field = text;
        Ok(())
    }

    /// Start a new segment after `heading`.
    fn begin(&mut self, heading: NodeId, command: String, is_example: bool) {
        tracing::debug!(%command, is_example, "Found command heading");
        self.helps.entry(command.clone()).or_default();
        let segment = Segment {
            command,
            start: self.document[heading].next_sibling,
        };
        self.state = if is_example {
            State::CollectingExample(segment)
        } else {
            State::CollectingLong(segment)
        };
    }

    fn node(&mut self, node: NodeId) -> Result<(), ExtractError> {
        match self.document[node].heading_level() {
            Some(3) => {
                let command = command_name(self.document, node)?;
                self.flush(node)?;
                self.begin(node, command, false);
            }
            Some(4) => {
                if let Some(command) = examples_command(self.document, node) {
                    self.flush(node)?;
                    self.begin(node, command, true);
                }
            }
            // Everything else, including other level-4 headings, belongs to the current segment.
            _ => {}
        }
        Ok(())
    }
}

/// Extract help text for each command in the document's `## Commands` section.
///
/// A level-3 heading naming a command in a code span starts the command's long description, and
/// a level-4 heading like ``#### `add` examples`` starts its examples. Each runs until the next
/// such heading or the end of the section.
#[instrument(level = "debug", skip_all)]
pub fn extract_helps(document: &Document, renderer: &Renderer) -> Result<HelpTable, ExtractError> {
    let section = CommandsSection::locate(document)?;

    let mut extractor = Extractor {
        document,
        renderer,
        helps: BTreeMap::new(),
        state: State::Idle,
    };
    for node in document.range(section.start(document), Some(section.end)) {
        extractor.node(node)?;
    }
    extractor.flush(section.end)?;

    tracing::info!(commands = extractor.helps.len(), "Extracted help text");
    Ok(HelpTable {
        entries: extractor.helps,
    })
}

/// Split a heading's children into an optional leading text node, a code span, and the rest.
fn command_span(document: &Document, heading: NodeId) -> Option<(NodeId, Option<NodeId>)> {
    let mut children = document.children(heading).peekable();
    if children.peek().map(|&child| document[child].kind) == Some(NodeKind::Text) {
        children.next();
    }
    let code = children.next().filter(|&child| document[child].kind == NodeKind::Code)?;
    Some((code, children.next()))
}

/// Get the command named by a level-3 heading like ``### `add` ``.
fn command_name(document: &Document, heading: NodeId) -> Result<String, ExtractError> {
    match command_span(document, heading) {
        Some((code, _)) => Ok(document[code].literal.clone()),
        None => match document
            .children(heading)
            .map(|child| document[child].kind)
            .find(|&kind| kind != NodeKind::Text)
        {
            Some(kind) => Err(ExtractError::UnsupportedNodeType(kind)),
            None => Err(ExtractError::MissingCommandName {
                heading: flatten(document, heading),
            }),
        },
    }
}

/// Get the command named by a level-4 heading like ``#### `add` examples``, if `heading` is one.
fn examples_command(document: &Document, heading: NodeId) -> Option<String> {
    let (code, rest) = command_span(document, heading)?;
    let rest = rest?;
    (document[rest].kind == NodeKind::Text && document[rest].literal == EXAMPLES_SUFFIX)
        .then(|| document[code].literal.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    fn extract(markdown: &str) -> Result<HelpTable, ExtractError> {
        extract_helps(&Document::parse(markdown), &Renderer::default())
    }

    fn entry(long: &str, example: &str) -> HelpEntry {
        HelpEntry {
            long: long.to_owned(),
            example: example.to_owned(),
        }
    }

    #[test]
    fn test_extract_single_command() {
        let helps = extract(indoc!(
            "
            ## Commands

            ### `add`

            Adds a file.

            #### `add` examples

            ```console
            chezmoi add ~/.bashrc
            ```

            ## See also
            "
        ))
        .unwrap();

        assert_eq!(
            helps,
            HelpTable::from_iter([(
                "add".to_owned(),
                entry("Adds a file.\n", "  chezmoi add ~/.bashrc\n")
            )])
        );
    }

    #[test]
    fn test_extract_keys_are_level_three_commands() {
        let helps = extract(indoc!(
            "
            # chezmoi reference

            ### `ignored`

            Before the section.

            ## Commands

            ### `apply` [*target*...]

            Update the destination directory.

            #### Options for `apply`

            Run scripts too.

            ### `cd`

            ### `diff`

            Print the difference.

            #### `diff` examples

                chezmoi diff

            ## Editor configuration

            ### `outside`
            "
        ))
        .unwrap();

        assert_eq!(helps.commands().collect::<Vec<_>>(), vec!["apply", "cd", "diff"]);
        assert_eq!(
            helps.get("apply"),
            Some(&entry(
                "Update the destination directory.\n\nOptions for \"apply\"\n\nRun scripts too.\n",
                ""
            ))
        );
        assert_eq!(helps.get("cd"), Some(&entry("", "")));
        assert_eq!(
            helps.get("diff"),
            Some(&entry("Print the difference.\n", "  chezmoi diff\n"))
        );
    }

    #[test]
    fn test_extract_ends_at_next_level_two_heading() {
        let helps = extract(indoc!(
            "
            ## Commands

            ### `add`

            Adds a file.

            ## Commands

            ## See also
            "
        ));
        // The second `## Commands` heading ends the section.
        assert_eq!(helps.unwrap().get("add"), Some(&entry("Adds a file.\n", "")));
    }

    #[test]
    fn test_extract_deferred_examples() {
        let helps = extract(indoc!(
            "
            ## Commands

            ### `add`

            Adds a file.

            ### `edit`

            Edits a file.

            #### `add` examples

                chezmoi add ~/.bashrc

            ## See also
            "
        ))
        .unwrap();

        assert_eq!(
            helps.get("add"),
            Some(&entry("Adds a file.\n", "  chezmoi add ~/.bashrc\n"))
        );
        assert_eq!(helps.get("edit"), Some(&entry("Edits a file.\n", "")));
    }

    #[traced_test]
    #[test]
    fn test_extract_duplicate_long_overwrites() {
        let helps = extract(indoc!(
            "
            ## Commands

            ### `add`

            First.

            #### `add` examples

                chezmoi add

            ### `add`

            Second.

            ## See also
            "
        ))
        .unwrap();

        assert_eq!(
            helps.get("add"),
            Some(&entry("Second.\n", "  chezmoi add\n"))
        );
        assert!(logs_contain("Command is documented twice"));
    }

    #[test]
    fn test_extract_empty_section() {
        assert_eq!(
            extract("## Commands\n\n## See also\n").unwrap(),
            HelpTable::default()
        );
        assert_eq!(
            extract("## Commands\n\nSome prose.\n\n## See also\n").unwrap(),
            HelpTable::default()
        );
    }

    #[test]
    fn test_extract_errors() {
        assert_eq!(
            extract("# Reference\n\nNothing here.\n"),
            Err(ExtractError::SectionNotFound)
        );
        assert_eq!(
            extract("## Commands\n\n### `add`\n\nAdds a file.\n"),
            Err(ExtractError::SectionEndNotFound)
        );
        assert_eq!(
            extract(indoc!(
                "
                ## Commands

                ### *add*

                Adds a file.

                ## See also
                "
            )),
            Err(ExtractError::UnsupportedNodeType(NodeKind::Emphasis))
        );
        assert_eq!(
            extract("## Commands\n\n### Options\n\n## See also\n"),
            Err(ExtractError::MissingCommandName {
                heading: "Options".to_owned()
            })
        );
        assert_eq!(
            extract(indoc!(
                "
                ## Commands

                ### `add`

                * one
                * two

                ## See also
                "
            )),
            Err(ExtractError::UnsupportedNodeType(NodeKind::List))
        );
    }

    #[test]
    fn test_prose_before_first_command_is_ignored() {
        // Content before the first command heading isn't part of any segment, so it isn't rendered.
        let helps = extract(indoc!(
            "
            ## Commands

            > A quote nobody renders.

            ### `add`

            Adds a file.

            ## See also
            "
        ))
        .unwrap();
        assert_eq!(helps.len(), 1);
    }
}
