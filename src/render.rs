//! Rendering document nodes as plain text.

use textwrap::Options;

use crate::document::Document;
use crate::document::NodeId;
use crate::document::NodeKind;
use crate::flatten::flatten;
use crate::table::align_columns;
use crate::textwrap::TextWrapOptionsExt;
use crate::ExtractError;

/// Indentation for code blocks and tables.
pub const INDENT: &str = "  ";

/// Renders ranges of block nodes as plain text.
#[derive(Debug, Clone)]
pub struct Renderer {
    wrap: Options<'static>,
}

impl Renderer {
    /// Construct a renderer which wraps paragraphs at `width` columns.
    pub fn new(width: usize) -> Self {
        Self {
            wrap: crate::textwrap::options(width),
        }
    }

    /// Render the sibling nodes from `start` up to (not including) `end` as a command's long
    /// description.
    ///
    /// Blocks are separated by blank lines.
    pub fn render_long(
        &self,
        document: &Document,
        start: Option<NodeId>,
        end: Option<NodeId>,
    ) -> Result<String, ExtractError> {
        let mut text = String::new();
        for node in document.range(start, end) {
            if Some(node) != start {
                text.push('\n');
            }
            self.render_node(document, node, &mut text)?;
        }
        Ok(text)
    }

    /// Like [`Renderer::render_long`], but drops the dangling indent left after a final code block.
    pub fn render_example(
        &self,
        document: &Document,
        start: Option<NodeId>,
        end: Option<NodeId>,
    ) -> Result<String, ExtractError> {
        let mut text = self.render_long(document, start, end)?;
        if text.ends_with(&format!("\n{INDENT}")) {
            text.truncate(text.len() - INDENT.len());
        }
        Ok(text)
    }

    /// Render a single block node.
    fn render_node(
        &self,
        document: &Document,
        node: NodeId,
        text: &mut String,
    ) -> Result<(), ExtractError> {
        match document[node].kind {
            NodeKind::Heading { .. } => {
                text.push_str(&flatten(document, node));
                text.push('\n');
            }
            NodeKind::Paragraph => {
                text.push_str(&self.wrap.fill_words(&flatten(document, node)));
                text.push('\n');
            }
            NodeKind::CodeBlock => {
                push_indented(text, &document[node].literal);
            }
            NodeKind::Table => {
                let rows = table_rows(document, node)?;
                push_indented(text, &align_columns(&rows));
            }
            kind => return Err(ExtractError::UnsupportedNodeType(kind)),
        }
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(crate::DEFAULT_WIDTH)
    }
}

/// Push each line of `block` onto `text`, indented.
///
/// The text after the last newline is indented too, even when it's empty.
fn push_indented(text: &mut String, block: &str) {
    for line in block.split_inclusive('\n') {
        text.push_str(INDENT);
        text.push_str(line);
    }
    if block.is_empty() || block.ends_with('\n') {
        text.push_str(INDENT);
    }
}

/// Flatten the cells of a table into rows, head first.
fn table_rows(document: &Document, table: NodeId) -> Result<Vec<Vec<String>>, ExtractError> {
    let mut rows = Vec::new();
    for group in document.children(table) {
        match document[group].kind {
            NodeKind::TableHead | NodeKind::TableBody => {}
            kind => return Err(ExtractError::UnsupportedNodeType(kind)),
        }
        for row in document.children(group) {
            if document[row].kind != NodeKind::TableRow {
                return Err(ExtractError::UnsupportedNodeType(document[row].kind));
            }
            let cells = document
                .children(row)
                .map(|cell| match document[cell].kind {
                    NodeKind::TableCell => Ok(flatten(document, cell)),
                    kind => Err(ExtractError::UnsupportedNodeType(kind)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(cells);
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn render_long(markdown: &str) -> Result<String, ExtractError> {
        let document = Document::parse(markdown);
        Renderer::default().render_long(&document, document[Document::ROOT].first_child, None)
    }

    fn render_example(markdown: &str) -> Result<String, ExtractError> {
        let document = Document::parse(markdown);
        Renderer::default().render_example(&document, document[Document::ROOT].first_child, None)
    }

    #[test]
    fn test_render_paragraphs() {
        assert_eq!(
            render_long(indoc!(
                "
                Adds a file.

                Run `chezmoi apply`
                afterwards.
                "
            ))
            .unwrap(),
            "Adds a file.\n\nRun \"chezmoi apply\" afterwards.\n"
        );
    }

    #[test]
    fn test_render_paragraph_wraps() {
        let document = Document::parse(
            "Add targets to the source state. If any target is already in the source state, \
            then its source state is replaced with its current state in the destination directory.",
        );
        let text = Renderer::new(40)
            .render_long(&document, document[Document::ROOT].first_child, None)
            .unwrap();
        assert!(text.ends_with(".\n"));
        assert!(text.lines().count() > 2);
        for line in text.lines() {
            assert!(line.len() <= 40, "{line:?} is too long");
        }
    }

    #[test]
    fn test_render_heading() {
        assert_eq!(
            render_long("##### Options for `add`").unwrap(),
            "Options for \"add\"\n"
        );
    }

    #[test]
    fn test_render_code_block() {
        let literal = "chezmoi add ~/.bashrc\n\nchezmoi add --template ~/.gitconfig\n";
        let text = render_long(&format!("```console\n{literal}```\n")).unwrap();
        assert_eq!(
            text,
            "  chezmoi add ~/.bashrc\n  \n  chezmoi add --template ~/.gitconfig\n  "
        );

        let unindented = text
            .split_inclusive('\n')
            .map(|line| line.strip_prefix(INDENT).unwrap())
            .collect::<String>();
        assert_eq!(unindented, literal);
    }

    #[test]
    fn test_render_table() {
        assert_eq!(
            render_long(indoc!(
                "
                | Flag | Meaning |
                | ---- | ------- |
                | `-f` | force   |
                | `-r` | recursive |
                "
            ))
            .unwrap(),
            "  Flag Meaning\n  \"-f\" force\n  \"-r\" recursive\n  "
        );
    }

    #[test]
    fn test_render_mixed() {
        assert_eq!(
            render_long(indoc!(
                "
                Adds a file.

                    chezmoi add ~/.bashrc

                Then apply.
                "
            ))
            .unwrap(),
            "Adds a file.\n\n  chezmoi add ~/.bashrc\n  \nThen apply.\n"
        );
    }

    #[test]
    fn test_render_example_strips_dangling_indent() {
        assert_eq!(
            render_example(indoc!(
                "
                ```
                chezmoi add ~/.bashrc
                ```
                "
            ))
            .unwrap(),
            "  chezmoi add ~/.bashrc\n"
        );
        // Only one indent is stripped, and only after a newline.
        assert_eq!(
            render_example("Adds a file.").unwrap(),
            "Adds a file.\n"
        );
    }

    #[test]
    fn test_render_empty_range() {
        assert_eq!(render_long("").unwrap(), "");
        assert_eq!(render_example("").unwrap(), "");
    }

    #[test]
    fn test_render_unsupported() {
        assert_eq!(
            render_long(indoc!(
                "
                Adds a file.

                - first
                - second
                "
            )),
            Err(ExtractError::UnsupportedNodeType(NodeKind::List))
        );
        assert_eq!(
            render_long("> quoted"),
            Err(ExtractError::UnsupportedNodeType(NodeKind::BlockQuote))
        );
        assert_eq!(
            render_long("---"),
            Err(ExtractError::UnsupportedNodeType(NodeKind::Rule))
        );
    }
}
