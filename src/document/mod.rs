//! An arena-allocated markdown syntax tree.
//!
//! Nodes are addressed by [`NodeId`] and linked to their parent, first child and next sibling by
//! index. The tree is built once by [`Document::parse`] and never mutated afterwards.

use std::fmt::Display;
use std::ops::Index;

mod parse;

/// An index into a [`Document`]'s node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// The type of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The root of the tree.
    Document,
    /// A heading, like `## Commands`.
    Heading {
        /// The heading level, from 1 to 6.
        level: u8,
    },
    /// A paragraph of inline content.
    Paragraph,
    /// A fenced or indented code block. The code is stored in [`Node::literal`].
    CodeBlock,
    /// A table, containing a [`NodeKind::TableHead`] and a [`NodeKind::TableBody`].
    Table,
    /// The header row group of a table.
    TableHead,
    /// The body row group of a table.
    TableBody,
    /// A row of table cells.
    TableRow,
    /// A single table cell.
    TableCell,
    /// A block quote.
    BlockQuote,
    /// An ordered or unordered list.
    List,
    /// A list item.
    Item,
    /// A thematic break (`---`).
    Rule,
    /// Raw HTML, block or inline.
    Html,
    /// A footnote definition.
    FootnoteDefinition,
    /// Literal text.
    Text,
    /// An inline code span.
    Code,
    /// Emphasized text.
    Emphasis,
    /// Strongly emphasized text.
    Strong,
    /// Struck-through text.
    Strikethrough,
    /// A link.
    Link,
    /// An image; its children are the alt text.
    Image,
    /// A reference to a footnote.
    FootnoteReference,
    /// A task list checkbox.
    TaskListMarker,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Document => write!(f, "document"),
            NodeKind::Heading { level } => write!(f, "heading (level {level})"),
            NodeKind::Paragraph => write!(f, "paragraph"),
            NodeKind::CodeBlock => write!(f, "code block"),
            NodeKind::Table => write!(f, "table"),
            NodeKind::TableHead => write!(f, "table head"),
            NodeKind::TableBody => write!(f, "table body"),
            NodeKind::TableRow => write!(f, "table row"),
            NodeKind::TableCell => write!(f, "table cell"),
            NodeKind::BlockQuote => write!(f, "block quote"),
            NodeKind::List => write!(f, "list"),
            NodeKind::Item => write!(f, "list item"),
            NodeKind::Rule => write!(f, "horizontal rule"),
            NodeKind::Html => write!(f, "HTML"),
            NodeKind::FootnoteDefinition => write!(f, "footnote definition"),
            NodeKind::Text => write!(f, "text"),
            NodeKind::Code => write!(f, "code span"),
            NodeKind::Emphasis => write!(f, "emphasis"),
            NodeKind::Strong => write!(f, "strong emphasis"),
            NodeKind::Strikethrough => write!(f, "strikethrough"),
            NodeKind::Link => write!(f, "link"),
            NodeKind::Image => write!(f, "image"),
            NodeKind::FootnoteReference => write!(f, "footnote reference"),
            NodeKind::TaskListMarker => write!(f, "task list marker"),
        }
    }
}

/// A single node in a [`Document`].
#[derive(Debug, Clone)]
pub struct Node {
    /// The node's type.
    pub kind: NodeKind,
    /// Literal content for text, code spans, code blocks and HTML. Empty for containers.
    pub literal: String,
    /// The containing node, `None` for the root.
    pub parent: Option<NodeId>,
    /// The first child of this node.
    pub first_child: Option<NodeId>,
    /// The last child of this node.
    pub last_child: Option<NodeId>,
    /// The following sibling of this node.
    pub next_sibling: Option<NodeId>,
}

impl Node {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            literal: String::new(),
            parent,
            first_child: None,
            last_child: None,
            next_sibling: None,
        }
    }

    /// If this node is a heading, get its level.
    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            NodeKind::Heading { level } => Some(level),
            _ => None,
        }
    }
}

/// A parsed markdown document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// The root node of every document.
    pub const ROOT: NodeId = NodeId(0);

    fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document, None)],
        }
    }

    /// Get the number of nodes in the document, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Documents always contain at least the root node.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over the children of `parent`, in order.
    pub fn children(&self, parent: NodeId) -> Siblings<'_> {
        Siblings {
            document: self,
            next: self[parent].first_child,
            end: None,
        }
    }

    /// Iterate over the sibling chain from `start` (inclusive) to `end` (exclusive).
    ///
    /// If `end` is never reached, iteration stops after the last sibling.
    pub fn range(&self, start: Option<NodeId>, end: Option<NodeId>) -> Siblings<'_> {
        Siblings {
            document: self,
            next: start,
            end,
        }
    }

    /// Append a new node as the last child of `parent`.
    fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, Some(parent)));
        match self.nodes[parent.0].last_child {
            Some(previous) => self.nodes[previous.0].next_sibling = Some(id),
            None => self.nodes[parent.0].first_child = Some(id),
        }
        self.nodes[parent.0].last_child = Some(id);
        id
    }

    /// Append a new leaf node with literal content.
    fn append_literal(&mut self, parent: NodeId, kind: NodeKind, literal: &str) -> NodeId {
        let id = self.append(parent, kind);
        self.nodes[id.0].literal.push_str(literal);
        id
    }

    /// Append text to `parent`, merging it into a code block's literal or a preceding text node.
    fn push_text(&mut self, parent: NodeId, text: &str) {
        // The parser emits empty text events around some inline spans, like padded table cells.
        if text.is_empty() {
            return;
        }
        if self[parent].kind == NodeKind::CodeBlock {
            self.nodes[parent.0].literal.push_str(text);
            return;
        }
        match self[parent].last_child {
            Some(last) if self[last].kind == NodeKind::Text => {
                self.nodes[last.0].literal.push_str(text);
            }
            _ => {
                self.append_literal(parent, NodeKind::Text, text);
            }
        }
    }
}

impl Index<NodeId> for Document {
    type Output = Node;

    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[index.0]
    }
}

/// An iterator over a chain of sibling nodes.
#[derive(Debug, Clone)]
pub struct Siblings<'d> {
    document: &'d Document,
    next: Option<NodeId>,
    end: Option<NodeId>,
}

impl<'d> Iterator for Siblings<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|id| Some(*id) != self.end)?;
        self.next = self.document[current].next_sibling;
        Some(current)
    }
}
