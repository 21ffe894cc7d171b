//! Building a [`Document`] from [`pulldown_cmark`] events.

use pulldown_cmark::Event;
use pulldown_cmark::HeadingLevel;
use pulldown_cmark::Options;
use pulldown_cmark::Parser;
use pulldown_cmark::Tag;

use super::Document;
use super::NodeId;
use super::NodeKind;

impl Document {
    /// Parse a markdown document, with GitHub-style tables enabled.
    pub fn parse(markdown: &str) -> Self {
        let mut document = Self::new();
        let mut builder = Builder {
            document: &mut document,
            stack: vec![Document::ROOT],
        };
        for event in Parser::new_ext(markdown, Options::ENABLE_TABLES) {
            builder.event(event);
        }
        document
    }
}

struct Builder<'d> {
    document: &'d mut Document,
    /// The open container nodes; the last one receives new children.
    stack: Vec<NodeId>,
}

impl<'d> Builder<'d> {
    fn parent(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(Document::ROOT)
    }

    fn open(&mut self, kind: NodeKind) {
        let id = self.document.append(self.parent(), kind);
        self.stack.push(id);
    }

    fn close(&mut self, depth: usize) {
        for _ in 0..depth {
            // The root stays open.
            if self.stack.len() > 1 {
                self.stack.pop();
            }
        }
    }

    fn event(&mut self, event: Event<'_>) {
        let parent = self.parent();
        match event {
            Event::Start(Tag::TableHead) => {
                // Header cells aren't wrapped in a row; add one so heads and bodies look alike.
                self.open(NodeKind::TableHead);
                self.open(NodeKind::TableRow);
            }
            Event::Start(Tag::TableRow) => {
                match self.document[parent].last_child {
                    Some(body) if self.document[body].kind == NodeKind::TableBody => {
                        self.stack.push(body);
                    }
                    _ => self.open(NodeKind::TableBody),
                }
                self.open(NodeKind::TableRow);
            }
            Event::Start(tag) => self.open(container_kind(&tag)),
            Event::End(Tag::TableHead | Tag::TableRow) => self.close(2),
            Event::End(_) => self.close(1),
            Event::Text(text) => self.document.push_text(parent, &text),
            Event::SoftBreak | Event::HardBreak => self.document.push_text(parent, "\n"),
            Event::Code(code) => {
                self.document.append_literal(parent, NodeKind::Code, &code);
            }
            Event::Html(html) => {
                self.document.append_literal(parent, NodeKind::Html, &html);
            }
            Event::FootnoteReference(label) => {
                self.document
                    .append_literal(parent, NodeKind::FootnoteReference, &label);
            }
            Event::Rule => {
                self.document.append(parent, NodeKind::Rule);
            }
            Event::TaskListMarker(_) => {
                self.document.append(parent, NodeKind::TaskListMarker);
            }
        }
    }
}

fn container_kind(tag: &Tag<'_>) -> NodeKind {
    match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading(level, _, _) => NodeKind::Heading {
            level: heading_level(*level),
        },
        Tag::BlockQuote => NodeKind::BlockQuote,
        Tag::CodeBlock(_) => NodeKind::CodeBlock,
        Tag::List(_) => NodeKind::List,
        Tag::Item => NodeKind::Item,
        Tag::FootnoteDefinition(_) => NodeKind::FootnoteDefinition,
        Tag::Table(_) => NodeKind::Table,
        Tag::TableHead => NodeKind::TableHead,
        Tag::TableRow => NodeKind::TableRow,
        Tag::TableCell => NodeKind::TableCell,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::Strong,
        Tag::Strikethrough => NodeKind::Strikethrough,
        Tag::Link(_, _, _) => NodeKind::Link,
        Tag::Image(_, _, _) => NodeKind::Image,
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
