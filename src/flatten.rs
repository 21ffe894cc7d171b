//! Reducing a subtree to a single line of text.

use crate::document::Document;
use crate::document::NodeId;
use crate::document::NodeKind;

/// Concatenate the literal text in the subtree rooted at `node`.
///
/// Code spans are wrapped in double quotes. Newlines become spaces. Nodes other than text and
/// code spans contribute nothing themselves, but their children are still visited, so emphasized
/// text or link text is kept.
pub fn flatten(document: &Document, node: NodeId) -> String {
    let mut text = String::new();
    flatten_into(document, node, &mut text);
    text
}

fn flatten_into(document: &Document, node: NodeId, text: &mut String) {
    let literal = &document[node].literal;
    match document[node].kind {
        NodeKind::Code => {
            text.push('"');
            text.push_str(&literal.replace('\n', " "));
            text.push('"');
        }
        NodeKind::Text => {
            text.push_str(&literal.replace('\n', " "));
        }
        _ => {}
    }
    for child in document.children(node) {
        flatten_into(document, child, text);
    }
}
