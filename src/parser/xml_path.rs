//! Chained-optional navigation over a parsed XML tree.
//!
//! Every step is a child-element lookup; the first miss short-circuits the
//! whole path to `None`, which callers map to a null field.

use roxmltree::Node;

/// First child element of `node` named `name`.
pub fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}

/// Follow `path` one child at a time from `node`.
pub fn descend<'a, 'input>(node: Node<'a, 'input>, path: &[&str]) -> Option<Node<'a, 'input>> {
    path.iter()
        .try_fold(node, |current, name| child(current, name))
}

/// All text beneath `node`, trimmed. Empty text counts as absent.
pub fn text_content(node: Node<'_, '_>) -> Option<String> {
    let text: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Text at the end of `path`, or `None` on the first missing step.
pub fn text_at(node: Node<'_, '_>, path: &[&str]) -> Option<String> {
    descend(node, path).and_then(text_content)
}
