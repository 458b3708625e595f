//! Bootstrap Manager HTML
//!
//! Markup strings in and out of the arena DOM: fragment parsing for
//! innerHTML-style assignment (built on html5ever) and innerHTML/outerHTML
//! serialization.

mod parser;
mod serializer;

pub use parser::FragmentParser;
pub use serializer::HtmlSerializer;

use bsm_dom::{DomResult, DomTree, NodeId};

/// Replace the children of `node` with the parsed `markup`
/// (`element.innerHTML = markup`)
pub fn set_inner_html(tree: &mut DomTree, node: NodeId, markup: &str) -> DomResult<Vec<NodeId>> {
    tree.clear_children(node)?;
    FragmentParser::new().parse_into(tree, node, markup)
}

/// Append the parsed `markup` after the existing children of `node`
pub fn append_html(tree: &mut DomTree, node: NodeId, markup: &str) -> DomResult<Vec<NodeId>> {
    FragmentParser::new().parse_into(tree, node, markup)
}

/// Get innerHTML of an element
pub fn inner_html(tree: &DomTree, node: NodeId) -> String {
    HtmlSerializer::new().serialize_inner(tree, node)
}

/// Get outerHTML of an element
pub fn outer_html(tree: &DomTree, node: NodeId) -> String {
    HtmlSerializer::new().serialize_outer(tree, node)
}
