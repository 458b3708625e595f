//! HTML5 fragment parser
//!
//! Parses with html5ever into its RcDom, then copies the nodes into our
//! arena. Markup goes through the fragment algorithm with a `<div>`
//! context, the same as assigning `innerHTML` on a div.

use bsm_dom::{DomResult, DomTree, NodeId};
use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, QualName, local_name, ns, parse_fragment};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// HTML5 fragment parser
#[derive(Debug, Default, Clone, Copy)]
pub struct FragmentParser;

impl FragmentParser {
    /// Create a new fragment parser
    pub fn new() -> Self {
        Self
    }

    /// Parse `markup` and append the resulting top-level nodes to `parent`,
    /// returning their IDs
    pub fn parse_into(&self, tree: &mut DomTree, parent: NodeId, markup: &str) -> DomResult<Vec<NodeId>> {
        let mut created = Vec::new();
        if markup.is_empty() {
            return Ok(created);
        }

        let context = QualName::new(None, ns!(html), local_name!("div"));
        let dom = parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new(), true).one(markup);

        // The fragment lands under a synthetic <html> root
        let root = dom.document.children.borrow().first().cloned();
        if let Some(root) = root {
            for child in root.children.borrow().iter() {
                if let Some(id) = self.convert_node(child, tree, parent)? {
                    created.push(id);
                }
            }
        }

        tracing::trace!("Parsed fragment into {} top-level nodes", created.len());
        Ok(created)
    }

    /// Copy an RcDom node (and its subtree) under `parent`
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) -> DomResult<Option<NodeId>> {
        let id = match &handle.data {
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                tree.create_text(&text)
            }
            RcNodeData::Comment { contents } => tree.create_comment(&contents.to_string()),
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    tree.set_attribute(id, &attr.name.local, &attr.value)?;
                }
                id
            }
            RcNodeData::Document | RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => {
                return Ok(None);
            }
        };

        tree.append_child(parent, id)?;
        for child in handle.children.borrow().iter() {
            self.convert_node(child, tree, id)?;
        }
        Ok(Some(id))
    }
}
