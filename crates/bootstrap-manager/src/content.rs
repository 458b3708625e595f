//! Widget content
//!
//! Body, caption, tab and slide content is either a markup string (parsed
//! like an `innerHTML` assignment) or an existing node that gets moved in.

use bsm_dom::{DomResult, DomTree, NodeData, NodeId};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// HTML markup, trusted as-is
    Markup(String),
    /// An existing node, moved under the widget
    Node(NodeId),
}

impl Content {
    /// Markup holding nothing at all
    pub fn is_empty_markup(&self) -> bool {
        matches!(self, Self::Markup(m) if m.is_empty())
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::Markup(String::new())
    }
}

impl From<&str> for Content {
    fn from(markup: &str) -> Self {
        Self::Markup(markup.to_string())
    }
}

impl From<String> for Content {
    fn from(markup: String) -> Self {
        Self::Markup(markup)
    }
}

impl From<NodeId> for Content {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawContent {
    Markup(String),
    Other(IgnoredAny),
}

/// Only markup has a serialized form; any other value renders as empty
impl<'de> Deserialize<'de> for Content {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawContent::deserialize(deserializer)? {
            RawContent::Markup(markup) => Self::Markup(markup),
            RawContent::Other(_) => {
                tracing::debug!("Ignoring content that is not a markup string");
                Self::default()
            }
        })
    }
}

/// Append `content` under `parent`. A node that cannot be placed there
/// (missing, the document, an ancestor of `parent`) is skipped.
pub(crate) fn render_into(tree: &mut DomTree, parent: NodeId, content: &Content) -> DomResult<()> {
    match content {
        Content::Markup(markup) => {
            bsm_html::append_html(tree, parent, markup)?;
        }
        Content::Node(node) => {
            let placeable = tree
                .get(*node)
                .is_some_and(|n| !matches!(n.data, NodeData::Document));
            if !placeable {
                tracing::debug!("Ignoring content node {}: not an element or text node", node);
                return Ok(());
            }
            if let Err(err) = tree.append_child(parent, *node) {
                tracing::debug!("Ignoring content node {}: {}", node, err);
            }
        }
    }
    Ok(())
}
