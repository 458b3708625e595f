//! Target attachment
//!
//! Tab groups and carousels can be dropped into an existing region of the
//! document. Attaching replaces everything the target held before.

use std::fmt;

use bsm_dom::{DomError, Document, NodeId};
use serde::{Deserialize, Deserializer};

use crate::BuildError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// An element id, falling back to a CSS selector
    Selector(String),
    /// An element already in hand
    Element(NodeId),
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl From<String> for Target {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

impl From<NodeId> for Target {
    fn from(node: NodeId) -> Self {
        Self::Element(node)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selector(s) => f.write_str(s),
            Self::Element(node) => write!(f, "{node}"),
        }
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::Selector)
    }
}

/// Find the element a target refers to
pub fn resolve_target(doc: &Document, target: &Target) -> Option<NodeId> {
    match target {
        Target::Selector(selector) => doc.get_element_by_id(selector).or_else(|| {
            doc.query_selector(selector).unwrap_or_else(|err| {
                tracing::debug!("Target lookup failed: {}", err);
                None
            })
        }),
        Target::Element(node) => doc.tree().is_element(*node).then_some(*node),
    }
}

/// Clear the target and append `subtree` to it, returning the target element
pub(crate) fn attach(
    doc: &mut Document,
    target: &Target,
    subtree: NodeId,
    builder: &'static str,
) -> Result<NodeId, BuildError> {
    let Some(element) = resolve_target(doc, target) else {
        return Err(BuildError::TargetNotFound {
            builder,
            target: target.to_string(),
        });
    };
    if doc.tree().contains(subtree, element) {
        return Err(DomError::HierarchyRequest {
            parent: element,
            child: subtree,
        }
        .into());
    }

    let tree = doc.tree_mut();
    let removed = tree.clear_children(element)?;
    tree.append_child(element, subtree)?;
    tracing::debug!("{}: attached to {} (replaced {} nodes)", builder, target, removed);
    Ok(element)
}
