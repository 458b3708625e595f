//! DOM Events
//!
//! Named events (e.g. `hidden.bs.modal`) dispatched to listeners registered
//! on a node. Listeners get the whole [`Document`] mutably so they can
//! restructure the tree, including removing their own node.

use std::collections::HashMap;

use crate::{Document, NodeId};

/// Listener callback
pub type EventListener = Box<dyn FnMut(&mut Document, &DomEvent)>;

/// DOM event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub event_type: String,
    pub target: NodeId,
    pub bubbles: bool,
}

impl DomEvent {
    /// Non-bubbling event aimed at `target`
    pub fn new(event_type: impl Into<String>, target: NodeId) -> Self {
        Self {
            event_type: event_type.into(),
            target,
            bubbles: false,
        }
    }

    /// Also deliver to the target's ancestors
    pub fn bubbling(mut self) -> Self {
        self.bubbles = true;
        self
    }
}

pub(crate) struct Registration {
    pub(crate) event_type: String,
    pub(crate) once: bool,
    pub(crate) callback: EventListener,
}

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    by_node: HashMap<NodeId, Vec<Registration>>,
}

impl ListenerRegistry {
    pub(crate) fn add(&mut self, node: NodeId, registration: Registration) {
        self.by_node.entry(node).or_default().push(registration);
    }

    pub(crate) fn count(&self, node: NodeId, event_type: &str) -> usize {
        self.by_node
            .get(&node)
            .map_or(0, |regs| regs.iter().filter(|r| r.event_type == event_type).count())
    }

    /// Take a node's listeners out for the duration of a dispatch
    pub(crate) fn take(&mut self, node: NodeId) -> Option<Vec<Registration>> {
        self.by_node.remove(&node)
    }

    /// Put listeners back; ones added during dispatch go after them
    pub(crate) fn restore(&mut self, node: NodeId, mut kept: Vec<Registration>) {
        if let Some(added) = self.by_node.remove(&node) {
            kept.extend(added);
        }
        if !kept.is_empty() {
            self.by_node.insert(node, kept);
        }
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.by_node.iter().map(|(node, regs)| {
                (node, regs.iter().map(|r| r.event_type.as_str()).collect::<Vec<_>>())
            }))
            .finish()
    }
}
