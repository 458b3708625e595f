//! Document - High-level document API

use crate::events::{ListenerRegistry, Registration};
use crate::{DomEvent, DomResult, DomTree, Node, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: Option<NodeId>,
    /// Cached reference to <head> element
    head_element: Option<NodeId>,
    /// Cached reference to <body> element
    body_element: Option<NodeId>,
    listeners: ListenerRegistry,
}

impl Document {
    /// Create a document with `<html>`, `<head>` and `<body>`
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh nodes under the document node cannot violate the hierarchy.
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: Some(html),
            head_element: Some(head),
            body_element: Some(body),
            listeners: ListenerRegistry::default(),
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: None,
            head_element: None,
            body_element: None,
            listeners: ListenerRegistry::default(),
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Text of the first `<title>` in `<head>`
    pub fn title(&self) -> String {
        let Some(head) = self.head_element else {
            return String::new();
        };
        self.tree
            .children(head)
            .find(|(_, node)| node.as_element().is_some_and(|e| e.name == "title"))
            .map(|(id, _)| self.tree.text_content(id))
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> Option<NodeId> {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> Option<NodeId> {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> Option<NodeId> {
        self.body_element
    }

    /// First connected element whose `id` attribute equals `id`
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&n| self.tree.element(n).and_then(|e| e.id()) == Some(id))
    }

    /// First connected element matching a CSS selector
    pub fn query_selector(&self, selector: &str) -> DomResult<Option<NodeId>> {
        self.tree.query_selector(self.tree.root(), selector)
    }

    /// All connected elements matching a CSS selector
    pub fn query_selector_all(&self, selector: &str) -> DomResult<Vec<NodeId>> {
        self.tree.query_selector_all(self.tree.root(), selector)
    }

    /// Whether `node` is reachable from the document node
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.tree.contains(self.tree.root(), node)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Get a node by ID
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.tree.get(id)
    }

    /// Register a listener for `event_type` on `node`
    pub fn add_event_listener<F>(&mut self, node: NodeId, event_type: &str, listener: F)
    where
        F: FnMut(&mut Document, &DomEvent) + 'static,
    {
        self.register(node, event_type, false, Box::new(listener));
    }

    /// Register a listener that is dropped after its first invocation
    pub fn add_event_listener_once<F>(&mut self, node: NodeId, event_type: &str, listener: F)
    where
        F: FnMut(&mut Document, &DomEvent) + 'static,
    {
        self.register(node, event_type, true, Box::new(listener));
    }

    fn register(&mut self, node: NodeId, event_type: &str, once: bool, callback: crate::EventListener) {
        self.listeners.add(
            node,
            Registration {
                event_type: event_type.to_string(),
                once,
                callback,
            },
        );
    }

    /// Number of listeners for `event_type` on `node`
    pub fn listener_count(&self, node: NodeId, event_type: &str) -> usize {
        self.listeners.count(node, event_type)
    }

    /// Deliver `event` to its target (and ancestors when bubbling),
    /// returning how many listeners ran
    pub fn dispatch_event(&mut self, event: &DomEvent) -> usize {
        let mut path = vec![event.target];
        if event.bubbles {
            let mut current = self.tree.parent(event.target);
            while let Some(ancestor) = current {
                path.push(ancestor);
                current = self.tree.parent(ancestor);
            }
        }

        tracing::trace!("Dispatching {} to {}", event.event_type, event.target);

        let mut invoked = 0;
        for node in path {
            let Some(registrations) = self.listeners.take(node) else {
                continue;
            };
            let mut kept = Vec::with_capacity(registrations.len());
            for mut registration in registrations {
                if registration.event_type == event.event_type {
                    (registration.callback)(self, event);
                    invoked += 1;
                    if registration.once {
                        continue;
                    }
                }
                kept.push(registration);
            }
            self.listeners.restore(node, kept);
        }
        invoked
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
