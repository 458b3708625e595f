//! Edge case tests for bsm-dom
//!
//! Tree surgery, selector corner cases and listener bookkeeping.

use std::cell::Cell;
use std::rc::Rc;

use bsm_dom::{DomError, DomEvent, DomTree, Document, NodeId, Selector};

// ============================================================================
// TREE OPERATIONS
// ============================================================================

#[test]
fn test_append_moves_between_parents() {
    let mut tree = DomTree::new();
    let a = tree.create_element("div");
    let b = tree.create_element("div");
    let child = tree.create_element("span");

    tree.append_child(a, child).unwrap();
    tree.append_child(b, child).unwrap();

    assert!(tree.child_ids(a).is_empty());
    assert_eq!(tree.child_ids(b), vec![child]);
    assert_eq!(tree.parent(child), Some(b));
}

#[test]
fn test_append_into_own_descendant_fails() {
    let mut tree = DomTree::new();
    let outer = tree.create_element("div");
    let inner = tree.create_element("div");
    tree.append_child(outer, inner).unwrap();

    let err = tree.append_child(inner, outer).unwrap_err();
    assert!(matches!(err, DomError::HierarchyRequest { .. }));
    assert!(matches!(tree.append_child(outer, outer), Err(DomError::HierarchyRequest { .. })));
}

#[test]
fn test_append_to_text_fails() {
    let mut tree = DomTree::new();
    let text = tree.create_text("hi");
    let span = tree.create_element("span");
    assert_eq!(tree.append_child(text, span), Err(DomError::InvalidNodeType(text)));
}

#[test]
fn test_remove_non_child_fails() {
    let mut tree = DomTree::new();
    let a = tree.create_element("div");
    let b = tree.create_element("div");
    assert_eq!(tree.remove_child(a, b), Err(DomError::NotAChild { parent: a, child: b }));
}

#[test]
fn test_missing_node_errors() {
    let mut tree = DomTree::new();
    assert_eq!(tree.set_attribute(NodeId::NONE, "id", "x"), Err(DomError::NotFound(NodeId::NONE)));
    assert_eq!(tree.clear_children(NodeId::NONE), Err(DomError::NotFound(NodeId::NONE)));
    assert_eq!(tree.get_attribute(NodeId::NONE, "id"), None);
}

#[test]
fn test_clear_children_middle_sibling_links() {
    let mut tree = DomTree::new();
    let list = tree.create_element("ul");
    let items: Vec<_> = (0..3).map(|_| tree.create_element("li")).collect();
    for &item in &items {
        tree.append_child(list, item).unwrap();
    }
    tree.remove_child(list, items[1]).unwrap();
    assert_eq!(tree.child_ids(list), vec![items[0], items[2]]);

    assert_eq!(tree.clear_children(list).unwrap(), 2);
    assert!(tree.child_ids(list).is_empty());
    // Detached nodes can be reused
    tree.append_child(list, items[2]).unwrap();
    assert_eq!(tree.child_ids(list), vec![items[2]]);
}

#[test]
fn test_class_helpers_on_missing_class_attribute() {
    let mut tree = DomTree::new();
    let div = tree.create_element("div");
    tree.remove_class(div, &["absent"]).unwrap();
    assert_eq!(tree.get_attribute(div, "class"), None);

    tree.add_class(div, &["a", "b", "a"]).unwrap();
    assert_eq!(tree.get_attribute(div, "class"), Some("a b"));
}

// ============================================================================
// SELECTORS
// ============================================================================

#[test]
fn test_selector_syntax_errors() {
    for bad in ["", "div >", "[attr", "#", ".", "a,,b", "[x=\"open]"] {
        assert!(Selector::parse(bad).is_err(), "{bad:?} should not parse");
    }
}

#[test]
fn test_selector_list_and_child_combinator() {
    let mut doc = Document::default();
    let body = doc.body().unwrap();
    bsm_dom_fixture(&mut doc, body);

    let hits = doc.query_selector_all("ul > li.on, p").unwrap();
    assert_eq!(hits.len(), 2);
    assert!(doc.query_selector("body > li").unwrap().is_none());
    assert!(doc.query_selector("body li").unwrap().is_some());
}

fn bsm_dom_fixture(doc: &mut Document, body: NodeId) {
    let tree = doc.tree_mut();
    let list = tree.create_element("ul");
    let on = tree.create_element("li");
    let off = tree.create_element("li");
    let para = tree.create_element("p");
    tree.add_class(on, &["on"]).unwrap();
    tree.append_child(list, on).unwrap();
    tree.append_child(list, off).unwrap();
    tree.append_child(body, list).unwrap();
    tree.append_child(body, para).unwrap();
}

#[test]
fn test_get_element_by_id_ignores_detached() {
    let mut doc = Document::default();
    let div = doc.tree_mut().create_element("div");
    doc.tree_mut().set_attribute(div, "id", "ghost").unwrap();
    assert_eq!(doc.get_element_by_id("ghost"), None);

    let body = doc.body().unwrap();
    doc.tree_mut().append_child(body, div).unwrap();
    assert_eq!(doc.get_element_by_id("ghost"), Some(div));
}

// ============================================================================
// EVENTS
// ============================================================================

#[test]
fn test_listener_removing_its_own_node() {
    let mut doc = Document::default();
    let body = doc.body().unwrap();
    let div = doc.tree_mut().create_element("div");
    doc.tree_mut().append_child(body, div).unwrap();

    doc.add_event_listener_once(div, "gone", move |doc, event| {
        doc.tree_mut().remove_child(body, event.target).unwrap();
    });
    assert_eq!(doc.dispatch_event(&DomEvent::new("gone", div)), 1);
    assert!(!doc.is_connected(div));
    assert_eq!(doc.dispatch_event(&DomEvent::new("gone", div)), 0);
}

#[test]
fn test_non_bubbling_event_stays_on_target() {
    let mut doc = Document::default();
    let body = doc.body().unwrap();
    let div = doc.tree_mut().create_element("div");
    doc.tree_mut().append_child(body, div).unwrap();

    let hits = Rc::new(Cell::new(0));
    let counter = hits.clone();
    doc.add_event_listener(body, "ping", move |_, _| counter.set(counter.get() + 1));

    doc.dispatch_event(&DomEvent::new("ping", div));
    assert_eq!(hits.get(), 0);
    doc.dispatch_event(&DomEvent::new("ping", div).bubbling());
    assert_eq!(hits.get(), 1);
}

#[test]
fn test_listener_registered_during_dispatch_survives() {
    let mut doc = Document::default();
    let body = doc.body().unwrap();
    doc.add_event_listener_once(body, "first", move |doc, _| {
        doc.add_event_listener(body, "second", |_, _| {});
    });
    doc.dispatch_event(&DomEvent::new("first", body));
    assert_eq!(doc.listener_count(body, "second"), 1);
    assert_eq!(doc.listener_count(body, "first"), 0);
}
