//! Comprehensive tests for bsm-html
//!
//! Fragment parsing into the arena and serialization back out.

use bsm_dom::{DomTree, NodeId};
use bsm_html::{HtmlSerializer, append_html, inner_html, outer_html, set_inner_html};

fn host() -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let div = tree.create_element("div");
    (tree, div)
}

#[test]
fn test_round_trip_bootstrap_markup() {
    let (mut tree, div) = host();
    let markup = r#"<img src="a.png" class="d-block w-100" alt="A"><div class="carousel-caption"><h5>Title</h5></div>"#;
    set_inner_html(&mut tree, div, markup).unwrap();
    assert_eq!(inner_html(&tree, div), markup);
}

#[test]
fn test_set_inner_html_replaces() {
    let (mut tree, div) = host();
    set_inner_html(&mut tree, div, "<p>one</p>").unwrap();
    set_inner_html(&mut tree, div, "<p>two</p>").unwrap();
    assert_eq!(inner_html(&tree, div), "<p>two</p>");

    set_inner_html(&mut tree, div, "").unwrap();
    assert!(tree.child_ids(div).is_empty());
}

#[test]
fn test_append_html_keeps_existing() {
    let (mut tree, div) = host();
    append_html(&mut tree, div, "<b>a</b>").unwrap();
    let created = append_html(&mut tree, div, "text<i>b</i>").unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(inner_html(&tree, div), "<b>a</b>text<i>b</i>");
}

#[test]
fn test_text_and_attribute_escaping() {
    let (mut tree, div) = host();
    tree.set_attribute(div, "title", "a \"quoted\" & more").unwrap();
    tree.set_text_content(div, "1 < 2 & 3 > 2").unwrap();
    assert_eq!(
        outer_html(&tree, div),
        r#"<div title="a &quot;quoted&quot; &amp; more">1 &lt; 2 &amp; 3 &gt; 2</div>"#
    );
}

#[test]
fn test_entities_are_decoded_on_parse() {
    let (mut tree, div) = host();
    set_inner_html(&mut tree, div, "Tom &amp; Jerry").unwrap();
    assert_eq!(tree.text_content(div), "Tom & Jerry");
}

#[test]
fn test_comments_survive() {
    let (mut tree, div) = host();
    set_inner_html(&mut tree, div, "<span>x</span><!-- slide -->").unwrap();
    assert_eq!(inner_html(&tree, div), "<span>x</span><!-- slide -->");
}

#[test]
fn test_pretty_serializer() {
    let (mut tree, div) = host();
    set_inner_html(&mut tree, div, "<ul><li>One</li><li>Two</li></ul>").unwrap();
    let list = tree.element_children(div)[0];
    assert_eq!(
        HtmlSerializer::pretty().serialize_outer(&tree, list),
        "<ul>\n  <li>One</li>\n  <li>Two</li>\n</ul>"
    );
}
