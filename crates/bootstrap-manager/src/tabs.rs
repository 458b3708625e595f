//! Tab group builder
//!
//! A `.nav-tabs` list of toggle buttons over a `.tab-content` of panes.
//! Switching is driven entirely by the `data-bs-toggle="tab"` attributes,
//! so no behavior instance is created.

use bsm_dom::{Document, DomResult, DomTree, NodeId};
use serde::Deserialize;

use crate::content::{Content, render_into};
use crate::id::{IdGenerator, generate_id};
use crate::options::{MergeOptions, widget_options};
use crate::target::{Target, attach};
use crate::BuildError;

const BUILDER: &str = "createTabs";
const ID_PREFIX: &str = "tabs";

/// One tab: the button label and the pane content
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TabItem {
    pub label: String,
    pub content: Content,
    pub active: bool,
}

impl TabItem {
    pub fn new(label: impl Into<String>, content: impl Into<Content>) -> Self {
        Self {
            label: label.into(),
            content: content.into(),
            active: false,
        }
    }

    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

widget_options! {
    /// Effective tab group configuration
    pub struct TabsConfig =>
    /// Tab group overrides
    pub struct TabsOptions {
        id: String,
        tabs: Vec<TabItem>,
        /// Region the group replaces the contents of
        target: Option<Target>,
        dark_mode: bool,
        fade: bool,
    }
}

impl TabsConfig {
    /// Defaults with the given id stem
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tabs: Vec::new(),
            target: None,
            dark_mode: false,
            fade: true,
        }
    }
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self::with_id(generate_id(ID_PREFIX))
    }
}

/// Leave exactly one tab active: the first flagged one, else the first
pub fn normalize_active(tabs: &mut [TabItem]) {
    let mut seen = false;
    for tab in tabs.iter_mut() {
        if tab.active {
            if seen {
                tab.active = false;
            }
            seen = true;
        }
    }
    if !seen && let Some(first) = tabs.first_mut() {
        first.active = true;
    }
}

/// Build a tab group, attaching it to the target when one is set.
///
/// Returns the container, attached or not, or `None` when there are no tabs.
pub fn create_tabs(doc: &mut Document, ids: &mut IdGenerator, options: TabsOptions) -> Option<NodeId> {
    let mut config = TabsConfig::with_id(ids.next_id(ID_PREFIX)).merge(options);

    if config.tabs.is_empty() {
        tracing::error!(
            "{}",
            BuildError::Empty {
                builder: BUILDER,
                item: "tab",
                field: "tabs",
            }
        );
        return None;
    }
    normalize_active(&mut config.tabs);

    let container = doc.tree_mut().create_element("div");
    if let Err(err) = populate(doc.tree_mut(), container, &config) {
        tracing::error!("{}: {}", BUILDER, err);
    }
    tracing::debug!("Built tab group {} with {} tabs", config.id, config.tabs.len());

    if let Some(target) = &config.target
        && let Err(err) = attach(doc, target, container, BUILDER)
    {
        tracing::error!("{}", err);
    }

    Some(container)
}

fn populate(tree: &mut DomTree, container: NodeId, config: &TabsConfig) -> DomResult<()> {
    let id = &config.id;
    tree.set_attribute(container, "id", &format!("{id}-container"))?;

    let nav = tree.create_element("ul");
    tree.add_class(nav, &["nav", "nav-tabs"])?;
    tree.set_attribute(nav, "id", &format!("{id}-nav"))?;
    tree.set_attribute(nav, "role", "tablist")?;

    let panes = tree.create_element("div");
    tree.add_class(panes, &["tab-content"])?;
    tree.set_attribute(panes, "id", &format!("{id}-content"))?;

    if config.dark_mode {
        tree.set_attribute(nav, "data-bs-theme", "dark")?;
        tree.set_attribute(panes, "data-bs-theme", "dark")?;
    }

    for (index, tab) in config.tabs.iter().enumerate() {
        let tab_id = format!("{id}-tab-{index}");
        let pane_id = format!("{id}-pane-{index}");

        let item = tree.create_element("li");
        tree.add_class(item, &["nav-item"])?;
        tree.set_attribute(item, "role", "presentation")?;

        let link = tree.create_element("button");
        tree.add_class(link, &["nav-link"])?;
        tree.set_attribute(link, "id", &tab_id)?;
        tree.set_attribute(link, "data-bs-toggle", "tab")?;
        tree.set_attribute(link, "data-bs-target", &format!("#{pane_id}"))?;
        tree.set_attribute(link, "type", "button")?;
        tree.set_attribute(link, "role", "tab")?;
        tree.set_attribute(link, "aria-controls", &pane_id)?;
        tree.set_text_content(link, &tab.label)?;

        let pane = tree.create_element("div");
        tree.add_class(pane, &["tab-pane"])?;
        if config.fade {
            tree.add_class(pane, &["fade"])?;
        }
        tree.set_attribute(pane, "id", &pane_id)?;
        tree.set_attribute(pane, "role", "tabpanel")?;
        tree.set_attribute(pane, "aria-labelledby", &tab_id)?;
        tree.set_attribute(pane, "tabindex", "0")?;
        render_into(tree, pane, &tab.content)?;

        if tab.active {
            tree.add_class(link, &["active"])?;
            tree.set_attribute(link, "aria-selected", "true")?;
            tree.add_class(pane, &["show", "active"])?;
        } else {
            tree.set_attribute(link, "aria-selected", "false")?;
        }

        tree.append_child(item, link)?;
        tree.append_child(nav, item)?;
        tree.append_child(panes, pane)?;
    }

    tree.append_child(container, nav)?;
    tree.append_child(container, panes)?;
    Ok(())
}
