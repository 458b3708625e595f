//! Modal dialog builder
//!
//! Builds the `.modal` > `.modal-dialog` > `.modal-content` structure,
//! appends it to the document body and hands it to the runtime.

use bsm_dom::{Document, DomResult, DomTree, NodeId};
use serde::{Deserialize, Deserializer};

use crate::content::{Content, render_into};
use crate::id::{IdGenerator, generate_id};
use crate::options::{MergeOptions, widget_options};
use crate::runtime::{BehaviorRuntime, ModalBehavior, events};
use crate::BuildError;

const BUILDER: &str = "createModal";
const ID_PREFIX: &str = "modal";

/// Dialog width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalSize {
    #[default]
    Default,
    Small,
    Large,
    ExtraLarge,
}

impl ModalSize {
    /// Dialog class for the size, `None` for the default width
    pub fn class(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Small => Some("modal-sm"),
            Self::Large => Some("modal-lg"),
            Self::ExtraLarge => Some("modal-xl"),
        }
    }

    /// `sm`, `lg` or `xl`; anything else is the default width
    pub fn parse(s: &str) -> Self {
        match s {
            "sm" => Self::Small,
            "lg" => Self::Large,
            "xl" => Self::ExtraLarge,
            _ => Self::Default,
        }
    }
}

impl<'de> Deserialize<'de> for ModalSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<String>::deserialize(deserializer)
            .map(|s| s.as_deref().map_or(Self::Default, Self::parse))
    }
}

/// Backdrop behind the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backdrop {
    /// Backdrop that closes the modal on click
    #[default]
    Show,
    /// Backdrop that ignores clicks
    Static,
    None,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagOrString {
    Flag(bool),
    Text(String),
}

impl<'de> Deserialize<'de> for Backdrop {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match FlagOrString::deserialize(deserializer)? {
            FlagOrString::Flag(true) => Self::Show,
            FlagOrString::Flag(false) => Self::None,
            FlagOrString::Text(s) if s == "static" => Self::Static,
            FlagOrString::Text(_) => Self::Show,
        })
    }
}

/// Footer block
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Footer {
    /// No footer at all
    Omit,
    /// A single "Close" button
    #[default]
    Default,
    /// Caller content; empty markup suppresses the footer
    Custom(Content),
}

impl From<Content> for Footer {
    fn from(content: Content) -> Self {
        Self::Custom(content)
    }
}

impl From<&str> for Footer {
    fn from(markup: &str) -> Self {
        Self::Custom(markup.into())
    }
}

impl From<String> for Footer {
    fn from(markup: String) -> Self {
        Self::Custom(markup.into())
    }
}

impl From<NodeId> for Footer {
    fn from(node: NodeId) -> Self {
        Self::Custom(node.into())
    }
}

impl<'de> Deserialize<'de> for Footer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<FlagOrString>::deserialize(deserializer)? {
            None | Some(FlagOrString::Flag(false)) => Self::Omit,
            Some(FlagOrString::Flag(true)) => Self::Default,
            Some(FlagOrString::Text(markup)) => Self::Custom(Content::Markup(markup)),
        })
    }
}

/// An explicit `null` footer override means no footer, not "unset"
fn footer_override<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Footer>, D::Error> {
    Footer::deserialize(deserializer).map(Some)
}

/// What happens to the element once the modal has been hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CleanupPolicy {
    /// Remove the element on the first `hidden.bs.modal`
    #[default]
    RemoveOnHidden,
    /// Keep the element until [`ModalHandle::dispose`]
    Manual,
}

widget_options! {
    /// Effective modal configuration
    pub struct ModalConfig =>
    /// Modal overrides
    pub struct ModalOptions {
        id: String,
        title: String,
        body: Content,
        @serde(deserialize_with = "footer_override")
        footer: Footer,
        dark_mode: bool,
        size: ModalSize,
        animate: bool,
        show_on_create: bool,
        /// Same as `backdrop: Backdrop::Static`
        static_backdrop: bool,
        backdrop: Backdrop,
        keyboard: bool,
        scrollable: bool,
        centered: bool,
        cleanup: CleanupPolicy,
    }
}

impl ModalConfig {
    /// Defaults with the given element id
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: "Modal Title".to_string(),
            body: Content::default(),
            footer: Footer::Default,
            dark_mode: false,
            size: ModalSize::Default,
            animate: true,
            show_on_create: false,
            static_backdrop: false,
            backdrop: Backdrop::Show,
            keyboard: true,
            scrollable: false,
            centered: false,
            cleanup: CleanupPolicy::RemoveOnHidden,
        }
    }

    fn backdrop_attribute(&self) -> Option<&'static str> {
        if self.static_backdrop || self.backdrop == Backdrop::Static {
            Some("static")
        } else if self.backdrop == Backdrop::None {
            Some("false")
        } else {
            None
        }
    }
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self::with_id(generate_id(ID_PREFIX))
    }
}

/// A built modal and its behavior instance
#[derive(Debug)]
pub struct ModalHandle {
    /// The `.modal` root element
    pub element: NodeId,
    /// Behavior created by the runtime
    pub instance: Box<dyn ModalBehavior>,
}

impl ModalHandle {
    /// Show the modal through its behavior
    pub fn show(&mut self, doc: &mut Document) {
        self.instance.show(doc);
    }

    /// Hide the modal; with [`CleanupPolicy::RemoveOnHidden`] this also
    /// removes it
    pub fn hide(&mut self, doc: &mut Document) {
        self.instance.hide(doc);
    }

    pub fn toggle(&mut self, doc: &mut Document) {
        self.instance.toggle(doc);
    }

    /// Whether the behavior currently reports the modal as shown
    pub fn is_shown(&self) -> bool {
        self.instance.is_shown()
    }

    /// Hide the modal if needed and take the element out of the document
    pub fn dispose(mut self, doc: &mut Document) {
        self.instance.hide(doc);
        if let Some(parent) = doc.tree().parent(self.element)
            && let Err(err) = doc.tree_mut().remove_child(parent, self.element)
        {
            tracing::debug!("Modal {} already detached: {}", self.element, err);
        }
    }
}

/// Build a modal, append it to `<body>` and instantiate its behavior.
///
/// Without a body the element is left detached and the error is logged.
pub fn create_modal(
    doc: &mut Document,
    runtime: &dyn BehaviorRuntime,
    ids: &mut IdGenerator,
    options: ModalOptions,
) -> ModalHandle {
    let config = ModalConfig::with_id(ids.next_id(ID_PREFIX)).merge(options);

    let element = doc.tree_mut().create_element("div");
    if let Err(err) = populate(doc.tree_mut(), element, &config) {
        tracing::error!("{}: {}", BUILDER, err);
    }
    if let Err(err) = append_to_body(doc, element) {
        tracing::error!("{}", err);
    }
    tracing::debug!("Built modal #{} as {}", config.id, element);

    let mut instance = runtime.modal(doc, element);

    if config.cleanup == CleanupPolicy::RemoveOnHidden {
        doc.add_event_listener_once(element, events::MODAL_HIDDEN, move |doc, _| {
            if let Some(parent) = doc.tree().parent(element)
                && doc.tree_mut().remove_child(parent, element).is_ok()
            {
                tracing::debug!("Removed hidden modal {}", element);
            }
        });
    }

    if config.show_on_create {
        instance.show(doc);
    }

    ModalHandle { element, instance }
}

fn append_to_body(doc: &mut Document, element: NodeId) -> Result<(), BuildError> {
    let body = doc.body().ok_or(BuildError::MissingBody { builder: BUILDER })?;
    doc.tree_mut().append_child(body, element)?;
    Ok(())
}

fn populate(tree: &mut DomTree, root: NodeId, config: &ModalConfig) -> DomResult<()> {
    let label_id = format!("{}Label", config.id);

    tree.add_class(root, &["modal"])?;
    if config.animate {
        tree.add_class(root, &["fade"])?;
    }
    tree.set_attribute(root, "id", &config.id)?;
    tree.set_attribute(root, "tabindex", "-1")?;
    tree.set_attribute(root, "aria-labelledby", &label_id)?;
    tree.set_attribute(root, "aria-hidden", "true")?;
    if let Some(backdrop) = config.backdrop_attribute() {
        tree.set_attribute(root, "data-bs-backdrop", backdrop)?;
    }
    if !config.keyboard {
        tree.set_attribute(root, "data-bs-keyboard", "false")?;
    }

    let dialog = tree.create_element("div");
    tree.add_class(dialog, &["modal-dialog"])?;
    if let Some(size) = config.size.class() {
        tree.add_class(dialog, &[size])?;
    }
    if config.scrollable {
        tree.add_class(dialog, &["modal-dialog-scrollable"])?;
    }
    if config.centered {
        tree.add_class(dialog, &["modal-dialog-centered"])?;
    }

    let content = tree.create_element("div");
    tree.add_class(content, &["modal-content"])?;
    if config.dark_mode {
        tree.add_class(content, &["modal-dark"])?;
        tree.set_attribute(root, "data-bs-theme", "dark")?;
    }

    let header = tree.create_element("div");
    tree.add_class(header, &["modal-header"])?;

    let title = tree.create_element("h5");
    tree.add_class(title, &["modal-title"])?;
    tree.set_attribute(title, "id", &label_id)?;
    tree.set_text_content(title, &config.title)?;

    let close = tree.create_element("button");
    tree.set_attribute(close, "type", "button")?;
    tree.add_class(close, &["btn-close"])?;
    tree.set_attribute(close, "data-bs-dismiss", "modal")?;
    tree.set_attribute(close, "aria-label", "Close")?;

    tree.append_child(header, title)?;
    tree.append_child(header, close)?;

    let body = tree.create_element("div");
    tree.add_class(body, &["modal-body"])?;
    render_into(tree, body, &config.body)?;

    tree.append_child(content, header)?;
    tree.append_child(content, body)?;

    if let Some(footer) = build_footer(tree, &config.footer)? {
        tree.append_child(content, footer)?;
    }

    tree.append_child(dialog, content)?;
    tree.append_child(root, dialog)?;
    Ok(())
}

fn build_footer(tree: &mut DomTree, footer: &Footer) -> DomResult<Option<NodeId>> {
    let content = match footer {
        Footer::Omit => return Ok(None),
        Footer::Custom(content) if content.is_empty_markup() => return Ok(None),
        Footer::Custom(content) => Some(content),
        Footer::Default => None,
    };

    let element = tree.create_element("div");
    tree.add_class(element, &["modal-footer"])?;
    match content {
        Some(content) => render_into(tree, element, content)?,
        None => {
            let close = tree.create_element("button");
            tree.set_attribute(close, "type", "button")?;
            tree.add_class(close, &["btn", "btn-secondary"])?;
            tree.set_attribute(close, "data-bs-dismiss", "modal")?;
            tree.set_text_content(close, "Close")?;
            tree.append_child(element, close)?;
        }
    }
    Ok(Some(element))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::HeadlessRuntime;

    fn build(options: ModalOptions) -> (Document, ModalHandle) {
        let mut doc = Document::default();
        let mut ids = IdGenerator::seeded(1);
        let handle = create_modal(&mut doc, &HeadlessRuntime, &mut ids, options);
        (doc, handle)
    }

    #[test]
    fn test_default_structure() {
        let (doc, handle) = build(ModalOptions::default().id("m1").title("Hello").body("<p>Body</p>"));
        let tree = doc.tree();
        let root = handle.element;

        assert_eq!(tree.get_attribute(root, "class"), Some("modal fade"));
        assert_eq!(tree.get_attribute(root, "tabindex"), Some("-1"));
        assert_eq!(tree.get_attribute(root, "aria-labelledby"), Some("m1Label"));
        assert_eq!(tree.get_attribute(root, "aria-hidden"), Some("true"));
        assert_eq!(tree.get_attribute(root, "data-bs-backdrop"), None);
        assert_eq!(tree.get_attribute(root, "data-bs-keyboard"), None);

        let title = doc.get_element_by_id("m1Label").unwrap();
        assert_eq!(tree.text_content(title), "Hello");
        let footer = tree.query_selector(root, ".modal-footer").unwrap().unwrap();
        assert_eq!(
            bsm_html::inner_html(tree, footer),
            r#"<button type="button" class="btn btn-secondary" data-bs-dismiss="modal">Close</button>"#
        );
        assert_eq!(tree.parent(root), doc.body());
    }

    #[test]
    fn test_title_is_text() {
        let (doc, handle) = build(ModalOptions::default().title("<b>x</b>"));
        let title = doc.tree().query_selector(handle.element, "h5.modal-title").unwrap().unwrap();
        assert!(doc.tree().element_children(title).is_empty());
        assert_eq!(bsm_html::inner_html(doc.tree(), title), "&lt;b&gt;x&lt;/b&gt;");
    }

    #[test]
    fn test_footer_variants() {
        let (doc, handle) = build(ModalOptions::default().footer(Footer::Omit));
        assert!(doc.tree().query_selector(handle.element, ".modal-footer").unwrap().is_none());

        let (doc, handle) = build(ModalOptions::default().footer(""));
        assert!(doc.tree().query_selector(handle.element, ".modal-footer").unwrap().is_none());

        let (doc, handle) = build(ModalOptions::default().footer("<a href=\"#\">Go</a>"));
        let footer = doc.tree().query_selector(handle.element, ".modal-footer").unwrap().unwrap();
        assert_eq!(bsm_html::inner_html(doc.tree(), footer), "<a href=\"#\">Go</a>");
    }

    #[test]
    fn test_static_backdrop_alias() {
        let (doc, handle) = build(ModalOptions::default().static_backdrop(true));
        assert_eq!(doc.tree().get_attribute(handle.element, "data-bs-backdrop"), Some("static"));

        let (doc, handle) = build(ModalOptions::default().backdrop(Backdrop::None).keyboard(false));
        assert_eq!(doc.tree().get_attribute(handle.element, "data-bs-backdrop"), Some("false"));
        assert_eq!(doc.tree().get_attribute(handle.element, "data-bs-keyboard"), Some("false"));
    }

    #[test]
    fn test_dialog_classes() {
        let (doc, handle) = build(
            ModalOptions::default()
                .size(ModalSize::Large)
                .scrollable(true)
                .centered(true)
                .dark_mode(true)
                .animate(false),
        );
        let tree = doc.tree();
        let dialog = tree.query_selector(handle.element, ".modal-dialog").unwrap().unwrap();
        assert_eq!(
            tree.get_attribute(dialog, "class"),
            Some("modal-dialog modal-lg modal-dialog-scrollable modal-dialog-centered")
        );
        assert!(tree.query_selector(handle.element, ".modal-content.modal-dark").unwrap().is_some());
        assert_eq!(tree.get_attribute(handle.element, "data-bs-theme"), Some("dark"));
        assert!(!tree.has_class(handle.element, "fade"));
    }

    #[test]
    fn test_removed_after_hidden() {
        let (mut doc, mut handle) = build(ModalOptions::default().show_on_create(true));
        assert!(handle.is_shown());
        handle.hide(&mut doc);
        assert!(!doc.is_connected(handle.element));
    }

    #[test]
    fn test_manual_cleanup_keeps_element() {
        let (mut doc, mut handle) = build(ModalOptions::default().cleanup(CleanupPolicy::Manual));
        handle.show(&mut doc);
        handle.hide(&mut doc);
        assert!(doc.is_connected(handle.element));

        let element = handle.element;
        handle.dispose(&mut doc);
        assert!(!doc.is_connected(element));
    }

    #[test]
    fn test_deserialize_options() {
        let options: ModalOptions = serde_json::from_str(
            r#"{"title":"T","size":"xl","backdrop":"static","footer":false,"showOnCreate":true}"#,
        )
        .unwrap();
        assert_eq!(options.title.as_deref(), Some("T"));
        assert_eq!(options.size, Some(ModalSize::ExtraLarge));
        assert_eq!(options.backdrop, Some(Backdrop::Static));
        assert_eq!(options.footer, Some(Footer::Omit));
        assert_eq!(options.show_on_create, Some(true));
        assert_eq!(options.keyboard, None);
    }

    #[test]
    fn test_null_footer_from_json_omits_footer() {
        let options: ModalOptions = serde_json::from_str(r#"{"footer":null}"#).unwrap();
        assert_eq!(options.footer, Some(Footer::Omit));

        let (doc, handle) = build(options);
        assert!(doc.tree().query_selector(handle.element, ".modal-footer").unwrap().is_none());

        let options: ModalOptions = serde_json::from_str(r#"{"footer":true}"#).unwrap();
        assert_eq!(options.footer, Some(Footer::Default));
        let options: ModalOptions = serde_json::from_str(r#"{"title":"T"}"#).unwrap();
        assert_eq!(options.footer, None);
    }
}
