//! Behavior runtime
//!
//! The builders only produce markup. Showing a modal or sliding a carousel
//! is the job of a runtime that reads the emitted classes and `data-bs-*`
//! attributes. Runtimes are injected through [`BehaviorRuntime`], so the
//! builders run the same against a browser bridge, a test double, or the
//! bundled [`HeadlessRuntime`].

use std::fmt;

use bsm_dom::{DomEvent, DomResult, Document, NodeId};

/// Lifecycle event names dispatched on the widget root
pub mod events {
    pub const MODAL_SHOW: &str = "show.bs.modal";
    pub const MODAL_SHOWN: &str = "shown.bs.modal";
    pub const MODAL_HIDE: &str = "hide.bs.modal";
    pub const MODAL_HIDDEN: &str = "hidden.bs.modal";
    pub const CAROUSEL_SLIDE: &str = "slide.bs.carousel";
    pub const CAROUSEL_SLID: &str = "slid.bs.carousel";
}

/// Carousel interval the runtime assumes when no attribute says otherwise
pub const DEFAULT_INTERVAL_MS: u32 = 5000;

/// Creates behavior instances for built widgets
pub trait BehaviorRuntime: fmt::Debug {
    fn modal(&self, doc: &mut Document, element: NodeId) -> Box<dyn ModalBehavior>;

    fn carousel(&self, doc: &mut Document, element: NodeId) -> Box<dyn CarouselBehavior>;
}

/// Visibility control for one modal element
pub trait ModalBehavior: fmt::Debug {
    fn show(&mut self, doc: &mut Document);

    fn hide(&mut self, doc: &mut Document);

    fn is_shown(&self) -> bool;

    fn toggle(&mut self, doc: &mut Document) {
        if self.is_shown() {
            self.hide(doc);
        } else {
            self.show(doc);
        }
    }
}

/// Slide control for one carousel element
pub trait CarouselBehavior: fmt::Debug {
    fn next(&mut self, doc: &mut Document);

    fn prev(&mut self, doc: &mut Document);

    /// Jump to slide `index`; out-of-range indices are ignored
    fn to(&mut self, doc: &mut Document, index: usize);

    fn pause(&mut self);

    fn cycle(&mut self);

    fn active_index(&self) -> usize;

    fn is_cycling(&self) -> bool;

    /// Delay before the next automatic slide, `None` while not cycling
    fn current_interval(&self, doc: &Document) -> Option<u32>;
}

/// In-process runtime that tracks widget state through classes and
/// attributes and dispatches the lifecycle events. No transitions, focus
/// handling or timers.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessRuntime;

impl BehaviorRuntime for HeadlessRuntime {
    fn modal(&self, _doc: &mut Document, element: NodeId) -> Box<dyn ModalBehavior> {
        Box::new(HeadlessModal::new(element))
    }

    fn carousel(&self, doc: &mut Document, element: NodeId) -> Box<dyn CarouselBehavior> {
        Box::new(HeadlessCarousel::new(doc, element))
    }
}

#[derive(Debug)]
pub struct HeadlessModal {
    element: NodeId,
    shown: bool,
    backdrop: Option<NodeId>,
}

impl HeadlessModal {
    pub fn new(element: NodeId) -> Self {
        Self {
            element,
            shown: false,
            backdrop: None,
        }
    }

    fn mark_shown(&mut self, doc: &mut Document) -> DomResult<()> {
        let element = self.element;
        let wants_backdrop = doc.tree().get_attribute(element, "data-bs-backdrop") != Some("false");
        let animated = doc.tree().has_class(element, "fade");
        let body = doc.body();

        let tree = doc.tree_mut();
        tree.add_class(element, &["show"])?;
        tree.set_attribute(element, "style", "display: block;")?;
        tree.remove_attribute(element, "aria-hidden")?;
        tree.set_attribute(element, "aria-modal", "true")?;
        tree.set_attribute(element, "role", "dialog")?;

        if let Some(body) = body {
            tree.add_class(body, &["modal-open"])?;
            if wants_backdrop {
                let backdrop = tree.create_element("div");
                tree.add_class(backdrop, &["modal-backdrop"])?;
                if animated {
                    tree.add_class(backdrop, &["fade"])?;
                }
                tree.add_class(backdrop, &["show"])?;
                tree.append_child(body, backdrop)?;
                self.backdrop = Some(backdrop);
            }
        }
        Ok(())
    }

    fn mark_hidden(&mut self, doc: &mut Document) -> DomResult<()> {
        let element = self.element;
        let body = doc.body();

        let tree = doc.tree_mut();
        tree.remove_class(element, &["show"])?;
        tree.set_attribute(element, "style", "display: none;")?;
        tree.set_attribute(element, "aria-hidden", "true")?;
        tree.remove_attribute(element, "aria-modal")?;
        tree.remove_attribute(element, "role")?;

        if let Some(body) = body {
            tree.remove_class(body, &["modal-open"])?;
        }
        if let Some(backdrop) = self.backdrop.take()
            && let Some(parent) = tree.parent(backdrop)
        {
            tree.remove_child(parent, backdrop)?;
        }
        Ok(())
    }
}

impl ModalBehavior for HeadlessModal {
    fn show(&mut self, doc: &mut Document) {
        if self.shown {
            return;
        }
        doc.dispatch_event(&DomEvent::new(events::MODAL_SHOW, self.element).bubbling());
        if let Err(err) = self.mark_shown(doc) {
            tracing::warn!("Modal {} could not be shown: {}", self.element, err);
            return;
        }
        self.shown = true;
        doc.dispatch_event(&DomEvent::new(events::MODAL_SHOWN, self.element).bubbling());
    }

    fn hide(&mut self, doc: &mut Document) {
        if !self.shown {
            return;
        }
        doc.dispatch_event(&DomEvent::new(events::MODAL_HIDE, self.element).bubbling());
        if let Err(err) = self.mark_hidden(doc) {
            tracing::warn!("Modal {} could not be hidden: {}", self.element, err);
        }
        self.shown = false;
        doc.dispatch_event(&DomEvent::new(events::MODAL_HIDDEN, self.element).bubbling());
    }

    fn is_shown(&self) -> bool {
        self.shown
    }
}

#[derive(Debug)]
pub struct HeadlessCarousel {
    element: NodeId,
    active: usize,
    cycling: bool,
}

impl HeadlessCarousel {
    /// Pick up the active slide and ride mode from the markup
    pub fn new(doc: &Document, element: NodeId) -> Self {
        let active = Self::items(doc, element)
            .iter()
            .position(|&item| doc.tree().has_class(item, "active"))
            .unwrap_or(0);
        let cycling = doc.tree().get_attribute(element, "data-bs-ride") == Some("carousel");
        Self {
            element,
            active,
            cycling,
        }
    }

    fn items(doc: &Document, element: NodeId) -> Vec<NodeId> {
        doc.tree()
            .query_selector_all(element, ".carousel-inner > .carousel-item")
            .unwrap_or_default()
    }

    fn indicators(doc: &Document, element: NodeId) -> Vec<NodeId> {
        doc.tree()
            .query_selector_all(element, ".carousel-indicators > [data-bs-slide-to]")
            .unwrap_or_default()
    }

    /// `data-bs-{key}` of the carousel root, by dataset key (`bsWrap`)
    fn setting(&self, doc: &Document, key: &str) -> Option<String> {
        let dataset = doc.tree().element(self.element)?.dataset();
        dataset.get(key).map(str::to_string)
    }

    fn wraps(&self, doc: &Document) -> bool {
        self.setting(doc, "bsWrap").as_deref() != Some("false")
    }

    fn move_active(&self, doc: &mut Document, from: usize, to: usize) -> DomResult<()> {
        let items = Self::items(doc, self.element);
        let indicators = Self::indicators(doc, self.element);
        let tree = doc.tree_mut();

        if let (Some(&old), Some(&new)) = (items.get(from), items.get(to)) {
            tree.remove_class(old, &["active"])?;
            tree.add_class(new, &["active"])?;
        }
        if let (Some(&old), Some(&new)) = (indicators.get(from), indicators.get(to)) {
            tree.remove_class(old, &["active"])?;
            tree.remove_attribute(old, "aria-current")?;
            tree.add_class(new, &["active"])?;
            tree.set_attribute(new, "aria-current", "true")?;
        }
        Ok(())
    }
}

impl CarouselBehavior for HeadlessCarousel {
    fn next(&mut self, doc: &mut Document) {
        let count = Self::items(doc, self.element).len();
        if self.active + 1 < count {
            self.to(doc, self.active + 1);
        } else if self.wraps(doc) {
            self.to(doc, 0);
        }
    }

    fn prev(&mut self, doc: &mut Document) {
        let count = Self::items(doc, self.element).len();
        if self.active > 0 {
            self.to(doc, self.active - 1);
        } else if self.wraps(doc) && count > 0 {
            self.to(doc, count - 1);
        }
    }

    fn to(&mut self, doc: &mut Document, index: usize) {
        let count = Self::items(doc, self.element).len();
        if index >= count || index == self.active {
            return;
        }
        doc.dispatch_event(&DomEvent::new(events::CAROUSEL_SLIDE, self.element).bubbling());
        if let Err(err) = self.move_active(doc, self.active, index) {
            tracing::warn!("Carousel {} could not slide: {}", self.element, err);
            return;
        }
        self.active = index;
        doc.dispatch_event(&DomEvent::new(events::CAROUSEL_SLID, self.element).bubbling());
    }

    fn pause(&mut self) {
        self.cycling = false;
    }

    fn cycle(&mut self) {
        self.cycling = true;
    }

    fn active_index(&self) -> usize {
        self.active
    }

    fn is_cycling(&self) -> bool {
        self.cycling
    }

    fn current_interval(&self, doc: &Document) -> Option<u32> {
        if !self.cycling {
            return None;
        }
        let tree = doc.tree();
        let item_interval = Self::items(doc, self.element)
            .get(self.active)
            .and_then(|&item| tree.get_attribute(item, "data-bs-interval"))
            .and_then(|v| v.parse().ok());
        let root_interval = self.setting(doc, "bsInterval").and_then(|v| v.parse().ok());
        Some(item_interval.or(root_interval).unwrap_or(DEFAULT_INTERVAL_MS))
    }
}
