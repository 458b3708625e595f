//! Carousel builder
//!
//! Slides go into `.carousel-inner`; indicators and prev/next controls are
//! only emitted when there is more than one slide. Root `data-bs-*`
//! attributes appear only where the configuration departs from the
//! runtime's defaults.

use bsm_dom::{Document, DomResult, DomTree, NodeId};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::content::{Content, render_into};
use crate::id::{IdGenerator, generate_id};
use crate::options::{MergeOptions, widget_options};
use crate::runtime::{BehaviorRuntime, CarouselBehavior, DEFAULT_INTERVAL_MS};
use crate::target::{Target, attach};
use crate::BuildError;

const BUILDER: &str = "createCarousel";
const ID_PREFIX: &str = "carousel";

/// Auto-advance delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Millis(u32),
    /// No automatic cycling
    Disabled,
}

impl Default for Interval {
    fn default() -> Self {
        Self::Millis(DEFAULT_INTERVAL_MS)
    }
}

impl From<u32> for Interval {
    fn from(ms: u32) -> Self {
        Self::Millis(ms)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInterval {
    Millis(u32),
    Fractional(f64),
    Flag(bool),
    Other(IgnoredAny),
}

impl RawInterval {
    /// `None` for values that are not a delay at all
    fn into_interval(self) -> Option<Interval> {
        match self {
            Self::Millis(ms) => Some(Interval::Millis(ms)),
            Self::Fractional(ms) if ms.is_finite() && ms >= 0.0 => {
                Some(Interval::Millis(ms.round().min(f64::from(u32::MAX)) as u32))
            }
            Self::Flag(true) => Some(Interval::default()),
            Self::Flag(false) => Some(Interval::Disabled),
            Self::Fractional(_) | Self::Other(_) => {
                tracing::debug!("Ignoring interval that is not a non-negative number or flag");
                None
            }
        }
    }
}

/// A number of milliseconds, or `false`; `true` means the default delay.
/// Fractions are rounded; anything else falls back to the default.
impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawInterval::deserialize(deserializer).map(|raw| raw.into_interval().unwrap_or_default())
    }
}

/// Per-slide delay; a malformed value leaves the slide on the carousel's delay
fn item_interval<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Interval>, D::Error> {
    Option::<RawInterval>::deserialize(deserializer).map(|raw| raw.and_then(RawInterval::into_interval))
}

/// Whether hovering pauses cycling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PauseOnHover {
    #[default]
    Hover,
    Never,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPause {
    Mode(String),
    Flag(bool),
}

/// Anything but the string `"hover"` disables pausing
impl<'de> Deserialize<'de> for PauseOnHover {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawPause::deserialize(deserializer)? {
            RawPause::Mode(mode) if mode == "hover" => Self::Hover,
            _ => Self::Never,
        })
    }
}

/// One slide
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CarouselItem {
    pub content: Content,
    /// Caption overlay; empty markup means none
    pub caption: Option<Content>,
    /// Per-slide delay overriding the carousel's
    #[serde(deserialize_with = "item_interval")]
    pub interval: Option<Interval>,
}

impl CarouselItem {
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn caption(mut self, caption: impl Into<Content>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    #[must_use]
    pub fn interval(mut self, interval: impl Into<Interval>) -> Self {
        self.interval = Some(interval.into());
        self
    }
}

widget_options! {
    /// Effective carousel configuration
    pub struct CarouselConfig =>
    /// Carousel overrides
    pub struct CarouselOptions {
        id: String,
        items: Vec<CarouselItem>,
        /// Region the carousel replaces the contents of
        target: Option<Target>,
        indicators: bool,
        controls: bool,
        /// Crossfade instead of sliding
        animate: bool,
        pause_on_hover: PauseOnHover,
        wrap: bool,
        keyboard: bool,
        interval: Interval,
        dark_mode: bool,
        touch: bool,
        /// Create a behavior instance
        initialize: bool,
    }
}

impl CarouselConfig {
    /// Defaults with the given element id
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            items: Vec::new(),
            target: None,
            indicators: true,
            controls: true,
            animate: false,
            pause_on_hover: PauseOnHover::Hover,
            wrap: true,
            keyboard: true,
            interval: Interval::default(),
            dark_mode: false,
            touch: true,
            initialize: true,
        }
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::with_id(generate_id(ID_PREFIX))
    }
}

/// A built carousel; both fields are `None` when nothing was built
#[derive(Debug, Default)]
pub struct CarouselHandle {
    /// The `.carousel` root element
    pub element: Option<NodeId>,
    /// Behavior created by the runtime, absent unless `initialize` was set
    pub instance: Option<Box<dyn CarouselBehavior>>,
}

impl CarouselHandle {
    /// Advance one slide; a no-op without an instance
    pub fn next(&mut self, doc: &mut Document) {
        if let Some(instance) = &mut self.instance {
            instance.next(doc);
        }
    }

    pub fn prev(&mut self, doc: &mut Document) {
        if let Some(instance) = &mut self.instance {
            instance.prev(doc);
        }
    }

    /// Jump to slide `index`
    pub fn to(&mut self, doc: &mut Document, index: usize) {
        if let Some(instance) = &mut self.instance {
            instance.to(doc, index);
        }
    }
}

/// Build a carousel, create its behavior instance when `initialize` is set,
/// and attach it to the target when one is set.
pub fn create_carousel(
    doc: &mut Document,
    runtime: &dyn BehaviorRuntime,
    ids: &mut IdGenerator,
    options: CarouselOptions,
) -> CarouselHandle {
    let config = CarouselConfig::with_id(ids.next_id(ID_PREFIX)).merge(options);

    if config.items.is_empty() {
        tracing::error!(
            "{}",
            BuildError::Empty {
                builder: BUILDER,
                item: "item",
                field: "items",
            }
        );
        return CarouselHandle::default();
    }

    let element = doc.tree_mut().create_element("div");
    if let Err(err) = populate(doc.tree_mut(), element, &config) {
        tracing::error!("{}: {}", BUILDER, err);
    }
    tracing::debug!("Built carousel #{} with {} slides", config.id, config.items.len());

    let instance = config.initialize.then(|| runtime.carousel(doc, element));

    if let Some(target) = &config.target
        && let Err(err) = attach(doc, target, element, BUILDER)
    {
        tracing::error!("{}", err);
    }

    CarouselHandle {
        element: Some(element),
        instance,
    }
}

fn populate(tree: &mut DomTree, root: NodeId, config: &CarouselConfig) -> DomResult<()> {
    let target_ref = format!("#{}", config.id);
    let multiple = config.items.len() > 1;

    tree.set_attribute(root, "id", &config.id)?;
    tree.add_class(root, &["carousel", "slide"])?;
    if config.animate {
        tree.add_class(root, &["carousel-fade"])?;
    }
    if config.dark_mode {
        tree.add_class(root, &["carousel-dark"])?;
    }

    match config.interval {
        Interval::Disabled => tree.set_attribute(root, "data-bs-ride", "false")?,
        Interval::Millis(ms) => {
            tree.set_attribute(root, "data-bs-ride", "carousel")?;
            if ms != DEFAULT_INTERVAL_MS {
                tree.set_attribute(root, "data-bs-interval", &ms.to_string())?;
            }
        }
    }
    if config.pause_on_hover != PauseOnHover::Hover {
        tree.set_attribute(root, "data-bs-pause", "false")?;
    }
    if !config.wrap {
        tree.set_attribute(root, "data-bs-wrap", "false")?;
    }
    if !config.keyboard {
        tree.set_attribute(root, "data-bs-keyboard", "false")?;
    }
    if !config.touch {
        tree.set_attribute(root, "data-bs-touch", "false")?;
    }

    if config.indicators && multiple {
        let indicators = tree.create_element("div");
        tree.add_class(indicators, &["carousel-indicators"])?;
        for index in 0..config.items.len() {
            let button = tree.create_element("button");
            tree.set_attribute(button, "type", "button")?;
            tree.set_attribute(button, "data-bs-target", &target_ref)?;
            tree.set_attribute(button, "data-bs-slide-to", &index.to_string())?;
            tree.set_attribute(button, "aria-label", &format!("Slide {}", index + 1))?;
            if index == 0 {
                tree.add_class(button, &["active"])?;
                tree.set_attribute(button, "aria-current", "true")?;
            }
            tree.append_child(indicators, button)?;
        }
        tree.append_child(root, indicators)?;
    }

    let inner = tree.create_element("div");
    tree.add_class(inner, &["carousel-inner"])?;
    for (index, item) in config.items.iter().enumerate() {
        let slide = tree.create_element("div");
        tree.add_class(slide, &["carousel-item"])?;
        if index == 0 {
            tree.add_class(slide, &["active"])?;
        }
        if let Some(Interval::Millis(ms)) = item.interval {
            tree.set_attribute(slide, "data-bs-interval", &ms.to_string())?;
        }
        render_into(tree, slide, &item.content)?;

        if let Some(caption) = &item.caption
            && !caption.is_empty_markup()
        {
            let overlay = tree.create_element("div");
            tree.add_class(overlay, &["carousel-caption", "d-none", "d-md-block"])?;
            render_into(tree, overlay, caption)?;
            tree.append_child(slide, overlay)?;
        }

        tree.append_child(inner, slide)?;
    }
    tree.append_child(root, inner)?;

    if config.controls && multiple {
        for (direction, label) in [("prev", "Previous"), ("next", "Next")] {
            let class = format!("carousel-control-{direction}");
            let button = tree.create_element("button");
            tree.add_class(button, &[class.as_str()])?;
            tree.set_attribute(button, "type", "button")?;
            tree.set_attribute(button, "data-bs-target", &target_ref)?;
            tree.set_attribute(button, "data-bs-slide", direction)?;
            bsm_html::append_html(
                tree,
                button,
                &format!(
                    r#"<span class="carousel-control-{direction}-icon" aria-hidden="true"></span><span class="visually-hidden">{label}</span>"#
                ),
            )?;
            tree.append_child(root, button)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::HeadlessRuntime;

    fn slides(n: usize) -> Vec<CarouselItem> {
        (0..n).map(|i| CarouselItem::new(format!("<img src=\"{i}.png\">"))).collect()
    }

    fn build(options: CarouselOptions) -> (Document, CarouselHandle) {
        let mut doc = Document::default();
        let mut ids = IdGenerator::seeded(5);
        let handle = create_carousel(&mut doc, &HeadlessRuntime, &mut ids, options);
        (doc, handle)
    }

    #[test]
    fn test_default_root_attributes() {
        let (doc, handle) = build(CarouselOptions::default().id("c").items(slides(3)));
        let root = handle.element.unwrap();
        let tree = doc.tree();

        assert_eq!(tree.get_attribute(root, "class"), Some("carousel slide"));
        assert_eq!(tree.get_attribute(root, "data-bs-ride"), Some("carousel"));
        for absent in ["data-bs-interval", "data-bs-pause", "data-bs-wrap", "data-bs-keyboard", "data-bs-touch"] {
            assert_eq!(tree.get_attribute(root, absent), None, "{absent}");
        }
        assert!(handle.instance.is_some());
    }

    #[test]
    fn test_deviations_emit_attributes() {
        let (doc, handle) = build(
            CarouselOptions::default()
                .items(slides(2))
                .interval(3000u32)
                .pause_on_hover(PauseOnHover::Never)
                .wrap(false)
                .keyboard(false)
                .touch(false)
                .animate(true)
                .dark_mode(true),
        );
        let root = handle.element.unwrap();
        let tree = doc.tree();
        assert_eq!(tree.get_attribute(root, "class"), Some("carousel slide carousel-fade carousel-dark"));
        assert_eq!(tree.get_attribute(root, "data-bs-interval"), Some("3000"));
        assert_eq!(tree.get_attribute(root, "data-bs-pause"), Some("false"));
        assert_eq!(tree.get_attribute(root, "data-bs-wrap"), Some("false"));
        assert_eq!(tree.get_attribute(root, "data-bs-keyboard"), Some("false"));
        assert_eq!(tree.get_attribute(root, "data-bs-touch"), Some("false"));
    }

    #[test]
    fn test_disabled_interval() {
        let (doc, handle) = build(CarouselOptions::default().items(slides(2)).interval(Interval::Disabled));
        let root = handle.element.unwrap();
        assert_eq!(doc.tree().get_attribute(root, "data-bs-ride"), Some("false"));
        assert_eq!(doc.tree().get_attribute(root, "data-bs-interval"), None);
    }

    #[test]
    fn test_single_slide_has_no_chrome() {
        let (doc, handle) = build(CarouselOptions::default().items(slides(1)));
        let root = handle.element.unwrap();
        let tree = doc.tree();
        assert!(tree.query_selector(root, ".carousel-indicators").unwrap().is_none());
        assert!(tree.query_selector(root, ".carousel-control-prev").unwrap().is_none());
        assert_eq!(tree.element_children(root).len(), 1);
    }

    #[test]
    fn test_slides_and_captions() {
        let items = vec![
            CarouselItem::new("<b>a</b>").caption("<h5>First</h5>").interval(1000u32),
            CarouselItem::new("<b>b</b>").caption(""),
            CarouselItem::new("<b>c</b>").interval(Interval::Disabled),
        ];
        let (doc, handle) = build(CarouselOptions::default().items(items));
        let tree = doc.tree();
        let slides = tree.query_selector_all(handle.element.unwrap(), ".carousel-item").unwrap();

        assert_eq!(tree.get_attribute(slides[0], "class"), Some("carousel-item active"));
        assert_eq!(tree.get_attribute(slides[0], "data-bs-interval"), Some("1000"));
        assert_eq!(tree.get_attribute(slides[2], "data-bs-interval"), None);
        let captions = tree.query_selector_all(handle.element.unwrap(), ".carousel-caption").unwrap();
        assert_eq!(captions.len(), 1);
        assert_eq!(tree.get_attribute(captions[0], "class"), Some("carousel-caption d-none d-md-block"));
    }

    #[test]
    fn test_controls_markup() {
        let (doc, handle) = build(CarouselOptions::default().id("c").items(slides(2)));
        let tree = doc.tree();
        let prev = tree.query_selector(handle.element.unwrap(), ".carousel-control-prev").unwrap().unwrap();
        assert_eq!(
            bsm_html::outer_html(tree, prev),
            concat!(
                r##"<button class="carousel-control-prev" type="button" data-bs-target="#c" data-bs-slide="prev">"##,
                r#"<span class="carousel-control-prev-icon" aria-hidden="true"></span>"#,
                r#"<span class="visually-hidden">Previous</span></button>"#
            )
        );
    }

    #[test]
    fn test_empty_items() {
        let (_, handle) = build(CarouselOptions::default());
        assert!(handle.element.is_none());
        assert!(handle.instance.is_none());
    }

    #[test]
    fn test_not_initialized() {
        let (_, handle) = build(CarouselOptions::default().items(slides(2)).initialize(false));
        assert!(handle.element.is_some());
        assert!(handle.instance.is_none());
    }

    #[test]
    fn test_deserialize_interval_and_pause() {
        let options: CarouselOptions = serde_json::from_str(
            r#"{"interval":false,"pauseOnHover":false,"items":[{"content":"x","interval":2500}]}"#,
        )
        .unwrap();
        assert_eq!(options.interval, Some(Interval::Disabled));
        assert_eq!(options.pause_on_hover, Some(PauseOnHover::Never));
        assert_eq!(options.items.unwrap()[0].interval, Some(Interval::Millis(2500)));

        let options: CarouselOptions = serde_json::from_str(r#"{"interval":true,"pauseOnHover":"hover"}"#).unwrap();
        assert_eq!(options.interval, Some(Interval::Millis(5000)));
        assert_eq!(options.pause_on_hover, Some(PauseOnHover::Hover));
    }

    #[test]
    fn test_deserialize_malformed_intervals() {
        let options: CarouselOptions = serde_json::from_str(
            r#"{"interval":-20,"items":[{"content":"a","interval":1500.6},{"content":"b","interval":"soon"},{"content":"c"}]}"#,
        )
        .unwrap();
        assert_eq!(options.interval, Some(Interval::Millis(DEFAULT_INTERVAL_MS)));
        let items = options.items.unwrap();
        assert_eq!(items[0].interval, Some(Interval::Millis(1501)));
        assert_eq!(items[1].interval, None);
        assert_eq!(items[2].interval, None);

        let options: CarouselOptions = serde_json::from_str(r#"{"interval":{"ms":1}}"#).unwrap();
        assert_eq!(options.interval, Some(Interval::default()));
    }
}
