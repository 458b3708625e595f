//! Bootstrap Manager
//!
//! Builds Bootstrap 5 modal, tab group and carousel markup into a
//! [`bsm_dom::Document`] and hands the result to a behavior runtime.
//!
//! ```
//! use bootstrap_manager::{BootstrapManager, ModalOptions};
//! use bootstrap_manager::dom::Document;
//!
//! let mut doc = Document::default();
//! let mut manager = BootstrapManager::headless();
//! let mut modal = manager.create_modal(&mut doc, ModalOptions::default().title("Hi"));
//! modal.show(&mut doc);
//! assert!(modal.is_shown());
//! ```

mod carousel;
mod content;
mod error;
mod id;
mod manager;
mod modal;
mod options;
mod tabs;
mod target;

pub mod runtime;

pub use bsm_dom as dom;
pub use bsm_html as html;

pub use carousel::{
    CarouselConfig, CarouselHandle, CarouselItem, CarouselOptions, Interval, PauseOnHover, create_carousel,
};
pub use content::Content;
pub use error::BuildError;
pub use id::{DEFAULT_PREFIX, IdGenerator, generate_id};
pub use manager::{BootstrapManager, HostScope};
pub use modal::{Backdrop, CleanupPolicy, Footer, ModalConfig, ModalHandle, ModalOptions, ModalSize, create_modal};
pub use options::{MergeOptions, merge_options};
pub use runtime::{BehaviorRuntime, CarouselBehavior, HeadlessRuntime, ModalBehavior};
pub use tabs::{TabItem, TabsConfig, TabsOptions, create_tabs, normalize_active};
pub use target::{Target, resolve_target};
