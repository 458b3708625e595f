//! Facade
//!
//! [`BootstrapManager`] bundles a behavior runtime and an ID source so
//! callers build widgets with one call each. Hosts that want it reachable by
//! name register it in a [`HostScope`].

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use bsm_dom::{Document, NodeId};

use crate::carousel::{CarouselHandle, CarouselOptions, create_carousel};
use crate::id::IdGenerator;
use crate::modal::{ModalHandle, ModalOptions, create_modal};
use crate::runtime::{BehaviorRuntime, HeadlessRuntime};
use crate::tabs::{TabsOptions, create_tabs};

/// Widget builders sharing one runtime and one ID generator
#[derive(Debug)]
pub struct BootstrapManager {
    runtime: Box<dyn BehaviorRuntime>,
    ids: IdGenerator,
}

impl BootstrapManager {
    /// Name the manager is registered under in a [`HostScope`]
    pub const NAMESPACE: &'static str = "BootstrapManager";

    pub fn new(runtime: Box<dyn BehaviorRuntime>) -> Self {
        Self {
            runtime,
            ids: IdGenerator::new(),
        }
    }

    /// Manager backed by [`HeadlessRuntime`]
    pub fn headless() -> Self {
        Self::new(Box::new(HeadlessRuntime))
    }

    /// Swap the ID source, e.g. for a seeded one
    #[must_use]
    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn runtime(&self) -> &dyn BehaviorRuntime {
        self.runtime.as_ref()
    }

    pub fn create_modal(&mut self, doc: &mut Document, options: ModalOptions) -> ModalHandle {
        create_modal(doc, self.runtime.as_ref(), &mut self.ids, options)
    }

    pub fn create_tabs(&mut self, doc: &mut Document, options: TabsOptions) -> Option<NodeId> {
        create_tabs(doc, &mut self.ids, options)
    }

    pub fn create_carousel(&mut self, doc: &mut Document, options: CarouselOptions) -> CarouselHandle {
        create_carousel(doc, self.runtime.as_ref(), &mut self.ids, options)
    }

    /// Install this manager in `scope` under [`Self::NAMESPACE`],
    /// replacing any previous one
    pub fn register(self, scope: &mut HostScope) {
        if scope.install(Self::NAMESPACE, self).is_some() {
            tracing::debug!("Replaced registered {}", Self::NAMESPACE);
        }
    }
}

impl Default for BootstrapManager {
    fn default() -> Self {
        Self::headless()
    }
}

/// Named values a host exposes to its scripts or plugins
#[derive(Default)]
pub struct HostScope {
    entries: HashMap<String, Box<dyn Any>>,
}

impl HostScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `name`, returning whatever was there before
    pub fn install<T: Any>(&mut self, name: &str, value: T) -> Option<Box<dyn Any>> {
        self.entries.insert(name.to_string(), Box::new(value))
    }

    /// Value under `name`, if present and of type `T`
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.entries.get(name)?.downcast_ref()
    }

    pub fn get_mut<T: Any>(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(name)?.downcast_mut()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Any>> {
        self.entries.remove(name)
    }

    /// The registered manager, if any
    pub fn manager(&mut self) -> Option<&mut BootstrapManager> {
        self.get_mut(BootstrapManager::NAMESPACE)
    }
}

impl fmt::Debug for HostScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.entries.keys().collect();
        names.sort();
        f.debug_struct("HostScope").field("names", &names).finish()
    }
}
