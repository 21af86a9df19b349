//! Anatomy widget state container
//!
//! One [`AnatomyWidget`] per mount point. It owns the definition store and the
//! widget configuration, exposes them through string attributes, and
//! re-renders synchronously after every change. Subscribers see the widget
//! with its new [`AnatomyView`] before the mutating call returns.

pub mod config;
pub mod controller;

pub use config::{WidgetConfig, DEFAULT_PLACEHOLDER, OBSERVED_ATTRIBUTES};
pub use controller::PointerClick;

use config::{ATTR_DEFINITIONS, ATTR_EDIT, ATTR_ORIENTATION, ATTR_PLACEHOLDER};

use crate::html_layout::{render, AnatomyView, RenderOptions};
use crate::models::{DefinitionDraft, DefinitionList, DefinitionPatch, DefinitionRecord, Orientation};
use crate::store::DefinitionStore;

/// Callback invoked after every render
pub type Listener = Box<dyn FnMut(&AnatomyWidget)>;

/// Handle returned by [`AnatomyWidget::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

pub struct AnatomyWidget {
    store: DefinitionStore,
    config: WidgetConfig,
    /// Pin marked `aria-current`
    current: Option<usize>,
    view: AnatomyView,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: usize,
    renders: u64,
}

impl Default for AnatomyWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnatomyWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnatomyWidget")
            .field("store", &self.store)
            .field("config", &self.config)
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .field("renders", &self.renders)
            .finish()
    }
}

impl AnatomyWidget {
    /// Mount an empty widget
    pub fn new() -> Self {
        Self {
            store: DefinitionStore::new(),
            config: WidgetConfig::new(),
            current: None,
            view: AnatomyView::default(),
            listeners: Vec::new(),
            next_subscription: 0,
            renders: 0,
        }
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    /// Register a listener; it is called with the current state right away
    pub fn subscribe(&mut self, mut listener: impl FnMut(&AnatomyWidget) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        listener(self);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Current value of a host attribute, `None` when absent
    pub fn attribute(&self, name: &str) -> Option<String> {
        match name {
            ATTR_DEFINITIONS => self.store.transport().map(str::to_string),
            ATTR_EDIT => self.config.edit.then(String::new),
            ATTR_PLACEHOLDER => self.config.placeholder_attribute().map(str::to_string),
            ATTR_ORIENTATION => self.config.orientation_attribute().map(|o| o.to_string()),
            _ => None,
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Set a host attribute; unknown names are ignored
    pub fn set_attribute(&mut self, name: &str, value: &str) -> &mut Self {
        self.write_attribute(name, Some(value))
    }

    pub fn remove_attribute(&mut self, name: &str) -> &mut Self {
        self.write_attribute(name, None)
    }

    fn write_attribute(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        match name {
            ATTR_DEFINITIONS => self.store.set_transport(value.map(str::to_string)),
            ATTR_EDIT => self.config.edit = value.is_some(),
            ATTR_PLACEHOLDER => self.config.set_placeholder(value),
            ATTR_ORIENTATION => {
                self.config.set_orientation(value);
            }
            other => {
                log::debug!("ignoring unknown attribute '{}'", other);
                return self;
            }
        }

        self.attribute_changed(name);
        self
    }

    /// Dispatch for observed attributes
    fn attribute_changed(&mut self, name: &str) {
        match name {
            ATTR_DEFINITIONS => self.refresh(true),
            ATTR_EDIT | ATTR_ORIENTATION => self.refresh(false),
            // not rendered, but subscribers still mirror it
            ATTR_PLACEHOLDER => self.notify(),
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Property accessors
    // ------------------------------------------------------------------

    /// Decoded definitions
    pub fn definitions(&self) -> DefinitionList {
        self.store.get()
    }

    /// Replace all definitions; an empty list removes the attribute
    pub fn set_definitions(&mut self, list: impl IntoIterator<Item = DefinitionRecord>) -> &mut Self {
        self.store.set(list);
        self.refresh(true);
        self
    }

    pub fn edit(&self) -> bool {
        self.config.edit
    }

    pub fn set_edit(&mut self, edit: bool) -> &mut Self {
        self.config.edit = edit;
        self.attribute_changed(ATTR_EDIT);
        self
    }

    pub fn placeholder(&self) -> &str {
        self.config.placeholder()
    }

    pub fn set_placeholder(&mut self, placeholder: Option<&str>) -> &mut Self {
        self.config.set_placeholder(placeholder);
        self.attribute_changed(ATTR_PLACEHOLDER);
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.config.orientation()
    }

    pub fn set_orientation(&mut self, orientation: Option<&str>) -> &mut Self {
        self.config.set_orientation(orientation);
        self.attribute_changed(ATTR_ORIENTATION);
        self
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Public operations
    // ------------------------------------------------------------------

    /// Append a definition; invalid drafts are ignored
    pub fn create(&mut self, draft: impl Into<DefinitionDraft>) -> &mut Self {
        self.store.create(draft.into());
        self.refresh(true);
        self
    }

    /// Remove the definition at `index`; out-of-range is ignored
    pub fn remove(&mut self, index: usize) -> &mut Self {
        self.store.remove(index);
        self.refresh(true);
        self
    }

    /// Merge `patch` into the definition at `index`
    pub fn update(&mut self, index: usize, patch: DefinitionPatch) -> &mut Self {
        self.store.update(index, &patch);
        self.refresh(true);
        self
    }

    /// Remove every definition and the persisted attribute
    pub fn clear(&mut self) -> &mut Self {
        self.store.clear();
        self.refresh(true);
        self
    }

    /// Drop all state, as when the widget is detached
    pub fn detach(&mut self) {
        self.store.clear();
        self.current = None;
        self.view = AnatomyView::default();
        self.listeners.clear();
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Last rendered view
    pub fn view(&self) -> &AnatomyView {
        &self.view
    }

    /// Number of full renders so far
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Rebuild both projections and notify subscribers
    ///
    /// Data changes reset the current pin since indices may have shifted.
    fn refresh(&mut self, data_changed: bool) {
        let list = self.store.get();
        if data_changed || self.current.is_some_and(|i| i >= list.len()) {
            self.current = None;
        }

        let options = RenderOptions {
            edit: self.config.edit,
            orientation: self.config.orientation(),
            current: self.current,
        };
        self.view = render(&list, &options);
        self.renders += 1;
        self.notify();
    }

    fn notify(&mut self) {
        // listeners cannot reach back into the widget mutably
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in listeners.iter_mut() {
            listener(self);
        }
        self.listeners = listeners;
    }
}
