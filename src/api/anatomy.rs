//! JavaScript-facing anatomy widget
//!
//! `ComponentAnatomy` is instantiated once per host element. The host page
//! (typically a custom-element shim) forwards attribute changes through
//! `attributeChangedCallback`; the widget mirrors its persisted attributes
//! back onto the host after every render.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use super::helpers::{deserialize_lenient, index_from_js, serialize};
use crate::dom::{DomMount, EventBindings};
use crate::models::{DefinitionDraft, DefinitionPatch, DefinitionRecord};
use crate::widget::config::{ATTR_DEFINITIONS, ATTR_EDIT, ATTR_ORIENTATION, ATTR_PLACEHOLDER};
use crate::widget::{AnatomyWidget, SubscriptionId, OBSERVED_ATTRIBUTES};
use crate::{wasm_error, wasm_log, wasm_warn};

/// Attributes mirrored onto the host element
const REFLECTED_ATTRIBUTES: [&str; 4] = [ATTR_DEFINITIONS, ATTR_EDIT, ATTR_PLACEHOLDER, ATTR_ORIENTATION];

struct Mounted {
    widget: Rc<RefCell<AnatomyWidget>>,
    mount: Rc<RefCell<DomMount>>,
    subscription: SubscriptionId,
    _events: EventBindings,
}

/// One anatomy widget bound to a host element
///
/// Mutating methods return the instance so calls can be chained from JS.
#[wasm_bindgen]
#[derive(Clone)]
pub struct ComponentAnatomy {
    inner: Rc<RefCell<Option<Mounted>>>,
    widget: Rc<RefCell<AnatomyWidget>>,
}

#[wasm_bindgen]
impl ComponentAnatomy {
    /// Mount onto `host`, reading its current attributes
    #[wasm_bindgen(constructor)]
    pub fn new(host: Element) -> Result<ComponentAnatomy, JsValue> {
        let mount = DomMount::attach(&host)?;
        let widget = Rc::new(RefCell::new(AnatomyWidget::new()));

        {
            let mut w = widget.borrow_mut();
            for name in REFLECTED_ATTRIBUTES {
                if let Some(value) = host.get_attribute(name) {
                    w.set_attribute(name, &value);
                }
            }
        }

        let events = EventBindings::bind(&widget, &mount)?;
        let mount = Rc::new(RefCell::new(mount));

        let painter = Rc::clone(&mount);
        let subscription = widget.borrow_mut().subscribe(move |w| {
            let Ok(mut mount) = painter.try_borrow_mut() else {
                wasm_warn!("repaint skipped: mount busy");
                return;
            };
            if let Err(e) = mount.paint(w.view()) {
                wasm_error!("repaint failed: {}", e);
            }
            for name in REFLECTED_ATTRIBUTES {
                if let Err(e) = mount.reflect_attribute(name, w.attribute(name).as_deref()) {
                    wasm_error!("failed to reflect '{}': {}", name, e);
                }
            }
        });

        wasm_log!("component-anatomy mounted");

        Ok(ComponentAnatomy {
            inner: Rc::new(RefCell::new(Some(Mounted {
                widget: Rc::clone(&widget),
                mount,
                subscription,
                _events: events,
            }))),
            widget,
        })
    }

    /// Attribute names the host should forward changes for
    #[wasm_bindgen(js_name = observedAttributes)]
    pub fn observed_attributes() -> Vec<JsValue> {
        OBSERVED_ATTRIBUTES
            .iter()
            .chain(std::iter::once(&ATTR_PLACEHOLDER))
            .map(|name| JsValue::from_str(name))
            .collect()
    }

    /// Forward a host attribute change
    ///
    /// Changes the widget made itself (reflection) are recognized and skipped.
    #[wasm_bindgen(js_name = attributeChangedCallback)]
    pub fn attribute_changed_callback(&self, name: &str, _old: Option<String>, value: Option<String>) {
        let Ok(mut widget) = self.widget.try_borrow_mut() else {
            return;
        };
        if widget.attribute(name) == value {
            return;
        }
        match value {
            Some(v) => widget.set_attribute(name, &v),
            None => widget.remove_attribute(name),
        };
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    #[wasm_bindgen(getter)]
    pub fn definitions(&self) -> Result<JsValue, JsValue> {
        serialize(&self.widget.borrow().definitions(), "definitions")
    }

    /// Replace the whole list
    ///
    /// Elements that are not valid definitions are dropped one by one; a
    /// value that is not an array leaves the list untouched. `null` clears it.
    #[wasm_bindgen(setter)]
    pub fn set_definitions(&self, value: JsValue) {
        if value.is_null() || value.is_undefined() {
            self.widget.borrow_mut().set_definitions(Vec::new());
            return;
        }
        let Ok(items) = value.dyn_into::<js_sys::Array>() else {
            wasm_warn!("definitions: expected an array, assignment ignored");
            return;
        };

        let total = items.length();
        let records: Vec<DefinitionRecord> = items
            .iter()
            .filter_map(|item| deserialize_lenient::<DefinitionDraft>(item, "definitions"))
            .filter_map(DefinitionDraft::into_record)
            .collect();
        if records.len() < total as usize {
            wasm_warn!("definitions: dropped {} invalid of {}", total as usize - records.len(), total);
        }
        self.widget.borrow_mut().set_definitions(records);
    }

    #[wasm_bindgen(getter)]
    pub fn edit(&self) -> bool {
        self.widget.borrow().edit()
    }

    #[wasm_bindgen(setter)]
    pub fn set_edit(&self, edit: bool) {
        self.widget.borrow_mut().set_edit(edit);
    }

    #[wasm_bindgen(getter)]
    pub fn placeholder(&self) -> String {
        self.widget.borrow().placeholder().to_string()
    }

    #[wasm_bindgen(setter)]
    pub fn set_placeholder(&self, placeholder: Option<String>) {
        let mut widget = self.widget.borrow_mut();
        match placeholder.as_deref() {
            Some(p) => widget.set_attribute(ATTR_PLACEHOLDER, p),
            None => widget.remove_attribute(ATTR_PLACEHOLDER),
        };
    }

    #[wasm_bindgen(getter)]
    pub fn orientation(&self) -> String {
        self.widget.borrow().orientation().to_string()
    }

    #[wasm_bindgen(setter)]
    pub fn set_orientation(&self, orientation: Option<String>) {
        self.widget.borrow_mut().set_orientation(orientation.as_deref());
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Append `{ x, y, term }`; invalid payloads are ignored
    pub fn create(&self, payload: JsValue) -> ComponentAnatomy {
        if let Some(draft) = deserialize_lenient::<DefinitionDraft>(payload, "create") {
            self.widget.borrow_mut().create(draft);
        }
        self.clone()
    }

    /// Remove the definition at `index`
    pub fn remove(&self, index: f64) -> ComponentAnatomy {
        match index_from_js(index) {
            Some(i) => {
                self.widget.borrow_mut().remove(i);
            }
            None => wasm_warn!("remove: invalid index {}", index),
        }
        self.clone()
    }

    /// Merge `payload` into the definition at `index`
    pub fn update(&self, index: f64, payload: JsValue) -> ComponentAnatomy {
        let Some(i) = index_from_js(index) else {
            wasm_warn!("update: invalid index {}", index);
            return self.clone();
        };
        if let Some(patch) = deserialize_lenient::<DefinitionPatch>(payload, "update") {
            self.widget.borrow_mut().update(i, patch);
        }
        self.clone()
    }

    /// Remove every definition
    pub fn clear(&self) -> ComponentAnatomy {
        self.widget.borrow_mut().clear();
        self.clone()
    }

    /// Last rendered display list, for hosts that render themselves
    #[wasm_bindgen(js_name = getView)]
    pub fn get_view(&self) -> Result<JsValue, JsValue> {
        serialize(self.widget.borrow().view(), "view")
    }

    /// Tear down listeners and rendered nodes; the instance becomes inert
    pub fn detach(&self) {
        let Some(mounted) = self.inner.borrow_mut().take() else {
            return;
        };
        let mut widget = mounted.widget.borrow_mut();
        widget.unsubscribe(mounted.subscription);
        widget.detach();
        mounted.mount.borrow_mut().clear();
        wasm_log!("component-anatomy detached");
    }
}
