//! DOM adapter for the anatomy widget
//!
//! Writes an [`AnatomyView`] into a shadow root attached to the host element
//! and routes delegated DOM events back into the widget. All DOM access in the
//! crate goes through this module.

pub mod events;
pub mod styles;

pub use events::EventBindings;

use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ShadowRootInit, ShadowRootMode};

use crate::html_layout::{AnatomyView, RenderEntry, RenderPin};
use crate::text::Segment;

pub const CONTAINER_ID: &str = "component-anatomy";
pub const AREA_ID: &str = "area";
pub const PINS_ID: &str = "pins";
pub const LIST_ID: &str = "list";

/// Failures while mounting into the host page
#[derive(Debug, Error)]
pub enum MountError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("failed to attach shadow root: {0}")]
    ShadowRoot(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl From<JsValue> for MountError {
    fn from(value: JsValue) -> Self {
        MountError::Dom(format!("{:?}", value))
    }
}

impl From<MountError> for JsValue {
    fn from(error: MountError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

/// Handles to the shadow-root nodes the widget writes into
pub struct DomMount {
    document: Document,
    host: Element,
    container: Element,
    area: Element,
    pins: Element,
    list: Element,
    painted: Option<AnatomyView>,
}

impl DomMount {
    /// Attach an open shadow root to `host` and build the static skeleton:
    ///
    /// ```text
    /// <style>…</style>
    /// <div id="component-anatomy">
    ///   <figure id="area"><slot></slot><ol id="pins"></ol></figure>
    ///   <ol id="list"></ol>
    /// </div>
    /// ```
    pub fn attach(host: &Element) -> Result<Self, MountError> {
        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let document = window.document().ok_or(MountError::NoDocument)?;

        let init = ShadowRootInit::new(ShadowRootMode::Open);
        let root = host
            .attach_shadow(&init)
            .map_err(|e| MountError::ShadowRoot(format!("{:?}", e)))?;

        let style = document.create_element("style")?;
        style.set_text_content(Some(&styles::generate_anatomy_css()));
        root.append_child(&style)?;

        let container = document.create_element("div")?;
        container.set_id(CONTAINER_ID);

        let area = document.create_element("figure")?;
        area.set_id(AREA_ID);
        let slot = document.create_element("slot")?;
        area.append_child(&slot)?;
        let pins = document.create_element("ol")?;
        pins.set_id(PINS_ID);
        area.append_child(&pins)?;

        let list = document.create_element("ol")?;
        list.set_id(LIST_ID);

        container.append_child(&area)?;
        container.append_child(&list)?;
        root.append_child(&container)?;

        log::debug!("anatomy shadow root attached");

        Ok(Self {
            document,
            host: host.clone(),
            container,
            area,
            pins,
            list,
            painted: None,
        })
    }

    pub fn area(&self) -> &Element {
        &self.area
    }

    pub fn list(&self) -> &Element {
        &self.list
    }

    /// Write `view` into the shadow root
    ///
    /// Both lists are torn down and rebuilt, except when only the current pin
    /// changed: then just the `aria-current` markers move, so a focused entry
    /// keeps its focus.
    pub fn paint(&mut self, view: &AnatomyView) -> Result<(), MountError> {
        if let Some(previous) = &self.painted {
            if same_layout(previous, view) {
                self.paint_current(view)?;
                self.painted = Some(view.clone());
                return Ok(());
            }
        }

        set_flag(&self.container, "data-edit", view.edit)?;
        self.container
            .set_attribute("data-orientation", view.orientation.as_str())?;

        self.pins.set_text_content(None);
        self.list.set_text_content(None);

        for pin in &view.pins {
            let node = self.build_pin(pin)?;
            self.pins.append_child(&node)?;
        }
        for entry in &view.entries {
            let node = self.build_entry(entry)?;
            self.list.append_child(&node)?;
        }

        self.painted = Some(view.clone());
        Ok(())
    }

    fn paint_current(&self, view: &AnatomyView) -> Result<(), MountError> {
        let children = self.pins.children();
        for pin in &view.pins {
            if let Some(node) = children.item(pin.index as u32) {
                set_flag(&node, "aria-current", pin.current)?;
            }
        }
        Ok(())
    }

    fn build_pin(&self, pin: &RenderPin) -> Result<Element, MountError> {
        let node: HtmlElement = self
            .document
            .create_element("li")?
            .dyn_into()
            .map_err(|_| MountError::Dom("created <li> is not an HtmlElement".to_string()))?;
        let style = node.style();
        style.set_property("left", &pin.left)?;
        style.set_property("top", &pin.top)?;
        node.set_attribute("aria-describedby", &pin.described_by)?;
        node.set_attribute("data-index", &pin.index.to_string())?;
        node.set_tab_index(0);
        set_flag(&node, "aria-current", pin.current)?;
        Ok(node.into())
    }

    fn build_entry(&self, entry: &RenderEntry) -> Result<Element, MountError> {
        let node = self.document.create_element("li")?;
        node.set_id(&entry.id);
        node.set_attribute("data-index", &entry.index.to_string())?;
        if entry.editable {
            node.set_attribute("contenteditable", "")?;
        }

        // Text nodes and attribute setters only, never innerHTML
        for segment in &entry.content {
            match segment {
                Segment::Text { text } => {
                    let text_node = self.document.create_text_node(text);
                    node.append_child(&text_node)?;
                }
                Segment::Link { text, href } => {
                    let anchor = self.document.create_element("a")?;
                    anchor.set_attribute("href", href)?;
                    anchor.set_text_content(Some(text));
                    node.append_child(&anchor)?;
                }
            }
        }

        Ok(node)
    }

    /// Remove everything the widget rendered
    pub fn clear(&mut self) {
        self.pins.set_text_content(None);
        self.list.set_text_content(None);
        self.painted = None;
    }

    /// Mirror a persisted attribute onto the host element
    ///
    /// Writes only when the value differs, so a host observing its own
    /// attributes sees exactly one change per mutation.
    pub fn reflect_attribute(&self, name: &str, value: Option<&str>) -> Result<(), MountError> {
        let current = self.host.get_attribute(name);
        if current.as_deref() == value {
            return Ok(());
        }
        match value {
            Some(v) => self.host.set_attribute(name, v)?,
            None => self.host.remove_attribute(name)?,
        }
        Ok(())
    }
}

/// Same nodes apart from which pin is current
fn same_layout(a: &AnatomyView, b: &AnatomyView) -> bool {
    a.edit == b.edit
        && a.orientation == b.orientation
        && a.entries == b.entries
        && a.pins.len() == b.pins.len()
        && a.pins.iter().zip(&b.pins).all(|(p, q)| {
            p.index == q.index && p.left == q.left && p.top == q.top && p.described_by == q.described_by
        })
}

fn set_flag(node: &Element, name: &str, on: bool) -> Result<(), JsValue> {
    if on {
        node.set_attribute(name, "")
    } else {
        node.remove_attribute(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html_layout::{render, RenderOptions};
    use crate::models::DefinitionRecord;

    fn view(current: Option<usize>, edit: bool) -> AnatomyView {
        let list = vec![
            DefinitionRecord::new(10.0, 20.0, "a").unwrap(),
            DefinitionRecord::new(30.0, 40.0, "b").unwrap(),
        ];
        render(
            &list,
            &RenderOptions {
                edit,
                current,
                ..RenderOptions::default()
            },
        )
    }

    #[test]
    fn test_current_change_keeps_layout() {
        assert!(same_layout(&view(None, true), &view(Some(1), true)));
    }

    #[test]
    fn test_edit_toggle_changes_layout() {
        assert!(!same_layout(&view(None, false), &view(None, true)));
    }
}
