//! Delegated DOM event handling
//!
//! Listeners sit on the annotated area and on the description list, not on
//! individual items, so a full repaint never has to rebind anything. Each
//! handler resolves the entry index from `data-index` and calls into the
//! widget.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, MouseEvent, Node};

use super::{DomMount, MountError};
use crate::widget::{AnatomyWidget, PointerClick};

type Handler = Closure<dyn FnMut(Event)>;

/// Live event listeners; dropping this detaches them
pub struct EventBindings {
    listeners: Vec<(EventTarget, &'static str, Handler)>,
}

impl EventBindings {
    /// Wire pointer and focus events of `mount` to `widget`
    pub fn bind(widget: &Rc<RefCell<AnatomyWidget>>, mount: &DomMount) -> Result<Self, MountError> {
        let mut bindings = Self { listeners: Vec::new() };

        let area = mount.area().clone();
        bindings.listen(mount.area(), "click", on_widget(widget, move |w, event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = area.get_bounding_client_rect();
            let click = PointerClick::new(
                f64::from(event.client_x()) - rect.left(),
                f64::from(event.client_y()) - rect.top(),
                rect.width(),
                rect.height(),
            );
            w.place_pin(click);
        }))?;

        bindings.listen(mount.list(), "mouseover", on_widget(widget, |w, event| {
            if let Some((_, index)) = entry_of(event) {
                w.highlight(index);
            }
        }))?;

        bindings.listen(mount.list(), "focusin", on_widget(widget, |w, event| {
            if let Some((_, index)) = entry_of(event) {
                w.highlight(index);
            }
        }))?;

        bindings.listen(mount.list(), "mouseout", on_widget(widget, |w, event| {
            let Some((item, index)) = entry_of(event) else {
                return;
            };
            // moving onto a link inside the same entry is not a leave
            let related = event
                .dyn_ref::<MouseEvent>()
                .and_then(MouseEvent::related_target)
                .and_then(|t| t.dyn_into::<Node>().ok());
            if related.is_some_and(|node| item.contains(Some(&node))) {
                return;
            }
            w.unhighlight(index);
        }))?;

        bindings.listen(mount.list(), "focusout", on_widget(widget, |w, event| {
            if let Some((item, index)) = entry_of(event) {
                let text = item.text_content().unwrap_or_default();
                w.commit(index, &text);
            }
        }))?;

        Ok(bindings)
    }

    fn listen(&mut self, target: &Element, kind: &'static str, handler: Handler) -> Result<(), MountError> {
        target.add_event_listener_with_callback(kind, handler.as_ref().unchecked_ref())?;
        self.listeners.push((target.clone().into(), kind, handler));
        Ok(())
    }
}

impl Drop for EventBindings {
    fn drop(&mut self) {
        for (target, kind, handler) in self.listeners.drain(..) {
            let _ = target.remove_event_listener_with_callback(kind, handler.as_ref().unchecked_ref());
        }
    }
}

/// Wrap `f` so it runs against the widget, skipping reentrant events
///
/// A repaint can fire focus events synchronously while the widget is already
/// borrowed; those are dropped.
fn on_widget<F>(widget: &Rc<RefCell<AnatomyWidget>>, mut f: F) -> Handler
where
    F: FnMut(&mut AnatomyWidget, &Event) + 'static,
{
    let weak: Weak<RefCell<AnatomyWidget>> = Rc::downgrade(widget);
    Closure::wrap(Box::new(move |event: Event| {
        let Some(widget) = weak.upgrade() else {
            return;
        };
        let Ok(mut widget) = widget.try_borrow_mut() else {
            log::debug!("skipping reentrant '{}' event", event.type_());
            return;
        };
        f(&mut widget, &event);
    }) as Box<dyn FnMut(Event)>)
}

/// The description entry an event happened in, with its index
fn entry_of(event: &Event) -> Option<(Element, usize)> {
    let target = event.target()?.dyn_into::<Node>().ok()?;
    let element = match target.dyn_into::<Element>() {
        Ok(element) => element,
        // text node inside an entry
        Err(node) => node.parent_element()?,
    };
    let item = element.closest("li[data-index]").ok()??;
    let index = item.get_attribute("data-index")?.parse().ok()?;
    Some((item, index))
}
