//! WASM browser test
//!
//! Mounts the widget onto a real element and checks the rendered shadow DOM.
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use component_anatomy::api::ComponentAnatomy;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    Element, EventTarget, FocusEvent, FocusEventInit, HtmlElement, MouseEvent, MouseEventInit, ShadowRoot,
};

wasm_bindgen_test_configure!(run_in_browser);

#[derive(Serialize)]
struct Payload<'a> {
    x: &'a str,
    y: &'a str,
    term: &'a str,
}

fn host() -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let host = document.create_element("component-anatomy").unwrap();
    document.body().unwrap().append_child(&host).unwrap();
    host
}

fn payload(term: &str) -> wasm_bindgen::JsValue {
    serde_wasm_bindgen::to_value(&Payload { x: "64%", y: "53%", term }).unwrap()
}

fn shadow(host: &Element) -> ShadowRoot {
    host.shadow_root().expect("shadow root attached")
}

#[wasm_bindgen_test]
fn test_mount_attaches_shadow_root() {
    let host = host();
    let _anatomy = ComponentAnatomy::new(host.clone()).unwrap();
    let root = shadow(&host);
    assert!(root.get_element_by_id("pins").is_some());
    assert!(root.get_element_by_id("list").is_some());
}

#[wasm_bindgen_test]
fn test_create_reflects_attribute_and_renders() {
    let host = host();
    let anatomy = ComponentAnatomy::new(host.clone()).unwrap();
    anatomy.create(payload("Button text"));

    assert_eq!(
        host.get_attribute("definitions").as_deref(),
        Some("W3sieCI6NjQsInkiOjUzLCJ0ZXJtIjoiQnV0dG9uIHRleHQifV0=")
    );

    let root = shadow(&host);
    let pin = root.query_selector("#pins li").unwrap().unwrap();
    assert_eq!(pin.get_attribute("aria-describedby").as_deref(), Some("item-0"));
    let item = root.query_selector("#list li").unwrap().unwrap();
    assert_eq!(item.id(), "item-0");
    assert_eq!(item.text_content().as_deref(), Some("Button text"));
}

#[wasm_bindgen_test]
fn test_links_render_as_anchors() {
    let host = host();
    let anatomy = ComponentAnatomy::new(host.clone()).unwrap();
    anatomy.create(payload("Button text with [a link](#link) to a place"));

    let item = shadow(&host).query_selector("#list li").unwrap().unwrap();
    assert_eq!(item.inner_html(), r##"Button text with <a href="#link">a link</a> to a place"##);
}

#[wasm_bindgen_test]
fn test_markup_is_not_rendered() {
    let host = host();
    let anatomy = ComponentAnatomy::new(host.clone()).unwrap();
    anatomy.create(payload("Button text with <strong>bold</strong> wording"));

    let root = shadow(&host);
    assert!(root.query_selector("#list li strong").unwrap().is_none());
    let item = root.query_selector("#list li").unwrap().unwrap();
    assert_eq!(item.inner_html(), "Button text with &lt;strong&gt;bold&lt;/strong&gt; wording");
}

#[wasm_bindgen_test]
fn test_remove_and_clear_drop_attribute() {
    let host = host();
    let anatomy = ComponentAnatomy::new(host.clone()).unwrap();

    anatomy.create(payload("one")).remove(0.0);
    assert!(!host.has_attribute("definitions"));

    anatomy.create(payload("one")).create(payload("two")).clear();
    assert!(!host.has_attribute("definitions"));
    assert_eq!(shadow(&host).query_selector_all("#list li").unwrap().length(), 0);
}

#[wasm_bindgen_test]
fn test_existing_attributes_are_read_on_mount() {
    let host = host();
    host.set_attribute("definitions", "W3sieCI6IjY0JSIsInkiOiI1MyUiLCJ0ZXJtIjoiQnV0dG9uIHRleHQifV0=")
        .unwrap();
    host.set_attribute("edit", "").unwrap();

    let anatomy = ComponentAnatomy::new(host.clone()).unwrap();
    assert!(anatomy.edit());

    let item = shadow(&host).query_selector("#list li").unwrap().unwrap();
    assert!(item.has_attribute("contenteditable"));
}

#[wasm_bindgen_test]
fn test_attribute_changed_callback_rerenders() {
    let host = host();
    let anatomy = ComponentAnatomy::new(host.clone()).unwrap();
    assert_eq!(anatomy.placeholder(), "placeholder");

    anatomy.attribute_changed_callback("placeholder", None, Some("Testing change".to_string()));
    assert_eq!(anatomy.placeholder(), "Testing change");

    anatomy.attribute_changed_callback("orientation", None, Some("vertical".to_string()));
    assert_eq!(anatomy.orientation(), "vertical");
}

fn definitions_json(anatomy: &ComponentAnatomy) -> String {
    let value = anatomy.definitions().unwrap();
    js_sys::JSON::stringify(&value).unwrap().into()
}

/// Host with 400x200 px of slotted content, so the annotated area has a size
fn sized_host() -> Element {
    let host = host();
    let document = web_sys::window().unwrap().document().unwrap();
    let content: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
    content.style().set_property("width", "400px").unwrap();
    content.style().set_property("height", "200px").unwrap();
    host.append_child(&content).unwrap();
    host
}

fn mouse(kind: &str, client_x: i32, client_y: i32, related: Option<&EventTarget>) -> MouseEvent {
    let mut init = MouseEventInit::new();
    init.bubbles(true).client_x(client_x).client_y(client_y).related_target(related);
    MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap()
}

fn focus(kind: &str) -> FocusEvent {
    let mut init = FocusEventInit::new();
    init.bubbles(true);
    FocusEvent::new_with_focus_event_init_dict(kind, &init).unwrap()
}

fn nth(root: &ShadowRoot, selector: &str, index: u32) -> Element {
    root.query_selector_all(selector)
        .unwrap()
        .item(index)
        .unwrap()
        .dyn_into()
        .unwrap()
}

#[wasm_bindgen_test]
fn test_definitions_property_drops_invalid_elements() {
    let host = host();
    let anatomy = ComponentAnatomy::new(host.clone()).unwrap();

    let value = js_sys::JSON::parse(r#"[{"x":1,"y":2,"term":5},{"x":1,"y":2,"term":"ok"}]"#).unwrap();
    anatomy.set_definitions(value);
    assert_eq!(definitions_json(&anatomy), r#"[{"x":1,"y":2,"term":"ok"}]"#);

    // not an array: ignored, list unchanged
    anatomy.set_definitions(wasm_bindgen::JsValue::from_str("nope"));
    assert_eq!(definitions_json(&anatomy), r#"[{"x":1,"y":2,"term":"ok"}]"#);

    anatomy.set_definitions(wasm_bindgen::JsValue::NULL);
    assert_eq!(definitions_json(&anatomy), "[]");
    assert!(!host.has_attribute("definitions"));
}

#[wasm_bindgen_test]
fn test_click_on_area_places_pin_in_edit_mode() {
    let host = sized_host();
    let anatomy = ComponentAnatomy::new(host.clone()).unwrap();
    let area = shadow(&host).get_element_by_id("area").unwrap();
    let rect = area.get_bounding_client_rect();
    let x = (rect.left() + 256.0).round() as i32;
    let y = (rect.top() + 106.0).round() as i32;

    area.dispatch_event(&mouse("click", x, y, None)).unwrap();
    assert_eq!(definitions_json(&anatomy), "[]");

    anatomy.set_edit(true);
    anatomy.set_placeholder(Some("Button text".to_string()));
    area.dispatch_event(&mouse("click", x, y, None)).unwrap();
    assert_eq!(definitions_json(&anatomy), r#"[{"x":64,"y":53,"term":"Button text"}]"#);
    assert_eq!(
        host.get_attribute("definitions").as_deref(),
        Some("W3sieCI6NjQsInkiOjUzLCJ0ZXJtIjoiQnV0dG9uIHRleHQifV0=")
    );

    let pin: HtmlElement = shadow(&host).query_selector("#pins li").unwrap().unwrap().dyn_into().unwrap();
    assert_eq!(pin.style().get_property_value("left").unwrap(), "64%");
    assert_eq!(pin.style().get_property_value("top").unwrap(), "53%");
}

#[wasm_bindgen_test]
fn test_hover_and_focus_mark_the_paired_pin() {
    let host = host();
    let anatomy = ComponentAnatomy::new(host.clone()).unwrap();
    anatomy.create(payload("one")).create(payload("two"));
    let root = shadow(&host);

    let second = nth(&root, "#list li", 1);
    second.dispatch_event(&mouse("mouseover", 0, 0, None)).unwrap();
    assert!(nth(&root, "#pins li", 1).has_attribute("aria-current"));
    assert!(!nth(&root, "#pins li", 0).has_attribute("aria-current"));
    // only the marker moved, the entry node survived the repaint
    assert!(second.is_same_node(Some(&nth(&root, "#list li", 1))));

    nth(&root, "#list li", 0).dispatch_event(&focus("focusin")).unwrap();
    assert!(nth(&root, "#pins li", 0).has_attribute("aria-current"));
    assert!(!nth(&root, "#pins li", 1).has_attribute("aria-current"));
    assert_eq!(root.query_selector_all("#pins li[aria-current]").unwrap().length(), 1);
}

#[wasm_bindgen_test]
fn test_mouseout_onto_link_in_same_entry_keeps_marker() {
    let host = host();
    let anatomy = ComponentAnatomy::new(host.clone()).unwrap();
    anatomy.create(payload("see [docs](#docs) here"));
    let root = shadow(&host);

    let item = nth(&root, "#list li", 0);
    item.dispatch_event(&mouse("mouseover", 0, 0, None)).unwrap();
    assert!(nth(&root, "#pins li", 0).has_attribute("aria-current"));

    let link = root.query_selector("#list li a").unwrap().unwrap();
    let link_target: &EventTarget = &link;
    item.dispatch_event(&mouse("mouseout", 0, 0, Some(link_target))).unwrap();
    assert!(nth(&root, "#pins li", 0).has_attribute("aria-current"));

    item.dispatch_event(&mouse("mouseout", 0, 0, None)).unwrap();
    assert!(!nth(&root, "#pins li", 0).has_attribute("aria-current"));
}

#[wasm_bindgen_test]
fn test_blur_commits_edited_text() {
    let host = host();
    let anatomy = ComponentAnatomy::new(host.clone()).unwrap();
    anatomy.set_edit(true);
    anatomy.create(payload("Button text"));
    let root = shadow(&host);

    let item = nth(&root, "#list li", 0);
    item.set_text_content(Some("  Button content "));
    item.dispatch_event(&focus("focusout")).unwrap();

    assert_eq!(definitions_json(&anatomy), r#"[{"x":64,"y":53,"term":"Button content"}]"#);
    assert_eq!(
        host.get_attribute("definitions").as_deref(),
        Some("W3sieCI6NjQsInkiOjUzLCJ0ZXJtIjoiQnV0dG9uIGNvbnRlbnQifV0=")
    );
}

#[wasm_bindgen_test]
fn test_entry_edited_to_empty_deletes_itself_on_blur() {
    let host = host();
    let anatomy = ComponentAnatomy::new(host.clone()).unwrap();
    anatomy.set_edit(true);
    anatomy.create(payload("one")).create(payload("two"));
    let root = shadow(&host);

    let first = nth(&root, "#list li", 0);
    first.set_text_content(Some("   "));
    first.dispatch_event(&focus("focusout")).unwrap();

    assert_eq!(definitions_json(&anatomy), r#"[{"x":64,"y":53,"term":"two"}]"#);
    assert_eq!(root.query_selector_all("#list li").unwrap().length(), 1);
    assert_eq!(nth(&root, "#list li", 0).id(), "item-0");
    assert_eq!(nth(&root, "#pins li", 0).get_attribute("aria-describedby").as_deref(), Some("item-0"));
}
