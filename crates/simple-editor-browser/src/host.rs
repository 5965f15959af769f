//! `EditorHost` over the browser document.
//!
//! Formatting goes through `document.execCommand`, which operates on the
//! current selection of whichever editable element has focus.

use gloo_events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlDocument, HtmlElement, HtmlSelectElement};

use simple_editor_core::{Callback, EditorHost, HostError};

/// Convert a thrown JS value into a host error.
fn js_error(context: &str, err: JsValue) -> HostError {
    let detail = match err.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => format!("{err:?}"),
    };
    HostError(format!("{context}: {detail}"))
}

/// The live page document.
#[derive(Debug, Clone)]
pub struct BrowserHost {
    document: Document,
}

impl BrowserHost {
    /// Use the current window's document.
    pub fn new() -> Result<Self, HostError> {
        let window = web_sys::window().ok_or_else(|| HostError::from("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| HostError::from("no document"))?;
        Ok(Self::from_document(document))
    }

    pub fn from_document(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl EditorHost for BrowserHost {
    type Element = Element;
    type Listener = EventListener;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn create_element(&self, tag: &str) -> Result<Element, HostError> {
        self.document
            .create_element(tag)
            .map_err(|e| js_error("failed to create element", e))
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<(), HostError> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(|e| js_error("failed to append child", e))
    }

    fn remove(&self, element: &Element) {
        element.remove();
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) -> Result<(), HostError> {
        element
            .set_attribute(name, value)
            .map_err(|e| js_error("failed to set attribute", e))
    }

    fn add_class(&self, element: &Element, class: &str) -> Result<(), HostError> {
        element
            .class_list()
            .add_1(class)
            .map_err(|e| js_error("failed to add class", e))
    }

    fn inner_html(&self, element: &Element) -> String {
        element.inner_html()
    }

    fn set_inner_html(&self, element: &Element, html: &str) {
        element.set_inner_html(html);
    }

    fn set_text_content(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn value(&self, element: &Element) -> String {
        match element.dyn_ref::<HtmlSelectElement>() {
            Some(select) => select.value(),
            None => element.get_attribute("value").unwrap_or_default(),
        }
    }

    fn set_value(&self, element: &Element, value: &str) {
        if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Err(e) = element.set_attribute("value", value) {
            tracing::warn!("Failed to set value: {:?}", e);
        }
    }

    fn focus(&self, element: &Element) {
        if let Some(html_el) = element.dyn_ref::<HtmlElement>() {
            if let Err(e) = html_el.focus() {
                tracing::warn!("Focus failed: {:?}", e);
            }
        }
    }

    fn exec_command(&self, command: &str, value: Option<&str>) -> bool {
        let Some(document) = self.document.dyn_ref::<HtmlDocument>() else {
            tracing::warn!(command, "document does not support execCommand");
            return false;
        };
        let result = match value {
            Some(value) => document.exec_command_with_show_ui_and_value(command, false, value),
            None => document.exec_command(command),
        };
        match result {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(command, "execCommand threw: {:?}", e);
                false
            }
        }
    }

    fn listen(&self, element: &Element, event: &'static str, mut callback: Callback) -> EventListener {
        EventListener::new(element, event, move |_| callback())
    }
}
