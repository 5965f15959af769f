//! SimpleEditor - the editor wrapper for JavaScript.

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use simple_editor_browser::{BrowserSession, ChangeHandler, EditorError, browser_session};

use crate::types::EditorOptions;

/// Surface an editor error as a thrown JS `Error`.
fn js_error(err: impl Into<EditorError>) -> JsError {
    JsError::new(&err.into().to_string())
}

/// Wrap a JS callback as a change handler. Exceptions it throws are logged.
fn change_handler(function: js_sys::Function) -> ChangeHandler {
    Rc::new(move || {
        if let Err(e) = function.call0(&JsValue::NULL) {
            tracing::warn!("change handler threw: {:?}", e);
        }
    })
}

/// Whole milliseconds from a JS number. Anything below one maps to zero,
/// which registration rejects.
fn millis(value: f64) -> u32 {
    if value.is_finite() && value >= 1.0 {
        value.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// A rich-text editor with a formatting toolbar.
///
/// Register change handlers first, then `attach` once to a container element.
#[wasm_bindgen]
pub struct SimpleEditor {
    session: BrowserSession,
}

#[wasm_bindgen]
impl SimpleEditor {
    /// Create an unattached editor bound to the current document.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SimpleEditor, JsError> {
        let session = browser_session().map_err(js_error)?;
        Ok(Self { session })
    }

    /// Build the toolbar and editing surface inside `#containerId`.
    ///
    /// `options` may be omitted; any keys it does not set default to `true`.
    pub fn attach(&self, container_id: &str, options: JsValue) -> Result<(), JsError> {
        let options = EditorOptions::from_js_value(options)?;
        self.session
            .attach(container_id, options.into())
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = isAttached)]
    pub fn is_attached(&self) -> bool {
        self.session.is_attached()
    }

    /// Call `handler` after every edit.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, handler: js_sys::Function) -> Result<(), JsError> {
        self.session
            .on_change(change_handler(handler))
            .map_err(js_error)
    }

    /// Call `handler` every `milliseconds` while there are unseen edits.
    #[wasm_bindgen(js_name = onChangeInterval)]
    pub fn on_change_interval(
        &self,
        handler: js_sys::Function,
        milliseconds: f64,
    ) -> Result<(), JsError> {
        self.session
            .on_change_interval(change_handler(handler), millis(milliseconds))
            .map_err(js_error)
    }

    /// Call `handler` once editing has paused for `milliseconds`.
    #[wasm_bindgen(js_name = onChangeIdle)]
    pub fn on_change_idle(&self, handler: js_sys::Function, milliseconds: f64) -> Result<(), JsError> {
        self.session
            .on_change_idle(change_handler(handler), millis(milliseconds))
            .map_err(js_error)
    }

    /// Replace the editor content. Non-string values are ignored.
    #[wasm_bindgen(js_name = setContent)]
    pub fn set_content(&self, content: JsValue) -> Result<(), JsError> {
        match content.as_string() {
            Some(html) => self.session.set_content(&html).map_err(js_error),
            None => {
                self.session.ensure_attached("set content").map_err(js_error)?;
                tracing::debug!("ignoring non-string content");
                Ok(())
            }
        }
    }

    /// The editor markup, HTML-escaped unless `unescaped` is true.
    #[wasm_bindgen(js_name = getContent)]
    pub fn get_content(&self, unescaped: Option<bool>) -> Result<String, JsError> {
        self.session
            .get_content(unescaped.unwrap_or(false))
            .map_err(js_error)
    }
}
