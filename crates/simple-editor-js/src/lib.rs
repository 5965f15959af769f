//! WASM bindings for the simple rich-text editor.
//!
//! Exposes [`SimpleEditor`] plus a few helpers to JavaScript/TypeScript apps.

mod editor;
mod types;

pub use editor::*;
pub use types::*;

use simple_editor_browser::source_preview;
use tracing::Level;
use tracing::subscriber::set_global_default;
use tracing_subscriber::Registry;
use tracing_subscriber::layer::SubscriberExt;
use wasm_bindgen::prelude::*;

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    let max_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(max_level)
            .build(),
    );
    let reg = Registry::default().with(wasm_layer);
    // Another module on the page may have installed a subscriber already.
    let _ = set_global_default(reg);
}

/// Render editor markup as readable source: escaped, with line breaks kept.
#[wasm_bindgen(js_name = showSource)]
pub fn show_source(text: &str) -> String {
    source_preview(text)
}
