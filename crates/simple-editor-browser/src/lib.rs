//! Browser DOM layer for the simple editor widget.
//!
//! This crate implements the core's platform traits on top of `web-sys`.
//! It assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `host`: `EditorHost` over the live document and `execCommand`
//! - `timers`: `Scheduler` over `setInterval`/`setTimeout`
//!
//! # Re-exports
//!
//! This crate re-exports `simple-editor-core` for convenience, so consumers
//! only need to depend on `simple-editor-browser`.

// Re-export core crate
pub use simple_editor_core;
pub use simple_editor_core::*;

pub mod host;
pub mod timers;

pub use host::BrowserHost;
pub use timers::BrowserScheduler;

/// Session type used in the browser.
pub type BrowserSession = EditorSession<BrowserHost, BrowserScheduler>;

/// Create an unattached session against the current document.
pub fn browser_session() -> Result<BrowserSession, HostError> {
    let host = BrowserHost::new()?;
    Ok(EditorSession::new(
        std::rc::Rc::new(host),
        std::rc::Rc::new(BrowserScheduler),
    ))
}
