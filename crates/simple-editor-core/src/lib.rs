//! simple-editor-core: rich-text editor widget logic without browser dependencies.
//!
//! This crate provides:
//! - `ToolbarOptions` and the toolbar `layout` built from them
//! - the control `BINDINGS` table mapping controls to formatting commands
//! - `ChangeNotifier` with immediate, interval and idle delivery
//! - `EditorSession`, generic over an `EditorHost` and a `Scheduler`
//! - HTML escaping helpers for showing editor markup as text

pub mod actions;
pub mod error;
pub mod escape;
pub mod fonts;
pub mod notify;
pub mod options;
pub mod platform;
pub mod session;
pub mod toolbar;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use actions::{BINDINGS, Binding, ControlAction, FormatCommand, Trigger, binding_for};
pub use error::{
    AttachmentError, EditorError, HostError, RegistrationError, StateError, SubscriptionKind,
};
pub use escape::{escape_html, line_breaks_to_markup, source_preview, unescape_html};
pub use fonts::{FONT_CATALOG, FONT_SIZES};
pub use notify::{ChangeHandler, ChangeNotifier, EditFanout, IdleDebounce};
pub use options::{Capability, ToolbarOptions};
pub use platform::{Callback, EditorHost, Scheduler};
pub use session::EditorSession;
pub use toolbar::{ButtonSpec, Control, DropdownSpec, layout};
