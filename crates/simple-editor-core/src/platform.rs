//! Platform abstraction traits for the editor.
//!
//! These traits define the interface between the session logic and the host
//! environment: the document the widget is built into, and the timers that
//! drive batched change notification. The browser implementation lives in
//! `simple-editor-browser`; the `testing` module has in-memory versions.

use crate::error::HostError;

/// Callback run by a listener or timer.
pub type Callback = Box<dyn FnMut()>;

/// The host document and its rich-text command executor.
///
/// Element handles are cheap clones referring to the same live node.
/// Listener handles detach their listener when dropped.
pub trait EditorHost {
    type Element: Clone + 'static;
    type Listener: 'static;

    /// Find a connected element by id.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> Result<Self::Element, HostError>;

    fn append_child(&self, parent: &Self::Element, child: &Self::Element)
    -> Result<(), HostError>;

    /// Detach an element from its parent, if it has one.
    fn remove(&self, element: &Self::Element);

    fn set_attribute(
        &self,
        element: &Self::Element,
        name: &str,
        value: &str,
    ) -> Result<(), HostError>;

    /// Add a class to the element's class list, keeping existing classes.
    fn add_class(&self, element: &Self::Element, class: &str) -> Result<(), HostError>;

    fn inner_html(&self, element: &Self::Element) -> String;

    fn set_inner_html(&self, element: &Self::Element, html: &str);

    fn set_text_content(&self, element: &Self::Element, text: &str);

    /// Current value of a form control.
    fn value(&self, element: &Self::Element) -> String;

    fn set_value(&self, element: &Self::Element, value: &str);

    fn focus(&self, element: &Self::Element);

    /// Run a rich-text command against the current selection.
    ///
    /// Returns whether the host accepted the command.
    fn exec_command(&self, command: &str, value: Option<&str>) -> bool;

    /// Attach a listener for `event` on `element`.
    fn listen(
        &self,
        element: &Self::Element,
        event: &'static str,
        callback: Callback,
    ) -> Self::Listener;
}

/// Timer source for interval and idle notifications.
///
/// Dropping a returned handle cancels the timer.
pub trait Scheduler {
    type Interval: 'static;
    type Timeout: 'static;

    /// Run `tick` every `period_ms` milliseconds.
    fn interval(&self, period_ms: u32, tick: Callback) -> Self::Interval;

    /// Run `fire` once after `delay_ms` milliseconds.
    fn timeout(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> Self::Timeout;
}
