//! Editor session: attach once, then read and write content.
//!
//! `attach` materialises the toolbar layout and the editable surface inside a
//! container element, binds every present control to its formatting command,
//! and wires the change notifier to the surface's `input` event.
//!
//! All methods take `&self` and release internal borrows before running user
//! callbacks, so change handlers may call back into the session.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::actions::{BINDINGS, Binding, ControlAction};
use crate::error::{AttachmentError, HostError, RegistrationError, StateError};
use crate::escape::{escape_html, line_breaks_to_markup};
use crate::notify::{ChangeHandler, ChangeNotifier, fire_all};
use crate::options::ToolbarOptions;
use crate::platform::{EditorHost, Scheduler};
use crate::toolbar::{
    CONTAINER_CLASS, Control, PREFIX, SEPARATOR_CLASS, SURFACE_ID, TOOLBAR_ID, control_id, layout,
};

/// DOM event fired by the surface on every edit.
const EDIT_EVENT: &str = "input";

/// Elements and live handles created by a successful attach.
struct Attachment<H: EditorHost> {
    container: H::Element,
    toolbar: H::Element,
    surface: H::Element,
    options: ToolbarOptions,
    _listeners: Vec<H::Listener>,
}

/// A single attachable editor instance.
pub struct EditorSession<H: EditorHost, S: Scheduler> {
    host: Rc<H>,
    scheduler: Rc<S>,
    notifier: RefCell<ChangeNotifier<S>>,
    attachment: RefCell<Option<Attachment<H>>>,
}

impl<H, S> EditorSession<H, S>
where
    H: EditorHost + 'static,
    S: Scheduler + 'static,
{
    pub fn new(host: Rc<H>, scheduler: Rc<S>) -> Self {
        Self {
            host,
            scheduler,
            notifier: RefCell::new(ChangeNotifier::new()),
            attachment: RefCell::new(None),
        }
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.borrow().is_some()
    }

    /// Options the toolbar was built with, once attached.
    pub fn options(&self) -> Option<ToolbarOptions> {
        self.attachment.borrow().as_ref().map(|a| a.options)
    }

    pub fn container(&self) -> Option<H::Element> {
        self.attachment.borrow().as_ref().map(|a| a.container.clone())
    }

    pub fn toolbar(&self) -> Option<H::Element> {
        self.attachment.borrow().as_ref().map(|a| a.toolbar.clone())
    }

    pub fn surface(&self) -> Option<H::Element> {
        self.attachment.borrow().as_ref().map(|a| a.surface.clone())
    }

    // === Registration ===

    pub fn on_change(&self, handler: ChangeHandler) -> Result<(), RegistrationError> {
        self.notifier.borrow_mut().on_change(handler)
    }

    pub fn on_change_interval(
        &self,
        handler: ChangeHandler,
        period_ms: u32,
    ) -> Result<(), RegistrationError> {
        self.notifier
            .borrow_mut()
            .on_change_interval(handler, period_ms)
    }

    pub fn on_change_idle(
        &self,
        handler: ChangeHandler,
        quiet_ms: u32,
    ) -> Result<(), RegistrationError> {
        self.notifier.borrow_mut().on_change_idle(handler, quiet_ms)
    }

    // === Attach ===

    /// Build the editor inside the element with id `container_id`.
    ///
    /// A failed container lookup leaves the session unattached.
    pub fn attach(
        &self,
        container_id: &str,
        options: ToolbarOptions,
    ) -> Result<(), AttachmentError> {
        if self.is_attached() {
            return Err(AttachmentError::AlreadyAttached);
        }
        let host = &*self.host;
        let container = host
            .element_by_id(container_id)
            .ok_or_else(|| AttachmentError::ContainerNotFound(container_id.to_string()))?;

        // Build detached, then mount, so a host failure never leaves a
        // partial editor in the container.
        let toolbar = host.create_element("div")?;
        host.set_attribute(&toolbar, "id", TOOLBAR_ID)?;
        let mut controls = HashMap::new();
        for control in layout(&options) {
            let element = self.build_control(&control)?;
            host.append_child(&toolbar, &element)?;
            if let Some(id) = control.id() {
                controls.insert(id, element);
            }
        }

        let surface = host.create_element("div")?;
        host.set_attribute(&surface, "id", SURFACE_ID)?;
        host.set_attribute(&surface, "contenteditable", "true")?;
        host.set_attribute(&surface, "autofocus", "autofocus")?;

        if let Err(e) = self.mount(&container, &toolbar, &surface) {
            host.remove(&toolbar);
            host.remove(&surface);
            return Err(e.into());
        }

        let mut listeners = self.bind_controls(&controls, &surface);

        let (fanout, debounces) = self.notifier.borrow_mut().start(&self.scheduler);
        if !fanout.is_empty() {
            listeners.push(
                host.listen(&surface, EDIT_EVENT, Box::new(move || fanout.on_edit())),
            );
        }
        for debounce in debounces {
            listeners.push(
                host.listen(&surface, EDIT_EVENT, Box::new(move || debounce.on_edit())),
            );
        }

        tracing::debug!(
            container = container_id,
            listeners = listeners.len(),
            "editor attached"
        );

        *self.attachment.borrow_mut() = Some(Attachment {
            container,
            toolbar,
            surface,
            options,
            _listeners: listeners,
        });
        Ok(())
    }

    fn mount(
        &self,
        container: &H::Element,
        toolbar: &H::Element,
        surface: &H::Element,
    ) -> Result<(), HostError> {
        self.host.append_child(container, toolbar)?;
        self.host.append_child(container, surface)?;
        self.host.add_class(container, CONTAINER_CLASS)
    }

    fn build_control(&self, control: &Control) -> Result<H::Element, HostError> {
        let host = &*self.host;
        match control {
            Control::Button(button) => {
                let element = host.create_element("button")?;
                host.set_attribute(&element, "id", &control_id(button.id))?;
                host.set_attribute(&element, "alt", button.title)?;
                host.set_attribute(&element, "title", button.title)?;
                host.set_inner_html(&element, button.label);
                if let Some(class) = button.class {
                    host.set_attribute(&element, "class", &format!("{PREFIX}-{class}"))?;
                }
                Ok(element)
            }
            Control::Dropdown(dropdown) => {
                let element = host.create_element("select")?;
                host.set_attribute(&element, "id", &control_id(dropdown.id))?;
                host.set_attribute(&element, "alt", dropdown.title)?;
                host.set_attribute(&element, "title", dropdown.title)?;

                let placeholder = host.create_element("option")?;
                host.set_text_content(&placeholder, dropdown.placeholder);
                host.set_attribute(&placeholder, "value", "")?;
                host.append_child(&element, &placeholder)?;
                for entry in dropdown.entries {
                    let option = host.create_element("option")?;
                    host.set_text_content(&option, entry);
                    host.set_attribute(&option, "value", entry)?;
                    host.append_child(&element, &option)?;
                }
                host.set_value(&element, "");
                Ok(element)
            }
            Control::Separator => {
                let element = host.create_element("span")?;
                host.set_attribute(&element, "class", SEPARATOR_CLASS)?;
                Ok(element)
            }
        }
    }

    /// Wire each binding whose control this session built. Missing controls
    /// are skipped.
    fn bind_controls(
        &self,
        controls: &HashMap<&'static str, H::Element>,
        surface: &H::Element,
    ) -> Vec<H::Listener> {
        let mut listeners = Vec::new();
        for binding in BINDINGS {
            let Some(control) = controls.get(binding.id) else {
                continue;
            };
            let callback = control_callback(self.host.clone(), surface.clone(), control.clone(), binding);
            listeners.push(self.host.listen(control, binding.trigger.event_name(), callback));
        }
        tracing::debug!(bound = listeners.len(), "toolbar controls bound");
        listeners
    }

    // === Content ===

    /// Replace the surface's content.
    ///
    /// Line feeds become `<br>`. Immediate change handlers run once afterwards;
    /// interval and idle subscriptions are not driven.
    pub fn set_content(&self, html: &str) -> Result<(), StateError> {
        let surface = self
            .surface()
            .ok_or(StateError::NotAttached("set content"))?;
        self.host
            .set_inner_html(&surface, &line_breaks_to_markup(html));

        let handlers = self.notifier.borrow().immediate_handlers();
        fire_all(&handlers);
        Ok(())
    }

    /// The surface's markup, escaped for display unless `unescaped` is set.
    pub fn get_content(&self, unescaped: bool) -> Result<String, StateError> {
        let surface = self
            .surface()
            .ok_or(StateError::NotAttached("get content"))?;
        let html = self.host.inner_html(&surface);
        if unescaped {
            Ok(html)
        } else {
            Ok(escape_html(&html).into_owned())
        }
    }

    /// Fail with [`StateError`] unless attached.
    pub fn ensure_attached(&self, operation: &'static str) -> Result<(), StateError> {
        if self.is_attached() {
            Ok(())
        } else {
            Err(StateError::NotAttached(operation))
        }
    }
}

fn control_callback<H: EditorHost + 'static>(
    host: Rc<H>,
    surface: H::Element,
    control: H::Element,
    binding: &'static Binding,
) -> Box<dyn FnMut()> {
    match binding.action {
        ControlAction::Format(command) => {
            Box::new(move || format(&*host, &surface, command.name, command.value))
        }
        ControlAction::FromSelection { command } => Box::new(move || {
            let value = host.value(&control);
            // Reset so choosing the same entry again fires `change` again.
            host.set_value(&control, "");
            format(&*host, &surface, command, Some(&value));
        }),
    }
}

/// Focus the surface and run a command against its selection.
fn format<H: EditorHost>(host: &H, surface: &H::Element, command: &str, value: Option<&str>) {
    host.focus(surface);
    if !host.exec_command(command, value) {
        tracing::warn!(command, ?value, "host rejected formatting command");
    }
}

#[cfg(test)]
mod tests;
