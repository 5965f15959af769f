//! Formatting commands and the control binding table.
//!
//! Every toolbar control maps to a fixed invocation of the host's rich-text
//! command executor. The table here is consulted once at attach time; entries
//! whose control was not created are skipped.

/// DOM event that triggers a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Button press.
    Activate,
    /// Dropdown selection.
    Change,
}

impl Trigger {
    pub fn event_name(self) -> &'static str {
        match self {
            Trigger::Activate => "click",
            Trigger::Change => "change",
        }
    }
}

/// A command name plus optional value, passed verbatim to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatCommand {
    pub name: &'static str,
    pub value: Option<&'static str>,
}

impl FormatCommand {
    pub const fn new(name: &'static str) -> Self {
        Self { name, value: None }
    }

    pub const fn with_value(name: &'static str, value: &'static str) -> Self {
        Self {
            name,
            value: Some(value),
        }
    }
}

/// What a control does when triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Run a fixed command.
    Format(FormatCommand),
    /// Run `command` with the dropdown's selected value, then reset the
    /// dropdown to its placeholder.
    FromSelection { command: &'static str },
}

/// Wiring for one control, keyed by its id suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub id: &'static str,
    pub trigger: Trigger,
    pub action: ControlAction,
}

const fn press(id: &'static str, command: FormatCommand) -> Binding {
    Binding {
        id,
        trigger: Trigger::Activate,
        action: ControlAction::Format(command),
    }
}

const fn select(id: &'static str, command: &'static str) -> Binding {
    Binding {
        id,
        trigger: Trigger::Change,
        action: ControlAction::FromSelection { command },
    }
}

pub const BINDINGS: &[Binding] = &[
    press("b", FormatCommand::new("bold")),
    press("i", FormatCommand::new("italic")),
    press("u", FormatCommand::new("underline")),
    press("sk", FormatCommand::new("strikethrough")),
    press("left", FormatCommand::new("justifyLeft")),
    press("center", FormatCommand::new("justifyCenter")),
    press("right", FormatCommand::new("justifyRight")),
    press("color-default", FormatCommand::with_value("foreColor", "#333")),
    press("color-red", FormatCommand::with_value("foreColor", "#ec5050")),
    press("color-green", FormatCommand::with_value("foreColor", "#299921")),
    press("color-blue", FormatCommand::with_value("foreColor", "#3d6ee9")),
    press("color-orange", FormatCommand::with_value("foreColor", "#d3992e")),
    press("color-purple", FormatCommand::with_value("foreColor", "#800080")),
    press("p", FormatCommand::with_value("formatBlock", "P")),
    press("h1", FormatCommand::with_value("formatBlock", "H1")),
    press("h2", FormatCommand::with_value("formatBlock", "H2")),
    press("h3", FormatCommand::with_value("formatBlock", "H3")),
    press("bq", FormatCommand::with_value("formatBlock", "BLOCKQUOTE")),
    press("ul", FormatCommand::new("insertUnorderedList")),
    press("ol", FormatCommand::new("insertOrderedList")),
    select("font-name", "fontName"),
    select("font-size", "fontSize"),
    press("hr", FormatCommand::new("insertHorizontalRule")),
    press("clear", FormatCommand::new("removeFormat")),
    press("undo", FormatCommand::new("undo")),
];

/// Look up the binding for a control id suffix.
pub fn binding_for(id: &str) -> Option<&'static Binding> {
    BINDINGS.iter().find(|binding| binding.id == id)
}
