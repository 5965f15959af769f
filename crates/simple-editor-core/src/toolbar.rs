//! Toolbar layout.
//!
//! `layout` turns resolved options into the ordered list of controls the
//! session materialises as DOM elements. Groups always appear in the same
//! order and each group ends with a separator.

use crate::fonts::{FONT_CATALOG, FONT_SIZES};
use crate::options::ToolbarOptions;

/// Prefix shared by every id and class the editor emits.
pub const PREFIX: &str = "simple-editor";
/// Id of the toolbar element.
pub const TOOLBAR_ID: &str = "simple-editor-toolbar";
/// Id of the editable surface.
pub const SURFACE_ID: &str = "simple-editor";
/// Class added to the container on attach.
pub const CONTAINER_CLASS: &str = "simple-editor-container";
/// Class of the separator spans between groups.
pub const SEPARATOR_CLASS: &str = "simple-editor-separator";

/// Full element id for a control id suffix.
pub fn control_id(suffix: &str) -> String {
    format!("{PREFIX}-{suffix}")
}

/// A push button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSpec {
    pub id: &'static str,
    pub title: &'static str,
    /// Inner markup of the button.
    pub label: &'static str,
    /// Class suffix, rendered as `simple-editor-<class>`.
    pub class: Option<&'static str>,
}

/// A `<select>` whose first entry is a placeholder with an empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub placeholder: &'static str,
    pub entries: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Button(ButtonSpec),
    Dropdown(DropdownSpec),
    Separator,
}

impl Control {
    /// Id suffix of the control, if it has one.
    pub fn id(&self) -> Option<&'static str> {
        match self {
            Control::Button(button) => Some(button.id),
            Control::Dropdown(dropdown) => Some(dropdown.id),
            Control::Separator => None,
        }
    }
}

const fn button(id: &'static str, title: &'static str, label: &'static str) -> ButtonSpec {
    ButtonSpec {
        id,
        title,
        label,
        class: None,
    }
}

const fn styled(
    id: &'static str,
    title: &'static str,
    label: &'static str,
    class: &'static str,
) -> ButtonSpec {
    ButtonSpec {
        id,
        title,
        label,
        class: Some(class),
    }
}

const STYLE_TOGGLES: [ButtonSpec; 3] = [
    button("b", "Bold", "<strong>B</strong>"),
    button("i", "Italic", "<em>I</em>"),
    button("u", "Underline", "<u>U</u>"),
];

const STRIKETHROUGH: ButtonSpec = button("sk", "Strikethrough", "<s>S</s>");

const COLOR_SWATCHES: [ButtonSpec; 6] = [
    styled("color-default", "Default colour", "A", "text-black"),
    styled("color-red", "Red text", "A", "text-red"),
    styled("color-green", "Green text", "A", "text-green"),
    styled("color-blue", "Blue text", "A", "text-blue"),
    styled("color-orange", "Orange text", "A", "text-orange"),
    styled("color-purple", "Purple text", "A", "text-purple"),
];

const CLEAR: ButtonSpec = button("clear", "Clear formatting", "X");

const ALIGNMENT: [ButtonSpec; 3] = [
    button("left", "Align left", "&lt;"),
    button("center", "Align center", "C"),
    button("right", "Align right", "&gt;"),
];

const RULE: ButtonSpec = button("hr", "Horizontal line", "&mdash;");

const PARAGRAPH: ButtonSpec = styled("p", "Normal paragraph", "&para;", "small");
const HEADING_1: ButtonSpec = styled("h1", "Heading 1", "H1", "small");
const HEADING_2: ButtonSpec = styled("h2", "Heading 2", "H2", "small");
const HEADING_3: ButtonSpec = styled("h3", "Heading 3", "H3", "small");
const BLOCKQUOTE: ButtonSpec = styled("bq", "Blockquote", "\"", "large");

const UNORDERED_LIST: ButtonSpec = button("ul", "Unordered list", "=");
const ORDERED_LIST: ButtonSpec = button("ol", "Ordered list", "1.");

const FONT_NAME: DropdownSpec = DropdownSpec {
    id: "font-name",
    title: "Select font",
    placeholder: "Font",
    entries: FONT_CATALOG,
};

const FONT_SIZE: DropdownSpec = DropdownSpec {
    id: "font-size",
    title: "Select font size",
    placeholder: "Size",
    entries: FONT_SIZES,
};

const UNDO: ButtonSpec = button("undo", "Undo last change", "&hookleftarrow;");

/// Compute the toolbar controls for the given options.
pub fn layout(options: &ToolbarOptions) -> Vec<Control> {
    let mut controls = Vec::new();

    if options.allow_styling {
        group(&mut controls, &STYLE_TOGGLES.map(Control::Button));
    }
    if options.allow_strikethrough {
        group(&mut controls, &[Control::Button(STRIKETHROUGH)]);
    }
    if options.allow_colors {
        group(&mut controls, &COLOR_SWATCHES.map(Control::Button));
    }
    if options.allow_clear {
        group(&mut controls, &[Control::Button(CLEAR)]);
    }
    if options.allow_alignment {
        group(&mut controls, &ALIGNMENT.map(Control::Button));
    }
    if options.allow_lines {
        group(&mut controls, &[Control::Button(RULE)]);
    }
    if options.block_types() {
        let mut blocks = vec![Control::Button(PARAGRAPH)];
        if options.allow_heading1 {
            blocks.push(Control::Button(HEADING_1));
        }
        // Levels 2 and 3 ride along with any block-type flag.
        blocks.push(Control::Button(HEADING_2));
        blocks.push(Control::Button(HEADING_3));
        if options.allow_blockquotes {
            blocks.push(Control::Button(BLOCKQUOTE));
        }
        group(&mut controls, &blocks);
    }
    if options.lists() {
        let mut lists = Vec::new();
        if options.allow_unordered_lists {
            lists.push(Control::Button(UNORDERED_LIST));
        }
        if options.allow_ordered_lists {
            lists.push(Control::Button(ORDERED_LIST));
        }
        group(&mut controls, &lists);
    }
    if options.allow_fonts {
        group(&mut controls, &[Control::Dropdown(FONT_NAME)]);
    }
    if options.allow_font_sizes {
        group(&mut controls, &[Control::Dropdown(FONT_SIZE)]);
    }
    if options.allow_undo {
        group(&mut controls, &[Control::Button(UNDO)]);
    }

    controls
}

fn group(controls: &mut Vec<Control>, members: &[Control]) {
    controls.extend_from_slice(members);
    controls.push(Control::Separator);
}
