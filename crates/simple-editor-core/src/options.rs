//! Toolbar capability switches.
//!
//! Options deserialize from partial objects: any key the caller leaves out
//! keeps its default of `true`.

use serde::{Deserialize, Serialize};

/// One toggleable toolbar capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Styling,
    Strikethrough,
    Colors,
    Clear,
    Alignment,
    Lines,
    Heading1,
    Subheadings,
    Blockquotes,
    UnorderedLists,
    OrderedLists,
    Fonts,
    FontSizes,
    Undo,
}

impl Capability {
    /// Every capability, in toolbar order.
    pub const ALL: [Capability; 14] = [
        Capability::Styling,
        Capability::Strikethrough,
        Capability::Colors,
        Capability::Clear,
        Capability::Alignment,
        Capability::Lines,
        Capability::Heading1,
        Capability::Subheadings,
        Capability::Blockquotes,
        Capability::UnorderedLists,
        Capability::OrderedLists,
        Capability::Fonts,
        Capability::FontSizes,
        Capability::Undo,
    ];

    /// The option key as it appears in a JS options object.
    pub fn key(self) -> &'static str {
        match self {
            Capability::Styling => "allowStyling",
            Capability::Strikethrough => "allowStrikethrough",
            Capability::Colors => "allowColors",
            Capability::Clear => "allowClear",
            Capability::Alignment => "allowAlignment",
            Capability::Lines => "allowLines",
            Capability::Heading1 => "allowHeading1",
            Capability::Subheadings => "allowSubheadings",
            Capability::Blockquotes => "allowBlockquotes",
            Capability::UnorderedLists => "allowUnorderedLists",
            Capability::OrderedLists => "allowOrderedLists",
            Capability::Fonts => "allowFonts",
            Capability::FontSizes => "allowFontSizes",
            Capability::Undo => "allowUndo",
        }
    }
}

/// Resolved toolbar options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolbarOptions {
    pub allow_styling: bool,
    pub allow_strikethrough: bool,
    pub allow_colors: bool,
    pub allow_clear: bool,
    pub allow_alignment: bool,
    pub allow_lines: bool,
    pub allow_heading1: bool,
    pub allow_subheadings: bool,
    pub allow_blockquotes: bool,
    pub allow_unordered_lists: bool,
    pub allow_ordered_lists: bool,
    pub allow_fonts: bool,
    pub allow_font_sizes: bool,
    pub allow_undo: bool,
}

impl Default for ToolbarOptions {
    fn default() -> Self {
        Self::all()
    }
}

impl ToolbarOptions {
    /// Every capability enabled.
    pub fn all() -> Self {
        Self {
            allow_styling: true,
            allow_strikethrough: true,
            allow_colors: true,
            allow_clear: true,
            allow_alignment: true,
            allow_lines: true,
            allow_heading1: true,
            allow_subheadings: true,
            allow_blockquotes: true,
            allow_unordered_lists: true,
            allow_ordered_lists: true,
            allow_fonts: true,
            allow_font_sizes: true,
            allow_undo: true,
        }
    }

    /// Every capability disabled. Produces an empty toolbar.
    pub fn none() -> Self {
        let mut options = Self::all();
        for capability in Capability::ALL {
            options.set(capability, false);
        }
        options
    }

    pub fn allows(&self, capability: Capability) -> bool {
        *self.flag(capability)
    }

    pub fn set(&mut self, capability: Capability, enabled: bool) {
        *self.flag_mut(capability) = enabled;
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, capability: Capability, enabled: bool) -> Self {
        self.set(capability, enabled);
        self
    }

    /// Whether the block-type group (paragraph, headings, blockquote) is shown.
    pub fn block_types(&self) -> bool {
        self.allow_heading1 || self.allow_subheadings || self.allow_blockquotes
    }

    /// Whether the list group is shown.
    pub fn lists(&self) -> bool {
        self.allow_unordered_lists || self.allow_ordered_lists
    }

    fn flag(&self, capability: Capability) -> &bool {
        match capability {
            Capability::Styling => &self.allow_styling,
            Capability::Strikethrough => &self.allow_strikethrough,
            Capability::Colors => &self.allow_colors,
            Capability::Clear => &self.allow_clear,
            Capability::Alignment => &self.allow_alignment,
            Capability::Lines => &self.allow_lines,
            Capability::Heading1 => &self.allow_heading1,
            Capability::Subheadings => &self.allow_subheadings,
            Capability::Blockquotes => &self.allow_blockquotes,
            Capability::UnorderedLists => &self.allow_unordered_lists,
            Capability::OrderedLists => &self.allow_ordered_lists,
            Capability::Fonts => &self.allow_fonts,
            Capability::FontSizes => &self.allow_font_sizes,
            Capability::Undo => &self.allow_undo,
        }
    }

    fn flag_mut(&mut self, capability: Capability) -> &mut bool {
        match capability {
            Capability::Styling => &mut self.allow_styling,
            Capability::Strikethrough => &mut self.allow_strikethrough,
            Capability::Colors => &mut self.allow_colors,
            Capability::Clear => &mut self.allow_clear,
            Capability::Alignment => &mut self.allow_alignment,
            Capability::Lines => &mut self.allow_lines,
            Capability::Heading1 => &mut self.allow_heading1,
            Capability::Subheadings => &mut self.allow_subheadings,
            Capability::Blockquotes => &mut self.allow_blockquotes,
            Capability::UnorderedLists => &mut self.allow_unordered_lists,
            Capability::OrderedLists => &mut self.allow_ordered_lists,
            Capability::Fonts => &mut self.allow_fonts,
            Capability::FontSizes => &mut self.allow_font_sizes,
            Capability::Undo => &mut self.allow_undo,
        }
    }
}
