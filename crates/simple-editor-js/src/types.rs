//! Types exposed to JavaScript via wasm-bindgen.

use serde::{Deserialize, Serialize};
use simple_editor_browser::{Capability, ToolbarOptions};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

/// Toolbar options as passed from JavaScript.
///
/// Every key is optional; missing keys keep their default of `true`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorOptions {
    #[tsify(optional)]
    pub allow_styling: Option<bool>,
    #[tsify(optional)]
    pub allow_strikethrough: Option<bool>,
    #[tsify(optional)]
    pub allow_colors: Option<bool>,
    #[tsify(optional)]
    pub allow_clear: Option<bool>,
    #[tsify(optional)]
    pub allow_alignment: Option<bool>,
    #[tsify(optional)]
    pub allow_lines: Option<bool>,
    #[tsify(optional)]
    pub allow_heading1: Option<bool>,
    #[tsify(optional)]
    pub allow_subheadings: Option<bool>,
    #[tsify(optional)]
    pub allow_blockquotes: Option<bool>,
    #[tsify(optional)]
    pub allow_unordered_lists: Option<bool>,
    #[tsify(optional)]
    pub allow_ordered_lists: Option<bool>,
    #[tsify(optional)]
    pub allow_fonts: Option<bool>,
    #[tsify(optional)]
    pub allow_font_sizes: Option<bool>,
    #[tsify(optional)]
    pub allow_undo: Option<bool>,
}

impl EditorOptions {
    fn flags(&self) -> [(Capability, Option<bool>); 14] {
        [
            (Capability::Styling, self.allow_styling),
            (Capability::Strikethrough, self.allow_strikethrough),
            (Capability::Colors, self.allow_colors),
            (Capability::Clear, self.allow_clear),
            (Capability::Alignment, self.allow_alignment),
            (Capability::Lines, self.allow_lines),
            (Capability::Heading1, self.allow_heading1),
            (Capability::Subheadings, self.allow_subheadings),
            (Capability::Blockquotes, self.allow_blockquotes),
            (Capability::UnorderedLists, self.allow_unordered_lists),
            (Capability::OrderedLists, self.allow_ordered_lists),
            (Capability::Fonts, self.allow_fonts),
            (Capability::FontSizes, self.allow_font_sizes),
            (Capability::Undo, self.allow_undo),
        ]
    }

    /// Parse an options argument. `undefined` and `null` mean "all defaults".
    pub fn from_js_value(value: JsValue) -> Result<Self, JsError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))
    }
}

impl From<EditorOptions> for ToolbarOptions {
    fn from(overrides: EditorOptions) -> Self {
        let mut options = ToolbarOptions::default();
        for (capability, value) in overrides.flags() {
            if let Some(enabled) = value {
                options.set(capability, enabled);
            }
        }
        options
    }
}

impl From<ToolbarOptions> for EditorOptions {
    fn from(options: ToolbarOptions) -> Self {
        let flag = |capability| Some(options.allows(capability));
        Self {
            allow_styling: flag(Capability::Styling),
            allow_strikethrough: flag(Capability::Strikethrough),
            allow_colors: flag(Capability::Colors),
            allow_clear: flag(Capability::Clear),
            allow_alignment: flag(Capability::Alignment),
            allow_lines: flag(Capability::Lines),
            allow_heading1: flag(Capability::Heading1),
            allow_subheadings: flag(Capability::Subheadings),
            allow_blockquotes: flag(Capability::Blockquotes),
            allow_unordered_lists: flag(Capability::UnorderedLists),
            allow_ordered_lists: flag(Capability::OrderedLists),
            allow_fonts: flag(Capability::Fonts),
            allow_font_sizes: flag(Capability::FontSizes),
            allow_undo: flag(Capability::Undo),
        }
    }
}

/// The options used when `attach` is given none.
#[wasm_bindgen(js_name = defaultOptions)]
pub fn default_options() -> EditorOptions {
    ToolbarOptions::default().into()
}
