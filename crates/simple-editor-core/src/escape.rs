//! HTML escaping for showing editor markup as readable text.

use std::borrow::Cow;

/// Escape `&`, `<` and `>` so markup displays literally.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    html_escape::encode_text(text)
}

/// Reverse [`escape_html`]. Other character references are decoded too.
pub fn unescape_html(text: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(text)
}

/// Turn every line feed into a `<br>` tag.
pub fn line_breaks_to_markup(text: &str) -> Cow<'_, str> {
    if text.contains('\n') {
        Cow::Owned(text.replace('\n', "<br>"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Render markup as escaped source, keeping line breaks visible.
///
/// Meant for a read-only preview pane next to the editor.
pub fn source_preview(html: &str) -> String {
    line_breaks_to_markup(&escape_html(html)).into_owned()
}
