//! Font family and size catalogs offered by the toolbar dropdowns.

/// Font families, in dropdown order.
pub const FONT_CATALOG: &[&str] = &[
    "Andale Mono",
    "Arial",
    "Avenir Next",
    "Baskerville",
    "Bookman Old Style",
    "Comic Sans MS",
    "Consolas",
    "Courier",
    "Courier New",
    "Courier Prime",
    "Courier Screenplay",
    "Cousine",
    "Dark Courier",
    "Futura",
    "Garamond",
    "Geneva",
    "Georgia",
    "Helvetica",
    "Helvetica Neue",
    "iA Writer Duo S",
    "IBM Plex Mono",
    "Impact",
    "Lato",
    "Lucida Console",
    "Lucida Grande",
    "Lucida Sans Unicode",
    "Menlo",
    "Monaco",
    "Monospace",
    "Montserrat",
    "Open Sans",
    "Optima",
    "Palatino",
    "PT Mono",
    "PT Sans",
    "PT Serif",
    "Sans-Serif",
    "Serif",
    "Tahoma",
    "Times New Roman",
    "Trebuchet MS",
    "Verdana",
];

/// `fontSize` command values. The command only understands 1 through 7.
pub const FONT_SIZES: &[&str] = &["1", "2", "3", "4", "5", "6", "7"];
