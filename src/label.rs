/// Line break inside an HTML-like DOT label.
pub const LINE_BREAK: &str = "<br/>";

/// Turns an identifier into display text: `__` breaks the line, `_and_`
/// becomes `&`, `_slash_` becomes `/` and any other `_` becomes a space.
pub fn to_label(id: &str) -> String {
    id.replace("__", LINE_BREAK)
        .replace("_and_", "&amp;")
        .replace("_slash_", "/")
        .replace('_', " ")
}
