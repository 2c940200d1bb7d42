//! Text cleanup applied before any pattern runs.
//!
//! PDF text extractors emit CRLF line endings and non-breaking spaces
//! depending on the producer. Patterns only ever look for `[ \t]` between
//! columns and `\n` between rows, so both are folded here.

/// Normalize line endings to `\n` and exotic horizontal whitespace to ASCII space.
pub fn normalize_text(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    text.chars()
        .map(|c| {
            // form feed separates pages
            if c == '\u{0c}' {
                '\n'
            } else if c.is_whitespace() && c != '\n' && c != '\t' && c != ' ' {
                ' '
            } else {
                c
            }
        })
        .collect()
}
