//! String helpers shared by the DBML printers.

use std::cmp::Ordering;

use heck::ToSnakeCase;

/// Render a backend type as `Name` or `Name(arg1,arg2)`.
pub fn native_type_to_string(name: &str, args: &[String]) -> String {
    if args.is_empty() {
        name.to_string()
    } else {
        format!("{}({})", name, args.join(","))
    }
}

/// Split a PascalCase identifier into lower-case words: `NoAction` -> `no action`.
pub fn pascal_to_spaced(s: &str) -> String {
    s.to_snake_case().replace('_', " ")
}

/// Escape a note for a double-quoted DBML string.
pub fn escape_note(note: &str) -> String {
    note.replace('\n', "\\n")
}

/// Compare identifiers like a root-locale collator: case-insensitive first,
/// with punctuation before digits before letters. Names that tie put lower
/// case before upper case.
pub fn collate(a: &str, b: &str) -> Ordering {
    fn primary(c: char) -> (u8, char) {
        let class = if c.is_alphabetic() {
            2
        } else if c.is_numeric() {
            1
        } else {
            0
        };
        (class, c.to_lowercase().next().unwrap_or(c))
    }

    a.chars()
        .map(primary)
        .cmp(b.chars().map(primary))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}
