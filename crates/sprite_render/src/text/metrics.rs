/// Advance width used for characters missing from the table.
pub const DEFAULT_ADVANCE: u32 = 6;

/// Horizontal advance of `ch` in pixels.
///
/// The lookup is case-insensitive: `ch` is upper-cased first. Characters that
/// upper-case to more than one code point, or that are not in the table, use
/// [`DEFAULT_ADVANCE`].
pub fn width_of(ch: char) -> u32 {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(upper), None) => table_width(upper).unwrap_or(DEFAULT_ADVANCE),
        _ => DEFAULT_ADVANCE,
    }
}

/// Sum of the advances of every character in `text`.
pub fn text_width(text: &str) -> u32 {
    text.chars().map(width_of).sum()
}

/// Whether `ch` has an explicit entry in the width table.
pub fn is_mapped(ch: char) -> bool {
    let mut upper = ch.to_uppercase();
    matches!((upper.next(), upper.next()), (Some(upper), None) if table_width(upper).is_some())
}

fn table_width(upper: char) -> Option<u32> {
    let width = match upper {
        ' ' => 3,
        'I' => 4,
        'A'..='Z' | '0'..='9' => 6,
        '!' | '.' | ',' | ':' | ';' => 2,
        '"' | '<' | '>' => 4,
        '(' | ')' | '[' | ']' | '{' | '}' => 3,
        '?' | '+' | '-' | '*' | '/' => 6,
        _ => return None,
    };
    Some(width)
}
