//! Terminal-safe rendering of text read from site files.

use std::borrow::Cow;
use std::fmt::Write;

/// Format characters that render as nothing or reorder the line around them
fn is_hidden_format_char(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{034F}'
            | '\u{061C}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{2069}'
            | '\u{FEFF}'
    )
}

fn needs_escape(c: char) -> bool {
    (c.is_control() && c != '\n' && c != '\t') || is_hidden_format_char(c)
}

/// Make a content string safe to print.
///
/// Terminal escape sequences are dropped, other control characters and
/// invisible format characters are shown as escapes, everything else passes
/// through. Returns the input unchanged when nothing needed escaping.
pub fn for_terminal(input: &str) -> Cow<'_, str> {
    let Some(first) = input.find(needs_escape) else {
        return Cow::Borrowed(input);
    };

    let mut out = String::with_capacity(input.len() + 8);
    out.push_str(&input[..first]);

    let mut rest = input[first..].chars().peekable();
    while let Some(c) = rest.next() {
        if c == '\x1b' {
            // CSI runs to its final letter; any other escape is two chars
            if rest.next_if_eq(&'[').is_some() {
                for next in rest.by_ref() {
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                rest.next();
            }
            continue;
        }
        if !needs_escape(c) {
            out.push(c);
            continue;
        }
        match c {
            '\r' => out.push_str("\\r"),
            '\x08' => out.push_str("\\b"),
            c if (c as u32) < 0x80 => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => {
                let _ = write!(out, "\\u{{{:04X}}}", c as u32);
            }
        }
    }
    Cow::Owned(out)
}

/// Single-line form for tabular output: newlines and tabs become spaces
pub fn one_line(input: &str) -> String {
    for_terminal(input)
        .chars()
        .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_borrowed() {
        let input = "Kushal | Web Developer";
        assert!(matches!(for_terminal(input), Cow::Borrowed(_)));
        assert_eq!(for_terminal(input), input);
    }

    #[test]
    fn test_keeps_non_ascii() {
        let input = "Café in Zürich ✦";
        assert!(matches!(for_terminal(input), Cow::Borrowed(_)));
    }

    #[test]
    fn test_strips_colour_codes() {
        assert_eq!(for_terminal("\x1b[31mE-Commerce\x1b[0m"), "E-Commerce");
    }

    #[test]
    fn test_strips_clear_line_after_carriage_return() {
        assert_eq!(for_terminal("Shop\r\x1b[2KFake"), "Shop\\rFake");
    }

    #[test]
    fn test_escapes_nul_and_del() {
        assert_eq!(for_terminal("a\x00b\x7fc"), "a\\x00b\\x7fc");
    }

    #[test]
    fn test_escapes_backspace() {
        assert_eq!(for_terminal("ab\x08c"), "ab\\bc");
    }

    #[test]
    fn test_shows_bidi_override() {
        assert_eq!(for_terminal("title\u{202E}gpj.exe"), "title\\u{202E}gpj.exe");
    }

    #[test]
    fn test_shows_zero_width_space() {
        assert_eq!(for_terminal("React\u{200B}Native"), "React\\u{200B}Native");
    }

    #[test]
    fn test_one_line_flattens_whitespace() {
        assert_eq!(one_line("first\nsecond\tthird"), "first second third");
    }
}
