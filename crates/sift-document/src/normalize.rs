//! Whitespace normalization.

/// Collapses every run of whitespace into a single ASCII space and trims both ends.
///
/// Whitespace is anything `char::is_whitespace` accepts, so newlines, tabs and non-breaking
/// spaces all collapse. The result is idempotent.
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_and_trims() {
        assert_eq!(normalize_whitespace("  a\n\tb "), "a b");
        assert_eq!(normalize_whitespace("one   two\r\n\r\nthree"), "one two three");
    }

    #[test]
    fn empty_and_blank_inputs() {
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace(" \n\t "), "");
    }

    #[test]
    fn non_breaking_space_collapses() {
        assert_eq!(normalize_whitespace("a\u{a0}\u{a0}b"), "a b");
    }

    #[test]
    fn idempotent() {
        for input in ["", "  a\n\tb ", "x", " lead", "trail ", "a  b   c", "\u{2003}em\u{2003}"] {
            let once = normalize_whitespace(input);
            assert_eq!(normalize_whitespace(&once), once, "input: {input:?}");
        }
    }
}
