/// Lowercases `text` and drops everything that is not `a-z` or a plain space.
///
/// Characters are removed rather than replaced, so `"don't!"` becomes `"dont"`.
pub fn clean_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|&c| c.is_ascii_lowercase() || c == ' ')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_digits_and_case() {
        assert_eq!(clean_text("Good, GOOD day!! #2023"), "good good day ");
        assert_eq!(clean_text("don't"), "dont");
    }

    #[test]
    fn tabs_and_newlines_are_dropped_not_spaced() {
        assert_eq!(clean_text("a\tb\nc"), "abc");
    }

    #[test]
    fn non_ascii_letters_are_removed() {
        assert_eq!(clean_text("café naïve"), "caf nave");
        // Kelvin sign lowercases to ASCII 'k' and is kept
        assert_eq!(clean_text("\u{212A}ind"), "kind");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn is_idempotent() {
        for s in ["Hello, World", "  multiple   spaces ", "ÀÉÎ mixed 123 text", ""] {
            let once = clean_text(s);
            assert_eq!(clean_text(&once), once);
        }
    }
}
