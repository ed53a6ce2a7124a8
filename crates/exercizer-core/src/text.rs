//! Text normalization for tolerant answer comparison.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Anything that is neither a word character nor whitespace.
static PUNCTUATION: OnceLock<Regex> = OnceLock::new();

fn punctuation() -> &'static Regex {
    PUNCTUATION.get_or_init(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is valid"))
}

/// Canonicalize free text so that case, accents, and punctuation do not
/// affect equality.
///
/// Absent input normalizes to the empty string. The transformation is
/// idempotent: `normalize(normalize(x)) == normalize(x)`.
///
/// ```
/// use exercizer_core::text::normalize;
///
/// assert_eq!(normalize("Café!"), normalize("cafe"));
/// assert_eq!(normalize(None), "");
/// ```
pub fn normalize<'a>(text: impl Into<Option<&'a str>>) -> String {
    let Some(text) = text.into() else {
        return String::new();
    };

    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    punctuation().replace_all(&stripped, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_input_is_empty() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn folds_case_accents_and_punctuation() {
        assert_eq!(normalize("Café!"), "cafe");
        assert_eq!(normalize("OCÉAN"), "ocean");
        assert_eq!(normalize("Ça va? Très bien."), "ca va tres bien");
        assert_eq!(normalize("don't"), "dont");
    }

    #[test]
    fn keeps_whitespace_digits_and_underscores() {
        assert_eq!(normalize("  New York  "), "  new york  ");
        assert_eq!(normalize("snake_case 42"), "snake_case 42");
    }

    #[test]
    fn keeps_non_latin_letters() {
        assert_eq!(normalize("Москва"), "москва");
    }

    #[test]
    fn idempotent() {
        for input in ["Café!", "ÀÉÎÕÜ", "İstanbul", "Straße", "a—b", "  x\ty  ", "Ǆemal"] {
            let once = normalize(input);
            assert_eq!(normalize(once.as_str()), once, "not idempotent for {input:?}");
        }
    }
}
