use std::sync::OnceLock;

use regex::Regex;

/// Number of prompt words kept in a download filename
const FILENAME_WORDS: usize = 2;

/// Derive the download filename for the image at `index`
///
/// Everything that is neither a word character nor whitespace is
/// dropped, the first two remaining words are joined with underscores,
/// lowercased, and suffixed with `_<index>.png`. A prompt with no words
/// left (e.g. `"!!!"`) yields `_<index>.png`.
///
/// Word characters are letters, numbers and `_`; combining marks are not
/// word characters. The ASCII separators U+001C to U+001F count as
/// whitespace.
pub fn derive_filename(prompt: &str, index: usize) -> String {
    fn punctuation() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"[^\p{L}\p{N}_\s\x{1C}-\x{1F}]").expect("must be valid regex"))
    }

    let stripped = punctuation().replace_all(prompt, "");
    let prefix = stripped
        .split(is_separator)
        .filter(|word| !word.is_empty())
        .take(FILENAME_WORDS)
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();

    format!("{prefix}_{index}.png")
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_two_words() {
        assert_eq!(derive_filename("A Cat, Sitting!", 0), "a_cat_0.png");
    }

    #[test]
    fn punctuation_only_prompt_has_empty_prefix() {
        assert_eq!(derive_filename("!!!", 2), "_2.png");
    }

    #[test]
    fn single_word() {
        assert_eq!(derive_filename("one", 5), "one_5.png");
    }

    #[test]
    fn empty_prompt() {
        assert_eq!(derive_filename("", 0), "_0.png");
    }

    #[test]
    fn same_input_same_output() {
        let inputs = ["A Cat, Sitting!", "", "  spaced   out  words ", "日本の 猫 です", "🐈‍⬛ cat"];
        for (i, input) in inputs.iter().enumerate() {
            assert_eq!(derive_filename(input, i), derive_filename(input, i));
        }
    }

    #[test]
    fn unicode_words_survive() {
        assert_eq!(derive_filename("Crème Brûlée tart", 1), "crème_brûlée_1.png");
        assert_eq!(derive_filename("🐈 cat on a mat", 0), "cat_on_0.png");
    }

    #[test]
    fn underscores_and_digits_are_word_characters() {
        assert_eq!(derive_filename("snake_case 42 things", 3), "snake_case_42_3.png");
    }

    #[test]
    fn combining_marks_are_dropped() {
        assert_eq!(derive_filename("cafe\u{301} au lait", 0), "cafe_au_0.png");
    }

    #[test]
    fn information_separators_split_words() {
        assert_eq!(derive_filename("a\u{1c}b c", 0), "a_b_0.png");
        assert_eq!(derive_filename("x\u{1f}y\u{1d}z", 4), "x_y_4.png");
    }

    #[test]
    fn punctuation_inside_words_is_removed_not_split() {
        assert_eq!(derive_filename("don't stop", 0), "dont_stop_0.png");
    }
}
