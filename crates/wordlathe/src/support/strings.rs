//! # String Utilities

use std::borrow::Cow;

use unicode_general_category::{GeneralCategory, get_general_category};

/// "stable" stub for for [`String::from_utf8_lossy`].
///
/// Reuses the buffer when it is already valid UTF-8.
pub fn string_from_utf8_lossy(v: Vec<u8>) -> String {
    match String::from_utf8(v) {
        Ok(s) => s,
        Err(err) => match String::from_utf8_lossy(err.as_bytes()) {
            Cow::Owned(s) => s,
            Cow::Borrowed(s) => s.to_string(),
        },
    }
}

/// Undo the spaces a word-level detokenizer leaves before punctuation and contractions.
///
/// The substitutions run in this exact order.
pub fn clean_up_tokenization(text: &str) -> String {
    text.replace(" .", ".")
        .replace(" ?", "?")
        .replace(" !", "!")
        .replace(" ,", ",")
        .replace(" ' ", "'")
        .replace(" n't", "n't")
        .replace(" 'm", "'m")
        .replace(" 's", "'s")
        .replace(" 've", "'ve")
        .replace(" 're", "'re")
}

/// Is `c` a mark (`\p{M}`)?
pub fn is_mark(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::NonspacingMark
            | GeneralCategory::SpacingMark
            | GeneralCategory::EnclosingMark
    )
}

/// Remove every mark (`\p{M}`) character.
pub fn remove_accents(text: &str) -> String {
    text.chars().filter(|&c| !is_mark(c)).collect()
}

/// Lowercase, then remove accents.
pub fn lowercase_and_remove_accent(text: &str) -> String {
    remove_accents(&text.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_from_lossy_utf8() {
        let s = string_from_utf8_lossy(vec![0x61, 0x62, 0xff, 0x28]);
        assert_eq!(s, "ab\u{fffd}(");

        let s = string_from_utf8_lossy(vec![0x61, 0x62]);
        assert_eq!(s, "ab");
    }

    #[test]
    fn test_clean_up_tokenization() {
        assert_eq!(
            clean_up_tokenization("hello , world . it 's we 're they 've i 'm do n't ' x ?!"),
            "hello, world. it's we're they've i'm don't'x?!"
        );
        assert_eq!(clean_up_tokenization("wait !"), "wait!");
    }

    #[test]
    fn test_remove_accents() {
        assert_eq!(remove_accents("cafe\u{301}"), "cafe");
        assert_eq!(remove_accents("café"), "café");
        assert_eq!(lowercase_and_remove_accent("CAFE\u{301}"), "cafe");
    }
}
