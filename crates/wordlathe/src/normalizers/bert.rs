//! # BERT Normalizer

use unicode_general_category::{GeneralCategory, get_general_category};
use unicode_normalization::UnicodeNormalization;

use crate::support::unicode::{is_chinese_char, is_control};

/// BERT's text cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BertNormalizer {
    /// Drop control characters and fold whitespace to spaces.
    pub clean_text: bool,

    /// Surround CJK ideographs with spaces.
    pub handle_chinese_chars: bool,

    /// Strip accents; unset follows `lowercase`.
    pub strip_accents: Option<bool>,

    /// Lowercase everything.
    pub lowercase: bool,
}

impl Default for BertNormalizer {
    fn default() -> Self {
        Self {
            clean_text: true,
            handle_chinese_chars: true,
            strip_accents: None,
            lowercase: true,
        }
    }
}

impl BertNormalizer {
    /// Normalize `text`.
    pub fn normalize(
        &self,
        text: &str,
    ) -> String {
        let mut text = if self.clean_text {
            clean_text(text)
        } else {
            text.to_string()
        };
        if self.handle_chinese_chars {
            text = pad_chinese_chars(&text);
        }
        if self.lowercase {
            text = text.to_lowercase();
            if self.strip_accents != Some(false) {
                text = strip_nonspacing_marks(&text);
            }
        } else if self.strip_accents == Some(true) {
            text = strip_nonspacing_marks(&text);
        }
        text
    }
}

/// Drop NUL, U+FFFD, and control characters; whitespace becomes ``' '``.
fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|&c| c != '\0' && c != '\u{FFFD}' && !is_control(c))
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect()
}

fn pad_chinese_chars(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if is_chinese_char(c) {
            out.push(' ');
            out.push(c);
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}

/// NFD, then drop nonspacing marks (`\p{Mn}`).
fn strip_nonspacing_marks(text: &str) -> String {
    text.nfd()
        .filter(|&c| get_general_category(c) != GeneralCategory::NonspacingMark)
        .collect()
}
