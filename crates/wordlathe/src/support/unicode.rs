//! # Unicode Character Classes

use unicode_general_category::{GeneralCategory, get_general_category};

/// Is `c` in one of the CJK Unified Ideograph blocks?
///
/// Hangul, Hiragana and Katakana are deliberately absent; those scripts
/// are space-separated like Latin.
pub fn is_chinese_char(c: char) -> bool {
    matches!(
        c as u32,
        0x4E00..=0x9FFF
            | 0x3400..=0x4DBF
            | 0x20000..=0x2A6DF
            | 0x2A700..=0x2B73F
            | 0x2B740..=0x2B81F
            | 0x2B820..=0x2CEAF
            | 0xF900..=0xFAFF
            | 0x2F800..=0x2FA1F
    )
}

/// Is `c` a control character, as BERT cleans them?
///
/// Tab, newline and carriage return count as whitespace, not control.
pub fn is_control(c: char) -> bool {
    if matches!(c, '\t' | '\n' | '\r') {
        return false;
    }
    matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::PrivateUse
            | GeneralCategory::Surrogate
    )
}
