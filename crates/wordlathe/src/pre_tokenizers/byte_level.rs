//! # Byte-Level Pre-Tokenizer
//!
//! GPT-2's contraction / letter / digit / symbol / whitespace split, with
//! every piece's UTF-8 bytes mapped through the byte-level alphabet.

use crate::{
    errors::WLResult,
    support::{
        byte_level::byte_level_encode,
        regex::{ConstRegexPattern, RegexWrapper},
    },
};

/// The GPT-2 split pattern.
pub const GPT2_PATTERN: ConstRegexPattern = ConstRegexPattern::Fancy(
    r"'s|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+(?!\S)|\s+",
);

/// The byte-level pre-tokenizer.
#[derive(Debug, Clone)]
pub struct ByteLevelPreTokenizer {
    add_prefix_space: bool,
    regex: Option<RegexWrapper>,
}

impl ByteLevelPreTokenizer {
    /// Build the pre-tokenizer.
    ///
    /// ## Arguments
    /// * `add_prefix_space` - prepend ``' '`` when the text lacks one.
    /// * `use_regex` - split with [`GPT2_PATTERN`]; otherwise the text is one piece.
    pub fn new(
        add_prefix_space: bool,
        use_regex: bool,
    ) -> WLResult<Self> {
        let regex = if use_regex {
            Some(GPT2_PATTERN.compile()?)
        } else {
            None
        };
        Ok(Self {
            add_prefix_space,
            regex,
        })
    }

    /// Pre-tokenize one piece of text.
    pub fn pre_tokenize_text(
        &self,
        text: &str,
    ) -> Vec<String> {
        let prefixed;
        let text = if self.add_prefix_space && !text.starts_with(' ') {
            prefixed = format!(" {text}");
            prefixed.as_str()
        } else {
            text
        };

        match &self.regex {
            Some(re) => re
                .find_strs(text)
                .into_iter()
                .map(byte_level_encode)
                .collect(),
            None => vec![byte_level_encode(text)],
        }
    }
}
