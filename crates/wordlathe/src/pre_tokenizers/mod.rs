//! # Pre-Tokenizers
//!
//! Split normalized text into the words a segmentation model sees.
//!
//! A [`PreTokenizer`] is built from a [`PreTokenizerConfig`]. Each variant
//! maps one text to a list of pieces; applied to a list, it flat-maps.
//! `Sequence` feeds every piece of one child into the next.

pub mod byte_level;
pub mod metaspace;
pub mod pre_tokenizer_config;

#[doc(inline)]
pub use byte_level::*;
#[doc(inline)]
pub use metaspace::*;
#[doc(inline)]
pub use pre_tokenizer_config::*;
use serde_json::Value;

use crate::{
    errors::WLResult,
    support::regex::{ConstRegexPattern, RegexWrapper},
};

/// BERT punctuation: `\p{P}` plus every ASCII symbol.
macro_rules! punctuation_class {
    () => {
        r"\p{P}\x21-\x2F\x3A-\x40\x5B-\x60\x7B-\x7E"
    };
}

/// Words, or single punctuation characters.
pub const BERT_PATTERN: ConstRegexPattern = ConstRegexPattern::Basic(concat!(
    r"[^\s",
    punctuation_class!(),
    r"]+|[",
    punctuation_class!(),
    r"]"
));

/// Runs of punctuation, and runs of everything else.
pub const PUNCTUATION_PATTERN: ConstRegexPattern = ConstRegexPattern::Basic(concat!(
    r"[^",
    punctuation_class!(),
    r"]+|[",
    punctuation_class!(),
    r"]+"
));

/// ASCII word-character runs, and runs of other non-space characters.
pub const WHITESPACE_PATTERN: ConstRegexPattern =
    ConstRegexPattern::Basic(r"[A-Za-z0-9_]+|[^A-Za-z0-9_\s]+");

/// Runs of non-whitespace.
pub const WHITESPACE_SPLIT_PATTERN: ConstRegexPattern = ConstRegexPattern::Basic(r"\S+");

/// Digit runs, and runs of everything else.
pub const DIGITS_PATTERN: ConstRegexPattern = ConstRegexPattern::Basic(r"[^0-9]+|[0-9]+");

/// Single digits, and runs of everything else.
pub const INDIVIDUAL_DIGITS_PATTERN: ConstRegexPattern =
    ConstRegexPattern::Basic(r"[^0-9]+|[0-9]");

/// How a `Split` pre-tokenizer treats its pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitMode {
    /// Keep only the matches.
    Matches,

    /// Drop the matches and empty pieces.
    Removed,

    /// Keep the matches as their own pieces.
    Isolated,
}

/// A runtime pre-tokenizer.
#[derive(Debug, Clone)]
pub enum PreTokenizer {
    /// BERT: trim, then words and single punctuation characters.
    Bert(RegexWrapper),

    /// GPT-2 byte-level.
    ByteLevel(ByteLevelPreTokenizer),

    /// Return every match of the regex.
    Matches(RegexWrapper),

    /// Metaspace glyph replacement.
    Metaspace(MetaspacePreTokenizer),

    /// Split on a pattern.
    Split {
        /// The compiled pattern.
        pattern: RegexWrapper,
        /// What to keep.
        mode: SplitMode,
    },

    /// Substitute every match; a pattern which failed to compile is `None`.
    Replace {
        /// The compiled pattern.
        pattern: Option<RegexWrapper>,
        /// The literal replacement.
        content: String,
    },

    /// Chunks of at most `length` chars.
    FixedLength(usize),

    /// Apply each child to every piece of the previous one.
    Sequence(Vec<PreTokenizer>),
}

impl PreTokenizer {
    /// Build a pre-tokenizer from a typed config.
    pub fn from_config(config: &PreTokenizerConfig) -> WLResult<Self> {
        use PreTokenizerConfig as C;
        Ok(match config {
            C::BertPreTokenizer => Self::Bert(BERT_PATTERN.compile()?),
            C::ByteLevel {
                add_prefix_space,
                use_regex,
            } => Self::ByteLevel(ByteLevelPreTokenizer::new(*add_prefix_space, *use_regex)?),
            C::Whitespace => Self::Matches(WHITESPACE_PATTERN.compile()?),
            C::WhitespaceSplit => Self::Matches(WHITESPACE_SPLIT_PATTERN.compile()?),
            C::Metaspace {
                replacement,
                str_rep,
                add_prefix_space,
                prepend_scheme,
            } => Self::Metaspace(MetaspacePreTokenizer {
                replacement: replacement.clone(),
                str_rep: str_rep
                    .clone()
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| replacement.clone()),
                prepend_scheme: match add_prefix_space {
                    Some(false) => PrependScheme::Never,
                    _ => *prepend_scheme,
                },
            }),
            C::Split {
                pattern,
                behavior,
                invert,
            } => {
                let mode = if *invert {
                    SplitMode::Matches
                } else if behavior
                    .as_deref()
                    .is_some_and(|b| b.eq_ignore_ascii_case("removed"))
                {
                    SplitMode::Removed
                } else {
                    SplitMode::Isolated
                };
                Self::Split {
                    pattern: pattern.compile()?,
                    mode,
                }
            }
            C::Punctuation => Self::Matches(PUNCTUATION_PATTERN.compile()?),
            C::Digits { individual_digits } => Self::Matches(if *individual_digits {
                INDIVIDUAL_DIGITS_PATTERN.compile()?
            } else {
                DIGITS_PATTERN.compile()?
            }),
            C::Replace { pattern, content } => Self::Replace {
                pattern: pattern.compile_or_warn("Replace pre-tokenizer"),
                content: content.clone(),
            },
            C::FixedLength { length } => Self::FixedLength(*length),
            C::Sequence { pretokenizers } => Self::Sequence(
                pretokenizers
                    .iter()
                    .map(Self::from_config)
                    .collect::<WLResult<_>>()?,
            ),
        })
    }

    /// Build a pre-tokenizer from a raw `tokenizer.json` value.
    pub fn from_value(value: &Value) -> WLResult<Self> {
        Self::from_config(&PreTokenizerConfig::from_value(value)?)
    }

    /// Pre-tokenize one piece of text.
    ///
    /// ## Arguments
    /// * `text` - the text.
    /// * `section_index` - the text's section position in the input, if known.
    pub fn pre_tokenize_text(
        &self,
        text: &str,
        section_index: Option<usize>,
    ) -> Vec<String> {
        match self {
            Self::Bert(re) => owned(re.find_strs(text.trim())),
            Self::ByteLevel(byte_level) => byte_level.pre_tokenize_text(text),
            Self::Matches(re) => owned(re.find_strs(text)),
            Self::Metaspace(metaspace) => metaspace.pre_tokenize_text(text, section_index),
            Self::Split { pattern, mode } => match mode {
                SplitMode::Matches => owned(pattern.find_strs(text)),
                SplitMode::Removed => pattern.split_removed(text),
                SplitMode::Isolated => pattern.split_keep(text),
            },
            Self::Replace { pattern, content } => vec![match pattern {
                Some(re) => re.replace_all(text, content),
                None => text.to_string(),
            }],
            Self::FixedLength(length) => fixed_length_chunks(text, *length),
            Self::Sequence(children) => {
                children
                    .iter()
                    .fold(vec![text.to_string()], |pieces, child| {
                        child.pre_tokenize(&pieces, section_index)
                    })
            }
        }
    }

    /// Pre-tokenize every piece, concatenating the results.
    pub fn pre_tokenize<S: AsRef<str>>(
        &self,
        texts: &[S],
        section_index: Option<usize>,
    ) -> Vec<String> {
        texts
            .iter()
            .flat_map(|t| self.pre_tokenize_text(t.as_ref(), section_index))
            .collect()
    }
}

fn owned(pieces: Vec<&str>) -> Vec<String> {
    pieces.into_iter().map(str::to_string).collect()
}

/// Split `text` into chunks of `length` chars; a zero length keeps it whole.
fn fixed_length_chunks(
    text: &str,
    length: usize,
) -> Vec<String> {
    if length == 0 {
        return vec![text.to_string()];
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(length)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn build(value: Value) -> PreTokenizer {
        PreTokenizer::from_value(&value).unwrap()
    }

    #[test]
    fn test_bert() {
        let p = build(json!({"type": "BertPreTokenizer"}));
        assert_eq!(
            p.pre_tokenize_text("  Hello, world!! $5 ", None),
            vec!["Hello", ",", "world", "!", "!", "$", "5"]
        );
        assert_eq!(p.pre_tokenize_text("¿qué?", None), vec!["¿", "qué", "?"]);
    }

    #[test]
    fn test_whitespace_variants() {
        let split = build(json!({"type": "WhitespaceSplit"}));
        assert_eq!(
            split.pre_tokenize_text(" a,b \t c ", None),
            vec!["a,b", "c"]
        );

        let ws = build(json!({"type": "Whitespace"}));
        assert_eq!(
            ws.pre_tokenize_text("Hey man!! how_are you?", None),
            vec!["Hey", "man", "!!", "how_are", "you", "?"]
        );
    }

    #[test]
    fn test_punctuation_and_digits() {
        let p = build(json!({"type": "Punctuation", "behavior": "isolated"}));
        assert_eq!(p.pre_tokenize_text("a,.b", None), vec!["a", ",.", "b"]);

        let d = build(json!({"type": "Digits", "individual_digits": false}));
        assert_eq!(d.pre_tokenize_text("ab123c4", None), vec!["ab", "123", "c", "4"]);

        let d = build(json!({"type": "Digits", "individual_digits": true}));
        assert_eq!(d.pre_tokenize_text("a12", None), vec!["a", "1", "2"]);
    }

    #[test]
    fn test_split_modes() {
        let isolated = build(json!({
            "type": "Split", "pattern": {"String": " "}, "behavior": "Isolated", "invert": false
        }));
        assert_eq!(
            isolated.pre_tokenize_text("a b  c", None),
            vec!["a", " ", "b", " ", " ", "c"]
        );

        let removed = build(json!({
            "type": "Split", "pattern": {"String": " "}, "behavior": "Removed", "invert": false
        }));
        assert_eq!(removed.pre_tokenize_text("a b  c", None), vec!["a", "b", "c"]);

        let inverted = build(json!({
            "type": "Split", "pattern": {"Regex": "\\d+"}, "behavior": "Removed", "invert": true
        }));
        assert_eq!(inverted.pre_tokenize_text("a12b3", None), vec!["12", "3"]);
    }

    #[test]
    fn test_replace_and_fixed_length() {
        let r = build(json!({"type": "Replace", "pattern": {"String": " "}, "content": "_"}));
        assert_eq!(r.pre_tokenize_text("a b", None), vec!["a_b"]);

        let f = build(json!({"type": "FixedLength", "length": 2}));
        assert_eq!(f.pre_tokenize_text("abcde", None), vec!["ab", "cd", "e"]);
        assert_eq!(fixed_length_chunks("ab", 0), vec!["ab"]);
        assert!(fixed_length_chunks("", 3).is_empty());
    }

    #[test]
    fn test_sequence() {
        let p = build(json!({
            "type": "Sequence",
            "pretokenizers": [
                {"type": "WhitespaceSplit"},
                {"type": "Digits", "individual_digits": true}
            ]
        }));
        assert_eq!(p.pre_tokenize_text("ab12 c3", None), vec!["ab", "1", "2", "c", "3"]);
    }

    #[test]
    fn test_metaspace_prepends_by_scheme() {
        let p = build(json!({"type": "Metaspace", "replacement": "▁", "prepend_scheme": "always"}));
        assert_eq!(p.pre_tokenize_text("a b", Some(1)), vec!["▁a▁b"]);

        let p = build(json!({"type": "Metaspace", "replacement": "▁", "add_prefix_space": false}));
        assert_eq!(p.pre_tokenize_text("a b", Some(0)), vec!["a▁b"]);

        let p = build(json!({"type": "Metaspace", "add_prefix_space": true, "prepend_scheme": "never"}));
        assert_eq!(p.pre_tokenize_text("a", Some(0)), vec!["a"]);
    }

    #[test]
    fn test_metaspace_section_index() {
        let p = build(json!({"type": "Metaspace", "replacement": "▁", "prepend_scheme": "first"}));
        assert_eq!(p.pre_tokenize_text("a b", Some(0)), vec!["▁a▁b"]);
        assert_eq!(p.pre_tokenize(&["a b"], Some(1)), vec!["a▁b"]);
    }
}
