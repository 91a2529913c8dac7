//! # Normalizers
//!
//! Whole-text transforms applied to each plain span before pre-tokenization.
//!
//! A [`Normalizer`] is built from a [`NormalizerConfig`]; `Sequence`
//! normalizers apply their children in order.

pub mod bert;
pub mod normalizer_config;
pub mod precompiled;

#[doc(inline)]
pub use bert::BertNormalizer;
#[doc(inline)]
pub use normalizer_config::*;
#[doc(inline)]
pub use precompiled::precompiled_normalize;
use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

use crate::{
    errors::WLResult,
    support::{regex::RegexWrapper, strings::remove_accents},
};

/// A Unicode normalization form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnicodeForm {
    /// Canonical composition.
    Nfc,
    /// Canonical decomposition.
    Nfd,
    /// Compatibility composition.
    Nfkc,
    /// Compatibility decomposition.
    Nfkd,
}

impl UnicodeForm {
    /// Normalize `text` to this form.
    pub fn apply(
        self,
        text: &str,
    ) -> String {
        match self {
            Self::Nfc => text.nfc().collect(),
            Self::Nfd => text.nfd().collect(),
            Self::Nfkc => text.nfkc().collect(),
            Self::Nfkd => text.nfkd().collect(),
        }
    }
}

/// A runtime normalizer.
#[derive(Debug, Clone)]
pub enum Normalizer {
    /// A Unicode normalization form.
    Unicode(UnicodeForm),

    /// Lowercase everything.
    Lowercase,

    /// Remove every mark character.
    StripAccents,

    /// Trim whitespace.
    Strip {
        /// Trim the start.
        left: bool,
        /// Trim the end.
        right: bool,
    },

    /// Substitute every match; a pattern which failed to compile is `None`,
    /// and the normalizer is then a no-op.
    Replace {
        /// The compiled pattern.
        pattern: Option<RegexWrapper>,
        /// The literal replacement.
        content: String,
    },

    /// Prefix the text.
    Prepend(String),

    /// BERT cleanup.
    Bert(BertNormalizer),

    /// The `SentencePiece` precompiled normalization.
    Precompiled,

    /// Apply each child in order.
    Sequence(Vec<Normalizer>),
}

impl Normalizer {
    /// Build a normalizer from a typed config.
    pub fn from_config(config: &NormalizerConfig) -> WLResult<Self> {
        use NormalizerConfig as C;
        Ok(match config {
            C::NFC => Self::Unicode(UnicodeForm::Nfc),
            C::NFD => Self::Unicode(UnicodeForm::Nfd),
            C::NFKC => Self::Unicode(UnicodeForm::Nfkc),
            C::NFKD => Self::Unicode(UnicodeForm::Nfkd),
            C::Lowercase => Self::Lowercase,
            C::StripAccents => Self::StripAccents,
            C::Strip {
                strip_left,
                strip_right,
            } => Self::Strip {
                left: *strip_left,
                right: *strip_right,
            },
            C::Replace { pattern, content } => Self::Replace {
                pattern: pattern.compile_or_warn("Replace normalizer"),
                content: content.clone(),
            },
            C::Prepend { prepend } => Self::Prepend(prepend.clone()),
            C::BertNormalizer {
                clean_text,
                handle_chinese_chars,
                strip_accents,
                lowercase,
            } => Self::Bert(BertNormalizer {
                clean_text: *clean_text,
                handle_chinese_chars: *handle_chinese_chars,
                strip_accents: *strip_accents,
                lowercase: *lowercase,
            }),
            C::Precompiled { .. } => Self::Precompiled,
            C::Sequence { normalizers } => Self::Sequence(
                normalizers
                    .iter()
                    .map(Self::from_config)
                    .collect::<WLResult<_>>()?,
            ),
        })
    }

    /// Build a normalizer from a raw `tokenizer.json` value.
    pub fn from_value(value: &Value) -> WLResult<Self> {
        Self::from_config(&NormalizerConfig::from_value(value)?)
    }

    /// Normalize `text`.
    pub fn normalize(
        &self,
        text: &str,
    ) -> String {
        match self {
            Self::Unicode(form) => form.apply(text),
            Self::Lowercase => text.to_lowercase(),
            Self::StripAccents => remove_accents(text),
            Self::Strip { left, right } => match (*left, *right) {
                (true, true) => text.trim(),
                (true, false) => text.trim_start(),
                (false, true) => text.trim_end(),
                (false, false) => text,
            }
            .to_string(),
            Self::Replace { pattern, content } => match pattern {
                Some(re) => re.replace_all(text, content),
                None => text.to_string(),
            },
            Self::Prepend(prefix) => format!("{prefix}{text}"),
            Self::Bert(bert) => bert.normalize(text),
            Self::Precompiled => precompiled_normalize(text),
            Self::Sequence(children) => children
                .iter()
                .fold(text.to_string(), |acc, n| n.normalize(&acc)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn build(value: Value) -> Normalizer {
        Normalizer::from_value(&value).unwrap()
    }

    #[test]
    fn test_unicode_forms() {
        let text = "e\u{301}ﬁ";
        assert_eq!(build(json!({"type": "NFC"})).normalize(text), "éﬁ");
        assert_eq!(build(json!({"type": "NFKC"})).normalize(text), "éfi");
        assert_eq!(build(json!({"type": "NFD"})).normalize("é"), "e\u{301}");
        assert_eq!(build(json!({"type": "NFKD"})).normalize("ﬁ"), "fi");
    }

    #[test]
    fn test_simple_transforms() {
        assert_eq!(build(json!({"type": "Lowercase"})).normalize("HeLLo"), "hello");
        assert_eq!(
            build(json!({"type": "StripAccents"})).normalize("e\u{301}a"),
            "ea"
        );
        assert_eq!(
            build(json!({"type": "Prepend", "prepend": "▁"})).normalize("hi"),
            "▁hi"
        );
    }

    #[test]
    fn test_strip() {
        let text = "  a b  ";
        let strip = |l: bool, r: bool| {
            build(json!({"type": "Strip", "strip_left": l, "strip_right": r})).normalize(text)
        };
        assert_eq!(strip(true, true), "a b");
        assert_eq!(strip(true, false), "a b  ");
        assert_eq!(strip(false, true), "  a b");
        assert_eq!(strip(false, false), text);
    }

    #[test]
    fn test_replace() {
        let n = build(json!({"type": "Replace", "pattern": {"String": " "}, "content": "▁"}));
        assert_eq!(n.normalize("a b c"), "a▁b▁c");

        let n = build(json!({"type": "Replace", "pattern": {"Regex": " {2,}"}, "content": " "}));
        assert_eq!(n.normalize("a   b  c"), "a b c");
    }

    #[test]
    fn test_replace_with_bad_pattern_is_noop() {
        let n = build(json!({"type": "Replace", "pattern": {"Regex": "("}, "content": "x"}));
        assert!(matches!(n, Normalizer::Replace { pattern: None, .. }));
        assert_eq!(n.normalize("a(b"), "a(b");
    }

    #[test]
    fn test_sequence() {
        let n = build(json!({
            "type": "Sequence",
            "normalizers": [
                {"type": "Prepend", "prepend": "▁"},
                {"type": "Replace", "pattern": {"String": " "}, "content": "▁"}
            ]
        }));
        assert_eq!(n.normalize("Hey friend"), "▁Hey▁friend");
    }

    #[test]
    fn test_precompiled() {
        let n = build(json!({"type": "Precompiled", "precompiled_charsmap": null}));
        assert_eq!(n.normalize("ａ\u{00A0}b"), "a b");
    }
}
