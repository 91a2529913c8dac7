//! # Normalizer Config

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    config::{ComponentFamily, parse_component},
    errors::WLResult,
    support::regex::PatternConfig,
};

/// The normalizer family, for `type` checking.
pub const NORMALIZER_FAMILY: ComponentFamily = ComponentFamily {
    name: "normalizer",
    known_types: &[
        "NFC",
        "NFD",
        "NFKC",
        "NFKD",
        "Lowercase",
        "StripAccents",
        "Strip",
        "Replace",
        "Prepend",
        "BertNormalizer",
        "Precompiled",
        "Sequence",
    ],
    sequence_key: "normalizers",
};

fn default_true() -> bool {
    true
}

/// A `tokenizer.json` normalizer config.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NormalizerConfig {
    /// Canonical composition.
    NFC,

    /// Canonical decomposition.
    NFD,

    /// Compatibility composition.
    NFKC,

    /// Compatibility decomposition.
    NFKD,

    /// Lowercase everything.
    Lowercase,

    /// Remove every mark character.
    StripAccents,

    /// Trim whitespace.
    Strip {
        /// Trim the start.
        #[serde(default)]
        strip_left: bool,

        /// Trim the end.
        #[serde(default)]
        strip_right: bool,
    },

    /// Substitute every pattern match.
    Replace {
        /// What to match.
        pattern: PatternConfig,

        /// The literal replacement.
        #[serde(default)]
        content: String,
    },

    /// Prefix the text.
    Prepend {
        /// The prefix.
        prepend: String,
    },

    /// BERT's cleanup, CJK spacing, and lowercasing.
    BertNormalizer {
        /// Drop control characters and fold whitespace to spaces.
        #[serde(default = "default_true")]
        clean_text: bool,

        /// Surround CJK ideographs with spaces.
        #[serde(default = "default_true")]
        handle_chinese_chars: bool,

        /// Strip accents; unset follows `lowercase`.
        #[serde(default)]
        strip_accents: Option<bool>,

        /// Lowercase everything.
        #[serde(default = "default_true")]
        lowercase: bool,
    },

    /// The `SentencePiece` precompiled normalization.
    Precompiled {
        /// The serialized character map; the fixed tables are used instead.
        #[serde(default)]
        precompiled_charsmap: Option<String>,
    },

    /// Apply each normalizer in order.
    Sequence {
        /// The children.
        normalizers: Vec<NormalizerConfig>,
    },
}

impl NormalizerConfig {
    /// Parse a raw config, rejecting unknown `type` tags.
    pub fn from_value(value: &Value) -> WLResult<Self> {
        parse_component(&NORMALIZER_FAMILY, value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::WordlatheError;

    #[test]
    fn test_parse() {
        let config = NormalizerConfig::from_value(&json!({
            "type": "Sequence",
            "normalizers": [
                {"type": "NFKC"},
                {"type": "Replace", "pattern": {"String": "  "}, "content": " "},
                {"type": "BertNormalizer", "clean_text": true, "handle_chinese_chars": true,
                 "strip_accents": null, "lowercase": false},
                {"type": "Precompiled", "precompiled_charsmap": "AAAA"}
            ]
        }))
        .unwrap();

        let NormalizerConfig::Sequence { normalizers } = config else {
            panic!("expected a sequence");
        };
        assert_eq!(normalizers.len(), 4);
        assert_eq!(normalizers[0], NormalizerConfig::NFKC);
        assert_eq!(
            normalizers[2],
            NormalizerConfig::BertNormalizer {
                clean_text: true,
                handle_chinese_chars: true,
                strip_accents: None,
                lowercase: false,
            }
        );
    }

    #[test]
    fn test_unknown_type() {
        let err = NormalizerConfig::from_value(&json!({"type": "Nmt"})).unwrap_err();
        assert!(matches!(
            err,
            WordlatheError::UnknownComponentType {
                family: "normalizer",
                ..
            }
        ));
    }
}
