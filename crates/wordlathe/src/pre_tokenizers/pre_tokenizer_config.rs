//! # Pre-Tokenizer Config

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    config::{ComponentFamily, parse_component},
    errors::WLResult,
    pre_tokenizers::PrependScheme,
    support::regex::PatternConfig,
};

/// The pre-tokenizer family, for `type` checking.
pub const PRE_TOKENIZER_FAMILY: ComponentFamily = ComponentFamily {
    name: "pre-tokenizer",
    known_types: &[
        "BertPreTokenizer",
        "ByteLevel",
        "Whitespace",
        "WhitespaceSplit",
        "Metaspace",
        "Split",
        "Punctuation",
        "Digits",
        "Replace",
        "FixedLength",
        "Sequence",
    ],
    sequence_key: "pretokenizers",
};

fn default_true() -> bool {
    true
}

/// The default Metaspace glyph.
pub fn default_replacement() -> String {
    "\u{2581}".to_string()
}

fn default_fixed_length() -> usize {
    5
}

/// A `tokenizer.json` pre-tokenizer config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PreTokenizerConfig {
    /// BERT's word/punctuation split.
    BertPreTokenizer,

    /// GPT-2's byte-level split.
    ByteLevel {
        /// Prepend a space when the text lacks one.
        #[serde(default)]
        add_prefix_space: bool,

        /// Split with the GPT-2 pattern before mapping bytes.
        #[serde(default = "default_true")]
        use_regex: bool,
    },

    /// Word-character runs and non-space symbol runs.
    Whitespace,

    /// Split on whitespace.
    WhitespaceSplit,

    /// Replace spaces with a visible glyph.
    Metaspace {
        /// The glyph.
        #[serde(default = "default_replacement")]
        replacement: String,

        /// The text substituted for spaces; defaults to `replacement`.
        #[serde(default)]
        str_rep: Option<String>,

        /// Legacy flag; an explicit `false` means `prepend_scheme: never`.
        #[serde(default)]
        add_prefix_space: Option<bool>,

        /// When to prepend the glyph.
        #[serde(default)]
        prepend_scheme: PrependScheme,
    },

    /// Split on a pattern.
    Split {
        /// What to split on.
        pattern: PatternConfig,

        /// `"Removed"` drops the delimiters; anything else keeps them.
        #[serde(default)]
        behavior: Option<String>,

        /// Keep only the matches.
        #[serde(default)]
        invert: bool,
    },

    /// Split punctuation from everything else.
    Punctuation,

    /// Split digits from everything else.
    Digits {
        /// One token per digit.
        #[serde(default)]
        individual_digits: bool,
    },

    /// Substitute every pattern match.
    Replace {
        /// What to match.
        pattern: PatternConfig,

        /// The literal replacement.
        #[serde(default)]
        content: String,
    },

    /// Fixed-size character chunks.
    FixedLength {
        /// The chunk length, in chars.
        #[serde(default = "default_fixed_length")]
        length: usize,
    },

    /// Apply each pre-tokenizer to every piece of the previous one.
    Sequence {
        /// The children.
        pretokenizers: Vec<PreTokenizerConfig>,
    },
}

impl PreTokenizerConfig {
    /// Parse a raw config, rejecting unknown `type` tags.
    pub fn from_value(value: &Value) -> WLResult<Self> {
        parse_component(&PRE_TOKENIZER_FAMILY, value)
    }
}
