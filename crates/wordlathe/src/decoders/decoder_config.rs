//! # Decoder Config

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    config::{ComponentFamily, parse_component},
    errors::WLResult,
    pre_tokenizers::{PrependScheme, default_replacement},
    support::regex::PatternConfig,
};

/// The decoder family, for `type` checking.
pub const DECODER_FAMILY: ComponentFamily = ComponentFamily {
    name: "decoder",
    known_types: &[
        "WordPiece",
        "Metaspace",
        "ByteLevel",
        "BPEDecoder",
        "CTC",
        "ByteFallback",
        "Fuse",
        "Strip",
        "Replace",
        "Sequence",
    ],
    sequence_key: "decoders",
};

fn default_true() -> bool {
    true
}

fn default_wordpiece_prefix() -> String {
    "##".to_string()
}

fn default_bpe_suffix() -> String {
    "</w>".to_string()
}

fn default_pad_token() -> String {
    "<pad>".to_string()
}

fn default_word_delimiter_token() -> String {
    "|".to_string()
}

/// A `tokenizer.json` decoder config.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DecoderConfig {
    /// Rejoin `##` continuation pieces.
    WordPiece {
        /// The continuation prefix.
        #[serde(default = "default_wordpiece_prefix")]
        prefix: String,

        /// Apply the tokenization cleanup table to each token.
        #[serde(default = "default_true")]
        cleanup: bool,
    },

    /// Turn the Metaspace glyph back into spaces.
    Metaspace {
        /// The glyph.
        #[serde(default = "default_replacement")]
        replacement: String,

        /// Legacy flag; an explicit `false` keeps the leading space.
        #[serde(default)]
        add_prefix_space: Option<bool>,

        /// When the glyph was prepended; `never` keeps the leading space.
        #[serde(default)]
        prepend_scheme: Option<PrependScheme>,
    },

    /// Reverse the byte-level alphabet.
    ByteLevel,

    /// Turn the end-of-word suffix into spaces.
    BPEDecoder {
        /// The end-of-word suffix.
        #[serde(default = "default_bpe_suffix")]
        suffix: String,
    },

    /// CTC collapse: dedupe, drop padding, join.
    CTC {
        /// The blank token.
        #[serde(default = "default_pad_token")]
        pad_token: String,

        /// The word boundary token.
        #[serde(default = "default_word_delimiter_token")]
        word_delimiter_token: String,

        /// Clean up and turn word boundaries into spaces.
        #[serde(default = "default_true")]
        cleanup: bool,
    },

    /// Turn `<0xXX>` runs back into text.
    ByteFallback,

    /// Join everything into one token.
    Fuse,

    /// Cut repeated characters from both ends of each token.
    Strip {
        /// The character to cut.
        content: char,

        /// How many to cut from the start, at most.
        #[serde(default)]
        start: usize,

        /// How many to cut from the end, at most.
        #[serde(default)]
        stop: usize,
    },

    /// Substitute every pattern match in each token.
    Replace {
        /// The pattern.
        pattern: PatternConfig,

        /// The literal replacement.
        #[serde(default)]
        content: String,
    },

    /// Apply each child in order.
    Sequence {
        /// The children.
        decoders: Vec<DecoderConfig>,
    },
}

impl DecoderConfig {
    /// Parse a raw `decoder` value.
    pub fn from_value(value: &Value) -> WLResult<Self> {
        parse_component(&DECODER_FAMILY, value)
    }
}
