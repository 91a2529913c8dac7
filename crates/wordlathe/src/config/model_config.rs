//! # Model Config
//!
//! The `model` section of `tokenizer.json`. One struct covers every model
//! type; each model reads the fields it needs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{WLResult, WordlatheError};

/// A BPE merge rule, in either of the two serialized shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MergeConfig {
    /// ``["left", "right"]``
    Pair([String; 2]),

    /// ``"left right"``
    SpaceSeparated(String),
}

impl MergeConfig {
    /// The ``(left, right)`` pair.
    ///
    /// Space-separated rules split on the first space; any text after a
    /// second space is ignored.
    pub fn to_pair(&self) -> WLResult<(String, String)> {
        match self {
            Self::Pair([left, right]) => Ok((left.clone(), right.clone())),
            Self::SpaceSeparated(raw) => {
                let mut parts = raw.split(' ');
                match (parts.next(), parts.next()) {
                    (Some(left), Some(right)) => Ok((left.to_string(), right.to_string())),
                    _ => Err(WordlatheError::InvalidConfig(format!(
                        "invalid BPE merge entry {raw:?}"
                    ))),
                }
            }
        }
    }
}

/// The `model` section of `tokenizer.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    /// The model `type` tag; inferred from the other fields when absent.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// The vocabulary: a ``{token: id}`` map, a ``[[piece, score]]`` list,
    /// or a map of per-language maps.
    #[serde(default)]
    pub vocab: Option<Value>,

    /// BPE merge rules, highest priority first.
    #[serde(default)]
    pub merges: Option<Vec<MergeConfig>>,

    /// The unknown token.
    #[serde(default)]
    pub unk_token: Option<String>,

    /// The unknown token id (Unigram).
    #[serde(default)]
    pub unk_id: Option<usize>,

    /// Prefix marking non-initial pieces (WordPiece).
    #[serde(default)]
    pub continuing_subword_prefix: Option<String>,

    /// Suffix marking non-final pieces (BPE).
    #[serde(default)]
    pub continuing_subword_suffix: Option<String>,

    /// Suffix appended to the last symbol of a word (BPE).
    #[serde(default)]
    pub end_of_word_suffix: Option<String>,

    /// Words longer than this become the unknown token (WordPiece).
    #[serde(default)]
    pub max_input_chars_per_word: Option<usize>,

    /// Explode out-of-vocabulary pieces into `<0xXX>` tokens (BPE).
    #[serde(default)]
    pub byte_fallback: Option<bool>,

    /// Whole-word vocabulary hits skip merging (BPE).
    #[serde(default)]
    pub ignore_merges: Option<bool>,

    /// Fuse runs of unknown tokens.
    #[serde(default)]
    pub fuse_unk: Option<bool>,
}
