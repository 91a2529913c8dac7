//! # Tokenizer Definition
//!
//! The `tokenizer.json` document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{config::ModelConfig, errors::WLResult, types::TokenId};

/// A literal which is always emitted as one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedToken {
    /// The token id.
    pub id: TokenId,

    /// The literal text.
    pub content: String,

    /// Only match whole words.
    #[serde(default)]
    pub single_word: bool,

    /// Strip whitespace from the end of the preceding span.
    #[serde(default)]
    pub lstrip: bool,

    /// Strip whitespace from the start of the following span.
    #[serde(default)]
    pub rstrip: bool,

    /// Is this a special (structural) token?
    #[serde(default)]
    pub special: bool,

    /// Was the literal matched against normalized text?
    #[serde(default)]
    pub normalized: bool,
}

impl AddedToken {
    /// Create a plain, non-special added token.
    pub fn new<S: Into<String>>(
        id: TokenId,
        content: S,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            single_word: false,
            lstrip: false,
            rstrip: false,
            special: false,
            normalized: false,
        }
    }

    /// Set the `special` flag.
    pub fn with_special(
        mut self,
        special: bool,
    ) -> Self {
        self.special = special;
        self
    }

    /// Set the `lstrip` flag.
    pub fn with_lstrip(
        mut self,
        lstrip: bool,
    ) -> Self {
        self.lstrip = lstrip;
        self
    }

    /// Set the `rstrip` flag.
    pub fn with_rstrip(
        mut self,
        rstrip: bool,
    ) -> Self {
        self.rstrip = rstrip;
        self
    }
}

/// The `tokenizer.json` document.
///
/// Component configs are kept raw; see [`crate::config::parse_component`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerDefinition {
    /// The normalizer config.
    #[serde(default)]
    pub normalizer: Option<Value>,

    /// The pre-tokenizer config.
    #[serde(default)]
    pub pre_tokenizer: Option<Value>,

    /// The segmentation model config.
    pub model: ModelConfig,

    /// The post-processor config.
    #[serde(default)]
    pub post_processor: Option<Value>,

    /// The decoder config.
    #[serde(default)]
    pub decoder: Option<Value>,

    /// The added tokens.
    #[serde(default)]
    pub added_tokens: Vec<AddedToken>,
}

impl TokenizerDefinition {
    /// Parse a definition from JSON text.
    pub fn from_json_str(json: &str) -> WLResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a definition from a JSON value.
    pub fn from_value(value: Value) -> WLResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_definition() {
        let def = TokenizerDefinition::from_json_str(
            r#"{
                "version": "1.0",
                "truncation": null,
                "normalizer": null,
                "pre_tokenizer": {"type": "WhitespaceSplit"},
                "model": {"type": "WordPiece", "vocab": {"[UNK]": 0}, "unk_token": "[UNK]"},
                "added_tokens": [
                    {"id": 0, "content": "[UNK]", "special": true, "lstrip": false,
                     "rstrip": false, "single_word": false, "normalized": false}
                ]
            }"#,
        )
        .unwrap();

        assert!(def.normalizer.is_none());
        assert!(def.pre_tokenizer.is_some());
        assert!(def.decoder.is_none());
        assert_eq!(def.model.kind.as_deref(), Some("WordPiece"));
        assert_eq!(
            def.added_tokens,
            vec![AddedToken::new(0, "[UNK]").with_special(true)]
        );
    }

    #[test]
    fn test_added_token_defaults() {
        let token: AddedToken = serde_json::from_str(r#"{"id": 7, "content": "<x>"}"#).unwrap();
        assert_eq!(token, AddedToken::new(7, "<x>"));
        assert!(!token.lstrip && !token.rstrip && !token.special);
    }
}
