//! # Tokenizer Config
//!
//! The `tokenizer_config.json` document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{WLResult, WordlatheError};

/// The special token fields, in the order chat templates see them.
pub const SPECIAL_TOKEN_ATTRIBUTES: [&str; 7] = [
    "bos_token",
    "eos_token",
    "unk_token",
    "sep_token",
    "pad_token",
    "cls_token",
    "mask_token",
];

/// Which end of a sequence receives padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddingSide {
    /// Pad before the tokens.
    Left,

    /// Pad after the tokens.
    #[default]
    Right,
}

/// A named chat template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedChatTemplate {
    /// The template name (`"default"`, `"tool_use"`, ...).
    pub name: String,

    /// The template source.
    pub template: String,
}

/// The `chat_template` field: one template, or a list of named ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatTemplateConfig {
    /// A single template.
    Single(String),

    /// Named templates.
    Named(Vec<NamedChatTemplate>),
}

impl ChatTemplateConfig {
    /// Look up a named template.
    ///
    /// A `Single` template has no names.
    pub fn get(
        &self,
        name: &str,
    ) -> Option<&str> {
        match self {
            Self::Single(_) => None,
            Self::Named(templates) => templates
                .iter()
                .find(|t| t.name == name)
                .map(|t| t.template.as_str()),
        }
    }

    /// The sorted template names.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Single(_) => Vec::new(),
            Self::Named(templates) => {
                let mut names: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
                names.sort_unstable();
                names
            }
        }
    }
}

/// The `tokenizer_config.json` document.
///
/// Special token fields are kept raw: each is a string, an
/// ``{"__type": "AddedToken", "content": ...}`` object, or null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Beginning-of-sequence token.
    #[serde(default)]
    pub bos_token: Option<Value>,

    /// End-of-sequence token.
    #[serde(default)]
    pub eos_token: Option<Value>,

    /// Unknown token.
    #[serde(default)]
    pub unk_token: Option<Value>,

    /// Separator token.
    #[serde(default)]
    pub sep_token: Option<Value>,

    /// Padding token; falls back to `eos_token`.
    #[serde(default)]
    pub pad_token: Option<Value>,

    /// Classifier token.
    #[serde(default)]
    pub cls_token: Option<Value>,

    /// Mask token.
    #[serde(default)]
    pub mask_token: Option<Value>,

    /// Extra special tokens.
    #[serde(default)]
    pub additional_special_tokens: Vec<Value>,

    /// The maximum sequence length; may be a huge float.
    #[serde(default)]
    pub model_max_length: Option<f64>,

    /// Padding side.
    #[serde(default)]
    pub padding_side: Option<PaddingSide>,

    /// Default for decode-time cleanup.
    #[serde(default)]
    pub clean_up_tokenization_spaces: Option<bool>,

    /// Chat template(s).
    #[serde(default)]
    pub chat_template: Option<ChatTemplateConfig>,

    /// Trim and collapse whitespace before normalizing.
    #[serde(default)]
    pub remove_space: Option<bool>,

    /// Lowercase and strip accents before normalizing.
    #[serde(default)]
    pub do_lowercase_and_remove_accent: Option<bool>,

    /// The tokenizer class name (`"BertTokenizer"`, ...).
    #[serde(default)]
    pub tokenizer_class: Option<String>,

    /// Selects one language's vocabulary from a multilingual Legacy model.
    #[serde(default)]
    pub target_lang: Option<String>,
}

impl TokenizerConfig {
    /// Parse a config from JSON text.
    pub fn from_json_str(json: &str) -> WLResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The raw value of a special token field, by attribute name.
    pub fn special_token_field(
        &self,
        field: &str,
    ) -> Option<&Value> {
        match field {
            "bos_token" => self.bos_token.as_ref(),
            "eos_token" => self.eos_token.as_ref(),
            "unk_token" => self.unk_token.as_ref(),
            "sep_token" => self.sep_token.as_ref(),
            "pad_token" => self.pad_token.as_ref(),
            "cls_token" => self.cls_token.as_ref(),
            "mask_token" => self.mask_token.as_ref(),
            _ => None,
        }
    }

    /// Resolve the first set special token field among `fields`.
    ///
    /// ## Arguments
    /// * `fields` - attribute names, tried in order.
    ///
    /// ## Returns
    /// The token text, `None` when no field is set, or
    /// `UnsupportedSpecialToken` for a malformed value.
    pub fn special_token(
        &self,
        fields: &[&str],
    ) -> WLResult<Option<String>> {
        for field in fields {
            if let Some(value) = self.special_token_field(field)
                && let Some(content) = special_token_content(field, value)?
            {
                return Ok(Some(content));
            }
        }
        Ok(None)
    }

    /// The contents of `additional_special_tokens`.
    pub fn additional_special_tokens(&self) -> WLResult<Vec<String>> {
        let mut tokens = Vec::with_capacity(self.additional_special_tokens.len());
        for value in &self.additional_special_tokens {
            if let Some(content) = special_token_content("additional_special_tokens", value)? {
                tokens.push(content);
            }
        }
        Ok(tokens)
    }

    /// `model_max_length`, saturated to `usize`.
    pub fn model_max_length(&self) -> Option<usize> {
        self.model_max_length.map(|len| len as usize)
    }
}

/// The text of a special token value.
///
/// Empty strings and nulls count as unset. Objects must be tagged
/// `"__type": "AddedToken"` and carry a string `content`.
pub fn special_token_content(
    field: &str,
    value: &Value,
) -> WLResult<Option<String>> {
    let unsupported = || WordlatheError::UnsupportedSpecialToken {
        field: field.to_string(),
    };
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Object(map) => {
            if map.get("__type").and_then(Value::as_str) != Some("AddedToken") {
                return Err(unsupported());
            }
            match map.get("content") {
                Some(Value::String(s)) => Ok(Some(s.clone())),
                _ => Err(unsupported()),
            }
        }
        _ => Err(unsupported()),
    }
}
