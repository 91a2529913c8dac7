//! # Post-Processor Config

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    config::{ComponentFamily, parse_component},
    errors::WLResult,
    types::TokenId,
};

/// The post-processor family, for `type` checking.
pub const POST_PROCESSOR_FAMILY: ComponentFamily = ComponentFamily {
    name: "post-processor",
    known_types: &[
        "BertProcessing",
        "RobertaProcessing",
        "TemplateProcessing",
        "ByteLevel",
        "Sequence",
    ],
    sequence_key: "processors",
};

/// One item of a `TemplateProcessing` template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateItem {
    /// A literal special token, emitted only when special tokens are added.
    SpecialToken {
        /// The token text.
        id: String,
        /// Its token type id.
        type_id: u32,
    },

    /// One of the input sequences.
    Sequence {
        /// `"A"` or `"B"`.
        id: String,
        /// The token type id of every token in the sequence.
        type_id: u32,
    },
}

/// A `tokenizer.json` post-processor config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PostProcessorConfig {
    /// `[CLS] A [SEP] B [SEP]`.
    BertProcessing {
        /// ``(token, id)`` of the classifier token.
        cls: (String, TokenId),
        /// ``(token, id)`` of the separator token.
        sep: (String, TokenId),
    },

    /// `<s> A </s> </s> B </s>`.
    RobertaProcessing {
        /// ``(token, id)`` of the classifier token.
        cls: (String, TokenId),
        /// ``(token, id)`` of the separator token.
        sep: (String, TokenId),
    },

    /// Explicit single and pair templates.
    TemplateProcessing {
        /// The template for one sequence.
        single: Vec<TemplateItem>,
        /// The template for a pair.
        pair: Vec<TemplateItem>,
    },

    /// Concatenate the sequences.
    ByteLevel,

    /// Apply each child in order.
    Sequence {
        /// The children.
        processors: Vec<PostProcessorConfig>,
    },
}

impl PostProcessorConfig {
    /// Parse a raw `post_processor` value.
    pub fn from_value(value: &Value) -> WLResult<Self> {
        parse_component(&POST_PROCESSOR_FAMILY, value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::WordlatheError;

    #[test]
    fn test_parse_template() {
        let config = PostProcessorConfig::from_value(&json!({
            "type": "TemplateProcessing",
            "single": [
                {"SpecialToken": {"id": "[CLS]", "type_id": 0}},
                {"Sequence": {"id": "A", "type_id": 0}}
            ],
            "pair": [],
            "special_tokens": {"[CLS]": {"id": "[CLS]", "ids": [101], "tokens": ["[CLS]"]}}
        }))
        .unwrap();
        let PostProcessorConfig::TemplateProcessing { single, pair } = config else {
            panic!("expected TemplateProcessing");
        };
        assert_eq!(single.len(), 2);
        assert!(pair.is_empty());
        assert_eq!(
            single[1],
            TemplateItem::Sequence {
                id: "A".to_string(),
                type_id: 0
            }
        );
    }

    #[test]
    fn test_parse_roberta_and_unknown() {
        let config = PostProcessorConfig::from_value(&json!({
            "type": "RobertaProcessing",
            "sep": ["</s>", 2], "cls": ["<s>", 0],
            "trim_offsets": true, "add_prefix_space": true
        }))
        .unwrap();
        assert!(matches!(config, PostProcessorConfig::RobertaProcessing { .. }));

        assert!(matches!(
            PostProcessorConfig::from_value(&json!({"type": "Mystery"})),
            Err(WordlatheError::UnknownComponentType { family: "post-processor", .. })
        ));
    }
}
