//! # Post-Processors
//!
//! Combine the token sequences of one or two texts into the final token
//! list, adding special tokens and assigning token type ids.

pub mod post_processor_config;

#[doc(inline)]
pub use post_processor_config::*;
use serde_json::Value;

use crate::errors::WLResult;

/// The output of a post-processor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostProcessedOutput {
    /// The combined tokens.
    pub tokens: Vec<String>,

    /// Per-token type ids, when the processor assigns them.
    pub token_type_ids: Option<Vec<u32>>,
}

/// Which wrapping style a [`PostProcessor::Bert`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BertStyle {
    /// `[CLS] A [SEP] B [SEP]`.
    Bert,

    /// `<s> A </s> </s> B </s>`.
    Roberta,
}

/// A runtime post-processor.
#[derive(Debug, Clone)]
pub enum PostProcessor {
    /// BERT / `RoBERTa` wrapping.
    Bert {
        /// The classifier token.
        cls: String,
        /// The separator token.
        sep: String,
        /// The wrapping style.
        style: BertStyle,
    },

    /// Template expansion.
    Template {
        /// The template for one sequence.
        single: Vec<TemplateItem>,
        /// The template for a pair.
        pair: Vec<TemplateItem>,
    },

    /// Plain concatenation.
    ByteLevel,

    /// Apply each child in order.
    Sequence(Vec<PostProcessor>),
}

impl PostProcessor {
    /// Build a post-processor from a typed config.
    pub fn from_config(config: &PostProcessorConfig) -> Self {
        use PostProcessorConfig as C;
        match config {
            C::BertProcessing { cls, sep } => Self::Bert {
                cls: cls.0.clone(),
                sep: sep.0.clone(),
                style: BertStyle::Bert,
            },
            C::RobertaProcessing { cls, sep } => Self::Bert {
                cls: cls.0.clone(),
                sep: sep.0.clone(),
                style: BertStyle::Roberta,
            },
            C::TemplateProcessing { single, pair } => Self::Template {
                single: single.clone(),
                pair: pair.clone(),
            },
            C::ByteLevel => Self::ByteLevel,
            C::Sequence { processors } => {
                Self::Sequence(processors.iter().map(Self::from_config).collect())
            }
        }
    }

    /// Build a post-processor from a raw `tokenizer.json` value.
    pub fn from_value(value: &Value) -> WLResult<Self> {
        Ok(Self::from_config(&PostProcessorConfig::from_value(value)?))
    }

    /// Combine `tokens` and the optional `pair`.
    ///
    /// ## Arguments
    /// * `tokens` - the first sequence.
    /// * `pair` - the second sequence, if any.
    /// * `add_special_tokens` - emit the processor's special tokens.
    pub fn process(
        &self,
        tokens: Vec<String>,
        pair: Option<Vec<String>>,
        add_special_tokens: bool,
    ) -> PostProcessedOutput {
        match self {
            Self::Bert { cls, sep, style } => {
                let mut tokens = tokens;
                if add_special_tokens {
                    tokens.insert(0, cls.clone());
                    tokens.push(sep.clone());
                }
                let mut type_ids = vec![0; tokens.len()];

                if let Some(pair) = pair {
                    let first_len = tokens.len();
                    if add_special_tokens && *style == BertStyle::Roberta {
                        tokens.push(sep.clone());
                    }
                    tokens.extend(pair);
                    if add_special_tokens {
                        tokens.push(sep.clone());
                    }
                    type_ids.extend(std::iter::repeat_n(1, tokens.len() - first_len));
                }

                PostProcessedOutput {
                    tokens,
                    token_type_ids: Some(type_ids),
                }
            }
            Self::Template { single, pair: pair_template } => {
                let template = if pair.is_some() { pair_template } else { single };
                let mut out = Vec::new();
                let mut type_ids = Vec::new();
                for item in template {
                    match item {
                        TemplateItem::SpecialToken { id, type_id } => {
                            if add_special_tokens {
                                out.push(id.clone());
                                type_ids.push(*type_id);
                            }
                        }
                        TemplateItem::Sequence { id, type_id } => {
                            let sequence: &[String] = match id.as_str() {
                                "A" => &tokens,
                                "B" => pair.as_deref().unwrap_or_default(),
                                _ => &[],
                            };
                            out.extend(sequence.iter().cloned());
                            type_ids.extend(std::iter::repeat_n(*type_id, sequence.len()));
                        }
                    }
                }
                PostProcessedOutput {
                    tokens: out,
                    token_type_ids: Some(type_ids),
                }
            }
            Self::ByteLevel => {
                let mut tokens = tokens;
                tokens.extend(pair.into_iter().flatten());
                PostProcessedOutput {
                    tokens,
                    token_type_ids: None,
                }
            }
            Self::Sequence(children) => {
                let mut tokens = tokens;
                let mut pair = pair;
                let mut token_type_ids = None;
                for child in children {
                    if let Self::ByteLevel = child {
                        // Byte-level steps see each sequence on its own.
                        tokens = child.process(tokens, None, add_special_tokens).tokens;
                        pair = pair.map(|p| child.process(p, None, add_special_tokens).tokens);
                    } else {
                        let output = child.process(tokens, pair.clone(), add_special_tokens);
                        tokens = output.tokens;
                        token_type_ids = output.token_type_ids;
                    }
                }
                PostProcessedOutput {
                    tokens,
                    token_type_ids,
                }
            }
        }
    }
}
