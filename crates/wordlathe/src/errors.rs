//! # Error Types

use crate::support::regex::ErrorWrapper;

/// Errors from wordlathe operations.
#[derive(Debug, thiserror::Error)]
pub enum WordlatheError {
    /// A component config named a `type` this crate does not implement.
    #[error("unknown {family} type: {type_name}")]
    UnknownComponentType {
        /// The component family (`"normalizer"`, `"model"`, ...).
        family: &'static str,

        /// The unrecognized `type` tag.
        type_name: String,
    },

    /// The model config is missing its vocabulary.
    #[error("model config has no vocab")]
    MissingVocab,

    /// A config document is internally inconsistent.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A special token field in the tokenizer config has an unsupported shape.
    #[error("unsupported special token value for `{field}`")]
    UnsupportedSpecialToken {
        /// The config field name.
        field: String,
    },

    /// A regex pattern failed to compile.
    #[error("regex compile error: {0}")]
    Regex(#[from] ErrorWrapper),

    /// `decode` was called with no ids.
    #[error("token_ids must be a non-empty array of integers")]
    EmptyDecode,

    /// A batch call was given no texts.
    #[error("text array must be non-empty")]
    EmptyBatch,

    /// `text_pair` does not match the shape of `text`.
    #[error("text_pair mismatch: {0}")]
    TextPairMismatch(String),

    /// The batch could not be packed into uniform rows.
    #[error(
        "unable to create tensor, you should probably activate truncation and/or padding \
         with 'padding=true' and 'truncation=true' to have batched tensors with the same length"
    )]
    RaggedBatch,

    /// Padding was requested but the tokenizer has no pad token.
    #[error("padding requested but no pad token is configured")]
    MissingPadToken,

    /// A token has no id, and there is no unknown token to fall back on.
    #[error("token {token:?} is not in the vocabulary and no unknown token is configured")]
    UnresolvableToken {
        /// The unresolved token.
        token: String,
    },

    /// Chat template selection or rendering failed.
    #[error("chat template: {0}")]
    ChatTemplate(String),

    /// JSON parse error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for wordlathe operations.
pub type WLResult<T> = core::result::Result<T, WordlatheError>;
