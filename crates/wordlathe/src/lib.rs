//! # `wordlathe` Subword Tokenizer Runtime
//!
//! `wordlathe` loads `tokenizer.json` / `tokenizer_config.json` pairs and
//! reproduces their fast-tokenizer behaviour exactly: BPE, WordPiece,
//! Unigram and vocabulary-only models, with the normalizer, pre-tokenizer,
//! post-processor and decoder families around them.
//!
//! See:
//! * [`tokenizer`] for the [`Tokenizer`] orchestrator.
//! * [`models`] for the segmentation models.
//! * [`normalizers`], [`pre_tokenizers`], [`post_processors`], and
//!   [`decoders`] for the pipeline components.
//! * [`config`] for the typed JSON documents.
//!
//! ## Example
//!
//! ```rust,no_run
//! use wordlathe::{CallOptions, DecodeOptions, Tokenizer};
//!
//! let tokenizer = Tokenizer::from_dir("models/bert-base-uncased")?;
//!
//! let batch = tokenizer.call(
//!     vec!["Hello world!", "How are you?"],
//!     &CallOptions::default().with_padding(true).with_truncation(true),
//! )?;
//!
//! let text = tokenizer.decode(
//!     batch.input_ids()[0],
//!     &DecodeOptions::default().with_skip_special_tokens(true),
//! )?;
//! # Ok::<(), wordlathe::WordlatheError>(())
//! ```
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
#![warn(missing_docs, unused)]

pub mod collections;
pub mod config;
pub mod decoders;
pub mod errors;
pub mod models;
pub mod normalizers;
pub mod post_processors;
pub mod pre_tokenizers;
pub mod support;
pub mod tokenizer;
pub mod types;

#[doc(inline)]
pub use errors::{WLResult, WordlatheError};
#[doc(inline)]
pub use tokenizer::{
    BatchEncoding,
    CallOptions,
    ChatOutput,
    ChatTemplateOptions,
    ChatTemplateRenderer,
    DecodeOptions,
    EncodeOptions,
    Encoding,
    Padding,
    SpecialTokenKind,
    TextInput,
    Tokenizer,
};
#[doc(inline)]
pub use types::TokenId;
