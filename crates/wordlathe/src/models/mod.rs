//! # Models
//!
//! Segmentation models: each maps pre-tokenized words to vocabulary tokens.
//!
//! * [`WordPieceModel`] - greedy longest match.
//! * [`BpeModel`] - ranked pair merges.
//! * [`UnigramModel`] - lattice Viterbi.
//! * [`LegacyModel`] - identity.
//!
//! [`TokenizerModel`] dispatches over the four, and applies the shared
//! unknown-run fusion step.

pub mod bpe;
pub mod legacy;
pub mod unigram;
pub mod vocab;
pub mod wordpiece;

#[doc(inline)]
pub use bpe::*;
#[doc(inline)]
pub use legacy::*;
#[doc(inline)]
pub use unigram::*;
#[doc(inline)]
pub use vocab::*;
#[doc(inline)]
pub use wordpiece::*;

use crate::{
    config::{ModelConfig, TokenizerConfig},
    errors::{WLResult, WordlatheError},
    types::TokenId,
};

/// A runtime segmentation model.
#[derive(Debug, Clone)]
pub enum TokenizerModel {
    /// WordPiece.
    WordPiece(WordPieceModel),

    /// Byte-pair encoding.
    Bpe(BpeModel),

    /// Unigram.
    Unigram(UnigramModel),

    /// Vocabulary-only identity model.
    Legacy(LegacyModel),
}

impl TokenizerModel {
    /// Build a model from its config.
    ///
    /// A config without a `type` is inferred from its shape:
    /// an array `vocab` is Unigram; a map `vocab` with both
    /// `continuing_subword_prefix` and `unk_token` is BPE (when it has
    /// merges) or WordPiece; anything else is Legacy.
    ///
    /// ## Arguments
    /// * `config` - the `model` section of `tokenizer.json`.
    /// * `tokenizer_config` - supplies the EOS, unknown and `target_lang` settings.
    pub fn from_config(
        config: &ModelConfig,
        tokenizer_config: &TokenizerConfig,
    ) -> WLResult<Self> {
        match config.kind.as_deref() {
            Some("WordPiece") => Ok(Self::WordPiece(WordPieceModel::from_config(config)?)),
            Some("BPE") => Ok(Self::Bpe(BpeModel::from_config(config)?)),
            Some("Unigram") => Ok(Self::Unigram(UnigramModel::from_config(
                config,
                tokenizer_config,
            )?)),
            Some(other) => Err(WordlatheError::UnknownComponentType {
                family: "model",
                type_name: other.to_string(),
            }),
            None => {
                let vocab = config.vocab.as_ref().ok_or(WordlatheError::MissingVocab)?;
                if vocab.is_array() {
                    Ok(Self::Unigram(UnigramModel::from_config(
                        config,
                        tokenizer_config,
                    )?))
                } else if config.continuing_subword_prefix.is_some() && config.unk_token.is_some() {
                    if config.merges.is_some() {
                        Ok(Self::Bpe(BpeModel::from_config(config)?))
                    } else {
                        Ok(Self::WordPiece(WordPieceModel::from_config(config)?))
                    }
                } else {
                    Ok(Self::Legacy(LegacyModel::from_config(
                        config,
                        tokenizer_config,
                    )?))
                }
            }
        }
    }

    /// The model's type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::WordPiece(_) => "WordPiece",
            Self::Bpe(_) => "BPE",
            Self::Unigram(_) => "Unigram",
            Self::Legacy(_) => "Legacy",
        }
    }

    /// The vocabulary.
    pub fn vocab(&self) -> &Vocab {
        match self {
            Self::WordPiece(m) => m.vocab(),
            Self::Bpe(m) => m.vocab(),
            Self::Unigram(m) => m.vocab(),
            Self::Legacy(m) => m.vocab(),
        }
    }

    /// The vocabulary, mutably.
    pub fn vocab_mut(&mut self) -> &mut Vocab {
        match self {
            Self::WordPiece(m) => m.vocab_mut(),
            Self::Bpe(m) => m.vocab_mut(),
            Self::Unigram(m) => m.vocab_mut(),
            Self::Legacy(m) => m.vocab_mut(),
        }
    }

    /// The BPE end-of-word suffix, if any.
    pub fn end_of_word_suffix(&self) -> Option<&str> {
        match self {
            Self::Bpe(m) => m.end_of_word_suffix(),
            _ => None,
        }
    }

    /// Does this model fuse runs of unknown tokens?
    pub fn fuses_unk(&self) -> bool {
        match self {
            Self::Bpe(m) => m.fuse_unk(),
            Self::Unigram(_) => true,
            _ => false,
        }
    }

    /// Segment words into tokens, fusing unknown runs when enabled.
    pub fn encode<S: AsRef<str>>(
        &self,
        words: &[S],
    ) -> Vec<String> {
        let tokens = match self {
            Self::WordPiece(m) => m.encode(words),
            Self::Bpe(m) => m.encode(words),
            Self::Unigram(m) => m.encode(words),
            Self::Legacy(m) => m.encode(words),
        };
        if self.fuses_unk() {
            fuse_unk(tokens, self.vocab())
        } else {
            tokens
        }
    }

    /// Map tokens to ids; misses resolve to the unknown id.
    pub fn convert_tokens_to_ids<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> WLResult<Vec<TokenId>> {
        self.vocab().convert_tokens_to_ids(tokens)
    }

    /// Map ids to tokens; misses resolve to the unknown token.
    pub fn convert_ids_to_tokens(
        &self,
        ids: &[TokenId],
    ) -> WLResult<Vec<String>> {
        self.vocab().convert_ids_to_tokens(ids)
    }
}

/// Fuse each run of tokens resolving to the unknown id into its first token.
///
/// Continuations are appended only when the run's first token is not
/// itself a literal vocabulary hit for the unknown id.
pub fn fuse_unk(
    tokens: Vec<String>,
    vocab: &Vocab,
) -> Vec<String> {
    let resolve = |t: &str| vocab.token_id_or_unk(t);
    let unk = vocab.unk_token_id();

    let mut fused: Vec<String> = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        fused.push(tokens[i].clone());
        if resolve(&tokens[i]) != unk {
            i += 1;
            continue;
        }

        loop {
            i += 1;
            if i >= tokens.len() || resolve(&tokens[i]) != unk {
                break;
            }
            if let Some(last) = fused.last_mut()
                && vocab.token_id(last) != unk
            {
                last.push_str(&tokens[i]);
            }
        }
    }
    fused
}
