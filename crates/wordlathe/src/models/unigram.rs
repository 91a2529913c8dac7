//! # Unigram
//!
//! `SentencePiece`-style segmentation: the maximum-score path through a
//! lattice of every vocabulary prefix at every char position.

use crate::{
    collections::{CharTrie, TokenLattice},
    config::{ModelConfig, TokenizerConfig},
    errors::{WLResult, WordlatheError},
    models::Vocab,
    types::TokenId,
};

/// The score gap between the worst piece and the unknown token.
pub const UNK_SCORE_PENALTY: f64 = 10.0;

/// The Unigram model.
#[derive(Debug, Clone)]
pub struct UnigramModel {
    vocab: Vocab,
    scores: Vec<f64>,
    unk_score: f64,
    bos_token_id: Option<TokenId>,
    eos_token_id: Option<TokenId>,
    trie: CharTrie,
}

impl UnigramModel {
    /// Build from a `model` config.
    ///
    /// The EOS id is resolved from the tokenizer config's `eos_token`.
    pub fn from_config(
        config: &ModelConfig,
        tokenizer_config: &TokenizerConfig,
    ) -> WLResult<Self> {
        let vocab = config.vocab.as_ref().ok_or(WordlatheError::MissingVocab)?;
        let pieces: Vec<(String, f64)> = serde_json::from_value(vocab.clone()).map_err(|e| {
            WordlatheError::InvalidConfig(format!("Unigram vocab must be [piece, score] pairs: {e}"))
        })?;
        let eos_token = tokenizer_config.special_token(&["eos_token"])?;
        Self::new(pieces, config.unk_id, eos_token.as_deref())
    }

    /// Build from ``(piece, score)`` pairs; a piece's id is its index.
    ///
    /// ## Arguments
    /// * `pieces` - the scored vocabulary.
    /// * `unk_id` - the index of the unknown piece, if any.
    /// * `eos_token` - the piece used as the lattice EOS, if any.
    pub fn new(
        pieces: Vec<(String, f64)>,
        unk_id: Option<usize>,
        eos_token: Option<&str>,
    ) -> WLResult<Self> {
        if let Some(unk_id) = unk_id
            && unk_id >= pieces.len()
        {
            return Err(WordlatheError::InvalidConfig(format!(
                "unk_id {unk_id} is out of range for a vocab of {}",
                pieces.len()
            )));
        }

        let min_score = pieces
            .iter()
            .map(|(_, score)| *score)
            .reduce(f64::min)
            .unwrap_or(0.0);
        let unk_score = min_score - UNK_SCORE_PENALTY;

        let mut scores: Vec<f64> = pieces.iter().map(|(_, score)| *score).collect();
        if let Some(unk_id) = unk_id {
            scores[unk_id] = unk_score;
        }

        let trie: CharTrie = pieces.iter().map(|(piece, _)| piece.as_str()).collect();
        let mut vocab = Vocab::from_pairs(
            pieces
                .into_iter()
                .enumerate()
                .map(|(id, (piece, _))| (piece, id as TokenId)),
        );
        vocab.set_unk_token_id(unk_id.map(|id| id as TokenId));

        let bos_token_id = vocab.token_id(" ");
        let eos_token_id = eos_token.and_then(|t| vocab.token_id(t));

        Ok(Self {
            vocab,
            scores,
            unk_score,
            bos_token_id,
            eos_token_id,
            trie,
        })
    }

    /// The vocabulary.
    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }

    /// The vocabulary, mutably.
    pub fn vocab_mut(&mut self) -> &mut Vocab {
        &mut self.vocab
    }

    /// The score of `id`; ids without a score get the unknown score.
    pub fn score(
        &self,
        id: TokenId,
    ) -> f64 {
        self.scores
            .get(id as usize)
            .copied()
            .unwrap_or(self.unk_score)
    }

    /// The unknown token's score.
    pub fn unk_score(&self) -> f64 {
        self.unk_score
    }

    /// Segment each word.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, words)))]
    pub fn encode<S: AsRef<str>>(
        &self,
        words: &[S],
    ) -> Vec<String> {
        let mut tokens = Vec::new();
        for word in words {
            let mut lattice = TokenLattice::new(word.as_ref(), self.bos_token_id, self.eos_token_id);
            self.populate_nodes(&mut lattice);
            tokens.extend(lattice.tokens());
        }
        tokens
    }

    fn populate_nodes(
        &self,
        lattice: &mut TokenLattice,
    ) {
        let unk_id = self.vocab.unk_token_id();
        for pos in 0..lattice.len() {
            let matches: Vec<(usize, f64, Option<TokenId>)> = self
                .trie
                .common_prefix_search(lattice.suffix(pos))
                .map(|prefix| {
                    let id = self.vocab.token_id(prefix);
                    let score = id.map_or(self.unk_score, |id| self.score(id));
                    (prefix.chars().count(), score, id)
                })
                .collect();

            let mut has_single_char = false;
            for (length, score, id) in matches {
                has_single_char |= length == 1;
                lattice.insert(pos, length, score, id);
            }
            if !has_single_char {
                lattice.insert(pos, 1, self.unk_score, unk_id);
            }
        }
    }
}
