//! # WordPiece
//!
//! Greedy longest-match-first segmentation with a continuing-subword prefix.

use crate::{
    config::ModelConfig,
    errors::{WLResult, WordlatheError},
    models::Vocab,
};

/// The default continuing-subword prefix.
pub const DEFAULT_CONTINUING_SUBWORD_PREFIX: &str = "##";

/// The default word length limit, in chars.
pub const DEFAULT_MAX_INPUT_CHARS_PER_WORD: usize = 100;

/// The WordPiece model.
#[derive(Debug, Clone)]
pub struct WordPieceModel {
    vocab: Vocab,
    continuing_subword_prefix: String,
    max_input_chars_per_word: usize,
}

impl WordPieceModel {
    /// Build from a `model` config.
    pub fn from_config(config: &ModelConfig) -> WLResult<Self> {
        let vocab = config.vocab.as_ref().ok_or(WordlatheError::MissingVocab)?;
        let mut vocab = Vocab::from_json_map(vocab)?;
        vocab.set_unk_token(config.unk_token.clone());
        Ok(Self::new(vocab)
            .with_continuing_subword_prefix(
                config
                    .continuing_subword_prefix
                    .as_deref()
                    .unwrap_or(DEFAULT_CONTINUING_SUBWORD_PREFIX),
            )
            .with_max_input_chars_per_word(
                config
                    .max_input_chars_per_word
                    .unwrap_or(DEFAULT_MAX_INPUT_CHARS_PER_WORD),
            ))
    }

    /// Build with default options.
    pub fn new(vocab: Vocab) -> Self {
        Self {
            vocab,
            continuing_subword_prefix: DEFAULT_CONTINUING_SUBWORD_PREFIX.to_string(),
            max_input_chars_per_word: DEFAULT_MAX_INPUT_CHARS_PER_WORD,
        }
    }

    /// Set the continuing-subword prefix.
    pub fn with_continuing_subword_prefix(
        mut self,
        prefix: &str,
    ) -> Self {
        self.continuing_subword_prefix = prefix.to_string();
        self
    }

    /// Set the word length limit.
    pub fn with_max_input_chars_per_word(
        mut self,
        limit: usize,
    ) -> Self {
        self.max_input_chars_per_word = limit;
        self
    }

    /// The vocabulary.
    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }

    /// The vocabulary, mutably.
    pub fn vocab_mut(&mut self) -> &mut Vocab {
        &mut self.vocab
    }

    /// The continuing-subword prefix.
    pub fn continuing_subword_prefix(&self) -> &str {
        &self.continuing_subword_prefix
    }

    /// The word length limit, in chars.
    pub fn max_input_chars_per_word(&self) -> usize {
        self.max_input_chars_per_word
    }

    /// Segment each word.
    pub fn encode<S: AsRef<str>>(
        &self,
        words: &[S],
    ) -> Vec<String> {
        let mut tokens = Vec::new();
        for word in words {
            let word = word.as_ref();
            match self.segment(word) {
                Some(pieces) => tokens.extend(pieces),
                None => tokens.push(self.vocab.unk_or(word)),
            }
        }
        tokens
    }

    /// Segment one word; `None` when it must become the unknown token.
    fn segment(
        &self,
        word: &str,
    ) -> Option<Vec<String>> {
        let mut offsets: Vec<usize> = word.char_indices().map(|(i, _)| i).collect();
        let char_count = offsets.len();
        if char_count > self.max_input_chars_per_word {
            return None;
        }
        offsets.push(word.len());

        let mut pieces = Vec::new();
        let mut start = 0;
        while start < char_count {
            let mut end = char_count;
            let mut found = None;
            while start < end {
                let span = &word[offsets[start]..offsets[end]];
                let candidate = if start > 0 {
                    format!("{}{span}", self.continuing_subword_prefix)
                } else {
                    span.to_string()
                };
                if self.vocab.contains(&candidate) {
                    found = Some(candidate);
                    break;
                }
                end -= 1;
            }
            pieces.push(found?);
            start = end;
        }
        Some(pieces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> WordPieceModel {
        let mut vocab = Vocab::from_pairs([
            ("[UNK]", 0),
            ("[CLS]", 1),
            ("[SEP]", 2),
            ("he", 3),
            ("##llo", 4),
            ("##l", 5),
            ("##lo", 6),
            ("un", 7),
            ("##aff", 8),
            ("##able", 9),
        ]);
        vocab.set_unk_token(Some("[UNK]".to_string()));
        WordPieceModel::new(vocab)
    }

    #[test]
    fn test_greedy_longest_match() {
        let m = model();
        assert_eq!(m.encode(&["hello"]), vec!["he", "##llo"]);
        assert_eq!(m.encode(&["unaffable"]), vec!["un", "##aff", "##able"]);
        assert_eq!(m.encode(&["hell"]), vec!["he", "##l", "##l"]);
    }

    #[test]
    fn test_unmatched_word_is_unknown() {
        let m = model();
        assert_eq!(m.encode(&["hex", "he"]), vec!["[UNK]", "he"]);
        assert_eq!(m.encode(&["xyz"]), vec!["[UNK]"]);
    }

    #[test]
    fn test_long_words_are_unknown() {
        let m = model().with_max_input_chars_per_word(4);
        assert_eq!(m.max_input_chars_per_word(), 4);
        assert_eq!(m.encode(&["hello"]), vec!["[UNK]"]);
        assert_eq!(m.encode(&["hell"]), vec!["he", "##l", "##l"]);
    }

    #[test]
    fn test_from_config() {
        let config: ModelConfig = serde_json::from_str(
            r###"{"type": "WordPiece", "unk_token": "[UNK]", "continuing_subword_prefix": "##",
                 "max_input_chars_per_word": 100,
                 "vocab": {"[UNK]": 0, "[CLS]": 1, "[SEP]": 2, "he": 3, "##llo": 4}}"###,
        )
        .unwrap();
        let m = WordPieceModel::from_config(&config).unwrap();
        assert_eq!(m.continuing_subword_prefix(), "##");
        assert_eq!(m.encode(&["hello"]), vec!["he", "##llo"]);
        assert_eq!(m.vocab().convert_tokens_to_ids(&["he", "##llo"]).unwrap(), vec![3, 4]);

        let missing = ModelConfig::default();
        assert!(matches!(
            WordPieceModel::from_config(&missing),
            Err(WordlatheError::MissingVocab)
        ));
    }
}
