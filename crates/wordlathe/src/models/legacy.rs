//! # Legacy
//!
//! A vocabulary-only model for tokenizers which predate `tokenizer.json`
//! models: words pass through unchanged.

use crate::{
    config::{ModelConfig, TokenizerConfig},
    errors::{WLResult, WordlatheError},
    models::Vocab,
};

/// The identity model.
#[derive(Debug, Clone)]
pub struct LegacyModel {
    vocab: Vocab,
    bos_token: Option<String>,
    eos_token: Option<String>,
    pad_token: Option<String>,
}

impl LegacyModel {
    /// Build from a `model` config.
    ///
    /// With a `target_lang` in the tokenizer config, `vocab` is a map of
    /// per-language vocabularies and that language's is used.
    pub fn from_config(
        config: &ModelConfig,
        tokenizer_config: &TokenizerConfig,
    ) -> WLResult<Self> {
        let mut vocab = config.vocab.as_ref().ok_or(WordlatheError::MissingVocab)?;
        if let Some(lang) = &tokenizer_config.target_lang {
            vocab = vocab.get(lang).ok_or_else(|| {
                WordlatheError::InvalidConfig(format!("vocab has no entry for target_lang {lang:?}"))
            })?;
        }

        let mut vocab = Vocab::from_json_map(vocab)?;
        vocab.set_unk_token(tokenizer_config.special_token(&["unk_token"])?);

        Ok(Self {
            vocab,
            bos_token: tokenizer_config.special_token(&["bos_token"])?,
            eos_token: tokenizer_config.special_token(&["eos_token"])?,
            pad_token: tokenizer_config.special_token(&["pad_token"])?,
        })
    }

    /// Wrap a vocabulary.
    pub fn new(vocab: Vocab) -> Self {
        Self {
            vocab,
            bos_token: None,
            eos_token: None,
            pad_token: None,
        }
    }

    /// The vocabulary.
    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }

    /// The vocabulary, mutably.
    pub fn vocab_mut(&mut self) -> &mut Vocab {
        &mut self.vocab
    }

    /// The configured BOS token.
    pub fn bos_token(&self) -> Option<&str> {
        self.bos_token.as_deref()
    }

    /// The configured EOS token.
    pub fn eos_token(&self) -> Option<&str> {
        self.eos_token.as_deref()
    }

    /// The configured padding token.
    pub fn pad_token(&self) -> Option<&str> {
        self.pad_token.as_deref()
    }

    /// Pass every word through.
    pub fn encode<S: AsRef<str>>(
        &self,
        words: &[S],
    ) -> Vec<String> {
        words.iter().map(|w| w.as_ref().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let config: ModelConfig =
            serde_json::from_str(r#"{"vocab": {"<unk>": 0, "a": 1, "b": 2}}"#).unwrap();
        let tokenizer_config =
            TokenizerConfig::from_json_str(r#"{"unk_token": "<unk>", "eos_token": "b"}"#).unwrap();
        let model = LegacyModel::from_config(&config, &tokenizer_config).unwrap();

        assert_eq!(model.encode(&["a", "zz"]), vec!["a", "zz"]);
        assert_eq!(model.vocab().unk_token_id(), Some(0));
        assert_eq!(model.eos_token(), Some("b"));
        assert_eq!(model.bos_token(), None);
        assert_eq!(
            model.vocab().convert_tokens_to_ids(&["a", "zz"]).unwrap(),
            vec![1, 0]
        );
    }

    #[test]
    fn test_target_lang() {
        let config: ModelConfig = serde_json::from_str(
            r#"{"vocab": {"en": {"a": 0}, "fr": {"é": 0, "a": 1}}}"#,
        )
        .unwrap();
        let fr = TokenizerConfig::from_json_str(r#"{"target_lang": "fr"}"#).unwrap();
        let model = LegacyModel::from_config(&config, &fr).unwrap();
        assert_eq!(model.vocab().token_id("a"), Some(1));

        let de = TokenizerConfig::from_json_str(r#"{"target_lang": "de"}"#).unwrap();
        assert!(matches!(
            LegacyModel::from_config(&config, &de),
            Err(WordlatheError::InvalidConfig(_))
        ));
    }
}
