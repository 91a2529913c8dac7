//! # Special Tokens

use crate::{
    config::{SPECIAL_TOKEN_ATTRIBUTES, TokenizerConfig},
    errors::WLResult,
    models::Vocab,
    types::TokenId,
};

/// The structural token roles a tokenizer config can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialTokenKind {
    /// Beginning of sequence.
    Bos,
    /// End of sequence.
    Eos,
    /// Unknown.
    Unk,
    /// Separator.
    Sep,
    /// Padding.
    Pad,
    /// Classifier.
    Cls,
    /// Mask.
    Mask,
}

impl SpecialTokenKind {
    /// Every kind, in attribute order.
    pub const ALL: [SpecialTokenKind; 7] = [
        Self::Bos,
        Self::Eos,
        Self::Unk,
        Self::Sep,
        Self::Pad,
        Self::Cls,
        Self::Mask,
    ];

    /// The `tokenizer_config.json` attribute name.
    pub fn attribute(&self) -> &'static str {
        SPECIAL_TOKEN_ATTRIBUTES[*self as usize]
    }
}

/// A resolved special token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialToken {
    /// The token text.
    pub content: String,

    /// Its id, if the vocabulary has it.
    pub id: Option<TokenId>,
}

/// The special tokens of a tokenizer, by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialTokens {
    tokens: [Option<SpecialToken>; 7],
    template_values: Vec<(&'static str, String)>,
}

impl SpecialTokens {
    /// Resolve every role from `config`, with ids from `vocab`.
    ///
    /// `pad_token` falls back to `eos_token`.
    pub fn from_config(
        config: &TokenizerConfig,
        vocab: &Vocab,
    ) -> WLResult<Self> {
        let mut special = Self::default();
        for kind in SpecialTokenKind::ALL {
            let content = match kind {
                SpecialTokenKind::Pad => config.special_token(&["pad_token", "eos_token"])?,
                _ => config.special_token(&[kind.attribute()])?,
            };
            special.tokens[kind as usize] = content.map(|content| SpecialToken {
                id: vocab.token_id(&content),
                content,
            });

            if let Some(value) = config.special_token(&[kind.attribute()])? {
                special.template_values.push((kind.attribute(), value));
            }
        }
        Ok(special)
    }

    /// The token for `kind`.
    pub fn get(
        &self,
        kind: SpecialTokenKind,
    ) -> Option<&SpecialToken> {
        self.tokens[kind as usize].as_ref()
    }

    /// The text of `kind`'s token.
    pub fn content(
        &self,
        kind: SpecialTokenKind,
    ) -> Option<&str> {
        self.get(kind).map(|t| t.content.as_str())
    }

    /// The id of `kind`'s token.
    pub fn id(
        &self,
        kind: SpecialTokenKind,
    ) -> Option<TokenId> {
        self.get(kind).and_then(|t| t.id)
    }

    /// ``(attribute, text)`` for each role set in the config, without fallbacks.
    pub fn template_values(&self) -> &[(&'static str, String)] {
        &self.template_values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution() {
        let config = TokenizerConfig::from_json_str(
            r#"{"bos_token": "<s>", "eos_token": {"__type": "AddedToken", "content": "</s>"},
                "mask_token": "<mask>"}"#,
        )
        .unwrap();
        let vocab = Vocab::from_pairs([("<s>", 0), ("</s>", 2)]);
        let special = SpecialTokens::from_config(&config, &vocab).unwrap();

        assert_eq!(special.content(SpecialTokenKind::Bos), Some("<s>"));
        assert_eq!(special.id(SpecialTokenKind::Eos), Some(2));
        assert_eq!(special.content(SpecialTokenKind::Pad), Some("</s>"));
        assert_eq!(special.id(SpecialTokenKind::Pad), Some(2));
        assert_eq!(special.content(SpecialTokenKind::Mask), Some("<mask>"));
        assert_eq!(special.id(SpecialTokenKind::Mask), None);
        assert_eq!(special.get(SpecialTokenKind::Cls), None);

        let attrs: Vec<&str> = special.template_values().iter().map(|(a, _)| *a).collect();
        assert_eq!(attrs, vec!["bos_token", "eos_token", "mask_token"]);
    }

    #[test]
    fn test_attribute_names() {
        assert_eq!(SpecialTokenKind::Sep.attribute(), "sep_token");
        assert_eq!(SpecialTokenKind::Mask.attribute(), "mask_token");
    }
}
