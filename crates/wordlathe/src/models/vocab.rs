//! # Vocabulary
//!
//! The token ↔ id bijection owned by each model, with its unknown token.

use serde_json::Value;

use crate::{
    errors::{WLResult, WordlatheError},
    types::{TokenId, WLHashMap, hash_map_with_capacity},
};

/// A token ↔ id mapping plus the unknown-token fallback.
#[derive(Debug, Clone, Default)]
pub struct Vocab {
    token_to_id: WLHashMap<String, TokenId>,
    id_to_token: WLHashMap<TokenId, String>,
    unk_token: Option<String>,
    unk_token_id: Option<TokenId>,
}

impl Vocab {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ``(token, id)`` pairs; later duplicates win.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, TokenId)>,
        S: Into<String>,
    {
        let mut vocab = Self::new();
        for (token, id) in pairs {
            vocab.insert(token, id);
        }
        vocab
    }

    /// Build from a ``{token: id}`` JSON object.
    pub fn from_json_map(value: &Value) -> WLResult<Self> {
        let map = value.as_object().ok_or_else(|| {
            WordlatheError::InvalidConfig("vocab must be a {token: id} object".to_string())
        })?;

        let mut vocab = Self {
            token_to_id: hash_map_with_capacity(map.len()),
            id_to_token: hash_map_with_capacity(map.len()),
            ..Self::default()
        };
        for (token, id) in map {
            let id = id
                .as_u64()
                .and_then(|id| TokenId::try_from(id).ok())
                .ok_or_else(|| {
                    WordlatheError::InvalidConfig(format!("invalid id for vocab token {token:?}"))
                })?;
            vocab.insert(token.clone(), id);
        }
        Ok(vocab)
    }

    /// Map `token` to `id`, in both directions.
    ///
    /// Re-inserting a token moves it; its old id no longer resolves to it.
    pub fn insert<S: Into<String>>(
        &mut self,
        token: S,
        id: TokenId,
    ) {
        let token = token.into();
        if let Some(old_id) = self.token_to_id.insert(token.clone(), id)
            && old_id != id
            && self.id_to_token.get(&old_id) == Some(&token)
        {
            self.id_to_token.remove(&old_id);
        }
        self.id_to_token.insert(id, token);
    }

    /// Set the unknown token, resolving its id through the vocabulary.
    pub fn set_unk_token(
        &mut self,
        unk_token: Option<String>,
    ) {
        self.unk_token_id = unk_token.as_deref().and_then(|t| self.token_id(t));
        self.unk_token = unk_token;
    }

    /// Set the unknown token by id.
    pub fn set_unk_token_id(
        &mut self,
        unk_token_id: Option<TokenId>,
    ) {
        self.unk_token = unk_token_id.and_then(|id| self.id_token(id).map(str::to_string));
        self.unk_token_id = unk_token_id;
    }

    /// The number of distinct tokens.
    pub fn len(&self) -> usize {
        self.token_to_id.len()
    }

    /// Is the vocabulary empty?
    pub fn is_empty(&self) -> bool {
        self.token_to_id.is_empty()
    }

    /// Does the vocabulary contain `token`?
    pub fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.token_to_id.contains_key(token)
    }

    /// The id of `token`, if present.
    pub fn token_id(
        &self,
        token: &str,
    ) -> Option<TokenId> {
        self.token_to_id.get(token).copied()
    }

    /// The token with `id`, if present.
    pub fn id_token(
        &self,
        id: TokenId,
    ) -> Option<&str> {
        self.id_to_token.get(&id).map(String::as_str)
    }

    /// The unknown token.
    pub fn unk_token(&self) -> Option<&str> {
        self.unk_token.as_deref()
    }

    /// The unknown token id.
    pub fn unk_token_id(&self) -> Option<TokenId> {
        self.unk_token_id
    }

    /// The unknown token, or `fallback` when none is configured.
    pub fn unk_or(
        &self,
        fallback: &str,
    ) -> String {
        self.unk_token.as_deref().unwrap_or(fallback).to_string()
    }

    /// The id of `token`, falling back to the unknown id.
    pub fn token_id_or_unk(
        &self,
        token: &str,
    ) -> Option<TokenId> {
        self.token_id(token).or(self.unk_token_id)
    }

    /// Map tokens to ids; misses resolve to the unknown id.
    pub fn convert_tokens_to_ids<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> WLResult<Vec<TokenId>> {
        tokens
            .iter()
            .map(|t| {
                self.token_id_or_unk(t.as_ref())
                    .ok_or_else(|| WordlatheError::UnresolvableToken {
                        token: t.as_ref().to_string(),
                    })
            })
            .collect()
    }

    /// Map ids to tokens; misses resolve to the unknown token.
    pub fn convert_ids_to_tokens(
        &self,
        ids: &[TokenId],
    ) -> WLResult<Vec<String>> {
        ids.iter()
            .map(|&id| {
                self.id_token(id)
                    .or(self.unk_token.as_deref())
                    .map(str::to_string)
                    .ok_or_else(|| WordlatheError::UnresolvableToken {
                        token: format!("<id {id}>"),
                    })
            })
            .collect()
    }

    /// Iterate over ``(token, id)`` pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TokenId)> {
        self.token_to_id.iter().map(|(t, &id)| (t.as_str(), id))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_json_map() {
        let mut vocab = Vocab::from_json_map(&json!({"[UNK]": 0, "a": 1, "b": 3})).unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.token_id("b"), Some(3));
        assert_eq!(vocab.id_token(1), Some("a"));
        assert_eq!(vocab.id_token(2), None);

        vocab.set_unk_token(Some("[UNK]".to_string()));
        assert_eq!(vocab.unk_token_id(), Some(0));
        assert_eq!(vocab.convert_tokens_to_ids(&["a", "zz"]).unwrap(), vec![1, 0]);
        assert_eq!(
            vocab.convert_ids_to_tokens(&[3, 2, 99]).unwrap(),
            vec!["b", "[UNK]", "[UNK]"]
        );

        assert!(Vocab::from_json_map(&json!(["a"])).is_err());
        assert!(Vocab::from_json_map(&json!({"a": -1})).is_err());
    }

    #[test]
    fn test_misses_without_unk() {
        let vocab = Vocab::from_pairs([("a", 0)]);
        assert!(matches!(
            vocab.convert_tokens_to_ids(&["b"]),
            Err(WordlatheError::UnresolvableToken { token }) if token == "b"
        ));
        assert!(vocab.convert_ids_to_tokens(&[5]).is_err());
        assert_eq!(vocab.unk_or("x"), "x");
    }

    #[test]
    fn test_later_duplicates_win() {
        let mut vocab = Vocab::from_pairs([("a", 0), ("b", 1), ("a", 2)]);
        assert_eq!(vocab.token_id("a"), Some(2));
        assert_eq!(vocab.id_token(2), Some("a"));
        assert_eq!(vocab.id_token(0), None);
        assert_eq!(vocab.len(), 2);
        vocab.set_unk_token_id(Some(1));
        assert_eq!(vocab.unk_token(), Some("b"));
    }

    #[test]
    fn test_sparse_ids() {
        let mut vocab = Vocab::from_pairs([("a", 0)]);
        vocab.insert("far", TokenId::MAX);
        assert_eq!(vocab.id_token(TokenId::MAX), Some("far"));
        assert_eq!(vocab.token_id("far"), Some(TokenId::MAX));
        assert_eq!(vocab.id_token(1), None);
        assert_eq!(vocab.len(), 2);
    }
}
