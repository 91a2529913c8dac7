//! # Byte-Pair Encoding
//!
//! Merges adjacent symbols in rank order, using a min-heap over an
//! arena-backed doubly-linked list.
//!
//! Heap entries are ``(node, rank + position / len)``: the fractional
//! position bias makes equal-rank pairs merge left to right. Entries are
//! never removed; a popped entry whose node (or right neighbour) has been
//! consumed is skipped. A merge copies the left neighbour into a fresh
//! arena slot, so its stale entry (for the old pair) is invalidated too.

use std::sync::Arc;

use crate::{
    collections::{PriorityQueue, WordCache},
    config::ModelConfig,
    errors::{WLResult, WordlatheError},
    models::Vocab,
    types::{WLHashMap, hash_map_new},
};

/// Merge ranks, keyed ``left -> right -> rank`` for allocation-free lookup.
#[derive(Debug, Clone, Default)]
pub struct MergeRanks {
    ranks: WLHashMap<String, WLHashMap<String, usize>>,
    len: usize,
}

impl MergeRanks {
    /// Build from pairs in priority order; a repeated pair keeps its last rank.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut ranks: WLHashMap<String, WLHashMap<String, usize>> = hash_map_new();
        let mut len = 0;
        for (rank, (left, right)) in pairs.into_iter().enumerate() {
            ranks.entry(left).or_default().insert(right, rank);
            len = rank + 1;
        }
        Self { ranks, len }
    }

    /// The rank of ``(left, right)``, if it merges.
    pub fn rank(
        &self,
        left: &str,
        right: &str,
    ) -> Option<usize> {
        self.ranks.get(left)?.get(right).copied()
    }

    /// The number of merge rules.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Are there no merge rules?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[derive(Debug, Clone)]
struct Symbol {
    token: String,
    bias: f64,
    prev: Option<usize>,
    next: Option<usize>,
    deleted: bool,
}

/// The BPE model.
#[derive(Debug, Clone)]
pub struct BpeModel {
    vocab: Vocab,
    merges: MergeRanks,
    end_of_word_suffix: Option<String>,
    continuing_subword_suffix: Option<String>,
    byte_fallback: bool,
    ignore_merges: bool,
    fuse_unk: bool,
    cache: Arc<WordCache>,
}

impl BpeModel {
    /// Build from a `model` config, with a fresh word cache.
    pub fn from_config(config: &ModelConfig) -> WLResult<Self> {
        let vocab = config.vocab.as_ref().ok_or(WordlatheError::MissingVocab)?;
        let mut vocab = Vocab::from_json_map(vocab)?;
        vocab.set_unk_token(config.unk_token.clone());

        let pairs = config
            .merges
            .iter()
            .flatten()
            .map(|m| m.to_pair())
            .collect::<WLResult<Vec<_>>>()?;

        Ok(Self::new(vocab, MergeRanks::from_pairs(pairs))
            .with_end_of_word_suffix(config.end_of_word_suffix.clone())
            .with_continuing_subword_suffix(config.continuing_subword_suffix.clone())
            .with_byte_fallback(config.byte_fallback.unwrap_or(false))
            .with_ignore_merges(config.ignore_merges.unwrap_or(false))
            .with_fuse_unk(config.fuse_unk.unwrap_or(false)))
    }

    /// Build with default options.
    pub fn new(
        vocab: Vocab,
        merges: MergeRanks,
    ) -> Self {
        Self {
            vocab,
            merges,
            end_of_word_suffix: None,
            continuing_subword_suffix: None,
            byte_fallback: false,
            ignore_merges: false,
            fuse_unk: false,
            cache: Arc::new(WordCache::default()),
        }
    }

    /// Set the end-of-word suffix; empty suffixes are ignored.
    pub fn with_end_of_word_suffix(
        mut self,
        suffix: Option<String>,
    ) -> Self {
        self.end_of_word_suffix = suffix.filter(|s| !s.is_empty());
        self
    }

    /// Set the continuing-subword suffix; empty suffixes are ignored.
    pub fn with_continuing_subword_suffix(
        mut self,
        suffix: Option<String>,
    ) -> Self {
        self.continuing_subword_suffix = suffix.filter(|s| !s.is_empty());
        self
    }

    /// Enable `<0xXX>` byte fallback.
    pub fn with_byte_fallback(
        mut self,
        byte_fallback: bool,
    ) -> Self {
        self.byte_fallback = byte_fallback;
        self
    }

    /// Let whole-word vocabulary hits skip merging.
    pub fn with_ignore_merges(
        mut self,
        ignore_merges: bool,
    ) -> Self {
        self.ignore_merges = ignore_merges;
        self
    }

    /// Fuse runs of unknown tokens.
    pub fn with_fuse_unk(
        mut self,
        fuse_unk: bool,
    ) -> Self {
        self.fuse_unk = fuse_unk;
        self
    }

    /// Share `cache` as the word cache.
    pub fn with_cache(
        mut self,
        cache: Arc<WordCache>,
    ) -> Self {
        self.cache = cache;
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

    /// The merge ranks.
    pub fn merges(&self) -> &MergeRanks {
        &self.merges
    }

    /// The end-of-word suffix.
    pub fn end_of_word_suffix(&self) -> Option<&str> {
        self.end_of_word_suffix.as_deref()
    }

    /// The continuing-subword suffix.
    pub fn continuing_subword_suffix(&self) -> Option<&str> {
        self.continuing_subword_suffix.as_deref()
    }

    /// Does this model fuse unknown runs?
    pub fn fuse_unk(&self) -> bool {
        self.fuse_unk
    }

    /// The word cache.
    pub fn cache(&self) -> &Arc<WordCache> {
        &self.cache
    }

    /// Drop every cached word.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Segment each word into vocabulary tokens.
    ///
    /// Pieces missing from the vocabulary become `<0xXX>` byte tokens
    /// (with byte fallback, when every byte token exists) or the unknown token.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, words)))]
    pub fn encode<S: AsRef<str>>(
        &self,
        words: &[S],
    ) -> Vec<String> {
        let mut tokens = Vec::new();
        for word in words {
            let word = word.as_ref();
            if self.ignore_merges && self.vocab.contains(word) {
                tokens.push(word.to_string());
                continue;
            }
            for piece in self.bpe(word) {
                if self.vocab.contains(&piece) {
                    tokens.push(piece);
                    continue;
                }
                if self.byte_fallback {
                    let byte_tokens: Vec<String> =
                        piece.bytes().map(|b| format!("<0x{b:02X}>")).collect();
                    if byte_tokens.iter().all(|t| self.vocab.contains(t)) {
                        tokens.extend(byte_tokens);
                        continue;
                    }
                }
                tokens.push(self.vocab.unk_or(&piece));
            }
        }
        tokens
    }

    /// Merge one word into BPE pieces, through the cache.
    pub fn bpe(
        &self,
        word: &str,
    ) -> Vec<String> {
        if word.is_empty() {
            return Vec::new();
        }
        if let Some(pieces) = self.cache.get(word) {
            return pieces;
        }

        let mut pieces = self.merge_word(word);
        if let Some(suffix) = &self.continuing_subword_suffix
            && let Some((_, init)) = pieces.split_last_mut()
        {
            for piece in init {
                piece.push_str(suffix);
            }
        }

        self.cache.put(word, pieces.clone());
        pieces
    }

    fn merge_word(
        &self,
        word: &str,
    ) -> Vec<String> {
        let mut chars: Vec<String> = word.chars().map(String::from).collect();
        if let (Some(suffix), Some(last)) = (&self.end_of_word_suffix, chars.last_mut()) {
            last.push_str(suffix);
        }
        let n = chars.len();
        if n < 2 {
            return chars;
        }

        let mut arena: Vec<Symbol> = chars
            .into_iter()
            .enumerate()
            .map(|(i, token)| Symbol {
                token,
                bias: i as f64 / n as f64,
                prev: i.checked_sub(1),
                next: if i + 1 < n { Some(i + 1) } else { None },
                deleted: false,
            })
            .collect();

        let mut queue = PriorityQueue::new(|a: &(usize, f64), b: &(usize, f64)| a.1 < b.1);
        for i in 0..n - 1 {
            self.push_pair(&mut queue, &arena, i);
        }

        let mut start = 0;
        while let Some((node, _)) = queue.pop() {
            let Some(next) = arena[node].next else {
                continue;
            };
            if arena[node].deleted || arena[next].deleted {
                continue;
            }
            arena[node].deleted = true;
            arena[next].deleted = true;

            let mut new_prev = None;
            if let Some(prev) = arena[node].prev {
                let copy = arena[prev].clone();
                arena[prev].deleted = true;
                let copy_idx = arena.len();
                match copy.prev {
                    Some(pp) => arena[pp].next = Some(copy_idx),
                    None => start = copy_idx,
                }
                arena.push(copy);
                new_prev = Some(copy_idx);
            }

            let merged_idx = arena.len();
            arena.push(Symbol {
                token: format!("{}{}", arena[node].token, arena[next].token),
                bias: arena[node].bias,
                prev: new_prev,
                next: arena[next].next,
                deleted: false,
            });

            match new_prev {
                Some(prev) => {
                    arena[prev].next = Some(merged_idx);
                    self.push_pair(&mut queue, &arena, prev);
                }
                None => start = merged_idx,
            }
            if let Some(after) = arena[merged_idx].next {
                arena[after].prev = Some(merged_idx);
                self.push_pair(&mut queue, &arena, merged_idx);
            }
        }

        let mut pieces = Vec::new();
        let mut cursor = Some(start);
        while let Some(idx) = cursor {
            pieces.push(std::mem::take(&mut arena[idx].token));
            cursor = arena[idx].next;
        }
        pieces
    }

    /// Queue the pair starting at `node`, if it has a rank.
    fn push_pair<F>(
        &self,
        queue: &mut PriorityQueue<(usize, f64), F>,
        arena: &[Symbol],
        node: usize,
    ) where
        F: Fn(&(usize, f64), &(usize, f64)) -> bool,
    {
        let symbol = &arena[node];
        if let Some(next) = symbol.next
            && let Some(rank) = self.merges.rank(&symbol.token, &arena[next].token)
        {
            queue.push((node, rank as f64 + symbol.bias));
        }
    }
}
