//! # Character Trie
//!
//! A prefix trie keyed by `char`, with lazy common-prefix enumeration.

use crate::types::{WLHashMap, hash_map_new};

#[derive(Debug, Default, Clone)]
struct CharTrieNode {
    is_leaf: bool,
    children: WLHashMap<char, CharTrieNode>,
}

/// A trie of words, keyed by `char`.
#[derive(Debug, Clone)]
pub struct CharTrie {
    root: CharTrieNode,
}

impl Default for CharTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AsRef<str>> FromIterator<S> for CharTrie {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}

impl CharTrie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self {
            root: CharTrieNode {
                is_leaf: false,
                children: hash_map_new(),
            },
        }
    }

    /// Insert every word.
    pub fn extend<I>(
        &mut self,
        words: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for word in words {
            self.push(word.as_ref());
        }
    }

    /// Insert one word.
    pub fn push(
        &mut self,
        word: &str,
    ) {
        let mut node = &mut self.root;
        for c in word.chars() {
            node = node.children.entry(c).or_default();
        }
        node.is_leaf = true;
    }

    /// Does the trie contain `word` exactly?
    pub fn contains(
        &self,
        word: &str,
    ) -> bool {
        let mut node = &self.root;
        for c in word.chars() {
            match node.children.get(&c) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.is_leaf
    }

    /// Lazily yield every prefix of `text` which is a word in the trie.
    ///
    /// Prefixes are yielded shortest first, as sub-slices of `text`.
    pub fn common_prefix_search<'t, 'h>(
        &'t self,
        text: &'h str,
    ) -> CommonPrefixSearch<'t, 'h> {
        CommonPrefixSearch {
            node: Some(&self.root),
            text,
            offset: 0,
        }
    }
}

/// Iterator returned by [`CharTrie::common_prefix_search`].
#[derive(Debug)]
pub struct CommonPrefixSearch<'t, 'h> {
    node: Option<&'t CharTrieNode>,
    text: &'h str,
    offset: usize,
}

impl<'h> Iterator for CommonPrefixSearch<'_, 'h> {
    type Item = &'h str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.node {
            let c = self.text[self.offset..].chars().next()?;
            self.offset += c.len_utf8();
            self.node = node.children.get(&c);
            if let Some(child) = self.node
                && child.is_leaf
            {
                return Some(&self.text[..self.offset]);
            }
        }
        None
    }
}
