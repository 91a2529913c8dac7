//! # Dictionary Splitter
//!
//! Carves literal dictionary words (added tokens) out of raw text using
//! longest-match over a character trie.

use crate::types::{WLHashMap, hash_map_new};

#[derive(Debug, Default, Clone)]
struct SplitterNode {
    /// Length in bytes of the word ending here, if any.
    word_len: Option<usize>,
    children: WLHashMap<char, SplitterNode>,
}

/// Longest-match splitter over a fixed set of words.
///
/// `split(s).concat() == s` for every `s`.
#[derive(Debug, Clone)]
pub struct DictionarySplitter {
    root: SplitterNode,
}

impl Default for DictionarySplitter {
    fn default() -> Self {
        Self::new::<[&str; 0], _>([])
    }
}

impl DictionarySplitter {
    /// Build a splitter over `words`; empty words are ignored.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut root = SplitterNode {
            word_len: None,
            children: hash_map_new(),
        };
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            let mut node = &mut root;
            for c in word.chars() {
                node = node.children.entry(c).or_default();
            }
            node.word_len = Some(word.len());
        }
        Self { root }
    }

    /// Split `text` into an alternating sequence of plain spans and words.
    ///
    /// At each position the longest word starting there wins; plain text
    /// between words is emitted as one span.
    pub fn split<'h>(
        &self,
        text: &'h str,
    ) -> Vec<&'h str> {
        let mut pieces = Vec::new();
        let mut start = 0;
        let mut i = 0;
        while i < text.len() {
            let mut node = &self.root;
            let mut matched: Option<usize> = None;
            for c in text[i..].chars() {
                match node.children.get(&c) {
                    Some(child) => node = child,
                    None => break,
                }
                if let Some(len) = node.word_len {
                    matched = Some(len);
                }
            }
            match matched {
                Some(len) => {
                    if i > start {
                        pieces.push(&text[start..i]);
                    }
                    pieces.push(&text[i..i + len]);
                    i += len;
                    start = i;
                }
                None => {
                    i += text[i..].chars().next().map_or(1, char::len_utf8);
                }
            }
        }
        if start < text.len() {
            pieces.push(&text[start..]);
        }
        pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_longest_match() {
        let splitter = DictionarySplitter::new(["<s>", "</s>", "<s><s>", "ab"]);

        assert_eq!(
            splitter.split("x<s><s>y</s>"),
            vec!["x", "<s><s>", "y", "</s>"]
        );
        assert_eq!(splitter.split("<s>abab"), vec!["<s>", "ab", "ab"]);
        assert_eq!(splitter.split("plain text"), vec!["plain text"]);
        assert_eq!(splitter.split("<s"), vec!["<s"]);
        assert!(splitter.split("").is_empty());
    }

    #[test]
    fn test_split_multibyte() {
        let splitter = DictionarySplitter::new(["▁", "日本"]);
        assert_eq!(splitter.split("a日本▁b"), vec!["a", "日本", "▁", "b"]);
    }

    #[test]
    fn test_empty_dictionary() {
        let splitter = DictionarySplitter::default();
        assert_eq!(splitter.split("abc"), vec!["abc"]);
    }
}
