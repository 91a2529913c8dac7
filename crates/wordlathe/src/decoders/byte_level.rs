//! # Byte-Level Decoder

use crate::{
    support::{byte_level::byte_level_decode_into, strings::string_from_utf8_lossy},
    types::WLHashSet,
};

/// Reverses the byte-level alphabet, passing added tokens through verbatim.
#[derive(Debug, Clone, Default)]
pub struct ByteLevelDecoder {
    added_tokens: WLHashSet<String>,
}

impl ByteLevelDecoder {
    /// Create a decoder with no added tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the set of added tokens.
    pub fn set_added_tokens<S: AsRef<str>>(
        &mut self,
        added_tokens: &[S],
    ) {
        self.added_tokens = added_tokens
            .iter()
            .map(|t| t.as_ref().to_string())
            .collect();
    }

    /// Is `token` an added token?
    pub fn is_added_token(
        &self,
        token: &str,
    ) -> bool {
        self.added_tokens.contains(token)
    }

    /// Decode each run of ordinary tokens into one string.
    ///
    /// Added tokens are emitted as-is and break runs.
    pub fn decode_chain(
        &self,
        tokens: Vec<String>,
    ) -> Vec<String> {
        let mut out = Vec::new();
        let mut buf: Vec<u8> = Vec::new();
        let mut pending = false;
        for token in tokens {
            if self.is_added_token(&token) {
                if pending {
                    out.push(string_from_utf8_lossy(std::mem::take(&mut buf)));
                    pending = false;
                }
                out.push(token);
            } else {
                byte_level_decode_into(&token, &mut buf);
                pending = true;
            }
        }
        if pending {
            out.push(string_from_utf8_lossy(buf));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(ts: &[&str]) -> Vec<String> {
        ts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_decode_runs() {
        let mut decoder = ByteLevelDecoder::new();
        decoder.set_added_tokens(&["<|end|>"]);
        assert_eq!(
            decoder.decode_chain(toks(&["Hello", "Ġw", "orld", "<|end|>", "Ċ"])),
            vec!["Hello world", "<|end|>", "\n"]
        );
    }

    #[test]
    fn test_tokens_outside_the_alphabet_pass_through() {
        let decoder = ByteLevelDecoder::new();
        assert_eq!(
            decoder.decode_chain(toks(&["Hello", "Ġ\u{65e5}", "Ġw"])),
            vec!["HelloĠ\u{65e5} w"]
        );
    }

    #[test]
    fn test_multibyte_split_across_tokens() {
        let decoder = ByteLevelDecoder::new();
        // "é" is 0xC3 0xA9, byte-mapped to "Ã" and "©".
        assert_eq!(decoder.decode_chain(toks(&["Ã", "©"])), vec!["é"]);
        assert_eq!(decoder.decode_chain(toks(&["Ã"])), vec!["\u{FFFD}"]);
        assert!(decoder.decode_chain(Vec::new()).is_empty());
    }
}
