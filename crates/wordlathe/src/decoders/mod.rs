//! # Decoders
//!
//! Turn a token sequence back into text.
//!
//! Every decoder implements `decode_chain`, a token list to token list step,
//! so decoders compose in a `Sequence`; `decode` joins the final chain.

pub mod byte_level;
pub mod decoder_config;

#[doc(inline)]
pub use byte_level::*;
#[doc(inline)]
pub use decoder_config::*;
use serde_json::Value;

use crate::{
    errors::WLResult,
    pre_tokenizers::PrependScheme,
    support::{
        regex::RegexWrapper,
        strings::{clean_up_tokenization, string_from_utf8_lossy},
    },
};

/// A runtime decoder.
#[derive(Debug, Clone)]
pub enum Decoder {
    /// WordPiece continuation rejoining.
    WordPiece {
        /// The continuation prefix.
        prefix: String,
        /// Apply the cleanup table to each token.
        cleanup: bool,
    },

    /// Metaspace glyph reversal.
    Metaspace {
        /// The glyph.
        replacement: String,
        /// Drop one leading space from the first token.
        strip_first_space: bool,
    },

    /// Byte-level alphabet reversal.
    ByteLevel(ByteLevelDecoder),

    /// End-of-word suffix reversal; an empty suffix is a no-op.
    Bpe {
        /// The end-of-word suffix.
        suffix: String,
    },

    /// CTC collapse.
    Ctc {
        /// The blank token.
        pad_token: String,
        /// The word boundary token.
        word_delimiter_token: String,
        /// Clean up and turn word boundaries into spaces.
        cleanup: bool,
    },

    /// `<0xXX>` byte-run reassembly.
    ByteFallback,

    /// Join into one token.
    Fuse,

    /// Cut a repeated character from both ends of each token.
    Strip {
        /// The character.
        content: char,
        /// Maximum leading cut.
        start: usize,
        /// Maximum trailing cut.
        stop: usize,
    },

    /// Substitute pattern matches; a pattern which failed to compile is `None`.
    Replace {
        /// The compiled pattern.
        pattern: Option<RegexWrapper>,
        /// The literal replacement.
        content: String,
    },

    /// Apply each child in order.
    Sequence(Vec<Decoder>),
}

impl Decoder {
    /// Build a decoder from a typed config.
    pub fn from_config(config: &DecoderConfig) -> Self {
        use DecoderConfig as C;
        match config {
            C::WordPiece { prefix, cleanup } => Self::WordPiece {
                prefix: prefix.clone(),
                cleanup: *cleanup,
            },
            C::Metaspace {
                replacement,
                add_prefix_space,
                prepend_scheme,
            } => Self::Metaspace {
                replacement: replacement.clone(),
                strip_first_space: *add_prefix_space != Some(false)
                    && *prepend_scheme != Some(PrependScheme::Never),
            },
            C::ByteLevel => Self::ByteLevel(ByteLevelDecoder::new()),
            C::BPEDecoder { suffix } => Self::Bpe {
                suffix: suffix.clone(),
            },
            C::CTC {
                pad_token,
                word_delimiter_token,
                cleanup,
            } => Self::Ctc {
                pad_token: pad_token.clone(),
                word_delimiter_token: word_delimiter_token.clone(),
                cleanup: *cleanup,
            },
            C::ByteFallback => Self::ByteFallback,
            C::Fuse => Self::Fuse,
            C::Strip {
                content,
                start,
                stop,
            } => Self::Strip {
                content: *content,
                start: *start,
                stop: *stop,
            },
            C::Replace { pattern, content } => Self::Replace {
                pattern: pattern.compile_or_warn("Replace decoder"),
                content: content.clone(),
            },
            C::Sequence { decoders } => {
                Self::Sequence(decoders.iter().map(Self::from_config).collect())
            }
        }
    }

    /// Build a decoder from a raw `tokenizer.json` value.
    pub fn from_value(value: &Value) -> WLResult<Self> {
        Ok(Self::from_config(&DecoderConfig::from_value(value)?))
    }

    /// Tell every byte-level decoder which tokens are added tokens.
    pub fn set_added_tokens<S: AsRef<str>>(
        &mut self,
        added_tokens: &[S],
    ) {
        match self {
            Self::ByteLevel(decoder) => decoder.set_added_tokens(added_tokens),
            Self::Sequence(children) => {
                for child in children {
                    child.set_added_tokens(added_tokens);
                }
            }
            _ => {}
        }
    }

    /// Decode tokens into text.
    pub fn decode(
        &self,
        tokens: Vec<String>,
    ) -> String {
        self.decode_chain(tokens).concat()
    }

    /// Apply one decoding step.
    pub fn decode_chain(
        &self,
        tokens: Vec<String>,
    ) -> Vec<String> {
        match self {
            Self::WordPiece { prefix, cleanup } => tokens
                .into_iter()
                .enumerate()
                .map(|(i, token)| {
                    let token = if i == 0 {
                        token
                    } else if let Some(rest) = token.strip_prefix(prefix.as_str()) {
                        rest.to_string()
                    } else {
                        format!(" {token}")
                    };
                    if *cleanup {
                        clean_up_tokenization(&token)
                    } else {
                        token
                    }
                })
                .collect(),
            Self::Metaspace {
                replacement,
                strip_first_space,
            } => tokens
                .into_iter()
                .enumerate()
                .map(|(i, token)| {
                    let token = token.replace(replacement.as_str(), " ");
                    if i == 0
                        && *strip_first_space
                        && let Some(rest) = token.strip_prefix(' ')
                    {
                        rest.to_string()
                    } else {
                        token
                    }
                })
                .collect(),
            Self::ByteLevel(decoder) => decoder.decode_chain(tokens),
            Self::Bpe { suffix } => {
                if suffix.is_empty() {
                    return tokens;
                }
                let last = tokens.len().saturating_sub(1);
                tokens
                    .into_iter()
                    .enumerate()
                    .map(|(i, token)| token.replace(suffix.as_str(), if i == last { "" } else { " " }))
                    .collect()
            }
            Self::Ctc {
                pad_token,
                word_delimiter_token,
                cleanup,
            } => vec![ctc_collapse(tokens, pad_token, word_delimiter_token, *cleanup)],
            Self::ByteFallback => byte_fallback(tokens),
            Self::Fuse => vec![tokens.concat()],
            Self::Strip {
                content,
                start,
                stop,
            } => tokens
                .iter()
                .map(|token| strip_repeated(token, *content, *start, *stop))
                .collect(),
            Self::Replace { pattern, content } => match pattern {
                Some(re) => tokens
                    .iter()
                    .map(|token| re.replace_all(token, content))
                    .collect(),
                None => tokens,
            },
            Self::Sequence(children) => children
                .iter()
                .fold(tokens, |tokens, child| child.decode_chain(tokens)),
        }
    }
}

/// Merge repeats, drop blanks, and join.
fn ctc_collapse(
    tokens: Vec<String>,
    pad_token: &str,
    word_delimiter_token: &str,
    cleanup: bool,
) -> String {
    let mut grouped: Vec<String> = tokens;
    grouped.dedup();
    let text: String = grouped
        .into_iter()
        .filter(|t| t != pad_token)
        .collect();
    if cleanup {
        clean_up_tokenization(&text)
            .replace(word_delimiter_token, " ")
            .trim()
            .to_string()
    } else {
        text
    }
}

/// Parse a `<0xXX>` byte token.
fn parse_byte_token(token: &str) -> Option<u8> {
    let hex = token.strip_prefix("<0x")?.strip_suffix('>')?;
    if hex.len() != 2 {
        return None;
    }
    u8::from_str_radix(hex, 16).ok()
}

/// Reassemble runs of byte tokens into (lossy) UTF-8 text.
fn byte_fallback(tokens: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut bytes: Vec<u8> = Vec::new();
    for token in tokens {
        match parse_byte_token(&token) {
            Some(b) => bytes.push(b),
            None => {
                if !bytes.is_empty() {
                    out.push(string_from_utf8_lossy(std::mem::take(&mut bytes)));
                }
                out.push(token);
            }
        }
    }
    if !bytes.is_empty() {
        out.push(string_from_utf8_lossy(bytes));
    }
    out
}

/// Cut up to `start` leading and `stop` trailing copies of `content`.
fn strip_repeated(
    token: &str,
    content: char,
    start: usize,
    stop: usize,
) -> String {
    let chars: Vec<char> = token.chars().collect();
    let start_cut = chars
        .iter()
        .take(start)
        .take_while(|&&c| c == content)
        .count();
    let stop_cut = chars.len()
        - chars
            .iter()
            .rev()
            .take(stop)
            .take_while(|&&c| c == content)
            .count();
    if start_cut >= stop_cut {
        return String::new();
    }
    chars[start_cut..stop_cut].iter().collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn toks(ts: &[&str]) -> Vec<String> {
        ts.iter().map(|t| t.to_string()).collect()
    }

    fn build(value: Value) -> Decoder {
        Decoder::from_value(&value).unwrap()
    }

    #[test]
    fn test_wordpiece() {
        let d = build(json!({"type": "WordPiece", "prefix": "##", "cleanup": true}));
        assert_eq!(d.decode(toks(&["he", "##llo", "world", "."])), "hello world.");
        assert_eq!(d.decode(toks(&["do", "n't"])), "don't");

        let d = build(json!({"type": "WordPiece", "cleanup": false}));
        assert_eq!(d.decode(toks(&["a", "."])), "a .");
    }

    #[test]
    fn test_metaspace() {
        let d = build(json!({"type": "Metaspace", "replacement": "▁", "add_prefix_space": true}));
        assert_eq!(d.decode(toks(&["▁Hey", "▁friend", "!"])), "Hey friend!");

        let d = build(json!({"type": "Metaspace", "replacement": "▁", "prepend_scheme": "never"}));
        assert_eq!(d.decode(toks(&["▁Hey"])), " Hey");

        let d = build(json!({"type": "Metaspace", "add_prefix_space": false}));
        assert_eq!(d.decode(toks(&["▁Hey"])), " Hey");
    }

    #[test]
    fn test_bpe_suffix() {
        let d = build(json!({"type": "BPEDecoder", "suffix": "</w>"}));
        assert_eq!(
            d.decode_chain(toks(&["hel", "lo</w>", "there</w>"])),
            toks(&["hel", "lo ", "there"])
        );

        let d = build(json!({"type": "BPEDecoder", "suffix": ""}));
        assert_eq!(d.decode(toks(&["a", "b"])), "ab");
    }

    #[test]
    fn test_ctc() {
        let d = build(json!({"type": "CTC"}));
        assert_eq!(
            d.decode_chain(toks(&["<pad>", "h", "h", "e", "<pad>", "l", "l", "<pad>", "l", "o", "|", "w", "o", "r", "l", "d", "|"])),
            toks(&["hello world"])
        );
        let d = build(json!({"type": "CTC", "cleanup": false}));
        assert_eq!(d.decode(toks(&["a", "a", "|", "b"])), "a|b");
    }

    #[test]
    fn test_byte_fallback_and_fuse() {
        let d = build(json!({
            "type": "Sequence",
            "decoders": [{"type": "ByteFallback"}, {"type": "Fuse"}]
        }));
        assert_eq!(
            d.decode_chain(toks(&["a", "<0xC3>", "<0xA9>", "b", "<0xFF>"])),
            toks(&["aéb\u{FFFD}"])
        );
        assert_eq!(parse_byte_token("<0xZZ>"), None);
        assert_eq!(parse_byte_token("<0x0a>"), Some(10));
    }

    #[test]
    fn test_strip() {
        let d = build(json!({"type": "Strip", "content": " ", "start": 1, "stop": 2}));
        assert_eq!(
            d.decode_chain(toks(&["  a  ", " ", "b"])),
            toks(&[" a", "", "b"])
        );
        assert_eq!(strip_repeated("xxx", 'x', 2, 2), "");
    }

    #[test]
    fn test_replace_and_sequence() {
        let d = build(json!({
            "type": "Sequence",
            "decoders": [
                {"type": "Replace", "pattern": {"String": "▁"}, "content": " "},
                {"type": "ByteFallback"},
                {"type": "Fuse"},
                {"type": "Strip", "content": " ", "start": 1, "stop": 0}
            ]
        }));
        assert_eq!(d.decode(toks(&["▁Hello", "▁", "<0x21>"])), "Hello !");
    }

    #[test]
    fn test_byte_level_added_tokens_in_sequence() {
        let mut d = build(json!({"type": "Sequence", "decoders": [{"type": "ByteLevel"}]}));
        d.set_added_tokens(&["<s>"]);
        assert_eq!(d.decode(toks(&["<s>", "Ġhi"])), "<s> hi");
    }
}
