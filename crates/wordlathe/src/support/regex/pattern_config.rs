//! # Config Patterns
//!
//! `Split`, `Replace` and friends carry a pattern object which is either a
//! literal string or a regex.

use serde::{Deserialize, Serialize};

use crate::support::regex::{ErrorWrapper, RegexPattern, RegexWrapper};

/// Fragments which other engines read differently from the exporting engine.
///
/// Each entry is ``(exported, portable)``.
const NON_PORTABLE_FRAGMENTS: &[(&str, &str)] = &[(
    r" ?[^(\s|[.,!?…。，、।۔،])]+",
    r" ?[^\s.,!?…。，、।۔،]+",
)];

/// A `tokenizer.json` pattern object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternConfig {
    /// Match this literal text.
    String(String),

    /// Match this regex.
    Regex(String),
}

impl PatternConfig {
    /// Translate to a [`RegexPattern`].
    ///
    /// Regex patterns lose escapes on `#`, `&` and `~`, and known
    /// non-portable fragments are rewritten.
    pub fn to_regex_pattern(&self) -> RegexPattern {
        match self {
            Self::String(literal) => RegexPattern::literal(literal),
            Self::Regex(source) => {
                let mut pattern = unescape_punctuation(source);
                for (exported, portable) in NON_PORTABLE_FRAGMENTS {
                    pattern = pattern.replace(exported, portable);
                }
                RegexPattern::Adaptive(pattern)
            }
        }
    }

    /// Compile the pattern.
    pub fn compile(&self) -> Result<RegexWrapper, ErrorWrapper> {
        self.to_regex_pattern().compile()
    }

    /// Compile the pattern, logging and returning `None` on failure.
    ///
    /// ## Arguments
    /// * `context` - the component name used in the log message.
    pub fn compile_or_warn(
        &self,
        context: &str,
    ) -> Option<RegexWrapper> {
        match self.compile() {
            Ok(re) => Some(re),
            Err(err) => {
                log::warn!("{context}: pattern {self:?} failed to compile, ignoring it: {err}");
                None
            }
        }
    }
}

/// Drop the backslash from `\#`, `\&` and `\~`.
fn unescape_punctuation(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
        {
            if matches!(next, '#' | '&' | '~') {
                out.push(next);
                chars.next();
                continue;
            }
            // Keep other escapes whole so `\\#` stays an escaped backslash.
            out.push(c);
            out.push(next);
            chars.next();
            continue;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let p: PatternConfig = serde_json::from_str(r#"{"String": " "}"#).unwrap();
        assert_eq!(p, PatternConfig::String(" ".to_string()));

        let p: PatternConfig = serde_json::from_str(r#"{"Regex": "\\s+"}"#).unwrap();
        assert_eq!(p, PatternConfig::Regex(r"\s+".to_string()));
    }

    #[test]
    fn test_string_is_literal() {
        let re = PatternConfig::String("a+".to_string()).compile().unwrap();
        assert_eq!(re.find_strs("aa+a+"), vec!["a+", "a+"]);
    }

    #[test]
    fn test_unescape_punctuation() {
        assert_eq!(unescape_punctuation(r"\#\&\~"), "#&~");
        assert_eq!(unescape_punctuation(r"\\#\s"), r"\\#\s");
    }

    #[test]
    fn test_non_portable_rewrite() {
        let p = PatternConfig::Regex(r" ?[^(\s|[.,!?…。，、।۔،])]+".to_string());
        assert_eq!(p.to_regex_pattern().as_str(), r" ?[^\s.,!?…。，、।۔،]+");
        let re = p.compile().unwrap();
        assert_eq!(re.find_strs("hi there, (you)"), vec!["hi", " there", " (you)"]);
    }

    #[test]
    fn test_lookahead_regex_compiles() {
        let p = PatternConfig::Regex(r"\s+(?!\S)".to_string());
        assert!(p.compile().unwrap().is_fancy());
    }

    #[test]
    fn test_compile_or_warn() {
        let p = PatternConfig::Regex("(".to_string());
        assert!(p.compile_or_warn("test").is_none());
    }
}
