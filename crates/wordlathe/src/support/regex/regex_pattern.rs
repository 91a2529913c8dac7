//! # Labeled Regex Patterns
//!
//! Patterns are labeled with the engine they need, so that the built-in
//! pre-tokenizer patterns skip the `regex` attempt when they are known to
//! use look-around.

use crate::support::regex::{ErrorWrapper, RegexWrapper};

/// A `'static` pattern with a known engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstRegexPattern {
    /// Compiles with [`regex`].
    Basic(&'static str),

    /// Needs [`fancy_regex`].
    Fancy(&'static str),
}

impl ConstRegexPattern {
    /// Compile with the labeled engine.
    pub fn compile(&self) -> Result<RegexWrapper, ErrorWrapper> {
        RegexPattern::from(*self).compile()
    }
}

impl From<ConstRegexPattern> for RegexPattern {
    fn from(pattern: ConstRegexPattern) -> Self {
        match pattern {
            ConstRegexPattern::Basic(pattern) => Self::Basic(pattern.to_string()),
            ConstRegexPattern::Fancy(pattern) => Self::Fancy(pattern.to_string()),
        }
    }
}

/// An owned pattern, labeled with the engine it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegexPattern {
    /// Compiles with [`regex`].
    Basic(String),

    /// Needs [`fancy_regex`].
    Fancy(String),

    /// Unknown; `regex` is tried first.
    ///
    /// Patterns read from `tokenizer.json` are always adaptive.
    Adaptive(String),
}

impl RegexPattern {
    /// A [`RegexPattern::Basic`] pattern matching `literal` exactly.
    pub fn literal(literal: &str) -> Self {
        Self::Basic(regex::escape(literal))
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(pattern) | Self::Fancy(pattern) | Self::Adaptive(pattern) => pattern,
        }
    }

    /// Compile the pattern.
    ///
    /// An `Adaptive` pattern which `regex` rejects is retried with
    /// `fancy_regex`; the `fancy_regex` error is the one reported.
    pub fn compile(&self) -> Result<RegexWrapper, ErrorWrapper> {
        match self {
            Self::Basic(pattern) => Ok(regex::Regex::new(pattern)?.into()),
            Self::Fancy(pattern) => Ok(fancy_regex::Regex::new(pattern)?.into()),
            Self::Adaptive(pattern) => match regex::Regex::new(pattern) {
                Ok(re) => Ok(re.into()),
                Err(_) => Ok(fancy_regex::Regex::new(pattern)?.into()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// GPT-2's whitespace tail; the look-ahead needs `fancy_regex`.
    const WHITESPACE_TAIL: &str = r"\s+(?!\S)|\s+";

    #[test]
    fn test_const_patterns() {
        let basic = ConstRegexPattern::Basic(r"[^0-9]+|[0-9]").compile().unwrap();
        assert!(basic.is_basic());
        assert_eq!(basic.find_strs("ab12"), vec!["ab", "1", "2"]);

        let fancy = ConstRegexPattern::Fancy(WHITESPACE_TAIL).compile().unwrap();
        assert!(fancy.is_fancy());
    }

    #[test]
    fn test_literal() {
        let pattern = RegexPattern::literal("[SEP].");
        assert_eq!(pattern.as_str(), r"\[SEP\]\.");
        assert_eq!(
            pattern.compile().unwrap().find_strs("a[SEP].b[SEP]x"),
            vec!["[SEP]."]
        );
    }

    #[test]
    fn test_engine_errors() {
        let err = RegexPattern::Basic(WHITESPACE_TAIL.to_string())
            .compile()
            .unwrap_err();
        assert!(matches!(err, ErrorWrapper::Basic(_)));

        let err = RegexPattern::Adaptive("(".to_string()).compile().unwrap_err();
        assert!(matches!(err, ErrorWrapper::Fancy(_)));
    }

    #[test]
    fn test_adaptive_falls_up() {
        let pattern = RegexPattern::Adaptive(r"\p{L}+".to_string());
        assert!(pattern.compile().unwrap().is_basic());

        let pattern = RegexPattern::Adaptive(WHITESPACE_TAIL.to_string());
        assert!(pattern.compile().unwrap().is_fancy());
    }
}
