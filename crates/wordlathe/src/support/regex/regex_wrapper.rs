//! # Regex Wrapper
//! This modules provides mechanisms to mix `regex` and `fancy_regex` types.

use core::{fmt::Debug, ops::Range};

use crate::support::regex::RegexPattern;

/// Error wrapper for regex patterns.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub enum ErrorWrapper {
    /// Error from `regex`.
    Basic(Box<regex::Error>),

    /// Error from `fancy_regex`.
    Fancy(Box<fancy_regex::Error>),
}

impl From<regex::Error> for ErrorWrapper {
    fn from(err: regex::Error) -> Self {
        Self::Basic(err.into())
    }
}

impl From<fancy_regex::Error> for ErrorWrapper {
    fn from(err: fancy_regex::Error) -> Self {
        Self::Fancy(err.into())
    }
}

impl core::fmt::Display for ErrorWrapper {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        match self {
            Self::Basic(err) => core::fmt::Display::fmt(err, f),
            Self::Fancy(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::error::Error for ErrorWrapper {}

impl TryFrom<RegexPattern> for RegexWrapper {
    type Error = ErrorWrapper;

    fn try_from(pattern: RegexPattern) -> Result<Self, Self::Error> {
        pattern.compile()
    }
}

/// Wrapper for regex patterns.
#[derive(Debug, Clone)]
pub enum RegexWrapper {
    /// Wrapper for `regex::Regex`.
    Basic(regex::Regex),

    /// Wrapper for `fancy_regex::Regex`.
    Fancy(fancy_regex::Regex),
}

impl PartialEq for RegexWrapper {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        match (self, other) {
            (Self::Basic(a), Self::Basic(b)) => a.as_str() == b.as_str(),
            (Self::Fancy(a), Self::Fancy(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl From<regex::Regex> for RegexWrapper {
    fn from(regex: regex::Regex) -> Self {
        Self::Basic(regex)
    }
}

impl From<fancy_regex::Regex> for RegexWrapper {
    fn from(regex: fancy_regex::Regex) -> Self {
        Self::Fancy(regex)
    }
}

impl RegexWrapper {
    /// Is this `Basic`?
    pub fn is_basic(&self) -> bool {
        matches!(self, Self::Basic(_))
    }

    /// Is this `Fancy`?
    pub fn is_fancy(&self) -> bool {
        matches!(self, Self::Fancy(_))
    }

    /// Get the underlying regex pattern.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(regex) => regex.as_str(),
            Self::Fancy(regex) => regex.as_str(),
        }
    }

    /// Iterate over the byte ranges of all non-overlapping matches.
    ///
    /// ## Arguments
    /// * `haystack` - The string to search in.
    pub fn find_iter<'r, 'h>(
        &'r self,
        haystack: &'h str,
    ) -> MatchesWrapper<'r, 'h> {
        match self {
            Self::Basic(regex) => MatchesWrapper::Regex(regex.find_iter(haystack)),
            Self::Fancy(regex) => MatchesWrapper::FancyRegex(regex.find_iter(haystack)),
        }
    }

    /// Collect the text of every match.
    pub fn find_strs<'h>(
        &self,
        haystack: &'h str,
    ) -> Vec<&'h str> {
        self.find_iter(haystack).map(|r| &haystack[r]).collect()
    }

    /// Replace every match with `content`, taken literally.
    pub fn replace_all(
        &self,
        haystack: &str,
        content: &str,
    ) -> String {
        let mut out = String::with_capacity(haystack.len());
        let mut last = 0;
        for Range { start, end } in self.find_iter(haystack) {
            out.push_str(&haystack[last..start]);
            out.push_str(content);
            last = end;
        }
        out.push_str(&haystack[last..]);
        out
    }

    /// Split on matches, keeping each non-empty match as its own piece.
    pub fn split_keep(
        &self,
        haystack: &str,
    ) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut prev = 0;
        for Range { start, end } in self.find_iter(haystack) {
            if prev < start {
                pieces.push(haystack[prev..start].to_string());
            }
            if start < end {
                pieces.push(haystack[start..end].to_string());
            }
            prev = end;
        }
        if prev < haystack.len() {
            pieces.push(haystack[prev..].to_string());
        }
        pieces
    }

    /// Split on matches, dropping the matches and any empty pieces.
    pub fn split_removed(
        &self,
        haystack: &str,
    ) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut prev = 0;
        for Range { start, end } in self.find_iter(haystack) {
            if prev < start {
                pieces.push(haystack[prev..start].to_string());
            }
            prev = end;
        }
        if prev < haystack.len() {
            pieces.push(haystack[prev..].to_string());
        }
        pieces
    }
}

/// Wrapper for regex match iterators, yielding byte ranges.
pub enum MatchesWrapper<'r, 'h> {
    /// Wrapper for `regex::Matches`.
    Regex(regex::Matches<'r, 'h>),

    /// Wrapper for `fancy_regex::Matches`.
    FancyRegex(fancy_regex::Matches<'r, 'h>),
}

impl Iterator for MatchesWrapper<'_, '_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Regex(matches) => matches.next().map(|m| m.range()),
            Self::FancyRegex(matches) => match matches.next()? {
                Ok(m) => Some(m.range()),
                Err(err) => {
                    // Backtracking limits end the scan; the rest of the text is left unmatched.
                    log::warn!("regex match aborted: {err}");
                    None
                }
            },
        }
    }
}
