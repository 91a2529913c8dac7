//! # Regex Utilities
//!
//! `tokenizer.json` patterns were written for engines with look-around
//! (oniguruma, `ECMAScript`); the [`fancy_regex`] crate covers those, but
//! naturally, this has performance costs. We'd prefer to avoid using the
//! [`fancy_regex`] crate when possible, falling back on the standard [`regex`]
//! crate when patterns permit this.
//!
//! * Labeling Patterns - [`RegexPattern`]
//!   * [`RegexPattern::Basic`] - a pattern which was written for basic regular expressions.
//!   * [`RegexPattern::Fancy`] - a pattern which was written for regex extensions.
//!   * [`RegexPattern::Adaptive`] - unknown target, try basic; then fall-up to fancy.
//! * Wrapping Compiled Regex - [`RegexWrapper`]
//! * Config Patterns - [`PatternConfig`], the ``{"String": ..} | {"Regex": ..}`` objects.

mod pattern_config;
mod regex_pattern;
mod regex_wrapper;

#[doc(inline)]
pub use pattern_config::*;
#[doc(inline)]
pub use regex_pattern::*;
#[doc(inline)]
pub use regex_wrapper::*;
