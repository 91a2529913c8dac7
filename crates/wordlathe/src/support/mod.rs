//! # Support Utilities
//!
//! Regex wrapping, string cleanup, the byte-level alphabet, and Unicode
//! character classes shared by the component families.

pub mod byte_level;
pub mod regex;
pub mod strings;
pub mod unicode;
