//! # Metaspace
//!
//! Replaces spaces with a visible glyph (``'▁'`` by default), optionally
//! prefixing the text with it.

use serde::{Deserialize, Serialize};

/// When the Metaspace glyph is prepended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrependScheme {
    /// Prepend to every section.
    #[default]
    Always,

    /// Never prepend.
    Never,

    /// Prepend only to the first section of the input.
    First,
}

/// The Metaspace pre-tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaspacePreTokenizer {
    /// The glyph.
    pub replacement: String,

    /// The text substituted for spaces.
    pub str_rep: String,

    /// When to prepend.
    pub prepend_scheme: PrependScheme,
}

impl Default for MetaspacePreTokenizer {
    fn default() -> Self {
        Self {
            replacement: "\u{2581}".to_string(),
            str_rep: "\u{2581}".to_string(),
            prepend_scheme: PrependScheme::Always,
        }
    }
}

impl MetaspacePreTokenizer {
    /// Pre-tokenize one section.
    ///
    /// ## Arguments
    /// * `text` - the section text.
    /// * `section_index` - the section's position in the input, if known.
    ///
    /// ## Returns
    /// The whole section, with spaces replaced, as a single piece.
    pub fn pre_tokenize_text(
        &self,
        text: &str,
        section_index: Option<usize>,
    ) -> Vec<String> {
        let mut normalized = text.replace(' ', &self.str_rep);
        let scheme_allows = match self.prepend_scheme {
            PrependScheme::Always => true,
            PrependScheme::First => section_index == Some(0),
            PrependScheme::Never => false,
        };
        if scheme_allows && !normalized.starts_with(&self.replacement) {
            normalized.insert_str(0, &self.str_rep);
        }
        vec![normalized]
    }
}
