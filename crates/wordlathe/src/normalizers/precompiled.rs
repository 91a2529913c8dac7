//! # Precompiled Normalizer
//!
//! `SentencePiece` models ship a compiled character map; this reproduces the
//! reference output for it with fixed tables and NFKC.

use unicode_normalization::UnicodeNormalization;

/// Fullwidth tilde; NFKC is applied to each side of it separately.
const FULLWIDTH_TILDE: char = '\u{FF5E}';

fn is_removed_control(c: char) -> bool {
    matches!(
        c,
        '\u{0001}'..='\u{0008}'
            | '\u{000B}'
            | '\u{000E}'..='\u{001F}'
            | '\u{007F}'
            | '\u{008F}'
            | '\u{009F}'
    )
}

fn is_space_variant(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000A}'
            | '\u{000C}'
            | '\u{000D}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200F}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{2581}'
            | '\u{3000}'
            | '\u{FEFF}'
            | '\u{FFFD}'
    )
}

/// Apply the precompiled normalization to `text`.
pub fn precompiled_normalize(text: &str) -> String {
    let folded: String = text
        .chars()
        .filter(|&c| !is_removed_control(c))
        .map(|c| if is_space_variant(c) { ' ' } else { c })
        .collect();

    if folded.contains(FULLWIDTH_TILDE) {
        let mut out = String::with_capacity(folded.len());
        for (i, part) in folded.split(FULLWIDTH_TILDE).enumerate() {
            if i > 0 {
                out.push(FULLWIDTH_TILDE);
            }
            out.extend(part.nfkc());
        }
        out
    } else {
        folded.nfkc().collect()
    }
}
