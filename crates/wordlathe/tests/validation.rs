#![allow(missing_docs)]

use std::path::PathBuf;

use wordlathe::{DecodeOptions, EncodeOptions, Tokenizer, tokenizer::TOKENIZER_FILE};

const SAMPLES: &[&str] = &[
    "hello world",
    "The quick brown fox jumps over the lazy dog.",
    "It's a beautiful day, and I'll be taking my 3 dogs for a walk.",
    "Don't forget: the temperature is 72 degrees!",
    "  multiple   spaces  ",
    "line1\nline2\r\nline3",
    "123 + 456 = 789",
    "caf\u{00e9} na\u{00ef}ve \u{4f60}\u{597d}",
    "Geburtstag 2024: Alles Gute!",
    "$$$!!!...---",
    "a",
    "\t\ttabs\tand\tspaces ",
    "emoji: \u{1f600}\u{1f680}\u{1f4a1}",
    "mixed: hello\u{00a0}world\u{2003}wide",
];

/// Model directories listed in `WORDLATHE_PARITY_DIRS`, separated by `:`.
fn parity_dirs() -> Vec<PathBuf> {
    std::env::var("WORDLATHE_PARITY_DIRS")
        .map(|dirs| dirs.split(':').map(PathBuf::from).collect())
        .unwrap_or_default()
}

#[test]
#[ignore = "needs local model directories in WORDLATHE_PARITY_DIRS"]
fn test_parity_with_tokenizers() {
    for dir in parity_dirs() {
        let ours = Tokenizer::from_dir(&dir).unwrap();
        let reference = tokenizers::Tokenizer::from_file(dir.join(TOKENIZER_FILE)).unwrap();

        for text in SAMPLES {
            for add_special_tokens in [false, true] {
                let expected = reference.encode(*text, add_special_tokens).unwrap();
                let actual = ours
                    .encode(
                        text,
                        &EncodeOptions::default().with_add_special_tokens(add_special_tokens),
                    )
                    .unwrap();
                assert_eq!(
                    actual,
                    expected.get_ids(),
                    "encode mismatch for {dir:?} (add_special_tokens={add_special_tokens}): {text:?}"
                );

                if actual.is_empty() {
                    continue;
                }
                let expected_text = reference.decode(expected.get_ids(), true).unwrap();
                let actual_text = ours
                    .decode(
                        &actual,
                        &DecodeOptions::default()
                            .with_skip_special_tokens(true)
                            .with_clean_up_tokenization_spaces(Some(false)),
                    )
                    .unwrap();
                assert_eq!(actual_text, expected_text, "decode mismatch for {dir:?}: {text:?}");
            }
        }
    }
}
