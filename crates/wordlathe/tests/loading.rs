#![allow(missing_docs)]

use std::{fs, path::PathBuf};

use serde_json::json;
use tempdir::TempDir;
use wordlathe::{
    DecodeOptions,
    EncodeOptions,
    SpecialTokenKind,
    Tokenizer,
    WordlatheError,
    tokenizer::{TOKENIZER_CONFIG_FILE, TOKENIZER_FILE},
};

fn write_model_dir(with_config: bool) -> TempDir {
    let dir = TempDir::new("wordlathe").unwrap();
    let definition = json!({
        "version": "1.0",
        "pre_tokenizer": {"type": "ByteLevel", "add_prefix_space": false, "use_regex": true},
        "model": {"type": "BPE", "merges": ["h i", "Ġ hi"],
                  "vocab": {"h": 0, "i": 1, "Ġ": 2, "hi": 3, "Ġhi": 4}},
        "decoder": {"type": "ByteLevel"},
        "added_tokens": [{"id": 5, "content": "<|endoftext|>", "special": true}]
    });
    fs::write(dir.path().join(TOKENIZER_FILE), definition.to_string()).unwrap();

    if with_config {
        let config = json!({
            "eos_token": "<|endoftext|>",
            "model_max_length": 1024,
            "tokenizer_class": "GPT2Tokenizer"
        });
        fs::write(dir.path().join(TOKENIZER_CONFIG_FILE), config.to_string()).unwrap();
    }
    dir
}

#[test]
fn test_from_dir() {
    let dir = write_model_dir(true);
    let tok = Tokenizer::from_dir(dir.path()).unwrap();

    assert_eq!(tok.model().type_name(), "BPE");
    assert_eq!(tok.vocab_size(), 6);
    assert_eq!(tok.model_max_length(), Some(1024));
    assert!(!tok.returns_token_type_ids());
    assert_eq!(tok.special_token(SpecialTokenKind::Eos), Some("<|endoftext|>"));
    assert_eq!(tok.pad_token_id(), Some(5));

    let ids = tok
        .encode("hi hi<|endoftext|>", &EncodeOptions::default())
        .unwrap();
    assert_eq!(ids, vec![3, 4, 5]);

    assert_eq!(
        tok.decode(&ids, &DecodeOptions::default()).unwrap(),
        "hi hi<|endoftext|>"
    );
    assert_eq!(
        tok.decode(&ids, &DecodeOptions::default().with_skip_special_tokens(true))
            .unwrap(),
        "hi hi"
    );
}

#[test]
fn test_from_dir_without_config() {
    let dir = write_model_dir(false);
    let tok = Tokenizer::from_dir(dir.path()).unwrap();

    assert_eq!(tok.model_max_length(), None);
    assert_eq!(tok.pad_token_id(), None);
    assert_eq!(tok.tokenize("hi hi", None, false), vec!["hi", "Ġhi"]);
}

#[test]
fn test_from_files() {
    let dir = write_model_dir(true);
    let tok = Tokenizer::from_files(
        dir.path().join(TOKENIZER_FILE),
        Some(dir.path().join(TOKENIZER_CONFIG_FILE)),
    )
    .unwrap();
    assert_eq!(tok.model_max_length(), Some(1024));

    let tok = Tokenizer::from_files(dir.path().join(TOKENIZER_FILE), None::<PathBuf>).unwrap();
    assert_eq!(tok.model_max_length(), None);
}

#[test]
fn test_missing_files() {
    let dir = TempDir::new("wordlathe").unwrap();
    assert!(matches!(
        Tokenizer::from_dir(dir.path()),
        Err(WordlatheError::Io(_))
    ));

    fs::write(dir.path().join(TOKENIZER_FILE), "{not json").unwrap();
    assert!(matches!(
        Tokenizer::from_dir(dir.path()),
        Err(WordlatheError::Json(_))
    ));
}
