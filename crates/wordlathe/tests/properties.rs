#![allow(missing_docs)]

use wordlathe::{
    collections::{DictionarySplitter, TokenLattice},
    decoders::ByteLevelDecoder,
    models::{BpeModel, MergeRanks, Vocab},
    pre_tokenizers::ByteLevelPreTokenizer,
};

fn tiny_bpe() -> BpeModel {
    let vocab = Vocab::from_pairs([
        ("a", 0),
        ("b", 1),
        ("c", 2),
        ("ab", 3),
        ("bc", 4),
        ("abc", 5),
        ("ca", 6),
    ]);
    let merges = MergeRanks::from_pairs(
        [("a", "b"), ("b", "c"), ("ab", "c"), ("c", "a")]
            .into_iter()
            .map(|(l, r)| (l.to_string(), r.to_string())),
    );
    BpeModel::new(vocab, merges)
}

/// The best total score over every segmentation of `pos..len`.
fn exhaustive_best(
    spans: &[(usize, usize, f64)],
    pos: usize,
    len: usize,
) -> Option<f64> {
    if pos == len {
        return Some(0.0);
    }
    spans
        .iter()
        .filter(|&&(start, _, _)| start == pos)
        .filter_map(|&(_, length, score)| {
            exhaustive_best(spans, pos + length, len).map(|rest| score + rest)
        })
        .reduce(f64::max)
}

proptest::proptest! {
    #![proptest_config(proptest::prelude::ProptestConfig::with_cases(500))]

    #[test]
    fn splitter_pieces_concatenate_to_input(text in "\\PC{0,64}") {
        let splitter = DictionarySplitter::new(["<s>", "</s>", "<s", "a", "ab", "\u{4f60}"]);
        let pieces = splitter.split(&text);

        proptest::prop_assert_eq!(pieces.concat(), text.clone());
        proptest::prop_assert!(pieces.iter().all(|p| !p.is_empty()));
    }

    #[test]
    fn byte_level_round_trips(text in "\\PC{0,64}") {
        let pre_tokenizer = ByteLevelPreTokenizer::new(false, true).unwrap();
        let decoder = ByteLevelDecoder::new();

        let pieces = pre_tokenizer.pre_tokenize_text(&text);
        let decoded = decoder.decode_chain(pieces).concat();

        proptest::prop_assert_eq!(decoded, text);
    }

    #[test]
    fn bpe_is_stable_across_cache_clears(word in "[abc]{1,24}") {
        let model = tiny_bpe();

        let first = model.bpe(&word);
        let cached = model.bpe(&word);
        model.clear_cache();
        let recomputed = model.bpe(&word);

        proptest::prop_assert_eq!(first.concat(), word);
        proptest::prop_assert_eq!(&first, &cached);
        proptest::prop_assert_eq!(&first, &recomputed);
    }

    #[test]
    fn viterbi_finds_the_best_segmentation(
        len in 1usize..8,
        singles in proptest::collection::vec(-10.0f64..0.0, 8),
        longer in proptest::collection::vec((0usize..8, 2usize..5, -10.0f64..0.0), 0..12)
    ) {
        let sentence: String = "a\u{e9}\u{65e5}b\u{2713}cde".chars().take(len).collect();
        let mut lattice = TokenLattice::new(&sentence, None, None);

        // Every char has a span, so the lattice is connected.
        let mut spans: Vec<(usize, usize, f64)> = (0..len).map(|pos| (pos, 1, singles[pos])).collect();
        for (pos, length, score) in longer {
            if pos + length <= len && !spans.iter().any(|&(p, l, _)| p == pos && l == length) {
                spans.push((pos, length, score));
            }
        }
        // Distinct offsets keep path totals apart.
        for (k, span) in spans.iter_mut().enumerate() {
            span.2 += (k as f64 + 1.0) * 1e-6;
        }
        for &(pos, length, score) in &spans {
            lattice.insert(pos, length, score, None);
        }

        let path = lattice.viterbi();
        let nodes = lattice.nodes();

        let mut next = 0;
        for &id in &path {
            proptest::prop_assert_eq!(nodes[id].pos, next);
            next += nodes[id].length;
        }
        proptest::prop_assert_eq!(next, len);

        let total: f64 = path.iter().map(|&id| nodes[id].score).sum();
        let best = exhaustive_best(&spans, 0, len).unwrap_or(f64::NEG_INFINITY);
        proptest::prop_assert!((total - best).abs() < 1e-9, "viterbi {} vs best {}", total, best);
    }
}
