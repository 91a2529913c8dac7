//! # Collections
//!
//! The purpose-built data structures behind the segmentation models:
//!
//! * [`PriorityQueue`] - the bounded heap which schedules BPE merges.
//! * [`CharTrie`] - the Unigram vocabulary prefix index.
//! * [`DictionarySplitter`] - carves added tokens out of raw text.
//! * [`WordCache`] - the shared BPE word memo.
//! * [`TokenLattice`] - the Unigram Viterbi substrate.

pub mod char_trie;
pub mod dictionary_splitter;
pub mod lru_cache;
pub mod priority_queue;
pub mod token_lattice;

#[doc(inline)]
pub use char_trie::*;
#[doc(inline)]
pub use dictionary_splitter::*;
#[doc(inline)]
pub use lru_cache::*;
#[doc(inline)]
pub use priority_queue::*;
#[doc(inline)]
pub use token_lattice::*;
