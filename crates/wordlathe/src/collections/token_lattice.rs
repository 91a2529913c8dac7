//! # Token Lattice
//!
//! A DAG of candidate token spans over the `char` offsets of one word,
//! searched for the maximum-score path with Viterbi.
//!
//! Positions count `char`s (Unicode scalar values), not bytes.

use crate::types::TokenId;

/// One span in a [`TokenLattice`].
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeNode {
    /// The vocabulary id of the span, if known.
    pub token_id: Option<TokenId>,

    /// The arena index of this node.
    pub node_id: usize,

    /// Start position, in chars.
    pub pos: usize,

    /// Length, in chars.
    pub length: usize,

    /// The span's own score.
    pub score: f64,

    /// Best predecessor, set by [`TokenLattice::viterbi`].
    pub prev: Option<usize>,

    /// Best path score ending with this node.
    pub backtrace_score: f64,
}

/// A lattice over one word, with synthetic BOS and EOS nodes.
#[derive(Debug, Clone)]
pub struct TokenLattice {
    sentence: String,

    /// Byte offset of every char boundary; `len + 1` entries.
    offsets: Vec<usize>,

    nodes: Vec<LatticeNode>,
    begin_nodes: Vec<Vec<usize>>,
    end_nodes: Vec<Vec<usize>>,
}

const BOS_NODE: usize = 0;

impl TokenLattice {
    /// Create a lattice over `sentence`.
    ///
    /// ## Arguments
    /// * `sentence` - the word to segment.
    /// * `bos_token_id` - the id carried by the synthetic start node.
    /// * `eos_token_id` - the id carried by the synthetic end node.
    pub fn new(
        sentence: &str,
        bos_token_id: Option<TokenId>,
        eos_token_id: Option<TokenId>,
    ) -> Self {
        let mut offsets: Vec<usize> = sentence.char_indices().map(|(i, _)| i).collect();
        offsets.push(sentence.len());
        let len = offsets.len() - 1;

        let node = |token_id, node_id, pos| LatticeNode {
            token_id,
            node_id,
            pos,
            length: 0,
            score: 0.0,
            prev: None,
            backtrace_score: 0.0,
        };

        let mut begin_nodes = vec![Vec::new(); len + 1];
        let mut end_nodes = vec![Vec::new(); len + 1];
        end_nodes[0].push(BOS_NODE);
        begin_nodes[len].push(1);

        Self {
            sentence: sentence.to_string(),
            offsets,
            nodes: vec![node(bos_token_id, 0, 0), node(eos_token_id, 1, len)],
            begin_nodes,
            end_nodes,
        }
    }

    /// The length of the sentence, in chars.
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Is the sentence empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The sentence suffix starting at char position `pos`.
    pub fn suffix(
        &self,
        pos: usize,
    ) -> &str {
        &self.sentence[self.offsets[pos]..]
    }

    /// All nodes, including BOS (index 0) and EOS (index 1).
    pub fn nodes(&self) -> &[LatticeNode] {
        &self.nodes
    }

    /// Does any inserted node begin at `pos` with `length` chars?
    pub fn has_node(
        &self,
        pos: usize,
        length: usize,
    ) -> bool {
        self.begin_nodes[pos]
            .iter()
            .any(|&id| self.nodes[id].length == length)
    }

    /// Insert a span of `length` chars starting at char `pos`.
    ///
    /// ## Panics
    /// If the span runs past the end of the sentence.
    pub fn insert(
        &mut self,
        pos: usize,
        length: usize,
        score: f64,
        token_id: Option<TokenId>,
    ) {
        let node_id = self.nodes.len();
        self.begin_nodes[pos].push(node_id);
        self.end_nodes[pos + length].push(node_id);
        self.nodes.push(LatticeNode {
            token_id,
            node_id,
            pos,
            length,
            score,
            prev: None,
            backtrace_score: 0.0,
        });
    }

    /// Find the maximum-score path from BOS to EOS.
    ///
    /// Returns the path's node ids, excluding BOS and EOS; ties go to the
    /// first predecessor seen. An unreachable position yields an empty path.
    pub fn viterbi(&mut self) -> Vec<usize> {
        let len = self.len();
        for pos in 0..=len {
            if self.begin_nodes[pos].is_empty() {
                return Vec::new();
            }
            for bi in 0..self.begin_nodes[pos].len() {
                let rnode = self.begin_nodes[pos][bi];
                let rscore = self.nodes[rnode].score;
                self.nodes[rnode].prev = None;

                let mut best: Option<(usize, f64)> = None;
                for &lnode in &self.end_nodes[pos] {
                    let score = self.nodes[lnode].backtrace_score + rscore;
                    if best.is_none_or(|(_, best_score)| score > best_score) {
                        best = Some((lnode, score));
                    }
                }

                match best {
                    Some((lnode, score)) => {
                        self.nodes[rnode].prev = Some(lnode);
                        self.nodes[rnode].backtrace_score = score;
                    }
                    None => return Vec::new(),
                }
            }
        }

        let Some(mut node) = self.begin_nodes[len].first().and_then(|&eos| self.nodes[eos].prev)
        else {
            return Vec::new();
        };
        let mut path = Vec::new();
        while let Some(prev) = self.nodes[node].prev {
            path.push(node);
            node = prev;
        }
        path.reverse();
        path
    }

    /// The surface text of node `node_id`.
    pub fn piece(
        &self,
        node_id: usize,
    ) -> &str {
        let node = &self.nodes[node_id];
        &self.sentence[self.offsets[node.pos]..self.offsets[node.pos + node.length]]
    }

    /// The surface text of every node on the best path.
    pub fn tokens(&mut self) -> Vec<String> {
        self.viterbi()
            .into_iter()
            .map(|id| self.piece(id).to_string())
            .collect()
    }

    /// The token ids of every node on the best path.
    pub fn token_ids(&mut self) -> Vec<Option<TokenId>> {
        self.viterbi()
            .into_iter()
            .map(|id| self.nodes[id].token_id)
            .collect()
    }
}
