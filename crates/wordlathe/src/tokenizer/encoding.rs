//! # Encodings

use crate::{config::PaddingSide, types::TokenId};

/// The encoding of one text (or text pair).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoding {
    /// Token ids.
    pub input_ids: Vec<TokenId>,

    /// ``1`` for real tokens, ``0`` for padding.
    pub attention_mask: Vec<u32>,

    /// Segment ids, when requested and produced by the post-processor.
    pub token_type_ids: Option<Vec<u32>>,
}

impl Encoding {
    /// The number of tokens, padding included.
    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    /// Is the encoding empty?
    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }

    /// Cut every field to `max_length`, keeping the start.
    pub fn truncate(
        &mut self,
        max_length: usize,
    ) {
        self.input_ids.truncate(max_length);
        self.attention_mask.truncate(max_length);
        if let Some(type_ids) = &mut self.token_type_ids {
            type_ids.truncate(max_length);
        }
    }

    /// Pad every field to `max_length` on `side`.
    ///
    /// Ids are padded with `pad_token_id`; the mask and type ids with ``0``.
    pub fn pad(
        &mut self,
        max_length: usize,
        pad_token_id: TokenId,
        side: PaddingSide,
    ) {
        let diff = max_length.saturating_sub(self.len());
        if diff == 0 {
            return;
        }
        pad_field(&mut self.input_ids, diff, pad_token_id, side);
        pad_field(&mut self.attention_mask, diff, 0, side);
        if let Some(type_ids) = &mut self.token_type_ids {
            pad_field(type_ids, diff, 0, side);
        }
    }
}

fn pad_field<T: Copy>(
    field: &mut Vec<T>,
    diff: usize,
    value: T,
    side: PaddingSide,
) {
    match side {
        PaddingSide::Right => field.extend(std::iter::repeat_n(value, diff)),
        PaddingSide::Left => {
            field.splice(0..0, std::iter::repeat_n(value, diff));
        }
    }
}

/// The result of `call`: one [`Encoding`] per input text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchEncoding {
    encodings: Vec<Encoding>,
    batched: bool,
}

impl BatchEncoding {
    /// Wrap per-text encodings.
    pub fn new(
        encodings: Vec<Encoding>,
        batched: bool,
    ) -> Self {
        Self { encodings, batched }
    }

    /// Was the input a batch?
    pub fn is_batched(&self) -> bool {
        self.batched
    }

    /// The number of rows.
    pub fn len(&self) -> usize {
        self.encodings.len()
    }

    /// Are there no rows?
    pub fn is_empty(&self) -> bool {
        self.encodings.is_empty()
    }

    /// The rows.
    pub fn encodings(&self) -> &[Encoding] {
        &self.encodings
    }

    /// Take the rows.
    pub fn into_encodings(self) -> Vec<Encoding> {
        self.encodings
    }

    /// The first row; the whole result for a single text.
    pub fn first(&self) -> Option<&Encoding> {
        self.encodings.first()
    }

    /// The ids of every row.
    pub fn input_ids(&self) -> Vec<&[TokenId]> {
        self.encodings
            .iter()
            .map(|e| e.input_ids.as_slice())
            .collect()
    }

    /// The attention masks of every row.
    pub fn attention_mask(&self) -> Vec<&[u32]> {
        self.encodings
            .iter()
            .map(|e| e.attention_mask.as_slice())
            .collect()
    }

    /// The token type ids of every row, if every row has them.
    pub fn token_type_ids(&self) -> Option<Vec<&[u32]>> {
        self.encodings
            .iter()
            .map(|e| e.token_type_ids.as_deref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoding() -> Encoding {
        Encoding {
            input_ids: vec![5, 6, 7],
            attention_mask: vec![1, 1, 1],
            token_type_ids: Some(vec![0, 0, 1]),
        }
    }

    #[test]
    fn test_truncate() {
        let mut e = encoding();
        e.truncate(2);
        assert_eq!(e.input_ids, vec![5, 6]);
        assert_eq!(e.attention_mask, vec![1, 1]);
        assert_eq!(e.token_type_ids, Some(vec![0, 0]));
        e.truncate(10);
        assert_eq!(e.len(), 2);
    }

    #[test]
    fn test_pad_sides() {
        let mut e = encoding();
        e.pad(5, 0, PaddingSide::Right);
        assert_eq!(e.input_ids, vec![5, 6, 7, 0, 0]);
        assert_eq!(e.attention_mask, vec![1, 1, 1, 0, 0]);

        let mut e = encoding();
        e.pad(4, 9, PaddingSide::Left);
        assert_eq!(e.input_ids, vec![9, 5, 6, 7]);
        assert_eq!(e.attention_mask, vec![0, 1, 1, 1]);
        assert_eq!(e.token_type_ids, Some(vec![0, 0, 0, 1]));

        e.pad(2, 9, PaddingSide::Left);
        assert_eq!(e.len(), 4);
    }

    #[test]
    fn test_batch_accessors() {
        let batch = BatchEncoding::new(vec![encoding(), Encoding::default()], true);
        assert!(batch.is_batched());
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.input_ids()[0], &[5, 6, 7]);
        assert_eq!(batch.token_type_ids(), None);
    }
}
