//! # Call Options

/// How `call` pads rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Padding {
    /// No padding.
    #[default]
    None,

    /// Pad to the longest row (capped by `max_length`).
    Longest,

    /// Pad to `max_length`.
    MaxLength,
}

impl Padding {
    /// Is any padding requested?
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl From<bool> for Padding {
    fn from(padding: bool) -> Self {
        if padding { Self::Longest } else { Self::None }
    }
}

/// One text, or a batch of texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInput<'a> {
    /// A single text.
    Single(&'a str),

    /// A batch of texts.
    Batch(Vec<&'a str>),
}

impl TextInput<'_> {
    /// Is this a batch?
    pub fn is_batch(&self) -> bool {
        matches!(self, Self::Batch(_))
    }

    /// The number of texts.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Batch(texts) => texts.len(),
        }
    }

    /// Is this an empty batch?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The texts, as a slice.
    pub fn texts(&self) -> &[&str] {
        match self {
            Self::Single(text) => std::slice::from_ref(text),
            Self::Batch(texts) => texts,
        }
    }
}

impl<'a> From<&'a str> for TextInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Single(text)
    }
}

impl<'a> From<Vec<&'a str>> for TextInput<'a> {
    fn from(texts: Vec<&'a str>) -> Self {
        Self::Batch(texts)
    }
}

impl<'a> From<&[&'a str]> for TextInput<'a> {
    fn from(texts: &[&'a str]) -> Self {
        Self::Batch(texts.to_vec())
    }
}

/// Options for `encode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions<'a> {
    /// The second text of a pair.
    pub text_pair: Option<&'a str>,

    /// Let the post-processor add its special tokens.
    pub add_special_tokens: bool,

    /// Include token type ids; `None` uses the tokenizer's default.
    pub return_token_type_ids: Option<bool>,
}

impl Default for EncodeOptions<'_> {
    fn default() -> Self {
        Self {
            text_pair: None,
            add_special_tokens: true,
            return_token_type_ids: None,
        }
    }
}

impl<'a> EncodeOptions<'a> {
    /// Set the pair text.
    pub fn with_text_pair(
        mut self,
        text_pair: Option<&'a str>,
    ) -> Self {
        self.text_pair = text_pair;
        self
    }

    /// Set whether special tokens are added.
    pub fn with_add_special_tokens(
        mut self,
        add_special_tokens: bool,
    ) -> Self {
        self.add_special_tokens = add_special_tokens;
        self
    }

    /// Set whether token type ids are returned.
    pub fn with_return_token_type_ids(
        mut self,
        return_token_type_ids: Option<bool>,
    ) -> Self {
        self.return_token_type_ids = return_token_type_ids;
        self
    }
}

/// Options for `call`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOptions<'a> {
    /// Second texts, matching the shape of the input.
    pub text_pair: Option<TextInput<'a>>,

    /// Let the post-processor add its special tokens.
    pub add_special_tokens: bool,

    /// Padding mode.
    pub padding: Padding,

    /// Truncate rows longer than `max_length`; `None` is unset.
    pub truncation: Option<bool>,

    /// Target row length.
    pub max_length: Option<usize>,

    /// Require a rectangular result.
    pub return_tensor: bool,

    /// Include token type ids; `None` uses the tokenizer's default.
    pub return_token_type_ids: Option<bool>,
}

impl Default for CallOptions<'_> {
    fn default() -> Self {
        Self {
            text_pair: None,
            add_special_tokens: true,
            padding: Padding::None,
            truncation: None,
            max_length: None,
            return_tensor: true,
            return_token_type_ids: None,
        }
    }
}

impl<'a> CallOptions<'a> {
    /// Set the pair texts.
    pub fn with_text_pair<T: Into<TextInput<'a>>>(
        mut self,
        text_pair: T,
    ) -> Self {
        self.text_pair = Some(text_pair.into());
        self
    }

    /// Set whether special tokens are added.
    pub fn with_add_special_tokens(
        mut self,
        add_special_tokens: bool,
    ) -> Self {
        self.add_special_tokens = add_special_tokens;
        self
    }

    /// Set the padding mode.
    pub fn with_padding<P: Into<Padding>>(
        mut self,
        padding: P,
    ) -> Self {
        self.padding = padding.into();
        self
    }

    /// Set truncation.
    pub fn with_truncation(
        mut self,
        truncation: bool,
    ) -> Self {
        self.truncation = Some(truncation);
        self
    }

    /// Set the target row length.
    pub fn with_max_length(
        mut self,
        max_length: Option<usize>,
    ) -> Self {
        self.max_length = max_length;
        self
    }

    /// Set whether a rectangular result is required.
    pub fn with_return_tensor(
        mut self,
        return_tensor: bool,
    ) -> Self {
        self.return_tensor = return_tensor;
        self
    }

    /// Set whether token type ids are returned.
    pub fn with_return_token_type_ids(
        mut self,
        return_token_type_ids: Option<bool>,
    ) -> Self {
        self.return_token_type_ids = return_token_type_ids;
        self
    }
}

/// Options for `decode`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Drop special tokens before decoding.
    pub skip_special_tokens: bool,

    /// Apply the cleanup table; `None` uses the tokenizer's default.
    pub clean_up_tokenization_spaces: Option<bool>,
}

impl DecodeOptions {
    /// Set whether special tokens are dropped.
    pub fn with_skip_special_tokens(
        mut self,
        skip_special_tokens: bool,
    ) -> Self {
        self.skip_special_tokens = skip_special_tokens;
        self
    }

    /// Set whether the cleanup table is applied.
    pub fn with_clean_up_tokenization_spaces(
        mut self,
        clean_up: Option<bool>,
    ) -> Self {
        self.clean_up_tokenization_spaces = clean_up;
        self
    }
}
