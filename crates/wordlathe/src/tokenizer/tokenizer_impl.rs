//! # Tokenizer
//!
//! Assembles the pipeline from `tokenizer.json` + `tokenizer_config.json`
//! and runs it:
//!
//! ```text
//! text -> added-token split -> [normalizer] -> [pre-tokenizer] -> model
//!      -> [post-processor] -> ids -> pad / truncate
//! ```

use std::path::Path;

use serde_json::{Map, Value};

use crate::{
    collections::DictionarySplitter,
    config::{AddedToken, ChatTemplateConfig, PaddingSide, TokenizerConfig, TokenizerDefinition},
    decoders::Decoder,
    errors::{WLResult, WordlatheError},
    models::TokenizerModel,
    normalizers::Normalizer,
    post_processors::{PostProcessedOutput, PostProcessor},
    pre_tokenizers::PreTokenizer,
    support::strings::{clean_up_tokenization, lowercase_and_remove_accent},
    tokenizer::{
        BatchEncoding,
        CallOptions,
        ChatOutput,
        ChatTemplateOptions,
        ChatTemplateRenderer,
        DecodeOptions,
        EncodeOptions,
        Encoding,
        Padding,
        SpecialTokenKind,
        SpecialTokens,
        TextInput,
        select_chat_template,
    },
    types::{TokenId, WLHashMap, WLHashSet, hash_map_with_capacity},
};

/// The tokenizer definition file name in a model directory.
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// The tokenizer config file name in a model directory.
pub const TOKENIZER_CONFIG_FILE: &str = "tokenizer_config.json";

/// Tokenizer classes whose encodings include token type ids by default.
const TOKEN_TYPE_ID_CLASSES: &[&str] = &[
    "BertTokenizer",
    "AlbertTokenizer",
    "MobileBertTokenizer",
    "SqueezeBertTokenizer",
    "DebertaTokenizer",
    "DebertaV2Tokenizer",
    "HerbertTokenizer",
    "ConvBertTokenizer",
    "RoFormerTokenizer",
    "ElectraTokenizer",
];

/// Does `tokenizer_class` (with or without a `Fast` suffix) return token type ids?
pub fn class_returns_token_type_ids(tokenizer_class: &str) -> bool {
    let class = tokenizer_class
        .strip_suffix("Fast")
        .unwrap_or(tokenizer_class);
    TOKEN_TYPE_ID_CLASSES.contains(&class)
}

/// A complete tokenizer.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    normalizer: Option<Normalizer>,
    pre_tokenizer: Option<PreTokenizer>,
    model: TokenizerModel,
    post_processor: Option<PostProcessor>,
    decoder: Option<Decoder>,

    added_tokens: Vec<AddedToken>,
    added_tokens_map: WLHashMap<String, usize>,
    added_tokens_splitter: DictionarySplitter,

    special_tokens: Vec<String>,
    special_token_set: WLHashSet<String>,
    all_special_ids: Vec<TokenId>,
    special: SpecialTokens,

    model_max_length: Option<usize>,
    padding_side: PaddingSide,
    remove_space: bool,
    do_lowercase_and_remove_accent: bool,
    clean_up_tokenization_spaces: bool,
    return_token_type_ids: bool,
    chat_template: Option<ChatTemplateConfig>,
}

impl Tokenizer {
    /// Build a tokenizer from its two documents.
    ///
    /// ## Arguments
    /// * `definition` - the parsed `tokenizer.json`.
    /// * `config` - the parsed `tokenizer_config.json`.
    ///
    /// ## Returns
    /// The tokenizer, or the first construction error: an unknown component
    /// `type`, a model without a vocabulary, or a malformed special token.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(definition, config)))]
    pub fn from_documents(
        definition: TokenizerDefinition,
        config: TokenizerConfig,
    ) -> WLResult<Self> {
        let normalizer = definition
            .normalizer
            .as_ref()
            .map(Normalizer::from_value)
            .transpose()?;
        let pre_tokenizer = definition
            .pre_tokenizer
            .as_ref()
            .map(PreTokenizer::from_value)
            .transpose()?;
        let mut model = TokenizerModel::from_config(&definition.model, &config)?;
        let post_processor = definition
            .post_processor
            .as_ref()
            .map(PostProcessor::from_value)
            .transpose()?;
        let mut decoder = definition
            .decoder
            .as_ref()
            .map(Decoder::from_value)
            .transpose()?;

        let added_tokens = definition.added_tokens;
        let mut special_tokens = Vec::new();
        let mut all_special_ids = Vec::new();
        for token in &added_tokens {
            model.vocab_mut().insert(token.content.clone(), token.id);
            if token.special {
                special_tokens.push(token.content.clone());
                all_special_ids.push(token.id);
            }
        }
        special_tokens.extend(config.additional_special_tokens()?);
        let mut special_token_set: WLHashSet<String> = WLHashSet::default();
        special_tokens.retain(|t| special_token_set.insert(t.clone()));

        let added_contents: Vec<&str> = added_tokens.iter().map(|t| t.content.as_str()).collect();
        if let Some(decoder) = &mut decoder {
            decoder.set_added_tokens(&added_contents);
        }
        let added_tokens_splitter = DictionarySplitter::new(added_contents.iter().copied());
        let mut added_tokens_map = hash_map_with_capacity(added_tokens.len());
        for (idx, token) in added_tokens.iter().enumerate() {
            added_tokens_map.insert(token.content.clone(), idx);
        }

        let special = SpecialTokens::from_config(&config, model.vocab())?;
        let return_token_type_ids = config
            .tokenizer_class
            .as_deref()
            .is_some_and(class_returns_token_type_ids);

        log::debug!(
            "built {} tokenizer: {} vocab entries, {} added tokens, {} special tokens",
            model.type_name(),
            model.vocab().len(),
            added_tokens.len(),
            special_tokens.len(),
        );

        Ok(Self {
            normalizer,
            pre_tokenizer,
            model,
            post_processor,
            decoder,
            added_tokens,
            added_tokens_map,
            added_tokens_splitter,
            special_tokens,
            special_token_set,
            all_special_ids,
            special,
            model_max_length: config.model_max_length(),
            padding_side: config.padding_side.unwrap_or_default(),
            remove_space: config.remove_space.unwrap_or(false),
            do_lowercase_and_remove_accent: config.do_lowercase_and_remove_accent.unwrap_or(false),
            clean_up_tokenization_spaces: config.clean_up_tokenization_spaces.unwrap_or(true),
            return_token_type_ids,
            chat_template: config.chat_template,
        })
    }

    /// Build a tokenizer from the JSON text of its two documents.
    pub fn from_json_str(
        tokenizer_json: &str,
        config_json: &str,
    ) -> WLResult<Self> {
        Self::from_documents(
            TokenizerDefinition::from_json_str(tokenizer_json)?,
            TokenizerConfig::from_json_str(config_json)?,
        )
    }

    /// Build a tokenizer from files.
    ///
    /// ## Arguments
    /// * `tokenizer_path` - the `tokenizer.json` path.
    /// * `config_path` - the `tokenizer_config.json` path; `None` uses an empty config.
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        tokenizer_path: P,
        config_path: Option<Q>,
    ) -> WLResult<Self> {
        let definition = TokenizerDefinition::from_json_str(&std::fs::read_to_string(tokenizer_path)?)?;
        let config = match config_path {
            Some(path) => TokenizerConfig::from_json_str(&std::fs::read_to_string(path)?)?,
            None => TokenizerConfig::default(),
        };
        Self::from_documents(definition, config)
    }

    /// Build a tokenizer from a model directory.
    ///
    /// Reads [`TOKENIZER_FILE`], and [`TOKENIZER_CONFIG_FILE`] when present.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> WLResult<Self> {
        let dir = dir.as_ref();
        let config_path = dir.join(TOKENIZER_CONFIG_FILE);
        let config_path = config_path.is_file().then_some(config_path);
        if config_path.is_none() {
            log::debug!("{} has no {TOKENIZER_CONFIG_FILE}", dir.display());
        }
        Self::from_files(dir.join(TOKENIZER_FILE), config_path)
    }

    /// The segmentation model.
    pub fn model(&self) -> &TokenizerModel {
        &self.model
    }

    /// The normalizer.
    pub fn normalizer(&self) -> Option<&Normalizer> {
        self.normalizer.as_ref()
    }

    /// The pre-tokenizer.
    pub fn pre_tokenizer(&self) -> Option<&PreTokenizer> {
        self.pre_tokenizer.as_ref()
    }

    /// The post-processor.
    pub fn post_processor(&self) -> Option<&PostProcessor> {
        self.post_processor.as_ref()
    }

    /// The decoder.
    pub fn decoder(&self) -> Option<&Decoder> {
        self.decoder.as_ref()
    }

    /// The added tokens, in definition order.
    pub fn added_tokens(&self) -> &[AddedToken] {
        &self.added_tokens
    }

    /// The special token texts, de-duplicated in first-seen order.
    pub fn special_tokens(&self) -> &[String] {
        &self.special_tokens
    }

    /// The ids of the special added tokens.
    pub fn all_special_ids(&self) -> &[TokenId] {
        &self.all_special_ids
    }

    /// The special tokens, by role.
    pub fn special(&self) -> &SpecialTokens {
        &self.special
    }

    /// The text of the `kind` special token.
    pub fn special_token(
        &self,
        kind: SpecialTokenKind,
    ) -> Option<&str> {
        self.special.content(kind)
    }

    /// The id of the `kind` special token.
    pub fn special_token_id(
        &self,
        kind: SpecialTokenKind,
    ) -> Option<TokenId> {
        self.special.id(kind)
    }

    /// The padding id.
    pub fn pad_token_id(&self) -> Option<TokenId> {
        self.special.id(SpecialTokenKind::Pad)
    }

    /// The maximum sequence length.
    pub fn model_max_length(&self) -> Option<usize> {
        self.model_max_length
    }

    /// The padding side.
    pub fn padding_side(&self) -> PaddingSide {
        self.padding_side
    }

    /// Set the padding side.
    pub fn with_padding_side(
        mut self,
        padding_side: PaddingSide,
    ) -> Self {
        self.padding_side = padding_side;
        self
    }

    /// Do encodings include token type ids by default?
    pub fn returns_token_type_ids(&self) -> bool {
        self.return_token_type_ids
    }

    /// The configured chat template(s).
    pub fn chat_template(&self) -> Option<&ChatTemplateConfig> {
        self.chat_template.as_ref()
    }

    /// The number of distinct vocabulary entries, added tokens included.
    pub fn vocab_size(&self) -> usize {
        self.model.vocab().len()
    }

    /// The id of `token`, without unknown fallback.
    pub fn token_to_id(
        &self,
        token: &str,
    ) -> Option<TokenId> {
        self.model.vocab().token_id(token)
    }

    /// The token with `id`, without unknown fallback.
    pub fn id_to_token(
        &self,
        id: TokenId,
    ) -> Option<&str> {
        self.model.vocab().id_token(id)
    }

    /// Map tokens to ids; misses resolve to the unknown id.
    pub fn convert_tokens_to_ids<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> WLResult<Vec<TokenId>> {
        self.model.convert_tokens_to_ids(tokens)
    }

    /// Map ids to tokens; misses resolve to the unknown token.
    pub fn convert_ids_to_tokens(
        &self,
        ids: &[TokenId],
    ) -> WLResult<Vec<String>> {
        self.model.convert_ids_to_tokens(ids)
    }

    /// Segment one text into tokens, without post-processing.
    ///
    /// Added tokens are carved out first; `lstrip` / `rstrip` trim the
    /// whitespace of the neighbouring span. Each remaining span is
    /// normalized, pre-tokenized (with its section index) and segmented.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    pub fn encode_text(
        &self,
        text: &str,
    ) -> Vec<String> {
        let mut sections: Vec<&str> = self.added_tokens_splitter.split(text);
        let last = sections.len().saturating_sub(1);
        for i in 0..sections.len() {
            let Some(token) = self.added_token(sections[i]) else {
                continue;
            };
            if token.lstrip && i > 0 {
                sections[i - 1] = sections[i - 1].trim_end();
            }
            if token.rstrip && i < last {
                sections[i + 1] = sections[i + 1].trim_start();
            }
        }

        let mut tokens = Vec::new();
        for (section_index, section) in sections.into_iter().enumerate() {
            if section.is_empty() {
                continue;
            }
            if self.added_tokens_map.contains_key(section) {
                tokens.push(section.to_string());
                continue;
            }

            let mut text = section.to_string();
            if self.remove_space {
                text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            }
            if self.do_lowercase_and_remove_accent {
                text = lowercase_and_remove_accent(&text);
            }
            if let Some(normalizer) = &self.normalizer {
                text = normalizer.normalize(&text);
            }
            if text.is_empty() {
                continue;
            }

            let words = match &self.pre_tokenizer {
                Some(pre_tokenizer) => pre_tokenizer.pre_tokenize_text(&text, Some(section_index)),
                None => vec![text],
            };
            tokens.extend(self.model.encode(&words));
        }
        tokens
    }

    fn added_token(
        &self,
        content: &str,
    ) -> Option<&AddedToken> {
        self.added_tokens_map
            .get(content)
            .map(|&idx| &self.added_tokens[idx])
    }

    /// Encode a text (and optional pair) and run the post-processor.
    fn tokenize_helper(
        &self,
        text: &str,
        pair: Option<&str>,
        add_special_tokens: bool,
    ) -> PostProcessedOutput {
        let tokens = self.encode_text(text);
        let pair_tokens = pair.map(|p| self.encode_text(p));
        match &self.post_processor {
            Some(processor) => processor.process(tokens, pair_tokens, add_special_tokens),
            None => {
                let mut tokens = tokens;
                tokens.extend(pair_tokens.into_iter().flatten());
                PostProcessedOutput {
                    tokens,
                    token_type_ids: None,
                }
            }
        }
    }

    /// Tokenize a text (and optional pair) into token strings.
    pub fn tokenize(
        &self,
        text: &str,
        pair: Option<&str>,
        add_special_tokens: bool,
    ) -> Vec<String> {
        self.tokenize_helper(text, pair, add_special_tokens).tokens
    }

    /// Encode one text (and optional pair) into an [`Encoding`].
    pub fn encode_plus(
        &self,
        text: &str,
        options: &EncodeOptions,
    ) -> WLResult<Encoding> {
        let PostProcessedOutput {
            tokens,
            token_type_ids,
        } = self.tokenize_helper(text, options.text_pair, options.add_special_tokens);

        let input_ids = self.model.convert_tokens_to_ids(&tokens)?;
        let attention_mask = vec![1; input_ids.len()];
        let token_type_ids = if options
            .return_token_type_ids
            .unwrap_or(self.return_token_type_ids)
        {
            token_type_ids
        } else {
            None
        };

        Ok(Encoding {
            input_ids,
            attention_mask,
            token_type_ids,
        })
    }

    /// Encode one text (and optional pair) into ids.
    pub fn encode(
        &self,
        text: &str,
        options: &EncodeOptions,
    ) -> WLResult<Vec<TokenId>> {
        Ok(self.encode_plus(text, options)?.input_ids)
    }

    /// Encode one text or a batch, with padding and truncation.
    ///
    /// ## Arguments
    /// * `text` - one text, or a batch.
    /// * `options` - pair texts, padding, truncation and length settings.
    ///
    /// ## Returns
    /// One [`Encoding`] per text. With both padding and truncation enabled
    /// every row has the same length; with `return_tensor` set, rows of
    /// different lengths are an error.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text, options)))]
    pub fn call<'a, T: Into<TextInput<'a>>>(
        &self,
        text: T,
        options: &CallOptions<'a>,
    ) -> WLResult<BatchEncoding> {
        let text = text.into();
        let pairs: Option<&[&str]> = match (&text, &options.text_pair) {
            (_, None) => None,
            (TextInput::Batch(texts), Some(TextInput::Batch(pairs))) => {
                if texts.len() != pairs.len() {
                    return Err(WordlatheError::TextPairMismatch(
                        "text and text_pair must have the same length".to_string(),
                    ));
                }
                Some(pairs)
            }
            (TextInput::Batch(_), Some(TextInput::Single(_))) => {
                return Err(WordlatheError::TextPairMismatch(
                    "text_pair must also be an array".to_string(),
                ));
            }
            (TextInput::Single(_), Some(TextInput::Single(pair))) => Some(std::slice::from_ref(pair)),
            (TextInput::Single(_), Some(TextInput::Batch(_))) => {
                return Err(WordlatheError::TextPairMismatch(
                    "text_pair must not be an array when text is a single string".to_string(),
                ));
            }
        };
        if text.is_empty() {
            return Err(WordlatheError::EmptyBatch);
        }

        let encode_options = EncodeOptions {
            text_pair: None,
            add_special_tokens: options.add_special_tokens,
            return_token_type_ids: options.return_token_type_ids,
        };
        let mut rows = self.encode_rows(text.texts(), pairs, &encode_options)?;

        let mut padding = options.padding;
        let mut truncation = options.truncation.unwrap_or(false);
        let mut max_length = match options.max_length {
            None => self.model_max_length,
            Some(max_length) => match options.truncation {
                Some(_) => Some(max_length),
                None => match padding {
                    Padding::Longest => {
                        log::warn!(
                            "`max_length` is ignored when `padding` is `Longest` and there is no \
                             truncation strategy; to pad to max length, use `Padding::MaxLength`"
                        );
                        self.model_max_length
                    }
                    Padding::None => {
                        log::warn!(
                            "truncation was not explicitly activated but `max_length` is set; \
                             truncating to `max_length`"
                        );
                        truncation = true;
                        Some(max_length)
                    }
                    Padding::MaxLength => Some(max_length),
                },
            },
        };
        if padding == Padding::Longest {
            let longest = rows.iter().map(Encoding::len).max().unwrap_or(0);
            max_length = Some(max_length.map_or(longest, |m| m.min(longest)));
        }
        if let Some(model_max) = self.model_max_length {
            max_length = Some(max_length.map_or(model_max, |m| m.min(model_max)));
        }

        if (padding.is_enabled() || truncation)
            && let Some(max_length) = max_length
        {
            for row in &mut rows {
                if row.len() > max_length {
                    if truncation {
                        row.truncate(max_length);
                    }
                } else if row.len() < max_length && padding.is_enabled() {
                    let pad_id = self.pad_token_id().ok_or(WordlatheError::MissingPadToken)?;
                    row.pad(max_length, pad_id, self.padding_side);
                }
            }
        } else if padding == Padding::MaxLength {
            log::warn!("`Padding::MaxLength` without any max length; rows are left unpadded");
            padding = Padding::None;
        }

        if options.return_tensor
            && !(padding.is_enabled() && truncation)
            && is_ragged(&rows)
        {
            return Err(WordlatheError::RaggedBatch);
        }

        Ok(BatchEncoding::new(rows, text.is_batch()))
    }

    /// Encode every text (with its pair), in parallel when `rayon` is enabled.
    fn encode_rows(
        &self,
        texts: &[&str],
        pairs: Option<&[&str]>,
        options: &EncodeOptions,
    ) -> WLResult<Vec<Encoding>> {
        let encode_one = |idx: usize| {
            let options = options.with_text_pair(pairs.map(|p| p[idx]));
            self.encode_plus(texts[idx], &options)
        };

        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            (0..texts.len()).into_par_iter().map(encode_one).collect()
        }

        #[cfg(not(feature = "rayon"))]
        {
            (0..texts.len()).map(encode_one).collect()
        }
    }

    /// Decode ids into text.
    ///
    /// ## Arguments
    /// * `ids` - the ids; must be non-empty.
    /// * `options` - special-token skipping and cleanup.
    pub fn decode(
        &self,
        ids: &[TokenId],
        options: &DecodeOptions,
    ) -> WLResult<String> {
        if ids.is_empty() {
            return Err(WordlatheError::EmptyDecode);
        }

        let mut tokens = self.model.convert_ids_to_tokens(ids)?;
        if options.skip_special_tokens {
            tokens.retain(|t| !self.special_token_set.contains(t));
        }

        let mut decoded = match &self.decoder {
            Some(decoder) => decoder.decode(tokens),
            None => tokens.join(" "),
        };

        if self.decoder.is_some()
            && let Some(suffix) = self.model.end_of_word_suffix()
        {
            decoded = decoded.replace(suffix, " ");
            if options.skip_special_tokens {
                decoded = decoded.trim().to_string();
            }
        }

        if options
            .clean_up_tokenization_spaces
            .unwrap_or(self.clean_up_tokenization_spaces)
        {
            decoded = clean_up_tokenization(&decoded);
        }
        Ok(decoded)
    }

    /// Decode each row of ids.
    pub fn batch_decode<S: AsRef<[TokenId]>>(
        &self,
        batch: &[S],
        options: &DecodeOptions,
    ) -> WLResult<Vec<String>> {
        batch
            .iter()
            .map(|ids| self.decode(ids.as_ref(), options))
            .collect()
    }

    /// Render a conversation through a chat template.
    ///
    /// ## Arguments
    /// * `messages` - the conversation; usually ``{"role", "content"}`` objects.
    /// * `renderer` - the template engine.
    /// * `options` - template selection, context, and tokenization settings.
    ///
    /// ## Returns
    /// The rendered text, or (when tokenizing) its ids or full encoding.
    pub fn apply_chat_template<R: ChatTemplateRenderer + ?Sized>(
        &self,
        messages: &[Value],
        renderer: &R,
        options: &ChatTemplateOptions,
    ) -> WLResult<ChatOutput> {
        let template = select_chat_template(
            self.chat_template.as_ref(),
            options.chat_template.as_deref(),
            options.tools.is_some(),
        )?;

        let mut context = Map::new();
        context.insert("messages".to_string(), Value::Array(messages.to_vec()));
        context.insert(
            "add_generation_prompt".to_string(),
            Value::Bool(options.add_generation_prompt),
        );
        context.insert(
            "tools".to_string(),
            options.tools.clone().unwrap_or(Value::Null),
        );
        context.insert(
            "documents".to_string(),
            options.documents.clone().unwrap_or(Value::Null),
        );
        for (attribute, value) in self.special.template_values() {
            context.insert(attribute.to_string(), Value::String(value.clone()));
        }
        for (key, value) in &options.kwargs {
            context.insert(key.clone(), value.clone());
        }

        let rendered = renderer.render(template, &Value::Object(context))?;
        if !options.tokenize {
            return Ok(ChatOutput::Text(rendered));
        }

        let call_options = CallOptions::default()
            .with_add_special_tokens(false)
            .with_padding(options.padding)
            .with_truncation(options.truncation)
            .with_max_length(options.max_length)
            .with_return_tensor(options.return_tensor);
        let encoding = self.call(rendered.as_str(), &call_options)?;
        if options.return_dict {
            return Ok(ChatOutput::Encoding(encoding));
        }
        Ok(ChatOutput::Ids(
            encoding
                .into_encodings()
                .into_iter()
                .next()
                .map(|e| e.input_ids)
                .unwrap_or_default(),
        ))
    }
}

/// Do the rows differ in any field's length?
fn is_ragged(rows: &[Encoding]) -> bool {
    let Some(first) = rows.first() else {
        return false;
    };
    let type_len = |e: &Encoding| e.token_type_ids.as_ref().map(Vec::len);
    rows.iter().any(|row| {
        row.input_ids.len() != first.input_ids.len()
            || row.attention_mask.len() != first.attention_mask.len()
            || type_len(row) != type_len(first)
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::static_is_send_sync_check;

    fn bert_tokenizer() -> Tokenizer {
        let definition = json!({
            "normalizer": {"type": "BertNormalizer", "clean_text": true,
                           "handle_chinese_chars": true, "strip_accents": null, "lowercase": true},
            "pre_tokenizer": {"type": "BertPreTokenizer"},
            "model": {"type": "WordPiece", "unk_token": "[UNK]", "continuing_subword_prefix": "##",
                      "max_input_chars_per_word": 100,
                      "vocab": {"[PAD]": 0, "[UNK]": 1, "[CLS]": 2, "[SEP]": 3,
                                "hello": 4, "world": 5, "!": 6, "he": 7, "##llo": 8}},
            "post_processor": {"type": "BertProcessing", "sep": ["[SEP]", 3], "cls": ["[CLS]", 2]},
            "decoder": {"type": "WordPiece", "prefix": "##", "cleanup": true},
            "added_tokens": [
                {"id": 0, "content": "[PAD]", "special": true},
                {"id": 1, "content": "[UNK]", "special": true},
                {"id": 2, "content": "[CLS]", "special": true},
                {"id": 3, "content": "[SEP]", "special": true}
            ]
        });
        let config = json!({
            "pad_token": "[PAD]", "unk_token": "[UNK]", "cls_token": "[CLS]", "sep_token": "[SEP]",
            "model_max_length": 512, "tokenizer_class": "BertTokenizer"
        });
        Tokenizer::from_documents(
            TokenizerDefinition::from_value(definition).unwrap(),
            serde_json::from_value(config).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_send_sync() {
        static_is_send_sync_check(&bert_tokenizer());
    }

    #[test]
    fn test_encode() {
        let tok = bert_tokenizer();
        assert!(tok.returns_token_type_ids());
        assert_eq!(
            tok.tokenize("Hello World!", None, false),
            vec!["hello", "world", "!"]
        );
        let encoding = tok
            .encode_plus("Hello World!", &EncodeOptions::default())
            .unwrap();
        assert_eq!(encoding.input_ids, vec![2, 4, 5, 6, 3]);
        assert_eq!(encoding.attention_mask, vec![1; 5]);
        assert_eq!(encoding.token_type_ids, Some(vec![0; 5]));

        let ids = tok
            .encode(
                "hello",
                &EncodeOptions::default().with_text_pair(Some("world")),
            )
            .unwrap();
        assert_eq!(ids, vec![2, 4, 3, 5, 3]);
    }

    #[test]
    fn test_added_tokens_are_atomic() {
        let tok = bert_tokenizer();
        assert_eq!(
            tok.tokenize("hello[SEP]world", None, false),
            vec!["hello", "[SEP]", "world"]
        );
        assert_eq!(tok.special_tokens(), &["[PAD]", "[UNK]", "[CLS]", "[SEP]"]);
        assert_eq!(tok.all_special_ids(), &[0, 1, 2, 3]);
        assert_eq!(tok.pad_token_id(), Some(0));
        assert_eq!(tok.special_token(SpecialTokenKind::Cls), Some("[CLS]"));
    }

    #[test]
    fn test_call_padding_and_truncation() {
        let tok = bert_tokenizer();
        let options = CallOptions::default()
            .with_padding(true)
            .with_truncation(true);
        let batch = tok.call(vec!["hello", "hello world!"], &options).unwrap();
        assert!(batch.is_batched());
        assert_eq!(batch.input_ids(), vec![&[2, 4, 3, 0, 0][..], &[2, 4, 5, 6, 3][..]]);
        assert_eq!(batch.attention_mask()[0], &[1, 1, 1, 0, 0]);

        let options = options.with_max_length(Some(4));
        let batch = tok.call(vec!["hello", "hello world!"], &options).unwrap();
        assert_eq!(batch.input_ids(), vec![&[2, 4, 3, 0][..], &[2, 4, 5, 6][..]]);
    }

    #[test]
    fn test_call_errors() {
        let tok = bert_tokenizer();
        assert!(matches!(
            tok.call(vec!["hello", "hello world"], &CallOptions::default()),
            Err(WordlatheError::RaggedBatch)
        ));
        assert!(
            tok.call(
                vec!["hello", "hello world"],
                &CallOptions::default().with_return_tensor(false)
            )
            .is_ok()
        );
        assert!(matches!(
            tok.call(Vec::<&str>::new(), &CallOptions::default()),
            Err(WordlatheError::EmptyBatch)
        ));
        assert!(matches!(
            tok.call(vec!["a", "b"], &CallOptions::default().with_text_pair("c")),
            Err(WordlatheError::TextPairMismatch(_))
        ));
        assert!(matches!(
            tok.call("a", &CallOptions::default().with_text_pair(vec!["c"])),
            Err(WordlatheError::TextPairMismatch(_))
        ));
        assert!(matches!(
            tok.call(vec!["a"], &CallOptions::default().with_text_pair(vec!["b", "c"])),
            Err(WordlatheError::TextPairMismatch(_))
        ));
    }

    #[test]
    fn test_max_length_without_truncation_truncates() {
        let tok = bert_tokenizer();
        let batch = tok
            .call("hello world!", &CallOptions::default().with_max_length(Some(3)))
            .unwrap();
        assert!(!batch.is_batched());
        assert_eq!(batch.first().unwrap().input_ids, vec![2, 4, 5]);
    }

    #[test]
    fn test_decode() {
        let tok = bert_tokenizer();
        let opts = DecodeOptions::default();
        assert_eq!(tok.decode(&[2, 7, 8, 5, 6, 3], &opts).unwrap(), "[CLS] hello world! [SEP]");
        assert_eq!(
            tok.decode(&[2, 7, 8, 5, 6, 3], &opts.with_skip_special_tokens(true))
                .unwrap(),
            "hello world!"
        );
        assert!(matches!(tok.decode(&[], &opts), Err(WordlatheError::EmptyDecode)));
        assert_eq!(
            tok.batch_decode(&[vec![4], vec![5]], &opts).unwrap(),
            vec!["hello", "world"]
        );
    }

    #[test]
    fn test_chat_template() {
        let tok = bert_tokenizer();
        let renderer = |template: &str, context: &Value| -> WLResult<String> {
            assert_eq!(template, "T");
            assert_eq!(context["cls_token"], "[CLS]");
            assert!(context.get("bos_token").is_none());
            let content = context["messages"][0]["content"].as_str().unwrap_or_default();
            Ok(format!("[CLS] {content}"))
        };
        let messages = vec![json!({"role": "user", "content": "hello"})];

        let text = tok
            .apply_chat_template(
                &messages,
                &renderer,
                &ChatTemplateOptions::default()
                    .with_chat_template("T")
                    .with_tokenize(false),
            )
            .unwrap();
        assert_eq!(text, ChatOutput::Text("[CLS] hello".to_string()));

        let ids = tok
            .apply_chat_template(
                &messages,
                &renderer,
                &ChatTemplateOptions::default().with_chat_template("T"),
            )
            .unwrap();
        assert_eq!(ids, ChatOutput::Ids(vec![2, 4]));

        assert!(matches!(
            tok.apply_chat_template(&messages, &renderer, &ChatTemplateOptions::default()),
            Err(WordlatheError::ChatTemplate(_))
        ));
    }

    #[test]
    fn test_class_returns_token_type_ids() {
        assert!(class_returns_token_type_ids("BertTokenizerFast"));
        assert!(class_returns_token_type_ids("DebertaV2Tokenizer"));
        assert!(!class_returns_token_type_ids("GPT2TokenizerFast"));
    }
}
