//! # Chat Templates
//!
//! Template selection and the rendering seam.
//!
//! This crate does not implement a template language; callers supply a
//! [`ChatTemplateRenderer`] (for example, a `minijinja` environment).

use serde_json::{Map, Value};

use crate::{
    config::ChatTemplateConfig,
    errors::{WLResult, WordlatheError},
    tokenizer::{BatchEncoding, Padding},
    types::TokenId,
};

/// Renders a chat template against a JSON context.
pub trait ChatTemplateRenderer {
    /// Render `template` with `context`.
    ///
    /// ## Arguments
    /// * `template` - the template source.
    /// * `context` - an object with `messages`, `add_generation_prompt`,
    ///   `tools`, `documents`, the special-token strings and any extra kwargs.
    fn render(
        &self,
        template: &str,
        context: &Value,
    ) -> WLResult<String>;
}

impl<F> ChatTemplateRenderer for F
where
    F: Fn(&str, &Value) -> WLResult<String>,
{
    fn render(
        &self,
        template: &str,
        context: &Value,
    ) -> WLResult<String> {
        self(template, context)
    }
}

/// Options for `apply_chat_template`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTemplateOptions {
    /// Tool descriptions; selects the `tool_use` template when present.
    pub tools: Option<Value>,

    /// Retrieval documents.
    pub documents: Option<Value>,

    /// A template name, or literal template source.
    pub chat_template: Option<String>,

    /// Ask the template to open an assistant turn.
    pub add_generation_prompt: bool,

    /// Tokenize the rendered text.
    pub tokenize: bool,

    /// Padding, when tokenizing.
    pub padding: Padding,

    /// Truncation, when tokenizing.
    pub truncation: bool,

    /// Target length, when tokenizing.
    pub max_length: Option<usize>,

    /// Require a rectangular result, when tokenizing.
    pub return_tensor: bool,

    /// Return the whole encoding rather than the ids.
    pub return_dict: bool,

    /// Extra template variables.
    pub kwargs: Map<String, Value>,
}

impl Default for ChatTemplateOptions {
    fn default() -> Self {
        Self {
            tools: None,
            documents: None,
            chat_template: None,
            add_generation_prompt: false,
            tokenize: true,
            padding: Padding::None,
            truncation: false,
            max_length: None,
            return_tensor: true,
            return_dict: false,
            kwargs: Map::new(),
        }
    }
}

impl ChatTemplateOptions {
    /// Set the tools.
    pub fn with_tools(
        mut self,
        tools: Value,
    ) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Set the documents.
    pub fn with_documents(
        mut self,
        documents: Value,
    ) -> Self {
        self.documents = Some(documents);
        self
    }

    /// Pick a template by name, or pass template source.
    pub fn with_chat_template<S: Into<String>>(
        mut self,
        chat_template: S,
    ) -> Self {
        self.chat_template = Some(chat_template.into());
        self
    }

    /// Set `add_generation_prompt`.
    pub fn with_add_generation_prompt(
        mut self,
        add_generation_prompt: bool,
    ) -> Self {
        self.add_generation_prompt = add_generation_prompt;
        self
    }

    /// Set whether the output is tokenized.
    pub fn with_tokenize(
        mut self,
        tokenize: bool,
    ) -> Self {
        self.tokenize = tokenize;
        self
    }

    /// Set whether the whole encoding is returned.
    pub fn with_return_dict(
        mut self,
        return_dict: bool,
    ) -> Self {
        self.return_dict = return_dict;
        self
    }

    /// Add an extra template variable.
    pub fn with_kwarg<S: Into<String>>(
        mut self,
        key: S,
        value: Value,
    ) -> Self {
        self.kwargs.insert(key.into(), value);
        self
    }
}

/// The result of `apply_chat_template`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutput {
    /// The rendered text.
    Text(String),

    /// The token ids of the rendered text.
    Ids(Vec<TokenId>),

    /// The full encoding of the rendered text.
    Encoding(BatchEncoding),
}

/// Choose the template source to render.
///
/// ## Arguments
/// * `configured` - the tokenizer's `chat_template`.
/// * `requested` - a template name, or literal source.
/// * `has_tools` - prefer a `tool_use` template.
///
/// ## Returns
/// The template source, or a `ChatTemplate` error when none applies.
pub fn select_chat_template<'a>(
    configured: Option<&'a ChatTemplateConfig>,
    requested: Option<&'a str>,
    has_tools: bool,
) -> WLResult<&'a str> {
    match (configured, requested) {
        (Some(named), requested) if matches!(named, ChatTemplateConfig::Named(_)) => {
            match requested {
                Some(name) => Ok(named.get(name).unwrap_or(name)),
                None => {
                    if has_tools && let Some(template) = named.get("tool_use") {
                        return Ok(template);
                    }
                    named.get("default").ok_or_else(|| {
                        WordlatheError::ChatTemplate(format!(
                            "multiple chat templates with no default specified; \
                             pass a template or one of the names {:?}",
                            named.names()
                        ))
                    })
                }
            }
        }
        (_, Some(source)) => Ok(source),
        (Some(ChatTemplateConfig::Single(source)), None) => Ok(source),
        (_, None) => Err(WordlatheError::ChatTemplate(
            "no chat template is configured and none was passed".to_string(),
        )),
    }
}
