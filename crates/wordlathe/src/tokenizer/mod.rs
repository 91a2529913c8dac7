//! # Tokenizer
//!
//! The [`Tokenizer`] orchestrator, its options, and its outputs.

mod chat_template;
mod encoding;
mod special_tokens;
mod tokenizer_impl;
mod tokenizer_options;

#[doc(inline)]
pub use chat_template::*;
#[doc(inline)]
pub use encoding::*;
#[doc(inline)]
pub use special_tokens::*;
#[doc(inline)]
pub use tokenizer_impl::*;
#[doc(inline)]
pub use tokenizer_options::*;
