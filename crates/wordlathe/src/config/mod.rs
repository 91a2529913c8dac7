//! # Config Documents
//!
//! Typed views of the two JSON documents a tokenizer is built from:
//!
//! * [`TokenizerDefinition`] - `tokenizer.json`; the component configs,
//!   the model, and the added tokens.
//! * [`TokenizerConfig`] - `tokenizer_config.json`; special tokens,
//!   length limits, padding side, chat templates.
//!
//! Component configs (normalizer, pre-tokenizer, post-processor, decoder)
//! stay as raw JSON here; each family parses its own, through
//! [`parse_component`], so an unknown `type` tag is reported as
//! [`WordlatheError::UnknownComponentType`] rather than a serde error.

pub mod definition;
pub mod model_config;
pub mod tokenizer_config;

#[doc(inline)]
pub use definition::*;
#[doc(inline)]
pub use model_config::*;
use serde::de::DeserializeOwned;
use serde_json::Value;
#[doc(inline)]
pub use tokenizer_config::*;

use crate::errors::{WLResult, WordlatheError};

/// The shape of a component family's `type`-tagged config.
#[derive(Debug, Clone, Copy)]
pub struct ComponentFamily {
    /// The family name used in errors.
    pub name: &'static str,

    /// Every `type` tag the family implements.
    pub known_types: &'static [&'static str],

    /// The key holding the children of a `Sequence` config.
    pub sequence_key: &'static str,
}

impl ComponentFamily {
    /// Check the `type` tags of `value` and every nested `Sequence` child.
    pub fn check_types(
        &self,
        value: &Value,
    ) -> WLResult<()> {
        let type_name = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                WordlatheError::InvalidConfig(format!("{} config has no `type` tag", self.name))
            })?;

        if !self.known_types.contains(&type_name) {
            return Err(WordlatheError::UnknownComponentType {
                family: self.name,
                type_name: type_name.to_string(),
            });
        }

        if type_name == "Sequence"
            && let Some(children) = value.get(self.sequence_key).and_then(Value::as_array)
        {
            for child in children {
                self.check_types(child)?;
            }
        }
        Ok(())
    }
}

/// Parse one component config, checking its `type` tags first.
///
/// ## Arguments
/// * `family` - the component family.
/// * `value` - the raw config.
///
/// ## Returns
/// The typed config, or `UnknownComponentType` for any unimplemented tag.
pub fn parse_component<T: DeserializeOwned>(
    family: &ComponentFamily,
    value: &Value,
) -> WLResult<T> {
    family.check_types(value)?;
    Ok(T::deserialize(value)?)
}
