use wordlathe::tokenizer::SpecialTokenKind;

use crate::model_selector::{ConfigArgs, ModelSelectorArgs};

/// Args for the info command.
#[derive(clap::Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    model_selector: ModelSelectorArgs,

    #[command(flatten)]
    config: ConfigArgs,
}

impl InfoArgs {
    /// Run the info command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let tokenizer = self.model_selector.load_tokenizer(&self.config)?;

        println!("model: {}", tokenizer.model().type_name());
        println!("vocab_size: {}", tokenizer.vocab_size());
        match tokenizer.model_max_length() {
            Some(max) => println!("model_max_length: {max}"),
            None => println!("model_max_length: unbounded"),
        }
        println!("added_tokens: {}", tokenizer.added_tokens().len());
        for kind in SpecialTokenKind::ALL {
            if let Some(content) = tokenizer.special_token(kind) {
                let id = tokenizer
                    .special_token_id(kind)
                    .map_or("-".to_string(), |id| id.to_string());
                println!("{}: {content:?} ({id})", kind.attribute());
            }
        }
        Ok(())
    }
}
