use std::io::Write;

use crate::{
    input_output::{InputArgs, OutputArgs, for_each_line},
    model_selector::{ConfigArgs, ModelSelectorArgs},
};

/// Args for the tokenize command.
#[derive(clap::Args, Debug)]
pub struct TokenizeArgs {
    #[command(flatten)]
    model_selector: ModelSelectorArgs,

    #[command(flatten)]
    config: ConfigArgs,

    /// Add the post-processor's special tokens.
    #[arg(long)]
    add_special_tokens: bool,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl TokenizeArgs {
    /// Run the tokenize command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let tokenizer = self.model_selector.load_tokenizer(&self.config)?;

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        for_each_line(&mut reader, |line| {
            let tokens = tokenizer.tokenize(line, None, self.add_special_tokens);
            writeln!(writer, "{}", tokens.join(" "))?;
            writer.flush()?;
            Ok(())
        })
    }
}
