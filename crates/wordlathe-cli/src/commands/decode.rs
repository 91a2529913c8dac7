use std::io::Write;

use wordlathe::{DecodeOptions, TokenId};

use crate::{
    input_output::{InputArgs, OutputArgs, for_each_line},
    model_selector::{ConfigArgs, ModelSelectorArgs},
};

/// Args for the decode command.
#[derive(clap::Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    model_selector: ModelSelectorArgs,

    #[command(flatten)]
    config: ConfigArgs,

    /// Drop special tokens from the output.
    #[arg(long)]
    skip_special_tokens: bool,

    /// Override the tokenizer's tokenization-space cleanup setting.
    #[arg(long)]
    clean_up_tokenization_spaces: Option<bool>,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl DecodeArgs {
    /// Run the decode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let tokenizer = self.model_selector.load_tokenizer(&self.config)?;
        let options = DecodeOptions::default()
            .with_skip_special_tokens(self.skip_special_tokens)
            .with_clean_up_tokenization_spaces(self.clean_up_tokenization_spaces);

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        for_each_line(&mut reader, |line| {
            let ids = line
                .split_whitespace()
                .map(|s| s.parse::<TokenId>())
                .collect::<Result<Vec<_>, _>>()?;
            if ids.is_empty() {
                writeln!(writer)?;
            } else {
                writeln!(writer, "{}", tokenizer.decode(&ids, &options)?)?;
            }
            writer.flush()?;
            Ok(())
        })
    }
}
