use std::io::Write;

use wordlathe::EncodeOptions;

use crate::{
    input_output::{InputArgs, OutputArgs, for_each_line},
    model_selector::{ConfigArgs, ModelSelectorArgs},
};

/// Args for the encode command.
#[derive(clap::Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    model_selector: ModelSelectorArgs,

    #[command(flatten)]
    config: ConfigArgs,

    /// Leave out the post-processor's special tokens.
    #[arg(long)]
    no_special_tokens: bool,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl EncodeArgs {
    /// Run the encode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let tokenizer = self.model_selector.load_tokenizer(&self.config)?;
        let options = EncodeOptions::default().with_add_special_tokens(!self.no_special_tokens);

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        for_each_line(&mut reader, |line| {
            let ids = tokenizer.encode(line, &options)?;
            for (idx, id) in ids.iter().enumerate() {
                write!(writer, "{}{}", if idx == 0 { "" } else { " " }, id)?;
            }
            writeln!(writer)?;
            writer.flush()?;
            Ok(())
        })
    }
}
