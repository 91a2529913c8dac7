mod decode;
mod encode;
mod info;
mod tokenize;

/// Subcommands for wordlathe-cli
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Split each input line into token strings.
    Tokenize(tokenize::TokenizeArgs),

    /// Encode each input line into token ids.
    Encode(encode::EncodeArgs),

    /// Decode each input line of token ids into text.
    Decode(decode::DecodeArgs),

    /// Describe a tokenizer.
    Info(info::InfoArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Tokenize(cmd) => cmd.run(),
            Commands::Encode(cmd) => cmd.run(),
            Commands::Decode(cmd) => cmd.run(),
            Commands::Info(cmd) => cmd.run(),
        }
    }
}
