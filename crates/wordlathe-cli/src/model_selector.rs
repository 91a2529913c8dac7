use std::path::PathBuf;

use wordlathe::Tokenizer;

/// Model selector arg group.
#[derive(clap::Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ModelSelectorArgs {
    /// A model directory holding `tokenizer.json` and `tokenizer_config.json`.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// A `tokenizer.json` file.
    #[arg(long)]
    tokenizer: Option<PathBuf>,
}

/// Optional companion config arg group.
#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    /// A `tokenizer_config.json` file; only used with `--tokenizer`.
    #[arg(long, requires = "tokenizer")]
    config: Option<PathBuf>,
}

impl ModelSelectorArgs {
    /// Load the tokenizer.
    pub fn load_tokenizer(
        &self,
        config: &ConfigArgs,
    ) -> Result<Tokenizer, Box<dyn std::error::Error>> {
        let tokenizer = match (&self.dir, &self.tokenizer) {
            (Some(dir), _) => {
                log::info!("loading tokenizer from {}", dir.display());
                Tokenizer::from_dir(dir)?
            }
            (None, Some(path)) => {
                log::info!("loading tokenizer from {}", path.display());
                Tokenizer::from_files(path, config.config.as_ref())?
            }
            (None, None) => return Err("one of --dir or --tokenizer is required".into()),
        };
        log::debug!(
            "loaded {} model with {} vocab entries",
            tokenizer.model().type_name(),
            tokenizer.vocab_size()
        );
        Ok(tokenizer)
    }
}
