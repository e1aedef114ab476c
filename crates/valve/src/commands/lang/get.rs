use clap::Args;
use miette::{Context, Result};
use std::path::PathBuf;
use tracing::warn;
use valve_lang::Language;

#[derive(Args)]
pub struct GetArgs {
    /// A language file such as `csgo_german.txt`
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A language file consulted for tokens missing from `--file`
    #[arg(long, value_name = "FILE")]
    fallback: Option<PathBuf>,

    /// The token, with or without a leading `#`
    token: String,
}

impl GetArgs {
    pub fn handle(&self) -> Result<()> {
        let language = Language::from_file(&self.file)
            .context(format!("path: {}", &self.file.display()))?;
        let fallback = self
            .fallback
            .as_ref()
            .map(|path| Language::from_file(path).context(format!("path: {}", path.display())))
            .transpose()?;

        let text = language.get_token(&self.token, fallback.as_ref());
        if text.is_empty() {
            warn!("no text for {}", self.token);
        }
        println!("{text}");

        Ok(())
    }
}
