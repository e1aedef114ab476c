use clap::Args;
use miette::{miette, Context, IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing::info;
use valve_items::{BlockAnalyzer, ItemsGame};

use super::load_language;

#[derive(Args)]
pub struct SchemaArgs {
    /// The item schema, `scripts/items/items_game.txt`
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// The section whose entries are analyzed
    #[arg(short, long, default_value = "items")]
    section: String,

    /// A language file used to detect localized fields
    #[arg(short, long, value_name = "FILE")]
    language: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl SchemaArgs {
    pub fn handle(&self) -> Result<()> {
        let items_game = ItemsGame::from_file(&self.file)
            .context(format!("path: {}", &self.file.display()))?;
        let language = load_language(self.language.as_ref())?;

        let section = items_game
            .block()
            .find_block(&self.section)
            .ok_or_else(|| miette!("no {} block in {}", self.section, self.file.display()))?;

        let mut analyzer = BlockAnalyzer::new();
        for entry in section.iter().filter(|entry| entry.is_block()) {
            analyzer.add_block(entry, language.as_ref());
        }
        info!("analyzed {} blocks", analyzer.len());

        match &self.output {
            None => print!("{analyzer}"),
            Some(output) => analyzer
                .write_to_file(output)
                .into_diagnostic()
                .context(format!("writing {}", output.display()))?,
        }

        Ok(())
    }
}
