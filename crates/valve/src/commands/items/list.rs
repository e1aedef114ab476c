use clap::Args;
use miette::{Context, Result};
use std::path::PathBuf;
use valve_items::ItemsGame;

use super::load_language;

#[derive(Args)]
pub struct ListArgs {
    /// The item schema, `scripts/items/items_game.txt`
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A language file used for display names
    #[arg(short, long, value_name = "FILE")]
    language: Option<PathBuf>,

    /// A language file consulted for tokens missing from `--language`
    #[arg(long, value_name = "FILE")]
    fallback: Option<PathBuf>,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let items_game = ItemsGame::from_file(&self.file)
            .context(format!("path: {}", &self.file.display()))?;
        let language = load_language(self.language.as_ref())?;
        let fallback = load_language(self.fallback.as_ref())?;

        for item in items_game.items().iter() {
            let id = item.id().map_or_else(|| item.key().to_owned(), |id| id.to_string());
            let name = item.name().unwrap_or_default();

            match &language {
                Some(language) => println!(
                    "{id}\t{name}\t{}\t{}",
                    item.localized_name(language, fallback.as_ref()),
                    item.rarity().unwrap_or_default()
                ),
                None => println!("{id}\t{name}\t{}", item.rarity().unwrap_or_default()),
            }
        }

        Ok(())
    }
}
