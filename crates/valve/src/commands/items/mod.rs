use miette::{Context, Result};
use std::path::PathBuf;
use valve_lang::Language;

pub mod list;
pub mod schema;

#[derive(clap::Subcommand)]
pub enum ItemsCommands {
    /// List every item with its localized name
    List(list::ListArgs),
    /// Summarize which fields the entries of a section carry
    Schema(schema::SchemaArgs),
}

impl ItemsCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            ItemsCommands::List(list) => list.handle(),
            ItemsCommands::Schema(schema) => schema.handle(),
        }
    }
}

fn load_language(path: Option<&PathBuf>) -> Result<Option<Language>> {
    path.map(|path| Language::from_file(path).context(format!("path: {}", path.display())))
        .transpose()
}
