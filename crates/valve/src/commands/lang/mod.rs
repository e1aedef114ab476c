pub mod get;

#[derive(clap::Subcommand)]
pub enum LangCommands {
    /// Resolve a localization token
    Get(get::GetArgs),
}

impl LangCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            LangCommands::Get(get) => get.handle(),
        }
    }
}
