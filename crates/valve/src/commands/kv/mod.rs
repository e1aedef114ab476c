pub mod format;
pub mod get;
pub mod json;

#[derive(clap::Subcommand)]
pub enum KvCommands {
    /// Rewrite a KeyValues file with normalized formatting
    Format(format::FormatArgs),
    /// Look up a key in a KeyValues file
    Get(get::GetArgs),
    /// Convert a KeyValues file to JSON
    Json(json::JsonArgs),
}

impl KvCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            KvCommands::Format(format) => format.handle(),
            KvCommands::Get(get) => get.handle(),
            KvCommands::Json(json) => json.handle(),
        }
    }
}
