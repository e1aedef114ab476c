pub mod items;
pub mod kv;
pub mod lang;
pub mod vpk;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle KeyValues text files
    Kv {
        #[command(subcommand)]
        command: kv::KvCommands,
    },
    /// Handle VPK packages
    Vpk {
        #[command(subcommand)]
        command: vpk::VpkCommands,
    },
    /// Handle language files
    Lang {
        #[command(subcommand)]
        command: lang::LangCommands,
    },
    /// Handle the item schema
    Items {
        #[command(subcommand)]
        command: items::ItemsCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Kv { command } => command.handle(),
            Commands::Vpk { command } => command.handle(),
            Commands::Lang { command } => command.handle(),
            Commands::Items { command } => command.handle(),
        }
    }
}
