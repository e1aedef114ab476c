pub mod diff;
pub mod extract;
pub mod list;

#[derive(clap::Subcommand)]
pub enum VpkCommands {
    /// Compare two VPK directories
    Diff(diff::DiffArgs),
    /// Extract a VPK package into a directory
    Extract(extract::ExtractArgs),
    /// List the files of a VPK package
    List(list::ListArgs),
}

impl VpkCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            VpkCommands::Diff(diff) => diff.handle(),
            VpkCommands::Extract(extract) => extract.handle(),
            VpkCommands::List(list) => list.handle(),
        }
    }
}
