use clap::Args;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use valve_kv::KeyValues;

#[derive(Args)]
pub struct JsonArgs {
    /// An input KeyValues file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Print on a single line
    #[arg(long, default_value_t = false)]
    compact: bool,
}

impl JsonArgs {
    pub fn handle(&self) -> Result<()> {
        let kv = KeyValues::from_file(&self.file)?;

        let json = if self.compact {
            serde_json::to_string(&kv)
        } else {
            serde_json::to_string_pretty(&kv)
        }
        .into_diagnostic()?;

        println!("{json}");
        Ok(())
    }
}
