use clap::Args;
use miette::{miette, Result};
use std::path::PathBuf;
use tracing::info;
use valve_kv::KeyValues;

#[derive(Args)]
pub struct FormatArgs {
    /// An input KeyValues file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Allow overwriting the output
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl FormatArgs {
    pub fn handle(&self) -> Result<()> {
        let kv = KeyValues::from_file(&self.file)?;

        match &self.output {
            None => print!("{kv}"),
            Some(output) => {
                if output.exists() && !self.overwrite {
                    return Err(miette!(
                        "{} already exists, pass --overwrite to replace it",
                        output.display()
                    ));
                }
                info!("writing {}", output.display());
                kv.write_to_file(output)?;
            }
        }

        Ok(())
    }
}
