use clap::Args;
use itertools::Itertools;
use miette::Result;
use std::path::PathBuf;
use valve_vpk::VpkArchive;

#[derive(Args)]
pub struct ListArgs {
    /// An input VPK directory, usually `*_dir.vpk`
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Show size, archive and checksum of every file
    #[arg(short, long, default_value_t = false)]
    long: bool,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let vpk = VpkArchive::open(&self.file)?;

        for file in vpk.entries().sorted_by_key(|f| f.name()) {
            if self.long {
                println!(
                    "{:>10} {:>5} {:08x} {}",
                    file.size(),
                    file.archive_index(),
                    file.crc32(),
                    file.name()
                );
            } else {
                println!("{}", file.name());
            }
        }

        Ok(())
    }
}
