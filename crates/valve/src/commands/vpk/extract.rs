use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{
    fs::File,
    io::Write,
    path::{Component, Path, PathBuf},
};
use tracing::{info, warn};
use valve_vpk::VpkArchive;

#[derive(Args)]
pub struct ExtractArgs {
    /// An input VPK directory, usually `*_dir.vpk`
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    /// Check every file against its recorded CRC32
    #[arg(long, default_value_t = false)]
    verify: bool,
}

/// Path of `name` below `directory`, `None` if it would escape it
pub fn target_path(directory: &Path, name: &str) -> Option<PathBuf> {
    let relative = Path::new(name);
    if relative.as_os_str().is_empty()
        || !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(directory.join(relative))
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let vpk = VpkArchive::open(&self.file)
            .context(format!("path: {}", &self.file.display()))?;

        for file in vpk.entries() {
            let Some(p) = target_path(&self.directory, file.name()) else {
                warn!("skipping unsafe path {}", file.name());
                continue;
            };
            info!("writing {}", p.display());

            let data = if self.verify {
                file.read_verified()?
            } else {
                file.get_data()?
            };

            if let Some(parent) = p.parent() {
                std::fs::create_dir_all(parent)
                    .into_diagnostic()
                    .context(format!("creating {}", parent.display()))?;
            }
            let mut out = if !self.overwrite {
                File::create_new(&p)
                    .into_diagnostic()
                    .context(format!("creating {}", &p.display()))?
            } else {
                File::create(&p)
                    .into_diagnostic()
                    .context(format!("creating {}", &p.display()))?
            };

            out.write_all(&data).into_diagnostic()?;
        }
        Ok(())
    }
}
