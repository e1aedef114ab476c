use clap::{Args, ValueEnum};
use itertools::Itertools;
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use similar::{ChangeTag, TextDiff};
use std::{
    collections::HashSet,
    fmt::Display,
    path::{Path, PathBuf},
};
use valve_kv::KeyValues;
use valve_vpk::{VpkArchive, VpkFile};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Mode {
    /// Compare names, sizes and checksums
    #[default]
    Summary,
    /// Also compare the content of KeyValues text files line by line
    Full,
}

/// File extensions holding KeyValues text
const TEXT_EXTENSIONS: [&str; 4] = [".txt", ".res", ".vdf", ".vmt"];

#[derive(Debug, PartialEq, Eq)]
enum Change {
    Added(String),
    Removed(String),
    Comparison(&'static str, String, String),
    Context(Vec<String>),
    Modified(String, Vec<Change>),
}

impl Display for Change {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Change::Added(name) => writeln!(f, "✅ {}", name.green()),
            Change::Removed(name) => writeln!(f, "❌ {}", name.red()),
            Change::Comparison(key, old, new) => {
                writeln!(f, "  * {}: {} vs {}", key, old.red(), new.green())
            }
            Change::Context(lines) => {
                writeln!(f, "{}", lines.iter().map(|l| format!("    {l}")).join("\n"))
            }
            Change::Modified(name, related) => {
                writeln!(f, "🔃 {}", name.blue())?;
                related.iter().try_for_each(|c| write!(f, "{c}"))
            }
        }
    }
}

#[derive(Args)]
pub struct DiffArgs {
    /// An input VPK directory, or a loose file
    #[arg(short, long, value_name = "FILE")]
    left: PathBuf,

    /// An input VPK directory, or a loose file
    #[arg(short, long, value_name = "FILE")]
    right: PathBuf,

    /// Comparison mode
    #[arg(short, long, value_enum, default_value_t = Mode::Summary)]
    mode: Mode,
}

/// Normalize text through the KeyValues writer when it parses, so formatting
/// differences do not show up
fn normalized_text(data: &[u8]) -> String {
    match KeyValues::from_bytes(data.to_vec()) {
        Ok(kv) if !kv.is_empty() => kv.to_string(),
        _ => String::from_utf8_lossy(data).into_owned(),
    }
}

fn text_changes(old: &str, new: &str) -> Vec<String> {
    let diff = TextDiff::from_lines(old, new);
    let mut lines = Vec::new();

    for op in diff.ops() {
        for change in diff.iter_inline_changes(op) {
            let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => continue,
            };

            let mut line = String::from(sign);
            for (emphasized, value) in change.iter_strings_lossy() {
                let value = value.trim_end_matches('\n');
                match (emphasized, change.tag()) {
                    (true, ChangeTag::Insert) => line.push_str(&format!("{}", value.green().underline())),
                    (true, _) => line.push_str(&format!("{}", value.red().underline())),
                    (false, _) => line.push_str(&format!("{}", value.dimmed())),
                }
            }
            lines.push(line);
        }
    }

    lines
}

/// Compare two loose files, always down to their lines
fn loose_changes(name: &str, left: &[u8], right: &[u8]) -> Option<Change> {
    if left == right {
        return None;
    }
    let lines = text_changes(&normalized_text(left), &normalized_text(right));
    if lines.is_empty() {
        return None;
    }

    let mut related = Vec::new();
    if left.len() != right.len() {
        related.push(Change::Comparison(
            "size",
            left.len().to_string(),
            right.len().to_string(),
        ));
    }
    related.push(Change::Context(lines));

    Some(Change::Modified(name.to_owned(), related))
}

fn is_vpk(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("vpk"))
}

impl DiffArgs {
    fn handle_file(&self, left: VpkFile<'_>, right: VpkFile<'_>) -> Result<Option<Change>> {
        let mut related = Vec::new();

        if left.size() != right.size() {
            related.push(Change::Comparison(
                "size",
                left.size().to_string(),
                right.size().to_string(),
            ));
        }
        if left.crc32() != right.crc32() {
            related.push(Change::Comparison(
                "crc32",
                format!("{:08x}", left.crc32()),
                format!("{:08x}", right.crc32()),
            ));
        }

        let is_text = TEXT_EXTENSIONS
            .iter()
            .any(|ext| left.name().ends_with(ext));
        if self.mode == Mode::Full && is_text && !related.is_empty() {
            let old = normalized_text(&left.get_data()?);
            let new = normalized_text(&right.get_data()?);
            let lines = text_changes(&old, &new);
            if !lines.is_empty() {
                related.push(Change::Context(lines));
            }
        }

        Ok((!related.is_empty()).then(|| Change::Modified(left.name().to_owned(), related)))
    }

    fn handle_vpk(&self, left: &VpkArchive, right: &VpkArchive) -> Result<Vec<Change>> {
        let left_names = left.file_names().collect::<HashSet<_>>();
        let right_names = right.file_names().collect::<HashSet<_>>();

        let mut changes = Vec::new();
        for name in left_names.union(&right_names).sorted() {
            match (left.find(name), right.find(name)) {
                (Some(_), None) => changes.push(Change::Removed(name.to_string())),
                (None, Some(_)) => changes.push(Change::Added(name.to_string())),
                (Some(l), Some(r)) => changes.extend(self.handle_file(l, r)?),
                (None, None) => {}
            }
        }

        Ok(changes)
    }

    fn handle_loose(&self) -> Result<Option<Change>> {
        let left = std::fs::read(&self.left)
            .into_diagnostic()
            .context(format!("path: {}", &self.left.display()))?;
        let right = std::fs::read(&self.right)
            .into_diagnostic()
            .context(format!("path: {}", &self.right.display()))?;

        Ok(loose_changes(
            &self.left.display().to_string(),
            &left,
            &right,
        ))
    }

    pub fn handle(&self) -> Result<()> {
        if !is_vpk(&self.left) && !is_vpk(&self.right) {
            if let Some(change) = self.handle_loose()? {
                print!("{change}");
            }
            return Ok(());
        }

        let left = VpkArchive::open(&self.left)
            .context(format!("path: {}", &self.left.display()))?;
        let right = VpkArchive::open(&self.right)
            .context(format!("path: {}", &self.right.display()))?;

        for change in self.handle_vpk(&left, &right)? {
            print!("{change}");
        }

        Ok(())
    }
}
