//! Field statistics over many blocks of the same shape
//!
//! Feeding every item of `items_game.txt` into a [`BlockAnalyzer`] shows which fields items can
//! have, how often they appear and which of them hold localization tokens:
//!
//! ```text
//! {
//!     name
//!     item_name (1422/1503) #
//!     attributes (388/1503) [1..12] {
//!         ...
//!     }
//! }
//! ```
//!
//! - `(count/total)` how many of the analyzed blocks carry the field, left out when all do
//! - `[max]` or `[min..max]` how many fields the nested block has
//! - `#` the first value seen for the field resolves to a localization token
//!

use indexmap::IndexMap;
use std::{
    fmt::{self, Write as _},
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::instrument;
use valve_kv::{KeyValue, ValueType};
use valve_lang::Language;

#[derive(Debug, Clone)]
struct FieldStats {
    kind: ValueType,
    fields: IndexMap<String, FieldStats>,
    localized: bool,
    count: u32,
    min: u32,
    max: u32,
}

impl FieldStats {
    fn new(kind: ValueType) -> Self {
        FieldStats {
            kind,
            fields: IndexMap::new(),
            localized: false,
            count: 0,
            min: u32::MAX,
            max: 0,
        }
    }

    fn add(&mut self, block: KeyValue<'_>, language: Option<&Language>) {
        let len = u32::try_from(block.len()).unwrap_or(u32::MAX);
        self.min = self.min.min(len);
        self.max = self.max.max(len);

        for field in block {
            let stats = self
                .fields
                .entry(field.key().to_owned())
                .or_insert_with(|| {
                    let mut stats = FieldStats::new(field.value_type());
                    if let (Some(value), Some(language)) = (field.value(), language) {
                        stats.localized = !language.get_token(value, None).is_empty();
                    }
                    stats
                });

            stats.count += 1;
            if field.is_block() {
                stats.add(field, language);
            }
        }
    }

    fn write(&self, out: &mut impl fmt::Write, depth: usize) -> fmt::Result {
        let pad = "\t".repeat(depth);

        for (name, field) in &self.fields {
            write!(out, "{pad}{name}")?;
            if field.count != self.count {
                write!(out, " ({}/{})", field.count, self.count)?;
            }

            match field.kind {
                ValueType::Block => {
                    if field.min == field.max {
                        write!(out, " [{}]", field.max)?;
                    } else {
                        write!(out, " [{}..{}]", field.min, field.max)?;
                    }
                    writeln!(out, " {{")?;
                    field.write(out, depth + 1)?;
                    writeln!(out, "{pad}}}")?;
                }
                ValueType::Value => {
                    writeln!(out, "{}", if field.localized { " #" } else { "" })?;
                }
            }
        }

        Ok(())
    }
}

/// Aggregates the fields of many blocks into one schema
#[derive(Debug, Clone)]
pub struct BlockAnalyzer {
    root: FieldStats,
}

impl Default for BlockAnalyzer {
    fn default() -> Self {
        BlockAnalyzer {
            root: FieldStats::new(ValueType::Block),
        }
    }
}

impl BlockAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every block added so far
    pub fn reset(&mut self) {
        self.root = FieldStats::new(ValueType::Block);
    }

    /// Number of blocks added so far
    pub fn len(&self) -> u32 {
        self.root.count
    }

    /// Whether no blocks have been added
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add the fields of `block` to the statistics.
    ///
    /// With a `language`, values are checked for being localization tokens the
    /// first time their field is seen.
    pub fn add_block(&mut self, block: KeyValue<'_>, language: Option<&Language>) {
        self.root.count += 1;
        self.root.add(block, language);
    }

    /// Write the statistics to `writer`
    pub fn write<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writer.write_all(self.to_string().as_bytes())
    }

    /// Write the statistics into a new file at `path`
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write(&mut out)?;
        out.flush()
    }
}

impl fmt::Display for BlockAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{\n")?;
        self.root.write(f, 1)?;
        f.write_str("}\n")
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use valve_kv::KeyValues;
    use valve_lang::Language;

    use super::BlockAnalyzer;

    const ITEMS: &str = r##"
"1"
{
    "name"          "weapon_deagle"
    "item_name"     "#SFUI_WPNHUD_DesertEagle"
    "attributes"
    {
        "a"     "1"
        "b"     "2"
    }
}
"2"
{
    "name"          "weapon_elite"
    "item_name"     "#Not_A_Token"
    "attributes"
    {
        "a"     "1"
    }
}
"3"
{
    "name"          "weapon_fiveseven"
}
"##;

    fn analyze(language: Option<&Language>) -> BlockAnalyzer {
        let kv = KeyValues::from_text(ITEMS).unwrap();
        let mut analyzer = BlockAnalyzer::new();
        for item in kv.root() {
            analyzer.add_block(item, language);
        }
        analyzer
    }

    #[test]
    fn write_statistics() {
        let analyzer = analyze(None);
        assert_eq!(analyzer.len(), 3);
        assert_eq!(
            analyzer.to_string(),
            "{\n\tname\n\titem_name (2/3)\n\tattributes (2/3) [1..2] {\n\t\ta\n\t\tb (1/2)\n\t}\n}\n"
        );
    }

    #[test]
    fn localized_fields() {
        let english = Language::from_text(
            "\"lang\"\n{\n\"Tokens\"\n{\n\"SFUI_WPNHUD_DesertEagle\" \"Desert Eagle\"\n}\n}\n",
        )
        .unwrap();

        // only the first value seen decides
        let analyzer = analyze(Some(&english));
        assert!(analyzer.to_string().contains("\titem_name (2/3) #\n"));
        assert!(analyzer.to_string().contains("\tname\n"));
    }

    #[test]
    fn fixed_block_size() {
        let kv = KeyValues::from_text("\"x\"\n{\n\"inner\"\n{\n\"a\" \"1\"\n}\n}\n").unwrap();
        let mut analyzer = BlockAnalyzer::new();
        analyzer.add_block(kv.find_block("x").unwrap(), None);
        analyzer.add_block(kv.find_block("x").unwrap(), None);

        assert_eq!(analyzer.to_string(), "{\n\tinner [1] {\n\t\ta\n\t}\n}\n");
    }

    #[test]
    fn reset_clears() {
        let mut analyzer = analyze(None);
        analyzer.reset();
        assert!(analyzer.is_empty());
        assert_eq!(analyzer.to_string(), "{\n}\n");

        let mut out = Vec::new();
        analyzer.write(&mut out).unwrap();
        assert_eq!(out, b"{\n}\n");
    }
}
