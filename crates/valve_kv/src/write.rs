//! Writing KeyValues trees back to text
//!

use std::{
    fmt,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use tracing::instrument;

use crate::{error::Result, tree::KeyValue, KeyValues};

fn write_entry(out: &mut impl fmt::Write, entry: KeyValue<'_>, depth: usize) -> fmt::Result {
    let pad = "\t".repeat(depth);

    match entry.value() {
        Some(value) => writeln!(out, "{pad}\"{}\" \"{value}\"", entry.key()),
        None => {
            writeln!(out, "{pad}\"{}\"", entry.key())?;
            writeln!(out, "{pad}{{")?;
            write_block(out, entry, depth + 1)?;
            writeln!(out, "{pad}}}")
        }
    }
}

fn write_block(out: &mut impl fmt::Write, block: KeyValue<'_>, depth: usize) -> fmt::Result {
    for child in block {
        write_entry(out, child, depth)?;
    }
    Ok(())
}

/// Writes a single entry, including its key, as KeyValues text
impl fmt::Display for KeyValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_entry(f, *self, 0)
    }
}

/// Writes the tree as KeyValues text, one tab of indentation per level.
///
/// Comments and conditional tags from the source are not reproduced. Entries
/// come out in the order they were first parsed.
impl fmt::Display for KeyValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_block(f, self.root(), 0)
    }
}

impl KeyValues {
    /// Write the tree as text to `writer`
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        let text = self.to_string();
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Write the tree as text into a new file at `path`
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write(&mut out)?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::{error::Result, KeyValues};

    #[test]
    fn write_nested() -> Result<()> {
        let kv = KeyValues::from_text(
            r#"
"lang"
{
    "Language"  "english"   [$WIN32]
    // comments are dropped
    "Tokens"
    {
        "SFUI_Hello"    "Hello"
    }
}
"#,
        )?;

        assert_eq!(
            kv.to_string(),
            "\"lang\"\n{\n\t\"Language\" \"english\"\n\t\"Tokens\"\n\t{\n\t\t\"SFUI_Hello\" \"Hello\"\n\t}\n}\n"
        );

        Ok(())
    }

    #[test]
    fn write_to_vec() -> Result<()> {
        let kv = KeyValues::from_text(r#""key" "value""#)?;

        let mut out = Vec::new();
        kv.write(&mut out)?;
        assert_eq!(out, b"\"key\" \"value\"\n");

        Ok(())
    }

    #[test]
    fn write_single_entry() -> Result<()> {
        let kv = KeyValues::from_text("\"a\"\n{\n\"b\" \"1\"\n\"c\"\n{\n}\n}\n")?;
        let a = kv.find_block("a").unwrap();

        assert_eq!(a.to_string(), "\"a\"\n{\n\t\"b\" \"1\"\n\t\"c\"\n\t{\n\t}\n}\n");
        assert_eq!(a.find("b").unwrap().to_string(), "\"b\" \"1\"\n");

        Ok(())
    }

    #[test]
    fn write_empty() {
        assert_eq!(KeyValues::new().to_string(), "");
    }
}
