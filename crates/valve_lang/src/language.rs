//! Localization token tables
//!

use std::{
    fmt::{self, Debug},
    path::Path,
};
use tracing::{debug, instrument};
use valve_kv::{KeyValue, KeyValues, NodeId};

use crate::{
    error::{Error, Result},
    text::TextFile,
};

/// A parsed language file such as `resource/csgo_english.txt`
///
/// ```no_run
/// fn print_name(english: &str, german: &str) -> valve_lang::error::Result<()> {
///     let english = valve_lang::Language::from_file(english)?;
///     let german = valve_lang::Language::from_file(german)?;
///
///     // falls back to english for tokens german does not translate
///     println!("{}", german.get_token("#SFUI_WPNHUD_AK47", Some(&english)));
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Language {
    kv: KeyValues,
    tokens: NodeId,
}

impl Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Language")
            .field("tokens", &self.len())
            .finish()
    }
}

impl Language {
    /// Read a language file, UTF-16 or UTF-8
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Language> {
        Self::from_text_file(TextFile::from_file(path)?)
    }

    /// Parse a language file from raw bytes, UTF-16 or UTF-8
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Language> {
        Self::from_text_file(TextFile::from_bytes(bytes))
    }

    /// Parse a language file from text
    pub fn from_text(text: impl Into<String>) -> Result<Language> {
        Self::from_text_file(TextFile::from_text(text))
    }

    fn from_text_file(file: TextFile) -> Result<Language> {
        let kv = KeyValues::from_text(file.into_string())?;

        let tokens = kv
            .find_block("lang")
            .ok_or(Error::MissingTokens("lang"))?
            .find_block("Tokens")
            .ok_or(Error::MissingTokens("Tokens"))?
            .id();

        let language = Language { kv, tokens };
        debug!(tokens = language.len(), "loaded language");
        Ok(language)
    }

    /// The whole parsed file
    pub fn kv(&self) -> &KeyValues {
        &self.kv
    }

    /// The `lang/Tokens` block
    pub fn tokens(&self) -> KeyValue<'_> {
        self.kv.get(self.tokens).unwrap_or_else(|| self.kv.root())
    }

    /// Iterate over all `(token, text)` pairs in file order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens()
            .iter()
            .filter_map(|token| Some((token.key(), token.value()?)))
    }

    /// Number of entries in the token table
    pub fn len(&self) -> usize {
        self.tokens().len()
    }

    /// Whether the token table is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a localization token.
    ///
    /// A single leading `#` is ignored and case does not matter. Tokens missing
    /// here are looked up in `fallback`, and an empty string is returned when
    /// neither has them.
    pub fn get_token<'a>(&'a self, key: &str, fallback: Option<&'a Language>) -> &'a str {
        if key.is_empty() {
            return "";
        }

        let stripped = key.strip_prefix('#').unwrap_or(key);
        match self.tokens().find_value(stripped) {
            Some(token) => token.as_str(),
            None => fallback.map_or("", |fallback| fallback.get_token(key, None)),
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::{
        error::{Error, Result},
        Language,
    };

    const ENGLISH: &str = r#"
"lang"
{
    "Language"  "English"
    "Tokens"
    {
        "SFUI_WPNHUD_AK47"  "AK-47"
        "CSGO_Type_Knife"   "Knife"
        "Only_English"      "English only"
        "Group"
        {
            "nested"    "ignored"
        }
    }
}
"#;

    const GERMAN: &str = r#"
"Lang"
{
    "tokens"
    {
        "csgo_type_knife"   "Messer"
        "Empty"             ""
    }
}
"#;

    #[test]
    fn token_lookup() -> Result<()> {
        let english = Language::from_text(ENGLISH)?;

        assert_eq!(english.len(), 4);
        assert_eq!(english.get_token("SFUI_WPNHUD_AK47", None), "AK-47");
        assert_eq!(english.get_token("#SFUI_WPNHUD_AK47", None), "AK-47");
        assert_eq!(english.get_token("#sfui_wpnhud_ak47", None), "AK-47");
        assert_eq!(english.get_token("##SFUI_WPNHUD_AK47", None), "");
        assert_eq!(english.get_token("", None), "");
        assert_eq!(english.get_token("Missing", None), "");
        // blocks in the token table are not tokens
        assert_eq!(english.get_token("Group", None), "");

        Ok(())
    }

    #[test]
    fn token_fallback() -> Result<()> {
        let english = Language::from_text(ENGLISH)?;
        let german = Language::from_text(GERMAN)?;

        assert_eq!(german.get_token("#CSGO_Type_Knife", Some(&english)), "Messer");
        assert_eq!(german.get_token("#Only_English", Some(&english)), "English only");
        assert_eq!(german.get_token("Only_English", Some(&english)), "English only");
        assert_eq!(german.get_token("#Missing", Some(&english)), "");
        // present but empty is not missing
        assert_eq!(german.get_token("Empty", Some(&english)), "");

        Ok(())
    }

    #[test]
    fn iterate_tokens() -> Result<()> {
        let german = Language::from_text(GERMAN)?;
        assert_eq!(
            german.iter().collect::<Vec<_>>(),
            vec![("csgo_type_knife", "Messer"), ("Empty", "")]
        );
        assert_eq!(german.kv().len(), 1);
        Ok(())
    }

    #[test]
    fn missing_blocks() {
        assert!(matches!(
            Language::from_text("\"Tokens\"\n{\n\"a\" \"b\"\n}\n"),
            Err(Error::MissingTokens("lang"))
        ));
        assert!(matches!(
            Language::from_text("\"lang\"\n{\n\"Language\" \"English\"\n}\n"),
            Err(Error::MissingTokens("Tokens"))
        ));
        assert!(matches!(
            Language::from_text("\"lang\"\n{\n"),
            Err(Error::KeyValues(_))
        ));
    }
}
