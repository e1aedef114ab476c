//! This library resolves localization tokens from the language files used by *Valve* games.
//!
//! # Language File Format
//!
//! Language files live under `resource/` and are named after the language they translate, for
//! example `csgo_english.txt`. They are KeyValues text, usually encoded as UTF-16 little endian
//! with a byte order mark:
//!
//! ```text
//! "lang"
//! {
//!     "Language"  "English"
//!     "Tokens"
//!     {
//!         "SFUI_WPNHUD_AK47"  "AK-47"
//!     }
//! }
//! ```
//!
//! Game data refers to tokens with a leading `#`, `"item_name" "#SFUI_WPNHUD_AK47"`. Token names
//! are matched ignoring ASCII case.
//!

pub mod error;
pub mod language;
pub mod text;

pub use language::Language;
pub use text::TextFile;
