//! This library handles reading and writing **KeyValues** text files used by *Valve* games.
//!
//! # KeyValues Format Documentation
//!
//! KeyValues (also known as VDF) is a nested, text based key/value format. Game data such as
//! `items_game.txt` and the localization files under `resource/` are stored this way.
//!
//! ## Structure
//!
//! A document is a list of entries. Every key is a quoted string and is followed either by a
//! quoted value or by a block of further entries:
//!
//! ```text
//! "items_game"
//! {
//!     "items"
//!     {
//!         "7"
//!         {
//!             "name"      "weapon_ak47"   [$WIN32]
//!             "prefab"    "weapon_base"
//!         }
//!     }
//! }
//! ```
//!
//! | Token        | Meaning                                                                 |
//! |--------------|-------------------------------------------------------------------------|
//! | `"text"`     | A key or value. `\"` does not end the string, line breaks are allowed   |
//! | `{` / `}`    | Opens / closes the block named by the preceding key                     |
//! | `// ...`     | Comment up to the end of the line                                       |
//! | `[$TAG]`     | Platform conditional following a value. Skipped, never evaluated        |
//!
//! - Anything after a value up to the end of its line is discarded.
//! - Keys are matched ignoring ASCII case but keep their original casing.
//! - When a block name repeats within the same parent the contents are merged.
//! - When a value key repeats within the same parent the first value wins.
//!
//! ## Memory
//!
//! A [`KeyValues`] owns its text. Nodes are stored in an arena and only point into that text,
//! so keys and values are handed out as `&str` borrowing the tree.
//!

pub mod error;
mod parse;
#[cfg(feature = "serde")]
mod serde;
pub mod tree;
pub mod types;
mod write;

pub use tree::{KeyValue, KeyValues};
pub use types::{NodeId, ValueType};
