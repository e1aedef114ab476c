//! This library reads the item schema of *Valve* games, `scripts/items/items_game.txt`.
//!
//! # Item Schema
//!
//! The schema is a single KeyValues document with one top level `items_game` block. The
//! sections used here are:
//!
//! | Block                            | Contents                                                |
//! |----------------------------------|---------------------------------------------------------|
//! | `items`                          | Item definitions keyed by definition index              |
//! | `prefabs`                        | Named templates items inherit fields from               |
//! | `rarities`                       | Rarity levels with their localization key and color     |
//! | `colors`                         | Named `#rrggbb` colors                                  |
//! | `paint_kits`                     | Weapon finishes keyed by paint kit index                |
//! | `paint_kits_rarity`              | `"paint kit name" "rarity"` pairs                       |
//! | `alternate_icons2/weapon_icons`  | Icon paths for weapon and finish combinations           |
//!
//! Items are resolved against their prefab chain once when the schema is loaded, see
//! [`prefab`].
//!

pub mod error;
pub mod items_game;
pub mod prefab;
pub mod schema;
pub mod views;

pub use items_game::ItemsGame;
pub use schema::BlockAnalyzer;
