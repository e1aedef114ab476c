//! The item schema, `scripts/items/items_game.txt`
//!

use std::{
    fmt::{self, Debug},
    path::Path,
};
use tracing::instrument;
use valve_kv::{KeyValue, KeyValues, NodeId};

use crate::{
    error::{Error, Result},
    prefab::flatten_prefabs,
    views::{AlternateIcon, Collection, Color, Item, PaintKit, PaintKitRarity, Rarity},
};

/// Parsed item schema with every item's prefab chain already flattened
///
/// ```no_run
/// fn list_items(path: &str) -> valve_items::error::Result<()> {
///     let items_game = valve_items::ItemsGame::from_file(path)?;
///
///     for item in items_game.items().iter() {
///         println!("{:?}: {}", item.id(), item.name().unwrap_or_default());
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ItemsGame {
    kv: KeyValues,
    block: NodeId,
}

impl Debug for ItemsGame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ItemsGame")
            .field("items", &self.items().len())
            .field("prefabs", &self.prefabs().map_or(0, |p| p.len()))
            .finish()
    }
}

impl ItemsGame {
    /// Read and flatten an item schema file
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<ItemsGame> {
        Self::from_kv(KeyValues::from_file(path)?)
    }

    /// Parse and flatten an item schema from text
    pub fn from_text(text: impl Into<String>) -> Result<ItemsGame> {
        Self::from_kv(KeyValues::from_text(text)?)
    }

    /// Flatten an already parsed item schema
    pub fn from_kv(mut kv: KeyValues) -> Result<ItemsGame> {
        let block = kv
            .find_block("items_game")
            .ok_or(Error::MissingBlock("items_game"))?
            .id();

        flatten_prefabs(&mut kv, block);
        Ok(ItemsGame { kv, block })
    }

    /// The whole parsed file
    pub fn kv(&self) -> &KeyValues {
        &self.kv
    }

    /// The `items_game` block
    pub fn block(&self) -> KeyValue<'_> {
        self.kv.get(self.block).unwrap_or_else(|| self.kv.root())
    }

    /// Whether the `items_game` block is empty
    pub fn is_empty(&self) -> bool {
        self.block().is_empty()
    }

    /// The `prefabs` block, left as written
    pub fn prefabs(&self) -> Option<KeyValue<'_>> {
        self.block().find_block("prefabs")
    }

    pub fn items(&self) -> Collection<'_, Item<'_>> {
        Collection::new(self.block().find("items"))
    }

    pub fn rarities(&self) -> Collection<'_, Rarity<'_>> {
        Collection::new(self.block().find("rarities"))
    }

    pub fn colors(&self) -> Collection<'_, Color<'_>> {
        Collection::new(self.block().find("colors"))
    }

    pub fn paint_kits(&self) -> Collection<'_, PaintKit<'_>> {
        Collection::new(self.block().find("paint_kits"))
    }

    pub fn paint_kit_rarities(&self) -> Collection<'_, PaintKitRarity<'_>> {
        Collection::new(self.block().find("paint_kits_rarity"))
    }

    /// Weapon icons under `alternate_icons2/weapon_icons`
    pub fn alternate_icons(&self) -> Collection<'_, AlternateIcon<'_>> {
        Collection::new(
            self.block()
                .find_block("alternate_icons2")
                .and_then(|icons| icons.find("weapon_icons")),
        )
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::{
        error::{Error, Result},
        ItemsGame,
    };

    #[test]
    fn requires_items_game_block() {
        assert!(matches!(
            ItemsGame::from_text("\"lang\"\n{\n}\n"),
            Err(Error::MissingBlock("items_game"))
        ));
        assert!(matches!(
            ItemsGame::from_text("\"items_game\" \"value\""),
            Err(Error::MissingBlock("items_game"))
        ));
        assert!(matches!(
            ItemsGame::from_text("\"items_game\"\n{\n"),
            Err(Error::KeyValues(_))
        ));
    }

    #[test]
    fn missing_sections_are_empty() -> Result<()> {
        let items_game = ItemsGame::from_text("\"items_game\"\n{\n}\n")?;

        assert!(items_game.is_empty());
        assert!(items_game.items().is_empty());
        assert!(items_game.rarities().is_empty());
        assert!(items_game.colors().is_empty());
        assert!(items_game.paint_kits().is_empty());
        assert!(items_game.paint_kit_rarities().is_empty());
        assert!(items_game.alternate_icons().is_empty());
        assert!(items_game.prefabs().is_none());

        Ok(())
    }

    #[test]
    fn flattened_on_load() -> Result<()> {
        let items_game = ItemsGame::from_text(
            r#"
"items_game"
{
    "prefabs"
    {
        "base"
        {
            "item_rarity"   "common"
        }
    }
    "items"
    {
        "1"
        {
            "prefab"    "base"
            "name"      "weapon_deagle"
        }
    }
}
"#,
        )?;

        let deagle = items_game.items().find("1").unwrap();
        assert_eq!(deagle.rarity(), Some("common"));
        assert_eq!(deagle.name(), Some("weapon_deagle"));

        Ok(())
    }
}
