//! Typed views over the blocks of `items_game.txt`
//!

use derive_more::derive::{Constructor, Deref, From};
use std::marker::PhantomData;
use valve_kv::KeyValue;
use valve_lang::Language;

/// Resolve `value` as a localization token in `language`, then in `fallback`
pub fn localize<'l>(value: &str, language: &'l Language, fallback: Option<&'l Language>) -> &'l str {
    match language.get_token(value, None) {
        "" => fallback.map_or("", |fallback| fallback.get_token(value, None)),
        text => text,
    }
}

/// The children of a block, viewed as `T`
///
/// A view over a block that does not exist is empty.
#[derive(Debug, Clone, Copy)]
pub struct Collection<'a, T> {
    block: Option<KeyValue<'a>>,
    _kind: PhantomData<T>,
}

impl<'a, T: From<KeyValue<'a>> + 'a> Collection<'a, T> {
    pub(crate) fn new(block: Option<KeyValue<'a>>) -> Self {
        Collection {
            block: block.filter(|block| block.is_block()),
            _kind: PhantomData,
        }
    }

    /// The underlying block
    pub fn block(&self) -> Option<KeyValue<'a>> {
        self.block
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.block.map_or(0, |block| block.len())
    }

    /// Whether there are no children
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a child by key, ignoring ASCII case
    pub fn find(&self, key: &str) -> Option<T> {
        self.block?.find(key).map(T::from)
    }

    /// Iterate over the children in file order
    pub fn iter(&self) -> impl Iterator<Item = T> + 'a {
        self.block.into_iter().flat_map(|block| block.iter()).map(T::from)
    }
}

fn string<'a>(block: &KeyValue<'a>, key: &str) -> Option<&'a str> {
    block.find_value(key).map(|kv| kv.as_str())
}

fn id(block: &KeyValue<'_>) -> Option<i32> {
    block.key().parse().ok()
}

/// An entry of `items_game/items`
#[derive(Debug, Clone, Copy, Deref, Constructor, From)]
pub struct Item<'a>(KeyValue<'a>);

impl<'a> Item<'a> {
    /// Definition index, `None` for entries like `default`
    pub fn id(&self) -> Option<i32> {
        id(self)
    }

    /// Internal name such as `weapon_ak47`
    pub fn name(&self) -> Option<&'a str> {
        string(self, "name")
    }

    /// Localization token of the display name
    pub fn item_name(&self) -> Option<&'a str> {
        string(self, "item_name")
    }

    /// Display name in `language`
    pub fn localized_name<'l>(&self, language: &'l Language, fallback: Option<&'l Language>) -> &'l str {
        localize(self.item_name().unwrap_or_default(), language, fallback)
    }

    /// Localization token of the item type
    pub fn item_type_name(&self) -> Option<&'a str> {
        string(self, "item_type_name")
    }

    /// Item type in `language`
    pub fn localized_item_type_name<'l>(
        &self,
        language: &'l Language,
        fallback: Option<&'l Language>,
    ) -> &'l str {
        localize(self.item_type_name().unwrap_or_default(), language, fallback)
    }

    /// Key of the entry in `rarities`
    pub fn rarity(&self) -> Option<&'a str> {
        string(self, "item_rarity")
    }

    /// The prefab this item inherits from
    pub fn prefab(&self) -> Option<&'a str> {
        string(self, "prefab")
    }

    pub fn image_inventory(&self) -> Option<&'a str> {
        string(self, "image_inventory")
    }

    pub fn model_player(&self) -> Option<&'a str> {
        string(self, "model_player")
    }

    pub fn model_world(&self) -> Option<&'a str> {
        string(self, "model_world")
    }

    pub fn model_dropped(&self) -> Option<&'a str> {
        string(self, "model_dropped")
    }
}

/// An entry of `items_game/rarities`
#[derive(Debug, Clone, Copy, Deref, Constructor, From)]
pub struct Rarity<'a>(KeyValue<'a>);

impl<'a> Rarity<'a> {
    /// Name such as `common`
    pub fn name(&self) -> &'a str {
        self.key()
    }

    /// Numeric rarity level
    pub fn value(&self) -> Option<i32> {
        self.find_value("value")?.as_int()
    }

    /// Localization token used for weapons of this rarity
    pub fn loc_key_weapon(&self) -> Option<&'a str> {
        string(self, "loc_key_weapon")
    }

    /// Weapon rarity name in `language`
    pub fn localized_name<'l>(&self, language: &'l Language, fallback: Option<&'l Language>) -> &'l str {
        localize(self.loc_key_weapon().unwrap_or_default(), language, fallback)
    }

    /// Key of the entry in `colors`
    pub fn color(&self) -> Option<&'a str> {
        string(self, "color")
    }
}

/// An entry of `items_game/colors`
#[derive(Debug, Clone, Copy, Deref, Constructor, From)]
pub struct Color<'a>(KeyValue<'a>);

impl<'a> Color<'a> {
    /// Name such as `desc_common`
    pub fn id(&self) -> &'a str {
        self.key()
    }

    /// Color as written, usually `#rrggbb`
    pub fn hex_color(&self) -> Option<&'a str> {
        string(self, "hex_color")
    }

    /// Color as `0xrrggbb`
    pub fn rgb(&self) -> Option<i32> {
        self.find_value("hex_color")?.as_hex_int()
    }
}

/// An entry of `items_game/paint_kits`
#[derive(Debug, Clone, Copy, Deref, Constructor, From)]
pub struct PaintKit<'a>(KeyValue<'a>);

impl<'a> PaintKit<'a> {
    pub fn id(&self) -> Option<i32> {
        id(self)
    }

    pub fn name(&self) -> Option<&'a str> {
        string(self, "name")
    }

    /// Localization token of the finish name
    pub fn description_tag(&self) -> Option<&'a str> {
        string(self, "description_tag")
    }

    pub fn localized_description_tag<'l>(
        &self,
        language: &'l Language,
        fallback: Option<&'l Language>,
    ) -> &'l str {
        localize(self.description_tag().unwrap_or_default(), language, fallback)
    }

    /// Localization token of the finish description
    pub fn description_string(&self) -> Option<&'a str> {
        string(self, "description_string")
    }

    pub fn localized_description_string<'l>(
        &self,
        language: &'l Language,
        fallback: Option<&'l Language>,
    ) -> &'l str {
        localize(self.description_string().unwrap_or_default(), language, fallback)
    }

    pub fn wear_remap_min(&self) -> Option<f32> {
        self.find_value("wear_remap_min")?.as_float()
    }

    pub fn wear_remap_max(&self) -> Option<f32> {
        self.find_value("wear_remap_max")?.as_float()
    }
}

/// An entry of `items_game/paint_kits_rarity`, `"paint kit name" "rarity"`
#[derive(Debug, Clone, Copy, Deref, Constructor, From)]
pub struct PaintKitRarity<'a>(KeyValue<'a>);

impl<'a> PaintKitRarity<'a> {
    /// Name of the paint kit
    pub fn id(&self) -> &'a str {
        self.key()
    }

    /// Key of the entry in `rarities`
    pub fn rarity(&self) -> &'a str {
        self.as_str()
    }
}

/// An entry of `items_game/alternate_icons2/weapon_icons`
#[derive(Debug, Clone, Copy, Deref, Constructor, From)]
pub struct AlternateIcon<'a>(KeyValue<'a>);

impl<'a> AlternateIcon<'a> {
    pub fn id(&self) -> Option<i32> {
        id(self)
    }

    pub fn icon_path(&self) -> Option<&'a str> {
        string(self, "icon_path")
    }
}
