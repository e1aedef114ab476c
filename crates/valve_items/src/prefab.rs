//! Prefab inheritance
//!
//! Items name a template block with their `prefab` field and inherit every field they do not
//! set themselves. Prefabs can name further prefabs, and fields closer to the item win:
//!
//! ```text
//! "prefabs"
//! {
//!     "weapon_base"   { "item_class" "weapon"  "attributes" { "a" "1" } }
//!     "rifle_base"    { "prefab" "weapon_base"  "attributes" { "b" "2" } }
//! }
//! "items"
//! {
//!     "7"             { "prefab" "valve rifle_base"  "name" "weapon_ak47" }
//! }
//! ```
//!
//! Item `7` ends up with `item_class` from `weapon_base` and `attributes` holding both `a` and
//! `b`. Blocks present on both sides are merged one level deep only.

use std::collections::HashSet;
use tracing::{debug, instrument, trace, warn};
use valve_kv::{KeyValue, KeyValues, NodeId};

/// Prefix some prefab references carry in front of the prefab name
pub const PREFAB_PREFIX: &str = "valve ";

/// Longest prefab chain followed for a single item
pub const MAX_PREFAB_DEPTH: usize = 64;

/// Strip [`PREFAB_PREFIX`] from a prefab reference
pub fn prefab_name(reference: &str) -> &str {
    reference.strip_prefix(PREFAB_PREFIX).unwrap_or(reference)
}

/// The prefab blocks `item` inherits from, closest first
pub fn resolve_chain<'a>(prefabs: Option<KeyValue<'a>>, item: KeyValue<'a>) -> Vec<NodeId> {
    let mut chain = Vec::new();
    let Some(mut reference) = item.find_value("prefab").map(|p| p.as_str()) else {
        return chain;
    };

    let mut seen = HashSet::new();
    loop {
        let name = prefab_name(reference);
        let Some(prefab) = prefabs.and_then(|prefabs| prefabs.find_block(name)) else {
            warn!(item = item.key(), prefab = name, "missing prefab");
            break;
        };
        if !seen.insert(prefab.id()) {
            warn!(item = item.key(), prefab = name, "prefab cycle");
            break;
        }
        if chain.len() == MAX_PREFAB_DEPTH {
            warn!(item = item.key(), depth = MAX_PREFAB_DEPTH, "prefab chain too deep");
            break;
        }
        chain.push(prefab.id());

        match prefab.find_value("prefab") {
            Some(next) => reference = next.as_str(),
            None => break,
        }
    }

    chain
}

/// Copy every field of `prefab` that `item` is missing into `item`
fn inherit(kv: &mut KeyValues, item: NodeId, prefab: NodeId) -> usize {
    // (target block, source node), collected before the tree is touched
    let mut copies = Vec::new();
    {
        let (Some(item), Some(prefab)) = (kv.get(item), kv.get(prefab)) else {
            return 0;
        };

        for field in prefab {
            match item.find(field.key()) {
                None => copies.push((item.id(), field.id())),
                Some(own) if own.is_block() && field.is_block() => {
                    copies.extend(
                        field
                            .iter()
                            .filter(|child| own.find(child.key()).is_none())
                            .map(|child| (own.id(), child.id())),
                    );
                }
                Some(_) => trace!(field = field.key(), "keeping item value"),
            }
        }
    }

    let mut inserted = 0;
    for (parent, source) in copies {
        if let Some(copy) = kv.copy_subtree(source) {
            if kv.insert(parent, copy) {
                inserted += 1;
            }
        }
    }
    inserted
}

/// Flatten the prefab chain of every item under `items_game/items` in place
#[instrument(skip_all)]
pub fn flatten_prefabs(kv: &mut KeyValues, items_game: NodeId) {
    let plans: Vec<(NodeId, Vec<NodeId>)> = {
        let Some(items_game) = kv.get(items_game) else {
            return;
        };
        let Some(items) = items_game.find_block("items") else {
            debug!("no items to flatten");
            return;
        };
        let prefabs = items_game.find_block("prefabs");

        items
            .iter()
            .filter(|item| item.is_block())
            .map(|item| (item.id(), resolve_chain(prefabs, item)))
            .filter(|(_, chain)| !chain.is_empty())
            .collect()
    };

    let mut inherited = 0;
    for (item, chain) in &plans {
        for prefab in chain {
            inherited += inherit(kv, *item, *prefab);
        }
    }

    debug!(items = plans.len(), fields = inherited, "flattened prefabs");
}
