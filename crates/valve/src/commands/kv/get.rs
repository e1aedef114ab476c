use clap::Args;
use miette::{miette, Result};
use std::path::PathBuf;
use valve_kv::{KeyValue, KeyValues};

#[derive(Args)]
pub struct GetArgs {
    /// An input KeyValues file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A key searched anywhere in the file, or a path such as `items_game/items/7`
    key: String,
}

/// Follow a `/` separated path from the top level
pub fn lookup<'a>(kv: &'a KeyValues, key: &str) -> Option<KeyValue<'a>> {
    if !key.contains('/') {
        return kv.find_recursive(key);
    }

    key.split('/')
        .filter(|part| !part.is_empty())
        .try_fold(kv.root(), |block, part| block.find(part))
}

impl GetArgs {
    pub fn handle(&self) -> Result<()> {
        let kv = KeyValues::from_file(&self.file)?;

        let found = lookup(&kv, &self.key)
            .ok_or_else(|| miette!("{} not found in {}", self.key, self.file.display()))?;

        match found.value() {
            Some(value) => println!("{value}"),
            None => print!("{found}"),
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use valve_kv::KeyValues;

    use super::lookup;

    #[test]
    fn lookup_key_or_path() {
        let kv = KeyValues::from_text(
            "\"items_game\"\n{\n\"items\"\n{\n\"7\"\n{\n\"name\" \"weapon_ak47\"\n}\n}\n\"name\" \"top\"\n}\n",
        )
        .unwrap();

        assert_eq!(lookup(&kv, "name").unwrap().as_str(), "top");
        assert_eq!(
            lookup(&kv, "items_game/items/7/name").unwrap().as_str(),
            "weapon_ak47"
        );
        assert_eq!(
            lookup(&kv, "/Items_Game/ITEMS/7/").unwrap().key(),
            "7"
        );
        assert!(lookup(&kv, "items_game/name/x").is_none());
        assert!(lookup(&kv, "missing").is_none());
    }
}
