use pretty_assertions::assert_eq;
use valve_kv::{error::Result, KeyValue, KeyValues};

const ITEMS_GAME: &str = r##"
"items_game"
{
    "game_info"
    {
        "first_valid_class"     "2"
    }
    "prefabs"
    {
        "weapon_base"
        {
            "item_class"    "weapon"
            "attributes"
            {
                "magazine model"    "models/weapons/mag.mdl"
            }
        }
    }
    "items"
    {
        "7"
        {
            "name"      "weapon_ak47"
            "prefab"    "weapon_base"
            "item_name" "#SFUI_WPNHUD_AK47"
        }
    }
}
"##;

fn assert_same(expected: KeyValue<'_>, actual: KeyValue<'_>) {
    assert_eq!(expected.key(), actual.key());
    assert_eq!(expected.value(), actual.value());
    assert_eq!(expected.len(), actual.len());

    for (e, a) in expected.iter().zip(actual.iter()) {
        assert_same(e, a);
    }
}

#[test]
fn round_trip() -> Result<()> {
    let original = KeyValues::from_text(ITEMS_GAME)?;
    let reparsed = KeyValues::from_text(original.to_string())?;

    assert_same(original.root(), reparsed.root());

    Ok(())
}

#[test]
fn round_trip_keeps_escapes() -> Result<()> {
    let original = KeyValues::from_text("\"quote\" \"a \\\"b\\\" c\"\n")?;
    let reparsed = KeyValues::from_text(original.to_string())?;

    assert_eq!(reparsed.find("quote").unwrap().as_str(), "a \\\"b\\\" c");

    Ok(())
}

#[test]
fn writing_is_idempotent() -> Result<()> {
    let kv = KeyValues::from_text(ITEMS_GAME)?;

    let first = kv.to_string();
    let second = kv.to_string();
    assert_eq!(first, second);

    let reparsed = KeyValues::from_text(first.clone())?;
    assert_eq!(reparsed.to_string(), first);

    Ok(())
}

#[test]
fn write_to_file_and_back() -> Result<()> {
    let kv = KeyValues::from_text(ITEMS_GAME)?;

    let path = std::env::temp_dir().join(format!("valve_kv_write_{}.txt", std::process::id()));
    kv.write_to_file(&path)?;
    let reread = KeyValues::from_file(&path)?;
    std::fs::remove_file(&path)?;

    assert_same(kv.root(), reread.root());

    Ok(())
}
