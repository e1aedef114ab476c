use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::{tree::KeyValue, KeyValues};

/// Values serialize as strings, blocks as maps keyed by the original casing
impl Serialize for KeyValue<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if let Some(value) = self.value() {
            return serializer.serialize_str(value);
        }

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for child in self.iter() {
            map.serialize_entry(child.key(), &child)?;
        }
        map.end()
    }
}

impl Serialize for KeyValues {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.root().serialize(serializer)
    }
}
