use serde_core::ser::{Serialize, SerializeMap, Serializer};

use super::SerializeDriver;

/// A serializer for maps, entries in the map's iteration order.
pub(super) struct MapSerializer<'a, 'b, 'k> {
    pub driver: &'b SerializeDriver<'a, 'k>,
}

impl Serialize for MapSerializer<'_, '_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.driver.value();
        let mut state = serializer.serialize_map(value.len())?;
        for (key, val) in value.entries() {
            state.serialize_entry(&self.driver.with_value(key), &self.driver.with_value(val))?;
        }
        state.end()
    }
}
